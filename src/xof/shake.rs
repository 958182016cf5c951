//! SHAKE-256 (FIPS PUB 202) over the Keccak-f[1600] permutation.

use super::ExtendableOutput;

const KECCAK_ROUNDS: usize = 24;
const STATE_WORDS: usize = 25;

/// Rate in bytes: 1600 - 2 * 256 bits.
const RATE: usize = 136;

/// Round constants.
const RC: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation offsets, in the iteration order of the pi mapping below.
const RHO: [u32; 24] = [
    1, 3, 6, 10, 15, 21, 28, 36, 45, 55, 2, 14, 27, 41, 56, 8, 25, 43, 62, 18, 39, 61, 20, 44,
];

/// Lane destinations of the pi step.
const PI: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

fn keccak_f1600(state: &mut [u64; STATE_WORDS]) {
    for &rc in RC.iter() {
        // Theta
        let mut c = [0u64; 5];
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in 0..5 {
                state[x + 5 * y] ^= d;
            }
        }

        // Rho and pi
        let mut b = [0u64; STATE_WORDS];
        b[0] = state[0];
        let mut x = 1;
        let mut y = 0;
        for i in 0..24 {
            b[PI[i]] = state[x + 5 * y].rotate_left(RHO[i]);
            let t = y;
            y = (2 * x + 3 * y) % 5;
            x = t;
        }

        // Chi
        for y in 0..5 {
            for x in 0..5 {
                state[x + 5 * y] =
                    b[x + 5 * y] ^ ((!b[(x + 1) % 5 + 5 * y]) & b[(x + 2) % 5 + 5 * y]);
            }
        }

        // Iota
        state[0] ^= rc;
    }
}

/// The SHAKE-256 sponge.
#[derive(Clone)]
pub struct Shake256 {
    state: [u64; STATE_WORDS],
    buf: [u8; RATE],
    buf_len: usize,
    squeezing: bool,
}

impl Shake256 {
    /// XOR a full rate-sized block into the state and permute.
    fn absorb_block(&mut self, block: &[u8]) {
        for (i, &byte) in block.iter().enumerate() {
            self.state[i / 8] ^= (byte as u64) << (8 * (i % 8));
        }
        keccak_f1600(&mut self.state);
    }

    /// Apply the SHAKE domain padding and switch the sponge over to
    /// squeezing.
    fn start_squeezing(&mut self) {
        let mut block = [0u8; RATE];
        block[..self.buf_len].copy_from_slice(&self.buf[..self.buf_len]);
        block[self.buf_len] ^= 0x1f;
        block[RATE - 1] ^= 0x80;
        self.absorb_block(&block);

        self.extract_block();
        self.squeezing = true;
    }

    /// Copy the rate portion of the state into the output buffer.
    fn extract_block(&mut self) {
        for i in 0..RATE {
            self.buf[i] = (self.state[i / 8] >> (8 * (i % 8))) as u8;
        }
        self.buf_len = 0;
    }
}

impl ExtendableOutput for Shake256 {
    fn new() -> Self {
        Shake256 {
            state: [0u64; STATE_WORDS],
            buf: [0u8; RATE],
            buf_len: 0,
            squeezing: false,
        }
    }

    fn update(&mut self, data: &[u8]) {
        debug_assert!(!self.squeezing, "update after squeeze");

        let mut data = data;
        if self.buf_len > 0 {
            let take = (RATE - self.buf_len).min(data.len());
            self.buf[self.buf_len..self.buf_len + take].copy_from_slice(&data[..take]);
            self.buf_len += take;
            data = &data[take..];

            if self.buf_len == RATE {
                let block = self.buf;
                self.absorb_block(&block);
                self.buf_len = 0;
            }
        }

        while data.len() >= RATE {
            let (block, rest) = data.split_at(RATE);
            self.absorb_block(block);
            data = rest;
        }

        if !data.is_empty() {
            self.buf[..data.len()].copy_from_slice(data);
            self.buf_len = data.len();
        }
    }

    fn squeeze(&mut self, output: &mut [u8]) {
        if !self.squeezing {
            self.start_squeezing();
        }

        // While squeezing, buf holds the current output block and
        // buf_len the number of bytes of it already handed out.
        let mut offset = 0;
        while offset < output.len() {
            if self.buf_len == RATE {
                keccak_f1600(&mut self.state);
                self.extract_block();
            }

            let take = (RATE - self.buf_len).min(output.len() - offset);
            output[offset..offset + take].copy_from_slice(&self.buf[self.buf_len..self.buf_len + take]);
            self.buf_len += take;
            offset += take;
        }
    }
}
