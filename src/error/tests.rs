use super::{validate, Error};

#[test]
fn display_formats() {
    let e = Error::Length {
        context: "public key",
        expected: 48,
        actual: 47,
    };
    assert_eq!(
        e.to_string(),
        "invalid length for public key: expected 48, got 47"
    );

    let e = Error::NotInSubgroup { context: "G2" };
    assert_eq!(e.to_string(), "G2 point is not in the order-q subgroup");

    let e = Error::Arithmetic {
        operation: "isogeny evaluation",
        details: "denominator is not invertible",
    };
    assert_eq!(
        e.to_string(),
        "arithmetic error in isogeny evaluation: denominator is not invertible"
    );

    let e = Error::CountMismatch {
        messages: 3,
        keys: 2,
    };
    assert_eq!(
        e.to_string(),
        "mismatched list lengths: 3 messages, 2 public keys"
    );
}

#[test]
fn validate_helpers() {
    assert!(validate::length("signature", 96, 96).is_ok());
    assert_eq!(
        validate::length("signature", 95, 96),
        Err(Error::Length {
            context: "signature",
            expected: 96,
            actual: 95,
        })
    );
    assert!(validate::parameter(true, "sk", "must be non-zero").is_ok());
    assert!(validate::encoding(false, "hex", "odd length").is_err());
}
