//! Unit tests, grouped by layer.

mod field;
mod groups;
mod pairings;
mod serialization;
