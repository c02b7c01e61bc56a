pub mod eq;
pub mod kdf;

mod sodium;

pub use kdf::{derive, verify, Error};
