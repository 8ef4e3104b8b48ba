pub mod error;
pub mod signing;

pub use error::SignatureError;
pub use signing::{HmacSha1, MethodAlgorithm, PlainText, SharedKey, SignatureMethod, lookup};
#[cfg(feature = "rsa-sha1")]
pub use signing::{RsaSha1, RsaSha1SigningKey, RsaSha1VerifyingKey};
