mod encoding;
mod hmac_sha1;
mod key;
mod method;
mod observer;
mod plaintext;
#[cfg(feature = "rsa-sha1")]
mod rsa_sha1;

pub use encoding::{base64_encode, composite_key, percent_encode};
pub use hmac_sha1::HmacSha1;
pub use key::SharedKey;
pub use method::{MethodAlgorithm, SignatureMethod, lookup};
pub use observer::{NoopObserver, TracingObserver, VerifyObserver};
pub use plaintext::PlainText;
#[cfg(feature = "rsa-sha1")]
pub use rsa_sha1::{RSA_KEY_BITS, RsaSha1, RsaSha1SigningKey, RsaSha1VerifyingKey};
