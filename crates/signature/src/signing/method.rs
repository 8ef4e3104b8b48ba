use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use subtle::ConstantTimeEq;

use super::observer::VerifyObserver;
use crate::error::{Result, SignatureError};

/// A signature method strategy.
///
/// Implementations are stateless and sync; signing is CPU-bound.
/// For async callers, use `spawn_blocking`.
pub trait MethodAlgorithm: Send + Sync {
    type SigningKey: ?Sized;
    type VerifyingKey: ?Sized;

    /// Registry identifier (e.g. `HMAC-SHA1`).
    fn method(&self) -> SignatureMethod;

    /// Signs `base_string`, returning the encoded signature.
    fn sign(
        &self,
        signing_key: &Self::SigningKey,
        secret_credential: &str,
        base_string: &str,
    ) -> Result<String>;

    /// Checks a received signature.
    ///
    /// `Ok(false)` means the signature does not match. Failures computing
    /// the expected value are returned as errors, never folded into `false`.
    fn verify(
        &self,
        signature: &str,
        verifying_key: &Self::VerifyingKey,
        secret_credential: &str,
        base_string: &str,
    ) -> Result<bool>;
}

/// Closed set of signature method identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SignatureMethod {
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    #[serde(rename = "PLAINTEXT")]
    PlainText,
    #[serde(rename = "RSA-SHA1")]
    RsaSha1,
}

impl SignatureMethod {
    pub const ALL: [SignatureMethod; 3] = [
        SignatureMethod::HmacSha1,
        SignatureMethod::PlainText,
        SignatureMethod::RsaSha1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureMethod::HmacSha1 => "HMAC-SHA1",
            SignatureMethod::PlainText => "PLAINTEXT",
            SignatureMethod::RsaSha1 => "RSA-SHA1",
        }
    }

    /// Whether this build carries an implementation of the method.
    pub fn is_available(&self) -> bool {
        match self {
            SignatureMethod::HmacSha1 | SignatureMethod::PlainText => true,
            SignatureMethod::RsaSha1 => cfg!(feature = "rsa-sha1"),
        }
    }

    pub fn available() -> impl Iterator<Item = SignatureMethod> {
        Self::ALL.into_iter().filter(SignatureMethod::is_available)
    }
}

impl fmt::Display for SignatureMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SignatureMethod {
    type Err = SignatureError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|method| method.as_str() == s)
            .ok_or_else(|| SignatureError::UnknownMethod(s.to_string()))
    }
}

/// Resolves an identifier to a method compiled into this build.
pub fn lookup(identifier: &str) -> Result<SignatureMethod> {
    let method: SignatureMethod = identifier.parse()?;
    if !method.is_available() {
        return Err(SignatureError::AlgorithmUnavailable(method.to_string()));
    }
    tracing::trace!(%method, "resolved signature method");
    Ok(method)
}

/// Reports both values to the observer, then compares them in constant time.
pub(crate) fn matches_expected(
    method: SignatureMethod,
    observer: &dyn VerifyObserver,
    received: &str,
    expected: &str,
) -> bool {
    if observer.enabled() {
        observer.on_verify(method, received, expected);
    }
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}
