use std::sync::Arc;

use super::encoding::composite_key;
use super::key::SharedKey;
use super::method::{MethodAlgorithm, SignatureMethod, matches_expected};
use super::observer::{VerifyObserver, default_observer};
use crate::error::Result;

/// PLAINTEXT signature method (RFC 5849 section 3.4.4).
///
/// The signature is the composite key itself; the base string is ignored.
/// Only safe over a secure transport.
#[derive(Clone)]
pub struct PlainText {
    observer: Arc<dyn VerifyObserver>,
}

impl PlainText {
    pub fn new() -> Self {
        Self {
            observer: default_observer(),
        }
    }

    pub fn with_observer(observer: Arc<dyn VerifyObserver>) -> Self {
        Self { observer }
    }
}

impl Default for PlainText {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodAlgorithm for PlainText {
    type SigningKey = SharedKey;
    type VerifyingKey = SharedKey;

    fn method(&self) -> SignatureMethod {
        SignatureMethod::PlainText
    }

    fn sign(
        &self,
        signing_key: &SharedKey,
        secret_credential: &str,
        _base_string: &str,
    ) -> Result<String> {
        Ok(composite_key(signing_key.value(), secret_credential))
    }

    fn verify(
        &self,
        signature: &str,
        verifying_key: &SharedKey,
        secret_credential: &str,
        base_string: &str,
    ) -> Result<bool> {
        let expected = self.sign(verifying_key, secret_credential, base_string)?;
        Ok(matches_expected(
            self.method(),
            self.observer.as_ref(),
            signature,
            &expected,
        ))
    }
}
