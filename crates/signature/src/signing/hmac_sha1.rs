use std::sync::Arc;

use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::encoding::{base64_encode, composite_key};
use super::key::SharedKey;
use super::method::{MethodAlgorithm, SignatureMethod, matches_expected};
use super::observer::{VerifyObserver, default_observer};
use crate::error::{Result, SignatureError};

type HmacSha1Mac = Hmac<Sha1>;

/// HMAC-SHA1 signature method (RFC 5849 section 3.4.2).
///
/// The HMAC key is the percent-encoded signing key and secret credential
/// joined by `&`. The digest over the base string is base64-encoded.
/// A fresh MAC context is built per call, so one instance can be shared
/// freely across threads.
#[derive(Clone)]
pub struct HmacSha1 {
    observer: Arc<dyn VerifyObserver>,
}

impl HmacSha1 {
    pub fn new() -> Self {
        Self {
            observer: default_observer(),
        }
    }

    pub fn with_observer(observer: Arc<dyn VerifyObserver>) -> Self {
        Self { observer }
    }
}

impl Default for HmacSha1 {
    fn default() -> Self {
        Self::new()
    }
}

impl MethodAlgorithm for HmacSha1 {
    type SigningKey = SharedKey;
    type VerifyingKey = SharedKey;

    fn method(&self) -> SignatureMethod {
        SignatureMethod::HmacSha1
    }

    fn sign(
        &self,
        signing_key: &SharedKey,
        secret_credential: &str,
        base_string: &str,
    ) -> Result<String> {
        let key = composite_key(signing_key.value(), secret_credential);
        // HMAC accepts keys of any length.
        let mut mac = HmacSha1Mac::new_from_slice(key.as_bytes())
            .map_err(|e| SignatureError::invalid_key(self.method().as_str(), e))?;
        mac.update(base_string.as_bytes());
        Ok(base64_encode(&mac.finalize().into_bytes()))
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
