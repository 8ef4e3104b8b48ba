use std::fmt;

use rand_chacha::ChaCha20Rng;
use rand_chacha::rand_core::SeedableRng;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::encoding::{base64_decode, base64_encode};
use super::method::{MethodAlgorithm, SignatureMethod};
use crate::error::{Result, SignatureError};

pub const RSA_KEY_BITS: usize = 2048;

const METHOD: SignatureMethod = SignatureMethod::RsaSha1;

fn invalid_key(reason: impl ToString) -> SignatureError {
    SignatureError::invalid_key(METHOD.as_str(), reason)
}

/// RSA private key for the RSA-SHA1 method.
#[derive(Clone)]
pub struct RsaSha1SigningKey {
    signing_key: SigningKey<Sha1>,
    private_key: RsaPrivateKey,
}

impl RsaSha1SigningKey {
    /// Derives a key deterministically: the SHA-256 hash of the seed
    /// seeds the CSPRNG used for key generation.
    pub fn from_seed(seed: &str) -> Result<Self> {
        Self::generate(seed, RSA_KEY_BITS)
    }

    pub fn generate(seed: &str, bits: usize) -> Result<Self> {
        let hash = Sha256::digest(seed.as_bytes());
        let mut rng = ChaCha20Rng::from_seed(hash.into());
        let private_key = RsaPrivateKey::new(&mut rng, bits).map_err(invalid_key)?;
        Ok(Self::from_private_key(private_key))
    }

    pub fn from_pkcs8_pem(pem: &str) -> Result<Self> {
        let private_key = RsaPrivateKey::from_pkcs8_pem(pem).map_err(invalid_key)?;
        Ok(Self::from_private_key(private_key))
    }

    fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let signing_key = SigningKey::<Sha1>::new(private_key.clone());
        Self { signing_key, private_key }
    }

    pub fn to_pkcs8_pem(&self) -> Result<String> {
        let pem = self
            .private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(invalid_key)?;
        Ok(pem.to_string())
    }

    pub fn verifying_key(&self) -> RsaSha1VerifyingKey {
        RsaSha1VerifyingKey::from_public_key(self.private_key.to_public_key())
    }
}

impl fmt::Debug for RsaSha1SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSha1SigningKey").finish_non_exhaustive()
    }
}

/// RSA public key for the RSA-SHA1 method.
#[derive(Clone)]
pub struct RsaSha1VerifyingKey {
    verifying_key: VerifyingKey<Sha1>,
    public_key: RsaPublicKey,
}

impl RsaSha1VerifyingKey {
    pub fn from_public_key_pem(pem: &str) -> Result<Self> {
        let public_key = RsaPublicKey::from_public_key_pem(pem).map_err(invalid_key)?;
        Ok(Self::from_public_key(public_key))
    }

    fn from_public_key(public_key: RsaPublicKey) -> Self {
        let verifying_key = VerifyingKey::<Sha1>::new(public_key.clone());
        Self { verifying_key, public_key }
    }

    pub fn to_public_key_pem(&self) -> Result<String> {
        self.public_key
            .to_public_key_pem(LineEnding::LF)
            .map_err(invalid_key)
    }

    /// DER-encoded SubjectPublicKeyInfo.
    pub fn public_key_der(&self) -> Result<Vec<u8>> {
        let der = self.public_key.to_public_key_der().map_err(invalid_key)?;
        Ok(der.into_vec())
    }
}

impl fmt::Debug for RsaSha1VerifyingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSha1VerifyingKey")
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

/// RSA-SHA1 signature method (RFC 5849 section 3.4.3).
///
/// RSASSA-PKCS1-v1_5 with SHA-1 over the base string. The secret
/// credential plays no part in this method.
#[derive(Debug, Default, Clone, Copy)]
pub struct RsaSha1;

impl RsaSha1 {
    pub fn new() -> Self {
        Self
    }
}

impl MethodAlgorithm for RsaSha1 {
    type SigningKey = RsaSha1SigningKey;
    type VerifyingKey = RsaSha1VerifyingKey;

    fn method(&self) -> SignatureMethod {
        METHOD
    }

    fn sign(
        &self,
        signing_key: &RsaSha1SigningKey,
        _secret_credential: &str,
        base_string: &str,
    ) -> Result<String> {
        let signature = signing_key
            .signing_key
            .try_sign(base_string.as_bytes())
            .map_err(invalid_key)?;
        Ok(base64_encode(&signature.to_bytes()))
    }

    fn verify(
        &self,
        signature: &str,
        verifying_key: &RsaSha1VerifyingKey,
        _secret_credential: &str,
        base_string: &str,
    ) -> Result<bool> {
        let Some(raw) = base64_decode(signature) else {
            tracing::debug!(method = %METHOD, received = signature, "signature is not base64");
            return Ok(false);
        };
        let Ok(signature) = Signature::try_from(raw.as_slice()) else {
            tracing::debug!(method = %METHOD, received = signature, "malformed signature");
            return Ok(false);
        };
        let verified = verifying_key
            .verifying_key
            .verify(base_string.as_bytes(), &signature)
            .is_ok();
        tracing::debug!(method = %METHOD, verified, "verified signature");
        Ok(verified)
    }
}
