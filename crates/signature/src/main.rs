use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use simple_signature::{HmacSha1, MethodAlgorithm, PlainText, SharedKey, SignatureMethod, lookup};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "signature", version, about = "Sign and verify OAuth-style signature base strings")]
struct Args {
    /// Print results as JSON.
    #[clap(long, global = true)]
    json: bool,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign a base string.
    Sign(KeyArgs),
    /// Verify a received signature. Exits 1 on mismatch.
    Verify {
        #[clap(long)]
        signature: String,
        #[clap(flatten)]
        keys: KeyArgs,
    },
    /// List the signature methods built into this binary.
    Methods,
    /// Print a PKCS#8 PEM RSA key derived from a seed.
    #[cfg(feature = "rsa-sha1")]
    Keygen {
        #[clap(long, env = "RSA_KEY_SEED", hide_env_values = true)]
        seed: String,
    },
}

#[derive(clap::Args)]
struct KeyArgs {
    #[clap(long, env = "SIGNATURE_METHOD", default_value = "HMAC-SHA1", value_parser = lookup)]
    method: SignatureMethod,
    #[clap(long, env = "SIGNING_KEY", default_value = "", hide_env_values = true)]
    signing_key: String,
    #[clap(long, env = "SECRET_CREDENTIAL", default_value = "", hide_env_values = true)]
    secret: String,

    // RSA-SHA1 key material (one of the two)
    #[clap(long, env = "RSA_KEY_SEED", hide_env_values = true, conflicts_with = "rsa_key_pem")]
    rsa_key_seed: Option<String>,
    #[clap(long, env = "RSA_KEY_PEM")]
    rsa_key_pem: Option<PathBuf>,

    /// Read from stdin when omitted, signed byte for byte (a trailing
    /// newline is part of the base string).
    #[clap(long)]
    base_string: Option<String>,
}

impl KeyArgs {
    fn shared_key(&self) -> SharedKey {
        SharedKey::new(self.signing_key.as_str())
    }

    fn base_string(&self) -> Result<String> {
        if let Some(base_string) = &self.base_string {
            return Ok(base_string.clone());
        }
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("reading base string from stdin")?;
        Ok(input)
    }
}

#[derive(Serialize)]
struct Signed {
    method: SignatureMethod,
    signature: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    public_key: Option<String>,
}

#[derive(Serialize)]
struct Verified {
    method: SignatureMethod,
    verified: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    match args.command {
        Command::Sign(keys) => {
            let base_string = keys.base_string()?;
            let signed = sign(&keys, &base_string)?;
            if args.json {
                println!("{}", serde_json::to_string(&signed)?);
            } else {
                println!("{}", signed.signature);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Verify { signature, keys } => {
            let base_string = keys.base_string()?;
            let verified = Verified {
                method: keys.method,
                verified: verify(&keys, &signature, &base_string)?,
            };
            if args.json {
                println!("{}", serde_json::to_string(&verified)?);
            } else {
                println!("{}", if verified.verified { "valid" } else { "invalid" });
            }
            Ok(if verified.verified {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Command::Methods => {
            let methods: Vec<SignatureMethod> = SignatureMethod::available().collect();
            if args.json {
                println!("{}", serde_json::to_string(&methods)?);
            } else {
                for method in methods {
                    println!("{method}");
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        #[cfg(feature = "rsa-sha1")]
        Command::Keygen { seed } => {
            let key = simple_signature::RsaSha1SigningKey::from_seed(&seed)
                .context("generating RSA key from seed")?;
            print!("{}", key.to_pkcs8_pem()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn sign(keys: &KeyArgs, base_string: &str) -> Result<Signed> {
    let method = keys.method;
    let (signature, public_key) = match method {
        SignatureMethod::HmacSha1 => {
            let signature = HmacSha1::new().sign(&keys.shared_key(), &keys.secret, base_string)?;
            (signature, None)
        }
        SignatureMethod::PlainText => {
            let signature = PlainText::new().sign(&keys.shared_key(), &keys.secret, base_string)?;
            (signature, None)
        }
        SignatureMethod::RsaSha1 => rsa_keys::sign(keys, base_string)?,
    };
    Ok(Signed {
        method,
        signature,
        public_key,
    })
}

fn verify(keys: &KeyArgs, signature: &str, base_string: &str) -> Result<bool> {
    let verified = match keys.method {
        SignatureMethod::HmacSha1 => {
            HmacSha1::new().verify(signature, &keys.shared_key(), &keys.secret, base_string)?
        }
        SignatureMethod::PlainText => {
            PlainText::new().verify(signature, &keys.shared_key(), &keys.secret, base_string)?
        }
        SignatureMethod::RsaSha1 => rsa_keys::verify(keys, signature, base_string)?,
    };
    Ok(verified)
}

#[cfg(feature = "rsa-sha1")]
mod rsa_keys {
    use anyhow::{Context, Result, bail};
    use simple_signature::{MethodAlgorithm, RsaSha1, RsaSha1SigningKey, RsaSha1VerifyingKey};

    use super::KeyArgs;

    fn read_pem(keys: &KeyArgs) -> Result<Option<String>> {
        let Some(path) = &keys.rsa_key_pem else {
            return Ok(None);
        };
        let pem = std::fs::read_to_string(path)
            .with_context(|| format!("reading RSA key from {}", path.display()))?;
        Ok(Some(pem))
    }

    fn signing_key(keys: &KeyArgs) -> Result<RsaSha1SigningKey> {
        if let Some(pem) = read_pem(keys)? {
            return Ok(RsaSha1SigningKey::from_pkcs8_pem(&pem)?);
        }
        match &keys.rsa_key_seed {
            Some(seed) => {
                RsaSha1SigningKey::from_seed(seed).context("generating RSA key from seed")
            }
            None => bail!("RSA-SHA1 needs --rsa-key-seed or --rsa-key-pem"),
        }
    }

    fn verifying_key(keys: &KeyArgs) -> Result<RsaSha1VerifyingKey> {
        if let Some(pem) = read_pem(keys)? {
            // A private key file works too; its public half is used.
            return match RsaSha1VerifyingKey::from_public_key_pem(&pem) {
                Ok(key) => Ok(key),
                Err(_) => Ok(RsaSha1SigningKey::from_pkcs8_pem(&pem)
                    .context("reading RSA key as public or private PEM")?
                    .verifying_key()),
            };
        }
        Ok(signing_key(keys)?.verifying_key())
    }

    pub(super) fn sign(keys: &KeyArgs, base_string: &str) -> Result<(String, Option<String>)> {
        let key = signing_key(keys)?;
        let signature = RsaSha1.sign(&key, &keys.secret, base_string)?;
        let public_key = hex::encode(key.verifying_key().public_key_der()?);
        Ok((signature, Some(public_key)))
    }

    pub(super) fn verify(keys: &KeyArgs, signature: &str, base_string: &str) -> Result<bool> {
        let key = verifying_key(keys)?;
        Ok(RsaSha1.verify(signature, &key, &keys.secret, base_string)?)
    }
}

#[cfg(not(feature = "rsa-sha1"))]
mod rsa_keys {
    use anyhow::Result;
    use simple_signature::{SignatureError, SignatureMethod};

    use super::KeyArgs;

    pub(super) fn sign(_keys: &KeyArgs, _base_string: &str) -> Result<(String, Option<String>)> {
        Err(SignatureError::AlgorithmUnavailable(SignatureMethod::RsaSha1.to_string()).into())
    }

    pub(super) fn verify(_keys: &KeyArgs, _signature: &str, _base_string: &str) -> Result<bool> {
        Err(SignatureError::AlgorithmUnavailable(SignatureMethod::RsaSha1.to_string()).into())
    }
}
