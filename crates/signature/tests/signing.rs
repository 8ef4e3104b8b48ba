use std::sync::Arc;

use simple_signature::signing::{NoopObserver, base64_encode, composite_key, percent_encode};
use simple_signature::{
    HmacSha1, MethodAlgorithm, PlainText, SharedKey, SignatureError, SignatureMethod, lookup,
};

fn hmac() -> HmacSha1 {
    HmacSha1::with_observer(Arc::new(NoopObserver))
}

fn sign(key: &str, secret: &str, message: &str) -> String {
    hmac().sign(&SharedKey::new(key), secret, message).unwrap()
}

fn verify(signature: &str, key: &str, secret: &str, message: &str) -> bool {
    hmac()
        .verify(signature, &SharedKey::new(key), secret, message)
        .unwrap()
}

// ── HMAC-SHA1 properties ─────────────────────────────────────────────

#[test]
fn known_answer_for_fixed_triple() {
    assert_eq!(composite_key("kkk", "sss"), "kkk&sss");
    assert_eq!(sign("kkk", "sss", "base"), "j+yC70B5v+ybrTTDBC7xANlfyHE=");
}

#[test]
fn oauth_core_example_vector() {
    // OAuth Core 1.0 appendix A.5.2
    let base_string = "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg\
        %26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh\
        %26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096\
        %26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal";
    let signature = sign("kd94hf93k423kf44", "pfkkdhi9sl3r4s00", base_string);
    assert_eq!(signature, "tR3+Ty81lMeYAr/Fid0kMTYa/WM=");
    assert!(verify(&signature, "kd94hf93k423kf44", "pfkkdhi9sl3r4s00", base_string));
}

#[test]
fn signing_is_deterministic() {
    let first = sign("key", "secret", "message");
    for _ in 0..10 {
        assert_eq!(sign("key", "secret", "message"), first);
    }
}

#[test]
fn verify_accepts_own_signatures() {
    let cases = [
        ("kkk", "sss", "base"),
        ("consumer", "token", "POST&https%3A%2F%2Fexample.com&a%3D1"),
        ("ünïcödé", "秘密", "message with spaces & symbols"),
        ("", "", ""),
    ];
    for (key, secret, message) in cases {
        let signature = sign(key, secret, message);
        assert!(verify(&signature, key, secret, message), "{key:?}/{secret:?}/{message:?}");
    }
}

#[test]
fn verify_rejects_other_signatures() {
    let signature = sign("kkk", "sss", "base");
    let candidates = [
        String::new(),
        "garbage".to_string(),
        signature.to_lowercase(),
        signature.trim_end_matches('=').to_string(),
        format!("{signature} "),
        sign("kkk", "sss", "base2"),
    ];
    for candidate in candidates {
        assert_ne!(candidate, signature);
        assert!(!verify(&candidate, "kkk", "sss", "base"), "{candidate:?}");
    }
}

#[test]
fn signing_key_changes_signature() {
    assert_ne!(sign("kkk", "sss", "base"), sign("kkj", "sss", "base"));
}

#[test]
fn secret_credential_changes_signature() {
    assert_ne!(sign("kkk", "sss", "base"), sign("kkk", "ssr", "base"));
}

#[test]
fn key_halves_are_not_interchangeable() {
    assert_ne!(sign("abc", "def", "base"), sign("def", "abc", "base"));
}

#[test]
fn every_message_byte_matters() {
    let message = "GET&http%3A%2F%2Fexample.com&a%3D1";
    let original = sign("kkk", "sss", message);
    for index in 0..message.len() {
        let mut bytes = message.as_bytes().to_vec();
        bytes[index] ^= 0x01;
        let changed = String::from_utf8(bytes).unwrap();
        assert_ne!(sign("kkk", "sss", &changed), original, "byte {index}");
    }
}

#[test]
fn empty_inputs_are_valid_key_material() {
    // The composite key for empty halves is "&".
    assert_eq!(composite_key("", ""), "&");
    assert_eq!(sign("", "", "base"), "GsSZmr7M0QQW9sDwwf3DUK0niTU=");
    assert_eq!(sign("", "", ""), "5CoEcoq7XoKFjwYCieQvuzadeUA=");

    for (key, secret) in [("", ""), ("kkk", ""), ("", "sss")] {
        let first = sign(key, secret, "base");
        assert_eq!(first, sign(key, secret, "base"));
        assert!(verify(&first, key, secret, "base"));
    }
    assert_ne!(sign("kkk", "", "base"), sign("", "kkk", "base"));
}

#[test]
fn signatures_are_standard_base64() {
    let signature = sign("kkk", "sss", "base");
    assert_eq!(signature.len(), 28);
    assert!(signature
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/' || c == '='));
    assert_eq!(base64_encode(&[0xfb, 0xef, 0xbe]), "++++");
}

#[test]
fn percent_encoding_follows_rfc3986() {
    assert_eq!(percent_encode("abc-._~"), "abc-._~");
    assert_eq!(percent_encode("a b&c=d"), "a%20b%26c%3Dd");
    assert_eq!(percent_encode("%"), "%25");
}

// ── Registry ─────────────────────────────────────────────────────────

#[test]
fn registry_resolves_methods_by_identifier() {
    assert_eq!(lookup("HMAC-SHA1").unwrap(), SignatureMethod::HmacSha1);
    assert_eq!(lookup("PLAINTEXT").unwrap(), SignatureMethod::PlainText);
    assert_eq!(hmac().method(), lookup("HMAC-SHA1").unwrap());
    assert_eq!(PlainText::new().method(), lookup("PLAINTEXT").unwrap());
}

#[test]
fn registry_rejects_unknown_identifiers() {
    let err = lookup("HMAC-SHA256").unwrap_err();
    assert_eq!(err, SignatureError::UnknownMethod("HMAC-SHA256".into()));
    assert!(lookup("").is_err());
}

#[test]
fn plaintext_signature_is_composite_key() {
    let method = PlainText::new();
    let key = SharedKey::new("kkk");
    let signature = method.sign(&key, "s s", "base").unwrap();
    assert_eq!(signature, "kkk&s%20s");
    assert!(method.verify(&signature, &key, "s s", "other base").unwrap());
}

// ── RSA-SHA1 ─────────────────────────────────────────────────────────

#[cfg(feature = "rsa-sha1")]
mod rsa_sha1 {
    use simple_signature::{MethodAlgorithm, RsaSha1, RsaSha1SigningKey, SignatureMethod, lookup};

    #[test]
    fn seeded_keys_sign_and_verify() {
        let key = RsaSha1SigningKey::generate("integration", 1024).unwrap();
        let public = key.verifying_key();
        let signature = RsaSha1.sign(&key, "unused", "base").unwrap();

        assert!(RsaSha1.verify(&signature, &public, "unused", "base").unwrap());
        assert!(!RsaSha1.verify(&signature, &public, "unused", "basf").unwrap());
    }

    #[test]
    fn other_keys_do_not_verify() {
        let key = RsaSha1SigningKey::generate("seed-a", 1024).unwrap();
        let other = RsaSha1SigningKey::generate("seed-b", 1024).unwrap();
        let signature = RsaSha1.sign(&key, "", "base").unwrap();
        assert!(!RsaSha1.verify(&signature, &other.verifying_key(), "", "base").unwrap());
    }

    #[test]
    fn registry_knows_rsa_sha1() {
        assert_eq!(lookup("RSA-SHA1").unwrap(), SignatureMethod::RsaSha1);
        assert_eq!(RsaSha1.method(), SignatureMethod::RsaSha1);
    }
}

// ── Concurrency ──────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_signing_is_independent() {
    let method = Arc::new(hmac());
    let mut tasks = Vec::new();
    for i in 0..64 {
        let method = method.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let key = SharedKey::new(format!("key-{}", i % 4));
            let secret = format!("secret-{i}");
            let message = format!("message-{i}");
            let signature = method.sign(&key, &secret, &message).unwrap();
            (i, signature)
        }));
    }

    for task in tasks {
        let (i, signature) = task.await.unwrap();
        let expected = sign(
            &format!("key-{}", i % 4),
            &format!("secret-{i}"),
            &format!("message-{i}"),
        );
        assert_eq!(signature, expected, "task {i}");
    }
}
