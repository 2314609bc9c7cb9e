//! Dispatcher behaviour over the recording mock backend.

use std::error::Error as _;
use std::sync::Arc;

use proptest::prelude::*;
use wcg_core::{
    nested, Algorithm, AlgorithmParams, CryptoKey, ErrorKind, ExportedKey, JsonWebKey, KeyFormat,
    KeyType, KeyUsage,
};
use wcg_provider::{MockBackend, RegistryConfig};
use wcg_subtle::SubtleCrypto;

fn subtle() -> (SubtleCrypto, Arc<MockBackend>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("wcg=debug")
        .with_test_writer()
        .try_init();
    let backend = MockBackend::shared();
    (SubtleCrypto::with_backend(backend.clone()), backend)
}

fn secret(name: &str, extractable: bool, usages: &[KeyUsage], material: &[u8]) -> CryptoKey {
    CryptoKey::with_material(
        Algorithm::new(name),
        KeyType::Secret,
        extractable,
        usages,
        Arc::new(material.to_vec()),
    )
}

fn aes_kw() -> CryptoKey {
    secret(
        "AES-KW",
        false,
        &[KeyUsage::WrapKey, KeyUsage::UnwrapKey],
        &[9; 32],
    )
}

#[test]
fn dispatcher_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SubtleCrypto>();
}

#[test]
fn unknown_algorithm_is_unrecognized_name() {
    let (subtle, backend) = subtle();
    let err = subtle.digest("MD5", b"abc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Algorithm);
    assert_eq!(err.to_string(), "Unrecognized name");
    assert!(backend.calls().is_empty());
}

#[test]
fn names_resolve_case_insensitively() {
    let (subtle, backend) = subtle();
    for name in ["SHA-256", "sha-256", "Sha-256"] {
        assert_eq!(subtle.digest(name, b"abc").unwrap().len(), 32);
    }
    assert_eq!(backend.call_count("digest"), 3);
}

#[test]
fn generated_key_carries_canonical_name() {
    let (subtle, _) = subtle();
    let keygen = Algorithm::with_params("aes-cbc", AlgorithmParams::Length { length: Some(128) });
    let key = subtle
        .generate_key(keygen, true, &[KeyUsage::Encrypt, KeyUsage::Decrypt])
        .unwrap()
        .into_key()
        .unwrap();
    assert_eq!(key.algorithm().name, "AES-CBC");
    assert_eq!(key.key_type(), KeyType::Secret);
    assert_eq!(key.usages(), &[KeyUsage::Encrypt, KeyUsage::Decrypt]);
}

#[test]
fn generate_with_bad_length_names_length() {
    let (subtle, backend) = subtle();
    let keygen = Algorithm::with_params("AES-CBC", AlgorithmParams::Length { length: Some(111) });
    let err = subtle
        .generate_key(keygen, true, &[KeyUsage::Encrypt])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.to_string().contains("length"));
    assert!(backend.calls().is_empty());
}

#[test]
fn ecdsa_sign_without_usage_never_reaches_backend() {
    let (subtle, backend) = subtle();
    let key = CryptoKey::new(
        Algorithm::new("ECDSA"),
        KeyType::Private,
        false,
        vec![KeyUsage::Verify],
    );
    let alg = Algorithm::with_params(
        "ECDSA",
        AlgorithmParams::Ecdsa {
            hash: nested("SHA-1"),
        },
    );
    let err = subtle.sign(alg, &key, b"data").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert!(backend.calls().is_empty());
}

#[test]
fn encrypt_enforces_key_usage() {
    let (subtle, backend) = subtle();
    let key = secret("AES-GCM", true, &[KeyUsage::Decrypt], &[1; 16]);
    let alg = Algorithm::with_params(
        "AES-GCM",
        AlgorithmParams::AesGcm {
            iv: Some(vec![0; 12]),
            additional_data: None,
            tag_length: None,
        },
    );
    let err = subtle.encrypt(alg.clone(), &key, b"msg").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert_eq!(subtle.decrypt(alg, &key, b"msg").unwrap(), MockBackend::seal(b"msg"));
    assert_eq!(backend.calls(), vec!["decrypt"]);
}

#[test]
fn derive_bits_enforces_usage_and_length() {
    let (subtle, backend) = subtle();
    let alg = Algorithm::with_params(
        "HKDF",
        AlgorithmParams::Hkdf {
            hash: nested("SHA-256"),
            salt: Some(vec![]),
            info: Some(vec![]),
        },
    );
    let key = secret("HKDF", false, &[KeyUsage::DeriveBits], b"ikm");
    assert_eq!(subtle.derive_bits(alg.clone(), &key, Some(128)).unwrap().len(), 16);

    let err = subtle.derive_bits(alg.clone(), &key, Some(100)).unwrap_err();
    assert_eq!(err.to_string(), "length: Is not multiple of 8");

    let derive_key_only = secret("HKDF", false, &[KeyUsage::DeriveKey], b"ikm");
    let err = subtle.derive_bits(alg, &derive_key_only, Some(128)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert_eq!(backend.call_count("deriveBits"), 1);
}

#[test]
fn derive_key_composes_derive_bits_and_import() {
    let (subtle, backend) = subtle();
    let pbkdf2 = Algorithm::with_params(
        "pbkdf2",
        AlgorithmParams::Pbkdf2 {
            hash: nested("SHA-256"),
            salt: Some(b"salt".to_vec()),
            iterations: Some(1000),
        },
    );
    let base = secret("PBKDF2", false, &[KeyUsage::DeriveKey], b"password");
    let target = Algorithm::with_params("aes-gcm", AlgorithmParams::Length { length: Some(256) });

    let key = subtle
        .derive_key(pbkdf2, &base, target, true, &[KeyUsage::Encrypt])
        .unwrap();
    assert_eq!(key.algorithm().name, "AES-GCM");
    assert_eq!(key.usages(), &[KeyUsage::Encrypt]);
    assert_eq!(key.material::<Vec<u8>>().map(Vec::len), Some(32));
    assert_eq!(backend.calls(), vec!["deriveBits", "importKey"]);
}

#[test]
fn derive_key_defaults_length_to_512_bits() {
    let (subtle, _) = subtle();
    let hkdf = Algorithm::with_params(
        "HKDF",
        AlgorithmParams::Hkdf {
            hash: nested("SHA-512"),
            salt: Some(vec![1]),
            info: Some(vec![2]),
        },
    );
    let base = secret("HKDF", false, &[KeyUsage::DeriveKey], b"ikm");
    let target = Algorithm::with_params(
        "HMAC",
        AlgorithmParams::Hmac {
            hash: nested("SHA-512"),
            length: None,
        },
    );
    let key = subtle
        .derive_key(hkdf, &base, target, false, &[KeyUsage::Sign])
        .unwrap();
    assert_eq!(key.material::<Vec<u8>>().map(Vec::len), Some(64));
}

#[test]
fn derive_key_rejects_invalid_target_before_derivation() {
    let (subtle, backend) = subtle();
    let hkdf = Algorithm::with_params(
        "HKDF",
        AlgorithmParams::Hkdf {
            hash: nested("SHA-256"),
            salt: Some(vec![]),
            info: Some(vec![]),
        },
    );
    let base = secret("HKDF", false, &[KeyUsage::DeriveKey], b"ikm");
    let target = Algorithm::with_params("AES-CBC", AlgorithmParams::Length { length: Some(100) });
    let err = subtle
        .derive_key(hkdf.clone(), &base, target, false, &[KeyUsage::Encrypt])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);

    let bits_only = secret("HKDF", false, &[KeyUsage::DeriveBits], b"ikm");
    let target = Algorithm::with_params("AES-CBC", AlgorithmParams::Length { length: Some(128) });
    let err = subtle
        .derive_key(hkdf, &bits_only, target, false, &[KeyUsage::Encrypt])
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert!(backend.calls().is_empty());
}

#[test]
fn export_of_non_extractable_key_is_crypto_error() {
    let (subtle, backend) = subtle();
    let key = secret("HMAC", false, &[KeyUsage::Sign], &[0; 32]);
    let err = subtle.export_key(KeyFormat::Raw, &key).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert!(err.to_string().contains("not extractable"));
    assert!(backend.calls().is_empty());
}

#[test]
fn wrap_then_unwrap_raw_key() {
    let (subtle, _) = subtle();
    let key = secret("AES-CBC", true, &[KeyUsage::Encrypt], &[0xAB; 16]);
    let wrapped = subtle
        .wrap_key(KeyFormat::Raw, &key, &aes_kw(), "AES-KW")
        .unwrap();
    assert_eq!(wrapped, MockBackend::seal(&[0xAB; 16]));

    let unwrapped = subtle
        .unwrap_key(
            KeyFormat::Raw,
            &wrapped,
            &aes_kw(),
            "AES-KW",
            "AES-CBC",
            true,
            &[KeyUsage::Decrypt],
        )
        .unwrap();
    assert_eq!(unwrapped.material::<Vec<u8>>(), Some(&vec![0xAB; 16]));
    assert_eq!(unwrapped.usages(), &[KeyUsage::Decrypt]);
}

#[test]
fn wrap_jwk_serializes_json() {
    let (subtle, _) = subtle();
    let key = secret("HMAC", true, &[KeyUsage::Sign], &[1, 2]);
    let wrapped = subtle
        .wrap_key(KeyFormat::Jwk, &key, &aes_kw(), "aes-kw")
        .unwrap();
    let json: JsonWebKey = serde_json::from_slice(&MockBackend::seal(&wrapped)).unwrap();
    assert_eq!(json.kty.as_deref(), Some("oct"));
    assert_eq!(json.k.as_deref(), Some("0102"));

    let hmac = Algorithm::with_params(
        "HMAC",
        AlgorithmParams::Hmac {
            hash: nested("SHA-256"),
            length: None,
        },
    );
    let unwrapped = subtle
        .unwrap_key(KeyFormat::Jwk, &wrapped, &aes_kw(), "AES-KW", hmac, false, &[KeyUsage::Verify])
        .unwrap();
    assert_eq!(unwrapped.material::<Vec<u8>>(), Some(&vec![1u8, 2]));
}

#[test]
fn wrapping_key_must_carry_wrap_usage() {
    let (subtle, backend) = subtle();
    let key = secret("AES-CBC", true, &[KeyUsage::Encrypt], &[0; 16]);
    let unwrap_only = secret("AES-KW", false, &[KeyUsage::UnwrapKey], &[0; 32]);
    let err = subtle
        .wrap_key(KeyFormat::Raw, &key, &unwrap_only, "AES-KW")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
    assert_eq!(backend.calls(), vec!["exportKey"]);
}

#[test]
fn unwrap_jwk_with_non_json_plaintext_is_type_error() {
    let (subtle, backend) = subtle();
    let wrapped = MockBackend::seal(b"definitely not json");
    let err = subtle
        .unwrap_key(
            KeyFormat::Jwk,
            &wrapped,
            &aes_kw(),
            "AES-KW",
            "AES-CBC",
            true,
            &[KeyUsage::Encrypt],
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
    let source = err.source().expect("parse error is kept as source");
    assert!(source.downcast_ref::<serde_json::Error>().is_some());
    assert_eq!(backend.calls(), vec!["decrypt"]);
}

#[test]
fn jwk_thumbprint_digests_canonical_members() {
    let (subtle, backend) = subtle();
    let jwk = JsonWebKey {
        crv: Some("Ed25519".into()),
        x: Some("11qYAYKxCrfVS_7TyWQHOg7hcvPapiMlrwIaaPcHURo".into()),
        ..JsonWebKey::new("OKP")
    };
    let thumbprint = subtle.jwk_thumbprint("SHA-256", &jwk).unwrap();
    let expected = subtle
        .digest("SHA-256", jwk.thumbprint_input().unwrap())
        .unwrap();
    assert_eq!(thumbprint, expected);
    assert_eq!(backend.call_count("digest"), 2);
}

#[test]
fn export_reaches_provider_of_key_algorithm() {
    let (subtle, _) = subtle();
    let key = secret("AES-CTR", true, &[KeyUsage::Encrypt], &[5; 16]);
    let exported = subtle.export_key(KeyFormat::Raw, &key).unwrap();
    assert_eq!(exported, ExportedKey::Bytes(vec![5; 16]));
}

#[test]
fn config_limits_dispatch() {
    let config = RegistryConfig::from_yaml_str("disabled: [SHA-1]\n").unwrap();
    let subtle = SubtleCrypto::from_config(MockBackend::shared(), &config).unwrap();
    assert_eq!(subtle.digest("SHA-1", b"x").unwrap_err().kind(), ErrorKind::Algorithm);
    assert!(subtle.digest("SHA-384", b"x").is_ok());
}

#[test]
fn removed_provider_becomes_unrecognized() {
    let (mut subtle, _) = subtle();
    assert!(subtle.providers_mut().remove_at("hmac").is_some());
    let err = subtle
        .import_key(KeyFormat::Raw, vec![0u8; 32], "HMAC", false, &[KeyUsage::Sign])
        .unwrap_err();
    assert_eq!(err.to_string(), "Unrecognized name");
}

proptest! {
    #[test]
    fn any_case_variant_resolves(mask in prop::collection::vec(any::<bool>(), 7)) {
        let (subtle, _) = subtle();
        let name: String = "AES-GCM"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c.to_ascii_lowercase() })
            .collect();
        let provider = subtle.providers().get(&name);
        prop_assert!(provider.is_some());
        prop_assert_eq!(provider.map(|p| p.name().to_string()), Some("AES-GCM".to_string()));
    }

    #[test]
    fn gcm_without_tag_length_behaves_as_128(iv_len in 1usize..64) {
        let (subtle, _) = subtle();
        let key = secret("AES-GCM", true, &[KeyUsage::Encrypt], &[1; 16]);
        let with = |tag_length| Algorithm::with_params(
            "AES-GCM",
            AlgorithmParams::AesGcm { iv: Some(vec![0; iv_len]), additional_data: None, tag_length },
        );
        prop_assert_eq!(
            subtle.encrypt(with(None), &key, b"m").unwrap(),
            subtle.encrypt(with(Some(128)), &key, b"m").unwrap()
        );
    }
}
