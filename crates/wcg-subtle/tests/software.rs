//! End-to-end runs over the in-process software backend.

use wcg_core::{nested, Algorithm, AlgorithmParams, ErrorKind, ExportedKey, KeyFormat, KeyType, KeyUsage};
use wcg_software::SoftwareBackend;
use wcg_subtle::{Crypto, SubtleCrypto};

fn subtle() -> SubtleCrypto {
    SubtleCrypto::with_backend(SoftwareBackend::shared())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[test]
fn sha256_digest_through_dispatcher() {
    let digest = subtle().digest("sha-256", b"abc").unwrap();
    assert_eq!(
        hex(&digest),
        "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
}

#[test]
fn sha1_resolves_but_backend_declines() {
    let err = subtle().digest("SHA-1", b"abc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(err.to_string(), "Unsupported operation: digest");
}

#[test]
fn ed25519_generate_sign_verify() {
    let subtle = subtle();
    let pair = subtle
        .generate_key("Ed25519", false, &[KeyUsage::Sign, KeyUsage::Verify])
        .unwrap()
        .into_pair()
        .unwrap();
    assert_eq!(pair.private_key.key_type(), KeyType::Private);
    assert_eq!(pair.public_key.algorithm().name, "Ed25519");

    let signature = subtle.sign("ed25519", &pair.private_key, b"payload").unwrap();
    assert!(subtle
        .verify("Ed25519", &pair.public_key, &signature, b"payload")
        .unwrap());
    assert!(!subtle
        .verify("Ed25519", &pair.public_key, &signature, b"tampered")
        .unwrap());
}

#[test]
fn ed25519_public_key_survives_raw_export_import() {
    let subtle = subtle();
    let pair = subtle
        .generate_key("Ed25519", false, &[KeyUsage::Sign, KeyUsage::Verify])
        .unwrap()
        .into_pair()
        .unwrap();
    let raw = subtle.export_key(KeyFormat::Raw, &pair.public_key).unwrap();
    let ExportedKey::Bytes(raw) = raw else {
        panic!("raw export yields bytes");
    };
    assert_eq!(raw.len(), 32);

    let public = subtle
        .import_key(KeyFormat::Raw, raw, "Ed25519", true, &[KeyUsage::Verify])
        .unwrap();
    let signature = subtle.sign("Ed25519", &pair.private_key, b"m").unwrap();
    assert!(subtle.verify("Ed25519", &public, &signature, b"m").unwrap());
}

#[test]
fn private_key_is_never_exported() {
    let subtle = subtle();
    let pair = subtle
        .generate_key("Ed25519", false, &[KeyUsage::Sign])
        .unwrap()
        .into_pair()
        .unwrap();
    let err = subtle.export_key(KeyFormat::Pkcs8, &pair.private_key).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Crypto);
}

#[test]
fn generated_aes_key_exports_requested_length() {
    let subtle = subtle();
    let keygen = Algorithm::with_params("AES-GCM", AlgorithmParams::Length { length: Some(192) });
    let key = subtle
        .generate_key(keygen, true, &[KeyUsage::Encrypt])
        .unwrap()
        .into_key()
        .unwrap();
    let exported = subtle.export_key(KeyFormat::Raw, &key).unwrap();
    assert_eq!(exported.as_bytes().map(<[u8]>::len), Some(24));
}

#[test]
fn hmac_import_export_roundtrip() {
    let subtle = subtle();
    let hmac = Algorithm::with_params(
        "HMAC",
        AlgorithmParams::Hmac {
            hash: nested("SHA-256"),
            length: None,
        },
    );
    let key = subtle
        .import_key(KeyFormat::Raw, vec![7u8; 32], hmac, true, &[KeyUsage::Sign])
        .unwrap();
    assert_eq!(
        subtle.export_key(KeyFormat::Raw, &key).unwrap(),
        ExportedKey::Bytes(vec![7u8; 32])
    );
}

#[test]
fn oversized_hmac_length_is_rejected_not_allocated() {
    let subtle = subtle();
    let hmac = |length| {
        Algorithm::with_params(
            "HMAC",
            AlgorithmParams::Hmac {
                hash: nested("SHA-256"),
                length: Some(length),
            },
        )
    };
    for length in [i64::MAX, 1 << 40] {
        let err = subtle
            .generate_key(hmac(length), true, &[KeyUsage::Sign])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
    }

    let key = subtle
        .generate_key(hmac(257), true, &[KeyUsage::Sign])
        .unwrap()
        .into_key()
        .unwrap();
    let exported = subtle.export_key(KeyFormat::Raw, &key).unwrap();
    assert_eq!(exported.as_bytes().map(<[u8]>::len), Some(33));
}

#[test]
fn missing_primitive_propagates_unsupported() {
    let subtle = subtle();
    let hkdf = Algorithm::with_params(
        "HKDF",
        AlgorithmParams::Hkdf {
            hash: nested("SHA-256"),
            salt: Some(vec![]),
            info: Some(vec![]),
        },
    );
    let base = subtle
        .import_key(KeyFormat::Raw, b"ikm".to_vec(), "HKDF", false, &[KeyUsage::DeriveBits])
        .unwrap();
    let err = subtle.derive_bits(hkdf, &base, Some(256)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOperation);
    assert_eq!(err.to_string(), "Unsupported operation: deriveBits");
}

#[test]
fn crypto_facade_over_software_backend() {
    let crypto = Crypto::with_backend(SoftwareBackend::shared());
    let digest = crypto.subtle().digest("SHA-256", b"abc").unwrap();
    assert_eq!(digest.len(), 32);

    let mut seed = [0u8; 32];
    crypto.get_random_values(&mut seed).unwrap();
    let key = crypto
        .subtle()
        .import_key(KeyFormat::Raw, seed.to_vec(), "AES-KW", true, &[KeyUsage::WrapKey])
        .unwrap();
    assert_eq!(
        crypto.subtle().export_key(KeyFormat::Raw, &key).unwrap(),
        ExportedKey::Bytes(seed.to_vec())
    );
    assert_eq!(crypto.random_uuid().unwrap().get_version_num(), 4);
}
