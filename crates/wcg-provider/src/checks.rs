//! # Validation Toolkit
//!
//! Free functions shared by every provider. Providers compose these
//! instead of layering partial implementations on top of each other:
//! an override calls the toolkit function for the common rules and then
//! adds its own.
//!
//! Every function fails on the first violated rule and never touches a
//! backend.

use wcg_core::{
    Algorithm, CryptoKey, KeyData, KeyFormat, KeyUsage, Result, WebCryptoError,
};

use crate::provider::Provider;

/// The request names the provider's algorithm, compared case-insensitively.
pub fn check_algorithm_name(expected: &str, algorithm: &Algorithm) -> Result<()> {
    if algorithm.is(expected) {
        Ok(())
    } else {
        Err(WebCryptoError::Algorithm("Unrecognized name".into()))
    }
}

/// Unwrap a mandatory property or report it missing.
pub fn check_required_property<T>(value: Option<T>, name: &str) -> Result<T> {
    value.ok_or_else(|| WebCryptoError::RequiredProperty(name.to_string()))
}

/// `hash` names one of `allowed`, compared case-insensitively.
pub fn check_hash_algorithm(hash: &Algorithm, allowed: &[&str]) -> Result<()> {
    if allowed.iter().any(|name| hash.is(name)) {
        Ok(())
    } else {
        Err(WebCryptoError::Operation(format!(
            "hash: Must be one of {}",
            allowed.join(", ")
        )))
    }
}

/// Every requested usage is a member of `allowed`.
pub fn check_key_usages(requested: &[KeyUsage], allowed: &[KeyUsage]) -> Result<()> {
    if requested.iter().all(|usage| allowed.contains(usage)) {
        Ok(())
    } else {
        Err(WebCryptoError::Type(
            "Cannot create a key using the specified key usages".into(),
        ))
    }
}

/// The key belongs to the provider's algorithm and, when `usage` is given,
/// carries that usage and is of a type the provider permits it for.
pub fn check_crypto_key<P: Provider + ?Sized>(
    provider: &P,
    key: &CryptoKey,
    usage: Option<KeyUsage>,
) -> Result<()> {
    if !key.algorithm().is(provider.name()) {
        return Err(WebCryptoError::Algorithm(
            "key.algorithm does not match that of operation".into(),
        ));
    }
    if let Some(usage) = usage {
        if !key.has_usage(usage) {
            return Err(WebCryptoError::Crypto(
                "key does not match that of operation".into(),
            ));
        }
        if !provider.usages().for_type(key.key_type()).contains(&usage) {
            return Err(WebCryptoError::Crypto(format!(
                "key: Is not a valid '{usage}' key for type '{}'",
                key.key_type()
            )));
        }
    }
    Ok(())
}

/// `jwk` takes a JSON Web Key with `kty`; every other format takes bytes.
pub fn check_key_data(format: KeyFormat, key_data: &KeyData) -> Result<()> {
    match (format, key_data) {
        (KeyFormat::Jwk, KeyData::Jwk(jwk)) if jwk.kty.is_some() => Ok(()),
        (KeyFormat::Jwk, _) => Err(WebCryptoError::Type(
            "keyData: Is not JsonWebToken".into(),
        )),
        (_, KeyData::Bytes(_)) => Ok(()),
        (_, KeyData::Jwk(_)) => Err(WebCryptoError::Type(
            "keyData: Is not ArrayBufferView or ArrayBuffer".into(),
        )),
    }
}

/// Restrict a provider to a subset of formats.
pub fn check_allowed_format(format: KeyFormat, allowed: &[KeyFormat]) -> Result<()> {
    if allowed.contains(&format) {
        Ok(())
    } else {
        let names: Vec<_> = allowed.iter().map(|f| format!("'{f}'")).collect();
        Err(WebCryptoError::Type(format!(
            "format: Is invalid value. Must be {}",
            names.join(" or ")
        )))
    }
}

/// Derived bit lengths are whole bytes.
pub fn check_derive_length(length: Option<u32>) -> Result<()> {
    match length {
        Some(bits) if bits % 8 != 0 => Err(WebCryptoError::Operation(
            "length: Is not multiple of 8".into(),
        )),
        _ => Ok(()),
    }
}

/// Common `generateKey` rules: name, provider parameters, non-empty usages
/// drawn from the provider's (flattened) usage set.
pub fn check_generate_key<P: Provider + ?Sized>(
    provider: &P,
    algorithm: &Algorithm,
    usages: &[KeyUsage],
) -> Result<()> {
    check_algorithm_name(provider.name(), algorithm)?;
    provider.check_generate_key_params(algorithm)?;
    if usages.is_empty() {
        return Err(WebCryptoError::Type(
            "Usages cannot be empty when creating a key.".into(),
        ));
    }
    check_key_usages(usages, &provider.usages().all())
}

/// Common `importKey` rules: key data shape, name, provider import
/// parameters, usages drawn from the provider's (flattened) usage set.
pub fn check_import_key<P: Provider + ?Sized>(
    provider: &P,
    format: KeyFormat,
    key_data: &KeyData,
    algorithm: &Algorithm,
    usages: &[KeyUsage],
) -> Result<()> {
    check_key_data(format, key_data)?;
    check_algorithm_name(provider.name(), algorithm)?;
    provider.check_import_params(algorithm)?;
    check_key_usages(usages, &provider.usages().all())
}

/// Common `exportKey` rules: key algorithm, format/key-type table,
/// extractability.
pub fn check_export_key<P: Provider + ?Sized>(
    provider: &P,
    format: KeyFormat,
    key: &CryptoKey,
) -> Result<()> {
    provider.check_crypto_key(key, None)?;
    if !format.allows(key.key_type()) {
        return Err(WebCryptoError::Crypto(format!(
            "key: Is not a valid '{}' key for format '{format}'",
            key.key_type()
        )));
    }
    if !key.extractable() {
        return Err(WebCryptoError::Crypto("key: Is not extractable".into()));
    }
    Ok(())
}

/// Hash names accepted by the SHA-parameterised families.
pub const SHA_HASHES: &[&str] = &["SHA-1", "SHA-256", "SHA-384", "SHA-512"];

#[cfg(test)]
mod tests {
    use super::*;
    use wcg_core::{nested, ErrorKind, JsonWebKey};

    #[test]
    fn algorithm_name_is_case_insensitive() {
        assert!(check_algorithm_name("AES-GCM", &Algorithm::new("aes-gcm")).is_ok());
        let err = check_algorithm_name("AES-GCM", &Algorithm::new("AES-CBC")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Algorithm);
        assert_eq!(err.to_string(), "Unrecognized name");
    }

    #[test]
    fn required_property_reports_name() {
        assert_eq!(check_required_property(Some(3), "length").unwrap(), 3);
        let err = check_required_property::<i64>(None, "iv").unwrap_err();
        assert_eq!(err.to_string(), "iv: Missing required property");
    }

    #[test]
    fn hash_membership_lists_allowed_values() {
        let hash = nested("sha-384").unwrap();
        assert!(check_hash_algorithm(&hash, SHA_HASHES).is_ok());
        let err = check_hash_algorithm(&Algorithm::new("MD5"), SHA_HASHES).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert_eq!(
            err.to_string(),
            "hash: Must be one of SHA-1, SHA-256, SHA-384, SHA-512"
        );
    }

    #[test]
    fn usages_must_be_subset() {
        let allowed = [KeyUsage::Sign, KeyUsage::Verify];
        assert!(check_key_usages(&[KeyUsage::Verify], &allowed).is_ok());
        assert!(check_key_usages(&[], &allowed).is_ok());
        let err = check_key_usages(&[KeyUsage::Sign, KeyUsage::Encrypt], &allowed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn key_data_shape_follows_format() {
        let jwk = KeyData::Jwk(JsonWebKey::new("oct"));
        let bytes = KeyData::Bytes(vec![1, 2, 3]);
        assert!(check_key_data(KeyFormat::Jwk, &jwk).is_ok());
        assert!(check_key_data(KeyFormat::Raw, &bytes).is_ok());
        assert!(check_key_data(KeyFormat::Spki, &bytes).is_ok());

        let err = check_key_data(KeyFormat::Jwk, &bytes).unwrap_err();
        assert_eq!(err.to_string(), "keyData: Is not JsonWebToken");
        let err = check_key_data(KeyFormat::Jwk, &KeyData::Jwk(JsonWebKey::default())).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        let err = check_key_data(KeyFormat::Pkcs8, &jwk).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn derive_length_multiple_of_eight() {
        assert!(check_derive_length(None).is_ok());
        assert!(check_derive_length(Some(0)).is_ok());
        assert!(check_derive_length(Some(256)).is_ok());
        let err = check_derive_length(Some(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Operation);
        assert_eq!(err.to_string(), "length: Is not multiple of 8");
    }

    #[test]
    fn allowed_format_message() {
        let err = check_allowed_format(KeyFormat::Spki, &[KeyFormat::Raw, KeyFormat::Jwk])
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "format: Is invalid value. Must be 'raw' or 'jwk'"
        );
    }
}
