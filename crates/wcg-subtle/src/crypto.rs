//! # Crypto Facade
//!
//! The top-level WebCrypto object: a [`SubtleCrypto`] plus the two
//! randomness helpers that need no provider.
//!
//! ## Security Invariant
//!
//! Random bytes come from the operating system (`OsRng`). A request for
//! more than [`MAX_RANDOM_BYTES`] fails with `QuotaExceededError` and
//! leaves the buffer untouched.

use std::sync::Arc;

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::Uuid;
use wcg_core::{Result, WebCryptoError};
use wcg_provider::CryptoBackend;

use crate::subtle::SubtleCrypto;

/// Largest buffer one `get_random_values` call fills.
pub const MAX_RANDOM_BYTES: usize = 65_536;

/// WebCrypto entry point owning the dispatcher.
#[derive(Debug, Clone)]
pub struct Crypto {
    subtle: SubtleCrypto,
}

impl Crypto {
    pub fn new(subtle: SubtleCrypto) -> Self {
        Self { subtle }
    }

    /// Every built-in provider over `backend`.
    pub fn with_backend(backend: Arc<dyn CryptoBackend>) -> Self {
        Self::new(SubtleCrypto::with_backend(backend))
    }

    pub fn subtle(&self) -> &SubtleCrypto {
        &self.subtle
    }

    /// Overwrite `buffer` with random bytes and hand it back.
    pub fn get_random_values<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8]> {
        if buffer.len() > MAX_RANDOM_BYTES {
            return Err(WebCryptoError::QuotaExceeded(format!(
                "array: Byte length {} exceeds {MAX_RANDOM_BYTES}",
                buffer.len()
            )));
        }
        OsRng
            .try_fill_bytes(buffer)
            .map_err(|e| WebCryptoError::Operation(format!("random source: {e}")))?;
        Ok(buffer)
    }

    /// A version 4 UUID drawn from [`get_random_values`](Self::get_random_values).
    pub fn random_uuid(&self) -> Result<Uuid> {
        let mut bytes = [0u8; 16];
        self.get_random_values(&mut bytes)?;
        Ok(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}
