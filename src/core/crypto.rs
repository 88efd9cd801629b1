//! RSA key handling, SHA256withRSA signatures and PKCS#1 v1.5 encryption.

use crate::utils::error::{KitError, Result};
use crate::utils::validation::validate_range;
use ::rsa::pkcs8::{
    DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey, LineEnding,
};
use ::rsa::traits::PublicKeyParts;
use ::rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign};
use sha2::{Digest, Sha256};

pub use ::rsa::{RsaPrivateKey, RsaPublicKey};

pub const MIN_KEY_BITS: usize = 512;
pub const MAX_KEY_BITS: usize = 16_384;
pub const DEFAULT_KEY_BITS: usize = 2048;

// PKCS#1 v1.5 encryption padding overhead per block.
const PKCS1_PADDING: usize = 11;

#[derive(Debug, Clone)]
pub struct RsaKeyPair {
    private: RsaPrivateKey,
    public: RsaPublicKey,
}

impl RsaKeyPair {
    pub fn generate(bits: usize) -> Result<Self> {
        validate_range("bits", bits, MIN_KEY_BITS, MAX_KEY_BITS)?;

        tracing::debug!("Generating {}-bit RSA key pair", bits);
        let mut rng = rand::thread_rng();
        let private = RsaPrivateKey::new(&mut rng, bits).map_err(KitError::crypto)?;
        Ok(Self::from_private_key(private))
    }

    pub fn from_private_key(private: RsaPrivateKey) -> Self {
        let public = RsaPublicKey::from(&private);
        Self { private, public }
    }

    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private
    }

    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public
    }

    /// Modulus size in bits.
    pub fn bits(&self) -> usize {
        self.public.size() * 8
    }
}

/// PKCS#8 DER.
pub fn private_key_der(key: &RsaPrivateKey) -> Result<Vec<u8>> {
    let doc = key.to_pkcs8_der().map_err(KitError::crypto)?;
    Ok(doc.as_bytes().to_vec())
}

/// SubjectPublicKeyInfo DER.
pub fn public_key_der(key: &RsaPublicKey) -> Result<Vec<u8>> {
    let doc = key.to_public_key_der().map_err(KitError::crypto)?;
    Ok(doc.as_bytes().to_vec())
}

pub fn private_key_pem(key: &RsaPrivateKey) -> Result<String> {
    let pem = key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(KitError::crypto)?;
    Ok(pem.as_str().to_string())
}

pub fn public_key_pem(key: &RsaPublicKey) -> Result<String> {
    key.to_public_key_pem(LineEnding::LF)
        .map_err(KitError::crypto)
}

pub fn private_key_from_der(der: &[u8]) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_der(der).map_err(KitError::crypto)
}

pub fn private_key_from_pem(pem: &str) -> Result<RsaPrivateKey> {
    RsaPrivateKey::from_pkcs8_pem(pem).map_err(KitError::crypto)
}

pub fn public_key_from_der(der: &[u8]) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_der(der).map_err(KitError::crypto)
}

pub fn public_key_from_pem(pem: &str) -> Result<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem).map_err(KitError::crypto)
}

/// SHA256withRSA (PKCS#1 v1.5) signature over `data`.
pub fn sign(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    let hashed = Sha256::digest(data);
    key.sign(Pkcs1v15Sign::new::<Sha256>(), &hashed)
        .map_err(KitError::crypto)
}

/// `false` for any signature that does not match, including malformed ones.
pub fn verify(key: &RsaPublicKey, data: &[u8], signature: &[u8]) -> bool {
    let hashed = Sha256::digest(data);
    key.verify(Pkcs1v15Sign::new::<Sha256>(), &hashed, signature)
        .is_ok()
}

/// Encrypts block by block, so `data` may be longer than one RSA block.
/// The output is a whole number of modulus-sized blocks.
pub fn encrypt(key: &RsaPublicKey, data: &[u8]) -> Result<Vec<u8>> {
    let block_len = key.size();
    let chunk_len = plaintext_chunk_len(block_len)?;
    let mut rng = rand::thread_rng();

    let mut out = Vec::with_capacity(data.len().div_ceil(chunk_len) * block_len);
    for chunk in data.chunks(chunk_len) {
        let encrypted = key
            .encrypt(&mut rng, Pkcs1v15Encrypt, chunk)
            .map_err(KitError::crypto)?;
        out.extend_from_slice(&encrypted);
    }
    Ok(out)
}

fn plaintext_chunk_len(block_len: usize) -> Result<usize> {
    match block_len.checked_sub(PKCS1_PADDING) {
        Some(len) if len > 0 => Ok(len),
        _ => Err(KitError::invalid_argument(
            "key",
            format!("{} bytes", block_len),
            format!("Modulus must be larger than {} bytes for PKCS#1 v1.5", PKCS1_PADDING),
        )),
    }
}

pub fn decrypt(key: &RsaPrivateKey, data: &[u8]) -> Result<Vec<u8>> {
    let block_len = key.size();
    if data.len() % block_len != 0 {
        return Err(KitError::invalid_argument(
            "data",
            format!("{} bytes", data.len()),
            format!("Ciphertext must be a multiple of {} bytes", block_len),
        ));
    }

    let mut out = Vec::with_capacity(data.len());
    for block in data.chunks(block_len) {
        let decrypted = key
            .decrypt(Pkcs1v15Encrypt, block)
            .map_err(KitError::crypto)?;
        out.extend_from_slice(&decrypted);
    }
    Ok(out)
}
