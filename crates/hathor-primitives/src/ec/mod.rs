//! secp256k1 keys and ECDSA signatures.
//!
//! Wraps k256 with the small surface the SDK needs: deterministic RFC6979
//! signing over pre-computed 32-byte digests, DER serialization with low-S
//! normalization, and compressed SEC1 public keys.  HD derivation and
//! mnemonic handling are out of scope for this crate.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as EcdsaSignature, SigningKey, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use rand::rngs::OsRng;

use crate::hash::hash160;
use crate::PrimitivesError;

/// Length of a compressed public key in bytes.
const COMPRESSED_LEN: usize = 33;

/// Length of an uncompressed public key in bytes.
const UNCOMPRESSED_LEN: usize = 65;

/// A secp256k1 private key for transaction signing.
#[derive(Clone)]
pub struct PrivateKey {
    inner: SigningKey,
}

impl PrivateKey {
    /// Generate a new random private key using the OS RNG.
    pub fn random() -> Self {
        PrivateKey {
            inner: SigningKey::random(&mut OsRng),
        }
    }

    /// Create a private key from a 32-byte scalar.
    ///
    /// # Arguments
    /// * `bytes` - The 32-byte big-endian scalar.
    ///
    /// # Returns
    /// `Ok(PrivateKey)` on success, or an error if the scalar is out of range.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        let signing_key = SigningKey::from_slice(bytes)
            .map_err(|e| PrimitivesError::InvalidPrivateKey(e.to_string()))?;
        Ok(PrivateKey { inner: signing_key })
    }

    /// Create a private key from a 64-character hex string.
    ///
    /// # Arguments
    /// * `hex_str` - Hex-encoded 32-byte scalar.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Return the 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.inner.to_bytes().into()
    }

    /// Derive the corresponding public key.
    pub fn pub_key(&self) -> PublicKey {
        PublicKey {
            inner: *self.inner.verifying_key(),
        }
    }

    /// Sign a pre-computed 32-byte digest.
    ///
    /// Uses deterministic RFC6979 nonces and normalizes the signature to
    /// low-S form.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte digest to sign.
    ///
    /// # Returns
    /// The DER-encoded signature bytes.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, PrimitivesError> {
        let sig: EcdsaSignature = self
            .inner
            .sign_prehash(digest)
            .map_err(|e| PrimitivesError::InvalidSignature(e.to_string()))?;
        let sig = sig.normalize_s().unwrap_or(sig);
        Ok(sig.to_der().as_bytes().to_vec())
    }
}

impl std::fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material.
        f.write_str("PrivateKey(..)")
    }
}

/// A secp256k1 public key for signature verification and address derivation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    inner: VerifyingKey,
}

impl PublicKey {
    /// Create a public key from compressed SEC1 bytes.
    ///
    /// Uncompressed (65-byte) encodings are rejected: Hathor addresses are
    /// always derived from the compressed form.
    ///
    /// # Arguments
    /// * `bytes` - 33-byte compressed SEC1 encoding.
    ///
    /// # Returns
    /// `Ok(PublicKey)` on success, or an error if the encoding or point is
    /// invalid.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrimitivesError> {
        if bytes.len() == UNCOMPRESSED_LEN {
            return Err(PrimitivesError::UncompressedPublicKey);
        }
        if bytes.len() != COMPRESSED_LEN {
            return Err(PrimitivesError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                COMPRESSED_LEN,
                bytes.len()
            )));
        }
        let vk = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| PrimitivesError::InvalidPublicKey(e.to_string()))?;
        Ok(PublicKey { inner: vk })
    }

    /// Create a public key from a hex-encoded compressed SEC1 string.
    pub fn from_hex(hex_str: &str) -> Result<Self, PrimitivesError> {
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize in compressed SEC1 format (33 bytes).
    pub fn to_compressed(&self) -> [u8; 33] {
        let point = self.inner.to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(point.as_bytes());
        out
    }

    /// Compute the Hash160 of the compressed encoding.
    ///
    /// This is the 20-byte hash embedded in P2PKH scripts and addresses.
    pub fn hash160(&self) -> [u8; 20] {
        hash160(&self.to_compressed())
    }

    /// Verify a DER-encoded signature over a pre-computed 32-byte digest.
    ///
    /// # Arguments
    /// * `digest` - The 32-byte digest that was signed.
    /// * `der_sig` - The DER-encoded signature.
    ///
    /// # Returns
    /// `true` if the signature is valid for this key.
    pub fn verify(&self, digest: &[u8], der_sig: &[u8]) -> bool {
        let Ok(sig) = EcdsaSignature::from_der(der_sig) else {
            return false;
        };
        self.inner.verify_prehash(digest, &sig).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::sha256d;

    #[test]
    fn test_sign_and_verify() {
        let key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        let digest = sha256d(b"hathor test message");
        let sig = key.sign(&digest).unwrap();
        assert!(key.pub_key().verify(&digest, &sig));
        // DER envelope starts with SEQUENCE.
        assert_eq!(sig[0], 0x30);
    }

    #[test]
    fn test_verify_rejects_wrong_digest() {
        let key = PrivateKey::random();
        let sig = key.sign(&sha256d(b"one")).unwrap();
        assert!(!key.pub_key().verify(&sha256d(b"two"), &sig));
    }

    #[test]
    fn test_known_pubkey_for_scalar_one() {
        // The generator point, compressed.
        let key = PrivateKey::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key.pub_key().to_compressed()),
            "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        );
    }

    #[test]
    fn test_rejects_uncompressed_pubkey() {
        let mut uncompressed = vec![0x04];
        uncompressed.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            PublicKey::from_bytes(&uncompressed),
            Err(PrimitivesError::UncompressedPublicKey)
        ));
    }

    #[test]
    fn test_private_key_roundtrip() {
        let key = PrivateKey::random();
        let restored = PrivateKey::from_bytes(&key.to_bytes()).unwrap();
        assert_eq!(
            key.pub_key().to_compressed(),
            restored.pub_key().to_compressed()
        );
    }
}
