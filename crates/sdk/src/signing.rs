// Copyright 2025 itscheems
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Ed25519 request signing
//!
//! Credentials are supplied as hex text: a 64-byte secret (32-byte seed
//! followed by the 32-byte public key) and the 32-byte public key on its own.
//! Signatures are returned as lowercase hex.

use ed25519_dalek::{
	KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, Signature, Signer, SigningKey, Verifier,
	VerifyingKey,
};

/// Error types for signing operations
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
	#[error("Invalid hex: {0}")]
	InvalidHex(#[from] hex::FromHexError),
	#[error("Invalid key length: expected {expected} bytes, got {actual}")]
	InvalidKeyLength { expected: usize, actual: usize },
	#[error("Secret key does not match its embedded public key")]
	KeypairMismatch,
	#[error("Invalid public key: {0}")]
	InvalidPublicKey(String),
	#[error("Invalid signature: {0}")]
	InvalidSignature(String),
	#[error("Ed25519 verification failed")]
	VerificationFailed,
}

/// Decode a hex-encoded 64-byte Ed25519 secret key
///
/// The trailing 32 bytes must be the public key derived from the leading
/// 32-byte seed, otherwise the key is rejected as mismatched.
pub fn decode_key(secret_key_hex: &str) -> Result<SigningKey, SigningError> {
	let bytes = hex::decode(secret_key_hex.trim())?;
	let keypair: [u8; KEYPAIR_LENGTH] =
		bytes
			.as_slice()
			.try_into()
			.map_err(|_| SigningError::InvalidKeyLength {
				expected: KEYPAIR_LENGTH,
				actual: bytes.len(),
			})?;

	SigningKey::from_keypair_bytes(&keypair).map_err(|_| SigningError::KeypairMismatch)
}

/// Sign a message and return the hex-encoded signature
///
/// Ed25519 is deterministic: the same key and message always produce the
/// same signature.
pub fn sign(key: &SigningKey, message: &[u8]) -> String {
	hex::encode(key.sign(message).to_bytes())
}

/// Verify a hex-encoded signature against a hex-encoded public key
pub fn verify(
	public_key_hex: &str,
	message: &[u8],
	signature_hex: &str,
) -> Result<(), SigningError> {
	let pk_bytes = hex::decode(public_key_hex.trim())?;
	let pk: [u8; PUBLIC_KEY_LENGTH] = pk_bytes.as_slice().try_into().map_err(|_| {
		SigningError::InvalidPublicKey(format!(
			"expected {} bytes, got {}",
			PUBLIC_KEY_LENGTH,
			pk_bytes.len()
		))
	})?;
	let verifying_key = VerifyingKey::from_bytes(&pk)
		.map_err(|e| SigningError::InvalidPublicKey(e.to_string()))?;

	let sig_bytes = hex::decode(signature_hex.trim())?;
	let sig: [u8; SIGNATURE_LENGTH] = sig_bytes.as_slice().try_into().map_err(|_| {
		SigningError::InvalidSignature(format!(
			"expected {} bytes, got {}",
			SIGNATURE_LENGTH,
			sig_bytes.len()
		))
	})?;
	let signature = Signature::from_bytes(&sig);

	verifying_key
		.verify(message, &signature)
		.map_err(|_| SigningError::VerificationFailed)
}

/// Hex-encoded public key of a secret key
pub fn public_key_hex(key: &SigningKey) -> String {
	hex::encode(key.verifying_key().as_bytes())
}

#[cfg(test)]
mod tests {
	use super::*;

	const PUBLIC_KEY: &str = "8397eb8e7f88032eb13dca99a11350b05d290c896a96afd60b119184b1b443c9";
	const SECRET_KEY: &str = "2de2824ac1752d0ed3c66abc67bec2db553022aa718287a1e773e104303031208397eb8e7f88032eb13dca99a11350b05d290c896a96afd60b119184b1b443c9";
	const MESSAGE: &str = "GET/exchange/v1/market/items?currency=USD&gameId=a8db&limit=11700000000";

	#[test]
	fn test_sign_known_answer() {
		let key = decode_key(SECRET_KEY).unwrap();
		assert_eq!(
			sign(&key, MESSAGE.as_bytes()),
			"a5dda53f99e73a117c0270c6a337c57143bf463a0fca604830d8c78932932ddd5664a491a5f1d285a2662fb5806c95ce0156328d878ea46f1aa506dfddb70305"
		);
	}

	#[test]
	fn test_sign_is_deterministic_and_verifies() {
		let key = decode_key(SECRET_KEY).unwrap();
		let first = sign(&key, MESSAGE.as_bytes());
		let second = sign(&key, MESSAGE.as_bytes());

		assert_eq!(first, second);
		assert_eq!(first.len(), SIGNATURE_LENGTH * 2);
		assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
		verify(PUBLIC_KEY, MESSAGE.as_bytes(), &first).unwrap();
	}

	#[test]
	fn test_verify_rejects_tampered_message() {
		let key = decode_key(SECRET_KEY).unwrap();
		let signature = sign(&key, MESSAGE.as_bytes());

		let result = verify(PUBLIC_KEY, b"GET/exchange/v1/market/items1700000000", &signature);
		assert!(matches!(result, Err(SigningError::VerificationFailed)));
	}

	#[test]
	fn test_public_key_hex_matches_embedded_half() {
		let key = decode_key(SECRET_KEY).unwrap();
		assert_eq!(public_key_hex(&key), PUBLIC_KEY);
	}

	#[test]
	fn test_decode_key_invalid_hex() {
		let result = decode_key("zz-not-hex");
		assert!(matches!(result, Err(SigningError::InvalidHex(_))));
	}

	#[test]
	fn test_decode_key_wrong_length() {
		// Only the 32-byte public half
		let result = decode_key(PUBLIC_KEY);
		assert!(matches!(
			result,
			Err(SigningError::InvalidKeyLength {
				expected: 64,
				actual: 32
			})
		));
	}

	#[test]
	fn test_decode_key_mismatched_public_half() {
		let mut tampered = SECRET_KEY.to_string();
		tampered.replace_range(64..66, "00");
		let result = decode_key(&tampered);
		assert!(matches!(result, Err(SigningError::KeypairMismatch)));
	}
}
