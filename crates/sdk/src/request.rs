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

//! Canonical signing string and signed request construction
//!
//! The server recomputes the signature over
//! `METHOD + path_with_query + body + timestamp`, concatenated with no
//! separators, no hashing and no nonce. The timestamp is the same decimal
//! string sent in the `X-Sign-Date` header.

use std::{collections::BTreeMap, fmt};

use ed25519_dalek::SigningKey;
use reqwest::{Url, header::HeaderValue};
use serde::Serialize;

use crate::{
	error::{ClientError, ConfigError},
	signing,
	types::{JsonValue, Method},
};

pub const API_KEY_HEADER: &str = "X-Api-Key";
pub const SIGNATURE_HEADER: &str = "X-Request-Sign";
pub const TIMESTAMP_HEADER: &str = "X-Sign-Date";

/// Identifies the signing scheme to the server
pub const SIGNATURE_PREFIX: &str = "dmar ed25519 ";

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// API credentials
///
/// The secret is decoded once here and stays in binary form for the life of
/// the value.
#[derive(Clone)]
pub struct Credentials {
	public_key: String,
	secret_key: SigningKey,
}

impl Credentials {
	pub fn new(public_key: impl Into<String>, secret_key_hex: &str) -> Result<Self, ConfigError> {
		let public_key = public_key.into();
		if public_key.is_empty() {
			return Err(ConfigError::EmptyPublicKey);
		}
		if secret_key_hex.is_empty() {
			return Err(ConfigError::EmptySecretKey);
		}
		HeaderValue::from_str(&public_key).map_err(|_| ConfigError::InvalidPublicKey)?;

		let secret_key = signing::decode_key(secret_key_hex)?;

		Ok(Self {
			public_key,
			secret_key,
		})
	}

	pub fn public_key(&self) -> &str {
		&self.public_key
	}

	/// Hex signature over `message`, without the scheme prefix
	pub fn sign(&self, message: &[u8]) -> String {
		signing::sign(&self.secret_key, message)
	}
}

impl fmt::Debug for Credentials {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Credentials")
			.field("public_key", &self.public_key)
			.field("secret_key", &"<redacted>")
			.finish()
	}
}

/// Build the exact byte sequence that is signed for a request
pub fn string_to_sign(
	method: Method,
	path_with_query: &str,
	body: &[u8],
	timestamp: &str,
) -> Vec<u8> {
	let method = method.as_str();
	let mut message =
		Vec::with_capacity(method.len() + path_with_query.len() + body.len() + timestamp.len());
	message.extend_from_slice(method.as_bytes());
	message.extend_from_slice(path_with_query.as_bytes());
	message.extend_from_slice(body);
	message.extend_from_slice(timestamp.as_bytes());
	message
}

/// A fully signed request, ready to hand to the transport
#[derive(Debug, Clone)]
pub struct SignedRequest {
	pub method: Method,
	pub url: Url,
	/// Path plus query string exactly as signed and sent
	pub path_with_query: String,
	/// JSON body; `None` for read-style calls and absent payloads
	pub body: Option<Vec<u8>>,
	/// `X-Api-Key` value
	pub api_key: String,
	/// `X-Request-Sign` value, prefix included
	pub signature: String,
	/// `X-Sign-Date` value
	pub timestamp: String,
}

impl SignedRequest {
	/// Build and sign a request
	///
	/// Read-style payloads must serialize to a flat map of strings and become
	/// the query string, keys in ascending order. Write-style payloads are
	/// serialized to JSON and become the body. A payload that serializes to
	/// `null` is treated as absent.
	pub fn build<P: Serialize + ?Sized>(
		credentials: &Credentials,
		base_url: &Url,
		method: Method,
		path: &str,
		payload: Option<&P>,
		timestamp: i64,
	) -> Result<Self, ClientError> {
		if !path.starts_with('/') || path.starts_with("//") {
			return Err(ClientError::InvalidPath(format!(
				"{} (must begin with a single '/')",
				path
			)));
		}
		let mut url = base_url
			.join(path)
			.map_err(|e| ClientError::InvalidPath(format!("{}: {}", path, e)))?;

		let body = if method.is_read() {
			let params = match payload {
				Some(payload) => query_params(payload)?,
				None => BTreeMap::new(),
			};
			if !params.is_empty() {
				url.query_pairs_mut().extend_pairs(params.iter());
			}
			None
		} else {
			match payload {
				Some(payload) => json_body(payload)?,
				None => None,
			}
		};

		let path_with_query = match url.query() {
			Some(query) => format!("{}?{}", url.path(), query),
			None => url.path().to_string(),
		};

		let timestamp = timestamp.to_string();
		let message = string_to_sign(
			method,
			&path_with_query,
			body.as_deref().unwrap_or_default(),
			&timestamp,
		);
		let signature = format!("{}{}", SIGNATURE_PREFIX, credentials.sign(&message));

		Ok(Self {
			method,
			url,
			path_with_query,
			body,
			api_key: credentials.public_key().to_string(),
			signature,
			timestamp,
		})
	}

	/// `Content-Type` to send, set only when a body is present
	pub fn content_type(&self) -> Option<&'static str> {
		self.body.as_ref().map(|_| JSON_CONTENT_TYPE)
	}
}

fn query_params<P: Serialize + ?Sized>(payload: &P) -> Result<BTreeMap<String, String>, ClientError> {
	let value = serde_json::to_value(payload).map_err(ClientError::Serialization)?;
	match value {
		JsonValue::Null => Ok(BTreeMap::new()),
		JsonValue::Object(map) => map
			.into_iter()
			.map(|(key, value)| match value {
				JsonValue::String(value) => Ok((key, value)),
				other => Err(ClientError::Payload(format!(
					"query parameter '{}' must be a string, got {}",
					key, other
				))),
			})
			.collect(),
		other => Err(ClientError::Payload(format!(
			"read payload must be a map of strings, got {}",
			other
		))),
	}
}

fn json_body<P: Serialize + ?Sized>(payload: &P) -> Result<Option<Vec<u8>>, ClientError> {
	let body = serde_json::to_vec(payload).map_err(ClientError::Serialization)?;
	if body == b"null" {
		return Ok(None);
	}
	Ok(Some(body))
}
