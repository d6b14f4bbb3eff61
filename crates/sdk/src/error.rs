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

use std::time::Duration;

use thiserror::Error;

use crate::{signing::SigningError, types::UnsupportedMethod};

/// Error types for client construction
///
/// These indicate a misconfigured credential or transport and are never
/// transient.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("Public key must be provided")]
	EmptyPublicKey,
	#[error("Secret key must be provided")]
	EmptySecretKey,
	#[error("Public key is not a valid header value")]
	InvalidPublicKey,
	#[error("Invalid secret key: {0}")]
	InvalidSecretKey(#[from] SigningError),
	#[error("Invalid base URL: {0}")]
	InvalidBaseUrl(String),
	#[error("Failed to create HTTP client: {0}")]
	HttpClient(#[source] reqwest::Error),
	#[error("Failed to create tokio runtime: {0}")]
	Runtime(#[source] std::io::Error),
}

/// Error types for client operations
///
/// `Payload`, `Serialization`, `InvalidPath` and `UnsupportedMethod` are
/// raised before any network I/O.
#[derive(Debug, Error)]
pub enum ClientError {
	#[error("Configuration error: {0}")]
	Config(#[from] ConfigError),
	#[error(transparent)]
	UnsupportedMethod(#[from] UnsupportedMethod),
	#[error("Invalid path: {0}")]
	InvalidPath(String),
	#[error("Invalid payload: {0}")]
	Payload(String),
	#[error("Serialization error: {0}")]
	Serialization(#[source] serde_json::Error),
	#[error("Network error: {0}")]
	Transport(#[source] reqwest::Error),
	#[error("Request timed out after {0:?}")]
	Timeout(Duration),
	#[error("API call failed with status {status}: {body}")]
	Api { status: u16, body: String },
	#[error("Failed to decode response JSON: {source}. Body: {body}")]
	Decode {
		#[source]
		source: serde_json::Error,
		body: String,
	},
}

impl ClientError {
	/// HTTP status code for API errors
	pub fn status(&self) -> Option<u16> {
		match self {
			ClientError::Api { status, .. } => Some(*status),
			_ => None,
		}
	}

	/// Raw response body for API and decode errors
	pub fn body(&self) -> Option<&str> {
		match self {
			ClientError::Api { body, .. } | ClientError::Decode { body, .. } => Some(body),
			_ => None,
		}
	}
}
