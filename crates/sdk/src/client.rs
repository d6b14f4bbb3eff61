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

use reqwest::{Client as ReqwestClient, Url, header::CONTENT_TYPE};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ConfigError};
use crate::request::{
	API_KEY_HEADER, Credentials, JSON_CONTENT_TYPE, SIGNATURE_HEADER, SignedRequest,
	TIMESTAMP_HEADER,
};
use crate::types::{JsonValue, Method};

/// Typed "no payload" argument for [`Client::call`]
pub const NO_PAYLOAD: Option<&JsonValue> = None;

/// Client for the signed REST API
///
/// This is an async client interface using reqwest for HTTP communication.
/// It holds no per-call state: every call captures its own timestamp and
/// signature, so one instance can be shared across tasks.
#[derive(Debug, Clone)]
pub struct Client {
	credentials: Credentials,
	base_url: Url,
	timeout: Duration,
	client: ReqwestClient,
}

impl Client {
	/// Create a new client against the default API origin
	pub fn new(public_key: impl Into<String>, secret_key_hex: &str) -> Result<Self, ConfigError> {
		Self::with_config(public_key, secret_key_hex, ClientConfig::default())
	}

	/// Create a new client with custom configuration
	pub fn with_config(
		public_key: impl Into<String>,
		secret_key_hex: &str,
		config: ClientConfig,
	) -> Result<Self, ConfigError> {
		let credentials = Credentials::new(public_key, secret_key_hex)?;
		let base_url = Url::parse(&config.base_url)
			.map_err(|e| ConfigError::InvalidBaseUrl(format!("{}: {}", config.base_url, e)))?;
		let client = ReqwestClient::builder()
			.timeout(config.timeout)
			.build()
			.map_err(ConfigError::HttpClient)?;

		Ok(Self {
			credentials,
			base_url,
			timeout: config.timeout,
			client,
		})
	}

	pub fn public_key(&self) -> &str {
		self.credentials.public_key()
	}

	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Call an endpoint and decode the response into a generic JSON value
	///
	/// For `GET`, `payload` must serialize to a flat map of strings and is
	/// sent as the query string. For every other method it is serialized to
	/// JSON and sent as the body. Statuses of 400 and above are returned as
	/// [`ClientError::Api`] with the raw body, never parsed.
	pub async fn call<P: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<JsonValue, ClientError> {
		self.call_as(method, path, payload).await
	}

	/// Call an endpoint and decode the response into `T`
	pub async fn call_as<T: DeserializeOwned, P: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<T, ClientError> {
		let timestamp = chrono::Utc::now().timestamp();
		let request = SignedRequest::build(
			&self.credentials,
			&self.base_url,
			method,
			path,
			payload,
			timestamp,
		)?;

		let (status, body) = self.send(request).await?;
		decode_response(status, &body)
	}

	async fn send(&self, request: SignedRequest) -> Result<(u16, Vec<u8>), ClientError> {
		debug!("Sending {} {}", request.method, request.path_with_query);

		let mut builder = self
			.client
			.request(request.method.into(), request.url)
			.header(API_KEY_HEADER, request.api_key)
			.header(SIGNATURE_HEADER, request.signature)
			.header(TIMESTAMP_HEADER, request.timestamp);
		if let Some(body) = request.body {
			builder = builder.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(body);
		}

		let response = builder
			.send()
			.await
			.map_err(|e| self.transport_error(e))?;
		let status = response.status().as_u16();
		let body = response
			.bytes()
			.await
			.map_err(|e| self.transport_error(e))?;

		debug!(
			"{} {} -> {} ({} bytes)",
			request.method,
			request.path_with_query,
			status,
			body.len()
		);

		Ok((status, body.to_vec()))
	}

	fn transport_error(&self, err: reqwest::Error) -> ClientError {
		if err.is_timeout() {
			ClientError::Timeout(self.timeout)
		} else {
			ClientError::Transport(err)
		}
	}
}

/// Classify a raw response
///
/// Statuses of 400 and above are API errors carrying the body verbatim;
/// anything else must be valid JSON for `T`.
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8]) -> Result<T, ClientError> {
	if status >= 400 {
		return Err(ClientError::Api {
			status,
			body: String::from_utf8_lossy(body).into_owned(),
		});
	}

	serde_json::from_slice(body).map_err(|source| ClientError::Decode {
		source,
		body: String::from_utf8_lossy(body).into_owned(),
	})
}

/// Synchronous client wrapper
///
/// This wraps the async client and runs each call to completion on an owned
/// tokio runtime. It must not be created or dropped inside an async context.
pub struct SyncClient {
	client: Client,
	runtime: tokio::runtime::Runtime,
}

impl SyncClient {
	/// Create a new synchronous client against the default API origin
	pub fn new(public_key: impl Into<String>, secret_key_hex: &str) -> Result<Self, ConfigError> {
		Self::with_config(public_key, secret_key_hex, ClientConfig::default())
	}

	/// Create a new synchronous client with custom configuration
	pub fn with_config(
		public_key: impl Into<String>,
		secret_key_hex: &str,
		config: ClientConfig,
	) -> Result<Self, ConfigError> {
		let runtime = tokio::runtime::Runtime::new().map_err(ConfigError::Runtime)?;
		Ok(Self {
			client: Client::with_config(public_key, secret_key_hex, config)?,
			runtime,
		})
	}

	pub fn client(&self) -> &Client {
		&self.client
	}

	/// Call an endpoint (synchronous)
	pub fn call<P: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<JsonValue, ClientError> {
		self.runtime.block_on(self.client.call(method, path, payload))
	}

	/// Call an endpoint and decode into `T` (synchronous)
	pub fn call_as<T: DeserializeOwned, P: Serialize + ?Sized>(
		&self,
		method: Method,
		path: &str,
		payload: Option<&P>,
	) -> Result<T, ClientError> {
		self.runtime
			.block_on(self.client.call_as(method, path, payload))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const PUBLIC_KEY: &str = "8397eb8e7f88032eb13dca99a11350b05d290c896a96afd60b119184b1b443c9";
	const SECRET_KEY: &str = "2de2824ac1752d0ed3c66abc67bec2db553022aa718287a1e773e104303031208397eb8e7f88032eb13dca99a11350b05d290c896a96afd60b119184b1b443c9";

	#[test]
	fn test_client_creation() {
		let client = Client::new(PUBLIC_KEY, SECRET_KEY).unwrap();
		assert_eq!(client.base_url().as_str(), "https://api.dmarket.com/");
		assert_eq!(client.public_key(), PUBLIC_KEY);
	}

	#[test]
	fn test_client_rejects_bad_credentials() {
		assert!(matches!(
			Client::new("", SECRET_KEY),
			Err(ConfigError::EmptyPublicKey)
		));
		assert!(matches!(
			Client::new(PUBLIC_KEY, ""),
			Err(ConfigError::EmptySecretKey)
		));
		assert!(matches!(
			Client::new(PUBLIC_KEY, "not hex at all"),
			Err(ConfigError::InvalidSecretKey(_))
		));
		assert!(matches!(
			Client::new(PUBLIC_KEY, PUBLIC_KEY),
			Err(ConfigError::InvalidSecretKey(
				crate::signing::SigningError::InvalidKeyLength { actual: 32, .. }
			))
		));
	}

	#[test]
	fn test_client_rejects_bad_base_url() {
		let config = ClientConfig::default().with_base_url("not a url");
		assert!(matches!(
			Client::with_config(PUBLIC_KEY, SECRET_KEY, config),
			Err(ConfigError::InvalidBaseUrl(_))
		));
	}

	#[test]
	fn test_sync_client_creation() {
		let client = SyncClient::new(PUBLIC_KEY, SECRET_KEY);
		assert!(client.is_ok());
	}

	#[test]
	fn test_decode_api_error_keeps_raw_body() {
		let err = decode_response::<JsonValue>(404, br#"{"error":"not found"}"#).unwrap_err();
		match err {
			ClientError::Api { status, body } => {
				assert_eq!(status, 404);
				assert_eq!(body, r#"{"error":"not found"}"#);
			}
			other => panic!("unexpected error: {:?}", other),
		}
	}

	#[test]
	fn test_decode_malformed_json() {
		let err = decode_response::<JsonValue>(200, b"{not json").unwrap_err();
		assert!(matches!(&err, ClientError::Decode { body, .. } if body == "{not json"));
		assert_eq!(err.body(), Some("{not json"));
		assert_eq!(err.status(), None);
	}

	#[test]
	fn test_decode_success() {
		let value = decode_response::<JsonValue>(200, br#"{"objects":[],"total":0}"#).unwrap();
		assert_eq!(value["total"], 0);
		assert!(value["objects"].as_array().unwrap().is_empty());
	}

	#[test]
	fn test_decode_redirect_status_is_not_an_error_class() {
		// Only 400 and above are API errors
		let value = decode_response::<JsonValue>(399, b"null").unwrap();
		assert!(value.is_null());
	}
}
