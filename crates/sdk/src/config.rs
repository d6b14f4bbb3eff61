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

/// Origin every request path is resolved against
pub const DEFAULT_API_URL: &str = "https://api.dmarket.com";

/// Per-request timeout in seconds, covering connect through reading the body
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client transport configuration
///
/// Defaults to [`DEFAULT_API_URL`] and [`DEFAULT_TIMEOUT_SECS`]. Both can be
/// overridden with [`ClientConfig::with_base_url`] and
/// [`ClientConfig::with_timeout`]. The base URL is treated as an origin: any
/// path component it carries is replaced by the request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub base_url: String,
	pub timeout: Duration,
}

impl Default for ClientConfig {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_API_URL.to_string(),
			timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
		}
	}
}

impl ClientConfig {
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_config() {
		let config = ClientConfig::default();
		assert_eq!(config.base_url, "https://api.dmarket.com");
		assert_eq!(config.timeout, Duration::from_secs(10));
	}

	#[test]
	fn test_overrides() {
		let config = ClientConfig::default()
			.with_base_url("http://127.0.0.1:8080")
			.with_timeout(Duration::from_millis(250));
		assert_eq!(config.base_url, "http://127.0.0.1:8080");
		assert_eq!(config.timeout, Duration::from_millis(250));
	}
}
