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

use anyhow::{Context, Result, bail};
use dmarket_sdk::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::time::Duration;

// Logging configuration constants
/// Default log level (can be overridden by RUST_LOG environment variable)
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Default log directory component name
pub const LOG_COMPONENT_NAME: &str = "cmd";

/// Default console output enabled (can be overridden by LOG_TO_CONSOLE environment variable)
pub const DEFAULT_LOG_TO_CONSOLE: bool = true;

// Client configuration
/// Prefix of every client setting, e.g. `DMARKET_PUBLIC_KEY`
pub const ENV_PREFIX: &str = "DMARKET";

/// Credentials and transport settings for the command
///
/// Read from `DMARKET_PUBLIC_KEY`, `DMARKET_SECRET_KEY` and the optional
/// `DMARKET_API_URL` / `DMARKET_TIMEOUT_SECS`. A `.env` file in the working
/// directory is honoured.
#[derive(Clone, Deserialize)]
pub struct CmdConfig {
	#[serde(default)]
	pub public_key: String,
	#[serde(default)]
	pub secret_key: String,
	#[serde(default = "default_api_url")]
	pub api_url: String,
	#[serde(default = "default_timeout_secs")]
	pub timeout_secs: u64,
}

fn default_api_url() -> String {
	DEFAULT_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
	DEFAULT_TIMEOUT_SECS
}

impl std::fmt::Debug for CmdConfig {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CmdConfig")
			.field("public_key", &self.public_key)
			.field("secret_key", &"<redacted>")
			.field("api_url", &self.api_url)
			.field("timeout_secs", &self.timeout_secs)
			.finish()
	}
}

impl CmdConfig {
	/// Load configuration from environment variables
	pub fn from_env() -> Result<Self> {
		dotenv::dotenv().ok();

		let cfg = config::Config::builder()
			.add_source(config::Environment::with_prefix(ENV_PREFIX))
			.build()
			.context("Failed to read environment")?;

		Self::from_config(cfg)
	}

	pub fn from_config(cfg: config::Config) -> Result<Self> {
		let parsed: Self = cfg
			.try_deserialize()
			.context("Invalid DMARKET_* configuration")?;

		if parsed.public_key.is_empty() || parsed.secret_key.is_empty() {
			bail!(
				"{}_PUBLIC_KEY and {}_SECRET_KEY environment variables must be set",
				ENV_PREFIX,
				ENV_PREFIX
			);
		}
		if parsed.timeout_secs == 0 {
			bail!("{}_TIMEOUT_SECS must be greater than zero", ENV_PREFIX);
		}

		Ok(parsed)
	}

	pub fn client_config(&self) -> ClientConfig {
		ClientConfig::default()
			.with_base_url(&self.api_url)
			.with_timeout(Duration::from_secs(self.timeout_secs))
	}
}
