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

//! DMarket SDK - Signed REST client
//!
//! This crate signs and sends requests to the DMarket trading API:
//! - Ed25519 signing over `METHOD + path_with_query + body + timestamp`
//! - `X-Api-Key`, `X-Request-Sign` and `X-Sign-Date` authentication headers
//! - Generic JSON decoding with a typed error taxonomy
//!
//! The SDK is designed to be lightweight and embeddable:
//! - No background threads
//! - No retries or rate limiting
//! - No environment or configuration loading

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod signing;
pub mod types;

pub use client::{Client, NO_PAYLOAD, SyncClient, decode_response};
pub use config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
pub use error::{ClientError, ConfigError};
pub use request::{Credentials, SIGNATURE_PREFIX, SignedRequest, string_to_sign};
pub use signing::SigningError;
pub use types::{JsonValue, Method, UnsupportedMethod};
