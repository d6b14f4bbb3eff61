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

//! DMarket command
//!
//! Looks up recent sales for an item, fetches the first market offer and
//! places a buy target mirroring it. Credentials come from
//! `DMARKET_PUBLIC_KEY` and `DMARKET_SECRET_KEY`.

mod config;
mod logging;
mod market;

use anyhow::{Context, Result};
use dmarket_sdk::Client;
use serde::Serialize;
use tracing::{error, info};

use crate::{config::CmdConfig, logging::init_logging};

const LAST_SALES_TITLE: &str = "AK-47 | B the Monster (Factory New)";

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<()> {
	let pretty = serde_json::to_string_pretty(value).context("Failed to format JSON")?;
	println!("{}:\n{}", label, pretty);
	Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
	init_logging()?;

	let cfg = CmdConfig::from_env()?;
	let client = Client::with_config(&cfg.public_key, &cfg.secret_key, cfg.client_config())
		.context("Failed to initialize client")?;
	info!(target: "cmd", "Client ready for {}", client.base_url());

	println!(
		"Calling GET {} with title: {}",
		market::LAST_SALES_PATH,
		LAST_SALES_TITLE
	);
	match market::last_sales(&client, LAST_SALES_TITLE).await {
		Ok(sales) => print_json("Response", &sales)?,
		Err(e) => error!(target: "cmd", "Failed to get last sales: {}", e),
	}

	println!("\nFetching an offer from the market to create a target...");
	let offer = match market::first_market_offer(&client).await {
		Ok(offer) => offer,
		Err(e) => {
			error!(target: "cmd", "An error occurred during target creation: {:#}", e);
			return Ok(());
		}
	};
	info!(target: "cmd", "Using offer: {}", offer.title);

	let targets = market::build_target(&offer);
	print_json(
		&format!("Calling POST {} with body", market::TARGET_CREATE_PATH),
		&targets,
	)?;
	match market::create_target(&client, &targets).await {
		Ok(response) => print_json("Target creation response", &response)?,
		Err(e) => error!(target: "cmd", "Error creating target: {}", e),
	}

	Ok(())
}
