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

//! Marketplace calls used by the command
//!
//! Payloads are always built as typed structures and serialized by the
//! client, so offer fields containing quotes or other JSON metacharacters are
//! escaped correctly.

use anyhow::{Context, Result, anyhow};
use dmarket_sdk::{Client, ClientError, JsonValue, Method};
use serde::{Deserialize, Serialize};

pub const LAST_SALES_PATH: &str = "/trade-aggregator/v1/last-sales";
pub const MARKET_ITEMS_PATH: &str = "/exchange/v1/market/items";
pub const TARGET_CREATE_PATH: &str = "/exchange/v1/target/create";

/// CS:GO game identifier
pub const GAME_ID: &str = "a8db";
pub const CURRENCY: &str = "USD";

/// Target bid price and owner payout, in USD
pub const TARGET_PRICE: &str = "2";
pub const TARGET_OWNER_GETS: &str = "1";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferExtra {
	#[serde(default)]
	pub category_path: String,
}

/// Market offer, reduced to the fields a target needs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
	#[serde(default)]
	pub game_id: String,
	#[serde(default)]
	pub title: String,
	#[serde(default)]
	pub image: String,
	#[serde(default)]
	pub extra: OfferExtra,
}

#[derive(Debug, Deserialize)]
struct MarketItems {
	#[serde(default)]
	objects: Vec<Offer>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Money {
	pub amount: String,
	pub currency: String,
}

impl Money {
	pub fn usd(amount: &str) -> Self {
		Self {
			amount: amount.to_string(),
			currency: CURRENCY.to_string(),
		}
	}
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAttributes {
	pub game_id: String,
	pub category_path: String,
	pub title: String,
	pub name: String,
	pub image: String,
	pub owner_gets: Money,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
	pub amount: u32,
	pub game_id: String,
	pub price: Money,
	pub attributes: TargetAttributes,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTargets {
	pub targets: Vec<Target>,
}

/// Recent sales for an item title
pub async fn last_sales(client: &Client, title: &str) -> Result<JsonValue, ClientError> {
	let params = [("gameId", GAME_ID), ("title", title)];
	client
		.call(Method::Get, LAST_SALES_PATH, Some(&query_map(&params)))
		.await
}

/// First offer currently listed on the market
pub async fn first_market_offer(client: &Client) -> Result<Offer> {
	let params = [("gameId", GAME_ID), ("limit", "1"), ("currency", CURRENCY)];
	let items: MarketItems = client
		.call_as(Method::Get, MARKET_ITEMS_PATH, Some(&query_map(&params)))
		.await
		.context("Failed to get market offer")?;

	items
		.objects
		.into_iter()
		.next()
		.ok_or_else(|| anyhow!("No objects found in market response"))
}

/// Single-item buy target mirroring an existing offer
pub fn build_target(offer: &Offer) -> CreateTargets {
	CreateTargets {
		targets: vec![Target {
			amount: 1,
			game_id: offer.game_id.clone(),
			price: Money::usd(TARGET_PRICE),
			attributes: TargetAttributes {
				game_id: offer.game_id.clone(),
				category_path: offer.extra.category_path.clone(),
				title: offer.title.clone(),
				name: offer.title.clone(),
				image: offer.image.clone(),
				owner_gets: Money::usd(TARGET_OWNER_GETS),
			},
		}],
	}
}

pub async fn create_target(
	client: &Client,
	targets: &CreateTargets,
) -> Result<JsonValue, ClientError> {
	client
		.call(Method::Post, TARGET_CREATE_PATH, Some(targets))
		.await
}

fn query_map<'a>(params: &[(&'a str, &'a str)]) -> std::collections::BTreeMap<&'a str, &'a str> {
	params.iter().copied().collect()
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	fn sample_offer() -> Offer {
		serde_json::from_value(json!({
			"gameId": "a8db",
			"title": "AK-47 | \"Redline\" (Field-Tested)",
			"image": "https://cdn.example/ak.png",
			"price": { "USD": "1234" },
			"extra": { "categoryPath": "rifle/ak-47", "exterior": "field-tested" }
		}))
		.unwrap()
	}

	#[test]
	fn test_offer_ignores_unknown_fields() {
		let offer = sample_offer();
		assert_eq!(offer.game_id, "a8db");
		assert_eq!(offer.extra.category_path, "rifle/ak-47");
	}

	#[test]
	fn test_offer_tolerates_missing_fields() {
		let offer: Offer = serde_json::from_value(json!({ "title": "Sticker" })).unwrap();
		assert_eq!(offer.title, "Sticker");
		assert!(offer.game_id.is_empty());
		assert!(offer.extra.category_path.is_empty());
	}

	#[test]
	fn test_build_target_shape() {
		let body = serde_json::to_value(build_target(&sample_offer())).unwrap();

		assert_eq!(
			body,
			json!({
				"targets": [{
					"amount": 1,
					"gameId": "a8db",
					"price": { "amount": "2", "currency": "USD" },
					"attributes": {
						"gameId": "a8db",
						"categoryPath": "rifle/ak-47",
						"title": "AK-47 | \"Redline\" (Field-Tested)",
						"name": "AK-47 | \"Redline\" (Field-Tested)",
						"image": "https://cdn.example/ak.png",
						"ownerGets": { "amount": "1", "currency": "USD" }
					}
				}]
			})
		);
	}

	#[test]
	fn test_build_target_escapes_titles() {
		let text = serde_json::to_string(&build_target(&sample_offer())).unwrap();
		assert!(text.contains(r#""title":"AK-47 | \"Redline\" (Field-Tested)""#));
	}
}
