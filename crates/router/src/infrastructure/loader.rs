//! Seed data loading
//!
//! Venue snapshots are seeded from JSON documents named `exchange-01.json`
//! through `exchange-10.json` inside the configured data directory. Missing
//! files are skipped; files are read in numeric order so the resulting venue
//! order is stable across runs.

use hermes_core::{OrderSide, RestingOrder, Venue};
use log::{info, warn};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

use super::InMemoryVenueStore;

/// Highest seed file index looked up in the data directory
pub const SEED_FILE_COUNT: u32 = 10;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid venue in {path}: {reason}")]
    Invalid { path: String, reason: String },
}

/// One venue document.
///
/// Field names are camelCase; the PascalCase names and EUR/BTC specific
/// balance names of older exports are accepted as aliases.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VenueDocument {
    #[serde(default, alias = "Id")]
    id: Option<Uuid>,
    #[serde(alias = "ExchangeName", alias = "name")]
    exchange_name: String,
    #[serde(alias = "EurBalance", alias = "eurBalance")]
    quote_balance: Decimal,
    #[serde(alias = "BtcBalance", alias = "btcBalance")]
    base_balance: Decimal,
    #[serde(default, alias = "Asks")]
    asks: Vec<OrderDocument>,
    #[serde(default, alias = "Bids")]
    bids: Vec<OrderDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderDocument {
    #[serde(alias = "Id")]
    id: u64,
    #[serde(alias = "Price")]
    price: Decimal,
    #[serde(alias = "Amount", alias = "size")]
    amount: Decimal,
    #[serde(default, alias = "OrderType", alias = "side")]
    order_type: Option<String>,
}

/// Reads venue seed files from a data directory
pub struct SeedLoader {
    data_dir: PathBuf,
}

impl SeedLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Path of the seed file with the given index
    pub fn seed_path(&self, index: u32) -> PathBuf {
        self.data_dir.join(format!("exchange-{:02}.json", index))
    }

    /// Load every seed file present in the data directory
    pub fn load_all(&self) -> Result<Vec<Venue>, LoadError> {
        let mut venues = Vec::new();
        for index in 1..=SEED_FILE_COUNT {
            let path = self.seed_path(index);
            if !path.exists() {
                continue;
            }
            venues.push(Self::load_file(&path)?);
        }

        if venues.is_empty() {
            warn!("No seed files found in {}", self.data_dir.display());
        }
        Ok(venues)
    }

    /// Load and insert all seed venues, returning how many were added
    pub async fn seed_store(&self, store: &InMemoryVenueStore) -> Result<usize, LoadError> {
        let venues = self.load_all()?;
        let count = venues.len();
        for venue in venues {
            info!(
                "Seeded venue {}: quote={}, base={}, asks={}, bids={}",
                venue.name,
                venue.quote_balance,
                venue.base_balance,
                venue.asks.len(),
                venue.bids.len()
            );
            store.insert(venue).await;
        }
        info!("Loaded {} venues from {}", count, self.data_dir.display());
        Ok(count)
    }

    pub fn load_file(path: &Path) -> Result<Venue, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&path.display().to_string(), &content)
    }

    /// Parse one venue document; `origin` labels errors
    pub fn from_json(origin: &str, json: &str) -> Result<Venue, LoadError> {
        let document: VenueDocument =
            serde_json::from_str(json).map_err(|e| LoadError::Parse {
                path: origin.to_string(),
                source: e,
            })?;
        into_venue(origin, document)
    }
}

fn into_venue(origin: &str, document: VenueDocument) -> Result<Venue, LoadError> {
    let invalid = |reason: String| LoadError::Invalid {
        path: origin.to_string(),
        reason,
    };

    if document.quote_balance < Decimal::ZERO || document.base_balance < Decimal::ZERO {
        return Err(invalid(format!(
            "negative balance on {}",
            document.exchange_name
        )));
    }

    let mut venue = Venue::with_id(
        document.id.unwrap_or_else(Uuid::new_v4),
        document.exchange_name,
        document.quote_balance,
        document.base_balance,
    );

    // Orders are filed by their own tag; the collection only supplies a default
    let tagged = document
        .asks
        .into_iter()
        .map(|o| (o, OrderSide::Sell))
        .chain(document.bids.into_iter().map(|o| (o, OrderSide::Buy)));

    for (order, default_side) in tagged {
        let side = match order.order_type.as_deref() {
            Some(tag) => OrderSide::try_from(tag)
                .map_err(|e| invalid(format!("order {}: {}", order.id, e)))?,
            None => default_side,
        };
        if order.price <= Decimal::ZERO {
            return Err(invalid(format!(
                "order {} has non-positive price {}",
                order.id, order.price
            )));
        }
        if order.amount < Decimal::ZERO {
            return Err(invalid(format!(
                "order {} has negative amount {}",
                order.id, order.amount
            )));
        }
        if order.amount.is_zero() {
            continue;
        }

        let resting = RestingOrder::new(order.id, side, order.price, order.amount);
        match side {
            OrderSide::Sell => venue.asks.push(resting),
            OrderSide::Buy => venue.bids.push(resting),
        }
    }

    Ok(venue)
}
