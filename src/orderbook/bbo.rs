//! Top-of-book and L2 depth market-data views.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Best bid and offer for a symbol. Either side is `None` when that half of
/// the book is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bbo {
    pub symbol: String,
    pub best_bid: Option<Decimal>,
    pub best_bid_quantity: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub best_ask_quantity: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

/// One `(price, aggregate_quantity)` row of an L2 snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Aggregated depth view: up to `depth` price levels per side, best first,
/// no per-order detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    pub symbol: String,
    pub bids: Vec<DepthLevel>,
    pub asks: Vec<DepthLevel>,
    pub timestamp: DateTime<Utc>,
}
