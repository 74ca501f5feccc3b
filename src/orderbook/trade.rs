//! Trade execution records and subscriber fan-out.

use crate::ids::{OrderId, TradeId};
use crate::orderbook::order::Side;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// An immutable execution record, always priced at the resting (maker) order's price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub trade_id: TradeId,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: Decimal,
    pub timestamp: DateTime<Utc>,
    pub aggressor_side: Side,
    pub maker_order_id: OrderId,
    pub taker_order_id: OrderId,
    /// Optional decoration only; this engine never computes fees.
    pub maker_fee: Option<Decimal>,
    /// Optional decoration only; this engine never computes fees.
    pub taker_fee: Option<Decimal>,
}

impl Trade {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        trade_id: TradeId,
        symbol: impl Into<String>,
        price: Decimal,
        quantity: Decimal,
        timestamp: DateTime<Utc>,
        aggressor_side: Side,
        maker_order_id: OrderId,
        taker_order_id: OrderId,
    ) -> Self {
        Self {
            trade_id,
            symbol: symbol.into(),
            price,
            quantity,
            timestamp,
            aggressor_side,
            maker_order_id,
            taker_order_id,
            maker_fee: None,
            taker_fee: None,
        }
    }
}

/// Invoked for every trade a submission generates, in execution order.
pub type TradeSubscriber = Arc<dyn Fn(&Trade) + Send + Sync>;

/// Invoked once per submission/cancel with the affected symbol. Subscribers
/// must re-query `bbo`/`snapshot` themselves; this keeps the event cheap and
/// decouples the engine from any particular serialization format.
pub type BboSubscriber = Arc<dyn Fn(&str) + Send + Sync>;
