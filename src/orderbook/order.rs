//! The `Order` value type and its small companion enums.

use crate::ids::OrderId;
use crate::orderbook::error::OrderBookError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which side of the book an order rests on or aggresses against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// The contra side a matching incoming order on `self` would cross against.
    pub fn contra(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// The four order types this engine dispatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
    Limit,
    Ioc,
    Fok,
}

impl OrderType {
    /// `true` for order types that must never rest on the book once matching ends.
    pub fn cancels_residual(self) -> bool {
        !matches!(self, OrderType::Limit)
    }
}

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Partial,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Terminal states never transition further.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

/// A single order, either in flight through the matching loop or resting on a book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub symbol: String,
    pub order_type: OrderType,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
    pub status: OrderStatus,
    pub filled_quantity: Decimal,
}

impl Order {
    /// Builds a new order, validating the construction invariants from the
    /// data model: `quantity > 0`; `price > 0` when present; `price` present
    /// iff `order_type != Market`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        order_id: OrderId,
        symbol: impl Into<String>,
        order_type: OrderType,
        side: Side,
        quantity: Decimal,
        price: Option<Decimal>,
        timestamp: DateTime<Utc>,
    ) -> Result<Self, OrderBookError> {
        if quantity <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity(quantity));
        }
        match (order_type, price) {
            (OrderType::Market, Some(_)) => return Err(OrderBookError::UnexpectedPrice),
            (OrderType::Market, None) => {}
            (_, None) => return Err(OrderBookError::MissingPrice),
            (_, Some(p)) if p <= Decimal::ZERO => return Err(OrderBookError::InvalidPrice(p)),
            (_, Some(_)) => {}
        }

        Ok(Self {
            order_id,
            symbol: symbol.into(),
            order_type,
            side,
            quantity,
            price,
            timestamp,
            status: OrderStatus::Pending,
            filled_quantity: Decimal::ZERO,
        })
    }

    /// Quantity still unmatched: `quantity - filled_quantity`, never negative.
    pub fn remaining_quantity(&self) -> Decimal {
        self.quantity - self.filled_quantity
    }

    /// Applies a partial or complete fill, advancing `filled_quantity` and
    /// `status`. Rejects over-fills and non-positive fill amounts, mirroring
    /// the original Python core's `Order.fill` guard.
    pub fn apply_fill(&mut self, fill: Decimal) -> Result<(), OrderBookError> {
        if fill <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity(fill));
        }
        if fill > self.remaining_quantity() {
            return Err(OrderBookError::InternalInvariantViolation(format!(
                "fill {fill} exceeds remaining quantity {rem} for order {id}",
                rem = self.remaining_quantity(),
                id = self.order_id
            )));
        }

        self.filled_quantity += fill;
        self.status = if self.remaining_quantity() == Decimal::ZERO {
            OrderStatus::Filled
        } else {
            OrderStatus::Partial
        };
        Ok(())
    }

    /// Marks the order cancelled. A no-op check for terminal states is the
    /// caller's responsibility (cancelling a terminal order is a not-found
    /// error at the book level, not a state transition here).
    pub fn cancel(&mut self) {
        self.status = OrderStatus::Cancelled;
    }

    pub fn reject(&mut self) {
        self.status = OrderStatus::Rejected;
    }
}
