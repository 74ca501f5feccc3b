//! The per-symbol order book: two price-indexed maps plus an order index.

use crate::ids::OrderId;
use crate::orderbook::bbo::{Bbo, DepthLevel, OrderBookSnapshot};
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::{Order, Side};
use crate::orderbook::price_level::PriceLevel;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Two price-ordered maps (bids, asks) holding one [`PriceLevel`] per price,
/// plus a location index for O(1) cancel lookup.
///
/// `bids`/`asks` are both kept in natural ascending `Decimal` order; "best
/// bid" reads the map from the tail (`next_back`) while "best ask" reads
/// from the head (`next`), avoiding the need for two different key orderings.
#[derive(Debug)]
pub struct OrderBook {
    pub symbol: String,
    bids: BTreeMap<Decimal, PriceLevel>,
    asks: BTreeMap<Decimal, PriceLevel>,
    /// A lookup, not a lifetime root: the order itself is owned by its
    /// `PriceLevel`. This index only remembers where to find it.
    locations: HashMap<OrderId, (Decimal, Side)>,
}

impl OrderBook {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            locations: HashMap::new(),
        }
    }

    fn side_map(&self, side: Side) -> &BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    fn side_map_mut(&mut self, side: Side) -> &mut BTreeMap<Decimal, PriceLevel> {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// The contra side a taker on `side` crosses against.
    pub fn contra_map(&self, side: Side) -> &BTreeMap<Decimal, PriceLevel> {
        self.side_map(side.contra())
    }

    /// Highest resting bid price, or `None` if the bid side is empty.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest resting ask price, or `None` if the ask side is empty.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Best price on the contra side for a taker on `side`: the lowest ask
    /// for a BUY taker, the highest bid for a SELL taker.
    pub(crate) fn best_contra_price(&self, side: Side) -> Option<Decimal> {
        match side {
            Side::Buy => self.best_ask(),
            Side::Sell => self.best_bid(),
        }
    }

    /// A mutable handle to the contra-side level at `price`, if present.
    pub(crate) fn contra_level_mut(&mut self, side: Side, price: Decimal) -> Option<&mut PriceLevel> {
        self.side_map_mut(side.contra()).get_mut(&price)
    }

    /// Adds a resting order to its side's book. Requires
    /// `order.remaining_quantity() > 0` and `order.price` present.
    pub fn add_order(&mut self, order: Order) -> Result<(), OrderBookError> {
        let price = order.price.ok_or(OrderBookError::MissingPrice)?;
        if order.remaining_quantity() <= Decimal::ZERO {
            return Err(OrderBookError::InvalidQuantity(order.remaining_quantity()));
        }
        if self.locations.contains_key(&order.order_id) {
            return Err(OrderBookError::DuplicateOrderId(order.order_id));
        }

        let order_id = order.order_id;
        let side = order.side;
        self.side_map_mut(side)
            .entry(price)
            .or_insert_with(|| PriceLevel::new(price))
            .append(order);
        self.locations.insert(order_id, (price, side));
        trace!(%order_id, %price, ?side, "order rested on book");
        Ok(())
    }

    /// Removes and returns the order with `order_id`, collapsing its price
    /// level if it becomes empty.
    pub fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
        let (price, side) = self.locations.remove(&order_id)?;
        let map = self.side_map_mut(side);
        let level = map.get_mut(&price)?;
        let removed = level.remove(order_id);
        if level.is_empty() {
            map.remove(&price);
        }
        removed
    }

    /// Accounts for a partial fill applied to a resting order already
    /// mutated by the caller: adjusts the level's aggregate by `-filled`,
    /// and if the order's remaining quantity has hit zero, pops it from the
    /// head of the level and deletes it from the location index. If the
    /// level becomes empty, it is removed from the side map.
    pub fn update_after_partial_fill(
        &mut self,
        side: Side,
        price: Decimal,
        filled: Decimal,
        order_now_empty: bool,
    ) -> Result<(), OrderBookError> {
        let map = self.side_map_mut(side);
        let level = map
            .get_mut(&price)
            .ok_or_else(|| OrderBookError::InternalInvariantViolation(
                "update_after_partial_fill: missing price level".to_string(),
            ))?;
        level.adjust(-filled);

        if order_now_empty {
            let popped = level
                .pop_head()
                .ok_or_else(|| OrderBookError::InternalInvariantViolation(
                    "update_after_partial_fill: level unexpectedly empty".to_string(),
                ))?;
            self.locations.remove(&popped.order_id);
        }

        if level.is_empty() {
            map.remove(&price);
        }
        Ok(())
    }

    /// Bundles best prices with their aggregated top-level quantities.
    pub fn bbo(&self, timestamp: DateTime<Utc>) -> Bbo {
        let best_bid = self.best_bid();
        let best_ask = self.best_ask();
        Bbo {
            symbol: self.symbol.clone(),
            best_bid,
            best_bid_quantity: best_bid.and_then(|p| self.bids.get(&p)).map(PriceLevel::total_quantity),
            best_ask,
            best_ask_quantity: best_ask.and_then(|p| self.asks.get(&p)).map(PriceLevel::total_quantity),
            timestamp,
        }
    }

    /// In-order traversal of up to `depth` levels per side, best first.
    pub fn snapshot(&self, depth: usize, timestamp: DateTime<Utc>) -> OrderBookSnapshot {
        let bids = self
            .bids
            .iter()
            .rev()
            .take(depth)
            .map(|(price, level)| DepthLevel {
                price: *price,
                quantity: level.total_quantity(),
            })
            .collect();
        let asks = self
            .asks
            .iter()
            .take(depth)
            .map(|(price, level)| DepthLevel {
                price: *price,
                quantity: level.total_quantity(),
            })
            .collect();
        OrderBookSnapshot {
            symbol: self.symbol.clone(),
            bids,
            asks,
            timestamp,
        }
    }

    #[cfg(test)]
    pub fn level_total_quantity(&self, side: Side, price: Decimal) -> Option<Decimal> {
        self.side_map(side).get(&price).map(PriceLevel::total_quantity)
    }
}
