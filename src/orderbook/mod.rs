//! Per-symbol order book: entities, the price-level queue, matching, and errors.

pub mod bbo;
pub mod book;
pub mod error;
pub mod matching;
pub mod order;
pub mod price_level;
pub mod trade;

pub use bbo::{Bbo, DepthLevel, OrderBookSnapshot};
pub use book::OrderBook;
pub use error::OrderBookError;
pub use order::{Order, OrderStatus, OrderType, Side};
pub use price_level::PriceLevel;
pub use trade::{BboSubscriber, Trade, TradeSubscriber};
