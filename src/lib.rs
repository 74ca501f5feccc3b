//! # crypto-match-engine
//!
//! A price-time priority limit order matching engine for symbol-scoped
//! cryptocurrency markets. Implements the REG NMS-inspired invariants of
//! no trade-through (a marketable order always consumes the best available
//! contra price before any inferior one) and price-time priority (within a
//! price level, earlier arrivals match first).
//!
//! ## Scope
//!
//! This crate is the matching *core* only: order book data structures, the
//! matching algorithm for `MARKET`, `LIMIT`, `IOC`, and `FOK` orders, BBO/L2
//! snapshot derivation, and cancellation. Transport (HTTP/WebSocket),
//! persistence, self-trade prevention, fee computation, and risk checks are
//! explicitly out of scope — collaborators external to this crate consume it
//! through [`MatchingEngine`]'s programmatic surface.
//!
//! ## Concurrency
//!
//! [`MatchingEngine`] guards all mutable state behind a single mutex: one
//! submission runs at a time, and reads observe a consistent snapshot
//! between submissions. See the module docs on `engine` for the full
//! rationale.
//!
//! ## Example
//!
//! ```
//! use crypto_match_engine::{MatchingEngine, SubmitRequest, OrderType, Side};
//! use rust_decimal::Decimal;
//!
//! let engine = MatchingEngine::new();
//! engine.submit(SubmitRequest {
//!     symbol: "BTC-USD".to_string(),
//!     order_type: OrderType::Limit,
//!     side: Side::Sell,
//!     quantity: Decimal::new(1, 0),
//!     price: Some(Decimal::new(50_000, 0)),
//! });
//! let report = engine.submit(SubmitRequest {
//!     symbol: "BTC-USD".to_string(),
//!     order_type: OrderType::Limit,
//!     side: Side::Buy,
//!     quantity: Decimal::new(1, 0),
//!     price: Some(Decimal::new(50_000, 0)),
//! });
//! assert_eq!(report.trades.len(), 1);
//! ```

pub mod clock;
pub mod decimal;
pub mod engine;
pub mod ids;
pub mod orderbook;

pub use clock::Clock;
pub use decimal::{parse_decimal_strict, DecimalError};
pub use engine::{CancelReport, ExecutionReport, MatchingEngine, SubmitRequest};
pub use ids::{OrderId, TradeId};
pub use orderbook::{
    Bbo, BboSubscriber, DepthLevel, Order, OrderBook, OrderBookError, OrderBookSnapshot,
    OrderStatus, OrderType, PriceLevel, Side, Trade, TradeSubscriber,
};
