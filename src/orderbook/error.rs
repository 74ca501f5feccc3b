//! Error kinds produced by order submission, cancellation, and book lookups.

use crate::ids::OrderId;
use rust_decimal::Decimal;
use std::fmt;

/// Everything that can go wrong while validating or processing an order.
///
/// Mirrors the hand-rolled `Display`/`Error` idiom the rest of this crate's
/// ancestry uses instead of a derive macro, so each variant can render the
/// exact domain wording callers expect in a `REJECTED` report's `error` field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum OrderBookError {
    /// `quantity` was zero or negative.
    InvalidQuantity(Decimal),
    /// `price` was zero or negative for an order type that requires one.
    InvalidPrice(Decimal),
    /// A `LIMIT`/`IOC`/`FOK` order was submitted with no price.
    MissingPrice,
    /// A `MARKET` order was submitted with a price set.
    UnexpectedPrice,
    /// The requested symbol has no registered order book.
    UnknownSymbol(String),
    /// No order with this id exists in the book it was looked up in.
    OrderNotFound(OrderId),
    /// An order id was already present in the book (should be unreachable
    /// given `OrderId`'s random generation, kept for defense in depth).
    DuplicateOrderId(OrderId),
    /// A match step computed an executed quantity exceeding either side's
    /// resting quantity. Not expected to be reachable from correct matching
    /// code; logged and surfaced rather than silently tolerated.
    InternalInvariantViolation(String),
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidQuantity(q) => {
                write!(f, "quantity must be positive, got {q}")
            }
            OrderBookError::InvalidPrice(p) => write!(f, "price must be positive, got {p}"),
            OrderBookError::MissingPrice => {
                write!(f, "a price is required for this order type")
            }
            OrderBookError::UnexpectedPrice => {
                write!(f, "a market order must not carry a price")
            }
            OrderBookError::UnknownSymbol(symbol) => {
                write!(f, "no order book is registered for symbol '{symbol}'")
            }
            OrderBookError::OrderNotFound(id) => write!(f, "order {id} was not found"),
            OrderBookError::DuplicateOrderId(id) => {
                write!(f, "order id {id} already exists in this book")
            }
            OrderBookError::InternalInvariantViolation(detail) => {
                write!(f, "internal invariant violated: {detail}")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
