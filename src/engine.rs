//! Symbol-scoped order book registry, order-type dispatch, and the matching gate.

use crate::clock::Clock;
use crate::ids::OrderId;
use crate::orderbook::bbo::{Bbo, OrderBookSnapshot};
use crate::orderbook::error::OrderBookError;
use crate::orderbook::matching::{self, match_order};
use crate::orderbook::order::{Order, OrderStatus, OrderType, Side};
use crate::orderbook::trade::{BboSubscriber, Trade, TradeSubscriber};
use crate::orderbook::OrderBook;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, trace, warn};

/// An order submission, already validated of wire concerns (decimal parsing,
/// enum spelling) by the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub symbol: String,
    pub order_type: OrderType,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Option<Decimal>,
}

/// The outcome of a single `submit` call. On a validation or processing
/// fault, `status` is `Rejected` and `error` carries the reason; matching
/// never partially applies and then fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub filled_quantity: Decimal,
    pub remaining_quantity: Decimal,
    pub trades: Vec<Trade>,
    pub timestamp: DateTime<Utc>,
    pub error: Option<String>,
}

/// The outcome of a single `cancel` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelReport {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub timestamp: DateTime<Utc>,
    pub message: Option<String>,
}

struct EngineState {
    books: HashMap<String, OrderBook>,
    trade_log: Vec<Trade>,
    trade_subscribers: Vec<TradeSubscriber>,
    bbo_subscribers: Vec<BboSubscriber>,
}

impl EngineState {
    fn new() -> Self {
        Self {
            books: HashMap::new(),
            trade_log: Vec::new(),
            trade_subscribers: Vec::new(),
            bbo_subscribers: Vec::new(),
        }
    }
}

/// The matching engine: a symbol→[`OrderBook`] registry behind a single
/// reentrant-free mutex gate, dispatching each submission by order type and
/// fanning out trade/BBO events to registered subscribers.
///
/// One submission runs at a time; reads (`bbo`, `snapshot`) observe a
/// consistent state between submissions. An implementation wishing to shard
/// the gate per symbol may do so, since no operation spans symbols — this
/// one keeps the single-gate default, the simplest correct model.
pub struct MatchingEngine {
    state: Mutex<EngineState>,
    clock: Clock,
}

impl MatchingEngine {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(EngineState::new()),
            clock: Clock::new(),
        }
    }

    /// Registers a subscriber invoked with every trade a submission
    /// generates, in execution order. Subscribers are expected to be
    /// synchronous and cheap; a panicking subscriber is caught, logged, and
    /// does not affect any other subscriber or poison the engine.
    pub fn register_trade_subscriber(&self, subscriber: TradeSubscriber) {
        self.state.lock().trade_subscribers.push(subscriber);
    }

    /// Registers a subscriber invoked once per submission/cancel with the
    /// affected symbol. Subscribers must re-query [`MatchingEngine::bbo`] or
    /// [`MatchingEngine::snapshot`] themselves.
    pub fn register_bbo_subscriber(&self, subscriber: BboSubscriber) {
        self.state.lock().bbo_subscribers.push(subscriber);
    }

    /// Validates and processes one order submission end to end: dispatch,
    /// matching, residual disposition, trade/BBO notification.
    pub fn submit(&self, request: SubmitRequest) -> ExecutionReport {
        let order_id = OrderId::new();
        let timestamp = self.clock.next();

        let mut order = match Order::new(
            order_id,
            request.symbol.clone(),
            request.order_type,
            request.side,
            request.quantity,
            request.price,
            timestamp,
        ) {
            Ok(order) => order,
            Err(err) => {
                return ExecutionReport {
                    order_id,
                    status: OrderStatus::Rejected,
                    filled_quantity: Decimal::ZERO,
                    remaining_quantity: request.quantity,
                    trades: Vec::new(),
                    timestamp,
                    error: Some(err.to_string()),
                };
            }
        };

        let mut state = self.state.lock();
        let book = state
            .books
            .entry(request.symbol.clone())
            .or_insert_with(|| OrderBook::new(request.symbol.clone()));

        let result = self.process_dispatch(book, &mut order);

        let report = match result {
            Ok(trades) => {
                for trade in &trades {
                    state.trade_log.push(trade.clone());
                }
                let report = ExecutionReport {
                    order_id: order.order_id,
                    status: order.status,
                    filled_quantity: order.filled_quantity,
                    remaining_quantity: order.remaining_quantity(),
                    trades,
                    timestamp,
                    error: None,
                };
                notify_trades(&state.trade_subscribers, &report.trades);
                notify_bbo(&state.bbo_subscribers, &request.symbol);
                report
            }
            Err(err) => {
                order.reject();
                ExecutionReport {
                    order_id: order.order_id,
                    status: OrderStatus::Rejected,
                    filled_quantity: order.filled_quantity,
                    remaining_quantity: order.remaining_quantity(),
                    trades: Vec::new(),
                    timestamp,
                    error: Some(err.to_string()),
                }
            }
        };

        report
    }

    /// Dispatches `order` per its type, mutating `book` and `order` in
    /// place, and returns the trades generated.
    fn process_dispatch(
        &self,
        book: &mut OrderBook,
        order: &mut Order,
    ) -> Result<Vec<Trade>, OrderBookError> {
        match order.order_type {
            OrderType::Limit => {
                let trades = match_order(book, order, &self.clock)?;
                if order.remaining_quantity() > Decimal::ZERO {
                    book.add_order(order.clone())?;
                    trace!(order_id = %order.order_id, "limit residual rested on book");
                }
                Ok(trades)
            }
            OrderType::Market => {
                let trades = match_order(book, order, &self.clock)?;
                if order.remaining_quantity() > Decimal::ZERO {
                    order.cancel();
                    warn!(order_id = %order.order_id, "market order residual cancelled for lack of liquidity");
                }
                Ok(trades)
            }
            OrderType::Ioc => {
                let trades = match_order(book, order, &self.clock)?;
                if order.remaining_quantity() > Decimal::ZERO {
                    order.cancel();
                }
                Ok(trades)
            }
            OrderType::Fok => self.process_fok(book, order),
        }
    }

    fn process_fok(
        &self,
        book: &mut OrderBook,
        order: &mut Order,
    ) -> Result<Vec<Trade>, OrderBookError> {
        let fillable = matching::has_sufficient_liquidity(
            book,
            order.side,
            order.price,
            order.remaining_quantity(),
        );
        if !fillable {
            order.cancel();
            return Ok(Vec::new());
        }

        let trades = match_order(book, order, &self.clock)?;
        if order.remaining_quantity() > Decimal::ZERO {
            // Precheck and match run under the same gate, so this should be
            // unreachable; surfaced rather than silently tolerated.
            error!(order_id = %order.order_id, "FOK precheck and execution disagreed");
            order.cancel();
            return Err(OrderBookError::InternalInvariantViolation(format!(
                "FOK order {} left {} remaining after a successful precheck",
                order.order_id,
                order.remaining_quantity()
            )));
        }
        Ok(trades)
    }

    /// Cancels a resting order. A cancel against an unknown symbol or
    /// unknown order id returns a structured not-found report, never a
    /// panic or error type.
    pub fn cancel(&self, symbol: &str, order_id: OrderId) -> CancelReport {
        let timestamp = self.clock.next();
        let mut state = self.state.lock();

        let Some(book) = state.books.get_mut(symbol) else {
            return CancelReport {
                order_id,
                status: OrderStatus::Rejected,
                timestamp,
                message: Some(OrderBookError::UnknownSymbol(symbol.to_string()).to_string()),
            };
        };

        let Some(mut order) = book.remove_order(order_id) else {
            return CancelReport {
                order_id,
                status: OrderStatus::Rejected,
                timestamp,
                message: Some(OrderBookError::OrderNotFound(order_id).to_string()),
            };
        };

        order.cancel();
        let report = CancelReport {
            order_id,
            status: OrderStatus::Cancelled,
            timestamp,
            message: None,
        };

        notify_bbo(&state.bbo_subscribers, symbol);
        report
    }

    /// Current best bid/offer for `symbol`, or `None` if no book exists.
    pub fn bbo(&self, symbol: &str) -> Option<Bbo> {
        let state = self.state.lock();
        let book = state.books.get(symbol)?;
        Some(book.bbo(self.clock.next()))
    }

    /// Current L2 depth snapshot for `symbol`, or `None` if no book exists.
    pub fn snapshot(&self, symbol: &str, depth: usize) -> Option<OrderBookSnapshot> {
        let state = self.state.lock();
        let book = state.books.get(symbol)?;
        Some(book.snapshot(depth, self.clock.next()))
    }

    /// A copy of the engine's unbounded in-memory trade log. Trimming is a
    /// consumer concern; the core never evicts.
    pub fn trade_log(&self) -> Vec<Trade> {
        self.state.lock().trade_log.clone()
    }
}

impl Default for MatchingEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn notify_trades(subscribers: &[TradeSubscriber], trades: &[Trade]) {
    for trade in trades {
        for subscriber in subscribers {
            let subscriber = subscriber.clone();
            let trade = trade.clone();
            if std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || subscriber(&trade))).is_err() {
                error!("trade subscriber panicked; isolating and continuing");
            }
        }
    }
}

fn notify_bbo(subscribers: &[BboSubscriber], symbol: &str) {
    for subscriber in subscribers {
        let subscriber = subscriber.clone();
        let symbol = symbol.to_string();
        if std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || subscriber(&symbol))).is_err() {
            error!("bbo subscriber panicked; isolating and continuing");
        }
    }
}
