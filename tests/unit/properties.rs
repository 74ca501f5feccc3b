//! Property-based tests for the invariants listed in the testable-properties
//! section: no crossed book, quantity conservation, FOK all-or-nothing, and
//! IOC/MARKET never resting.

use crypto_match_engine::{MatchingEngine, OrderStatus, OrderType, Side, SubmitRequest};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn side_strategy() -> impl Strategy<Value = Side> {
    prop_oneof![Just(Side::Buy), Just(Side::Sell)]
}

fn price_strategy() -> impl Strategy<Value = i64> {
    9_900i64..10_100i64
}

fn quantity_strategy() -> impl Strategy<Value = i64> {
    1i64..20i64
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// P4: after any sequence of LIMIT submissions, the book is never crossed.
    #[test]
    fn no_crossed_book(
        orders in prop::collection::vec((side_strategy(), quantity_strategy(), price_strategy()), 1..80)
    ) {
        let engine = MatchingEngine::new();
        for (side, qty, price) in orders {
            engine.submit(SubmitRequest {
                symbol: "BTC-USD".to_string(),
                order_type: OrderType::Limit,
                side,
                quantity: Decimal::new(qty, 0),
                price: Some(Decimal::new(price, 0)),
            });
        }

        let bbo = engine.bbo("BTC-USD").unwrap();
        if let (Some(bid), Some(ask)) = (bbo.best_bid, bbo.best_ask) {
            prop_assert!(bid < ask, "crossed book: bid {bid} >= ask {ask}");
        }
    }

    /// P7: filled_quantity + remaining_quantity == quantity for every report.
    #[test]
    fn quantity_conservation(
        side in side_strategy(),
        qty in quantity_strategy(),
        price in price_strategy(),
    ) {
        let engine = MatchingEngine::new();
        // Seed some contra liquidity so the order has something to chew on.
        engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type: OrderType::Limit,
            side: side.contra(),
            quantity: Decimal::new(qty, 0),
            price: Some(Decimal::new(price, 0)),
        });

        let report = engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type: OrderType::Limit,
            side,
            quantity: Decimal::new(qty, 0),
            price: Some(Decimal::new(price, 0)),
        });

        prop_assert_eq!(
            report.filled_quantity + report.remaining_quantity,
            Decimal::new(qty, 0)
        );
    }

    /// P9: a FOK submission either fills its full quantity or fills nothing at all.
    #[test]
    fn fok_all_or_nothing(
        resting_qty in quantity_strategy(),
        incoming_qty in quantity_strategy(),
        price in price_strategy(),
    ) {
        let engine = MatchingEngine::new();
        engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type: OrderType::Limit,
            side: Side::Sell,
            quantity: Decimal::new(resting_qty, 0),
            price: Some(Decimal::new(price, 0)),
        });

        let report = engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type: OrderType::Fok,
            side: Side::Buy,
            quantity: Decimal::new(incoming_qty, 0),
            price: Some(Decimal::new(price, 0)),
        });

        let full = Decimal::new(incoming_qty, 0);
        prop_assert!(
            report.filled_quantity == full || report.filled_quantity == Decimal::ZERO,
            "FOK partially filled: {} of {}",
            report.filled_quantity,
            full
        );
        if report.filled_quantity == full {
            prop_assert_eq!(report.status, OrderStatus::Filled);
        } else {
            prop_assert_eq!(report.status, OrderStatus::Cancelled);
            prop_assert!(report.trades.is_empty());
        }
    }

    /// P10: IOC and MARKET orders are never left resting — their terminal
    /// status is always Filled or Cancelled, never Pending/Partial.
    #[test]
    fn ioc_and_market_never_rest(
        order_type in prop_oneof![Just(OrderType::Ioc), Just(OrderType::Market)],
        resting_qty in quantity_strategy(),
        incoming_qty in quantity_strategy(),
        price in price_strategy(),
    ) {
        let engine = MatchingEngine::new();
        engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type: OrderType::Limit,
            side: Side::Sell,
            quantity: Decimal::new(resting_qty, 0),
            price: Some(Decimal::new(price, 0)),
        });

        let report = engine.submit(SubmitRequest {
            symbol: "BTC-USD".to_string(),
            order_type,
            side: Side::Buy,
            quantity: Decimal::new(incoming_qty, 0),
            price: if order_type == OrderType::Market { None } else { Some(Decimal::new(price, 0)) },
        });

        prop_assert!(matches!(report.status, OrderStatus::Filled | OrderStatus::Cancelled));
    }

    /// P1/P2 analog: every level a snapshot reports has strictly positive
    /// quantity, and both sides stay sorted best-first.
    #[test]
    fn snapshot_levels_are_nonempty_and_sorted(
        orders in prop::collection::vec((side_strategy(), quantity_strategy(), price_strategy()), 1..80)
    ) {
        let engine = MatchingEngine::new();
        for (side, qty, price) in orders {
            engine.submit(SubmitRequest {
                symbol: "BTC-USD".to_string(),
                order_type: OrderType::Limit,
                side,
                quantity: Decimal::new(qty, 0),
                price: Some(Decimal::new(price, 0)),
            });
        }

        let snapshot = engine.snapshot("BTC-USD", 1000).unwrap();
        for level in snapshot.bids.iter().chain(snapshot.asks.iter()) {
            prop_assert!(level.quantity > Decimal::ZERO, "zero-quantity level at {}", level.price);
        }
        for window in snapshot.bids.windows(2) {
            prop_assert!(window[0].price > window[1].price, "bids not strictly descending");
        }
        for window in snapshot.asks.windows(2) {
            prop_assert!(window[0].price < window[1].price, "asks not strictly ascending");
        }
    }

    /// P8 (conservation form): no order's cumulative matched quantity across
    /// the engine's trade log ever exceeds what it was originally submitted
    /// with, whether it matched as maker or as taker.
    #[test]
    fn trade_log_never_overfills_an_order(
        orders in prop::collection::vec((side_strategy(), quantity_strategy(), price_strategy()), 1..40)
    ) {
        use std::collections::HashMap;

        let engine = MatchingEngine::new();
        let mut original_qty = HashMap::new();
        for (side, qty, price) in orders {
            let report = engine.submit(SubmitRequest {
                symbol: "BTC-USD".to_string(),
                order_type: OrderType::Limit,
                side,
                quantity: Decimal::new(qty, 0),
                price: Some(Decimal::new(price, 0)),
            });
            original_qty.insert(report.order_id, Decimal::new(qty, 0));
        }

        let mut matched: HashMap<_, Decimal> = HashMap::new();
        for trade in engine.trade_log() {
            *matched.entry(trade.maker_order_id).or_insert(Decimal::ZERO) += trade.quantity;
            *matched.entry(trade.taker_order_id).or_insert(Decimal::ZERO) += trade.quantity;
        }

        for (order_id, total) in matched {
            if let Some(qty) = original_qty.get(&order_id) {
                prop_assert!(total <= *qty, "order {order_id} matched {total} > submitted {qty}");
            }
        }
    }
}
