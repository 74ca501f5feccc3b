//! Serialize/re-parse round-trip checks for the external value types named in
//! the round-trip/idempotence testable properties: Order spec, Trade, BBO,
//! and Snapshot.

use chrono::Utc;
use crypto_match_engine::{
    Bbo, Order, OrderBookSnapshot, OrderId, OrderStatus, OrderType, Side, SubmitRequest, Trade,
    TradeId,
};
use rust_decimal::Decimal;

#[test]
fn order_spec_round_trips() {
    let request = SubmitRequest {
        symbol: "BTC-USD".to_string(),
        order_type: OrderType::Limit,
        side: Side::Buy,
        quantity: Decimal::new(15, 1),
        price: Some(Decimal::new(50_000, 0)),
    };

    let json = serde_json::to_string(&request).unwrap();
    let parsed: SubmitRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(request, parsed);

    // A MARKET order spec carries no price.
    let market = SubmitRequest {
        symbol: "ETH-USD".to_string(),
        order_type: OrderType::Market,
        side: Side::Sell,
        quantity: Decimal::new(2, 0),
        price: None,
    };
    let json = serde_json::to_string(&market).unwrap();
    let parsed: SubmitRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(market, parsed);
}

#[test]
fn order_round_trips() {
    let order = Order::new(
        OrderId::new(),
        "BTC-USD",
        OrderType::Limit,
        Side::Buy,
        Decimal::new(1, 0),
        Some(Decimal::new(50_000, 0)),
        Utc::now(),
    )
    .unwrap();

    let json = serde_json::to_string(&order).unwrap();
    let parsed: Order = serde_json::from_str(&json).unwrap();
    assert_eq!(order, parsed);
    assert_eq!(parsed.status, OrderStatus::Pending);
}

#[test]
fn trade_round_trips() {
    let trade = Trade::new(
        TradeId::new(),
        "BTC-USD",
        Decimal::new(50_000, 0),
        Decimal::new(1, 0),
        Utc::now(),
        Side::Buy,
        OrderId::new(),
        OrderId::new(),
    );

    let json = serde_json::to_string(&trade).unwrap();
    let parsed: Trade = serde_json::from_str(&json).unwrap();
    assert_eq!(trade, parsed);
}

#[test]
fn bbo_round_trips() {
    let bbo = Bbo {
        symbol: "BTC-USD".to_string(),
        best_bid: Some(Decimal::new(49_999, 0)),
        best_bid_quantity: Some(Decimal::new(3, 0)),
        best_ask: Some(Decimal::new(50_001, 0)),
        best_ask_quantity: Some(Decimal::new(2, 0)),
        timestamp: Utc::now(),
    };

    let json = serde_json::to_string(&bbo).unwrap();
    let parsed: Bbo = serde_json::from_str(&json).unwrap();
    assert_eq!(bbo, parsed);

    // An empty half of the book serializes its `None`s faithfully too.
    let empty_side = Bbo {
        symbol: "BTC-USD".to_string(),
        best_bid: None,
        best_bid_quantity: None,
        best_ask: Some(Decimal::new(50_001, 0)),
        best_ask_quantity: Some(Decimal::new(2, 0)),
        timestamp: Utc::now(),
    };
    let json = serde_json::to_string(&empty_side).unwrap();
    let parsed: Bbo = serde_json::from_str(&json).unwrap();
    assert_eq!(empty_side, parsed);
}

#[test]
fn snapshot_round_trips() {
    let engine = crypto_match_engine::MatchingEngine::new();
    engine.submit(SubmitRequest {
        symbol: "BTC-USD".to_string(),
        order_type: OrderType::Limit,
        side: Side::Buy,
        quantity: Decimal::new(1, 0),
        price: Some(Decimal::new(49_900, 0)),
    });
    engine.submit(SubmitRequest {
        symbol: "BTC-USD".to_string(),
        order_type: OrderType::Limit,
        side: Side::Sell,
        quantity: Decimal::new(2, 0),
        price: Some(Decimal::new(50_100, 0)),
    });

    let snapshot: OrderBookSnapshot = engine.snapshot("BTC-USD", 10).unwrap();
    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: OrderBookSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, parsed);
}
