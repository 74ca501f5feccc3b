//! The core matching loop and FOK liquidity precheck.

use crate::clock::Clock;
use crate::ids::TradeId;
use crate::orderbook::book::OrderBook;
use crate::orderbook::error::OrderBookError;
use crate::orderbook::order::Order;
use crate::orderbook::trade::Trade;
use rust_decimal::Decimal;

/// Whether a resting price is still acceptable to an aggressor carrying an
/// optional limit price. `None` (a MARKET order) accepts every price.
fn price_acceptable(limit: Option<Decimal>, side: crate::orderbook::order::Side, resting_price: Decimal) -> bool {
    match limit {
        None => true,
        Some(limit) => match side {
            crate::orderbook::order::Side::Buy => resting_price <= limit,
            crate::orderbook::order::Side::Sell => resting_price >= limit,
        },
    }
}

/// Runs the matching loop for `taker` against `book`, mutating both in
/// place and returning the trades generated, in execution order.
///
/// Implements §4.E step by step: at each price level, the no-trade-through
/// test stops the loop the first time the best remaining contra price falls
/// outside the taker's limit (or immediately, for a taker with no
/// liquidity left to take). Within a level, resting orders fill in strict
/// FIFO order. The trade price is always the resting order's price, so
/// price improvement always accrues to the taker.
pub fn match_order(
    book: &mut OrderBook,
    taker: &mut Order,
    clock: &Clock,
) -> Result<Vec<Trade>, OrderBookError> {
    let mut trades = Vec::new();

    while taker.remaining_quantity() > Decimal::ZERO {
        let Some(price) = book.best_contra_price(taker.side) else {
            break;
        };
        if !price_acceptable(taker.price, taker.side, price) {
            break;
        }

        loop {
            if taker.remaining_quantity() == Decimal::ZERO {
                break;
            }
            let Some(level) = book.contra_level_mut(taker.side, price) else {
                break;
            };
            if level.is_empty() {
                break;
            }

            let (maker_order_id, head_remaining) = {
                let head = level.peek_head().expect("level non-empty");
                (head.order_id, head.remaining_quantity())
            };
            let fill = taker.remaining_quantity().min(head_remaining);

            taker.apply_fill(fill)?;
            let head_now_empty = {
                let head = level.peek_head_mut().expect("level non-empty");
                head.apply_fill(fill)?;
                head.remaining_quantity() == Decimal::ZERO
            };

            let trade = Trade::new(
                TradeId::new(),
                book.symbol.clone(),
                price,
                fill,
                clock.next(),
                taker.side,
                maker_order_id,
                taker.order_id,
            );

            book.update_after_partial_fill(taker.side.contra(), price, fill, head_now_empty)?;
            trades.push(trade);
        }
    }

    Ok(trades)
}

/// Walks the contra side from best price outward, accumulating quantity at
/// each level acceptable to `limit`, and returns `true` as soon as the
/// running total reaches `required`. Levels outside the price window are
/// not counted. Read-only: mutates nothing.
pub fn has_sufficient_liquidity(
    book: &OrderBook,
    side: crate::orderbook::order::Side,
    limit: Option<Decimal>,
    required: Decimal,
) -> bool {
    let contra = book.contra_map(side);
    let levels: Box<dyn Iterator<Item = (&Decimal, &crate::orderbook::price_level::PriceLevel)>> =
        match side {
            crate::orderbook::order::Side::Buy => Box::new(contra.iter()),
            crate::orderbook::order::Side::Sell => Box::new(contra.iter().rev()),
        };

    let mut accumulated = Decimal::ZERO;
    for (price, level) in levels {
        if !price_acceptable(limit, side, *price) {
            break;
        }
        accumulated += level.total_quantity();
        if accumulated >= required {
            return true;
        }
    }
    false
}
