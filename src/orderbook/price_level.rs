//! A FIFO queue of resting orders at a single price.

use crate::ids::OrderId;
use crate::orderbook::order::Order;
use rust_decimal::Decimal;
use std::collections::VecDeque;

/// All resting orders at one price, in strict arrival order, plus the
/// running sum of their remaining quantities.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    pub price: Decimal,
    orders: VecDeque<Order>,
    total_quantity: Decimal,
}

impl PriceLevel {
    pub fn new(price: Decimal) -> Self {
        Self {
            price,
            orders: VecDeque::new(),
            total_quantity: Decimal::ZERO,
        }
    }

    /// Adds `order` at the tail. O(1).
    pub fn append(&mut self, order: Order) {
        self.total_quantity += order.remaining_quantity();
        self.orders.push_back(order);
    }

    /// Removes the order with `order_id`, wherever it sits in the queue.
    /// O(k) in level size; cancellation is expected to be rare.
    pub fn remove(&mut self, order_id: OrderId) -> Option<Order> {
        let position = self.orders.iter().position(|o| o.order_id == order_id)?;
        let removed = self.orders.remove(position)?;
        self.total_quantity -= removed.remaining_quantity();
        Some(removed)
    }

    /// Adjusts the aggregate quantity when a resting order is partially
    /// filled in place (the order itself is mutated by the caller).
    pub fn adjust(&mut self, delta: Decimal) {
        self.total_quantity += delta;
    }

    /// The order at the head of the queue, if any.
    pub fn peek_head(&self) -> Option<&Order> {
        self.orders.front()
    }

    /// A mutable reference to the head order, if any.
    pub fn peek_head_mut(&mut self) -> Option<&mut Order> {
        self.orders.front_mut()
    }

    /// Removes and returns the head order.
    pub fn pop_head(&mut self) -> Option<Order> {
        self.orders.pop_front()
    }

    /// True iff the queue is empty or the aggregate quantity has hit zero.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty() || self.total_quantity == Decimal::ZERO
    }

    pub fn total_quantity(&self) -> Decimal {
        self.total_quantity
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }
}
