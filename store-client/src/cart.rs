//! Shopping cart
//!
//! Owned cart state: a list of (product snapshot, size, quantity) lines.
//! Line identity is the (product id, size) pair — adding the same pair
//! again bumps the quantity. Totals are computed with `Decimal` and only
//! converted to `f64` at the edge.

use crate::{ClientResult, HttpClient};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{Order, OrderCreate, OrderItemCreate, Product};

/// One cart line
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Product snapshot taken when the line was added
    pub product: Product,
    pub size: String,
    pub quantity: i64,
}

/// Shopping cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of (product, size); an existing line is incremented
    pub fn add_item(&mut self, product: Product, size: impl Into<String>) {
        let size = size.into();
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product.id && l.size == size)
        {
            line.quantity += 1;
            return;
        }
        self.lines.push(CartLine {
            product,
            size,
            quantity: 1,
        });
    }

    /// Remove a line entirely
    pub fn remove_item(&mut self, product_id: i64, size: &str) {
        self.lines
            .retain(|l| !(l.product.id == product_id && l.size == size));
    }

    /// Set a line's quantity; zero or less removes the line
    pub fn update_quantity(&mut self, product_id: i64, size: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id, size);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id && l.size == size)
        {
            line.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Total number of units across all lines
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Total price (2 decimal places, half-up)
    pub fn total_price(&self) -> f64 {
        let total: Decimal = self
            .lines
            .iter()
            .map(|l| {
                Decimal::from_f64(l.product.price).unwrap_or_default()
                    * Decimal::from(l.quantity)
            })
            .sum();
        total
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Build the order request, one item per cart line, in line order.
    /// Sizes share one stock counter, so the server does not see them.
    pub fn to_order_request(&self, customer_id: i64) -> OrderCreate {
        OrderCreate {
            customer_id,
            items: self
                .lines
                .iter()
                .map(|l| OrderItemCreate {
                    product_id: l.product.id,
                    quantity: l.quantity,
                })
                .collect(),
        }
    }

    /// Place the order for this cart; the cart is cleared on success
    pub async fn checkout(
        &mut self,
        client: &HttpClient,
        customer_id: i64,
    ) -> ClientResult<Order> {
        let request = self.to_order_request(customer_id);
        let order: Order = client.post("orders", &request).await?;
        self.clear();
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            name: format!("p{id}"),
            description: String::new(),
            price,
            stock: 10,
            sizes: vec!["0-3m".into(), "3-6m".into()],
            image: String::new(),
            category_id: None,
            created_at: 0,
            updated_at: 0,
            category: None,
        }
    }

    #[test]
    fn add_same_product_and_size_increments() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 8000.0), "0-3m");
        cart.add_item(product(1, 8000.0), "0-3m");
        cart.add_item(product(1, 8000.0), "3-6m");

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.total_items(), 3);
    }

    #[test]
    fn update_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10.0), "M");
        cart.update_quantity(1, "M", 5);
        assert_eq!(cart.lines()[0].quantity, 5);

        cart.update_quantity(1, "M", 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_only_matching_size() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 10.0), "M");
        cart.add_item(product(1, 10.0), "L");
        cart.remove_item(1, "M");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].size, "L");
    }

    #[test]
    fn total_price_is_exact() {
        let mut cart = Cart::new();
        cart.add_item(product(1, 0.1), "M");
        cart.update_quantity(1, "M", 3);
        // naive f64 would give 0.30000000000000004
        assert_eq!(cart.total_price(), 0.3);
    }

    #[test]
    fn order_request_preserves_line_order() {
        let mut cart = Cart::new();
        cart.add_item(product(2, 10.0), "M");
        cart.add_item(product(1, 20.0), "L");
        cart.update_quantity(1, "L", 4);

        let request = cart.to_order_request(77);
        assert_eq!(request.customer_id, 77);
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id, 2);
        assert_eq!(request.items[1].product_id, 1);
        assert_eq!(request.items[1].quantity, 4);
    }
}
