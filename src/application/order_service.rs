use bigdecimal::BigDecimal;

use crate::domain::errors::DomainError;
use crate::domain::order::{NewOrder, Order, OrderItem, PricedOrder};
use crate::domain::ports::OrderStore;
use crate::domain::pricing;

pub struct OrderService<S> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validate, price and persist a new order.
    ///
    /// The stored total always comes from the pricing engine. Nothing is
    /// persisted when validation fails.
    pub fn create_order(&self, new_order: NewOrder) -> Result<Order, DomainError> {
        if let Err(e) = validate_items(&new_order.order_items) {
            log::warn!(
                "rejected order for customer {}: {}",
                new_order.customer.id,
                e
            );
            return Err(e);
        }

        let pricing = pricing::price_items(&new_order.order_items);
        let priced = PricedOrder {
            customer: new_order.customer,
            order_items: new_order.order_items,
            total: pricing.total,
        };

        let order = self.store.save(priced).inspect_err(|e| {
            log::error!("failed to save order: {}", e);
        })?;

        log::info!(
            "created order {} for customer {}: subtotal={} discount={} total={}",
            order.id,
            order.customer.id,
            pricing.subtotal,
            pricing.discount,
            order.total
        );
        Ok(order)
    }

    pub fn get_order(&self, id: i64) -> Result<Order, DomainError> {
        self.store
            .find_by_id(id)?
            .ok_or(DomainError::NotFound(id))
    }

    /// Orders placed by a customer; empty when there are none.
    pub fn get_orders_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError> {
        self.store.find_by_customer(customer_id)
    }
}

fn validate_items(items: &[OrderItem]) -> Result<(), DomainError> {
    if items.is_empty() {
        return Err(DomainError::Validation(
            "order must contain at least one item".to_string(),
        ));
    }

    let zero = BigDecimal::from(0);
    for (idx, item) in items.iter().enumerate() {
        if item.product.id < 1 {
            return Err(DomainError::Validation(format!(
                "item {idx}: product id must be positive, got {}",
                item.product.id
            )));
        }
        if item.quantity < 1 {
            return Err(DomainError::Validation(format!(
                "item {idx}: quantity must be at least 1, got {}",
                item.quantity
            )));
        }
        if item.product.price < zero {
            return Err(DomainError::Validation(format!(
                "item {idx}: price must not be negative, got {}",
                item.product.price
            )));
        }
    }
    Ok(())
}
