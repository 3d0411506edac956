use std::sync::Arc;

use super::errors::DomainError;
use super::order::{Order, PricedOrder};

/// Persistence gateway for priced orders.
///
/// `save` must assign the id atomically; later `find_*` calls observe the
/// saved state.
pub trait OrderStore: Send + Sync + 'static {
    fn save(&self, order: PricedOrder) -> Result<Order, DomainError>;
    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError>;
    fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError>;
}

impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    fn save(&self, order: PricedOrder) -> Result<Order, DomainError> {
        (**self).save(order)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        (**self).find_by_id(id)
    }

    fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError> {
        (**self).find_by_customer(customer_id)
    }
}
