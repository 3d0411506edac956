use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::domain::errors::DomainError;
use crate::domain::order::{Order, PricedOrder};
use crate::domain::ports::OrderStore;

/// In-memory order store.
///
/// Intended for tests/dev. Ids are assigned from 1 under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<i64, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> DomainError {
    DomainError::Storage("order store lock poisoned".to_string())
}

impl OrderStore for InMemoryOrderStore {
    fn save(&self, order: PricedOrder) -> Result<Order, DomainError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        let id = orders.keys().next_back().map_or(1, |last| last + 1);
        let order = order.into_order(id);
        orders.insert(id, order.clone());
        Ok(order)
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(&id).cloned())
    }

    fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders
            .values()
            .filter(|o| o.customer.id == customer_id)
            .cloned()
            .collect())
    }
}
