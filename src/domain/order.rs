use bigdecimal::BigDecimal;

/// Snapshot of a product as it was priced when the order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i64,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub product: Product,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// An order as submitted by a caller: no id and no total yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub customer: Customer,
    pub order_items: Vec<OrderItem>,
}

/// A validated order carrying its computed total, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedOrder {
    pub customer: Customer,
    pub order_items: Vec<OrderItem>,
    pub total: BigDecimal,
}

/// A persisted order. Never re-priced after it has been stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: i64,
    pub customer: Customer,
    pub order_items: Vec<OrderItem>,
    pub total: BigDecimal,
}

impl PricedOrder {
    pub fn into_order(self, id: i64) -> Order {
        Order {
            id,
            customer: self.customer,
            order_items: self.order_items,
            total: self.total,
        }
    }
}
