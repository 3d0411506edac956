use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, Order, OrderItem, PricedOrder, Product};
use crate::domain::ports::OrderStore;
use crate::schema::{order_items, orders};

use super::models::{NewOrderItemRow, NewOrderRow, OrderItemRow, OrderRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Row mapping ───────────────────────────────────────────────────────────────

fn to_order(row: OrderRow, items: Vec<OrderItemRow>) -> Order {
    Order {
        id: row.id,
        customer: Customer {
            id: row.customer_id,
            name: row.customer_name,
            email: row.customer_email,
        },
        order_items: items
            .into_iter()
            .map(|i| OrderItem {
                product: Product {
                    id: i.product_id,
                    price: i.unit_price,
                },
                quantity: i.quantity,
            })
            .collect(),
        total: row.total,
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderStore for DieselOrderRepository {
    fn save(&self, order: PricedOrder) -> Result<Order, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Insert the order header; the database assigns the id.
            let row = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    customer_id: order.customer.id,
                    customer_name: order.customer.name.clone(),
                    customer_email: order.customer.email.clone(),
                    total: order.total.clone(),
                })
                .returning(OrderRow::as_returning())
                .get_result(conn)?;

            // 2. Insert items, keeping their submitted sequence in `position`.
            let new_items = order
                .order_items
                .iter()
                .enumerate()
                .map(|(idx, item)| {
                    let position = i32::try_from(idx).map_err(|_| {
                        DomainError::Validation(format!("too many order items ({idx})"))
                    })?;
                    Ok(NewOrderItemRow {
                        order_id: row.id,
                        position,
                        product_id: item.product.id,
                        quantity: item.quantity,
                        unit_price: item.product.price.clone(),
                    })
                })
                .collect::<Result<Vec<_>, DomainError>>()?;
            diesel::insert_into(order_items::table)
                .values(&new_items)
                .execute(conn)?;

            Ok(order.into_order(row.id))
        })
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let order = orders::table
                .filter(orders::id.eq(id))
                .select(OrderRow::as_select())
                .first(conn)
                .optional()?;

            let Some(order) = order else {
                return Ok(None);
            };

            let items = order_items::table
                .filter(order_items::order_id.eq(order.id))
                .order(order_items::position.asc())
                .select(OrderItemRow::as_select())
                .load(conn)?;

            Ok(Some(to_order(order, items)))
        })
    }

    fn find_by_customer(&self, customer_id: i64) -> Result<Vec<Order>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let rows = orders::table
                .filter(orders::customer_id.eq(customer_id))
                .order(orders::id.asc())
                .select(OrderRow::as_select())
                .load(conn)?;

            let items = OrderItemRow::belonging_to(&rows)
                .order(order_items::position.asc())
                .select(OrderItemRow::as_select())
                .load(conn)?;

            Ok(items
                .grouped_by(&rows)
                .into_iter()
                .zip(rows)
                .map(|(items, row)| to_order(row, items))
                .collect())
        })
    }
}
