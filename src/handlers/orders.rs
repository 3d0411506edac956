use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::domain::errors::DomainError;
use crate::domain::order::{Customer, NewOrder, Order, OrderItem, Product};
use crate::errors::AppError;
use crate::SharedOrderService;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CustomerDto {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A price as sent by the client: either a decimal string ("9.99") or a JSON
/// number. serde_json keeps the literal digits of numbers
/// (`arbitrary_precision`), so they are parsed from the text the client sent.
#[derive(Debug, Clone)]
pub enum PriceInput {
    Text(String),
    Number(serde_json::Number),
}

impl<'de> Deserialize<'de> for PriceInput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::String(s) => Ok(PriceInput::Text(s)),
            Value::Number(n) => Ok(PriceInput::Number(n)),
            other => Err(D::Error::custom(format!(
                "price must be a decimal string or number, got {other}"
            ))),
        }
    }
}

impl PriceInput {
    fn parse(&self) -> Result<BigDecimal, String> {
        let text = match self {
            PriceInput::Text(s) => s.trim().to_string(),
            PriceInput::Number(n) => n.to_string(),
        };
        BigDecimal::from_str(&text).map_err(|e| format!("invalid price '{}': {}", text, e))
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductRequest {
    pub id: i64,
    /// Unit price, e.g. "24.99" or 24.99
    #[schema(value_type = String)]
    pub price: PriceInput,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderItemRequest {
    pub product: ProductRequest,
    pub quantity: i32,
}

/// Server-assigned fields (`id`, `total`) are not part of the request and
/// are ignored if a client sends them.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub customer: CustomerDto,
    pub order_items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProductResponse {
    pub id: i64,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderItemResponse {
    pub product: ProductResponse,
    pub quantity: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub customer: CustomerDto,
    pub order_items: Vec<OrderItemResponse>,
    /// Computed by the server; always at least two decimal places.
    pub total: String,
}

// ── Conversions ──────────────────────────────────────────────────────────────

impl TryFrom<CreateOrderRequest> for NewOrder {
    type Error = DomainError;

    fn try_from(req: CreateOrderRequest) -> Result<Self, Self::Error> {
        let order_items = req
            .order_items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let price = item
                    .product
                    .price
                    .parse()
                    .map_err(|msg| DomainError::Validation(format!("item {idx}: {msg}")))?;
                Ok(OrderItem {
                    product: Product {
                        id: item.product.id,
                        price,
                    },
                    quantity: item.quantity,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(NewOrder {
            customer: Customer {
                id: req.customer.id,
                name: req.customer.name,
                email: req.customer.email,
            },
            order_items,
        })
    }
}

/// Render a total in plain notation with at least two fractional digits.
/// Never rounds.
pub fn format_total(total: &BigDecimal) -> String {
    let (_, scale) = total.as_bigint_and_exponent();
    if scale < 2 {
        total.with_scale(2).to_plain_string()
    } else {
        total.to_plain_string()
    }
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id,
            customer: CustomerDto {
                id: order.customer.id,
                name: order.customer.name,
                email: order.customer.email,
            },
            order_items: order
                .order_items
                .into_iter()
                .map(|i| OrderItemResponse {
                    product: ProductResponse {
                        id: i.product.id,
                        price: i.product.price.to_plain_string(),
                    },
                    quantity: i.quantity,
                })
                .collect(),
            total: format_total(&order.total),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders
///
/// Validates and prices the order, stores it and returns the stored
/// representation with its assigned id and computed total.
#[utoipa::path(
    post,
    path = "/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order created", body = OrderResponse),
        (status = 400, description = "Invalid order"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    service: web::Data<SharedOrderService>,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let new_order = NewOrder::try_from(body.into_inner())?;
    let service = service.into_inner();

    let order = web::block(move || service.create_order(new_order)).await??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /orders/{id}
#[utoipa::path(
    get,
    path = "/orders/{id}",
    params(
        ("id" = i64, Path, description = "Order id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    service: web::Data<SharedOrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let service = service.into_inner();

    let order = web::block(move || service.get_order(order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /orders/customer/{customer_id}
///
/// An unknown customer yields an empty list, not a 404.
#[utoipa::path(
    get,
    path = "/orders/customer/{customer_id}",
    params(
        ("customer_id" = i64, Path, description = "Customer id"),
    ),
    responses(
        (status = 200, description = "Orders placed by the customer", body = Vec<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_orders_by_customer(
    service: web::Data<SharedOrderService>,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let customer_id = path.into_inner();
    let service = service.into_inner();

    let orders = web::block(move || service.get_orders_by_customer(customer_id)).await??;

    let body: Vec<OrderResponse> = orders.into_iter().map(OrderResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
