use core::str::FromStr;

use chrono::{DateTime, Utc};

use storefront_core::{DomainError, DomainResult, Money, OrderId, ProductId, UserId};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Shipped,
    Cancelled,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "shipped" => Ok(OrderStatus::Shipped),
            "cancelled" => Ok(OrderStatus::Cancelled),
            other => Err(DomainError::validation(format!(
                "status must be one of pending, paid, shipped, cancelled (got {other})"
            ))),
        }
    }
}

/// One line of an order.
///
/// `unit_price` is the discounted price captured at order time; later price
/// or discount edits never reprice a placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Money,
}

impl OrderItem {
    /// Unit price times quantity; a quantity large enough to overflow the
    /// cents representation is a validation failure, not a wrap.
    pub fn line_total(&self) -> DomainResult<Money> {
        self.unit_price
            .checked_multiply_quantity(self.quantity)
            .ok_or_else(|| DomainError::validation("order line total is too large"))
    }
}

/// A stored order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub id: OrderId,
    pub user_id: UserId,
    pub items: Vec<OrderItem>,
    pub total: Money,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl OrderRecord {
    pub fn new(user_id: UserId, items: Vec<OrderItem>) -> DomainResult<Self> {
        let mut total = Money::zero();
        for item in &items {
            total = total
                .checked_add(item.line_total()?)
                .ok_or_else(|| DomainError::validation("order total is too large"))?;
        }
        Ok(Self {
            id: OrderId::new(),
            user_id,
            items,
            total,
            status: OrderStatus::default(),
            created_at: Utc::now(),
        })
    }
}
