use hermes_core::{Direction, ExecutionLine, ExecutionPlan, OrderId, RestingOrder, Venue, VenueId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request to buy or sell the base asset across all venues
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    /// `buy` or `sell`
    #[serde(alias = "OrderType")]
    pub order_type: String,
    #[serde(alias = "Amount")]
    pub amount: Decimal,
}

/// Empty response body for ping
#[derive(Debug, Clone, Serialize)]
pub struct PingResponse {}

/// Executed plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlanResponse {
    pub direction: Direction,
    pub orders: Vec<ExecutionLineResponse>,
    pub filled: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_revenue: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_price: Option<Decimal>,
}

impl From<&ExecutionPlan> for ExecutionPlanResponse {
    fn from(plan: &ExecutionPlan) -> Self {
        Self {
            direction: plan.direction,
            orders: plan.lines.iter().map(ExecutionLineResponse::from).collect(),
            filled: plan.filled().normalize(),
            total_cost: plan.total_cost().map(|d| d.normalize()),
            total_revenue: plan.total_revenue().map(|d| d.normalize()),
            average_price: plan.average_price().map(|d| d.round_dp(8).normalize()),
        }
    }
}

/// One fill of the executed plan
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionLineResponse {
    pub id: OrderId,
    pub venue_id: VenueId,
    pub exchange_name: String,
    pub amount: Decimal,
    pub price: Decimal,
}

impl From<&ExecutionLine> for ExecutionLineResponse {
    fn from(line: &ExecutionLine) -> Self {
        Self {
            id: line.order_id,
            venue_id: line.venue_id,
            exchange_name: line.venue_name.clone(),
            amount: line.size.normalize(),
            price: line.price.normalize(),
        }
    }
}

/// Venue with its balances and resting orders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueResponse {
    pub id: VenueId,
    pub exchange_name: String,
    pub quote_balance: Decimal,
    pub base_balance: Decimal,
    pub version: u64,
    pub asks: Vec<RestingOrderResponse>,
    pub bids: Vec<RestingOrderResponse>,
}

impl From<&Venue> for VenueResponse {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            exchange_name: venue.name.clone(),
            quote_balance: venue.quote_balance.normalize(),
            base_balance: venue.base_balance.normalize(),
            version: venue.version,
            asks: venue.asks.iter().map(RestingOrderResponse::from).collect(),
            bids: venue.bids.iter().map(RestingOrderResponse::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RestingOrderResponse {
    pub id: OrderId,
    pub price: Decimal,
    pub amount: Decimal,
}

impl From<&RestingOrder> for RestingOrderResponse {
    fn from(order: &RestingOrder) -> Self {
        Self {
            id: order.id,
            price: order.price.normalize(),
            amount: order.remaining.normalize(),
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: i32,
    pub msg: String,
}

impl ErrorResponse {
    pub fn new(code: i32, msg: impl Into<String>) -> Self {
        ErrorResponse {
            code,
            msg: msg.into(),
        }
    }
}
