use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Event, TicketType};

/// Sales overview of one published, not yet finished event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventSummary {
    pub event_id: i32,
    pub event_name: String,
    pub total_tickets_sold: i64,
    pub total_revenue: Decimal,
    pub total_available: i64,
    pub tickets_remaining: i64,
    /// Empty when the organizer row is missing.
    pub organizer_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketTypeRanking {
    #[serde(flatten)]
    pub ticket_type: TicketType,
    pub event_name: String,
    pub units_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerStats {
    pub customer_id: i32,
    pub username: String,
    pub total_orders_placed: u64,
    pub total_amount_spent: Decimal,
    pub most_purchased_event_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LowCapacityEvent {
    #[serde(flatten)]
    pub event: Event,
    pub tickets_sold: i64,
    /// Negative when the event is oversold.
    pub percentage_tickets_remaining: f64,
}
