use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::entity::{events::Model as EventModel, ticket_types::Model as TicketTypeModel};

/// Scale of every monetary column: amounts are stored as integer cents.
pub const MONEY_SCALE: u32 = 2;

/// Lift a stored minor-unit amount into an exact decimal.
pub fn cents_to_decimal(cents: i64) -> Decimal {
    Decimal::new(cents, MONEY_SCALE)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub id: i32,
    pub name: String,
    pub organizer_id: i32,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: String,
    pub is_published: bool,
    pub capacity: Option<i32>,
    pub base_ticket_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketType {
    pub id: i32,
    pub event_id: i32,
    pub name: String,
    pub price: Decimal,
    pub quantity_available: i32,
    pub is_active: bool,
}

impl From<EventModel> for Event {
    fn from(model: EventModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            organizer_id: model.organizer_id,
            start_time: model.start_time,
            end_time: model.end_time,
            location: model.location,
            is_published: model.is_published,
            capacity: model.capacity,
            base_ticket_price: cents_to_decimal(model.base_ticket_price),
        }
    }
}

impl From<TicketTypeModel> for TicketType {
    fn from(model: TicketTypeModel) -> Self {
        Self {
            id: model.id,
            event_id: model.event_id,
            name: model.name,
            price: cents_to_decimal(model.price),
            quantity_available: model.quantity_available,
            is_active: model.is_active,
        }
    }
}
