use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::{Alias, Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait,
};

use crate::{
    dto::analytics::{CustomerStats, EventSummary, LowCapacityEvent, TicketTypeRanking},
    entity::{
        events::{Column as EventCol, Entity as Events},
        orders::{Column as OrderCol, Entity as Orders},
        organizers::Entity as Organizers,
        ticket_purchases::{self, Column as PurchaseCol, Entity as TicketPurchases},
        ticket_types::{self, Column as TicketTypeCol, Entity as TicketTypes},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    models::{TicketType, cents_to_decimal},
    state::AppState,
};

pub const DEFAULT_TOP_SELLING_LIMIT: u64 = 5;
pub const DEFAULT_LOW_CAPACITY_THRESHOLD: f64 = 10.0;

/// Summaries for every published event that has not ended yet, ordered by event id.
///
/// Only paid orders count towards sold tickets and revenue. Remaining tickets are
/// measured against the event capacity when set, otherwise against the summed
/// stock of its ticket types, and never drop below zero.
pub async fn get_upcoming_events_summary(state: &AppState) -> AppResult<Vec<EventSummary>> {
    let now = Utc::now();
    let events = Events::find()
        .find_also_related(Organizers)
        .filter(EventCol::IsPublished.eq(true))
        .filter(EventCol::EndTime.gte(now))
        .order_by_asc(EventCol::Id)
        .all(&state.orm)
        .await?;

    let event_ids: Vec<i32> = events.iter().map(|(event, _)| event.id).collect();
    let sales = paid_sales_by_event(state, &event_ids).await?;
    let stock = ticket_stock_by_event(state, &event_ids).await?;

    let summaries: Vec<EventSummary> = events
        .into_iter()
        .map(|(event, organizer)| {
            let sold = sales.get(&event.id).copied().unwrap_or_default();
            let total_available = stock.get(&event.id).copied().unwrap_or(0);
            EventSummary {
                event_id: event.id,
                event_name: event.name,
                total_tickets_sold: sold.tickets_sold,
                total_revenue: cents_to_decimal(sold.revenue),
                total_available,
                tickets_remaining: tickets_remaining(
                    event.capacity,
                    total_available,
                    sold.tickets_sold,
                ),
                organizer_name: organizer.map(|o| o.name).unwrap_or_default(),
            }
        })
        .collect();

    tracing::debug!(events = summaries.len(), "upcoming events summarised");
    Ok(summaries)
}

/// Ticket types ranked by units sold on paid orders.
///
/// Ties are broken by ticket type id, lowest first. Types that never sold rank
/// after every type that did.
pub async fn get_top_selling_ticket_types(
    state: &AppState,
    limit: u64,
) -> AppResult<Vec<TicketTypeRanking>> {
    #[derive(Debug, FromQueryResult)]
    struct TicketTypeSalesRow {
        id: i32,
        event_id: i32,
        name: String,
        price: i64,
        quantity_available: i32,
        is_active: bool,
        event_name: String,
        units_sold: i64,
    }

    let rows = TicketTypes::find()
        .select_only()
        .columns([
            TicketTypeCol::Id,
            TicketTypeCol::EventId,
            TicketTypeCol::Name,
            TicketTypeCol::Price,
            TicketTypeCol::QuantityAvailable,
            TicketTypeCol::IsActive,
        ])
        .column_as(EventCol::Name, "event_name")
        .column_as(sum_or_zero(paid_quantity()), "units_sold")
        .join(JoinType::InnerJoin, ticket_types::Relation::Events.def())
        .join(JoinType::LeftJoin, ticket_types::Relation::TicketPurchases.def())
        .join(JoinType::LeftJoin, ticket_purchases::Relation::Orders.def())
        .group_by(TicketTypeCol::Id)
        .group_by(EventCol::Name)
        .order_by_desc(SimpleExpr::from(Expr::col(Alias::new("units_sold"))))
        .order_by_asc(TicketTypeCol::Id)
        .limit(limit)
        .into_model::<TicketTypeSalesRow>()
        .all(&state.orm)
        .await?;

    let rankings: Vec<TicketTypeRanking> = rows
        .into_iter()
        .map(|row| TicketTypeRanking {
            ticket_type: TicketType {
                id: row.id,
                event_id: row.event_id,
                name: row.name,
                price: cents_to_decimal(row.price),
                quantity_available: row.quantity_available,
                is_active: row.is_active,
            },
            event_name: row.event_name,
            units_sold: row.units_sold,
        })
        .collect();

    tracing::debug!(limit, returned = rankings.len(), "top selling ticket types ranked");
    Ok(rankings)
}

/// Order and spending statistics for one customer, or `None` if the user does not exist.
pub async fn get_customer_purchase_statistics(
    state: &AppState,
    customer_id: i32,
) -> AppResult<Option<CustomerStats>> {
    let Some(customer) = Users::find_by_id(customer_id).one(&state.orm).await? else {
        tracing::debug!(customer_id, "customer not found");
        return Ok(None);
    };

    let total_orders_placed = Orders::find()
        .filter(OrderCol::CustomerId.eq(customer_id))
        .count(&state.orm)
        .await?;

    let amount_spent: Option<i64> = Orders::find()
        .select_only()
        .column_as(
            sum_or_zero(Expr::col((Orders, OrderCol::TotalAmount))),
            "total_amount_spent",
        )
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::IsPaid.eq(true))
        .into_tuple()
        .one(&state.orm)
        .await?;

    // Grouped per event id, so namesakes stay apart; ties go to the older event.
    let favourite: Option<(String, i64)> = TicketPurchases::find()
        .select_only()
        .column(EventCol::Name)
        .column_as(
            sum_or_zero(Expr::col((TicketPurchases, PurchaseCol::Quantity))),
            "total_quantity",
        )
        .join(JoinType::InnerJoin, ticket_purchases::Relation::Orders.def())
        .join(JoinType::InnerJoin, ticket_purchases::Relation::TicketTypes.def())
        .join(JoinType::InnerJoin, ticket_types::Relation::Events.def())
        .filter(OrderCol::CustomerId.eq(customer_id))
        .filter(OrderCol::IsPaid.eq(true))
        .group_by(EventCol::Id)
        .group_by(EventCol::Name)
        .order_by_desc(SimpleExpr::from(Expr::col(Alias::new("total_quantity"))))
        .order_by_asc(EventCol::Id)
        .into_tuple()
        .one(&state.orm)
        .await?;

    let stats = CustomerStats {
        customer_id: customer.id,
        username: customer.username,
        total_orders_placed,
        total_amount_spent: cents_to_decimal(amount_spent.unwrap_or(0)),
        most_purchased_event_name: favourite.map(|(name, _)| name),
    };

    tracing::debug!(
        customer_id,
        orders = stats.total_orders_placed,
        "customer statistics computed"
    );
    Ok(Some(stats))
}

/// Events with a capacity whose remaining share is at or below `threshold_percentage`.
///
/// The percentage is not clamped: an oversold event reports a negative value.
/// Events without a capacity, or with a capacity of zero, have no percentage and
/// are left out.
pub async fn get_events_with_low_capacity_remaining(
    state: &AppState,
    threshold_percentage: f64,
) -> AppResult<Vec<LowCapacityEvent>> {
    if !threshold_percentage.is_finite() {
        return Err(AppError::InvalidArgument(format!(
            "threshold_percentage must be finite, got {threshold_percentage}"
        )));
    }

    let events = Events::find()
        .filter(EventCol::Capacity.is_not_null())
        .order_by_asc(EventCol::Id)
        .all(&state.orm)
        .await?;

    let event_ids: Vec<i32> = events.iter().map(|event| event.id).collect();
    let sales = paid_sales_by_event(state, &event_ids).await?;

    let low: Vec<LowCapacityEvent> = events
        .into_iter()
        .filter_map(|event| {
            let capacity = event.capacity?;
            let tickets_sold = sales.get(&event.id).map_or(0, |s| s.tickets_sold);
            let percentage = percentage_remaining(capacity, tickets_sold)?;
            (percentage <= threshold_percentage).then(|| LowCapacityEvent {
                event: event.into(),
                tickets_sold,
                percentage_tickets_remaining: percentage,
            })
        })
        .collect();

    tracing::debug!(
        threshold_percentage,
        events = low.len(),
        "low capacity events found"
    );
    Ok(low)
}

/// Tickets still sellable, floored at zero.
pub fn tickets_remaining(capacity: Option<i32>, total_available: i64, tickets_sold: i64) -> i64 {
    let ceiling = capacity.map_or(total_available, i64::from);
    (ceiling - tickets_sold).max(0)
}

/// `100 * (capacity - sold) / capacity` in real arithmetic; `None` for a zero capacity.
pub fn percentage_remaining(capacity: i32, tickets_sold: i64) -> Option<f64> {
    if capacity == 0 {
        return None;
    }
    let capacity = f64::from(capacity);
    Some(100.0 * (capacity - tickets_sold as f64) / capacity)
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
struct EventSales {
    tickets_sold: i64,
    /// Minor units.
    revenue: i64,
}

/// Paid ticket count and revenue per event. Events without paid sales are absent.
async fn paid_sales_by_event(
    state: &AppState,
    event_ids: &[i32],
) -> AppResult<HashMap<i32, EventSales>> {
    if event_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i64, i64)> = TicketPurchases::find()
        .select_only()
        .column(TicketTypeCol::EventId)
        .column_as(
            sum_or_zero(Expr::col((TicketPurchases, PurchaseCol::Quantity))),
            "tickets_sold",
        )
        .column_as(sum_or_zero(purchase_revenue()), "revenue")
        .join(JoinType::InnerJoin, ticket_purchases::Relation::TicketTypes.def())
        .join(JoinType::InnerJoin, ticket_purchases::Relation::Orders.def())
        .filter(OrderCol::IsPaid.eq(true))
        .filter(TicketTypeCol::EventId.is_in(event_ids.iter().copied()))
        .group_by(TicketTypeCol::EventId)
        .into_tuple()
        .all(&state.orm)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(event_id, tickets_sold, revenue)| {
            (
                event_id,
                EventSales {
                    tickets_sold,
                    revenue,
                },
            )
        })
        .collect())
}

/// Summed `quantity_available` of each event's ticket types.
async fn ticket_stock_by_event(
    state: &AppState,
    event_ids: &[i32],
) -> AppResult<HashMap<i32, i64>> {
    if event_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i32, i64)> = TicketTypes::find()
        .select_only()
        .column(TicketTypeCol::EventId)
        .column_as(
            sum_or_zero(Expr::col((TicketTypes, TicketTypeCol::QuantityAvailable))),
            "total_available",
        )
        .filter(TicketTypeCol::EventId.is_in(event_ids.iter().copied()))
        .group_by(TicketTypeCol::EventId)
        .into_tuple()
        .all(&state.orm)
        .await?;

    Ok(rows.into_iter().collect())
}

/// `CAST(COALESCE(SUM(expr), 0) AS int8)`.
///
/// Postgres widens SUM over BIGINT to NUMERIC; the cast keeps every aggregate a
/// 64-bit integer on each backend.
fn sum_or_zero(expr: impl Into<SimpleExpr>) -> SimpleExpr {
    Func::cast_as(
        Func::coalesce([SimpleExpr::from(Func::sum(expr)), Expr::val(0).into()]),
        Alias::new("int8"),
    )
    .into()
}

/// A purchase's quantity when its order is paid, zero otherwise (including no order at all).
fn paid_quantity() -> SimpleExpr {
    Expr::case(
        Expr::col((Orders, OrderCol::IsPaid)).eq(true),
        Expr::col((TicketPurchases, PurchaseCol::Quantity)),
    )
    .finally(Expr::val(0))
    .into()
}

/// `COALESCE(quantity, 0) * COALESCE(purchase_price_per_unit, 0)`.
fn purchase_revenue() -> SimpleExpr {
    let quantity = Func::coalesce([
        SimpleExpr::from(Expr::col((TicketPurchases, PurchaseCol::Quantity))),
        Expr::val(0).into(),
    ]);
    let unit_price = Func::coalesce([
        SimpleExpr::from(Expr::col((TicketPurchases, PurchaseCol::PurchasePricePerUnit))),
        Expr::val(0).into(),
    ]);
    Expr::expr(quantity).mul(unit_price)
}
