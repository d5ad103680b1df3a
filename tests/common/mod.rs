#![allow(dead_code)]

use chrono::{Duration, Utc};
use sea_orm::{ActiveModelTrait, Set};
use ticket_analytics::{
    db::{create_orm_conn, run_migrations},
    entity::{events, orders, organizers, ticket_purchases, ticket_types, users},
    state::AppState,
};

/// Fresh, migrated in-memory store. Every test gets its own.
pub async fn setup_state() -> anyhow::Result<AppState> {
    let orm = create_orm_conn("sqlite::memory:").await?;
    run_migrations(&orm).await?;
    Ok(AppState { orm })
}

pub async fn create_user(state: &AppState, username: &str) -> anyhow::Result<i32> {
    create_account(state, username, false).await
}

pub async fn create_superuser(state: &AppState, username: &str) -> anyhow::Result<i32> {
    create_account(state, username, true).await
}

async fn create_account(state: &AppState, username: &str, is_superuser: bool) -> anyhow::Result<i32> {
    let user = users::ActiveModel {
        username: Set(username.to_string()),
        email: Set(format!("{username}@example.com")),
        password_hash: Set("dummy".into()),
        is_superuser: Set(is_superuser),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

pub async fn create_organizer(state: &AppState, name: &str) -> anyhow::Result<i32> {
    let organizer = organizers::ActiveModel {
        name: Set(name.to_string()),
        contact_email: Set("events@example.com".into()),
        description: Set(String::new()),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(organizer.id)
}

/// Published event a week from now.
pub async fn create_event(
    state: &AppState,
    organizer_id: i32,
    name: &str,
    capacity: Option<i32>,
) -> anyhow::Result<i32> {
    create_event_at(state, organizer_id, name, capacity, true, Duration::days(7)).await
}

/// Event lasting two hours from `now + starts_in`.
pub async fn create_event_at(
    state: &AppState,
    organizer_id: i32,
    name: &str,
    capacity: Option<i32>,
    is_published: bool,
    starts_in: Duration,
) -> anyhow::Result<i32> {
    let start = Utc::now() + starts_in;
    let event = events::ActiveModel {
        name: Set(name.to_string()),
        organizer_id: Set(organizer_id),
        start_time: Set(start),
        end_time: Set(start + Duration::hours(2)),
        location: Set("Main Hall".into()),
        is_published: Set(is_published),
        capacity: Set(capacity),
        base_ticket_price: Set(2_000),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(event.id)
}

pub async fn create_ticket_type(
    state: &AppState,
    event_id: i32,
    name: &str,
    price: i64,
    quantity_available: i32,
) -> anyhow::Result<i32> {
    let ticket_type = ticket_types::ActiveModel {
        event_id: Set(event_id),
        name: Set(name.to_string()),
        price: Set(price),
        quantity_available: Set(quantity_available),
        is_active: Set(true),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(ticket_type.id)
}

pub async fn create_order(
    state: &AppState,
    customer_id: Option<i32>,
    is_paid: bool,
    total_amount: i64,
) -> anyhow::Result<i32> {
    let order = orders::ActiveModel {
        customer_id: Set(customer_id),
        total_amount: Set(total_amount),
        is_paid: Set(is_paid),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(order.id)
}

pub async fn add_purchase(
    state: &AppState,
    order_id: i32,
    ticket_type_id: i32,
    quantity: i32,
    price_per_unit: i64,
) -> anyhow::Result<i32> {
    let purchase = ticket_purchases::ActiveModel {
        order_id: Set(order_id),
        ticket_type_id: Set(ticket_type_id),
        quantity: Set(quantity),
        purchase_price_per_unit: Set(price_per_unit),
        ..Default::default()
    }
    .insert(&state.orm)
    .await?;
    Ok(purchase.id)
}

/// One order holding a single purchase line; returns the order id.
pub async fn sell(
    state: &AppState,
    customer_id: Option<i32>,
    is_paid: bool,
    ticket_type_id: i32,
    quantity: i32,
    price_per_unit: i64,
) -> anyhow::Result<i32> {
    let order_id = create_order(
        state,
        customer_id,
        is_paid,
        i64::from(quantity) * price_per_unit,
    )
    .await?;
    add_purchase(state, order_id, ticket_type_id, quantity, price_per_unit).await?;
    Ok(order_id)
}
