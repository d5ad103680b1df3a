use argon2::{
    Argon2, PasswordHasher,
    password_hash::SaltString,
};
use chrono::{Duration, Utc};
use rand::{Rng, rngs::StdRng, seq::SliceRandom};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};

use crate::{
    entity::{
        Events, Orders, Organizers, TicketPurchases, TicketTypes, Users, events, orders,
        organizers, ticket_purchases, ticket_types, users,
    },
    error::AppResult,
};

/// Shared password of every generated account.
pub const SAMPLE_PASSWORD: &str = "123";

const ORGANIZERS: usize = 3;
const USERS: usize = 10;
const EVENTS: usize = 5;
const TICKET_TYPES_PER_EVENT: usize = 2;
const ORDERS: usize = 30;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub organizers: usize,
    pub users: usize,
    pub events: usize,
    pub ticket_types: usize,
    pub orders: usize,
    pub ticket_purchases: usize,
}

/// Wipe every ticketing table and refill it with random sample data.
///
/// Superusers survive the wipe. Everything runs in one transaction, so this must
/// not be interleaved with readers that expect a stable snapshot.
pub async fn generate_sample_data(
    db: &DatabaseConnection,
    rng: &mut StdRng,
) -> AppResult<SeedSummary> {
    let password_hash = hash_password(SAMPLE_PASSWORD, rng)?;

    let txn = db.begin().await?;
    wipe(&txn).await?;
    let summary = populate(&txn, rng, &password_hash).await?;
    txn.commit().await?;

    tracing::info!(?summary, "sample data generated");
    Ok(summary)
}

async fn wipe<C: ConnectionTrait>(db: &C) -> AppResult<()> {
    // Purchases first: they hold a restricting key on ticket types.
    TicketPurchases::delete_many().exec(db).await?;
    Orders::delete_many().exec(db).await?;
    TicketTypes::delete_many().exec(db).await?;
    Events::delete_many().exec(db).await?;
    Organizers::delete_many().exec(db).await?;
    Users::delete_many()
        .filter(users::Column::IsSuperuser.eq(false))
        .exec(db)
        .await?;
    Ok(())
}

async fn populate<C: ConnectionTrait>(
    db: &C,
    rng: &mut StdRng,
    password_hash: &str,
) -> AppResult<SeedSummary> {
    let now = Utc::now();
    let mut summary = SeedSummary::default();

    let mut organizer_ids = Vec::with_capacity(ORGANIZERS);
    for i in 0..ORGANIZERS {
        let organizer = organizers::ActiveModel {
            name: Set(format!("Organizer {i}")),
            contact_email: Set(format!("organizer{i}@example.com")),
            description: Set(String::new()),
            ..Default::default()
        }
        .insert(db)
        .await?;
        organizer_ids.push(organizer.id);
    }
    summary.organizers = organizer_ids.len();

    let mut user_ids = Vec::with_capacity(USERS);
    for i in 0..USERS {
        let user = users::ActiveModel {
            username: Set(format!("user{i}")),
            email: Set(format!("user{i}@example.com")),
            password_hash: Set(password_hash.to_owned()),
            is_superuser: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(db)
        .await?;
        user_ids.push(user.id);
    }
    summary.users = user_ids.len();

    // (id, price) of every ticket type, for building purchases.
    let mut ticket_types_for_sale: Vec<(i32, i64)> = Vec::new();
    for i in 0..EVENTS {
        let start = now + Duration::days(rng.gen_range(1..=30));
        let organizer_id = *organizer_ids
            .choose(rng)
            .ok_or_else(|| anyhow::anyhow!("no organizers to own events"))?;
        let capacity = match rng.gen_range(0..3) {
            0 => None,
            1 => Some(100),
            _ => Some(200),
        };
        let event = events::ActiveModel {
            name: Set(format!("Event {i}")),
            organizer_id: Set(organizer_id),
            start_time: Set(start),
            end_time: Set(start + Duration::hours(2)),
            location: Set(format!("Location {i}")),
            is_published: Set(true),
            capacity: Set(capacity),
            base_ticket_price: Set(rng.gen_range(10..=100_i64) * 100),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.events += 1;

        for j in 0..TICKET_TYPES_PER_EVENT {
            let ticket_type = ticket_types::ActiveModel {
                event_id: Set(event.id),
                name: Set(format!("Type {j}")),
                price: Set(rng.gen_range(10..=100_i64) * 100),
                quantity_available: Set(rng.gen_range(10..=200)),
                is_active: Set(true),
                ..Default::default()
            }
            .insert(db)
            .await?;
            ticket_types_for_sale.push((ticket_type.id, ticket_type.price));
        }
    }
    summary.ticket_types = ticket_types_for_sale.len();

    for _ in 0..ORDERS {
        // Slot 0 stands for an anonymous checkout, the rest for one user each.
        let customer_id = rng
            .gen_range(0..=user_ids.len())
            .checked_sub(1)
            .map(|i| user_ids[i]);

        let mut lines = Vec::new();
        for _ in 0..rng.gen_range(1..=3) {
            let (ticket_type_id, price) = *ticket_types_for_sale
                .choose(rng)
                .ok_or_else(|| anyhow::anyhow!("no ticket types to sell"))?;
            lines.push((ticket_type_id, rng.gen_range(1..=5_i32), price));
        }
        let total_amount = lines
            .iter()
            .map(|(_, quantity, price)| i64::from(*quantity) * price)
            .sum::<i64>();

        let order = orders::ActiveModel {
            customer_id: Set(customer_id),
            total_amount: Set(total_amount),
            is_paid: Set(rng.gen_bool(0.5)),
            discount_code: Set(None),
            ..Default::default()
        }
        .insert(db)
        .await?;
        summary.orders += 1;

        for (ticket_type_id, quantity, price) in lines {
            ticket_purchases::ActiveModel {
                order_id: Set(order.id),
                ticket_type_id: Set(ticket_type_id),
                quantity: Set(quantity),
                purchase_price_per_unit: Set(price),
                ..Default::default()
            }
            .insert(db)
            .await?;
            summary.ticket_purchases += 1;
        }
    }

    Ok(summary)
}

fn hash_password(password: &str, rng: &mut StdRng) -> AppResult<String> {
    let salt = SaltString::generate(&mut *rng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();
    Ok(hash)
}
