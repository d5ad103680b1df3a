use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_analytics::{
    config::AppConfig,
    db::create_orm_conn,
    dto::analytics::{CustomerStats, EventSummary, LowCapacityEvent, TicketTypeRanking},
    services::analytics_service,
    state::AppState,
};

#[derive(Serialize)]
struct Report {
    upcoming_events: Vec<EventSummary>,
    top_selling_ticket_types: Vec<TicketTypeRanking>,
    low_capacity_events: Vec<LowCapacityEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer: Option<CustomerStats>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticket_analytics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::from_env()?;
    let state = AppState {
        orm: create_orm_conn(&config.database_url).await?,
    };

    let upcoming_events = analytics_service::get_upcoming_events_summary(&state).await?;
    let top_selling_ticket_types =
        analytics_service::get_top_selling_ticket_types(&state, config.top_selling_limit).await?;
    let low_capacity_events = analytics_service::get_events_with_low_capacity_remaining(
        &state,
        config.low_capacity_threshold,
    )
    .await?;
    let customer = match config.customer_id {
        Some(id) => {
            let stats = analytics_service::get_customer_purchase_statistics(&state, id).await?;
            if stats.is_none() {
                tracing::warn!(customer_id = id, "no such customer");
            }
            stats
        }
        None => None,
    };

    let report = Report {
        upcoming_events,
        top_selling_ticket_types,
        low_capacity_events,
        customer,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
