use rand::{SeedableRng, rngs::StdRng};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ticket_analytics::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    seed::generate_sample_data,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ticket_analytics=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    // SEED_RNG pins the generator for reproducible data sets.
    let mut rng = match std::env::var("SEED_RNG").ok().and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let summary = generate_sample_data(&orm, &mut rng).await?;

    println!(
        "Sample data generated: {} organizers, {} users, {} events, {} ticket types, {} orders, {} purchases",
        summary.organizers,
        summary.users,
        summary.events,
        summary.ticket_types,
        summary.orders,
        summary.ticket_purchases
    );
    Ok(())
}
