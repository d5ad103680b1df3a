use std::env;

use crate::services::analytics_service::{
    DEFAULT_LOW_CAPACITY_THRESHOLD, DEFAULT_TOP_SELLING_LIMIT,
};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub top_selling_limit: u64,
    pub low_capacity_threshold: f64,
    /// Customer to profile in the report; skipped when unset.
    pub customer_id: Option<i32>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .ok_or_else(|| anyhow::anyhow!("DATABASE_URL must be set"))?;
        let top_selling_limit = lookup("REPORT_TOP_SELLING_LIMIT")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TOP_SELLING_LIMIT);
        let low_capacity_threshold = lookup("REPORT_LOW_CAPACITY_THRESHOLD")
            .and_then(|v| v.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(DEFAULT_LOW_CAPACITY_THRESHOLD);
        let customer_id = lookup("REPORT_CUSTOMER_ID").and_then(|v| v.parse::<i32>().ok());
        Ok(Self {
            database_url,
            top_selling_limit,
            low_capacity_threshold,
            customer_id,
        })
    }
}
