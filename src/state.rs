use sea_orm::DatabaseConnection;

/// Handle to the relational store, passed explicitly to every query.
#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
}
