use sqlx::FromRow;
use thiserror::Error as ThisError;

/// Model errors
#[derive(Debug, Clone, ThisError)]
pub enum QueryError {
    #[error("Not found")]
    NotFound,
}

#[derive(Debug, Clone, FromRow)]
pub struct Id<T> {
    pub id: T,
}
