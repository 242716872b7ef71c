pub mod coupons;
pub mod models;
pub mod pool;
pub mod products;
pub mod reviews;
pub mod schema;
pub mod users;

use thiserror::Error;
use uuid::Uuid;

/// Errors from the storage layer
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid document id: {0}")]
    InvalidId(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Parse an opaque document identifier. Malformed ids are a client error, not
/// a server fault.
pub fn parse_id(value: &str) -> Result<Uuid, StoreError> {
    Uuid::parse_str(value).map_err(|_| StoreError::InvalidId(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_malformed_id() {
        assert!(matches!(parse_id("not-a-uuid"), Err(StoreError::InvalidId(_))));
        assert!(matches!(parse_id(""), Err(StoreError::InvalidId(_))));
    }
}
