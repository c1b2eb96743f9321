use crate::domain::entities::Quote;
use crate::application::errors::StorageError;

/// Store trait - abstraction for quote persistence
pub trait QuoteStore: Send + Sync {
    /// Insert a quote and return it with its assigned id
    fn insert(&self, name: &str, text: &str) -> Result<Quote, StorageError>;

    /// One quote chosen uniformly at random, `None` when the table is empty
    fn random(&self) -> Result<Option<Quote>, StorageError>;

    /// One random quote attributed to exactly `name`
    fn random_by_name(&self, name: &str) -> Result<Option<Quote>, StorageError>;

    fn count(&self) -> Result<i64, StorageError>;
}
