use crate::{
    error::Result,
    store_client::Item
};

/// Converts non-empty raw records into domain objects. Errors are reserved for malformed
/// records, and pass through the scan iterator unchanged.
pub trait RecordFactory<T> {
    fn create(&self, item: Item) -> Result<T>;
}

impl<T, F> RecordFactory<T> for F
where
    F: Fn(Item) -> Result<T>,
{
    fn create(&self, item: Item) -> Result<T> {
        self(item)
    }
}
