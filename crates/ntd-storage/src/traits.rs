use crate::error::Result;

/// String key/value storage that outlives the process, in the manner of a
/// browser's `localStorage`. Every call is synchronous.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Inserts or overwrites `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    fn keys(&self) -> Result<Vec<String>>;

    fn clear(&self) -> Result<()>;
}
