use ntd_core::{Effect, PersistedSession, POLICY_ACCEPTED_KEY, TOKEN_KEY};
use tracing::debug;

use crate::error::Result;
use crate::traits::KeyValueStorage;

/// Reads the token and policy flag written by earlier sessions.
pub fn load_session(storage: &dyn KeyValueStorage) -> Result<PersistedSession> {
    let token = storage.get_item(TOKEN_KEY)?;
    let policy = storage.get_item(POLICY_ACCEPTED_KEY)?;
    Ok(PersistedSession::from_raw(token, policy.as_deref()))
}

pub fn apply_effect(storage: &dyn KeyValueStorage, effect: &Effect) -> Result<()> {
    match effect {
        Effect::Persist { key, value } => {
            debug!(key, "persist");
            storage.set_item(key, value)
        }
        Effect::Remove { key } => {
            debug!(key, "remove");
            storage.remove_item(key)
        }
    }
}
