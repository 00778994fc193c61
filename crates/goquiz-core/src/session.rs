//! In-memory session identity store.

use std::sync::Mutex;

use anyhow::anyhow;

use crate::model::UserRecord;
use crate::traits::SessionStore;

/// A [`SessionStore`] that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    slot: Mutex<Option<UserRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `user`.
    pub fn with_user(user: UserRecord) -> Self {
        Self {
            slot: Mutex::new(Some(user)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> anyhow::Result<Option<UserRecord>> {
        let slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        Ok(slot.clone())
    }

    fn set(&self, user: &UserRecord) -> anyhow::Result<()> {
        let mut slot = self
            .slot
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))?;
        *slot = Some(user.clone());
        Ok(())
    }
}
