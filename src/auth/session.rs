use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use rand::{distributions::Alphanumeric, Rng};
use uuid::Uuid;

const TOKEN_LEN: usize = 48;

/// In-memory session store mapping opaque tokens to account ids.
///
/// Owned by `AppState` and passed into handlers with it; sessions do not
/// survive a restart. The lock is never held across an await point.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Uuid>>>,
}

impl SessionStore {
    /// Create a session bound to an account and return its token.
    pub fn issue(&self, account_id: Uuid) -> String {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(TOKEN_LEN)
            .map(char::from)
            .collect();
        self.inner
            .write()
            .expect("session store lock poisoned")
            .insert(token.clone(), account_id);
        token
    }

    /// Resolve a token to the account it was issued for.
    pub fn resolve(&self, token: &str) -> Option<Uuid> {
        self.inner
            .read()
            .expect("session store lock poisoned")
            .get(token)
            .copied()
    }

    /// Destroy a session. Revoking an absent token is a no-op.
    pub fn revoke(&self, token: &str) {
        self.inner
            .write()
            .expect("session store lock poisoned")
            .remove(token);
    }
}
