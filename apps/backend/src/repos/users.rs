//! User persistence.

use super::key_value::{KeyValueStore, StoreError};
use crate::domain::{User, UserId};

/// Store of users, with a lookup by username.
///
/// The default lookup scans every user; adapters with an index should
/// override it.
pub trait UserStore: KeyValueStore<UserId, User> {
    fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .find_all()?
            .into_iter()
            .find(|user| user.username == username))
    }
}
