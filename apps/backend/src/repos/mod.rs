//! Store traits consumed by the unit of work.

pub mod key_value;
pub mod users;

pub use key_value::{KeyValueStore, StoreError};
pub use users::UserStore;
