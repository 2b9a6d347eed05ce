//! Unique test data, so tests sharing a store never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// A username no other test will pick.
///
/// ```
/// use backend_test_support::unique_helpers::unique_username;
///
/// let a = unique_username("winters");
/// assert_ne!(a, unique_username("winters"));
/// assert!(a.starts_with("winters-"));
/// ```
pub fn unique_username(prefix: &str) -> String {
    unique_str(prefix).to_lowercase()
}
