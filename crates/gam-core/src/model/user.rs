// ── User domain types ──

use serde::{Deserialize, Serialize};

/// A console operator account. Username is immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Privilege level 0-15 (15 = full administrative access).
    pub privilege: u8,
    pub enabled: bool,
    pub session_timeout_secs: Option<u32>,
}

impl User {
    pub const MAX_PRIVILEGE: u8 = 15;

    pub fn is_admin(&self) -> bool {
        self.privilege == Self::MAX_PRIVILEGE
    }
}
