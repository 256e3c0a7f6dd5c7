use serde::{Deserialize, Serialize};

use super::RecordId;

/// Account status shown on the users tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserStatus {
    Active,
    Block,
}

/// Represents a registered customer account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub username: String,
    pub customer_id: String,
    pub phone: String,
    pub status: UserStatus,
    /// Epoch seconds.
    pub created_at: i64,
}

/// Payload for editing an existing user.
///
/// Absent fields are left out of the request body and keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "customerId", skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<RecordId>,
        username: impl Into<String>,
        customer_id: impl Into<String>,
        phone: impl Into<String>,
        status: UserStatus,
        created_at: i64,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            customer_id: customer_id.into(),
            phone: phone.into(),
            status,
            created_at,
        }
    }

    pub fn is_blocked(&self) -> bool {
        self.status == UserStatus::Block
    }
}

impl UserUpdate {
    /// Edit form pre-filled with the user's current values.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: Some(user.username.clone()),
            customer_id: Some(user.customer_id.clone()),
            phone: Some(user.phone.clone()),
        }
    }
}
