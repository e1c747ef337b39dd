//! User Data Structure
//!
//! Accounts, roles and the public projection attached to post payloads.

use serde::{Deserialize, Serialize};

/// Account role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Regular member
    #[default]
    Member,
    /// Site administrator
    Admin,
}

impl Role {
    pub fn as_i64(&self) -> i64 {
        match self {
            Role::Member => 0,
            Role::Admin => 1,
        }
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => Role::Admin,
            _ => Role::Member,
        }
    }
}

/// A registered user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct User {
    pub id: i64,
    pub login: String,
    pub email: String,
    /// bcrypt hash, never serialized
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub nickname: String,
    pub avatar: String,
    pub summary: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub silenced: bool,
    pub created_at: i64,
    pub updated_at: i64,
    pub last_login: i64,
}

impl User {
    /// Create a new member account; `id` and timestamps are set by the store
    pub fn new(login: impl Into<String>, email: impl Into<String>, password_hash: impl Into<String>) -> Self {
        let login = login.into();
        Self {
            nickname: login.clone(),
            login,
            email: email.into(),
            password_hash: password_hash.into(),
            ..Default::default()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Silenced users may read but not post
    pub fn is_silenced(&self) -> bool {
        self.silenced
    }

    /// Admins may act on anything; others only on what they authored
    pub fn can_modify(&self, author_id: i64) -> bool {
        self.is_admin() || self.id == author_id
    }
}

/// User fields safe to expose to other users
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub login: String,
    pub nickname: String,
    pub avatar: String,
    pub summary: String,
    pub role: Role,
    pub created_at: i64,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            login: user.login.clone(),
            nickname: user.nickname.clone(),
            avatar: user.avatar.clone(),
            summary: user.summary.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Profile update; `role` and `silenced` are honoured for admins only
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdateUserRequest {
    pub nickname: Option<String>,
    pub avatar: Option<String>,
    pub summary: Option<String>,
    pub role: Option<Role>,
    pub silenced: Option<bool>,
}
