//! User model

use std::fmt;

use serde::{Deserialize, Serialize};

/// A user in the credential table.
///
/// The password is stored in plain text because the credential table has
/// always been a static list compared verbatim at login.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub is_admin: bool,
    /// `false` marks a soft-deleted user
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    /// Descriptive text, usually `YYYY-MM-DD`; never parsed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub join_date: Option<String>,
}

const fn default_active() -> bool {
    true
}

impl User {
    /// Create an active, non-admin user whose username is its id
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            username: id.clone(),
            id,
            name: name.into(),
            password: password.into(),
            is_admin: false,
            is_active: true,
            department: None,
            position: None,
            join_date: None,
        }
    }

    /// Copy without the credential, safe to persist as the session user
    #[must_use]
    pub fn without_password(&self) -> Self {
        Self {
            password: String::new(),
            ..self.clone()
        }
    }

    /// Active and not an administrator
    #[must_use]
    pub const fn is_active_staff(&self) -> bool {
        self.is_active && !self.is_admin
    }
}

impl fmt::Debug for User {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("User")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("is_admin", &self.is_admin)
            .field("is_active", &self.is_active)
            .field("department", &self.department)
            .field("position", &self.position)
            .field("join_date", &self.join_date)
            .finish()
    }
}

/// Partial update; only `Some` fields are applied
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
    pub is_active: Option<bool>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub join_date: Option<String>,
}

impl UserUpdate {
    /// Apply the provided fields to `user` in place
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
        if let Some(is_admin) = self.is_admin {
            user.is_admin = is_admin;
        }
        if let Some(is_active) = self.is_active {
            user.is_active = is_active;
        }
        if self.department.is_some() {
            user.department = self.department;
        }
        if self.position.is_some() {
            user.position = self.position;
        }
        if self.join_date.is_some() {
            user.join_date = self.join_date;
        }
    }

    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.username.is_none()
            && self.password.is_none()
            && self.is_admin.is_none()
            && self.is_active.is_none()
            && self.department.is_none()
            && self.position.is_none()
            && self.join_date.is_none()
    }
}
