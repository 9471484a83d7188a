//! Bidding users.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId, ValidationError};

/// A registered user as stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub created_at: Timestamp,
}

/// Validated name and email, used for both registration and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    name: String,
    email: String,
}

impl UserDetails {
    /// # Errors
    ///
    /// - `EmptyField` if `name` or `email` is blank
    /// - `InvalidFormat` if `email` is not `local@domain`
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {}
            _ => return Err(ValidationError::invalid_format("email", "expected local@domain")),
        }

        Ok(Self { name, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}
