//! UserRepository port - Persistence interface for bidding users.

use async_trait::async_trait;

use crate::domain::catalog::{User, UserDetails};
use crate::domain::foundation::{DomainError, UserId};

/// Port for storing users.
///
/// A second user with an existing email is reported with
/// `ErrorCode::Conflict`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned ID.
    async fn insert(&self, details: UserDetails) -> Result<User, DomainError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// All users, by ID.
    async fn list_all(&self) -> Result<Vec<User>, DomainError>;

    /// Replace name and email. `None` if the user does not exist.
    async fn update(&self, id: UserId, details: UserDetails) -> Result<Option<User>, DomainError>;

    /// Delete a user and, by cascade, their offers. Returns false if no row was removed.
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}
