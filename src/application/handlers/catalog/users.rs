//! User registration and maintenance.

use std::sync::Arc;

use crate::domain::catalog::{CatalogError, User, UserDetails};
use crate::domain::foundation::UserId;
use crate::ports::UserRepository;

/// Raw user fields as received from a client.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub name: String,
    pub email: String,
}

#[derive(Clone)]
pub struct UserDirectory {
    repository: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }

    pub async fn register(&self, input: UserInput) -> Result<User, CatalogError> {
        let details = UserDetails::new(input.name, input.email)?;
        let user = self.repository.insert(details).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    pub async fn get(&self, id: UserId) -> Result<User, CatalogError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(CatalogError::UserNotFound(id))
    }

    pub async fn list(&self) -> Result<Vec<User>, CatalogError> {
        Ok(self.repository.list_all().await?)
    }

    pub async fn update(&self, id: UserId, input: UserInput) -> Result<User, CatalogError> {
        let details = UserDetails::new(input.name, input.email)?;
        self.repository
            .update(id, details)
            .await?
            .ok_or(CatalogError::UserNotFound(id))
    }

    /// Removes the user together with their offers.
    pub async fn delete(&self, id: UserId) -> Result<(), CatalogError> {
        if !self.repository.delete(id).await? {
            return Err(CatalogError::UserNotFound(id));
        }
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}
