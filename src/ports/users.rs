use crate::domain::User;

#[mockall::automock]
#[async_trait::async_trait]
pub trait UserPort {
    async fn find_all(&self) -> Result<Vec<User>, Error>;
    async fn find_by_id(&self, user_id: &str) -> Result<User, Error>;
    async fn insert(&self, user: User) -> Result<User, Error>;
    /// Replace the stored user with the same id
    async fn update(&self, user: User) -> Result<User, Error>;
    /// Remove a user, returning the removed record
    async fn delete(&self, user_id: &str) -> Result<User, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Domain-level error when a user does not exist
    #[error("user {0} does not exist")]
    UserDoesNotExist(String),

    /// A user with the same id is already stored
    #[error("user {0} already exists")]
    UserAlreadyExists(String),

    /// Concrete adapter errors
    ///
    /// This could represent any errors from a concrete adapter that is not part of the domain
    /// model, such as connectivity, configuration, or permission errors.
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
