use crate::domain::Book;

#[mockall::automock]
#[async_trait::async_trait]
pub trait BookPort {
    async fn find_all(&self) -> Result<Vec<Book>, Error>;
    async fn find_by_id(&self, book_id: &str) -> Result<Book, Error>;
    async fn insert(&self, book: Book) -> Result<Book, Error>;
    async fn update(&self, book: Book) -> Result<Book, Error>;
    async fn delete(&self, book_id: &str) -> Result<Book, Error>;
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("book {0} does not exist")]
    BookDoesNotExist(String),

    #[error("book {0} already exists")]
    BookAlreadyExists(String),

    /// Concrete adapter errors
    #[error("adapter error: {0:?}")]
    Adapter(Box<dyn std::error::Error + Send + Sync>),
}
