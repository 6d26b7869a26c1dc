use crate::{
    domain::{Book, User},
    ports::{
        books::{self, BookPort},
        users::{self, UserPort},
    },
};
use indexmap::{map::Entry, IndexMap};
use serde::Deserialize;
use std::sync::{Arc, Mutex, PoisonError};

/// In-memory store for users and books
///
/// Records keep their insertion order. Every read returns a copy, so callers can never modify
/// the stored records in place.
#[derive(Clone, Debug)]
pub struct MemoryDatabase {
    users: Arc<Mutex<IndexMap<String, User>>>,
    books: Arc<Mutex<IndexMap<String, Book>>>,
}

#[derive(Deserialize)]
struct UserSeed {
    users: Vec<User>,
}

#[derive(Deserialize)]
struct BookSeed {
    books: Vec<Book>,
}

impl MemoryDatabase {
    pub fn new(users: Vec<User>, books: Vec<Book>) -> Self {
        let users = users.into_iter().map(|user| (user.id.clone(), user)).collect();
        let books = books.into_iter().map(|book| (book.id.clone(), book)).collect();
        Self {
            users: Arc::new(Mutex::new(users)),
            books: Arc::new(Mutex::new(books)),
        }
    }

    /// Load the store from seed documents shaped as `{"users": [...]}` and `{"books": [...]}`
    pub fn from_json(users: &str, books: &str) -> Result<Self, serde_json::Error> {
        let UserSeed { users } = serde_json::from_str(users)?;
        let BookSeed { books } = serde_json::from_str(books)?;
        tracing::debug!(users = users.len(), books = books.len(), "loaded seed data");
        Ok(Self::new(users, books))
    }
}

#[async_trait::async_trait]
impl UserPort for MemoryDatabase {
    async fn find_all(&self) -> Result<Vec<User>, users::Error> {
        Ok(self.users.lock()?.values().cloned().collect())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<User, users::Error> {
        self.users
            .lock()?
            .get(user_id)
            .cloned()
            .ok_or_else(|| users::Error::UserDoesNotExist(user_id.to_string()))
    }

    async fn insert(&self, user: User) -> Result<User, users::Error> {
        match self.users.lock()?.entry(user.id.clone()) {
            Entry::Occupied(entry) => Err(users::Error::UserAlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(user).clone()),
        }
    }

    async fn update(&self, user: User) -> Result<User, users::Error> {
        match self.users.lock()?.get_mut(&user.id) {
            Some(stored) => {
                *stored = user;
                Ok(stored.clone())
            }
            None => Err(users::Error::UserDoesNotExist(user.id)),
        }
    }

    async fn delete(&self, user_id: &str) -> Result<User, users::Error> {
        self.users
            .lock()?
            .shift_remove(user_id)
            .ok_or_else(|| users::Error::UserDoesNotExist(user_id.to_string()))
    }
}

#[async_trait::async_trait]
impl BookPort for MemoryDatabase {
    async fn find_all(&self) -> Result<Vec<Book>, books::Error> {
        Ok(self.books.lock()?.values().cloned().collect())
    }

    async fn find_by_id(&self, book_id: &str) -> Result<Book, books::Error> {
        self.books
            .lock()?
            .get(book_id)
            .cloned()
            .ok_or_else(|| books::Error::BookDoesNotExist(book_id.to_string()))
    }

    async fn insert(&self, book: Book) -> Result<Book, books::Error> {
        match self.books.lock()?.entry(book.id.clone()) {
            Entry::Occupied(entry) => Err(books::Error::BookAlreadyExists(entry.key().clone())),
            Entry::Vacant(entry) => Ok(entry.insert(book).clone()),
        }
    }

    async fn update(&self, book: Book) -> Result<Book, books::Error> {
        match self.books.lock()?.get_mut(&book.id) {
            Some(stored) => {
                *stored = book;
                Ok(stored.clone())
            }
            None => Err(books::Error::BookDoesNotExist(book.id)),
        }
    }

    async fn delete(&self, book_id: &str) -> Result<Book, books::Error> {
        self.books
            .lock()?
            .shift_remove(book_id)
            .ok_or_else(|| books::Error::BookDoesNotExist(book_id.to_string()))
    }
}

impl Default for MemoryDatabase {
    fn default() -> Self {
        Self {
            users: Arc::new(Mutex::new(IndexMap::new())),
            books: Arc::new(Mutex::new(IndexMap::new())),
        }
    }
}

/// Erased [`PoisonError`]
///
/// `PoisonError` keeps the `MutexGuard` internally, which is not send. Thus we erase the error
/// and only keep the string representation instead.
#[derive(Debug, thiserror::Error)]
#[error("poison error: {0}")]
pub struct ErasedPoisonError(String);

impl<T> From<PoisonError<T>> for users::Error {
    fn from(err: PoisonError<T>) -> Self {
        tracing::warn!("user store lock poisoned");
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}

impl<T> From<PoisonError<T>> for books::Error {
    fn from(err: PoisonError<T>) -> Self {
        tracing::warn!("book store lock poisoned");
        Self::Adapter(Box::new(ErasedPoisonError(err.to_string())))
    }
}
