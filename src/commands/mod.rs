use std::sync::Arc;

use crate::domain::subscription::SubscriptionPolicy;

pub mod issued_books;
pub mod subscription_details;

pub struct DomainLogic<U, B, C> {
    users: Arc<U>,
    books: Arc<B>,
    clock: Arc<C>,
    policy: SubscriptionPolicy,
}

impl<U, B, C> DomainLogic<U, B, C> {
    pub fn new(users: Arc<U>, books: Arc<B>, clock: Arc<C>, policy: SubscriptionPolicy) -> Self {
        Self {
            users,
            books,
            clock,
            policy,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("user port error: {0:?}")]
    Users(#[from] crate::ports::users::Error),
    #[error("book port error: {0:?}")]
    Books(#[from] crate::ports::books::Error),
    #[error("subscription error: {0}")]
    Subscription(#[from] crate::domain::subscription::Error),

    #[error("no books issued yet")]
    NoIssuedBooks,
}
