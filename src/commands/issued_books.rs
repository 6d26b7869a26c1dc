use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use crate::{
    domain::IssuedBook,
    ports::{
        books::{self, BookPort},
        users::UserPort,
    },
};
use tower::Service;
use tracing::Instrument;

use super::{DomainLogic, Error};

/// List every book currently borrowed, with its borrower
pub struct IssuedBooksRequest;

impl<U, B, C> Service<IssuedBooksRequest> for DomainLogic<U, B, C>
where
    U: UserPort + 'static,
    B: BookPort + 'static,
{
    type Response = Vec<IssuedBook>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, _req: IssuedBooksRequest) -> Self::Future {
        let users = self.users.clone();
        let catalog = self.books.clone();
        let span = tracing::info_span!("issued_books");
        Box::pin(
            async move {
                let mut issued = Vec::new();
                for user in users.find_all().await? {
                    let Some(book_id) = user.issued_book.as_deref() else {
                        continue;
                    };

                    let book = match catalog.find_by_id(book_id).await {
                        Ok(book) => book,
                        // A dangling reference should not hide the other loans
                        Err(books::Error::BookDoesNotExist(_)) => {
                            tracing::warn!(
                                user_id = %user.id,
                                book_id,
                                "issued book does not exist"
                            );
                            continue;
                        }
                        Err(err) => return Err(err.into()),
                    };

                    issued.push(IssuedBook {
                        book,
                        issued_by: user.name,
                        issued_date: user.issued_date,
                        return_date: user.return_date,
                    });
                }

                if issued.is_empty() {
                    return Err(Error::NoIssuedBooks);
                }
                tracing::debug!(count = issued.len(), "listed issued books");

                Ok::<_, Error>(issued)
            }
            .instrument(span),
        )
    }
}
