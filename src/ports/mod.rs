pub mod books;
pub mod clock;
pub mod users;
