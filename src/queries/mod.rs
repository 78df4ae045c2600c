//! Report queries.
//!
//! Each query struct borrows a [`Connection`](crate::connection::Connection)
//! and exposes methods returning `Result<T>`.

pub mod participants;
pub mod wishlists;

pub use participants::{ParticipantCounter, ParticipantReportQuery};
pub use wishlists::WishlistReportQuery;
