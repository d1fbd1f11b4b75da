pub mod book;
pub mod ids;
pub mod notification;
pub mod rating;
pub mod review;
pub mod user;

pub use ids::{BookId, ReviewId, UserId};
pub use rating::Rating;
