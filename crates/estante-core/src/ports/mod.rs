pub mod auth;
pub mod books;
pub mod navigator;
pub mod notifier;
pub mod reviews;
pub mod token;

pub use auth::AuthGateway;
pub use books::BookGateway;
pub use navigator::Navigator;
pub use notifier::Notifier;
pub use reviews::ReviewGateway;
pub use token::TokenStore;
