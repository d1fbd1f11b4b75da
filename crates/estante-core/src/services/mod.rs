pub mod library_service;
pub mod review_service;
pub mod session_service;
pub mod toast;

pub use library_service::{LibraryService, LibraryState};
pub use review_service::ReviewService;
pub use session_service::{SessionService, SessionState};
pub use toast::{ToastSlot, ToastStore};
