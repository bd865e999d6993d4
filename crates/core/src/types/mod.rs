//! Core types for LuxStore.

pub mod page;
pub mod role;
pub mod user;

pub use page::{Page, PageError, create_page_url};
pub use role::Role;
pub use user::SessionUser;
