//! Site Content
//! Mission: Editable page content and carousel assets for the storefront

pub mod api;
pub mod models;
pub mod store;

pub use api::ContentState;
pub use store::ContentStore;
