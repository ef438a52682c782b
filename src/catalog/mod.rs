//! Herb Catalog
//! Mission: Public product listing with admin-only content management

pub mod api;
pub mod models;
pub mod store;

pub use api::CatalogState;
pub use store::HerbStore;
