//! Authentication & Access Control
//! Mission: Credential hashing, stateless identity tokens, and role-gated admin access

pub mod api;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod password;
pub mod seed;
pub mod store;

pub use api::AuthState;
pub use jwt::TokenService;
pub use middleware::{require_admin, require_auth, AuthContext};
pub use store::AccountStore;
