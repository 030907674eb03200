//! REST endpoint implementations.
//!
//! Free functions taking the HTTP client, URLs and a bearer token. Token
//! lifecycle and 401 handling live in [`crate::client`].

mod groups;
mod odata;
mod request;
mod token;
pub mod url_encoding;
mod users;

pub use groups::get_group;
pub use odata::get_page;
pub use request::send_request_with_retry;
pub use token::{acquire_token, default_scope_for};
pub use url_encoding::encode_path_segment;
pub use users::{LICENSED_USERS_FILTER, licensed_users_url};

/// Collection path for the tenant's purchased products.
pub const SUBSCRIBED_SKUS_PATH: &str = "/subscribedSkus";
