//! Centralized constants for the license report workspace.
//!
//! Default values used across crates live here to avoid magic number
//! duplication.

// =============================================================================
// Endpoints
// =============================================================================

/// Default Microsoft Graph API root (v1.0 surface).
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.microsoft.com/v1.0";

/// Default Entra ID authority used for the client-credentials token request.
pub const DEFAULT_AUTHORITY_URL: &str = "https://login.microsoftonline.com";

/// OAuth2 scope requesting every application permission granted to the app.
pub const GRAPH_DEFAULT_SCOPE: &str = "https://graph.microsoft.com/.default";

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Default maximum number of retries for throttled requests.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// Maximum allowed value for `max_retries`.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Refresh access tokens this many seconds before they expire.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 300;

/// Maximum allowed token expiry buffer in seconds.
pub const MAX_EXPIRY_BUFFER_SECS: u64 = 1800;

// =============================================================================
// Paging
// =============================================================================

/// Default `$top` for paged Graph collections. Graph caps users at 999.
pub const DEFAULT_PAGE_SIZE: u32 = 999;

/// Largest `$top` Graph accepts for the users collection.
pub const MAX_PAGE_SIZE: u32 = 999;

/// Upper bound on pages followed for a single collection (safety limit).
pub const MAX_PAGES: usize = 10_000;

// =============================================================================
// Caching
// =============================================================================

/// Maximum number of group display names kept in memory per run.
pub const DEFAULT_GROUP_CACHE_CAPACITY: u64 = 10_000;
