//! Shared constants and invariants

pub const AUTHN_STATUS_PATH: &str = "/server/api/authn/status";
pub const AUTHN_LOGIN_PATH: &str = "/server/api/authn/login";

pub const EPERSONS_PATH: &str = "/server/api/eperson/epersons";
pub const GROUPS_PATH: &str = "/server/api/eperson/groups";
pub const ITEMS_PATH: &str = "/server/api/core/items";

/// CSRF token response header set by the status endpoint
pub const CSRF_HEADER: &str = "DSPACE-XSRF-TOKEN";
/// cookie fallback for servers that only set the cookie form
pub const CSRF_COOKIE: &str = "DSPACE-XSRF-COOKIE";
/// request header the login POST must carry
pub const CSRF_REQUEST_HEADER: &str = "X-XSRF-TOKEN";

pub const BEARER_PREFIX: &str = "Bearer ";

pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 5000;
/// assumed bearer lifetime; the API does not report one
pub const DEFAULT_SESSION_LIFETIME_SECS: u64 = 3600;
pub const DEFAULT_SAFETY_MARGIN_SECS: u64 = 10;
