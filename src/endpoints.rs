//! The API endpoints URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The expense dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The filtered expense analytics as JSON.
pub const ANALYTICS_API: &str = "/api/analytics";
