//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Filters for `GET /api/projects` (`?email=&pageName=&status=`).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectListParams {
    pub email: Option<String>,
    pub page_name: Option<String>,
    pub status: Option<String>,
}

/// Token passed in the query string, for clients that cannot set headers
/// (e.g. `<video src="...?token=">`).
#[derive(Debug, Default, Deserialize)]
pub struct TokenParam {
    pub token: Option<String>,
}
