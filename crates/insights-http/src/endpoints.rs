//! Endpoint paths, header names and wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Login: POST credentials, DELETE `{LOGIN}/{profile_id}` to log out.
pub const LOGIN: &str = "/gdc/account/login";

/// Temporary token exchange.
pub const TOKEN: &str = "/gdc/account/token";

// ============================================================================
// Headers
// ============================================================================

pub const ACCEPT: &str = "Accept";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const COOKIE: &str = "Cookie";
pub const AUTH_SST: &str = "X-GDC-AuthSST";
pub const APPLICATION_JSON: &str = "application/json";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub post_user_login: PostUserLogin<'a>,
}

#[derive(Serialize)]
pub struct PostUserLogin<'a> {
    pub login: &'a str,
    pub password: &'a str,
    pub remember: u8,
    pub verify_level: u8,
}

impl<'a> PostUserLogin<'a> {
    /// Non-persistent login at verification level 2.
    pub fn new(login: &'a str, password: &'a str) -> Self {
        Self {
            login,
            password,
            remember: 0,
            verify_level: 2,
        }
    }
}

impl std::fmt::Debug for PostUserLogin<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostUserLogin")
            .field("login", &self.login)
            .field("password", &"[REDACTED]")
            .field("remember", &self.remember)
            .field("verify_level", &self.verify_level)
            .finish()
    }
}

/// Response from login.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user_login: UserLogin,
}

#[derive(Deserialize)]
pub struct UserLogin {
    pub profile: String,
    #[serde(default)]
    pub state: Option<String>,
    pub token: String,
}

impl std::fmt::Debug for UserLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserLogin")
            .field("profile", &self.profile)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Response from the token exchange.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub user_token: UserToken,
}

#[derive(Deserialize)]
pub struct UserToken {
    pub token: String,
}

/// Request body for a raw report export.
#[derive(Debug, Serialize)]
pub struct ExportRequest {
    pub report_req: ReportReq,
}

#[derive(Debug, Serialize)]
pub struct ReportReq {
    pub report: String,
}

/// Response from a raw report export.
#[derive(Debug, Deserialize)]
pub struct ExportResponse {
    pub uri: String,
}
