//! Session protocol: login, then token exchange.

use tracing::{debug, info, instrument};

use insights_core::error::{CredentialError, Stage};
use insights_core::{
    AccessToken, ApiResponse, Credentials, ProfileReference, SessionToken, Transport,
};
use serde::de::DeserializeOwned;

use crate::client::InsightsClient;
use crate::endpoints::{AUTH_SST, LOGIN, LoginRequest, LoginResponse, PostUserLogin, TOKEN, TokenResponse};

/// State after a successful login: the session token and the profile it
/// belongs to.
#[derive(Debug, Clone)]
pub struct Session {
    session_token: SessionToken,
    profile: ProfileReference,
}

impl Session {
    pub fn new(session_token: SessionToken, profile: ProfileReference) -> Self {
        Self {
            session_token,
            profile,
        }
    }

    pub fn session_token(&self) -> &SessionToken {
        &self.session_token
    }

    pub fn profile(&self) -> &ProfileReference {
        &self.profile
    }

    /// Pair the session with an access token.
    pub fn authorize(self, access_token: AccessToken) -> AuthorizedSession {
        AuthorizedSession {
            session: self,
            access_token,
        }
    }
}

/// A session holding both tokens. Export and download calls require one.
#[derive(Debug, Clone)]
pub struct AuthorizedSession {
    session: Session,
    access_token: AccessToken,
}

impl AuthorizedSession {
    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn access_token(&self) -> &AccessToken {
        &self.access_token
    }
}

impl<T: Transport> InsightsClient<T> {
    /// Log in and obtain the session token.
    ///
    /// Any failure is a [`CredentialError`]; a bad password is never retried.
    #[instrument(skip(self, credentials))]
    pub async fn login(&self, credentials: Credentials) -> Result<Session, CredentialError> {
        info!("Retrieving session token");

        let body = LoginRequest {
            post_user_login: PostUserLogin::new(credentials.identifier(), credentials.password()),
        };
        let request = self
            .json_request(insights_core::Method::Post, LOGIN)
            .json(&body)
            .map_err(|source| CredentialError::Transport {
                stage: Stage::Login,
                source,
            })?;
        drop(credentials);

        let response = self
            .transport()
            .send(request)
            .await
            .map_err(|source| CredentialError::Transport {
                stage: Stage::Login,
                source,
            })?;

        let parsed: LoginResponse = read_json(Stage::Login, response).await?;
        let login = parsed.user_login;

        if login.token.is_empty() {
            return Err(malformed(Stage::Login, "empty session token"));
        }
        if login.profile.is_empty() {
            return Err(malformed(Stage::Login, "empty profile reference"));
        }

        let session = Session::new(
            SessionToken::new(login.token),
            ProfileReference::new(login.profile),
        );
        debug!(profile = %session.profile(), "Session token acquired");
        Ok(session)
    }

    /// Exchange the session token for a temporary access token.
    #[instrument(skip(self, session), fields(profile = %session.profile()))]
    pub async fn acquire_access_token(
        &self,
        session: &Session,
    ) -> Result<AccessToken, CredentialError> {
        info!("Retrieving temporary token");

        let request = self
            .json_request(insights_core::Method::Get, TOKEN)
            .header(AUTH_SST, session.session_token().as_str());

        let response = self
            .transport()
            .send(request)
            .await
            .map_err(|source| CredentialError::Transport {
                stage: Stage::Token,
                source,
            })?;

        let parsed: TokenResponse = read_json(Stage::Token, response).await?;
        if parsed.user_token.token.is_empty() {
            return Err(malformed(Stage::Token, "empty temporary token"));
        }

        debug!("Temporary token acquired");
        Ok(AccessToken::new(parsed.user_token.token))
    }
}

/// Check the status, then read and parse a handshake response body.
async fn read_json<R: DeserializeOwned>(
    stage: Stage,
    response: ApiResponse,
) -> Result<R, CredentialError> {
    let status = response.status();
    if !response.is_success() {
        return Err(CredentialError::Rejected { stage, status });
    }

    let body = response
        .bytes()
        .await
        .map_err(|source| CredentialError::Transport { stage, source })?;

    serde_json::from_slice(&body).map_err(|e| malformed(stage, e.to_string()))
}

fn malformed(stage: Stage, reason: impl Into<String>) -> CredentialError {
    CredentialError::Malformed {
        stage,
        reason: reason.into(),
    }
}
