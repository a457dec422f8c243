//! Session teardown.

use tracing::{debug, info, instrument};

use insights_core::error::TeardownError;
use insights_core::{AccessToken, Method, Transport};

use crate::client::InsightsClient;
use crate::endpoints::{AUTH_SST, COOKIE, LOGIN};
use crate::session::Session;

impl<T: Transport> InsightsClient<T> {
    /// Log the session out.
    ///
    /// Sends the access token cookie when one was obtained; a run whose
    /// token exchange failed still logs out with the session token alone.
    /// Callers treat the result as advisory.
    #[instrument(skip(self, session, access_token), fields(profile = %session.profile()))]
    pub async fn logout(
        &self,
        session: &Session,
        access_token: Option<&AccessToken>,
    ) -> Result<(), TeardownError> {
        info!("Logging out");

        let profile_id =
            session
                .profile()
                .profile_id()
                .ok_or_else(|| TeardownError::MissingProfileId {
                    profile: session.profile().to_string(),
                })?;

        let mut request = self
            .json_request(Method::Delete, &format!("{}/{}", LOGIN, profile_id))
            .header(AUTH_SST, session.session_token().as_str());
        if let Some(token) = access_token {
            request = request.header(COOKIE, token.cookie());
        }

        let response = self
            .transport()
            .send(request)
            .await
            .map_err(TeardownError::Transport)?;

        if !response.is_success() {
            return Err(TeardownError::Rejected {
                status: response.status(),
            });
        }

        debug!("Session logged out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use insights_core::{ApiUrl, ProfileReference, SessionToken};

    fn client(mock: &MockTransport) -> InsightsClient<&MockTransport> {
        InsightsClient::new(mock, ApiUrl::new("https://analytics.test").unwrap())
    }

    fn session(profile: &str) -> Session {
        Session::new(SessionToken::new("sst"), ProfileReference::new(profile))
    }

    #[tokio::test]
    async fn deletes_login_for_profile_id_with_both_tokens() {
        let mock = MockTransport::new();
        mock.push_raw(204, "");

        client(&mock)
            .logout(
                &session("/gdc/account/profile/p1"),
                Some(&AccessToken::new("tt")),
            )
            .await
            .unwrap();

        let req = &mock.requests()[0];
        assert_eq!(req.method(), Method::Delete);
        assert_eq!(req.url(), "https://analytics.test/gdc/account/login/p1");
        assert_eq!(req.header_value("X-GDC-AuthSST"), Some("sst"));
        assert_eq!(req.header_value("Cookie"), Some("GDCAuthTT=tt"));
        assert_eq!(req.header_value("Accept"), Some("application/json"));
    }

    #[tokio::test]
    async fn logs_out_without_access_token() {
        let mock = MockTransport::new();
        mock.push_raw(204, "");

        client(&mock)
            .logout(&session("/gdc/account/profile/p1"), None)
            .await
            .unwrap();

        let req = &mock.requests()[0];
        assert_eq!(req.header_value("X-GDC-AuthSST"), Some("sst"));
        assert_eq!(req.header_value("Cookie"), None);
    }

    #[tokio::test]
    async fn rejected_logout_is_reported() {
        let mock = MockTransport::new();
        mock.push_raw(401, "");

        let err = client(&mock)
            .logout(&session("/gdc/account/profile/p1"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TeardownError::Rejected { status: 401 }));
    }

    #[tokio::test]
    async fn missing_profile_id_sends_nothing() {
        let mock = MockTransport::new();

        let err = client(&mock)
            .logout(&session("/gdc/account/profile/"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TeardownError::MissingProfileId { .. }));
        assert!(mock.requests().is_empty());
    }
}
