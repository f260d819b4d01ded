// EdgeOS authentication
//
// The router does not follow conventional REST status discipline at
// login: success is a 303 redirect whose Set-Cookie headers carry the
// session id and CSRF token, and failure is a 200 that renders the
// login page again with an error message in the body. The transport is
// built with redirects disabled so the 303 stays observable; a generic
// throw-on-non-2xx client cannot speak this protocol.

use reqwest::StatusCode;
use reqwest::header::{HeaderMap, SET_COOKIE};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::EdgeClient;
use crate::error::Error;
use crate::session::Session;

/// Cookie prefix carrying the session identifier.
const SESSION_COOKIE: &str = "PHPSESSID=";

/// Cookie prefix carrying the anti-forgery token.
const CSRF_COOKIE: &str = "X-CSRF-TOKEN=";

/// Literal phrase in the 200 body when the router refuses credentials.
const BAD_CREDENTIALS_PHRASE: &str = "The username or password you entered is incorrect";

/// Extract a cookie value from a `Set-Cookie` header line.
///
/// The value is the substring between `prefix` (which includes the
/// trailing `=`) and the first `;`, or the rest of the line when no
/// attributes follow. An empty value counts as absent -- that is how
/// the router clears a cookie.
fn cookie_value<'a>(header: &'a str, prefix: &str) -> Option<&'a str> {
    let start = header.find(prefix)? + prefix.len();
    let rest = &header[start..];
    let value = match rest.find(';') {
        Some(end) => &rest[..end],
        None => rest,
    };
    (!value.is_empty()).then_some(value)
}

/// Scan `Set-Cookie` headers for the session id and CSRF token,
/// stopping early once both are found.
fn scan_cookies(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let mut session_id = None;
    let mut csrf_token = None;

    for header in headers.get_all(SET_COOKIE) {
        let Ok(raw) = header.to_str() else { continue };
        if session_id.is_none() {
            if let Some(value) = cookie_value(raw, SESSION_COOKIE) {
                session_id = Some(value.to_owned());
            }
        }
        if csrf_token.is_none() {
            if let Some(value) = cookie_value(raw, CSRF_COOKIE) {
                csrf_token = Some(value.to_owned());
            }
        }
        if session_id.is_some() && csrf_token.is_some() {
            break;
        }
    }

    (session_id, csrf_token)
}

impl EdgeClient {
    /// Authenticate with the router.
    ///
    /// Sends the form-encoded `POST /` and classifies the outcome by
    /// status plus body/header inspection:
    /// - 303 with a `PHPSESSID` cookie: success. The session is
    ///   replaced atomically with both secrets. A missing CSRF token is
    ///   tolerated here, but every mutating call will fail until a
    ///   re-login yields one.
    /// - 303 without a session cookie: [`Error::AuthProtocol`] -- the
    ///   firmware's auth mechanism has likely changed.
    /// - 200 carrying the known failure phrase:
    ///   [`Error::CredentialsRejected`].
    ///
    /// On every failure path the session state is left fully cleared.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        // No partial credentials may survive a failed attempt.
        self.session().clear();

        debug!("logging in at {}", self.base_url());

        let resp = self
            .http()
            .post(self.base_url().clone())
            .form(&[("username", username), ("password", password.expose_secret())])
            .send()
            .await
            .map_err(Error::Transport)?;

        match resp.status() {
            StatusCode::SEE_OTHER => {
                let (session_id, csrf_token) = scan_cookies(resp.headers());
                let Some(session_id) = session_id else {
                    return Err(Error::AuthProtocol {
                        message: "login redirect carried no PHPSESSID cookie".into(),
                    });
                };
                if csrf_token.is_none() {
                    debug!("login succeeded without a CSRF token; mutating calls will fail");
                }
                self.session().replace(Session::new(session_id, csrf_token));
                debug!("login successful");
                Ok(())
            }
            StatusCode::OK => {
                // The 200 path never carries session cookies -- it is
                // the login page rendered again.
                let body = resp.text().await.map_err(Error::Transport)?;
                if body.contains(BAD_CREDENTIALS_PHRASE) {
                    Err(Error::CredentialsRejected)
                } else {
                    Err(Error::AuthProtocol {
                        message: "login returned 200 without a recognized failure message".into(),
                    })
                }
            }
            status => Err(Error::UnexpectedStatus { status }),
        }
    }

    /// End the current session.
    ///
    /// `GET /logout`; the response body is ignored. Local session state
    /// is cleared even when the request fails on the wire.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.base_url().join("logout")?;
        debug!("logging out at {url}");

        let result = self.http().get(url).send().await;
        self.session().clear();
        result.map_err(Error::Transport)?;

        debug!("logout complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_bounded_by_first_semicolon() {
        assert_eq!(
            cookie_value("PHPSESSID=abc123; path=/; HttpOnly", SESSION_COOKIE),
            Some("abc123")
        );
    }

    #[test]
    fn cookie_value_runs_to_end_without_attributes() {
        assert_eq!(cookie_value("PHPSESSID=abc123", SESSION_COOKIE), Some("abc123"));
    }

    // The reference implementation truncated the CSRF value using the
    // session cookie's prefix length; the prefixes differ in length, so
    // each lookup must use its own.
    #[test]
    fn cookie_value_uses_each_prefix_own_length() {
        assert_eq!(
            cookie_value("X-CSRF-TOKEN=tok456; path=/", CSRF_COOKIE),
            Some("tok456")
        );
        assert_eq!(
            cookie_value("PHPSESSID=sid789; path=/", SESSION_COOKIE),
            Some("sid789")
        );
    }

    #[test]
    fn cookie_value_missing_prefix_is_none() {
        assert_eq!(cookie_value("OTHER=zzz; path=/", SESSION_COOKIE), None);
    }

    #[test]
    fn cookie_value_empty_counts_as_absent() {
        assert_eq!(cookie_value("PHPSESSID=; path=/", SESSION_COOKIE), None);
        assert_eq!(cookie_value("PHPSESSID=", SESSION_COOKIE), None);
    }

    #[test]
    fn scan_stops_after_both_found() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, "PHPSESSID=sid; path=/".parse().expect("header"));
        headers.append(SET_COOKIE, "X-CSRF-TOKEN=tok; path=/".parse().expect("header"));
        headers.append(SET_COOKIE, "PHPSESSID=later; path=/".parse().expect("header"));

        let (sid, tok) = scan_cookies(&headers);
        assert_eq!(sid.as_deref(), Some("sid"));
        assert_eq!(tok.as_deref(), Some("tok"));
    }
}
