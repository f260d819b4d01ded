// EdgeOS HTTP client
//
// Wraps `reqwest::Client` with EdgeOS-specific URL construction, the
// CSRF-on-mutation policy, and uniform response decoding. Endpoint
// groups (auth, config tree, operations) are implemented as inherent
// methods in sibling modules to keep this one focused on transport
// mechanics.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::cookie::{CookieStore, Jar};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};
use url::Url;

use crate::error::Error;
use crate::session::SessionState;
use crate::transport::TransportConfig;

/// Header carrying the anti-forgery token on mutating requests.
pub(crate) const CSRF_HEADER: &str = "X-CSRF-TOKEN";

/// Client for one EdgeOS router.
///
/// Owns the HTTP connection pool, the cookie store, and the session
/// secrets for its whole lifetime. Not designed for concurrent use
/// from multiple tasks without external synchronization: a re-login
/// swaps the session atomically, but callers must make sure no
/// mutating request is in flight using a token about to be replaced.
pub struct EdgeClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionState,
    /// Jar shared with `http`; kept so the session cookie can be handed
    /// to the push-subscription transport.
    cookie_jar: Option<Arc<Jar>>,
}

impl EdgeClient {
    /// Create a client for the router at `base_url`.
    ///
    /// If the transport config doesn't already include a cookie jar,
    /// one is created automatically (session auth requires cookies).
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let config = if transport.cookie_jar.is_some() {
            transport.clone()
        } else {
            transport.clone().with_cookie_jar()
        };
        let cookie_jar = config.cookie_jar.clone();
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url,
            session: SessionState::default(),
            cookie_jar,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// The client must have redirect following disabled -- otherwise
    /// the login 303 is consumed before its cookies can be read -- and
    /// should carry a cookie store for the session cookie.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            session: SessionState::default(),
            cookie_jar: None,
        }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub(crate) fn session(&self) -> &SessionState {
        &self.session
    }

    /// Whether a session is currently established.
    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// The current session identifier, if authenticated.
    ///
    /// The push-subscription transport needs this to authenticate its
    /// subscription message.
    pub fn session_id(&self) -> Option<String> {
        self.session.session_id()
    }

    /// Extract the `Cookie` header value for the push transport.
    pub fn cookie_header(&self) -> Option<String> {
        let jar = self.cookie_jar.as_ref()?;
        let cookies = jar.cookies(&self.base_url)?;
        cookies.to_str().ok().map(String::from)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Build a full URL under the API root: `{base}/api/edge/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Url {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/api/edge/{path}");
        Url::parse(&full).expect("invalid API URL")
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a read request. No CSRF header; authentication rides on the
    /// session cookie in the jar.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>, Error> {
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::decode(resp).await
    }

    /// Send a mutating request with a compact JSON body.
    ///
    /// Fails fast with [`Error::NotAuthenticated`] -- before any
    /// network traffic -- when no CSRF token is held.
    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<Option<T>, Error> {
        let token = self.require_csrf()?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(CSRF_HEADER, token)
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::decode(resp).await
    }

    /// Send a mutating request with a form-encoded body (operation
    /// endpoints). Same CSRF contract as [`post_json`](Self::post_json);
    /// an empty slice sends an empty form body.
    pub(crate) async fn post_form<T: DeserializeOwned>(
        &self,
        url: Url,
        form: &[(&str, &str)],
    ) -> Result<Option<T>, Error> {
        let token = self.require_csrf()?;
        debug!("POST {url}");

        let resp = self
            .http
            .post(url)
            .header(CSRF_HEADER, token)
            .form(form)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::decode(resp).await
    }

    fn require_csrf(&self) -> Result<String, Error> {
        self.session.csrf_token().ok_or(Error::NotAuthenticated)
    }

    /// Decode a response body.
    ///
    /// A body with no content maps to `None` -- "nothing returned" is a
    /// valid answer, distinct from an empty decoded object. Non-success
    /// statuses surface as transport errors; this layer never retries.
    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Option<T>, Error> {
        let resp = resp.error_for_status().map_err(Error::Transport)?;
        let body = resp.text().await.map_err(Error::Transport)?;

        if body.trim().is_empty() {
            trace!("empty response body");
            return Ok(None);
        }

        match serde_json::from_str(&body) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                // Byte 200 may fall inside a multi-byte character; back
                // up to a boundary before slicing.
                let mut end = body.len().min(200);
                while !body.is_char_boundary(end) {
                    end -= 1;
                }
                let message = format!("{e} (body preview: {:?})", &body[..end]);
                Err(Error::Decode { message, body })
            }
        }
    }

    // ── Keep-alive ───────────────────────────────────────────────────

    /// Keep the session alive.
    ///
    /// `GET /api/edge/heartbeat.json?_=<epoch-seconds>`. The router
    /// expires idle sessions, so the owning application should drive
    /// this on a timer roughly every 30 seconds -- strictly shorter
    /// than the router's idle timeout. The core does not own the timer.
    /// The timestamp is a cache buster and increases monotonically with
    /// the wall clock.
    pub async fn heartbeat(&self) -> Result<(), Error> {
        let mut url = self.api_url("heartbeat.json");
        let epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64();
        url.query_pairs_mut()
            .append_pair("_", &format!("{epoch:.3}"));

        let _: Option<serde_json::Value> = self.get_json(url).await?;
        Ok(())
    }

    // ── Disposal ─────────────────────────────────────────────────────

    /// Release the client, attempting a best-effort logout first.
    ///
    /// A logout is issued only when a session is active; any error from
    /// it is swallowed (logged at debug). Disposal never fails.
    pub async fn close(self) {
        if self.session.is_authenticated() {
            if let Err(err) = self.logout().await {
                debug!("logout during close failed: {err}");
            }
        }
    }
}
