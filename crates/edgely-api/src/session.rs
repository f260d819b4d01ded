//! Session state: the two secrets produced by a successful login.
//!
//! Pure state, no I/O. The holder enforces the all-or-nothing rule by
//! construction: the session is either a fully populated [`Session`]
//! value or absent, and every mutation is a single swap -- there is no
//! way to observe a half-written pair.

use std::sync::RwLock;

/// An established EdgeOS session.
///
/// `session_id` is the `PHPSESSID` cookie value; `csrf_token` is the
/// anti-forgery token issued alongside it. The token can be absent when
/// the firmware did not send one at login -- the session is still valid
/// for reads, but every mutating call will fail until re-login yields
/// a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    session_id: String,
    csrf_token: Option<String>,
}

impl Session {
    pub(crate) fn new(session_id: String, csrf_token: Option<String>) -> Self {
        Self {
            session_id,
            csrf_token,
        }
    }

    /// The opaque session identifier proving authentication.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// The anti-forgery token for mutating calls, if one was issued.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }
}

/// Interior holder for the client's session, replaced or cleared as a
/// unit.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    inner: RwLock<Option<Session>>,
}

impl SessionState {
    /// Install a new session, dropping any previous one.
    pub fn replace(&self, session: Session) {
        *self.inner.write().expect("session lock poisoned") = Some(session);
    }

    /// Forget the session. Idempotent.
    pub fn clear(&self) {
        *self.inner.write().expect("session lock poisoned") = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .read()
            .expect("session lock poisoned")
            .is_some()
    }

    pub fn session_id(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .map(|s| s.session_id.clone())
    }

    pub fn csrf_token(&self) -> Option<String> {
        self.inner
            .read()
            .expect("session lock poisoned")
            .as_ref()
            .and_then(|s| s.csrf_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unauthenticated() {
        let state = SessionState::default();
        assert!(!state.is_authenticated());
        assert_eq!(state.session_id(), None);
        assert_eq!(state.csrf_token(), None);
    }

    #[test]
    fn replace_installs_both_secrets_together() {
        let state = SessionState::default();
        state.replace(Session::new("sid".into(), Some("tok".into())));
        assert!(state.is_authenticated());
        assert_eq!(state.session_id().as_deref(), Some("sid"));
        assert_eq!(state.csrf_token().as_deref(), Some("tok"));
    }

    #[test]
    fn clear_is_idempotent() {
        let state = SessionState::default();
        state.replace(Session::new("sid".into(), Some("tok".into())));
        state.clear();
        state.clear();
        assert!(!state.is_authenticated());
        assert_eq!(state.csrf_token(), None);
    }

    #[test]
    fn session_without_token_is_authenticated_but_tokenless() {
        let state = SessionState::default();
        state.replace(Session::new("sid".into(), None));
        assert!(state.is_authenticated());
        assert_eq!(state.csrf_token(), None);
    }
}
