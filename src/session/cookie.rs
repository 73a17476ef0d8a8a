//! Session cookie transport for axum handlers.
//!
//! # Responsibilities
//! - Verify and read the session cookie through axum-extra's signed jar
//! - Provide the [`Session`] extractor with the decoded value
//! - Emit `Set-Cookie` for replaced sessions via [`SetSession`]
//!
//! # Design Decisions
//! - The signing key is derived from the configured secret of any length
//! - When a request carries the cookie name twice, the jar keeps the last

use std::convert::Infallible;
use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::HeaderMap;
use axum::response::{IntoResponseParts, ResponseParts};
use axum_extra::extract::cookie::{Cookie, CookieJar, Key, SameSite, SignedCookieJar};
use sha2::{Digest, Sha256};

use super::{payload, SessionData};
use crate::config::SessionConfig;
use crate::observability::metrics;

/// Browsers may silently drop cookies above this size.
pub const MAX_COOKIE_SIZE: usize = 4093;

/// Length of the base64 HMAC tag the signed jar prepends to each value.
const SIGNATURE_LEN: usize = 44;

/// Reads and writes signed session cookies.
#[derive(Clone)]
pub struct SessionManager {
    key: Key,
    cookie_name: String,
    max_age_secs: u64,
    secure: bool,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("cookie_name", &self.cookie_name)
            .field("max_age_secs", &self.max_age_secs)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl SessionManager {
    pub fn new(config: &SessionConfig) -> Self {
        // Key derivation needs at least 32 bytes of master key.
        let master = Sha256::digest(config.secret_key.as_bytes());
        Self {
            key: Key::derive_from(master.as_slice()),
            cookie_name: config.cookie_name.clone(),
            max_age_secs: config.max_age_secs,
            secure: config.secure,
        }
    }

    /// Decode the session carried by `headers`.
    ///
    /// Returns `None` when there is no usable session cookie; the caller
    /// starts a fresh session in that case.
    pub fn load(&self, headers: &HeaderMap) -> Option<SessionData> {
        let jar = SignedCookieJar::from_headers(headers, self.key.clone());
        let Some(cookie) = jar.get(&self.cookie_name) else {
            if CookieJar::from_headers(headers).get(&self.cookie_name).is_some() {
                tracing::warn!("Discarding session cookie with invalid signature");
                metrics::record_session_rejected("signature");
            }
            return None;
        };

        match payload::decode(cookie.value()) {
            Ok(data) => Some(data),
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session cookie");
                metrics::record_session_rejected(e.reason());
                None
            }
        }
    }

    /// Response part that stores `data` as the client's session.
    pub fn issue(&self, data: &SessionData) -> SetSession {
        let value = match payload::encode(data) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode session");
                return SetSession(None);
            }
        };

        let size = self.cookie_name.len() + 1 + SIGNATURE_LEN + value.len();
        if size > MAX_COOKIE_SIZE {
            tracing::warn!(
                size,
                limit = MAX_COOKIE_SIZE,
                "Session cookie is too large, browsers may ignore it"
            );
        }

        let mut cookie = Cookie::build((self.cookie_name.clone(), value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure);
        if self.max_age_secs > 0 {
            let secs = i64::try_from(self.max_age_secs).unwrap_or(i64::MAX);
            cookie = cookie.max_age(time::Duration::seconds(secs));
        }

        SetSession(Some(SignedCookieJar::new(self.key.clone()).add(cookie)))
    }
}

/// The caller's session, as loaded from its cookie.
///
/// A request without a valid cookie gets an empty session marked `fresh`,
/// which handlers write back so the client is issued one.
#[derive(Debug, Clone)]
pub struct Session {
    data: SessionData,
    fresh: bool,
    manager: Arc<SessionManager>,
}

impl Session {
    pub fn data(&self) -> &SessionData {
        &self.data
    }

    /// Whether this request arrived without a usable session.
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    /// Replace the stored session wholesale.
    pub fn replace(&self, data: &SessionData) -> SetSession {
        self.manager.issue(data)
    }

    /// Issue the cookie for a session that was just started.
    pub fn persist_if_fresh(&self) -> Option<SetSession> {
        self.fresh.then(|| self.replace(&self.data))
    }
}

impl<S> FromRequestParts<S> for Session
where
    S: Send + Sync,
    Arc<SessionManager>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let manager = Arc::<SessionManager>::from_ref(state);
        let loaded = manager.load(&parts.headers);

        Ok(Session {
            fresh: loaded.is_none(),
            data: loaded.unwrap_or_default(),
            manager,
        })
    }
}

/// Response part that stores a session in the client's cookie.
pub struct SetSession(Option<SignedCookieJar>);

impl IntoResponseParts for SetSession {
    type Error = Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        match self.0 {
            Some(jar) => jar.into_response_parts(res),
            None => Ok(res),
        }
    }
}
