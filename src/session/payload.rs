//! Session payload encoding.
//!
//! The cookie library signs whatever value it is given; this module only
//! turns [`SessionData`] into a cookie-safe value and back. The value is
//! the JSON form of the session, URL-safe base64 without padding.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use super::SessionData;

/// Why a verified cookie value could not be turned back into a session.
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("invalid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("invalid session payload: {0}")]
    Json(#[from] serde_json::Error),
}

impl PayloadError {
    /// Short label used for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            PayloadError::Encoding(_) => "encoding",
            PayloadError::Json(_) => "payload",
        }
    }
}

pub fn encode(data: &SessionData) -> Result<String, PayloadError> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(data)?))
}

pub fn decode(value: &str) -> Result<SessionData, PayloadError> {
    let json = URL_SAFE_NO_PAD.decode(value)?;
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::Item;

    #[test]
    fn test_decode_restores_encoded_session() {
        let data = SessionData::from(vec![Item::new("x"), Item::missing(), Item::new("a; b=\"c\"")]);
        let value = encode(&data).unwrap();
        assert_eq!(decode(&value).unwrap(), data);
    }

    #[test]
    fn test_value_is_cookie_safe() {
        let data = SessionData::from(vec![Item::new("spaces, commas; quotes\" and <tags>")]);
        let value = encode(&data).unwrap();
        assert!(value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_'));
    }

    #[test]
    fn test_garbage_reasons() {
        assert_eq!(decode("!!!").unwrap_err().reason(), "encoding");
        let not_a_session = URL_SAFE_NO_PAD.encode(b"[1,2");
        assert_eq!(decode(&not_a_session).unwrap_err().reason(), "payload");
    }
}
