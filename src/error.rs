//! Error types for the ambient layers (settings, DOM wiring)
//!
//! The sequencing core never fails; these only cover configuration and
//! platform plumbing.

pub type CardResult<T> = Result<T, CardError>;

#[derive(thiserror::Error, Debug)]
pub enum CardError {
    #[error("settings error: {0}")]
    Settings(String),

    #[error("missing element: #{0}")]
    MissingElement(String),

    #[error("platform error: {0}")]
    Platform(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl CardError {
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement(id.into())
    }

    pub fn platform(msg: impl Into<String>) -> Self {
        Self::Platform(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            CardError::settings("x")
                .to_string()
                .contains("settings error:")
        );
        assert_eq!(
            CardError::missing_element("hug-btn").to_string(),
            "missing element: #hug-btn"
        );
        assert!(
            CardError::platform("x")
                .to_string()
                .contains("platform error:")
        );
    }

    #[test]
    fn json_preserves_source() {
        let err: CardError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, CardError::Json(_)));
    }
}
