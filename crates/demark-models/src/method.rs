//! Watermark removal method.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// How the watermark region is removed from each frame.
///
/// This is a closed set: anything other than `inpaint` or `blur` is a
/// validation error, never an implicit fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Reconstruct the region from surrounding content (Telea inpainting).
    #[default]
    Inpaint,
    /// Obscure the region with a strong Gaussian blur.
    Blur,
}

/// Error returned when parsing an unknown method name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown removal method '{0}', expected 'inpaint' or 'blur'")]
pub struct MethodParseError(pub String);

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Inpaint => "inpaint",
            Method::Blur => "blur",
        }
    }
}

impl FromStr for Method {
    type Err = MethodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "inpaint" => Ok(Method::Inpaint),
            "blur" => Ok(Method::Blur),
            other => Err(MethodParseError(other.to_string())),
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_methods() {
        assert_eq!("inpaint".parse::<Method>().unwrap(), Method::Inpaint);
        assert_eq!("blur".parse::<Method>().unwrap(), Method::Blur);
    }

    #[test]
    fn test_parse_unknown_method_is_an_error() {
        let err = "pixelate".parse::<Method>().unwrap_err();
        assert!(err.to_string().contains("pixelate"));
        // Case-sensitive: form values are lowercased by the UI.
        assert!("Inpaint".parse::<Method>().is_err());
    }

    #[test]
    fn test_default_is_inpaint() {
        assert_eq!(Method::default(), Method::Inpaint);
    }

    #[test]
    fn test_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Method::Inpaint).unwrap(), "\"inpaint\"");
    }
}
