//! Application Configuration

use platform::token::ACCESS_TOKEN_BYTES;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Application-wide secret mixed into every password hash
    pub password_pepper: Option<Vec<u8>>,
    /// Random bytes per issued access token
    pub access_token_bytes: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_pepper: None,
            access_token_bytes: ACCESS_TOKEN_BYTES,
        }
    }
}

impl AuthConfig {
    pub fn with_pepper(pepper: Vec<u8>) -> Self {
        Self {
            password_pepper: Some(pepper),
            ..Default::default()
        }
    }

    /// Read `PASSWORD_PEPPER` (standard base64) if it is set
    pub fn from_env() -> Result<Self, base64::DecodeError> {
        match std::env::var("PASSWORD_PEPPER") {
            Ok(encoded) if !encoded.trim().is_empty() => {
                Ok(Self::with_pepper(platform::crypto::from_base64(encoded.trim())?))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}
