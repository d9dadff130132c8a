use subtle::ConstantTimeEq;

use crate::error::AppError;

/// 요청 본문의 `secretKey` 검증기
#[derive(Clone)]
pub struct SecretKeyValidator {
    expected_key: String,
}

impl SecretKeyValidator {
    pub fn new(expected_key: impl Into<String>) -> Self {
        Self {
            expected_key: expected_key.into(),
        }
    }

    /// Constant-time comparison so response timing does not leak the key.
    pub fn validate(&self, provided_key: &str) -> Result<(), AppError> {
        let matches: bool = self
            .expected_key
            .as_bytes()
            .ct_eq(provided_key.as_bytes())
            .into();

        if !matches {
            tracing::warn!(
                event = "invalid_secret_key_attempt",
                "Invalid secret key attempt detected"
            );
            return Err(AppError::InvalidSecretKey);
        }

        Ok(())
    }
}
