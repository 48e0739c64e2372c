//! One-time admin registration codes.
//!
//! When the server starts without any admin account it issues a code and logs it. The
//! code lets exactly one registration request create an `admin` account and expires
//! after a fixed TTL whether or not it was used.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::server::util::random::alphanumeric;

/// Default lifetime of an issued code.
pub const ADMIN_CODE_TTL: Duration = Duration::from_secs(15 * 60);

const ADMIN_CODE_LENGTH: usize = 32;

struct IssuedCode {
    value: String,
    expires_at: Instant,
}

/// Holds at most one outstanding admin registration code in memory.
///
/// Cloning shares the same code between handlers.
#[derive(Clone)]
pub struct AdminCodeService {
    ttl: Duration,
    issued: Arc<RwLock<Option<IssuedCode>>>,
}

impl AdminCodeService {
    pub fn new() -> Self {
        Self::with_ttl(ADMIN_CODE_TTL)
    }

    /// Creates a service whose codes expire after `ttl`.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            issued: Arc::new(RwLock::new(None)),
        }
    }

    /// Issues a new code, replacing any outstanding one.
    ///
    /// # Returns
    /// - `String` - The 32-character alphanumeric code
    pub async fn generate(&self) -> String {
        let value = alphanumeric(ADMIN_CODE_LENGTH);

        *self.issued.write().await = Some(IssuedCode {
            value: value.clone(),
            expires_at: Instant::now() + self.ttl,
        });

        value
    }

    /// Checks `input` against the outstanding code and consumes it on a match.
    ///
    /// An expired code is discarded and never matches. A wrong guess leaves a valid code
    /// in place.
    ///
    /// # Returns
    /// - `true` - Code matched and has been consumed
    /// - `false` - No code, expired code, or mismatch
    pub async fn validate_and_consume(&self, input: &str) -> bool {
        let mut issued = self.issued.write().await;

        match issued.as_ref() {
            Some(code) if Instant::now() >= code.expires_at => {
                *issued = None;
                false
            }
            Some(code) if code.value == input => {
                *issued = None;
                true
            }
            _ => false,
        }
    }

    /// Whether an unexpired code is outstanding.
    pub async fn has_valid_code(&self) -> bool {
        self.issued
            .read()
            .await
            .as_ref()
            .is_some_and(|code| Instant::now() < code.expires_at)
    }
}

impl Default for AdminCodeService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Tests issuing a code.
    ///
    /// Expected: 32-character code and a valid code outstanding
    #[tokio::test]
    async fn generates_code() {
        let service = AdminCodeService::new();
        assert!(!service.has_valid_code().await);

        let code = service.generate().await;

        assert_eq!(code.len(), 32);
        assert!(service.has_valid_code().await);
    }

    /// Tests that a correct code works exactly once.
    ///
    /// Expected: first validation succeeds, second fails
    #[tokio::test]
    async fn code_is_single_use() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(service.validate_and_consume(&code).await);
        assert!(!service.validate_and_consume(&code).await);
        assert!(!service.has_valid_code().await);
    }

    /// Tests that a wrong guess does not burn the code.
    ///
    /// Expected: wrong code fails, correct code still succeeds afterwards
    #[tokio::test]
    async fn wrong_code_keeps_outstanding_code() {
        let service = AdminCodeService::new();
        let code = service.generate().await;

        assert!(!service.validate_and_consume("wrong").await);
        assert!(service.validate_and_consume(&code).await);
    }

    /// Tests validation without any issued code.
    ///
    /// Expected: false
    #[tokio::test]
    async fn fails_without_code() {
        let service = AdminCodeService::new();

        assert!(!service.validate_and_consume("anything").await);
    }

    /// Tests that a code past its TTL is rejected.
    ///
    /// Expected: expired code fails validation and is discarded
    #[tokio::test]
    async fn expired_code_is_rejected() {
        let service = AdminCodeService::with_ttl(Duration::ZERO);
        let code = service.generate().await;

        assert!(!service.has_valid_code().await);
        assert!(!service.validate_and_consume(&code).await);
    }

    /// Tests that issuing a new code replaces the old one.
    ///
    /// Expected: old code fails, new code succeeds
    #[tokio::test]
    async fn regenerating_replaces_code() {
        let service = AdminCodeService::new();
        let old = service.generate().await;
        let new = service.generate().await;

        assert!(!service.validate_and_consume(&old).await);
        assert!(service.validate_and_consume(&new).await);
    }
}
