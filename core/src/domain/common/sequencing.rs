use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::common::entities::app_errors::CoreError;

/// Identifier of one logical request within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Hands out monotonically increasing request tokens. Only a response carrying
/// the most recently issued token may be applied; anything older is stale.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> RequestToken {
        RequestToken(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        self.latest() == token.0
    }

    /// Passes `value` through if `token` is still current.
    pub fn accept<T>(&self, token: RequestToken, value: T) -> Result<T, CoreError> {
        let latest = self.latest();
        if latest == token.0 {
            Ok(value)
        } else {
            Err(CoreError::Superseded {
                token: token.0,
                latest,
            })
        }
    }
}
