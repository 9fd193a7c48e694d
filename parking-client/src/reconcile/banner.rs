//! Error banner shown above lists and forms

use std::time::{Duration, Instant};

/// Transient banners disappear on their own after this long
pub const TRANSIENT_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerMode {
    /// Auto-dismissed after [`TRANSIENT_TTL`] (list operations)
    Transient,
    /// Stays until cleared (form submissions)
    Persistent,
}

#[derive(Debug, Clone)]
struct Raised {
    message: String,
    mode: BannerMode,
    at: Instant,
}

#[derive(Debug, Clone, Default)]
pub struct ErrorBanner {
    raised: Option<Raised>,
}

impl ErrorBanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, message: impl Into<String>, mode: BannerMode) {
        self.raise_at(message, mode, Instant::now());
    }

    pub fn raise_at(&mut self, message: impl Into<String>, mode: BannerMode, at: Instant) {
        self.raised = Some(Raised {
            message: message.into(),
            mode,
            at,
        });
    }

    pub fn clear(&mut self) {
        self.raised = None;
    }

    /// Message visible at `now`
    pub fn current(&self, now: Instant) -> Option<&str> {
        let raised = self.raised.as_ref()?;
        match raised.mode {
            BannerMode::Persistent => Some(&raised.message),
            BannerMode::Transient if now.duration_since(raised.at) < TRANSIENT_TTL => {
                Some(&raised.message)
            }
            BannerMode::Transient => None,
        }
    }

    /// Message visible right now
    pub fn message(&self) -> Option<&str> {
        self.current(Instant::now())
    }

    pub fn mode(&self) -> Option<BannerMode> {
        self.raised.as_ref().map(|r| r.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transient_expires_after_ttl() {
        let t0 = Instant::now();
        let mut banner = ErrorBanner::new();
        banner.raise_at("Failed to delete admin", BannerMode::Transient, t0);

        assert_eq!(banner.current(t0), Some("Failed to delete admin"));
        assert_eq!(
            banner.current(t0 + Duration::from_millis(2_999)),
            Some("Failed to delete admin")
        );
        assert_eq!(banner.current(t0 + TRANSIENT_TTL), None);
    }

    #[test]
    fn persistent_stays_until_cleared() {
        let t0 = Instant::now();
        let mut banner = ErrorBanner::new();
        banner.raise_at("Failed to create block", BannerMode::Persistent, t0);

        assert_eq!(
            banner.current(t0 + Duration::from_secs(60)),
            Some("Failed to create block")
        );
        banner.clear();
        assert_eq!(banner.current(t0), None);
        assert_eq!(banner.mode(), None);
    }
}
