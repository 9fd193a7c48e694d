//! Optimistic state reconciliation
//!
//! Local state is changed first and the server is asked second. A failed
//! call restores the snapshot taken before the change and raises the
//! banner; a successful one may replace local entries with what the server
//! returned (server-assigned ids).

mod banner;
mod board;
mod roster;

use std::future::Future;

pub use banner::{BannerMode, ErrorBanner, TRANSIENT_TTL};
pub use board::{BoardState, ParkingBoard};
pub use roster::AdminRoster;

use crate::ClientResult;

/// How a failure is reported
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub mode: BannerMode,
    /// Shown when the server sent no message
    pub fallback: &'a str,
}

impl<'a> Report<'a> {
    pub fn transient(fallback: &'a str) -> Self {
        Self {
            mode: BannerMode::Transient,
            fallback,
        }
    }

    pub fn persistent(fallback: &'a str) -> Self {
        Self {
            mode: BannerMode::Persistent,
            fallback,
        }
    }
}

/// Snapshot, patch, call, then commit or roll back.
///
/// `patch` runs before `remote` is polled and the banner is cleared at the
/// same time. On `Ok(v)`, `commit(state, &v)` folds the server's answer in.
/// On `Err(e)`, `state` is restored to the snapshot and the banner shows
/// `e.user_message(report.fallback)`. The remote result is returned as-is.
pub async fn optimistic_apply<S, T, P, F, C>(
    state: &mut S,
    banner: &mut ErrorBanner,
    report: Report<'_>,
    patch: P,
    remote: F,
    commit: C,
) -> ClientResult<T>
where
    S: Clone,
    P: FnOnce(&mut S),
    F: Future<Output = ClientResult<T>>,
    C: FnOnce(&mut S, &T),
{
    let snapshot = state.clone();
    patch(state);
    banner.clear();

    match remote.await {
        Ok(value) => {
            commit(state, &value);
            Ok(value)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Remote call failed, rolling back");
            *state = snapshot;
            banner.raise(e.user_message(report.fallback), report.mode);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ClientError;

    #[tokio::test]
    async fn failure_restores_snapshot_and_raises_banner() {
        let mut state = vec![1, 2, 3];
        let mut banner = ErrorBanner::new();

        let result: ClientResult<()> = optimistic_apply(
            &mut state,
            &mut banner,
            Report::transient("Failed to update"),
            |s| s.retain(|n| *n != 2),
            async {
                Err(ClientError::Api {
                    status: 500,
                    message: None,
                })
            },
            |_, _| {},
        )
        .await;

        assert!(result.is_err());
        assert_eq!(state, vec![1, 2, 3]);
        assert_eq!(banner.message(), Some("Failed to update"));
        assert_eq!(banner.mode(), Some(BannerMode::Transient));
    }

    #[tokio::test]
    async fn success_keeps_patch_and_commits() {
        let mut state = vec![1];
        let mut banner = ErrorBanner::new();
        banner.raise("stale", BannerMode::Persistent);

        let value = optimistic_apply(
            &mut state,
            &mut banner,
            Report::persistent("Failed to create"),
            |s| s.push(0),
            async { Ok::<_, ClientError>(42) },
            |s, v| {
                if let Some(last) = s.last_mut() {
                    *last = *v;
                }
            },
        )
        .await
        .unwrap();

        assert_eq!(value, 42);
        assert_eq!(state, vec![1, 42]);
        assert_eq!(banner.message(), None);
    }
}
