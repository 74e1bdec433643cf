//! Periodic leaderboard reset.

use std::time::Duration;

use tokio::task::JoinHandle;

use crate::state::SharedCommunity;

/// Reset the current period every `interval`, under the community lock.
///
/// The first reset happens one full interval after start. Returns `None` when
/// `interval` is zero (timer disabled).
#[must_use]
pub fn spawn_period_reset(community: SharedCommunity, interval: Duration) -> Option<JoinHandle<()>> {
    if interval.is_zero() {
        tracing::info!("Periodic leaderboard reset disabled");
        return None;
    }

    tracing::info!(interval_secs = interval.as_secs(), "Periodic leaderboard reset scheduled");
    Some(tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // the first tick completes immediately
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let cleared = community.lock().await.reset_period();
            tracing::info!(cleared, "Scheduled period reset complete");
        }
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use tokio::sync::Mutex;

    use badgeup_core::{Community, UserId};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn resets_after_each_interval() {
        let community = Arc::new(Mutex::new(Community::default()));
        let user = UserId::new("U1").unwrap();
        community.lock().await.award(&user, 5, Some("rust")).unwrap();

        let handle = spawn_period_reset(Arc::clone(&community), Duration::from_secs(60)).unwrap();

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(community.lock().await.current_period_total(&user), 5);

        tokio::time::sleep(Duration::from_secs(31)).await;
        let guard = community.lock().await;
        assert_eq!(guard.current_period_total(&user), 0);
        assert_eq!(guard.lifetime_total(&user, "rust"), 5);
        drop(guard);
        handle.abort();
    }

    #[test]
    fn zero_interval_disables_timer() {
        let community = Arc::new(Mutex::new(Community::default()));
        assert!(spawn_period_reset(community, Duration::ZERO).is_none());
    }
}
