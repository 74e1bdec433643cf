//! Tunable community rules.

use serde::{Deserialize, Serialize};

/// Lifetime points in a domain needed to earn that domain's badge.
pub const DEFAULT_BADGE_THRESHOLD: i64 = 50;

/// Points paid to the author of a best answer when none are specified.
pub const DEFAULT_BEST_ANSWER_POINTS: i64 = 10;

/// Points carried by a single `/kudos`.
pub const DEFAULT_KUDOS_POINTS: i64 = 5;

/// Number of entries shown on the leaderboard.
pub const DEFAULT_LEADERBOARD_SIZE: usize = 10;

/// Rules applied by a [`Community`](crate::Community).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Lifetime points in a domain required to earn its badge.
    pub badge_threshold: i64,

    /// Default payout for a best answer.
    pub best_answer_points: i64,

    /// Payout for one kudos.
    pub kudos_points: i64,

    /// Default leaderboard length.
    pub leaderboard_size: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            badge_threshold: DEFAULT_BADGE_THRESHOLD,
            best_answer_points: DEFAULT_BEST_ANSWER_POINTS,
            kudos_points: DEFAULT_KUDOS_POINTS,
            leaderboard_size: DEFAULT_LEADERBOARD_SIZE,
        }
    }
}
