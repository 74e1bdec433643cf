//! Leaderboard ranking.

use serde::{Deserialize, Serialize};

use crate::ids::UserId;
use crate::ledger::Ledger;

/// Which balance a leaderboard ranks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type", content = "domain")]
pub enum Ranking {
    /// Points earned this period.
    CurrentPeriod,
    /// Lifetime points in one domain.
    Lifetime(String),
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// The ranked user.
    pub user: UserId,
    /// Their balance for the chosen ranking.
    pub points: i64,
}

/// The top `n` users by `ranking`, highest first.
///
/// Users with a zero balance are left out. Ties keep the order in which users
/// first appeared in the ledger.
#[must_use]
pub fn top_n(ledger: &Ledger, n: usize, ranking: &Ranking) -> Vec<Standing> {
    let mut standings: Vec<Standing> = ledger
        .iter()
        .map(|(user, balance)| Standing {
            user: user.clone(),
            points: match ranking {
                Ranking::CurrentPeriod => balance.current_period,
                Ranking::Lifetime(domain) => balance.lifetime_in(domain),
            },
        })
        .filter(|standing| standing.points > 0)
        .collect();

    // sort_by is stable, so equal scores keep first-seen order
    standings.sort_by(|a, b| b.points.cmp(&a.points));
    standings.truncate(n);
    standings
}
