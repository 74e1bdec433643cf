//! Reputation ledger.
//!
//! Tracks two balances per user: a current-period total that is zeroed by
//! [`Ledger::reset_period`], and lifetime totals per domain that only grow.
//! Users are created lazily on their first award and remembered in first-seen
//! order, which the leaderboard uses to break ties.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{CommunityError, Result};
use crate::ids::UserId;

/// Point balances for one user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointBalance {
    /// Points earned since the last period reset.
    pub current_period: i64,

    /// Lifetime points per domain. Never reset.
    pub lifetime: HashMap<String, i64>,
}

impl PointBalance {
    /// Lifetime points in `domain`, zero if none.
    #[must_use]
    pub fn lifetime_in(&self, domain: &str) -> i64 {
        self.lifetime.get(domain).copied().unwrap_or(0)
    }
}

/// Totals after a successful award.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Award {
    /// Points awarded.
    pub amount: i64,

    /// Current-period total after the award.
    pub current_period_total: i64,

    /// Lifetime total in the awarded domain, if one was given.
    pub lifetime_total: Option<i64>,

    /// Lifetime total in the awarded domain before the award.
    pub previous_lifetime_total: Option<i64>,
}

/// The per-user point ledger.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    balances: HashMap<UserId, PointBalance>,
    first_seen: Vec<UserId>,
}

impl Ledger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` points to `user`, and to their lifetime total in `domain`
    /// when one is given.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `amount` is not positive or a total would
    /// overflow. Nothing is written in that case.
    pub fn award(&mut self, user: &UserId, amount: i64, domain: Option<&str>) -> Result<Award> {
        if amount <= 0 {
            return Err(CommunityError::invalid(format!(
                "points must be positive, got {amount}"
            )));
        }

        let current = self.current_period_total(user);
        let current_period_total = current
            .checked_add(amount)
            .ok_or_else(|| CommunityError::invalid("current-period total overflow"))?;

        let previous_lifetime_total = domain.map(|d| self.lifetime_total(user, d));
        let lifetime_total = previous_lifetime_total
            .map(|prev| {
                prev.checked_add(amount)
                    .ok_or_else(|| CommunityError::invalid("lifetime total overflow"))
            })
            .transpose()?;

        let balance = self.entry(user);
        balance.current_period = current_period_total;
        if let (Some(domain), Some(total)) = (domain, lifetime_total) {
            balance.lifetime.insert(domain.to_string(), total);
        }

        tracing::debug!(
            user_id = %user,
            amount,
            domain = ?domain,
            current_period_total,
            "Points awarded"
        );

        Ok(Award {
            amount,
            current_period_total,
            lifetime_total,
            previous_lifetime_total,
        })
    }

    /// Current-period total, zero for unknown users.
    #[must_use]
    pub fn current_period_total(&self, user: &UserId) -> i64 {
        self.balances.get(user).map_or(0, |b| b.current_period)
    }

    /// Lifetime total in `domain`, zero if unknown.
    #[must_use]
    pub fn lifetime_total(&self, user: &UserId, domain: &str) -> i64 {
        self.balances.get(user).map_or(0, |b| b.lifetime_in(domain))
    }

    /// Zero every current-period total. Lifetime totals are untouched.
    ///
    /// Returns how many users had a non-zero balance before the reset.
    pub fn reset_period(&mut self) -> usize {
        let mut cleared = 0;
        for balance in self.balances.values_mut() {
            if balance.current_period != 0 {
                cleared += 1;
            }
            balance.current_period = 0;
        }
        cleared
    }

    /// Balance for `user`, if they have ever been awarded points.
    #[must_use]
    pub fn balance(&self, user: &UserId) -> Option<&PointBalance> {
        self.balances.get(user)
    }

    /// All known users with their balances, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&UserId, &PointBalance)> {
        self.first_seen
            .iter()
            .filter_map(|user| self.balances.get(user).map(|b| (user, b)))
    }

    fn entry(&mut self, user: &UserId) -> &mut PointBalance {
        if !self.balances.contains_key(user) {
            self.first_seen.push(user.clone());
        }
        self.balances.entry(user.clone()).or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn unknown_user_has_zero_balance() {
        let ledger = Ledger::new();
        assert_eq!(ledger.current_period_total(&user("U1")), 0);
        assert_eq!(ledger.lifetime_total(&user("U1"), "rust"), 0);
        assert!(ledger.balance(&user("U1")).is_none());
    }

    #[test]
    fn totals_are_sums_of_awards() {
        let mut ledger = Ledger::new();
        let u = user("U1");
        ledger.award(&u, 5, None).unwrap();
        ledger.award(&u, 10, Some("rust")).unwrap();
        ledger.award(&u, 7, Some("design")).unwrap();
        let last = ledger.award(&u, 3, Some("rust")).unwrap();

        assert_eq!(last.current_period_total, 25);
        assert_eq!(last.lifetime_total, Some(13));
        assert_eq!(last.previous_lifetime_total, Some(10));
        assert_eq!(ledger.current_period_total(&u), 25);
        assert_eq!(ledger.lifetime_total(&u, "rust"), 13);
        assert_eq!(ledger.lifetime_total(&u, "design"), 7);
    }

    #[test]
    fn non_positive_amounts_are_rejected_without_writes() {
        let mut ledger = Ledger::new();
        let u = user("U1");
        assert!(matches!(
            ledger.award(&u, 0, Some("rust")),
            Err(CommunityError::InvalidArgument(_))
        ));
        assert!(ledger.award(&u, -4, None).is_err());
        assert!(ledger.balance(&u).is_none());
        assert_eq!(ledger.iter().count(), 0);
    }

    #[test]
    fn overflow_leaves_balance_untouched() {
        let mut ledger = Ledger::new();
        let u = user("U1");
        ledger.award(&u, i64::MAX, None).unwrap();
        assert!(ledger.award(&u, 1, Some("rust")).is_err());
        assert_eq!(ledger.current_period_total(&u), i64::MAX);
        assert_eq!(ledger.lifetime_total(&u, "rust"), 0);
    }

    #[test]
    fn reset_zeroes_period_only() {
        let mut ledger = Ledger::new();
        let (a, b) = (user("A"), user("B"));
        ledger.award(&a, 10, Some("rust")).unwrap();
        ledger.award(&b, 4, None).unwrap();

        assert_eq!(ledger.reset_period(), 2);
        assert_eq!(ledger.current_period_total(&a), 0);
        assert_eq!(ledger.current_period_total(&b), 0);
        assert_eq!(ledger.lifetime_total(&a, "rust"), 10);
        assert_eq!(ledger.reset_period(), 0);
    }

    #[test]
    fn iteration_follows_first_seen_order() {
        let mut ledger = Ledger::new();
        for id in ["C", "A", "B", "A"] {
            ledger.award(&user(id), 1, None).unwrap();
        }
        let order: Vec<_> = ledger.iter().map(|(u, _)| u.as_str()).collect();
        assert_eq!(order, ["C", "A", "B"]);
    }
}
