//! The community: one owned value holding the ledger, registry and board.
//!
//! Every user-facing operation is a method here, so callers hold a single lock
//! (or a single `&mut`) for the whole read-check-write sequence. Operations
//! validate before they write; a returned error means nothing changed.

use serde::Serialize;

use crate::board::{Board, Question};
use crate::config::CommunityConfig;
use crate::error::{CommunityError, Result};
use crate::experts::find_experts;
use crate::ids::{AnswerId, QuestionId, UserId};
use crate::leaderboard::{top_n, Ranking, Standing};
use crate::ledger::{Award, Ledger};
use crate::registry::Registry;

/// Result of a kudos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KudosGiven {
    /// Who received the kudos.
    pub recipient: UserId,
    /// Points awarded.
    pub points: i64,
    /// Recipient's current-period total afterwards.
    pub current_period_total: i64,
}

/// Result of posting a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionPosted {
    /// The new question.
    pub question_id: QuestionId,
    /// Experts in the question's domain, excluding the asker.
    pub experts: Vec<UserId>,
}

/// Result of choosing a best answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestAnswerSelected {
    /// The resolved question.
    pub question_id: QuestionId,
    /// The chosen answer.
    pub answer_id: AnswerId,
    /// Author of the chosen answer, who received the points.
    pub answer_author: UserId,
    /// Domain of the question.
    pub domain: String,
    /// Points paid out.
    pub points: i64,
    /// Author's lifetime total in the domain after the payout.
    pub lifetime_total: i64,
    /// Whether the payout crossed the badge threshold for the first time.
    pub badge_newly_earned: bool,
    /// Extra badge handed out by the asker, if it was newly granted.
    pub bonus_badge: Option<String>,
}

/// Shared state of one workspace.
#[derive(Debug, Clone, Default)]
pub struct Community {
    config: CommunityConfig,
    ledger: Ledger,
    registry: Registry,
    board: Board,
}

impl Community {
    /// Create an empty community with the given rules.
    #[must_use]
    pub fn new(config: CommunityConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The rules in effect.
    #[must_use]
    pub const fn config(&self) -> &CommunityConfig {
        &self.config
    }

    /// Read access to the ledger.
    #[must_use]
    pub const fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Read access to the registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Read access to the board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    // =========================================================================
    // Reputation
    // =========================================================================

    /// Award points directly. See [`Ledger::award`].
    ///
    /// A domain award that crosses the badge threshold also grants the
    /// domain's badge.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for non-positive amounts or a blank domain.
    pub fn award(&mut self, user: &UserId, amount: i64, domain: Option<&str>) -> Result<Award> {
        let domain = domain.map(|d| required_name(d, "domain")).transpose()?;
        let award = self.ledger.award(user, amount, domain)?;
        if let Some(domain) = domain {
            self.registry.ensure_domain(domain);
            self.unlock_threshold_badge(user, domain, &award);
        }
        Ok(award)
    }

    /// Current-period total for `user`.
    #[must_use]
    pub fn current_period_total(&self, user: &UserId) -> i64 {
        self.ledger.current_period_total(user)
    }

    /// Lifetime total for `user` in `domain`.
    #[must_use]
    pub fn lifetime_total(&self, user: &UserId, domain: &str) -> i64 {
        self.ledger.lifetime_total(user, domain)
    }

    /// Zero all current-period totals. Returns how many users were cleared.
    pub fn reset_period(&mut self) -> usize {
        let cleared = self.ledger.reset_period();
        tracing::info!(cleared, "Period totals reset");
        cleared
    }

    /// Give a kudos from `giver` to `recipient`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` when the reason is blank or the giver names
    /// themselves.
    pub fn give_kudos(&mut self, giver: &UserId, recipient: &UserId, reason: &str) -> Result<KudosGiven> {
        if reason.trim().is_empty() {
            return Err(CommunityError::invalid("kudos need a reason"));
        }
        if giver == recipient {
            return Err(CommunityError::invalid("you cannot give kudos to yourself"));
        }
        let points = self.config.kudos_points;
        let award = self.ledger.award(recipient, points, None)?;

        tracing::info!(giver = %giver, recipient = %recipient, points, "Kudos given");
        Ok(KudosGiven {
            recipient: recipient.clone(),
            points,
            current_period_total: award.current_period_total,
        })
    }

    // =========================================================================
    // Domains and badges
    // =========================================================================

    /// Register a domain. Returns whether it was new.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank name.
    pub fn ensure_domain(&mut self, name: &str) -> Result<bool> {
        let name = required_name(name, "domain")?;
        Ok(self.registry.ensure_domain(name))
    }

    /// Remove a domain. Unknown names are a no-op; returns whether it existed.
    pub fn remove_domain(&mut self, name: &str) -> bool {
        self.registry.remove_domain(name.trim())
    }

    /// Remove a badge from the registry and from every holder.
    ///
    /// Unknown names are a no-op; returns whether it existed.
    pub fn remove_badge(&mut self, name: &str) -> bool {
        self.registry.remove_badge(name.trim())
    }

    /// Declare `user` an expert in `domain`. Returns whether it was new.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank domain.
    pub fn declare_expertise(&mut self, user: &UserId, domain: &str) -> Result<bool> {
        let domain = required_name(domain, "domain")?;
        let added = self.registry.declare_expertise(user, domain);
        if added {
            tracing::info!(user_id = %user, domain = %domain, "Expertise declared");
        }
        Ok(added)
    }

    /// Grant a badge by hand. Returns whether it was newly granted.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank badge name.
    pub fn grant_badge(&mut self, user: &UserId, badge: &str) -> Result<bool> {
        let badge = required_name(badge, "badge")?;
        Ok(self.registry.grant_badge(user, badge))
    }

    /// Known domains in registration order.
    #[must_use]
    pub fn list_domains(&self) -> &[String] {
        self.registry.list_domains()
    }

    /// Known badges in registration order.
    #[must_use]
    pub fn list_badges(&self) -> &[String] {
        self.registry.list_badges()
    }

    /// Domains `user` declared.
    #[must_use]
    pub fn domains_of(&self, user: &UserId) -> &[String] {
        self.registry.domains_of(user)
    }

    /// Badges `user` earned.
    #[must_use]
    pub fn badges_of(&self, user: &UserId) -> &[String] {
        self.registry.badges_of(user)
    }

    /// Holders of `badge`.
    #[must_use]
    pub fn users_with_badge(&self, badge: &str) -> Vec<UserId> {
        self.registry.users_with_badge(badge)
    }

    /// Domains containing `typed`, ignoring case.
    #[must_use]
    pub fn suggest_domains(&self, typed: &str) -> Vec<String> {
        suggest(self.registry.list_domains(), typed)
    }

    /// Badges containing `typed`, ignoring case.
    #[must_use]
    pub fn suggest_badges(&self, typed: &str) -> Vec<String> {
        suggest(self.registry.list_badges(), typed)
    }

    // =========================================================================
    // Questions and answers
    // =========================================================================

    /// Post a question and return its id along with the experts to tag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a blank domain or body.
    pub fn create_question(&mut self, domain: &str, author: &UserId, body: &str) -> Result<QuestionPosted> {
        let domain = required_name(domain, "domain")?;
        let question_id = self.board.create_question(domain, author, body)?;
        self.registry.ensure_domain(domain);
        let experts = find_experts(&self.registry, domain, Some(author));
        Ok(QuestionPosted {
            question_id,
            experts,
        })
    }

    /// Answer a question.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown question, `InvalidArgument` for a blank body.
    pub fn add_answer(&mut self, question_id: QuestionId, author: &UserId, body: &str) -> Result<AnswerId> {
        self.board.add_answer(question_id, author, body)
    }

    /// Choose the best answer, pay its author and unlock badges.
    ///
    /// `points` defaults to the configured best-answer payout. `bonus_badge`
    /// is granted to the answer author on success.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden`, `AlreadyResolved`, `AnswerNotFound`, or
    /// `InvalidArgument` for non-positive points. On error neither the board
    /// nor the ledger changes.
    pub fn select_best_answer(
        &mut self,
        question_id: QuestionId,
        requester: &UserId,
        answer_id: AnswerId,
        points: Option<i64>,
        bonus_badge: Option<&str>,
    ) -> Result<BestAnswerSelected> {
        let points = points.unwrap_or(self.config.best_answer_points);
        let bonus_badge = bonus_badge.map(str::trim).filter(|b| !b.is_empty());

        let (question, answer) = self.board.check_best_answer(question_id, requester, answer_id)?;
        let domain = question.domain.clone();
        let answer_author = answer.author.clone();

        let award = self.ledger.award(&answer_author, points, Some(&domain))?;
        self.board.mark_best_answer(question_id, requester, answer_id)?;

        let badge_newly_earned = self.unlock_threshold_badge(&answer_author, &domain, &award);
        let bonus_badge = bonus_badge
            .filter(|badge| self.registry.grant_badge(&answer_author, badge))
            .map(str::to_string);

        tracing::info!(
            question_id = %question_id,
            answer_id = %answer_id,
            answer_author = %answer_author,
            points,
            badge_newly_earned,
            "Best answer selected"
        );

        Ok(BestAnswerSelected {
            question_id,
            answer_id,
            answer_author,
            domain,
            points,
            lifetime_total: award.lifetime_total.unwrap_or(award.amount),
            badge_newly_earned,
            bonus_badge,
        })
    }

    /// Look up a question.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn question(&self, id: QuestionId) -> Result<&Question> {
        self.board.question(id)
    }

    /// Questions in `domain` (case-insensitive), or all of them.
    #[must_use]
    pub fn list_questions(&self, domain: Option<&str>) -> Vec<&Question> {
        self.board.list_questions(domain)
    }

    // =========================================================================
    // Experts and rankings
    // =========================================================================

    /// Everyone qualified in `domain`, the caller included.
    #[must_use]
    pub fn find_experts(&self, domain: &str) -> Vec<UserId> {
        find_experts(&self.registry, domain.trim(), None)
    }

    /// Top `n` users by `ranking`; `n` defaults to the configured size.
    #[must_use]
    pub fn leaderboard(&self, n: Option<usize>, ranking: &Ranking) -> Vec<Standing> {
        top_n(&self.ledger, n.unwrap_or(self.config.leaderboard_size), ranking)
    }

    /// Grant the domain badge if this award moved the lifetime total from
    /// below the threshold to at or above it. Returns whether it was granted.
    fn unlock_threshold_badge(&mut self, user: &UserId, domain: &str, award: &Award) -> bool {
        let threshold = self.config.badge_threshold;
        let crossed = matches!(
            (award.previous_lifetime_total, award.lifetime_total),
            (Some(before), Some(after)) if before < threshold && after >= threshold
        );
        crossed && self.registry.grant_badge(user, domain)
    }
}

fn required_name<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CommunityError::invalid(format!("{what} name must not be empty")));
    }
    Ok(trimmed)
}

fn suggest(names: &[String], typed: &str) -> Vec<String> {
    let needle = typed.trim().to_lowercase();
    names
        .iter()
        .filter(|name| name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
