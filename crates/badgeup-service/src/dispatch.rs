//! Slash-command dispatch.
//!
//! Turns the raw `command` / `text` pair Slack sends into a typed [`Command`],
//! then runs it against the community as exactly one core operation. Parsing
//! never touches shared state, so it happens before the lock is taken.

use serde::Serialize;

use badgeup_core::{
    AnswerId, BestAnswerSelected, Community, CommunityError, KudosGiven, Question, QuestionId,
    QuestionPosted, Ranking, Standing, UserId,
};

/// A parsed slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `/kudos <@user> <reason…>`
    Kudos {
        /// Who gets the points.
        recipient: UserId,
        /// Why.
        reason: String,
    },
    /// `/badge give <@user> <badge…>`
    BadgeGive {
        /// Who gets the badge.
        recipient: UserId,
        /// Badge name.
        badge: String,
    },
    /// `/badge show [<@user>]`
    BadgeShow {
        /// Whose badges; the caller when absent.
        target: Option<UserId>,
    },
    /// `/badge remove <badge…>`
    BadgeRemove {
        /// Badge name.
        badge: String,
    },
    /// `/domain add <name…>`
    DomainAdd {
        /// Domain name.
        domain: String,
    },
    /// `/domain list`
    DomainList,
    /// `/domain show`
    DomainShow,
    /// `/domain remove <name…>`
    DomainRemove {
        /// Domain name.
        domain: String,
    },
    /// `/question <domain> <text…>`
    Ask {
        /// Domain the question belongs to.
        domain: String,
        /// Question text.
        body: String,
    },
    /// `/answer <Qn> <text…>`
    Answer {
        /// Question being answered.
        question_id: QuestionId,
        /// Answer text.
        body: String,
    },
    /// `/answer <Qn> best <An> [points] [badge…]`
    BestAnswer {
        /// Question being resolved.
        question_id: QuestionId,
        /// Chosen answer.
        answer_id: AnswerId,
        /// Payout override.
        points: Option<i64>,
        /// Extra badge for the answer author.
        badge: Option<String>,
    },
    /// `/experts <domain>`
    Experts {
        /// Domain to look up.
        domain: String,
    },
    /// `/leaderboard [domain]`
    Leaderboard {
        /// Rank lifetime points in this domain instead of the current period.
        domain: Option<String>,
    },
    /// `/question-query [domain]`
    QuestionQuery {
        /// Optional domain filter.
        domain: Option<String>,
    },
}

const KUDOS_USAGE: &str = "usage: /kudos @user <reason>";
const BADGE_USAGE: &str = "usage: /badge give @user <badge> | /badge show [@user] | /badge remove <badge>";
const DOMAIN_USAGE: &str = "usage: /domain add <name> | /domain list | /domain show | /domain remove <name>";
const QUESTION_USAGE: &str = "usage: /question <domain> <question>";
const ANSWER_USAGE: &str = "usage: /answer <question-id> <answer> | /answer <question-id> best <answer-id> [points] [badge]";
const EXPERTS_USAGE: &str = "usage: /experts <domain>";

fn usage(text: &str) -> CommunityError {
    CommunityError::InvalidArgument(text.to_string())
}

/// Extract a user id from a Slack mention: `<@U123|name>`, `<@U123>` or `@U123`.
#[must_use]
pub fn parse_mention(token: &str) -> Option<UserId> {
    let raw = if let Some(inner) = token.strip_prefix("<@").and_then(|t| t.strip_suffix('>')) {
        inner.split('|').next().unwrap_or(inner)
    } else {
        token.strip_prefix('@')?
    };
    UserId::new(raw).ok()
}

/// Join the remaining tokens, or `None` if there are none.
fn rest(tokens: &[&str]) -> Option<String> {
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

impl Command {
    /// Parse a slash command.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` with a usage hint for unknown commands or
    /// missing arguments, and `InvalidId` for malformed question/answer ids.
    pub fn parse(command: &str, text: &str) -> Result<Self, CommunityError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        match command.trim() {
            "/kudos" => Self::parse_kudos(&tokens),
            "/badge" => Self::parse_badge(&tokens),
            "/domain" => Self::parse_domain(&tokens),
            "/question" => match tokens.split_first() {
                Some((domain, body)) if !body.is_empty() => Ok(Self::Ask {
                    domain: (*domain).to_string(),
                    body: body.join(" "),
                }),
                _ => Err(usage(QUESTION_USAGE)),
            },
            "/answer" => Self::parse_answer(&tokens),
            "/experts" => rest(&tokens)
                .map(|domain| Self::Experts { domain })
                .ok_or_else(|| usage(EXPERTS_USAGE)),
            "/leaderboard" => Ok(Self::Leaderboard {
                domain: rest(&tokens),
            }),
            "/question-query" => Ok(Self::QuestionQuery {
                domain: rest(&tokens),
            }),
            other => Err(CommunityError::InvalidArgument(format!(
                "unknown command: {other}"
            ))),
        }
    }

    fn parse_kudos(tokens: &[&str]) -> Result<Self, CommunityError> {
        let (target, reason) = tokens.split_first().ok_or_else(|| usage(KUDOS_USAGE))?;
        let recipient = parse_mention(target).ok_or_else(|| usage(KUDOS_USAGE))?;
        let reason = rest(reason).ok_or_else(|| usage(KUDOS_USAGE))?;
        Ok(Self::Kudos { recipient, reason })
    }

    fn parse_badge(tokens: &[&str]) -> Result<Self, CommunityError> {
        match tokens {
            ["give", target, badge @ ..] => {
                let recipient = parse_mention(target).ok_or_else(|| usage(BADGE_USAGE))?;
                let badge = rest(badge).ok_or_else(|| usage(BADGE_USAGE))?;
                Ok(Self::BadgeGive { recipient, badge })
            }
            ["show"] => Ok(Self::BadgeShow { target: None }),
            ["show", target] => parse_mention(target)
                .map(|user| Self::BadgeShow { target: Some(user) })
                .ok_or_else(|| usage(BADGE_USAGE)),
            ["remove", badge @ ..] => rest(badge)
                .map(|badge| Self::BadgeRemove { badge })
                .ok_or_else(|| usage(BADGE_USAGE)),
            _ => Err(usage(BADGE_USAGE)),
        }
    }

    fn parse_domain(tokens: &[&str]) -> Result<Self, CommunityError> {
        match tokens {
            ["add", name @ ..] => rest(name)
                .map(|domain| Self::DomainAdd { domain })
                .ok_or_else(|| usage(DOMAIN_USAGE)),
            ["list"] => Ok(Self::DomainList),
            ["show"] => Ok(Self::DomainShow),
            ["remove", name @ ..] => rest(name)
                .map(|domain| Self::DomainRemove { domain })
                .ok_or_else(|| usage(DOMAIN_USAGE)),
            _ => Err(usage(DOMAIN_USAGE)),
        }
    }

    fn parse_answer(tokens: &[&str]) -> Result<Self, CommunityError> {
        let (question, remaining) = tokens.split_first().ok_or_else(|| usage(ANSWER_USAGE))?;
        let question_id: QuestionId = question.parse()?;
        match remaining {
            ["best", answer, extra @ ..] => {
                let answer_id: AnswerId = answer.parse()?;
                let (points, badge_tokens) = match extra.split_first() {
                    Some((first, tail)) => match first.parse::<i64>() {
                        Ok(points) => (Some(points), tail),
                        Err(_) => (None, extra),
                    },
                    None => (None, extra),
                };
                Ok(Self::BestAnswer {
                    question_id,
                    answer_id,
                    points,
                    badge: rest(badge_tokens),
                })
            }
            ["best"] => Err(usage(ANSWER_USAGE)),
            body => rest(body)
                .map(|body| Self::Answer { question_id, body })
                .ok_or_else(|| usage(ANSWER_USAGE)),
        }
    }
}

/// A question as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionView {
    /// Question id.
    pub id: QuestionId,
    /// Domain.
    pub domain: String,
    /// Asker.
    pub author: UserId,
    /// Question text.
    pub body: String,
    /// Number of answers.
    pub answer_count: usize,
    /// Best answer, if resolved.
    pub best_answer: Option<BestAnswerView>,
}

/// The best answer of a resolved question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestAnswerView {
    /// Answer id.
    pub id: AnswerId,
    /// Answer author.
    pub author: UserId,
    /// Answer text.
    pub body: String,
}

impl From<&Question> for QuestionView {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id,
            domain: question.domain.clone(),
            author: question.author.clone(),
            body: question.body.clone(),
            answer_count: question.answers.len(),
            best_answer: question.best().map(|answer| BestAnswerView {
                id: answer.id,
                author: answer.author.clone(),
                body: answer.body.clone(),
            }),
        }
    }
}

/// What a command did, for the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Kudos awarded.
    Kudos {
        /// Who gave it.
        giver: UserId,
        /// Ledger result.
        given: KudosGiven,
        /// Why.
        reason: String,
    },
    /// Badge handed out by hand.
    BadgeGranted {
        /// Recipient.
        recipient: UserId,
        /// Badge name.
        badge: String,
        /// False when the recipient already held it.
        newly_granted: bool,
    },
    /// A user's badges.
    Badges {
        /// Whose badges.
        user: UserId,
        /// Badge names.
        badges: Vec<String>,
    },
    /// Badge removal.
    BadgeRemoved {
        /// Badge name.
        badge: String,
        /// Whether it existed.
        existed: bool,
    },
    /// Expertise declared.
    DomainAdded {
        /// Who declared.
        user: UserId,
        /// Domain name.
        domain: String,
    },
    /// All known domains.
    Domains(Vec<String>),
    /// A user's declared domains.
    UserDomains {
        /// Whose domains.
        user: UserId,
        /// Domain names.
        domains: Vec<String>,
    },
    /// Domain removal.
    DomainRemoved {
        /// Domain name.
        domain: String,
        /// Whether it existed.
        existed: bool,
    },
    /// Question posted.
    QuestionPosted {
        /// Asker.
        author: UserId,
        /// Domain.
        domain: String,
        /// Question text.
        body: String,
        /// Id and tagged experts.
        posted: QuestionPosted,
    },
    /// Answer recorded.
    AnswerAdded {
        /// Question answered.
        question_id: QuestionId,
        /// New answer id.
        answer_id: AnswerId,
        /// Answer author.
        author: UserId,
        /// Answer text.
        body: String,
    },
    /// Best answer chosen.
    BestAnswer(BestAnswerSelected),
    /// Experts for a domain.
    Experts {
        /// Domain.
        domain: String,
        /// Qualified users.
        experts: Vec<UserId>,
    },
    /// Leaderboard.
    Leaderboard {
        /// What was ranked.
        ranking: Ranking,
        /// Rows, best first.
        standings: Vec<Standing>,
    },
    /// Question listing.
    Questions {
        /// Filter used.
        domain: Option<String>,
        /// Matching questions.
        questions: Vec<QuestionView>,
    },
}

impl Outcome {
    /// Whether the result should be announced to the whole channel.
    #[must_use]
    pub const fn is_public(&self) -> bool {
        matches!(
            self,
            Self::Kudos { .. }
                | Self::BadgeGranted {
                    newly_granted: true,
                    ..
                }
                | Self::DomainAdded { .. }
                | Self::QuestionPosted { .. }
                | Self::AnswerAdded { .. }
                | Self::BestAnswer(_)
                | Self::Leaderboard { .. }
                | Self::Questions { .. }
        )
    }
}

/// Run one command as `actor`.
///
/// # Errors
///
/// Propagates the core error; the community is unchanged in that case.
pub fn execute(
    community: &mut Community,
    actor: &UserId,
    command: Command,
) -> Result<Outcome, CommunityError> {
    let outcome = match command {
        Command::Kudos { recipient, reason } => {
            let given = community.give_kudos(actor, &recipient, &reason)?;
            Outcome::Kudos {
                giver: actor.clone(),
                given,
                reason,
            }
        }
        Command::BadgeGive { recipient, badge } => {
            let newly_granted = community.grant_badge(&recipient, &badge)?;
            Outcome::BadgeGranted {
                recipient,
                badge: badge.trim().to_string(),
                newly_granted,
            }
        }
        Command::BadgeShow { target } => {
            let user = target.unwrap_or_else(|| actor.clone());
            let badges = community.badges_of(&user).to_vec();
            Outcome::Badges { user, badges }
        }
        Command::BadgeRemove { badge } => {
            let existed = community.remove_badge(&badge);
            Outcome::BadgeRemoved { badge, existed }
        }
        Command::DomainAdd { domain } => {
            community.declare_expertise(actor, &domain)?;
            Outcome::DomainAdded {
                user: actor.clone(),
                domain: domain.trim().to_string(),
            }
        }
        Command::DomainList => Outcome::Domains(community.list_domains().to_vec()),
        Command::DomainShow => Outcome::UserDomains {
            user: actor.clone(),
            domains: community.domains_of(actor).to_vec(),
        },
        Command::DomainRemove { domain } => {
            let existed = community.remove_domain(&domain);
            Outcome::DomainRemoved { domain, existed }
        }
        Command::Ask { domain, body } => {
            let posted = community.create_question(&domain, actor, &body)?;
            Outcome::QuestionPosted {
                author: actor.clone(),
                domain,
                body,
                posted,
            }
        }
        Command::Answer { question_id, body } => {
            let answer_id = community.add_answer(question_id, actor, &body)?;
            Outcome::AnswerAdded {
                question_id,
                answer_id,
                author: actor.clone(),
                body,
            }
        }
        Command::BestAnswer {
            question_id,
            answer_id,
            points,
            badge,
        } => Outcome::BestAnswer(community.select_best_answer(
            question_id,
            actor,
            answer_id,
            points,
            badge.as_deref(),
        )?),
        Command::Experts { domain } => Outcome::Experts {
            experts: community.find_experts(&domain),
            domain,
        },
        Command::Leaderboard { domain } => {
            let ranking = domain.map_or(Ranking::CurrentPeriod, Ranking::Lifetime);
            let standings = community.leaderboard(None, &ranking);
            Outcome::Leaderboard { ranking, standings }
        }
        Command::QuestionQuery { domain } => {
            let questions = community
                .list_questions(domain.as_deref())
                .into_iter()
                .map(QuestionView::from)
                .collect();
            Outcome::Questions { domain, questions }
        }
    };
    Ok(outcome)
}
