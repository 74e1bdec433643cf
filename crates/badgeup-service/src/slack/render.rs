//! Rendering command outcomes as Slack messages.

use badgeup_core::{CommunityError, ErrorKind, Ranking, UserId};

use crate::dispatch::{Outcome, QuestionView};

use super::types::{Block, ResponseType, SlackResponse};

/// Slack mention markup for a user.
fn mention(user: &UserId) -> String {
    format!("<@{user}>")
}

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

fn mentions(users: &[UserId]) -> Vec<String> {
    users.iter().map(mention).collect()
}

fn question_line(q: &QuestionView) -> String {
    let mut line = format!("*{}* ({}) {} (posted by {})", q.id, q.domain, q.body, mention(&q.author));
    if let Some(best) = &q.best_answer {
        line.push_str(&format!(
            "\n:tada: Best Answer: \"{}\" by {}",
            best.body,
            mention(&best.author)
        ));
    }
    line
}

/// Render a successful outcome.
#[must_use]
pub fn render_outcome(outcome: &Outcome) -> SlackResponse {
    let (text, blocks) = match outcome {
        Outcome::Kudos {
            giver,
            given,
            reason,
        } => (
            format!("Kudos to {}!", mention(&given.recipient)),
            vec![
                Block::section(format!(
                    ":tada: *Kudos to {}!* (from {})",
                    mention(&given.recipient),
                    mention(giver)
                )),
                Block::Divider,
                Block::section(format!("*Why:* {reason}")),
                Block::section(format!(
                    "*Points:* {} | *Total:* {} :star2:",
                    given.points, given.current_period_total
                )),
            ],
        ),
        Outcome::BadgeGranted {
            recipient,
            badge,
            newly_granted,
        } => {
            let text = if *newly_granted {
                format!(":medal: {} earned the *{badge}* badge!", mention(recipient))
            } else {
                format!("{} already has the *{badge}* badge.", mention(recipient))
            };
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::Badges { user, badges } => {
            let text = format!(
                ":star2: {}'s badges: {}",
                mention(user),
                join_or(badges, "No badges yet.")
            );
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::BadgeRemoved { badge, existed } => {
            let text = if *existed {
                format!(":wastebasket: Badge *{badge}* removed.")
            } else {
                format!("No badge named *{badge}*, nothing to remove.")
            };
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::DomainAdded { user, domain } => {
            let text = format!(":bulb: {} added *{domain}* to their domains.", mention(user));
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::Domains(domains) => {
            let text = format!(":scroll: Current domains: {}", join_or(domains, "No domains yet."));
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::UserDomains { user, domains } => {
            let text = format!(
                ":bulb: {}'s domains: {}",
                mention(user),
                join_or(domains, "No domains yet.")
            );
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::DomainRemoved { domain, existed } => {
            let text = if *existed {
                format!(":wastebasket: Domain *{domain}* removed.")
            } else {
                format!("No domain named *{domain}*, nothing to remove.")
            };
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::QuestionPosted {
            author,
            domain,
            body,
            posted,
        } => (
            format!("New question about {domain}: {}", posted.question_id),
            vec![
                Block::section(format!(
                    ":question: *New Question about {domain}*\n*ID:* {}\nPosted by {}:\n\"{body}\"",
                    posted.question_id,
                    mention(author)
                )),
                Block::section(format!(
                    ":bulb: Experts tagged: {}",
                    join_or(&mentions(&posted.experts), "None")
                )),
            ],
        ),
        Outcome::AnswerAdded {
            question_id,
            answer_id,
            author,
            body,
        } => {
            let text = format!(
                ":bulb: {} answered question *{question_id}* (answer *{answer_id}*):\n\"{body}\"",
                mention(author)
            );
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::BestAnswer(selected) => {
            let mut blocks = vec![
                Block::section(format!(
                    ":tada: *Best Answer!* {} for question {} ({})",
                    mention(&selected.answer_author),
                    selected.question_id,
                    selected.answer_id
                )),
                Block::section(format!(
                    "Awarded {} points. Lifetime *{}* points: {}",
                    selected.points, selected.domain, selected.lifetime_total
                )),
            ];
            if selected.badge_newly_earned {
                blocks.push(Block::section(format!(
                    ":medal: {} unlocked the *{}* badge!",
                    mention(&selected.answer_author),
                    selected.domain
                )));
            }
            if let Some(badge) = &selected.bonus_badge {
                blocks.push(Block::section(format!(
                    ":medal: {} also earned the *{badge}* badge!",
                    mention(&selected.answer_author)
                )));
            }
            (
                format!("Best answer for {}", selected.question_id),
                blocks,
            )
        }
        Outcome::Experts { domain, experts } => {
            let text = format!(
                ":mag: Experts in *{domain}*: {}",
                join_or(&mentions(experts), "None yet.")
            );
            (text.clone(), vec![Block::section(text)])
        }
        Outcome::Leaderboard { ranking, standings } => {
            let title = match ranking {
                Ranking::CurrentPeriod => ":trophy: *Leaderboard*".to_string(),
                Ranking::Lifetime(domain) => format!(":trophy: *Leaderboard: {domain}*"),
            };
            let rows: Vec<String> = standings
                .iter()
                .enumerate()
                .map(|(i, s)| format!("{}. {} *{} points*", i + 1, mention(&s.user), s.points))
                .collect();
            let body = if rows.is_empty() {
                "No kudos yet.".to_string()
            } else {
                rows.join("\n")
            };
            (
                "Leaderboard".to_string(),
                vec![Block::section(title), Block::Divider, Block::section(body)],
            )
        }
        Outcome::Questions { domain, questions } => {
            let header = match domain {
                Some(domain) => format!(":scroll: Questions about {domain}:"),
                None => ":scroll: Questions:".to_string(),
            };
            let body = if questions.is_empty() {
                "No questions found.".to_string()
            } else {
                questions
                    .iter()
                    .map(question_line)
                    .collect::<Vec<_>>()
                    .join("\n")
            };
            let text = format!("{header}\n{body}");
            (text.clone(), vec![Block::section(text)])
        }
    };

    SlackResponse {
        response_type: if outcome.is_public() {
            ResponseType::InChannel
        } else {
            ResponseType::Ephemeral
        },
        text,
        blocks,
    }
}

/// Render a failed command, visible only to the caller.
#[must_use]
pub fn render_error(err: &CommunityError) -> SlackResponse {
    let text = match err.kind() {
        ErrorKind::Forbidden => format!(":no_entry: {err}"),
        ErrorKind::NotFound | ErrorKind::AlreadyResolved => format!(":warning: {err}"),
        ErrorKind::InvalidArgument => format!(":grey_question: {err}"),
    };
    SlackResponse {
        response_type: ResponseType::Ephemeral,
        blocks: vec![Block::section(text.clone())],
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use badgeup_core::{AnswerId, BestAnswerSelected, QuestionId, Standing};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn section_texts(response: &SlackResponse) -> Vec<String> {
        response
            .blocks
            .iter()
            .filter_map(|b| match b {
                Block::Section { text } => Some(text.text.clone()),
                Block::Divider => None,
            })
            .collect()
    }

    #[test]
    fn leaderboard_lists_rank_and_points() {
        let response = render_outcome(&Outcome::Leaderboard {
            ranking: Ranking::CurrentPeriod,
            standings: vec![
                Standing {
                    user: user("B"),
                    points: 30,
                },
                Standing {
                    user: user("C"),
                    points: 20,
                },
            ],
        });
        assert!(response.is_public());
        assert_eq!(
            section_texts(&response)[1],
            "1. <@B> *30 points*\n2. <@C> *20 points*"
        );
    }

    #[test]
    fn best_answer_mentions_unlocked_badge() {
        let response = render_outcome(&Outcome::BestAnswer(BestAnswerSelected {
            question_id: QuestionId::new(1).unwrap(),
            answer_id: AnswerId::new(2).unwrap(),
            answer_author: user("U1"),
            domain: "rust".into(),
            points: 10,
            lifetime_total: 50,
            badge_newly_earned: true,
            bonus_badge: None,
        }));
        let texts = section_texts(&response);
        assert_eq!(texts.len(), 3);
        assert!(texts[2].contains("unlocked the *rust* badge"));
    }

    #[test]
    fn errors_are_ephemeral() {
        let response = render_error(&CommunityError::Forbidden {
            reason: "nope".into(),
        });
        assert_eq!(response.response_type, ResponseType::Ephemeral);
        assert_eq!(response.text, ":no_entry: forbidden: nope");
    }

    #[test]
    fn empty_listings_have_placeholders() {
        let response = render_outcome(&Outcome::Domains(Vec::new()));
        assert_eq!(response.text, ":scroll: Current domains: No domains yet.");
        assert!(!response.is_public());
    }
}
