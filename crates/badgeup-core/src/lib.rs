//! Core state machine for BadgeUp.
//!
//! This crate holds everything with real rules in it, independent of how
//! commands arrive:
//!
//! - **Identifiers**: `UserId`, `QuestionId`, `AnswerId`
//! - **Ledger**: per-user current-period and lifetime-per-domain points
//! - **Registry**: domains, badges, declared expertise and earned badges
//! - **Board**: questions, answers and best-answer selection
//! - **Experts / Leaderboard**: derived views over the above
//!
//! All of it lives in one owned [`Community`] value. Callers that share it
//! between threads wrap it in a single lock.
//!
//! # Badges
//!
//! A user earns the badge named after a domain the first time their lifetime
//! points in that domain reach the threshold (50 by default). Badges can also
//! be handed out directly; either way a user holds a given badge at most once.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod board;
pub mod community;
pub mod config;
pub mod error;
pub mod experts;
pub mod ids;
pub mod leaderboard;
pub mod ledger;
pub mod registry;

pub use board::{Answer, Board, Question, QuestionStatus};
pub use community::{BestAnswerSelected, Community, KudosGiven, QuestionPosted};
pub use config::{
    CommunityConfig, DEFAULT_BADGE_THRESHOLD, DEFAULT_BEST_ANSWER_POINTS, DEFAULT_KUDOS_POINTS,
    DEFAULT_LEADERBOARD_SIZE,
};
pub use error::{CommunityError, ErrorKind, Result};
pub use ids::{AnswerId, IdError, QuestionId, UserId};
pub use leaderboard::{Ranking, Standing};
pub use ledger::{Award, Ledger, PointBalance};
pub use registry::Registry;
