//! Q&A board.
//!
//! Each question is `Open` until its author picks a best answer, after which it
//! is `Resolved` for good. Answers can still be added to a resolved question;
//! they are recorded but can never become the best answer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CommunityError, Result};
use crate::ids::{AnswerId, QuestionId, UserId};

/// Lifecycle state of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// No best answer yet.
    Open,
    /// A best answer has been chosen.
    Resolved,
}

/// An answer to a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    /// Identifier, unique within the question.
    pub id: AnswerId,

    /// Who wrote the answer.
    pub author: UserId,

    /// Answer text.
    pub body: String,

    /// Whether this is the question's best answer.
    pub is_best: bool,

    /// When the answer was posted.
    pub created_at: DateTime<Utc>,
}

/// A question posted to a domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Question identifier.
    pub id: QuestionId,

    /// Domain the question is tagged with.
    pub domain: String,

    /// Who asked.
    pub author: UserId,

    /// Question text.
    pub body: String,

    /// When the question was posted.
    pub created_at: DateTime<Utc>,

    /// Answers in posting order.
    pub answers: Vec<Answer>,

    /// The chosen answer, once resolved.
    pub best_answer: Option<AnswerId>,
}

impl Question {
    /// Current lifecycle state.
    #[must_use]
    pub const fn status(&self) -> QuestionStatus {
        if self.best_answer.is_some() {
            QuestionStatus::Resolved
        } else {
            QuestionStatus::Open
        }
    }

    /// Look up an answer by id.
    #[must_use]
    pub fn answer(&self, id: AnswerId) -> Option<&Answer> {
        self.answers.iter().find(|a| a.id == id)
    }

    /// The best answer, if the question is resolved.
    #[must_use]
    pub fn best(&self) -> Option<&Answer> {
        self.best_answer.and_then(|id| self.answer(id))
    }
}

/// All questions, in posting order.
#[derive(Debug, Clone, Default)]
pub struct Board {
    questions: Vec<Question>,
}

fn required_text(value: &str, what: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CommunityError::invalid(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Post a new question and return its id.
    ///
    /// Domain registration is the caller's job.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the domain or body is blank.
    pub fn create_question(&mut self, domain: &str, author: &UserId, body: &str) -> Result<QuestionId> {
        let domain = required_text(domain, "domain")?;
        let body = required_text(body, "question text")?;
        let sequence = u64::try_from(self.questions.len())
            .map_err(|_| CommunityError::invalid("too many questions"))?
            + 1;
        let id = QuestionId::new(sequence)?;

        self.questions.push(Question {
            id,
            domain,
            author: author.clone(),
            body,
            created_at: Utc::now(),
            answers: Vec::new(),
            best_answer: None,
        });

        tracing::info!(question_id = %id, author = %author, "Question posted");
        Ok(id)
    }

    /// Append an answer to a question.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the question does not exist.
    /// - `InvalidArgument` if the body is blank.
    pub fn add_answer(&mut self, question_id: QuestionId, author: &UserId, body: &str) -> Result<AnswerId> {
        let body = required_text(body, "answer text")?;
        let question = self.question_mut(question_id)?;
        let sequence = u32::try_from(question.answers.len())
            .map_err(|_| CommunityError::invalid("too many answers"))?
            + 1;
        let id = AnswerId::new(sequence)?;

        question.answers.push(Answer {
            id,
            author: author.clone(),
            body,
            is_best: false,
            created_at: Utc::now(),
        });

        tracing::info!(question_id = %question_id, answer_id = %id, author = %author, "Answer added");
        Ok(id)
    }

    /// Check that `requester` may make `answer_id` the best answer, without
    /// changing anything.
    ///
    /// Checks run in order: question exists, requester is the author, question
    /// is still open, answer exists.
    ///
    /// # Errors
    ///
    /// `NotFound`, `Forbidden`, `AlreadyResolved` or `AnswerNotFound`.
    pub fn check_best_answer(
        &self,
        question_id: QuestionId,
        requester: &UserId,
        answer_id: AnswerId,
    ) -> Result<(&Question, &Answer)> {
        let question = self.question(question_id)?;
        if &question.author != requester {
            return Err(CommunityError::Forbidden {
                reason: format!("only the author of {question_id} can choose its best answer"),
            });
        }
        if question.best_answer.is_some() {
            return Err(CommunityError::AlreadyResolved { question_id });
        }
        let answer = question
            .answer(answer_id)
            .ok_or(CommunityError::AnswerNotFound {
                question_id,
                answer_id,
            })?;
        Ok((question, answer))
    }

    /// Mark `answer_id` as best and resolve the question.
    ///
    /// # Errors
    ///
    /// Same as [`Board::check_best_answer`].
    pub fn mark_best_answer(
        &mut self,
        question_id: QuestionId,
        requester: &UserId,
        answer_id: AnswerId,
    ) -> Result<&Answer> {
        self.check_best_answer(question_id, requester, answer_id)?;
        let question = self.question_mut(question_id)?;
        question.best_answer = Some(answer_id);
        let answer = question
            .answers
            .iter_mut()
            .find(|a| a.id == answer_id)
            .ok_or(CommunityError::AnswerNotFound {
                question_id,
                answer_id,
            })?;
        answer.is_best = true;

        tracing::info!(question_id = %question_id, answer_id = %answer_id, "Question resolved");
        Ok(answer)
    }

    /// Look up a question.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if it does not exist.
    pub fn question(&self, id: QuestionId) -> Result<&Question> {
        usize::try_from(id.sequence() - 1)
            .ok()
            .and_then(|index| self.questions.get(index))
            .ok_or_else(|| not_found(id))
    }

    /// Questions whose domain equals `domain` ignoring case, or all questions
    /// when no filter is given. Posting order.
    #[must_use]
    pub fn list_questions(&self, domain: Option<&str>) -> Vec<&Question> {
        let wanted = domain.map(|d| d.trim().to_lowercase());
        self.questions
            .iter()
            .filter(|q| {
                wanted
                    .as_ref()
                    .map_or(true, |d| q.domain.to_lowercase() == *d)
            })
            .collect()
    }

    fn question_mut(&mut self, id: QuestionId) -> Result<&mut Question> {
        usize::try_from(id.sequence() - 1)
            .ok()
            .and_then(|index| self.questions.get_mut(index))
            .ok_or_else(|| not_found(id))
    }
}

fn not_found(id: QuestionId) -> CommunityError {
    CommunityError::NotFound {
        entity: "question",
        id: id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn qid(n: u64) -> QuestionId {
        QuestionId::new(n).unwrap()
    }

    fn aid(n: u32) -> AnswerId {
        AnswerId::new(n).unwrap()
    }

    #[test]
    fn questions_get_sequential_ids() {
        let mut board = Board::new();
        let first = board.create_question("rust", &user("U1"), "Why borrowck?").unwrap();
        let second = board.create_question("go", &user("U1"), "Why nil?").unwrap();
        assert_eq!(first.to_string(), "Q1");
        assert_eq!(second.to_string(), "Q2");
        assert_eq!(board.question(first).unwrap().status(), QuestionStatus::Open);
    }

    #[test]
    fn blank_text_is_rejected() {
        let mut board = Board::new();
        assert!(board.create_question(" ", &user("U1"), "body").is_err());
        assert!(board.create_question("rust", &user("U1"), "").is_err());
        let q = board.create_question("rust", &user("U1"), "body").unwrap();
        assert!(matches!(
            board.add_answer(q, &user("U2"), "   "),
            Err(CommunityError::InvalidArgument(_))
        ));
        assert!(board.question(q).unwrap().answers.is_empty());
    }

    #[test]
    fn answering_unknown_question_is_not_found() {
        let mut board = Board::new();
        let err = board.add_answer(qid(9), &user("U1"), "hello").unwrap_err();
        assert!(matches!(err, CommunityError::NotFound { entity: "question", .. }));
    }

    #[test]
    fn duplicate_answer_text_gets_distinct_ids() {
        let mut board = Board::new();
        let q = board.create_question("rust", &user("U1"), "Tabs or spaces?").unwrap();
        let a1 = board.add_answer(q, &user("U2"), "spaces").unwrap();
        let a2 = board.add_answer(q, &user("U3"), "spaces").unwrap();
        assert_ne!(a1, a2);

        let best = board.mark_best_answer(q, &user("U1"), a2).unwrap();
        assert_eq!(best.author, user("U3"));
        let question = board.question(q).unwrap();
        assert!(!question.answer(a1).unwrap().is_best);
        assert_eq!(question.best().unwrap().id, a2);
    }

    #[test]
    fn best_answer_checks_run_in_order() {
        let mut board = Board::new();
        let q = board.create_question("rust", &user("U1"), "?").unwrap();
        let a = board.add_answer(q, &user("U2"), "!").unwrap();

        assert!(matches!(
            board.check_best_answer(qid(5), &user("U1"), a),
            Err(CommunityError::NotFound { .. })
        ));
        assert!(matches!(
            board.check_best_answer(q, &user("U2"), aid(7)),
            Err(CommunityError::Forbidden { .. })
        ));
        assert!(matches!(
            board.check_best_answer(q, &user("U1"), aid(7)),
            Err(CommunityError::AnswerNotFound { .. })
        ));

        board.mark_best_answer(q, &user("U1"), a).unwrap();
        assert!(matches!(
            board.mark_best_answer(q, &user("U1"), a),
            Err(CommunityError::AlreadyResolved { .. })
        ));
    }

    #[test]
    fn late_answers_are_recorded_but_cannot_win() {
        let mut board = Board::new();
        let q = board.create_question("rust", &user("U1"), "?").unwrap();
        let a = board.add_answer(q, &user("U2"), "first").unwrap();
        board.mark_best_answer(q, &user("U1"), a).unwrap();

        let late = board.add_answer(q, &user("U3"), "late").unwrap();
        assert_eq!(board.question(q).unwrap().answers.len(), 2);
        assert!(matches!(
            board.mark_best_answer(q, &user("U1"), late),
            Err(CommunityError::AlreadyResolved { .. })
        ));
        assert_eq!(board.question(q).unwrap().best_answer, Some(a));
    }

    #[test]
    fn listing_filters_by_domain_ignoring_case() {
        let mut board = Board::new();
        board.create_question("Design", &user("U1"), "fonts?").unwrap();
        board.create_question("rust", &user("U1"), "lifetimes?").unwrap();
        board.create_question("design", &user("U2"), "colors?").unwrap();

        let design: Vec<_> = board
            .list_questions(Some("DESIGN"))
            .into_iter()
            .map(|q| q.id.to_string())
            .collect();
        assert_eq!(design, ["Q1", "Q3"]);
        assert_eq!(board.list_questions(None).len(), 3);
        assert!(board.list_questions(Some("go")).is_empty());
    }

    #[test]
    fn listing_folds_non_ascii_case() {
        let mut board = Board::new();
        board.create_question("école", &user("U1"), "inscription?").unwrap();

        assert_eq!(board.list_questions(Some("ÉCOLE")).len(), 1);
        assert_eq!(board.list_questions(Some(" École ")).len(), 1);
    }
}
