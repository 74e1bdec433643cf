//! Identifier types for BadgeUp.
//!
//! Users are identified by the opaque id the chat platform hands us. Questions
//! and answers get short sequential ids (`Q1`, `A2`) that people can type back
//! into a slash command.
//!
//! # Macro-based ID Types
//!
//! The `sequence_id_type!` macro reduces boilerplate for the prefixed
//! sequential identifiers, keeping parsing, display and serde consistent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An external user identifier (for example a Slack `U012ABCDEF` id).
///
/// The value is opaque: no format is assumed beyond being non-empty.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// Create a user id, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns `IdError::Empty` if nothing is left after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for UserId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Debug for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UserId({})", self.0)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for UserId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// Macro to define a prefixed, 1-based sequential identifier type.
///
/// Generated types render as `<prefix><n>` and parse either case of the
/// prefix. Zero is never a valid sequence number.
macro_rules! sequence_id_type {
    ($name:ident, $inner:ty, $prefix:literal, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name($inner);

        impl $name {
            /// Create an identifier from its sequence number.
            ///
            /// # Errors
            ///
            /// Returns `IdError::Malformed` for zero.
            pub fn new(sequence: $inner) -> Result<Self, IdError> {
                if sequence == 0 {
                    return Err(IdError::Malformed(format!("{}0", $prefix)));
                }
                Ok(Self(sequence))
            }

            /// The 1-based sequence number.
            #[must_use]
            pub const fn sequence(&self) -> $inner {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                let digits = trimmed
                    .strip_prefix($prefix)
                    .or_else(|| trimmed.strip_prefix(&$prefix.to_ascii_lowercase()[..]))
                    .ok_or_else(|| IdError::Malformed(s.to_string()))?;
                let sequence = digits
                    .parse::<$inner>()
                    .map_err(|_| IdError::Malformed(s.to_string()))?;
                Self::new(sequence).map_err(|_| IdError::Malformed(s.to_string()))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({}{})", stringify!($name), $prefix, self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

sequence_id_type!(
    QuestionId,
    u64,
    "Q",
    "A question identifier, allocated in posting order (`Q1`, `Q2`, ...)."
);
sequence_id_type!(
    AnswerId,
    u32,
    "A",
    "An answer identifier, unique within its question (`A1`, `A2`, ...).\n\nAssigned when the answer is added, so two answers with identical text stay distinguishable."
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The input was empty.
    #[error("identifier must not be empty")]
    Empty,

    /// The input does not match the expected `<prefix><n>` form.
    #[error("malformed identifier: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_trims_and_rejects_blank() {
        assert_eq!(UserId::new("  U123 ").unwrap().as_str(), "U123");
        assert_eq!(UserId::new("   "), Err(IdError::Empty));
    }

    #[test]
    fn question_id_parses_either_case() {
        assert_eq!("Q12".parse::<QuestionId>().unwrap().sequence(), 12);
        assert_eq!("q7".parse::<QuestionId>().unwrap().to_string(), "Q7");
    }

    #[test]
    fn question_id_rejects_garbage() {
        assert!("12".parse::<QuestionId>().is_err());
        assert!("Q".parse::<QuestionId>().is_err());
        assert!("Q0".parse::<QuestionId>().is_err());
        assert!("A1".parse::<QuestionId>().is_err());
    }

    #[test]
    fn answer_id_serializes_as_string() {
        let id = AnswerId::new(3).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"A3\"");
        let parsed: AnswerId = serde_json::from_str("\"a3\"").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn user_id_serde_rejects_empty() {
        assert!(serde_json::from_str::<UserId>("\"\"").is_err());
    }
}
