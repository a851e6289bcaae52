//! Text search predicates.
//!
//! Token/prefix/regex matches are plain comparison-family predicates with a
//! search operator spelling. Phrase and fuzzy matches carry an extra distance
//! operand and use their own wire shape (`{query, distance}`).

use crate::predicates::Predicate;

/// Search any instance of a certain token within the targeted text property.
pub fn token(value: impl Into<String>) -> Predicate {
    Predicate::new("token", value.into())
}

/// Search any instance of a certain token prefix within the targeted text
/// property.
pub fn token_prefix(value: impl Into<String>) -> Predicate {
    Predicate::new("tokenPrefix", value.into())
}

/// Search any instance of the provided regular expression within the
/// targeted text property.
pub fn token_regex(value: impl Into<String>) -> Predicate {
    Predicate::new("tokenRegex", value.into())
}

/// Search for a specific prefix at the beginning of the targeted text
/// property.
pub fn prefix(value: impl Into<String>) -> Predicate {
    Predicate::new("prefix", value.into())
}

/// Search for this regular expression inside the targeted text property.
pub fn regex(value: impl Into<String>) -> Predicate {
    Predicate::new("regex", value.into())
}

/// A text search predicate with a distance operand.
///
/// Always carries exactly two payload fields on the wire: the query string
/// and the distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPredicate {
    pub operator: String,
    pub query: String,
    pub distance: u32,
}

impl TextPredicate {
    fn new(operator: &str, query: impl Into<String>, distance: u32) -> Self {
        Self {
            operator: operator.to_string(),
            query: query.into(),
            distance,
        }
    }
}

/// Find words within a specific term distance of each other (case
/// insensitive). `phrase("Hello world", 2)` matches "Hello big wild world"
/// but not "Hello the big wild world".
pub fn phrase(query: impl Into<String>, distance: u32) -> TextPredicate {
    TextPredicate::new("phrase", query, distance)
}

/// Fuzzy search based on Levenshtein edit distance (case sensitive).
pub fn fuzzy(query: impl Into<String>, distance: u32) -> TextPredicate {
    TextPredicate::new("fuzzy", query, distance)
}

/// Fuzzy search over tokenized data (case insensitive).
pub fn token_fuzzy(query: impl Into<String>, distance: u32) -> TextPredicate {
    TextPredicate::new("tokenFuzzy", query, distance)
}
