use std::fmt;

use serde::{Deserialize, Serialize};

/// A single observed token together with its gold tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaggedToken {
    /// Token text, case-sensitive as stored.
    pub token: String,
    /// Tag assigned to the token.
    pub tag: String,
}

impl TaggedToken {
    /// Creates a new tagged token.
    #[must_use]
    pub fn new(token: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            tag: tag.into(),
        }
    }
}

impl From<(&str, &str)> for TaggedToken {
    fn from((token, tag): (&str, &str)) -> Self {
        Self::new(token, tag)
    }
}

impl From<(String, String)> for TaggedToken {
    fn from((token, tag): (String, String)) -> Self {
        Self { token, tag }
    }
}

impl fmt::Display for TaggedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.token, self.tag)
    }
}

/// An ordered sentence of tagged tokens. Order defines the left-to-right
/// dependency the model is trained on.
pub type TaggedSentence = Vec<TaggedToken>;

/// Builds a tagged sentence from `(token, tag)` pairs.
///
/// # Examples
/// ```
/// use hmmpos_core::types::tagged_sentence;
///
/// let sentence = tagged_sentence(&[("the", "DET"), ("dog", "NOUN")]);
/// assert_eq!(sentence[1].tag, "NOUN");
/// ```
pub fn tagged_sentence(pairs: &[(&str, &str)]) -> TaggedSentence {
    pairs.iter().copied().map(TaggedToken::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair() {
        let token = TaggedToken::from(("Dog", "NOUN"));
        assert_eq!(token.token, "Dog");
        assert_eq!(token.tag, "NOUN");
        assert_eq!(token.to_string(), "Dog/NOUN");
    }

    #[test]
    fn test_tagged_sentence_keeps_order() {
        let sentence = tagged_sentence(&[("a", "DET"), ("cat", "NOUN"), ("sleeps", "VERB")]);
        let tags: Vec<_> = sentence.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(tags, ["DET", "NOUN", "VERB"]);
    }

    #[test]
    fn test_serde_shape() {
        let token = TaggedToken::new("runs", "VERB");
        let json = serde_json::to_string(&token).unwrap();
        assert_eq!(json, r#"{"token":"runs","tag":"VERB"}"#);
    }
}
