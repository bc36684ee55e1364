//! AnswerStore - question id to answer text for one session.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from question id to answer text.
///
/// Keys are never removed. Setting an answer overwrites the previous one for
/// the same key. An unset key reads as the empty string, which callers must
/// treat as "unanswered".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerStore {
    answers: BTreeMap<String, String>,
}

impl AnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `text` under `id`, replacing any earlier answer.
    pub fn set(&mut self, id: impl Into<String>, text: impl Into<String>) {
        self.answers.insert(id.into(), text.into());
    }

    /// Returns the stored answer or `""` if unset.
    pub fn get(&self, id: &str) -> &str {
        self.answers.get(id).map(String::as_str).unwrap_or("")
    }

    /// True if the answer for `id` is non-empty after trimming.
    pub fn is_answered(&self, id: &str) -> bool {
        !self.get(id).trim().is_empty()
    }

    /// Number of keys ever set.
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Iterates `(id, answer)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Borrow the underlying map, e.g. for request bodies.
    pub fn as_map(&self) -> &BTreeMap<String, String> {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn unset_answer_reads_as_empty() {
        let store = AnswerStore::new();
        assert_eq!(store.get("q1"), "");
        assert!(!store.is_answered("q1"));
    }

    #[test]
    fn set_overwrites_same_key() {
        let mut store = AnswerStore::new();
        store.set("q1", "funding");
        store.set("q1", "hiring");
        assert_eq!(store.get("q1"), "hiring");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn whitespace_only_is_not_answered() {
        let mut store = AnswerStore::new();
        store.set("q3", " \t\n");
        assert!(!store.is_answered("q3"));
    }

    #[test]
    fn serializes_as_flat_object() {
        let mut store = AnswerStore::new();
        store.set("q2", "Weekly");
        store.set("q1", "funding");
        assert_eq!(
            serde_json::to_string(&store).unwrap(),
            r#"{"q1":"funding","q2":"Weekly"}"#
        );
    }

    proptest! {
        #[test]
        fn keys_only_grow(ops in proptest::collection::vec(("q[0-9]{1,2}", ".{0,12}"), 0..40)) {
            let mut store = AnswerStore::new();
            let mut previous_len = 0;
            for (id, text) in ops {
                store.set(id.clone(), text.clone());
                prop_assert!(store.len() >= previous_len);
                prop_assert_eq!(store.get(&id), text.as_str());
                previous_len = store.len();
            }
        }
    }
}
