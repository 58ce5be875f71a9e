//! Sequential edge id generator
//! Produces ids like "e1", "e2", ... continuing after the highest
//! numbered id already in use, so generated ids never collide with
//! ids that came in through an import.

use crate::EdgeId;
use std::collections::HashSet;

const DEFAULT_PREFIX: &str = "e";

#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    /// Counter for next ID; `None` once the numeric range above the
    /// highest existing id is used up
    counter: Option<u64>,
    /// Ids that must never be produced
    taken: HashSet<String>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            counter: Some(1),
            taken: HashSet::new(),
        }
    }

    /// Seed a generator from the ids currently in use
    pub fn from_existing_ids<'a>(existing: impl IntoIterator<Item = &'a EdgeId>) -> Self {
        let mut generator = Self::new();

        for id in existing {
            if let Some(n) = generator.decode(id.as_str()) {
                generator.counter = match (generator.counter, n.checked_add(1)) {
                    (Some(current), Some(after)) => Some(current.max(after)),
                    _ => None,
                };
            }
            generator.taken.insert(id.as_str().to_string());
        }

        generator
    }

    /// Generate the next ID
    pub fn next(&mut self) -> EdgeId {
        while let Some(n) = self.counter {
            self.counter = n.checked_add(1);
            if let Some(id) = self.claim(n) {
                return id;
            }
        }

        // Past u64::MAX: hand out the lowest free suffix instead
        let mut n: u64 = 1;
        loop {
            if let Some(id) = self.claim(n) {
                return id;
            }
            n += 1;
        }
    }

    fn claim(&mut self, n: u64) -> Option<EdgeId> {
        let candidate = self.encode(n);
        if self.taken.insert(candidate.clone()) {
            Some(EdgeId::new(candidate))
        } else {
            None
        }
    }

    fn encode(&self, n: u64) -> String {
        format!("{}{}", self.prefix, n)
    }

    /// Decode an ID back to its counter value
    fn decode(&self, id: &str) -> Option<u64> {
        let digits = id.strip_prefix(self.prefix.as_str())?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_generation() {
        let mut gen = IdGenerator::new();
        assert_eq!(gen.next().as_str(), "e1");
        assert_eq!(gen.next().as_str(), "e2");
        assert_eq!(gen.next().as_str(), "e3");
    }

    #[test]
    fn test_continues_after_highest() {
        let existing = vec![EdgeId::from("e3"), EdgeId::from("e32"), EdgeId::from("custom")];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        assert_eq!(gen.next().as_str(), "e33");
    }

    #[test]
    fn test_skips_taken_ids() {
        // "e007" decodes to 7 but is a different string from "e7"
        let existing = vec![EdgeId::from("e007"), EdgeId::from("e9")];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        assert_eq!(gen.next().as_str(), "e10");

        let existing = vec![EdgeId::from("e1")];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        gen.counter = Some(1);
        assert_eq!(gen.next().as_str(), "e2");
    }

    #[test]
    fn test_ignores_foreign_ids() {
        let existing = vec![EdgeId::from("edge"), EdgeId::from("e"), EdgeId::from("xy-edge__a-b")];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        assert_eq!(gen.next().as_str(), "e1");
    }

    #[test]
    fn test_top_of_range_does_not_overflow() {
        let existing = vec![EdgeId::new(format!("e{}", u64::MAX - 1))];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        assert_eq!(gen.next().as_str(), format!("e{}", u64::MAX));
        assert_eq!(gen.next().as_str(), "e1");
        assert_eq!(gen.next().as_str(), "e2");

        let existing = vec![
            EdgeId::new(format!("e{}", u64::MAX - 1)),
            EdgeId::new(format!("e{}", u64::MAX)),
            EdgeId::from("e1"),
        ];
        let mut gen = IdGenerator::from_existing_ids(&existing);
        assert_eq!(gen.next().as_str(), "e2");
    }
}
