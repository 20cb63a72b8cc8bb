//! Repetition specification: count, for-each, or neither.

use std::collections::BTreeMap;

use rx_core::{InstanceKey, Value};

/// Count sentinel meaning "count is not set at all".
pub const COUNT_UNSET: i64 = -1;

/// Resolved repetition arguments of one resource.
///
/// `count < 0` means count is unset. An absent or empty `for_each` means
/// for-each is unset. Callers are expected to set at most one of the two;
/// when both are set, expansion produces the union of both key sets.
#[derive(Debug, Clone, PartialEq)]
pub struct Repetition {
    pub count: i64,
    pub for_each: Option<BTreeMap<String, Value>>,
}

impl Default for Repetition {
    fn default() -> Self {
        Self::unset()
    }
}

impl Repetition {
    /// Neither count nor for-each: a single unkeyed instance.
    pub fn unset() -> Self {
        Self {
            count: COUNT_UNSET,
            for_each: None,
        }
    }

    pub fn count(count: i64) -> Self {
        Self {
            count,
            for_each: None,
        }
    }

    pub fn for_each<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        Self {
            count: COUNT_UNSET,
            for_each: Some(entries.into_iter().map(|(k, v)| (k.into(), v)).collect()),
        }
    }

    /// True when for-each is absent or has no entries.
    pub fn for_each_is_empty(&self) -> bool {
        self.for_each.as_ref().is_none_or(BTreeMap::is_empty)
    }

    /// Neither repetition argument is in effect.
    pub fn is_unset(&self) -> bool {
        self.count < 0 && self.for_each_is_empty()
    }

    /// Both a non-negative count and a non-empty for-each were supplied.
    pub fn has_conflict(&self) -> bool {
        self.count >= 0 && !self.for_each_is_empty()
    }

    /// Number of instances an expansion with these arguments emits.
    pub fn expected_instances(&self) -> usize {
        if self.is_unset() {
            return 1;
        }
        let for_each = self.for_each.as_ref().map_or(0, BTreeMap::len);
        for_each.saturating_add(usize::try_from(self.count.max(0)).unwrap_or(usize::MAX))
    }

    /// Instance keys in emission order: for-each keys first, then count indices.
    pub fn instance_keys(&self) -> Vec<InstanceKey> {
        if self.is_unset() {
            return vec![InstanceKey::NoKey];
        }
        let mut keys = Vec::with_capacity(self.expected_instances());
        if let Some(for_each) = &self.for_each {
            keys.extend(for_each.keys().cloned().map(InstanceKey::Str));
        }
        keys.extend((0..self.count).map(InstanceKey::Int));
        keys
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unset_emits_one_no_key() {
        let rep = Repetition::unset();
        assert!(rep.is_unset());
        assert_eq!(rep.expected_instances(), 1);
        assert_eq!(rep.instance_keys(), vec![InstanceKey::NoKey]);
    }

    #[test]
    fn zero_count_is_not_unset() {
        let rep = Repetition::count(0);
        assert!(!rep.is_unset());
        assert_eq!(rep.expected_instances(), 0);
        assert!(rep.instance_keys().is_empty());
    }

    #[test]
    fn huge_count_saturates() {
        let rep = Repetition {
            count: i64::MAX,
            for_each: Some(BTreeMap::from([("a".to_string(), json!(1))])),
        };
        let count = usize::try_from(i64::MAX).unwrap_or(usize::MAX);
        assert!(rep.expected_instances() >= count);

        let union = Repetition {
            count: i64::MAX,
            for_each: Some((0..3).map(|i| (i.to_string(), json!(i))).collect()),
        };
        assert_eq!(union.expected_instances(), count.saturating_add(3));
    }

    #[test]
    fn empty_for_each_counts_as_unset() {
        let rep = Repetition::for_each(Vec::<(String, Value)>::new());
        assert!(rep.for_each.is_some());
        assert!(rep.is_unset());
        assert_eq!(rep.expected_instances(), 1);
    }

    #[test]
    fn conflict_yields_union() {
        let rep = Repetition {
            count: 2,
            ..Repetition::for_each([("x", json!(1))])
        };
        assert!(rep.has_conflict());
        assert_eq!(
            rep.instance_keys(),
            vec![InstanceKey::from("x"), InstanceKey::Int(0), InstanceKey::Int(1)]
        );
    }
}
