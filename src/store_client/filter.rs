use serde::{Deserialize, Serialize};
use crate::store_client::{AttributeValue, Item};

/// A filter predicate the store evaluates against every record it examines. Records that don't
/// match are dropped from the page, but still count towards the request limit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    AttributeExists(String),
    AttributeNotExists(String),
    Equals(String, AttributeValue),
    /// Matches string attributes with the given prefix, and binary attributes with its bytes.
    BeginsWith(String, String),
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
}

impl Filter {
    /// Checks whether a record satisfies the filter.
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            Self::AttributeExists(name) => item.contains_key(name),
            Self::AttributeNotExists(name) => !item.contains_key(name),
            Self::Equals(name, value) => item.get(name) == Some(value),
            Self::BeginsWith(name, prefix) => match item.get(name) {
                Some(AttributeValue::S(s)) => s.starts_with(prefix.as_str()),
                Some(AttributeValue::B(b)) => b.starts_with(prefix.as_bytes()),
                _ => false,
            },
            Self::And(filters) => filters.iter().all(|f| f.matches(item)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(item)),
            Self::Not(filter) => !filter.matches(item),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_client::item;

    #[test]
    fn matches() {
        let record = item(&[("key", "lock-1"), ("owner", "host-a")]);

        assert!(Filter::AttributeExists("owner".into()).matches(&record));
        assert!(!Filter::AttributeExists("lease".into()).matches(&record));
        assert!(Filter::AttributeNotExists("lease".into()).matches(&record));
        assert!(Filter::Equals("owner".into(), "host-a".into()).matches(&record));
        assert!(!Filter::Equals("owner".into(), "host-b".into()).matches(&record));
        assert!(Filter::BeginsWith("key".into(), "lock-".into()).matches(&record));
        assert!(!Filter::BeginsWith("key".into(), "lease-".into()).matches(&record));
        assert!(!Filter::BeginsWith("missing".into(), "".into()).matches(&record));
    }

    #[test]
    fn combinators() {
        let record = item(&[("key", "lock-1"), ("owner", "host-a")]);
        let owned = Filter::Equals("owner".into(), "host-a".into());
        let leased = Filter::AttributeExists("lease".into());

        assert!(!Filter::And(vec![owned.clone(), leased.clone()]).matches(&record));
        assert!(Filter::Or(vec![owned.clone(), leased.clone()]).matches(&record));
        assert!(Filter::Not(Box::new(leased)).matches(&record));
        assert!(Filter::And(vec![]).matches(&record));
        assert!(!Filter::Or(vec![]).matches(&record));
    }

    #[test]
    fn begins_with_binary() {
        let mut record = Item::new();
        record.insert("data".into(), AttributeValue::B(b"lock-data".to_vec()));
        assert!(Filter::BeginsWith("data".into(), "lock".into()).matches(&record));
    }
}
