use serde::{Deserialize, Serialize};
use crate::store_client::Item;

/// The result of a single scan call: a batch of raw records, plus the key to resume from if the
/// store has more records.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Raw records in store order. May contain empty records, which are not entries.
    pub items: Vec<Item>,
    /// The key of the last record examined, present iff more records may follow.
    pub last_evaluated_key: Option<Item>,
    /// The number of records the store examined to produce the page.
    pub scanned_count: usize,
}

impl Page {
    /// Creates a page. An empty last evaluated key means the same as an absent one.
    pub fn new(items: Vec<Item>, last_evaluated_key: Option<Item>) -> Self {
        let scanned_count = items.len();
        Self {
            items,
            last_evaluated_key: last_evaluated_key.filter(|key| !key.is_empty()),
            scanned_count,
        }
    }

    /// Sets the scanned count, for pages where filtering dropped records.
    pub fn with_scanned_count(mut self, scanned_count: usize) -> Self {
        self.scanned_count = scanned_count;
        self
    }

    /// Checks whether the store signalled that more pages exist.
    pub fn has_more(&self) -> bool {
        matches!(&self.last_evaluated_key, Some(key) if !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store_client::item;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_normalizes_empty_key() {
        let page = Page::new(vec![item(&[("key", "a")])], Some(Item::new()));
        assert_eq!(None, page.last_evaluated_key);
        assert!(!page.has_more());
        assert_eq!(1, page.scanned_count);
    }

    #[test]
    fn has_more() {
        let page = Page::new(vec![], Some(item(&[("key", "a")])));
        assert!(page.has_more());

        // Public fields may bypass normalization.
        let page = Page { last_evaluated_key: Some(Item::new()), ..Page::default() };
        assert!(!page.has_more());
    }
}
