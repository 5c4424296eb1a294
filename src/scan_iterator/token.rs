use crate::{
    error::Result,
    store_client::Item
};

/// Encodes a continuation token, so a scan can be resumed later or elsewhere.
pub fn encode_token(key: &Item) -> Result<Vec<u8>> {
    Ok(bincode::serialize(key)?)
}

/// Decodes a continuation token produced by encode_token().
pub fn decode_token(bytes: &[u8]) -> Result<Item> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        scan_iterator::PaginatedScanIterator,
        store_client::{item, AttributeValue, MemoryStore, ScanRequest},
        table_options::{CreateTableOptions, ProvisionedThroughput}
    };
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    #[test]
    fn decode_encoded() -> Result<()> {
        let mut key = item(&[("resource", "r1")]);
        key.insert("version".into(), AttributeValue::N("42".into()));
        key.insert("digest".into(), AttributeValue::B(vec![0x00, 0xff]));
        assert_eq!(key, decode_token(&encode_token(&key)?)?);
        Ok(())
    }

    #[test]
    fn decode_garbage() {
        assert!(matches!(decode_token(&[0xff, 0xff, 0xff]), Err(Error::Internal(_))));
    }

    #[test]
    fn resume_scan() -> Result<()> {
        let store = Arc::new(MemoryStore::new());
        store.create_table(
            &CreateTableOptions::builder(ProvisionedThroughput::new(1, 1), "locks").build()?,
        )?;
        for key in ["a", "b", "c", "d", "e"] {
            store.put_item("locks", item(&[("key", key)]))?;
        }
        let key_of = |item: Item| -> Result<String> {
            Ok(item.get("key").and_then(|v| v.as_s()).unwrap_or_default().to_string())
        };

        // Consume the first page only, and save the token.
        let request = ScanRequest::new("locks").with_limit(2);
        let mut iter = PaginatedScanIterator::new(store.clone(), request.clone(), key_of);
        assert_eq!("a", iter.next_item()?);
        assert_eq!("b", iter.next_item()?);
        let token = encode_token(iter.continuation().ok_or(Error::Exhausted)?)?;
        drop(iter);

        let request = request.with_exclusive_start_key(Some(decode_token(&token)?));
        let iter = PaginatedScanIterator::new(store, request, key_of);
        assert_eq!(vec!["c", "d", "e"], iter.collect::<Result<Vec<_>>>()?);
        Ok(())
    }
}
