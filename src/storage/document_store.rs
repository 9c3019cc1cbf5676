use crate::{
    domain::{BoardConfig, Document},
    error::Result,
    storage::KeyValueStore,
};
use tracing::{debug, warn};

/// Loads and saves the handover document under a single key.
///
/// Loading never fails: anything unreadable falls back to a default document.
/// Saving overwrites the whole value; failures are logged and swallowed by
/// [`DocumentStore::save`].
pub struct DocumentStore<S> {
    store: S,
    key: String,
    layout: BoardConfig,
}

impl<S: KeyValueStore> DocumentStore<S> {
    pub fn new(store: S, key: impl Into<String>, layout: BoardConfig) -> Self {
        Self {
            store,
            key: key.into(),
            layout,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// A document with every configured lane present and empty
    pub fn default_document(&self) -> Document {
        Document::new(&self.layout)
    }

    /// Reads the stored document, repairing it to the configured schema
    pub async fn load(&self) -> Document {
        let raw = match self.store.get(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no stored document, using defaults");
                return self.default_document();
            }
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to read stored document, using defaults");
                return self.default_document();
            }
        };

        let mut doc: Document = match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(err) => {
                warn!(key = %self.key, error = %err, "stored document is malformed, using defaults");
                return self.default_document();
            }
        };

        let repair = doc.repair(&self.layout);
        if !repair.is_clean() {
            warn!(
                key = %self.key,
                lanes_added = repair.lanes_added,
                duplicates_dropped = repair.duplicates_dropped,
                "repaired stored document"
            );
        }
        doc
    }

    /// Serializes and overwrites the stored document
    pub async fn try_save(&self, doc: &Document) -> Result<()> {
        let json = serde_json::to_string(doc)?;
        self.store.set(&self.key, &json).await
    }

    /// Like [`DocumentStore::try_save`], but a failure only gets logged.
    /// Returns whether the write landed.
    pub async fn save(&self, doc: &Document) -> bool {
        match self.try_save(doc).await {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to persist document, keeping it in memory only");
                false
            }
        }
    }

    /// Removes the stored document, so the next load starts from defaults.
    /// A failure is logged and swallowed; returns whether the removal landed.
    pub async fn clear(&self) -> bool {
        match self.store.remove(&self.key).await {
            Ok(()) => true,
            Err(err) => {
                warn!(key = %self.key, error = %err, "failed to clear stored document");
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::{
        domain::{InsertEdge, LaneId},
        error::HandoverError,
        storage::MemoryStore,
    };
    use async_trait::async_trait;

    const KEY: &str = "army_ops_update_v3";

    /// Reads fine, refuses every write
    pub(crate) struct FullStore(pub MemoryStore);

    #[async_trait]
    impl KeyValueStore for FullStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.get(key).await
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(HandoverError::StorageError("quota exceeded".to_string()))
        }

        async fn remove(&self, _key: &str) -> Result<()> {
            Err(HandoverError::StorageError("quota exceeded".to_string()))
        }
    }

    fn doc_store(store: MemoryStore) -> DocumentStore<MemoryStore> {
        DocumentStore::new(store, KEY, BoardConfig::default())
    }

    #[tokio::test]
    async fn test_load_absent_gives_defaults() {
        let store = doc_store(MemoryStore::new());
        let doc = store.load().await;
        assert_eq!(doc, Document::new(&BoardConfig::default()));
    }

    #[tokio::test]
    async fn test_load_malformed_gives_defaults() {
        for raw in ["{not json", "42", "null", r#"{"form":[]}"#] {
            let store = doc_store(MemoryStore::with_value(KEY, raw));
            let doc = store.load().await;

            for spec in &BoardConfig::default().lanes {
                assert!(doc.lanes.has_lane(&spec.id));
                assert!(doc.lanes.units(&spec.id).is_empty());
            }
            assert_eq!(doc, Document::new(&BoardConfig::default()));
        }
    }

    #[tokio::test]
    async fn test_load_backfills_missing_lanes() {
        let raw = r#"{"form":{"opsName":"Alpha"},"lanes":{"heli":[{"id":"a","text":"U1"}]},"theme":"dark"}"#;
        let store = doc_store(MemoryStore::with_value(KEY, raw));
        let doc = store.load().await;

        assert_eq!(doc.form.ops_name, "Alpha");
        assert_eq!(doc.lanes.units(&LaneId::from("heli")).len(), 1);
        assert!(doc.lanes.has_lane(&LaneId::from("sandy")));
        assert_eq!(doc.extra["theme"], "dark");
    }

    #[tokio::test]
    async fn test_save_load_is_stable() {
        let store = doc_store(MemoryStore::with_value(
            KEY,
            r#"{"form":{"notes":"n","extraField":1},"lanes":{"paleto":[{"id":"p","text":"P1"}],"legacy":[]}}"#,
        ));

        let first = store.load().await;
        assert!(store.save(&first).await);
        let second = store.load().await;
        assert_eq!(first, second);

        assert!(store.save(&second).await);
        assert_eq!(store.load().await, first);
    }

    #[tokio::test]
    async fn test_save_overwrites_wholesale() {
        let store = doc_store(MemoryStore::new());
        let mut doc = store.load().await;
        doc.lanes
            .add_units(&LaneId::from("heli"), ["H1"], InsertEdge::Append)
            .unwrap();
        assert!(store.save(&doc).await);

        let fresh = store.default_document();
        assert!(store.save(&fresh).await);
        assert_eq!(store.load().await.lanes.unit_count(), 0);
    }

    #[tokio::test]
    async fn test_write_failure_is_swallowed() {
        let store = DocumentStore::new(FullStore(MemoryStore::new()), KEY, BoardConfig::default());
        let doc = store.load().await;

        assert!(!store.save(&doc).await);
        assert!(store.try_save(&doc).await.is_err());
    }

    #[tokio::test]
    async fn test_unreadable_lane_keeps_the_rest() {
        let raw = r#"{"form":{"opsName":"Alpha"},"lanes":{"heli":[{"id":"a","text":"U1"}],"sandy":null}}"#;
        let store = doc_store(MemoryStore::with_value(KEY, raw));
        let doc = store.load().await;

        assert_eq!(doc.form.ops_name, "Alpha");
        assert_eq!(doc.lanes.unit_count(), 1);
        assert!(doc.lanes.has_lane(&LaneId::from("sandy")));
        assert!(doc.lanes.units(&LaneId::from("sandy")).is_empty());
    }

    #[tokio::test]
    async fn test_unknown_unit_keys_survive_load_save() {
        let raw = r#"{"lanes":{"heli":[{"id":"a","text":"U1","pinned":true}]}}"#;
        let store = doc_store(MemoryStore::with_value(KEY, raw));

        let doc = store.load().await;
        assert!(store.save(&doc).await);

        let stored = store.inner().get(KEY).await.unwrap().unwrap();
        assert!(stored.contains(r#"{"id":"a","text":"U1","pinned":true}"#));
    }

    #[tokio::test]
    async fn test_clear_removes_stored_document() {
        let store = doc_store(MemoryStore::with_value(
            KEY,
            r#"{"lanes":{"heli":[{"id":"a","text":"U1"}]}}"#,
        ));

        assert!(store.clear().await);
        assert_eq!(store.inner().get(KEY).await.unwrap(), None);
        assert_eq!(store.load().await, store.default_document());
    }

    #[tokio::test]
    async fn test_clear_failure_is_swallowed() {
        let inner = FullStore(MemoryStore::with_value(KEY, "{}"));
        let store = DocumentStore::new(inner, KEY, BoardConfig::default());

        assert!(!store.clear().await);
    }
}
