use crate::filters::FilterSet;
use crate::models::Smashing;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

/// Document store holding smashing records.
///
/// Records are only ever appended; there is no update or delete.
#[async_trait]
pub trait SmashingStore: Send + Sync + 'static {
    /// Persists one record. On error nothing is stored.
    async fn insert(&self, smashing: Smashing) -> Result<()>;

    /// Returns every record matching all filters, in insertion order.
    async fn find(&self, filters: &FilterSet) -> Result<Vec<Smashing>>;

    /// Releases the store. Called once by the process before exit.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    smashings: RwLock<Vec<Smashing>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SmashingStore for MemoryStore {
    async fn insert(&self, smashing: Smashing) -> Result<()> {
        self.smashings.write().await.push(smashing);
        Ok(())
    }

    async fn find(&self, filters: &FilterSet) -> Result<Vec<Smashing>> {
        let smashings = self.smashings.read().await;
        Ok(select(&smashings, filters))
    }
}

/// Store backed by a single JSON document file, rewritten on every insert.
pub struct FileStore {
    path: PathBuf,
    smashings: RwLock<Vec<Smashing>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let smashings = if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read storage file {}", path.display()))?;
            serde_json::from_str(&data)
                .with_context(|| format!("Failed to parse storage file {}", path.display()))?
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            smashings: RwLock::new(smashings),
        })
    }

    fn save_to_disk(&self, smashings: &[Smashing]) -> Result<()> {
        let json = serde_json::to_string_pretty(smashings)
            .context("Failed to serialize smashings")?;
        fs::write(&self.path, json).context("Failed to write to storage file")?;
        Ok(())
    }
}

#[async_trait]
impl SmashingStore for FileStore {
    async fn insert(&self, smashing: Smashing) -> Result<()> {
        let mut smashings = self.smashings.write().await;
        smashings.push(smashing);

        if let Err(e) = self.save_to_disk(&smashings) {
            smashings.pop();
            return Err(e);
        }

        Ok(())
    }

    async fn find(&self, filters: &FilterSet) -> Result<Vec<Smashing>> {
        let smashings = self.smashings.read().await;
        Ok(select(&smashings, filters))
    }

    async fn close(&self) -> Result<()> {
        let smashings = self.smashings.read().await;
        self.save_to_disk(&smashings)
    }
}

fn select(smashings: &[Smashing], filters: &FilterSet) -> Vec<Smashing> {
    smashings
        .iter()
        .filter(|s| filters.matches(s))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("smashings-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn memory_store_keeps_insertion_order() {
        let store = MemoryStore::new();
        for text in ["one", "two", "three"] {
            store.insert(Smashing::new(text.to_string())).await.unwrap();
        }

        let all = store.find(&FilterSet::default()).await.unwrap();
        let texts: Vec<&str> = all.iter().map(|s| s.smashing_text.as_str()).collect();
        assert_eq!(texts, ["one", "two", "three"]);
    }

    #[tokio::test]
    async fn memory_store_applies_filters() {
        let store = MemoryStore::new();
        for text in ["ab", "abcde", "abcdefghijklmnop"] {
            store.insert(Smashing::new(text.to_string())).await.unwrap();
        }

        let filters = FilterSet::from_pairs([("lengthGt", "3"), ("lengthLt", "10")]).unwrap();
        let found = store.find(&filters).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].smashing_text, "abcde");
    }

    #[tokio::test]
    async fn file_store_survives_reopen() {
        let path = temp_file();

        {
            let store = FileStore::open(&path).unwrap();
            store.insert(Smashing::new("asdf".to_string())).await.unwrap();
            store.insert(Smashing::new("qwer".to_string())).await.unwrap();
            store.close().await.unwrap();
        }

        let reopened = FileStore::open(&path).unwrap();
        let all = reopened.find(&FilterSet::default()).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].smashing_text, "asdf");
        assert_eq!(all[0].letter_counts.len(), 4);

        fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn file_store_drops_record_when_write_fails() {
        let dir = std::env::temp_dir().join(format!("smashings-dir-{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        // a directory cannot be written as a file
        let store = FileStore {
            path: dir.clone(),
            smashings: RwLock::new(Vec::new()),
        };

        assert!(store.insert(Smashing::new("lost".to_string())).await.is_err());
        assert!(store.find(&FilterSet::default()).await.unwrap().is_empty());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_store_rejects_corrupt_file() {
        let path = temp_file();
        fs::write(&path, "not json").unwrap();

        assert!(FileStore::open(&path).is_err());

        fs::remove_file(&path).unwrap();
    }
}
