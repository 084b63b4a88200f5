use std::{collections::BTreeMap, sync::Mutex};

use async_trait::async_trait;
use catalog_lib::Category;
use eyre::eyre;

use super::{CategoryStore, StoreError};

/// A [CategoryStore] that lives and dies with the process.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    /// The last id handed out. Ids are never reused, even after removal.
    last_id: i32,
    categories: BTreeMap<i32, Category>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> eyre::Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| eyre!("In-memory category store is poisoned"))
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list(&self) -> eyre::Result<Vec<Category>> {
        Ok(self.lock()?.categories.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> eyre::Result<Option<Category>> {
        Ok(self.lock()?.categories.get(&id).cloned())
    }

    async fn exists(&self, id: i32) -> eyre::Result<bool> {
        Ok(self.lock()?.categories.contains_key(&id))
    }

    async fn insert(&self, new: &Category) -> eyre::Result<Category> {
        let mut inner = self.lock()?;
        inner.last_id = inner
            .last_id
            .checked_add(1)
            .ok_or_else(|| eyre!("Ran out of category ids"))?;

        let category = Category {
            id: inner.last_id,
            ..new.clone()
        };
        inner.categories.insert(category.id, category.clone());

        Ok(category)
    }

    async fn update(&self, id: i32, changes: &Category) -> Result<(), StoreError> {
        let mut inner = self.lock()?;
        let Some(stored) = inner.categories.get_mut(&id) else {
            return Err(StoreError::Conflict { id });
        };

        *stored = Category {
            id,
            ..changes.clone()
        };

        Ok(())
    }

    async fn remove(&self, id: i32) -> eyre::Result<Option<Category>> {
        Ok(self.lock()?.categories.remove(&id))
    }
}
