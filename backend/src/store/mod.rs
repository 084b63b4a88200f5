//! Persistent storage of categories.
//!
//! The HTTP layer only ever talks to a [CategoryStore]. Which implementation backs it is decided
//! once at startup, see [crate::setup_store].

mod memory;
mod postgres;

use std::fmt::{self, Display};

use async_trait::async_trait;
use catalog_lib::Category;

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// All categories, ordered by ascending id.
    async fn list(&self) -> eyre::Result<Vec<Category>>;

    async fn find(&self, id: i32) -> eyre::Result<Option<Category>>;

    async fn exists(&self, id: i32) -> eyre::Result<bool>;

    /// Store a new category. The id of `new` is ignored and a fresh one is assigned.
    async fn insert(&self, new: &Category) -> eyre::Result<Category>;

    /// Overwrite every field of category `id` with the fields of `changes`.
    ///
    /// Fails with [StoreError::Conflict] if the write did not hit exactly one record.
    async fn update(&self, id: i32, changes: &Category) -> Result<(), StoreError>;

    /// Remove category `id`, returning what was stored. `None` if there was no such category.
    async fn remove(&self, id: i32) -> eyre::Result<Option<Category>>;
}

#[derive(Debug)]
pub enum StoreError {
    /// The record changed or vanished between being read and being written.
    Conflict { id: i32 },

    Other(eyre::Report),
}

impl From<eyre::Report> for StoreError {
    fn from(error: eyre::Report) -> Self {
        Self::Other(error)
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Conflict { id } => {
                write!(f, "Concurrent modification of category {id} detected")
            }
            StoreError::Other(error) => Display::fmt(error, f),
        }
    }
}

impl std::error::Error for StoreError {}
