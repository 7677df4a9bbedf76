//! In-process document store with named connections and collections.
//!
//! Documents are JSON values keyed by a string id; listing returns them in
//! insertion order. A collection is shared between every handle obtained for
//! the same `(connection, collection)` pair, so registering a feature twice
//! observes the same data.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use serde_json::Value;
use thiserror::Error;

/// Failures raised by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A writer panicked while holding the lock.
    #[error("collection {collection} is unavailable after a writer panicked")]
    Poisoned {
        /// Affected collection.
        collection: String,
    },
    /// A document with the same id already exists.
    #[error("duplicate key {id} in collection {collection}")]
    DuplicateKey {
        /// Affected collection.
        collection: String,
        /// Conflicting document id.
        id: String,
    },
}

/// Documents keyed by id, with insertion order tracked by sequence number.
#[derive(Debug, Default)]
struct Documents {
    next_seq: u64,
    by_id: HashMap<String, (u64, Value)>,
    order: BTreeMap<u64, String>,
}

impl Documents {
    fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    fn insert(&mut self, id: &str, document: Value) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.order.insert(seq, id.to_owned());
        self.by_id.insert(id.to_owned(), (seq, document));
    }

    fn get(&self, id: &str) -> Option<&Value> {
        self.by_id.get(id).map(|(_, document)| document)
    }

    fn replace(&mut self, id: &str, document: Value) -> bool {
        if let Some((_, slot)) = self.by_id.get_mut(id) {
            *slot = document;
            return true;
        }
        false
    }

    fn remove(&mut self, id: &str) -> bool {
        let Some((seq, _)) = self.by_id.remove(id) else {
            return false;
        };
        self.order.remove(&seq);
        true
    }

    fn ordered(&self) -> Vec<(String, Value)> {
        self.order
            .values()
            .filter_map(|id| self.get(id).map(|document| (id.clone(), document.clone())))
            .collect()
    }
}

/// Root of the store; hands out named connections.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    connections: Arc<RwLock<HashMap<String, Connection>>>,
}

impl DocumentStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the named connection, opening it on first use.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the connection registry lock is
    /// poisoned.
    pub fn connection(&self, name: &str) -> Result<Connection, StoreError> {
        if let Some(existing) = self
            .connections
            .read()
            .map_err(|_| registry_poisoned(name))?
            .get(name)
        {
            return Ok(existing.clone());
        }
        let mut connections = self
            .connections
            .write()
            .map_err(|_| registry_poisoned(name))?;
        Ok(connections
            .entry(name.to_owned())
            .or_insert_with(|| Connection::new(name))
            .clone())
    }
}

fn registry_poisoned(connection: &str) -> StoreError {
    StoreError::Poisoned {
        collection: format!("{connection}.*"),
    }
}

/// Named connection grouping collections.
#[derive(Debug, Clone)]
pub struct Connection {
    name: String,
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl Connection {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            collections: Arc::default(),
        }
    }

    /// Bind the named collection, creating it on first use.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the collection registry lock is
    /// poisoned.
    pub fn collection(&self, name: &str) -> Result<Collection, StoreError> {
        let qualified = format!("{}.{name}", self.name);
        let mut collections = self
            .collections
            .write()
            .map_err(|_| StoreError::Poisoned {
                collection: qualified.clone(),
            })?;
        Ok(collections
            .entry(name.to_owned())
            .or_insert_with(|| Collection::new(qualified))
            .clone())
    }
}

/// Handle to a collection of JSON documents.
#[derive(Debug, Clone)]
pub struct Collection {
    name: String,
    documents: Arc<RwLock<Documents>>,
}

impl Collection {
    fn new(name: String) -> Self {
        Self {
            name,
            documents: Arc::default(),
        }
    }

    fn poisoned(&self) -> StoreError {
        StoreError::Poisoned {
            collection: self.name.clone(),
        }
    }

    /// Insert a document under `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::DuplicateKey`] when `id` is taken.
    pub fn insert_one(&self, id: &str, document: Value) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| self.poisoned())?;
        if documents.contains(id) {
            return Err(StoreError::DuplicateKey {
                collection: self.name.clone(),
                id: id.to_owned(),
            });
        }
        documents.insert(id, document);
        Ok(())
    }

    /// Fetch the document stored under `id`.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the collection lock is poisoned.
    pub fn find_one(&self, id: &str) -> Result<Option<Value>, StoreError> {
        let documents = self.documents.read().map_err(|_| self.poisoned())?;
        Ok(documents.get(id).cloned())
    }

    /// Fetch every `(id, document)` pair in insertion order.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the collection lock is poisoned.
    pub fn find(&self) -> Result<Vec<(String, Value)>, StoreError> {
        let documents = self.documents.read().map_err(|_| self.poisoned())?;
        Ok(documents.ordered())
    }

    /// Replace the document under `id`, keeping its position.
    ///
    /// Returns `false` when no document matched.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the collection lock is poisoned.
    pub fn replace_one(&self, id: &str, document: Value) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().map_err(|_| self.poisoned())?;
        Ok(documents.replace(id, document))
    }

    /// Delete the document under `id`.
    ///
    /// Returns `false` when no document matched.
    ///
    /// # Errors
    /// Returns [`StoreError::Poisoned`] when the collection lock is poisoned.
    pub fn delete_one(&self, id: &str) -> Result<bool, StoreError> {
        let mut documents = self.documents.write().map_err(|_| self.poisoned())?;
        Ok(documents.remove(id))
    }
}
