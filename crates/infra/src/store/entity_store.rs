use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use usermgmt_core::Entity;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("a {kind} with key '{key}' already exists")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("no {kind} with key '{key}'")]
    NotFound { kind: &'static str, key: String },

    #[error("{kind} store lock poisoned")]
    Poisoned { kind: &'static str },
}

/// Keyed record store abstraction for one entity kind.
///
/// Records keep insertion order. At most one record exists per key: `insert`
/// refuses a key that is already present. Each call is atomic on its own;
/// nothing spans two calls.
pub trait EntityStore<E: Entity>: Send + Sync {
    /// All records, in insertion order.
    fn list(&self) -> Result<Vec<E>, StoreError>;

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError>;

    /// Every record except the one keyed `id` (all of them if `id` is absent).
    fn others(&self, id: &E::Id) -> Result<Vec<E>, StoreError>;

    fn insert(&self, entity: E) -> Result<(), StoreError>;

    /// Mutate the record keyed `id` in place and return the updated copy.
    ///
    /// `apply` must not change the key.
    fn update(&self, id: &E::Id, apply: &mut dyn FnMut(&mut E)) -> Result<E, StoreError>;

    fn remove(&self, id: &E::Id) -> Result<E, StoreError>;
}

impl<E, S> EntityStore<E> for Arc<S>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    fn list(&self) -> Result<Vec<E>, StoreError> {
        (**self).list()
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        (**self).get(id)
    }

    fn others(&self, id: &E::Id) -> Result<Vec<E>, StoreError> {
        (**self).others(id)
    }

    fn insert(&self, entity: E) -> Result<(), StoreError> {
        (**self).insert(entity)
    }

    fn update(&self, id: &E::Id, apply: &mut dyn FnMut(&mut E)) -> Result<E, StoreError> {
        (**self).update(id, apply)
    }

    fn remove(&self, id: &E::Id) -> Result<E, StoreError> {
        (**self).remove(id)
    }
}

/// In-memory ordered store. Contents live as long as the process.
#[derive(Debug)]
pub struct InMemoryStore<E> {
    inner: RwLock<Vec<E>>,
}

impl<E: Entity> InMemoryStore<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Vec::new()),
        }
    }

    /// Build a store pre-populated with `records`.
    ///
    /// Later records whose key repeats an earlier one are dropped.
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        let mut kept: Vec<E> = Vec::new();
        for record in records {
            if kept.iter().any(|e| e.id() == record.id()) {
                tracing::warn!(kind = E::kind(), key = %record.id(), "skipping duplicate seed record");
                continue;
            }
            kept.push(record);
        }
        Self {
            inner: RwLock::new(kept),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<E>>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Poisoned { kind: E::kind() })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<E>>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Poisoned { kind: E::kind() })
    }

    fn not_found(id: &E::Id) -> StoreError {
        StoreError::NotFound {
            kind: E::kind(),
            key: id.to_string(),
        }
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> EntityStore<E> for InMemoryStore<E> {
    fn list(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &E::Id) -> Result<Option<E>, StoreError> {
        Ok(self.read()?.iter().find(|e| e.id() == id).cloned())
    }

    fn others(&self, id: &E::Id) -> Result<Vec<E>, StoreError> {
        Ok(self
            .read()?
            .iter()
            .filter(|e| e.id() != id)
            .cloned()
            .collect())
    }

    fn insert(&self, entity: E) -> Result<(), StoreError> {
        let mut records = self.write()?;
        if records.iter().any(|e| e.id() == entity.id()) {
            return Err(StoreError::DuplicateKey {
                kind: E::kind(),
                key: entity.id().to_string(),
            });
        }
        records.push(entity);
        Ok(())
    }

    fn update(&self, id: &E::Id, apply: &mut dyn FnMut(&mut E)) -> Result<E, StoreError> {
        let mut records = self.write()?;
        let record = records
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        apply(record);
        Ok(record.clone())
    }

    fn remove(&self, id: &E::Id) -> Result<E, StoreError> {
        let mut records = self.write()?;
        let idx = records
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        Ok(records.remove(idx))
    }
}
