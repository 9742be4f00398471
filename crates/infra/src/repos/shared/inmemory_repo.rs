use event_scheduler_domain::{Entity, ID};
use std::collections::BTreeMap;
use std::sync::Mutex;

// Useful functions for creating inmemory repositories.
// Collections are keyed and ordered by id, which gives the same stable
// scan order as a keyset-paged database table.

pub type Collection<T> = Mutex<BTreeMap<ID, T>>;

/// Inserts or replaces the value with the given id. `build` receives the
/// currently stored value, if any, and returns the value to store.
pub fn upsert_with<T: Clone, F: FnOnce(Option<&T>) -> T>(
    val_id: &ID,
    collection: &Collection<T>,
    build: F,
) -> anyhow::Result<T> {
    let mut collection = collection
        .lock()
        .map_err(|_| anyhow::Error::msg("In-memory collection lock was poisoned"))?;
    let val = build(collection.get(val_id));
    collection.insert(val_id.clone(), val.clone());
    Ok(val)
}

pub fn find<T: Clone>(val_id: &ID, collection: &Collection<T>) -> anyhow::Result<Option<T>> {
    let collection = collection
        .lock()
        .map_err(|_| anyhow::Error::msg("In-memory collection lock was poisoned"))?;
    Ok(collection.get(val_id).cloned())
}

pub fn delete<T: Clone>(val_id: &ID, collection: &Collection<T>) -> anyhow::Result<Option<T>> {
    let mut collection = collection
        .lock()
        .map_err(|_| anyhow::Error::msg("In-memory collection lock was poisoned"))?;
    Ok(collection.remove(val_id))
}

/// Returns up to `limit` values with an id greater than `after`, together
/// with the id to continue from when there may be more values
pub fn scan_page<T: Clone + Entity>(
    after: Option<&ID>,
    limit: usize,
    collection: &Collection<T>,
) -> anyhow::Result<(Vec<T>, Option<ID>)> {
    use std::ops::Bound::{Excluded, Unbounded};

    let collection = collection
        .lock()
        .map_err(|_| anyhow::Error::msg("In-memory collection lock was poisoned"))?;
    let lower = match after {
        Some(id) => Excluded(id.clone()),
        None => Unbounded,
    };
    let items = collection
        .range((lower, Unbounded))
        .take(limit)
        .map(|(_, val)| val.clone())
        .collect::<Vec<_>>();
    let next = if items.len() == limit {
        items.last().map(|val| val.id().clone())
    } else {
        None
    };

    Ok((items, next))
}
