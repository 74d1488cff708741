//! Id-keyed cache of canonical in-memory instances.
//!
//! # Invariants
//! - At most one `Shared<T>` per id.
//! - Entries are never evicted implicitly; only `remove`/`clear` shrink the map.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Handle to the canonical instance of a stored row.
///
/// Clones of a handle point at the same object, so `Rc::ptr_eq` is the
/// identity check.
pub type Shared<T> = Rc<RefCell<T>>;

/// Wraps a value into a fresh shared handle.
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

#[derive(Debug)]
pub struct IdentityMap<T> {
    entries: HashMap<i64, Shared<T>>,
}

impl<T> IdentityMap<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the cached handle for `id`, if any.
    pub fn get(&self, id: i64) -> Option<Shared<T>> {
        self.entries.get(&id).map(Rc::clone)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn insert(&mut self, id: i64, value: Shared<T>) {
        self.entries.insert(id, value);
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<Shared<T>> {
        self.entries.remove(&id)
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for IdentityMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{shared, IdentityMap};
    use std::rc::Rc;

    #[test]
    fn get_returns_the_registered_handle() {
        let mut map = IdentityMap::new();
        let handle = shared("alpha".to_string());
        map.insert(1, Rc::clone(&handle));

        let cached = map.get(1).unwrap();
        assert!(Rc::ptr_eq(&cached, &handle));
        assert!(map.get(2).is_none());
    }

    #[test]
    fn remove_and_clear_evict_entries() {
        let mut map = IdentityMap::new();
        map.insert(1, shared(1_u8));
        map.insert(2, shared(2_u8));

        assert!(map.remove(1).is_some());
        assert!(!map.contains(1));
        assert_eq!(map.len(), 1);

        map.clear();
        assert!(map.is_empty());
    }
}
