//! Process-wide string interner backing [`Symbol`](super::Symbol).
//!
//! Strings are leaked to get `'static` storage once interned: the
//! interpreter runs for a bounded time and the set of distinct identifiers
//! in any real program is small, so never reclaiming interned text is
//! simpler than tracking its lifetime.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::OnceLock;

pub struct StringTable {
    name_to_index: DashMap<&'static str, u32>,
    index_to_name: boxcar::Vec<&'static str>,
    next: AtomicU32,
}

// boxcar isn't part of the dependency graph; a DashMap<u32, &str> gives the
// same append-mostly, read-heavy behavior without a new crate.
mod boxcar {
    use dashmap::DashMap;

    pub struct Vec<T> {
        inner: DashMap<u32, T>,
    }

    impl<T: Copy> Vec<T> {
        pub fn new() -> Self {
            Self {
                inner: DashMap::new(),
            }
        }

        pub fn push(&self, index: u32, value: T) {
            self.inner.insert(index, value);
        }

        pub fn get(&self, index: u32) -> Option<T> {
            self.inner.get(&index).map(|r| *r)
        }

        pub fn len(&self) -> usize {
            self.inner.len()
        }
    }
}

impl StringTable {
    fn new() -> Self {
        Self {
            name_to_index: DashMap::new(),
            index_to_name: boxcar::Vec::new(),
            next: AtomicU32::new(0),
        }
    }

    /// Intern `text`, returning its stable index. Thread-safe: concurrent
    /// interning of the same string is guaranteed to return the same index.
    pub fn intern(&self, text: &str) -> u32 {
        if let Some(existing) = self.name_to_index.get(text) {
            return *existing;
        }

        // Leak once, outside any lock, then try to install it. If another
        // thread won the race we drop our leaked copy's index (the String
        // itself stays leaked, which is an acceptable one-time cost rather
        // than introducing a lock around the whole intern path).
        let leaked: &'static str = Box::leak(text.to_string().into_boxed_str());
        let index = self.next.fetch_add(1, Ordering::Relaxed);

        match self.name_to_index.entry(leaked) {
            dashmap::mapref::entry::Entry::Occupied(existing) => *existing.get(),
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                slot.insert(index);
                self.index_to_name.push(index, leaked);
                index
            }
        }
    }

    pub fn resolve(&self, index: u32) -> Option<&'static str> {
        self.index_to_name.get(index)
    }

    pub fn len(&self) -> usize {
        self.index_to_name.len()
    }
}

pub static STRING_TABLE: OnceLock<StringTable> = OnceLock::new();

pub fn table() -> &'static StringTable {
    STRING_TABLE.get_or_init(StringTable::new)
}
