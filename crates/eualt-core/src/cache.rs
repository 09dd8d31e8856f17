//! Memoization of filter results.
//!
//! The catalog is immutable between reloads, so a result depends only on the
//! language and the normalized request. Entries are shared as `Arc<[_]>`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::engine::FilterEngine;
use crate::language::Language;
use crate::products::FilteredProduct;
use crate::query::{normalize_text, FilterRequest};

type CacheKey = (Language, FilterRequest);

#[derive(Debug, Default)]
pub struct FilterCache {
    capacity: usize,
    entries: Mutex<HashMap<CacheKey, Arc<[FilteredProduct]>>>,
}

impl FilterCache {
    /// A cache holding at most `capacity` results. `0` disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Return the cached result for `request`, computing it on a miss.
    ///
    /// The filter runs outside the lock; two concurrent misses for the same
    /// key both compute and the later insert wins.
    pub fn get_or_filter(
        &self,
        engine: &FilterEngine<'_>,
        language: Language,
        request: &FilterRequest,
    ) -> Arc<[FilteredProduct]> {
        if self.capacity == 0 {
            return engine.filter(language, request).into();
        }

        let key = (
            language,
            FilterRequest {
                text: normalize_text(&request.text),
                ..request.clone()
            },
        );

        if let Some(hit) = self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            tracing::trace!(language = %language, "filter cache hit");
            return Arc::clone(hit);
        }

        let computed: Arc<[FilteredProduct]> = engine.filter(language, &key.1).into();

        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.len() >= self.capacity {
            tracing::debug!(capacity = self.capacity, "filter cache full; clearing");
            entries.clear();
        }
        entries.insert(key, Arc::clone(&computed));
        computed
    }

    /// Drop every cached result, e.g. after the catalog was reloaded.
    pub fn invalidate(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
