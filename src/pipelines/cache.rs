//! Model caching so weights are shared across pipelines.
//!
//! All three pipelines may be built in the same process (one service exposes
//! all three endpoints); the cache keeps a single copy of each loaded model
//! per (type, options, device) key.

use crate::Result;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Trait implemented by model option types to generate a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache for model instances.
pub struct ModelCache {
    cache: Mutex<CacheStorage>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_or_create<M, F>(&self, key: &str, loader: F) -> Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        {
            let cache = self.cache.lock().unwrap();
            if let Some(cached) = cache.get(&cache_key) {
                if let Some(model) = cached.downcast_ref::<M>() {
                    tracing::debug!(key, "model cache hit");
                    return Ok(model.clone());
                }
            }
        }

        let model = loader()?;

        {
            let mut cache = self.cache.lock().unwrap();
            cache.insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);
        }

        Ok(model)
    }

    pub fn clear(&self) {
        self.cache.lock().unwrap().clear();
    }

    pub fn len(&self) -> usize {
        self.cache.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.lock().unwrap().is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct TestModel {
        id: String,
    }

    #[test]
    fn cache_returns_first_loaded_instance() {
        let cache = ModelCache::new();
        let first = cache
            .get_or_create::<TestModel, _>("t5-small", || {
                Ok(TestModel {
                    id: "original".into(),
                })
            })
            .unwrap();
        let second = cache
            .get_or_create::<TestModel, _>("t5-small", || Ok(TestModel { id: "reload".into() }))
            .unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn distinct_keys_load_separately() {
        let cache = ModelCache::new();
        let _ = cache
            .get_or_create::<TestModel, _>("base", || Ok(TestModel { id: "a".into() }))
            .unwrap();
        let other = cache
            .get_or_create::<TestModel, _>("large", || Ok(TestModel { id: "b".into() }))
            .unwrap();
        assert_eq!(other.id, "b");
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ModelCache::new();
        let _ = cache
            .get_or_create::<TestModel, _>("k", || Ok(TestModel { id: "x".into() }))
            .unwrap();
        assert!(!cache.is_empty());
        cache.clear();
        assert!(cache.is_empty());
    }
}
