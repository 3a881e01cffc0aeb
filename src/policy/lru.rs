//! Política Least Recently Used.

use lru::LruCache;

use super::{CacheEntry, PolicyStore};

/// Armazenamento LRU.
///
/// A estrutura de ordenação por recência vem do crate `lru`, usada sem
/// limite interno: a capacidade é imposta aqui, com exatamente uma evicção
/// por `put` que estoura o `max_size`.
pub struct LruStore {
    cache: LruCache<String, CacheEntry>,
    max_size: usize,
}

impl LruStore {
    /// Cria um novo armazenamento LRU.
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: LruCache::unbounded(),
            max_size,
        }
    }
}

impl PolicyStore for LruStore {
    fn name(&self) -> &'static str {
        "lru"
    }

    fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        // get promove a chave para a posição mais recente.
        self.cache.get(key)
    }

    fn put(&mut self, key: String, entry: CacheEntry) {
        self.cache.put(key, entry);
        if self.cache.len() > self.max_size {
            self.evict();
        }
    }

    fn evict(&mut self) {
        self.cache.pop_lru();
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.cache.pop(key)
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn clear(&mut self) {
        self.cache.clear();
    }
}
