//! Política Least Frequently Used.

use std::collections::HashMap;

use super::{CacheEntry, PolicyStore};

/// Metadados de frequência de uma chave.
#[derive(Debug, Clone, Copy)]
struct Usage {
    /// Número de acessos (get e put contam).
    count: u64,
    /// Número de sequência da inserção, usado como desempate.
    seq: u64,
}

/// Armazenamento LFU.
///
/// Mantém um contador de acessos por chave. A vítima é a chave de menor
/// contador; empates são resolvidos pela chave inserida há mais tempo
/// (menor número de sequência), o que torna a evicção determinística
/// independente da ordem de iteração do `HashMap`.
pub struct LfuStore {
    cache: HashMap<String, CacheEntry>,
    usage: HashMap<String, Usage>,
    next_seq: u64,
    max_size: usize,
}

impl LfuStore {
    /// Cria um novo armazenamento LFU.
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            usage: HashMap::new(),
            next_seq: 0,
            max_size,
        }
    }

    /// Contador de acessos de uma chave, se presente.
    pub fn frequency(&self, key: &str) -> Option<u64> {
        self.usage.get(key).map(|u| u.count)
    }
}

impl PolicyStore for LfuStore {
    fn name(&self) -> &'static str {
        "lfu"
    }

    fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        if let Some(usage) = self.usage.get_mut(key) {
            usage.count += 1;
        }
        self.cache.get(key)
    }

    fn put(&mut self, key: String, entry: CacheEntry) {
        match self.usage.get_mut(&key) {
            Some(usage) => usage.count += 1,
            None => {
                let usage = Usage {
                    count: 1,
                    seq: self.next_seq,
                };
                self.next_seq += 1;
                self.usage.insert(key.clone(), usage);
            }
        }
        self.cache.insert(key, entry);

        if self.cache.len() > self.max_size {
            self.evict();
        }
    }

    fn evict(&mut self) {
        let victim = self
            .usage
            .iter()
            .min_by_key(|(_, u)| (u.count, u.seq))
            .map(|(key, _)| key.clone());

        if let Some(key) = victim {
            self.usage.remove(&key);
            assert!(
                self.cache.remove(&key).is_some(),
                "mapa e contadores LFU dessincronizados na chave {key}"
            );
        }
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        self.usage.remove(key);
        self.cache.remove(key)
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.usage.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(byte: u8) -> CacheEntry {
        CacheEntry::new(vec![byte])
    }

    #[test]
    fn test_lfu_evicts_least_frequent() {
        let mut store = LfuStore::new(2);

        store.put("a".to_string(), entry(1));
        store.put("b".to_string(), entry(2));
        store.get("a");
        store.get("a"); // "a" com contador 3, "b" com 1
        store.put("c".to_string(), entry(3)); // deve evictar "b"

        assert!(store.get("b").is_none());
        assert!(store.get("a").is_some());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_lfu_tie_break_is_insertion_order() {
        let mut store = LfuStore::new(2);

        // "a" e "b" empatados com contador 1; "a" foi inserida primeiro.
        store.put("a".to_string(), entry(1));
        store.put("b".to_string(), entry(2));
        store.put("c".to_string(), entry(3));

        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_lfu_put_increments_count() {
        let mut store = LfuStore::new(3);

        store.put("a".to_string(), entry(1));
        assert_eq!(store.frequency("a"), Some(1));

        store.put("a".to_string(), entry(2));
        assert_eq!(store.frequency("a"), Some(2));

        store.get("a");
        assert_eq!(store.frequency("a"), Some(3));
    }

    #[test]
    fn test_lfu_get_miss_does_not_create_counter() {
        let mut store = LfuStore::new(3);

        assert!(store.get("fantasma").is_none());
        assert_eq!(store.frequency("fantasma"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_lfu_remove_drops_counter() {
        let mut store = LfuStore::new(3);

        store.put("a".to_string(), entry(1));
        store.remove("a");

        assert_eq!(store.frequency("a"), None);
        assert!(store.is_empty());

        // Reinserção começa do zero.
        store.put("a".to_string(), entry(1));
        assert_eq!(store.frequency("a"), Some(1));
    }
}
