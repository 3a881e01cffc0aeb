//! Política First In, First Out.

use std::collections::{HashMap, VecDeque};

use super::{CacheEntry, PolicyStore};

/// Armazenamento FIFO.
///
/// A fila auxiliar guarda as chaves na ordem de inserção; acessos não
/// alteram a ordem. Atualizar uma chave existente troca o valor mas mantém
/// a posição original na fila.
pub struct FifoStore {
    cache: HashMap<String, CacheEntry>,
    queue: VecDeque<String>,
    max_size: usize,
}

impl FifoStore {
    /// Cria um novo armazenamento FIFO.
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: HashMap::new(),
            queue: VecDeque::new(),
            max_size,
        }
    }
}

impl PolicyStore for FifoStore {
    fn name(&self) -> &'static str {
        "fifo"
    }

    fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        // Sem efeito colateral: FIFO ignora acessos.
        self.cache.get(key)
    }

    fn put(&mut self, key: String, entry: CacheEntry) {
        if !self.cache.contains_key(&key) {
            self.queue.push_back(key.clone());
        }
        self.cache.insert(key, entry);

        if self.cache.len() > self.max_size {
            self.evict();
        }
    }

    fn evict(&mut self) {
        if let Some(key) = self.queue.pop_front() {
            assert!(
                self.cache.remove(&key).is_some(),
                "mapa e fila FIFO dessincronizados na chave {key}"
            );
        }
    }

    fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let removed = self.cache.remove(key);
        if removed.is_some() {
            self.queue.retain(|k| k != key);
        }
        removed
    }

    fn len(&self) -> usize {
        self.cache.len()
    }

    fn max_size(&self) -> usize {
        self.max_size
    }

    fn clear(&mut self) {
        self.cache.clear();
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(byte: u8) -> CacheEntry {
        CacheEntry::new(vec![byte])
    }

    #[test]
    fn test_fifo_evicts_oldest_insertion() {
        let mut store = FifoStore::new(2);

        store.put("a".to_string(), entry(1));
        store.put("b".to_string(), entry(2));
        store.get("a"); // acesso não protege "a"
        store.put("c".to_string(), entry(3)); // deve evictar "a"

        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_fifo_update_keeps_queue_position() {
        let mut store = FifoStore::new(2);

        store.put("a".to_string(), entry(1));
        store.put("b".to_string(), entry(2));
        store.put("a".to_string(), entry(9)); // atualização não muda a fila
        store.put("c".to_string(), entry(3)); // "a" continua sendo a mais velha

        assert!(store.get("a").is_none());
        assert!(store.get("b").is_some());
        assert!(store.get("c").is_some());
    }

    #[test]
    fn test_fifo_remove_keeps_queue_in_sync() {
        let mut store = FifoStore::new(2);

        store.put("a".to_string(), entry(1));
        store.put("b".to_string(), entry(2));
        store.remove("a");

        // Com "a" fora da fila, a próxima evicção cai em "b".
        store.put("c".to_string(), entry(3));
        store.put("d".to_string(), entry(4));

        assert!(store.get("b").is_none());
        assert!(store.get("c").is_some());
        assert!(store.get("d").is_some());
    }
}
