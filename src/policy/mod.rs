//! Armazenamento em memória com políticas de evicção.
//!
//! Este módulo implementa as três políticas suportadas (LRU, LFU e FIFO)
//! atrás de um contrato único, [`PolicyStore`]. Cada política mantém um
//! mapa `chave -> entrada` mais uma estrutura auxiliar de ordenação, e as
//! duas precisam andar sempre em sincronia: qualquer divergência é um
//! defeito interno e interrompe o processo imediatamente.

mod evictor;
mod fifo;
mod lfu;
mod lru;

pub use evictor::Evictor;
pub use fifo::FifoStore;
pub use lfu::LfuStore;
pub use lru::LruStore;

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::types::config::Policy;
use crate::types::errors::MemoResult;

/// Entrada em cache: bytes codificados + momento da gravação.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Valor já serializado pelo codec.
    pub value: Vec<u8>,

    /// Momento em que foi cacheado.
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Cria uma nova entrada com o instante atual.
    pub fn new(value: Vec<u8>) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
        }
    }

    /// Verifica se a entrada expirou.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        let elapsed = Utc::now()
            .signed_duration_since(self.cached_at)
            .to_std()
            .unwrap_or(Duration::MAX);
        elapsed > ttl
    }
}

/// Contrato comum das políticas de evicção.
///
/// As três operações têm a mesma assinatura em todas as variantes; o que
/// muda é o efeito colateral sobre a estrutura auxiliar:
///
/// - LRU: `get` move a chave para a posição mais recente.
/// - LFU: `get` e `put` incrementam o contador de acessos.
/// - FIFO: `get` não tem efeito colateral.
///
/// `put` garante `len() <= max_size()` ao retornar, evictando exatamente
/// uma vítima quando a inserção estoura a capacidade (nunca um laço até
/// encolher).
pub trait PolicyStore: Send {
    /// Nome da política.
    fn name(&self) -> &'static str;

    /// Busca uma entrada, aplicando o efeito colateral da política.
    fn get(&mut self, key: &str) -> Option<&CacheEntry>;

    /// Insere ou atualiza uma entrada, evictando uma vítima se necessário.
    fn put(&mut self, key: String, entry: CacheEntry);

    /// Remove exatamente uma vítima escolhida pela política. No-op se vazio.
    fn evict(&mut self);

    /// Remove uma chave específica (entradas expiradas ou corrompidas).
    fn remove(&mut self, key: &str) -> Option<CacheEntry>;

    /// Número atual de entradas.
    fn len(&self) -> usize;

    /// Capacidade máxima.
    fn max_size(&self) -> usize;

    /// Remove todas as entradas.
    fn clear(&mut self);

    /// Verifica se o armazenamento está vazio.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cria um armazenamento a partir da política configurada.
///
impl std::fmt::Debug for dyn PolicyStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyStore")
            .field("name", &self.name())
            .finish_non_exhaustive()
    }
}

/// `max_size` precisa ser positivo; zero é erro de configuração.
pub fn build_store(policy: Policy, max_size: usize) -> MemoResult<Box<dyn PolicyStore>> {
    use crate::types::errors::MemoError;

    if max_size == 0 {
        return Err(MemoError::config("max_size deve ser maior que zero"));
    }

    Ok(match policy {
        Policy::Lru => Box::new(LruStore::new(max_size)),
        Policy::Lfu => Box::new(LfuStore::new(max_size)),
        Policy::Fifo => Box::new(FifoStore::new(max_size)),
    })
}
