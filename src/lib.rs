//! # memocache
//!
//! Memoização de resultados de função com estratégias de evicção
//! plugáveis (LFU, LRU, FIFO) e persistência em arquivos.
//!
//! Cada função memoizada ganha um [`MemoEngine`] próprio: as chamadas
//! derivam uma chave estável dos argumentos, consultam o índice em memória
//! e o diretório de registros duráveis, e só computam de verdade quando os
//! dois falham. O resultado é gravado nos dois níveis (write-through), com
//! a capacidade em memória imposta pela política de evicção configurada.
//!
//! ## Módulos
//!
//! - [`engine`] - Motor de memoização por função
//! - [`policy`] - Políticas de evicção (LRU, LFU, FIFO) e o evictor
//! - [`key`] - Derivação de chaves a partir dos argumentos
//! - [`codec`] - Codificação de valores de/para bytes
//! - [`store`] - Armazenamento durável de registros
//! - [`types`] - Configuração e tipos de erro
//!
//! ## Exemplo
//!
//! ```no_run
//! use memocache::{MemoConfig, MemoEngine};
//!
//! let engine = MemoEngine::new(MemoConfig::default(), |n: &u64| {
//!     Ok(n.wrapping_mul(*n))
//! })?;
//!
//! let quadrado = engine.call(&12)?; // computa
//! let de_novo = engine.call(&12)?;  // acerto, sem recomputar
//! assert_eq!(quadrado, de_novo);
//! # Ok::<(), memocache::MemoError>(())
//! ```

pub mod codec;
pub mod engine;
pub mod key;
pub mod policy;
pub mod store;
pub mod types;

pub use codec::{Codec, JsonCodec};
pub use engine::{MemoEngine, MemoStats};
pub use key::{JsonKeyDeriver, KeyDeriver};
pub use policy::{CacheEntry, Evictor, FifoStore, LfuStore, LruStore, PolicyStore};
pub use store::{FileStore, Store};
pub use types::config::{MemoConfig, Policy};
pub use types::errors::{MemoError, MemoResult};
