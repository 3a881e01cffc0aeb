//! Armazenamento durável de registros do cache.

mod file;

pub use file::FileStore;

use crate::types::errors::MemoResult;

/// Contrato do armazenamento durável.
///
/// Um registro por chave. Registros nunca são apagados por este núcleo;
/// apenas as entradas em memória sofrem evicção.
pub trait Store: Send + Sync {
    /// Busca os bytes gravados para uma chave.
    fn get(&self, key: &str) -> MemoResult<Option<Vec<u8>>>;

    /// Grava os bytes de uma chave.
    fn put(&self, key: &str, bytes: &[u8]) -> MemoResult<()>;
}
