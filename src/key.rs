//! Derivação de chaves a partir dos argumentos da chamada.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::types::errors::MemoResult;

/// Converte um conjunto de argumentos em uma chave estável de cache.
///
/// Conjuntos de argumentos equivalentes precisam produzir a mesma chave;
/// conjuntos distintos precisam produzir chaves distintas com probabilidade
/// esmagadora.
pub trait KeyDeriver<A>: Send + Sync {
    /// Deriva a chave canônica dos argumentos.
    fn derive(&self, args: &A) -> MemoResult<String>;
}

/// Derivador padrão: serializa os argumentos com serde_json e aplica SHA-256.
///
/// Argumentos posicionais (tuplas, structs) são sensíveis à ordem. Para
/// argumentos nomeados, use um mapa ordenado como `BTreeMap` — a
/// serialização então independe da ordem de construção, e chamadas
/// equivalentes caem na mesma chave.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonKeyDeriver;

impl<A: Serialize> KeyDeriver<A> for JsonKeyDeriver {
    fn derive(&self, args: &A) -> MemoResult<String> {
        let serialized = serde_json::to_vec(args)?;

        let mut hasher = Sha256::new();
        hasher.update(&serialized);

        Ok(hex::encode(hasher.finalize()))
    }
}
