//! Codificação de valores para o cache.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::errors::MemoResult;

/// Converte valores de/para bytes.
///
/// Lei de ida e volta: `decode(encode(v))` é observacionalmente igual a `v`
/// para todo valor suportado. Valores não codificáveis falham com erro de
/// serialização.
pub trait Codec<V>: Send + Sync {
    /// Codifica um valor em bytes.
    fn encode(&self, value: &V) -> MemoResult<Vec<u8>>;

    /// Decodifica bytes de volta em um valor.
    fn decode(&self, bytes: &[u8]) -> MemoResult<V>;
}

/// Codec padrão baseado em serde_json.
#[derive(Debug, Default)]
pub struct JsonCodec<V> {
    _marker: PhantomData<fn() -> V>,
}

impl<V> JsonCodec<V> {
    /// Cria um novo codec JSON.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<V: Serialize + DeserializeOwned> Codec<V> for JsonCodec<V> {
    fn encode(&self, value: &V) -> MemoResult<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn decode(&self, bytes: &[u8]) -> MemoResult<V> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::MemoError;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Resultado {
        total: u64,
        passos: Vec<String>,
    }

    #[test]
    fn test_round_trip() {
        let codec = JsonCodec::new();
        let value = Resultado {
            total: 9_227_465,
            passos: vec!["fib(34)".to_string(), "fib(33)".to_string()],
        };

        let bytes = codec.encode(&value).unwrap();
        let decoded: Resultado = codec.decode(&bytes).unwrap();
        assert_eq!(decoded, value);
    }

    #[test]
    fn test_decode_corrupted_bytes_fails() {
        let codec: JsonCodec<Resultado> = JsonCodec::new();
        let err = codec.decode(b"{nao-e-json").unwrap_err();
        assert!(matches!(err, MemoError::Serialization(_)));
    }

    #[test]
    fn test_unsupported_value_fails_on_encode() {
        // Mapas com chave não-textual não têm representação em JSON.
        let codec = JsonCodec::new();
        let mut value = std::collections::HashMap::new();
        value.insert(vec![1u8, 2], "x".to_string());

        let err = codec.encode(&value).unwrap_err();
        assert!(matches!(err, MemoError::Serialization(_)));
    }
}
