//! Motor de memoização.
//!
//! Orquestra uma chamada memoizada: deriva a chave, consulta o índice em
//! memória, cai para o armazenamento durável e só então invoca a computação
//! do usuário, gravando o resultado nos dois níveis.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::codec::{Codec, JsonCodec};
use crate::key::{JsonKeyDeriver, KeyDeriver};
use crate::policy::{build_store, CacheEntry, Evictor, PolicyStore};
use crate::store::{FileStore, Store};
use crate::types::config::MemoConfig;
use crate::types::errors::{MemoError, MemoResult};

/// Estatísticas do motor.
#[derive(Debug, Clone, Default)]
pub struct MemoStats {
    /// Número atual de entradas em memória.
    pub size: usize,

    /// Capacidade máxima em memória.
    pub capacity: usize,

    /// Número de acertos (cache hits), em memória ou em disco.
    pub hits: u64,

    /// Número de faltas (cache misses).
    pub misses: u64,
}

impl MemoStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Estado mutável compartilhado entre chamadas concorrentes.
struct EngineState {
    policy: Box<dyn PolicyStore>,
    evictor: Evictor,
}

/// Motor de memoização de uma única função.
///
/// Cada função decorada ganha o seu próprio motor, com armazenamento,
/// evictor e trava exclusivos; motores independentes não disputam nada
/// entre si. O motor vive pelo tempo de vida do processo.
pub struct MemoEngine<A, V, F>
where
    F: Fn(&A) -> anyhow::Result<V>,
{
    compute: F,
    config: MemoConfig,
    deriver: Box<dyn KeyDeriver<A>>,
    codec: Box<dyn Codec<V>>,
    store: Box<dyn Store>,
    state: Mutex<EngineState>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<A, V, F> std::fmt::Debug for MemoEngine<A, V, F>
where
    F: Fn(&A) -> anyhow::Result<V>,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<A, V, F> MemoEngine<A, V, F>
where
    A: Serialize,
    V: Serialize + DeserializeOwned + 'static,
    F: Fn(&A) -> anyhow::Result<V>,
{
    /// Cria um motor com os colaboradores padrão: chaves JSON + SHA-256,
    /// valores em JSON e registros duráveis em arquivos.
    pub fn new(config: MemoConfig, compute: F) -> MemoResult<Self> {
        let store = FileStore::new(config.cache_dir.clone());
        Self::with_parts(
            config,
            compute,
            Box::new(JsonKeyDeriver),
            Box::new(JsonCodec::new()),
            Box::new(store),
        )
    }
}

impl<A, V, F> MemoEngine<A, V, F>
where
    F: Fn(&A) -> anyhow::Result<V>,
{
    /// Cria um motor com colaboradores injetados.
    ///
    /// Valida a configuração antes de qualquer chamada: capacidade zero e
    /// política desconhecida falham aqui, nunca silenciosamente depois.
    pub fn with_parts(
        config: MemoConfig,
        compute: F,
        deriver: Box<dyn KeyDeriver<A>>,
        codec: Box<dyn Codec<V>>,
        store: Box<dyn Store>,
    ) -> MemoResult<Self> {
        config.validate()?;
        let policy = build_store(config.policy, config.max_size)?;

        Ok(Self {
            compute,
            config,
            deriver,
            codec,
            store,
            state: Mutex::new(EngineState {
                policy,
                evictor: Evictor::new(),
            }),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        })
    }

    /// Executa uma chamada memoizada.
    ///
    /// Acertos decodificam o valor gravado sem invocar a computação. Faltas
    /// invocam a computação com os argumentos originais e gravam o resultado
    /// em memória e em disco (write-through); uma falha de persistência é
    /// reportada e o valor recém-computado ainda é retornado.
    ///
    /// Garantia de concorrência: computa-ao-menos-uma-vez. A trava do motor
    /// cobre as mutações do armazenamento, mas a computação roda fora dela;
    /// faltas concorrentes para a mesma chave podem computar em duplicata,
    /// e a última gravação vence.
    pub fn call(&self, args: &A) -> MemoResult<V> {
        let key = self.deriver.derive(args)?;

        if let Some(value) = self.lookup_memory(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }

        if let Some(value) = self.lookup_durable(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(value);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);

        // Erros da computação propagam intactos e nada é gravado.
        let value = (self.compute)(args).map_err(MemoError::Computation)?;

        let encoded = self.codec.encode(&value)?;
        self.commit(&key, encoded);

        Ok(value)
    }

    /// Invalida a entrada em memória de um conjunto de argumentos.
    ///
    /// O registro durável não é apagado; ele só deixa de ser alcançável
    /// quando sobrescrito por uma nova computação.
    pub fn invalidate(&self, args: &A) -> MemoResult<()> {
        let key = self.deriver.derive(args)?;
        self.lock_state().policy.remove(&key);
        Ok(())
    }

    /// Limpa todas as entradas em memória.
    pub fn clear(&self) {
        self.lock_state().policy.clear();
    }

    /// Retorna estatísticas do motor.
    pub fn stats(&self) -> MemoStats {
        let state = self.lock_state();
        MemoStats {
            size: state.policy.len(),
            capacity: state.policy.max_size(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, EngineState> {
        // Envenenamento indica pânico com a trava tomada, ou seja, um
        // defeito interno do armazenamento; não há como continuar.
        self.state.lock().expect("trava do cache envenenada")
    }

    /// Consulta o índice em memória, aplicando o TTL no momento da busca.
    fn lookup_memory(&self, key: &str) -> Option<V> {
        let ttl = self.config.ttl_secs.map(Duration::from_secs);
        let mut state = self.lock_state();

        let bytes = {
            let entry = state.policy.get(key)?;
            if ttl.is_some_and(|t| entry.is_expired(t)) {
                None
            } else {
                Some(entry.value.clone())
            }
        };

        let bytes = match bytes {
            Some(bytes) => bytes,
            None => {
                // Expirada: sai do índice e conta como falta.
                state.policy.remove(key);
                return None;
            }
        };

        match self.codec.decode(&bytes) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "entrada em memória corrompida, descartando");
                state.policy.remove(key);
                None
            }
        }
    }

    /// Consulta o armazenamento durável e repovoa o índice em memória.
    ///
    /// Registros corrompidos ou ilegíveis são tratados como falta; a
    /// recomputação sobrescreve o registro.
    fn lookup_durable(&self, key: &str) -> Option<V> {
        let bytes = match self.store.get(key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "falha ao ler registro durável");
                return None;
            }
        };

        match self.codec.decode(&bytes) {
            Ok(value) => {
                let mut state = self.lock_state();
                state.policy.put(key.to_string(), CacheEntry::new(bytes));
                let EngineState { policy, evictor } = &mut *state;
                evictor.enforce(policy.as_mut());
                Some(value)
            }
            Err(err) => {
                warn!(key, %err, "registro durável corrompido, recomputando");
                None
            }
        }
    }

    /// Write-through: grava em memória e em disco sob a trava do motor.
    fn commit(&self, key: &str, encoded: Vec<u8>) {
        let mut state = self.lock_state();

        state
            .policy
            .put(key.to_string(), CacheEntry::new(encoded.clone()));
        let EngineState { policy, evictor } = &mut *state;
        evictor.enforce(policy.as_mut());

        // Persistência é melhor-esforço: uma falha de IO não derruba a
        // chamada, o valor computado já está garantido.
        if let Err(err) = self.store.put(key, &encoded) {
            warn!(key, %err, "falha ao salvar registro durável");
        }
    }
}
