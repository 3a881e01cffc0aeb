//! Tipos de erro do memocache.

use thiserror::Error;

/// Tipo de resultado padrão do memocache.
pub type MemoResult<T> = Result<T, MemoError>;

/// Erros possíveis no memocache.
#[derive(Error, Debug)]
pub enum MemoError {
    #[error("Erro de configuração: {0}")]
    Config(String),

    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de serialização: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Erro na computação memoizada: {0}")]
    Computation(#[source] anyhow::Error),

    #[error("{0}")]
    Other(String),
}

impl MemoError {
    /// Cria um erro genérico.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }

    /// Cria um erro de configuração.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Cria um erro de computação a partir de qualquer erro do usuário.
    pub fn computation<E: Into<anyhow::Error>>(err: E) -> Self {
        Self::Computation(err.into())
    }
}
