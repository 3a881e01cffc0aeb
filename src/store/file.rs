//! Armazenamento durável em arquivos.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::Store;
use crate::types::errors::MemoResult;

/// Extensão dos registros gravados em disco.
const RECORD_EXTENSION: &str = "memo";

/// Armazenamento durável com um arquivo `.memo` por chave.
///
/// O nome de cada arquivo é a própria chave derivada (hash hexadecimal),
/// então o caminho é determinístico e seguro como nome de arquivo. O
/// diretório é criado no primeiro uso.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Cria um armazenamento sob o diretório informado.
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Diretório dos registros.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.{RECORD_EXTENSION}"))
    }

    fn ensure_dir(&self) -> MemoResult<()> {
        if !self.dir.exists() {
            debug!(dir = %self.dir.display(), "criando diretório de cache");
            fs::create_dir_all(&self.dir)?;
        }
        Ok(())
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> MemoResult<Option<Vec<u8>>> {
        let path = self.record_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    fn put(&self, key: &str, bytes: &[u8]) -> MemoResult<()> {
        self.ensure_dir()?;
        let path = self.record_path(key);
        debug!(path = %path.display(), "salvando registro no arquivo");
        fs::write(&path, bytes)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_put_then_get() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path().join("cache"));

        store.put("abc123", b"conteudo").unwrap();
        let bytes = store.get("abc123").unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"conteudo"[..]));
    }

    #[test]
    fn test_get_missing_key() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        assert!(store.get("inexistente").unwrap().is_none());
    }

    #[test]
    fn test_directory_created_on_first_put() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("a").join("b");
        let store = FileStore::new(&dir);

        assert!(!dir.exists());
        store.put("k", b"v").unwrap();
        assert!(dir.exists());
        assert!(dir.join("k.memo").exists());
    }

    #[test]
    fn test_put_overwrites_existing_record() {
        let tmp = TempDir::new().unwrap();
        let store = FileStore::new(tmp.path());

        store.put("k", b"v1").unwrap();
        store.put("k", b"v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some(&b"v2"[..]));
    }
}
