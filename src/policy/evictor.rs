//! Gatilho de imposição de capacidade.

use super::PolicyStore;

/// Delegado de imposição de capacidade.
///
/// Desacoplado do [`PolicyStore`] para que a política possa ser trocada ou
/// instrumentada sem tocar no motor. Impõe a semântica de uma única evicção
/// por estouro; políticas multi-vítima futuras entram por aqui.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evictor;

impl Evictor {
    /// Cria um novo evictor.
    pub fn new() -> Self {
        Self
    }

    /// Evicta uma única vítima se o armazenamento estourou a capacidade.
    pub fn enforce(&self, store: &mut dyn PolicyStore) {
        if store.len() > store.max_size() {
            store.evict();
        }
    }
}
