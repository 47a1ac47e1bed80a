use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use log::info;

use super::Lexicon;
use crate::config::Config;
use crate::error::Result;

/// Lexica loaded on first use and shared between searches. Nothing is ever
/// evicted.
pub struct LexiconCache {
    config: Config,
    lexica: RwLock<HashMap<String, Arc<Lexicon>>>,
}

impl LexiconCache {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            lexica: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the named lexicon, reading its word list the first time
    pub fn get(&self, name: &str) -> Result<Arc<Lexicon>> {
        let cached = self
            .lexica
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned();
        if let Some(lexicon) = cached {
            return Ok(lexicon);
        }

        // Loaded outside the lock; if two callers race, the first insert wins
        let path = self.config.check_lexicon(name)?;
        let dist = self.config.distribution(name)?;
        let loaded = Arc::new(Lexicon::from_file(name, path, dist)?);
        let mut lexica = self.lexica.write().unwrap_or_else(PoisonError::into_inner);
        let lexicon = lexica.entry(name.to_string()).or_insert(loaded);
        info!("Cached lexicon {}", name);
        Ok(Arc::clone(lexicon))
    }

    pub fn insert(&self, lexicon: Lexicon) -> Arc<Lexicon> {
        let lexicon = Arc::new(lexicon);
        self.lexica
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(lexicon.name().to_string(), Arc::clone(&lexicon));
        lexicon
    }

    pub fn len(&self) -> usize {
        self.lexica.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
