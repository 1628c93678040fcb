//! Validation settings

use super::RegionLanguage;
use super::session::{DEFAULT_MAX_EMBEDDING_DEPTH, DEFAULT_MAX_REGION_LEN};

/// Which embedded languages are validated, and how
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationSettings {
    pub cron: bool,
    pub spel: bool,
    pub jpql: bool,
    pub placeholders: bool,
    /// Publish each region's problems as a partial batch once it is done
    pub checkpoint_regions: bool,
    /// How deep embedded languages may nest inside each other
    pub max_embedding_depth: usize,
    /// Regions longer than this (in bytes) are skipped
    pub max_region_len: usize,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            cron: true,
            spel: true,
            jpql: true,
            placeholders: true,
            checkpoint_regions: false,
            max_embedding_depth: DEFAULT_MAX_EMBEDDING_DEPTH,
            max_region_len: DEFAULT_MAX_REGION_LEN,
        }
    }
}

impl ValidationSettings {
    pub fn is_enabled(&self, language: RegionLanguage) -> bool {
        match language {
            RegionLanguage::Cron => self.cron,
            RegionLanguage::Spel => self.spel,
            RegionLanguage::Placeholder => self.placeholders,
            RegionLanguage::Jpql => self.jpql,
        }
    }

    pub fn with_language(mut self, language: RegionLanguage, enabled: bool) -> Self {
        match language {
            RegionLanguage::Cron => self.cron = enabled,
            RegionLanguage::Spel => self.spel = enabled,
            RegionLanguage::Placeholder => self.placeholders = enabled,
            RegionLanguage::Jpql => self.jpql = enabled,
        }
        self
    }

    pub fn with_checkpoints(mut self, checkpoint_regions: bool) -> Self {
        self.checkpoint_regions = checkpoint_regions;
        self
    }

    pub fn with_max_embedding_depth(mut self, depth: usize) -> Self {
        self.max_embedding_depth = depth;
        self
    }

    pub fn with_max_region_len(mut self, len: usize) -> Self {
        self.max_region_len = len;
        self
    }
}
