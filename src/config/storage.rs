//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::application::{DraftStoreConfig, MasterDataStoreConfig};

use super::error::ValidationError;

/// Remote collection names and local cache location
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_drafts_collection")]
    pub drafts_collection: String,

    #[serde(default = "default_master_data_collection")]
    pub master_data_collection: String,

    /// Key of the single master data document
    #[serde(default = "default_master_data_document_id")]
    pub master_data_document_id: String,

    /// Local cache file; in-memory when unset
    #[serde(default)]
    pub cache_path: Option<PathBuf>,

    /// Comma-separated payload keys nulled before remote persistence
    #[serde(default = "default_stripped_fields")]
    pub stripped_fields: String,
}

impl StorageConfig {
    pub fn stripped_field_list(&self) -> Vec<String> {
        self.stripped_fields
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn draft_store_config(&self) -> DraftStoreConfig {
        DraftStoreConfig::default()
            .with_collection(self.drafts_collection.clone())
            .with_stripped_fields(self.stripped_field_list())
    }

    pub fn master_data_store_config(&self) -> MasterDataStoreConfig {
        MasterDataStoreConfig {
            collection: self.master_data_collection.clone(),
            document_id: self.master_data_document_id.clone(),
            ..Default::default()
        }
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.drafts_collection.trim().is_empty() {
            return Err(ValidationError::EmptyCollection("drafts_collection"));
        }
        if self.master_data_collection.trim().is_empty() {
            return Err(ValidationError::EmptyCollection("master_data_collection"));
        }
        if self.master_data_document_id.trim().is_empty() {
            return Err(ValidationError::MissingRequired("MASTER_DATA_DOCUMENT_ID"));
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            drafts_collection: default_drafts_collection(),
            master_data_collection: default_master_data_collection(),
            master_data_document_id: default_master_data_document_id(),
            cache_path: None,
            stripped_fields: default_stripped_fields(),
        }
    }
}

fn default_drafts_collection() -> String {
    "drafts".to_string()
}

fn default_master_data_collection() -> String {
    "master_data".to_string()
}

fn default_master_data_document_id() -> String {
    "default".to_string()
}

fn default_stripped_fields() -> String {
    "photos".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.drafts_collection, "drafts");
        assert_eq!(config.stripped_field_list(), vec!["photos"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_stripped_fields_are_split_and_trimmed() {
        let config = StorageConfig {
            stripped_fields: " photos, sketches ,,".to_string(),
            ..Default::default()
        };
        assert_eq!(config.stripped_field_list(), vec!["photos", "sketches"]);
    }

    #[test]
    fn test_empty_stripped_fields_strip_nothing() {
        let config = StorageConfig {
            stripped_fields: String::new(),
            ..Default::default()
        };
        assert!(config.draft_store_config().stripped_fields.is_empty());
    }

    #[test]
    fn test_validation_empty_collection() {
        let config = StorageConfig {
            drafts_collection: " ".to_string(),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::EmptyCollection("drafts_collection"))
        );
    }

    #[test]
    fn test_store_configs_carry_names() {
        let config = StorageConfig {
            master_data_collection: "lists".to_string(),
            master_data_document_id: "site-1".to_string(),
            ..Default::default()
        };
        let md = config.master_data_store_config();
        assert_eq!(md.collection, "lists");
        assert_eq!(md.document_id, "site-1");
    }
}
