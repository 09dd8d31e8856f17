//! Reading of the seed documents (catalog, translations) from disk.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    pub(crate) fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Ok(DocumentFormat::Json),
            Some("yaml" | "yml") => Ok(DocumentFormat::Yaml),
            _ => Err(CatalogError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

pub(crate) fn parse_document<T: DeserializeOwned>(
    content: &str,
    format: DocumentFormat,
    origin: &str,
) -> Result<T, CatalogError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| CatalogError::Json {
            path: origin.to_string(),
            source: e,
        }),
        DocumentFormat::Yaml => serde_yaml::from_str(content).map_err(|e| CatalogError::Yaml {
            path: origin.to_string(),
            source: e,
        }),
    }
}

/// Read and deserialize a JSON or YAML document, chosen by file extension.
pub(crate) fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogError> {
    let format = DocumentFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_document(&content, format, &path.display().to_string())
}
