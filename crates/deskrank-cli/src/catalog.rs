//! Catalog file I/O shared by the `discover` and `rank` commands.

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;
use deskrank_core::{normalize_product_key, CatalogItem};
use serde_json::{Map, Value};

/// How the items sit in the file.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Layout {
    /// `{"items": [...], ...}`; the other top-level keys are kept.
    Wrapped(Map<String, Value>),
    /// A bare array of items.
    Bare,
}

/// A parsed catalog file that can be written back in its original shape.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CatalogDocument {
    pub(crate) items: Vec<CatalogItem>,
    layout: Layout,
}

impl CatalogDocument {
    pub(crate) fn empty() -> Self {
        Self {
            items: Vec::new(),
            layout: Layout::Wrapped(Map::new()),
        }
    }

    pub(crate) fn parse(content: &str) -> anyhow::Result<Self> {
        match serde_json::from_str::<Value>(content)? {
            Value::Array(items) => Ok(Self {
                items: serde_json::from_value(Value::Array(items))?,
                layout: Layout::Bare,
            }),
            Value::Object(mut rest) => {
                let items = rest
                    .remove("items")
                    .context("catalog object has no \"items\" array")?;
                Ok(Self {
                    items: serde_json::from_value(items)?,
                    layout: Layout::Wrapped(rest),
                })
            }
            other => anyhow::bail!("catalog must be an object or an array, got {other}"),
        }
    }

    pub(crate) fn to_value(&self) -> anyhow::Result<Value> {
        let items = serde_json::to_value(&self.items)?;
        Ok(match &self.layout {
            Layout::Bare => items,
            Layout::Wrapped(rest) => {
                let mut object = rest.clone();
                object.insert("items".to_string(), items);
                Value::Object(object)
            }
        })
    }
}

pub(crate) fn read_catalog(path: &Path) -> anyhow::Result<CatalogDocument> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    CatalogDocument::parse(&content)
        .with_context(|| format!("failed to parse catalog {}", path.display()))
}

/// Like [`read_catalog`], but a missing file is an empty catalog.
pub(crate) fn read_catalog_or_empty(path: &Path) -> anyhow::Result<CatalogDocument> {
    if !path.exists() {
        tracing::warn!(path = %path.display(), "catalog not found; treating as empty");
        return Ok(CatalogDocument::empty());
    }
    read_catalog(path)
}

pub(crate) fn write_catalog(path: &Path, catalog: &CatalogDocument) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&catalog.to_value()?)?;
    std::fs::write(path, json + "\n")
        .with_context(|| format!("failed to write catalog {}", path.display()))?;
    tracing::info!(path = %path.display(), items = catalog.items.len(), "catalog written");
    Ok(())
}

/// Product keys already in the catalog, hidden items included.
pub(crate) fn catalog_product_keys(items: &[CatalogItem]) -> HashSet<String> {
    items
        .iter()
        .map(|item| normalize_product_key(&item.amazon.asin))
        .filter(|asin| !asin.is_empty())
        .collect()
}

/// Reads a JSON file into `T`, naming the file on failure.
pub(crate) fn read_json<T>(path: &Path, what: &str) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {what} {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {what} {}", path.display()))
}
