use std::path::{Path, PathBuf};

use async_trait::async_trait;
use rust_decimal_macros::dec;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::models::catalog::{Catalog, CatalogBuildError, CatalogRecord};
use crate::models::product::ProductId;

const SNEAKER_IMAGE: &str = "https://static.netshoes.com.br/produtos/tenis-vr-caminhada-confortavel-detalhes-couro-masculino/04/E74-0413-304/E74-0413-304_detalhe2.jpg?ims=326x";

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(#[from] CatalogBuildError),
}

/// Where the product list comes from.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog, CatalogError>;
}

/// The bundled sneaker catalog.
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn records() -> Vec<CatalogRecord> {
        let entries = [
            (1, "Tênis VR Caminhada Confortável", dec!(159.90), Some(5)),
            (2, "Tênis Couro Masculino Casual", dec!(199.90), Some(3)),
            (3, "Tênis de Corrida Leve", dec!(249.90), None),
            (4, "Tênis Esportivo Feminino", dec!(139.90), Some(10)),
            (5, "Tênis Skate Lona", dec!(89.90), None),
        ];

        entries
            .into_iter()
            .map(|(id, title, price, stock)| CatalogRecord {
                id: ProductId(id),
                title: title.to_string(),
                price,
                image: SNEAKER_IMAGE.to_string(),
                stock,
            })
            .collect()
    }
}

#[async_trait]
impl CatalogSource for BuiltinCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        let catalog = Catalog::from_records(Self::records())?;
        debug!("Loaded builtin catalog with {} products", catalog.len());
        Ok(catalog)
    }
}

/// A JSON array of catalog records on disk.
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    async fn load(&self) -> Result<Catalog, CatalogError> {
        info!("Loading catalog from {}", self.path.display());

        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| {
                error!("Failed to read catalog {}: {}", self.path.display(), source);
                CatalogError::Io {
                    path: self.path.clone(),
                    source,
                }
            })?;

        let records: Vec<CatalogRecord> = serde_json::from_str(&raw)?;
        let catalog = Catalog::from_records(records)?;

        info!("Loaded {} products from {}", catalog.len(), self.path.display());
        Ok(catalog)
    }
}
