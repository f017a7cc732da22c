use arrow::error::ArrowError;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

pub mod record;
pub use record::{PlanetRecord, RawPlanetRow};

pub mod table;
pub use table::{DatasetTable, Range, Stats};

pub mod csv_source;
pub use csv_source::{locate_dataset, CsvRowSource, DEFAULT_CANDIDATES};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("dataset is empty")]
    EmptyDataset,
    #[error("dataset not found (tried: {0})")]
    NotFound(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ingest error: {0}")]
    Ingest(String),
}

impl From<ArrowError> for CatalogError {
    fn from(e: ArrowError) -> Self {
        CatalogError::Ingest(e.to_string())
    }
}

/// Where raw planet rows come from. Acquisition is the only I/O the catalog
/// does; [`DatasetTable::load`] itself is pure.
#[async_trait]
pub trait RowSource: Send + Sync {
    async fn fetch_rows(&self) -> Result<Vec<RawPlanetRow>, CatalogError>;

    /// Short label for logs.
    fn describe(&self) -> String;
}

/// Rows already held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticRowSource {
    rows: Vec<RawPlanetRow>,
}

impl StaticRowSource {
    pub fn new(rows: Vec<RawPlanetRow>) -> Self {
        Self { rows }
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_rows(&self) -> Result<Vec<RawPlanetRow>, CatalogError> {
        Ok(self.rows.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} rows", self.rows.len())
    }
}

/// Fetch rows from `source` and build the table.
pub async fn load_table(source: &dyn RowSource) -> Result<DatasetTable, CatalogError> {
    let rows = source.fetch_rows().await?;
    let fetched = rows.len();
    let table = DatasetTable::load(rows);
    if table.is_empty() {
        warn!(source = %source.describe(), fetched, "no usable planets in dataset");
    } else {
        info!(source = %source.describe(), planets = table.len(), "loaded exoplanets");
    }
    Ok(table)
}
