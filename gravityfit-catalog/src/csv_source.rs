use std::fs::File;
use std::io::Seek;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::csv::reader::Format;
use arrow::csv::ReaderBuilder;
use arrow::datatypes::{DataType, Float64Type};
use arrow::record_batch::RecordBatch;
use async_trait::async_trait;

use crate::{CatalogError, RawPlanetRow, RowSource};

/// Column names in the NASA Exoplanet Archive export.
pub mod columns {
    pub const NAME: &str = "pl_name";
    pub const HOST_STAR: &str = "hostname";
    pub const RADIUS: &str = "pl_rade";
    pub const MASS: &str = "pl_bmasse";
    pub const GRAVITY_FRACTION: &str = "g_fraction";
    pub const INTENSITY_INDEX: &str = "intensity_index";
    pub const ORBITAL_PERIOD: &str = "pl_orbper";
    pub const SEMI_MAJOR_AXIS: &str = "pl_orbsmax";
    pub const EQUILIBRIUM_TEMP: &str = "pl_eqt";
    pub const STELLAR_TEFF: &str = "st_teff";
    pub const DISTANCE: &str = "sy_dist";
    pub const DEFAULT_FLAG: &str = "default_flag";

    pub const REQUIRED: [&str; 6] = [
        NAME,
        HOST_STAR,
        RADIUS,
        MASS,
        GRAVITY_FRACTION,
        INTENSITY_INDEX,
    ];
}

/// File names tried, in order, when no dataset path is configured.
pub const DEFAULT_CANDIDATES: [&str; 3] = ["CDC_CH2.csv", "../CDC_CH2.csv", "../../CDC_CH2.csv"];

const BATCH_SIZE: usize = 4096;

/// Reads raw planet rows from a CSV export through the Arrow CSV reader.
///
/// The schema is inferred from every record in the file, not a prefix, so a
/// fractional cell deep in an otherwise integral column still types it as a
/// float. Each column the table needs is then cast to `Float64` or `Utf8`. Cells that fail the cast, blank
/// cells and absent optional columns all surface as `None`.
#[derive(Clone, Debug)]
pub struct CsvRowSource {
    path: PathBuf,
}

impl CsvRowSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn read_rows(&self) -> Result<Vec<RawPlanetRow>, CatalogError> {
        let mut file = File::open(&self.path)?;
        let (schema, _) = Format::default()
            .with_header(true)
            .infer_schema(&mut file, None)?;
        for required in columns::REQUIRED {
            if schema.column_with_name(required).is_none() {
                return Err(CatalogError::Ingest(format!(
                    "{}: missing column '{required}'",
                    self.path.display()
                )));
            }
        }
        file.rewind()?;

        let reader = ReaderBuilder::new(Arc::new(schema))
            .with_header(true)
            .with_batch_size(BATCH_SIZE)
            .build(file)?;

        let mut rows = Vec::new();
        for batch in reader {
            rows.extend(rows_from_batch(&batch?)?);
        }
        Ok(rows)
    }
}

#[async_trait]
impl RowSource for CsvRowSource {
    async fn fetch_rows(&self) -> Result<Vec<RawPlanetRow>, CatalogError> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.read_rows())
            .await
            .map_err(|e| CatalogError::Ingest(format!("csv reader task failed: {e}")))?
    }

    fn describe(&self) -> String {
        format!("csv:{}", self.path.display())
    }
}

/// First candidate path that exists on disk.
pub fn locate_dataset<P: AsRef<Path>>(candidates: &[P]) -> Result<PathBuf, CatalogError> {
    candidates
        .iter()
        .map(|p| p.as_ref())
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            let tried: Vec<String> = candidates
                .iter()
                .map(|p| p.as_ref().display().to_string())
                .collect();
            CatalogError::NotFound(tried.join(", "))
        })
}

fn rows_from_batch(batch: &RecordBatch) -> Result<Vec<RawPlanetRow>, CatalogError> {
    let n = batch.num_rows();
    let name = text_column(batch, columns::NAME, n)?;
    let host = text_column(batch, columns::HOST_STAR, n)?;
    let radius = float_column(batch, columns::RADIUS, n)?;
    let mass = float_column(batch, columns::MASS, n)?;
    let g = float_column(batch, columns::GRAVITY_FRACTION, n)?;
    let index = float_column(batch, columns::INTENSITY_INDEX, n)?;
    let orbper = float_column(batch, columns::ORBITAL_PERIOD, n)?;
    let orbsmax = float_column(batch, columns::SEMI_MAJOR_AXIS, n)?;
    let eqt = float_column(batch, columns::EQUILIBRIUM_TEMP, n)?;
    let teff = float_column(batch, columns::STELLAR_TEFF, n)?;
    let dist = float_column(batch, columns::DISTANCE, n)?;
    let default_flag = float_column(batch, columns::DEFAULT_FLAG, n)?;

    Ok((0..n)
        .map(|i| RawPlanetRow {
            name: name[i].clone(),
            host_star: host[i].clone(),
            radius_earth: radius[i],
            mass_earth: mass[i],
            gravity_fraction: g[i],
            intensity_index: index[i],
            orbital_period_days: orbper[i],
            semi_major_axis_au: orbsmax[i],
            equilibrium_temp_k: eqt[i],
            stellar_teff_k: teff[i],
            distance_pc: dist[i],
            default_flag: default_flag[i],
        })
        .collect())
}

/// Absent columns yield `n` nulls.
fn float_column(batch: &RecordBatch, name: &str, n: usize) -> Result<Vec<Option<f64>>, CatalogError> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(vec![None; n]);
    };
    let cast_col = cast(col.as_ref(), &DataType::Float64)?;
    Ok(cast_col.as_primitive::<Float64Type>().iter().collect())
}

fn text_column(batch: &RecordBatch, name: &str, n: usize) -> Result<Vec<Option<String>>, CatalogError> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(vec![None; n]);
    };
    let cast_col = cast(col.as_ref(), &DataType::Utf8)?;
    let strings = cast_col.as_string::<i32>();
    Ok((0..strings.len())
        .map(|i| strings.is_valid(i).then(|| strings.value(i).to_string()))
        .collect())
}
