use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::record::{PlanetRecord, RawPlanetRow};
use crate::CatalogError;

/// Read-only, in-memory planet table. Built once by [`DatasetTable::load`]
/// and shared by reference afterwards.
#[derive(Clone, Debug, Default)]
pub struct DatasetTable {
    records: Vec<PlanetRecord>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Range {
    fn over(values: impl Iterator<Item = f64>) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values {
            count += 1;
            sum += v;
            min = min.min(v);
            max = max.max(v);
        }
        (count > 0).then(|| Self {
            min,
            max,
            mean: sum / count as f64,
        })
    }
}

/// Dataset summary, computed on demand.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_planets: usize,
    pub gravity_fraction_range: Range,
    pub intensity_index_distribution: BTreeMap<u8, usize>,
    pub mass_range: Range,
    pub radius_range: Range,
}

impl DatasetTable {
    /// Keep every row that satisfies the record invariant, in input order.
    pub fn load(rows: impl IntoIterator<Item = RawPlanetRow>) -> Self {
        let mut seen = 0usize;
        let records: Vec<PlanetRecord> = rows
            .into_iter()
            .inspect(|_| seen += 1)
            .filter_map(PlanetRecord::from_raw)
            .collect();
        debug!(
            kept = records.len(),
            dropped = seen - records.len(),
            "planet table loaded"
        );
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[PlanetRecord] {
        &self.records
    }

    /// Case-insensitive substring lookup on the planet name. A default-flagged
    /// match wins over earlier non-default ones.
    pub fn find_by_name(&self, query: &str) -> Option<&PlanetRecord> {
        let needle = query.to_lowercase();
        let mut matches = self.records.iter().filter(|r| r.name_contains(&needle));
        let first = matches.next()?;
        if first.is_default() {
            return Some(first);
        }
        matches.find(|r| r.is_default()).or(Some(first))
    }

    /// Name or host-star search. A blank query draws a random sample from
    /// `rng` instead; otherwise the query is matched as given, padding
    /// included, and default-flagged rows are listed first, each group
    /// keeping table order.
    pub fn search<R: Rng + ?Sized>(
        &self,
        query: &str,
        limit: usize,
        rng: &mut R,
    ) -> Vec<&PlanetRecord> {
        if query.trim().is_empty() {
            let amount = limit.min(self.records.len());
            return self.records.choose_multiple(rng, amount).collect();
        }

        let needle = query.to_lowercase();
        let (defaults, others): (Vec<&PlanetRecord>, Vec<&PlanetRecord>) = self
            .records
            .iter()
            .filter(|r| r.name_or_host_contains(&needle))
            .partition(|r| r.is_default());
        defaults.into_iter().chain(others).take(limit).collect()
    }

    /// First `limit` rows in table order. Served as the "random" listing,
    /// but deterministic.
    pub fn sample(&self, limit: usize) -> &[PlanetRecord] {
        &self.records[..limit.min(self.records.len())]
    }

    pub fn statistics(&self) -> Result<Stats, CatalogError> {
        let empty = || CatalogError::EmptyDataset;
        let gravity_fraction_range =
            Range::over(self.records.iter().map(|r| r.gravity_fraction())).ok_or_else(empty)?;
        let mass_range =
            Range::over(self.records.iter().map(|r| r.mass_earth())).ok_or_else(empty)?;
        let radius_range =
            Range::over(self.records.iter().map(|r| r.radius_earth())).ok_or_else(empty)?;

        let mut intensity_index_distribution = BTreeMap::new();
        for r in &self.records {
            *intensity_index_distribution
                .entry(r.intensity_index())
                .or_insert(0) += 1;
        }

        Ok(Stats {
            total_planets: self.records.len(),
            gravity_fraction_range,
            intensity_index_distribution,
            mass_range,
            radius_range,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row(name: &str, host: &str, default: bool, index: f64) -> RawPlanetRow {
        RawPlanetRow {
            name: Some(name.into()),
            host_star: Some(host.into()),
            radius_earth: Some(2.0),
            mass_earth: Some(1.0),
            gravity_fraction: Some(0.25),
            intensity_index: Some(index),
            default_flag: Some(if default { 1.0 } else { 0.0 }),
            ..Default::default()
        }
    }

    fn table() -> DatasetTable {
        DatasetTable::load(vec![
            row("Kepler-9 c", "Kepler-9", false, 8.0),
            row("Kepler-22 b", "Kepler-22", true, 8.0),
            row("TRAPPIST-1 e", "TRAPPIST-1", true, 3.0),
        ])
    }

    #[test]
    fn find_prefers_default_flag() {
        let t = table();
        let found = t.find_by_name("Kepler").unwrap();
        assert_eq!(found.name(), "Kepler-22 b");
        assert!(found.is_default());
    }

    #[test]
    fn find_falls_back_to_first_match() {
        let t = DatasetTable::load(vec![
            row("Kepler-9 c", "Kepler-9", false, 8.0),
            row("Kepler-9 d", "Kepler-9", false, 8.0),
        ]);
        assert_eq!(t.find_by_name("kepler-9").unwrap().name(), "Kepler-9 c");
        assert!(t.find_by_name("Proxima").is_none());
    }

    #[test]
    fn blank_search_samples_up_to_table_size() {
        let t = table();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(t.search("", 10, &mut rng).len(), 3);
        assert_eq!(t.search("   ", 2, &mut rng).len(), 2);
    }

    #[test]
    fn search_orders_defaults_first() {
        let t = table();
        let mut rng = StdRng::seed_from_u64(7);
        let hits: Vec<&str> = t.search("kepler", 10, &mut rng).iter().map(|r| r.name()).collect();
        assert_eq!(hits, vec!["Kepler-22 b", "Kepler-9 c"]);

        let limited = t.search("KEPLER", 1, &mut rng);
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].name(), "Kepler-22 b");
    }

    #[test]
    fn search_keeps_query_padding() {
        let t = DatasetTable::load(vec![
            row("Kepler-22", "X", false, 8.0),
            row("Kepler-22 b", "Y", false, 8.0),
        ]);
        let mut rng = StdRng::seed_from_u64(3);
        let hits: Vec<&str> = t.search("22 ", 10, &mut rng).iter().map(|r| r.name()).collect();
        assert_eq!(hits, vec!["Kepler-22 b"]);
    }

    #[test]
    fn search_matches_host_star() {
        let t = DatasetTable::load(vec![row("e", "TRAPPIST-1", false, 3.0)]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(t.search("trappist", 5, &mut rng).len(), 1);
    }

    #[test]
    fn sample_is_a_prefix() {
        let t = table();
        let names: Vec<&str> = t.sample(2).iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["Kepler-9 c", "Kepler-22 b"]);
        assert_eq!(t.sample(500).len(), 3);
        assert!(t.sample(0).is_empty());
    }

    #[test]
    fn statistics_summarise_table() {
        let t = table();
        let stats = t.statistics().unwrap();
        assert_eq!(stats.total_planets, 3);
        assert_eq!(stats.gravity_fraction_range.mean, 0.25);
        assert_eq!(stats.mass_range.max, 1.0);
        assert_eq!(stats.intensity_index_distribution.get(&8), Some(&2));
        assert_eq!(stats.intensity_index_distribution.get(&3), Some(&1));
    }

    #[test]
    fn statistics_require_rows() {
        let t = DatasetTable::load(Vec::new());
        assert!(matches!(t.statistics(), Err(CatalogError::EmptyDataset)));
    }
}
