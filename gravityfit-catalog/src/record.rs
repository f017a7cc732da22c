use serde::{Deserialize, Serialize};

/// A dataset row exactly as the source supplied it.
///
/// Field names on the wire follow the NASA Exoplanet Archive column names so
/// a row can be deserialized straight from an export. Nothing here is
/// validated; see [`PlanetRecord::from_raw`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPlanetRow {
    #[serde(rename = "pl_name", default)]
    pub name: Option<String>,
    #[serde(rename = "hostname", default)]
    pub host_star: Option<String>,
    #[serde(rename = "pl_rade", default)]
    pub radius_earth: Option<f64>,
    #[serde(rename = "pl_bmasse", default)]
    pub mass_earth: Option<f64>,
    #[serde(rename = "g_fraction", default)]
    pub gravity_fraction: Option<f64>,
    #[serde(default)]
    pub intensity_index: Option<f64>,
    #[serde(rename = "pl_orbper", default)]
    pub orbital_period_days: Option<f64>,
    #[serde(rename = "pl_orbsmax", default)]
    pub semi_major_axis_au: Option<f64>,
    #[serde(rename = "pl_eqt", default)]
    pub equilibrium_temp_k: Option<f64>,
    #[serde(rename = "st_teff", default)]
    pub stellar_teff_k: Option<f64>,
    #[serde(rename = "sy_dist", default)]
    pub distance_pc: Option<f64>,
    #[serde(default)]
    pub default_flag: Option<f64>,
}

/// One validated planet. Immutable once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetRecord {
    name: String,
    host_star: String,
    radius_earth: f64,
    mass_earth: f64,
    gravity_fraction: f64,
    intensity_index: u8,
    orbital_period_days: Option<f64>,
    semi_major_axis_au: Option<f64>,
    equilibrium_temp_k: Option<f64>,
    stellar_teff_k: Option<f64>,
    distance_pc: Option<f64>,
    is_default: bool,
    #[serde(skip)]
    name_key: String,
    #[serde(skip)]
    host_key: String,
}

impl PlanetRecord {
    /// Clean a raw row into a record, or `None` if it breaks the dataset
    /// invariant (positive radius, mass and gravity fraction; index 1..=10).
    ///
    /// NaN and blank cells become `None` here, once, so queries never see them.
    /// Text cells are otherwise kept exactly as supplied.
    pub(crate) fn from_raw(raw: RawPlanetRow) -> Option<Self> {
        let name = text(raw.name)?;
        let host_star = text(raw.host_star)?;
        let radius_earth = finite(raw.radius_earth).filter(|r| *r > 0.0)?;
        let mass_earth = finite(raw.mass_earth).filter(|m| *m > 0.0)?;
        let gravity_fraction = finite(raw.gravity_fraction).filter(|g| *g > 0.0)?;
        let intensity_index = finite(raw.intensity_index)
            .filter(|i| i.fract() == 0.0 && (1.0..=10.0).contains(i))? as u8;

        Some(Self {
            name_key: name.to_lowercase(),
            host_key: host_star.to_lowercase(),
            name,
            host_star,
            radius_earth,
            mass_earth,
            gravity_fraction,
            intensity_index,
            orbital_period_days: finite(raw.orbital_period_days),
            semi_major_axis_au: finite(raw.semi_major_axis_au),
            equilibrium_temp_k: finite(raw.equilibrium_temp_k),
            stellar_teff_k: finite(raw.stellar_teff_k),
            distance_pc: finite(raw.distance_pc),
            is_default: finite(raw.default_flag) == Some(1.0),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn host_star(&self) -> &str {
        &self.host_star
    }

    pub fn radius_earth(&self) -> f64 {
        self.radius_earth
    }

    pub fn mass_earth(&self) -> f64 {
        self.mass_earth
    }

    pub fn gravity_fraction(&self) -> f64 {
        self.gravity_fraction
    }

    pub fn intensity_index(&self) -> u8 {
        self.intensity_index
    }

    pub fn orbital_period_days(&self) -> Option<f64> {
        self.orbital_period_days
    }

    pub fn semi_major_axis_au(&self) -> Option<f64> {
        self.semi_major_axis_au
    }

    pub fn equilibrium_temp_k(&self) -> Option<f64> {
        self.equilibrium_temp_k
    }

    pub fn stellar_teff_k(&self) -> Option<f64> {
        self.stellar_teff_k
    }

    pub fn distance_pc(&self) -> Option<f64> {
        self.distance_pc
    }

    /// Whether the source marked this row as the canonical entry for its planet.
    pub fn is_default(&self) -> bool {
        self.is_default
    }

    /// `needle` must already be lowercase.
    pub(crate) fn name_contains(&self, needle: &str) -> bool {
        self.name_key.contains(needle)
    }

    pub(crate) fn name_or_host_contains(&self, needle: &str) -> bool {
        self.name_key.contains(needle) || self.host_key.contains(needle)
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

fn text(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, host: &str) -> RawPlanetRow {
        RawPlanetRow {
            name: Some(name.into()),
            host_star: Some(host.into()),
            radius_earth: Some(1.2),
            mass_earth: Some(0.9),
            gravity_fraction: Some(0.625),
            intensity_index: Some(4.0),
            ..Default::default()
        }
    }

    #[test]
    fn valid_row_is_kept() {
        let rec = PlanetRecord::from_raw(raw("Kepler-22 b", "Kepler-22")).unwrap();
        assert_eq!(rec.name(), "Kepler-22 b");
        assert_eq!(rec.intensity_index(), 4);
        assert!(!rec.is_default());
        assert_eq!(rec.distance_pc(), None);
    }

    #[test]
    fn nan_optional_becomes_none() {
        let mut r = raw("TOI-700 d", "TOI-700");
        r.equilibrium_temp_k = Some(f64::NAN);
        let rec = PlanetRecord::from_raw(r).unwrap();
        assert_eq!(rec.equilibrium_temp_k(), None);
    }

    #[test]
    fn invariant_violations_are_dropped() {
        let cases: [fn(&mut RawPlanetRow); 9] = [
            |r| r.radius_earth = None,
            |r| r.radius_earth = Some(0.0),
            |r| r.mass_earth = Some(f64::NAN),
            |r| r.gravity_fraction = Some(0.0),
            |r| r.intensity_index = Some(0.0),
            |r| r.intensity_index = Some(11.0),
            |r| r.intensity_index = Some(4.5),
            |r| r.name = Some("   ".into()),
            |r| r.host_star = None,
        ];
        for mutate in cases {
            let mut r = raw("X", "Y");
            mutate(&mut r);
            assert!(PlanetRecord::from_raw(r).is_none());
        }
    }

    #[test]
    fn text_cells_are_not_trimmed() {
        let rec = PlanetRecord::from_raw(raw(" HD 209458 b", "HD 209458 ")).unwrap();
        assert_eq!(rec.name(), " HD 209458 b");
        assert_eq!(rec.host_star(), "HD 209458 ");
    }

    #[test]
    fn raw_row_reads_archive_column_names() {
        let row: RawPlanetRow = serde_json::from_str(
            r#"{"pl_name":"Kepler-22 b","hostname":"Kepler-22","pl_rade":2.1,
                "pl_bmasse":9.1,"g_fraction":1.0,"intensity_index":1,
                "pl_eqt":null,"default_flag":1}"#,
        )
        .unwrap();
        assert_eq!(row.name.as_deref(), Some("Kepler-22 b"));
        assert_eq!(row.radius_earth, Some(2.1));
        assert_eq!(row.distance_pc, None);

        let rec = PlanetRecord::from_raw(row).unwrap();
        assert_eq!(rec.host_star(), "Kepler-22");
        assert_eq!(rec.intensity_index(), 1);
        assert!(rec.is_default());
        assert_eq!(rec.equilibrium_temp_k(), None);
    }

    #[test]
    fn default_flag_must_be_one() {
        let mut r = raw("X", "Y");
        r.default_flag = Some(1.0);
        assert!(PlanetRecord::from_raw(r.clone()).unwrap().is_default());
        r.default_flag = Some(0.0);
        assert!(!PlanetRecord::from_raw(r).unwrap().is_default());
    }
}
