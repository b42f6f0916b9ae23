//! Dataset registry and the multi-source loader.
//!
//! The built-in registry describes the StatsWales files the tool was written for.
//! A TOML file of the same shape can replace it:
//!
//! ```toml
//! [areas]
//! name = "Areas"
//! code = "areas"
//! file = "areas.csv"
//! format = "lookup_csv"
//! columns = { auth_code = "Local Authority Code", auth_name_eng = "Name (eng)", auth_name_cym = "Name (cym)" }
//!
//! [[datasets]]
//! name = "Population"
//! code = "complete-pop"
//! file = "complete-popu1009-pop.csv"
//! format = "wide_year_csv"
//! columns = { auth_code = "AuthorityCode", single_measure_code = "pop", single_measure_name = "Population", expected_columns = 12 }
//! ```

use crate::collection::AreaCollection;
use crate::columns::{ColumnMapping, SourceColumn, SourceFormat};
use crate::error::{Error, Result};
use crate::filters::Filters;
use crate::ingest::{self, IngestReport};
use anyhow::Context;
use log::error;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One input file: display name, selection code, file name, format, and column mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSource {
    pub name: String,
    pub code: String,
    pub file: String,
    pub format: SourceFormat,
    pub columns: ColumnMapping,
}

impl DatasetSource {
    /// Open `dir/file` and ingest it into `areas`.
    pub fn load_into(
        &self,
        areas: &mut AreaCollection,
        dir: &Path,
        filters: &Filters,
    ) -> Result<IngestReport> {
        let reader = ingest::open_file(dir.join(&self.file))?;
        areas.ingest_named(&self.file, reader, self.format, &self.columns, filters)
    }
}

/// Result of loading one source as part of a batch.
#[derive(Debug)]
pub struct SourceOutcome {
    pub code: String,
    pub file: String,
    pub result: Result<IngestReport>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Lookup file of authority codes and names, loaded before any dataset.
    pub areas: DatasetSource,
    #[serde(default)]
    pub datasets: Vec<DatasetSource>,
}

impl Default for Registry {
    fn default() -> Self {
        Self {
            areas: areas_source(),
            datasets: builtin_datasets(),
        }
    }
}

impl Registry {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read registry file: {}", path.display()))?;
        let registry: Registry = toml::from_str(&content)
            .with_context(|| format!("failed to parse registry file: {}", path.display()))?;
        Ok(registry)
    }

    /// Resolve dataset codes in request order. No codes, or `all`, selects everything.
    pub fn select<S: AsRef<str>>(&self, codes: &[S]) -> Result<Vec<&DatasetSource>> {
        if codes.is_empty() || codes.iter().any(|c| c.as_ref().eq_ignore_ascii_case("all")) {
            return Ok(self.datasets.iter().collect());
        }
        codes
            .iter()
            .map(|c| {
                let c = c.as_ref().trim();
                self.datasets
                    .iter()
                    .find(|d| d.code.eq_ignore_ascii_case(c))
                    .ok_or_else(|| Error::NotFound(format!("no dataset matches key: {c}")))
            })
            .collect()
    }
}

/// Load `sources` into `areas` in the given order.
///
/// A failing source is logged and recorded in its outcome; the remaining sources
/// are still loaded and nothing already merged is rolled back.
pub fn load_all(
    areas: &mut AreaCollection,
    dir: &Path,
    sources: &[&DatasetSource],
    filters: &Filters,
) -> Vec<SourceOutcome> {
    sources
        .iter()
        .map(|source| {
            let result = source.load_into(areas, dir, filters);
            if let Err(e) = &result {
                error!("error importing dataset {}: {e}", source.file);
            }
            SourceOutcome {
                code: source.code.clone(),
                file: source.file.clone(),
                result,
            }
        })
        .collect()
}

fn json_source(
    name: &str,
    code: &str,
    file: &str,
    fields: [(SourceColumn, &str); 6],
) -> DatasetSource {
    DatasetSource {
        name: name.into(),
        code: code.into(),
        file: file.into(),
        format: SourceFormat::NestedJson,
        columns: fields
            .into_iter()
            .fold(ColumnMapping::new(), |cols, (role, field)| cols.with(role, field)),
    }
}

fn wide_source(name: &str, code: &str, file: &str, codename: &str) -> DatasetSource {
    DatasetSource {
        name: name.into(),
        code: code.into(),
        file: file.into(),
        format: SourceFormat::WideYearCsv,
        columns: ColumnMapping::new()
            .with(SourceColumn::AuthCode, "AuthorityCode")
            .with(SourceColumn::SingleMeasureCode, codename)
            .with(SourceColumn::SingleMeasureName, name)
            .with_expected_columns(12),
    }
}

pub fn areas_source() -> DatasetSource {
    DatasetSource {
        name: "Areas".into(),
        code: "areas".into(),
        file: "areas.csv".into(),
        format: SourceFormat::LookupCsv,
        columns: ColumnMapping::new()
            .with(SourceColumn::AuthCode, "Local Authority Code")
            .with(SourceColumn::AuthNameEng, "Name (eng)")
            .with(SourceColumn::AuthNameCym, "Name (cym)"),
    }
}

pub fn builtin_datasets() -> Vec<DatasetSource> {
    use SourceColumn::*;
    let trains = json_source(
        "Rail passenger journeys",
        "trains",
        "tran0152.json",
        [
            (AuthCode, "LocalAuthority_Code"),
            (AuthNameEng, "LocalAuthority_ItemName_ENG"),
            (Year, "Year_Code"),
            (Value, "Data"),
            (SingleMeasureCode, "rail"),
            (SingleMeasureName, "Rail passenger journeys"),
        ],
    );

    vec![
        json_source(
            "Population density",
            "popden",
            "popu1009.json",
            [
                (AuthCode, "Localauthority_Code"),
                (AuthNameEng, "Localauthority_ItemName_ENG"),
                (MeasureCode, "Measure_Code"),
                (MeasureName, "Measure_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        json_source(
            "Active Businesses",
            "biz",
            "econ0080.json",
            [
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Variable_Code"),
                (MeasureName, "Variable_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        json_source(
            "Air Quality Indicators",
            "aqi",
            "envi0201.json",
            [
                (AuthCode, "Area_Code"),
                (AuthNameEng, "Area_ItemName_ENG"),
                (MeasureCode, "Pollutant_ItemName_ENG"),
                (MeasureName, "Pollutant_ItemName_ENG"),
                (Year, "Year_Code"),
                (Value, "Data"),
            ],
        ),
        trains,
        wide_source(
            "Population density",
            "complete-popden",
            "complete-popu1009-popden.csv",
            "dens",
        ),
        wide_source("Population", "complete-pop", "complete-popu1009-pop.csv", "pop"),
        wide_source("Land area", "complete-area", "complete-popu1009-area.csv", "area"),
    ]
}
