use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Abstract field roles a source file can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceColumn {
    AuthCode,
    AuthNameEng,
    AuthNameCym,
    MeasureCode,
    MeasureName,
    Year,
    Value,
    SingleMeasureCode,
    SingleMeasureName,
}

impl fmt::Display for SourceColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceColumn::AuthCode => "AUTH_CODE",
            SourceColumn::AuthNameEng => "AUTH_NAME_ENG",
            SourceColumn::AuthNameCym => "AUTH_NAME_CYM",
            SourceColumn::MeasureCode => "MEASURE_CODE",
            SourceColumn::MeasureName => "MEASURE_NAME",
            SourceColumn::Year => "YEAR",
            SourceColumn::Value => "VALUE",
            SourceColumn::SingleMeasureCode => "SINGLE_MEASURE_CODE",
            SourceColumn::SingleMeasureName => "SINGLE_MEASURE_NAME",
        };
        f.write_str(s)
    }
}

/// Concrete column/field names for one source, keyed by role.
///
/// For `single_measure_*` the configured string is the measure codename/label itself
/// rather than a column name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub auth_code: Option<String>,
    pub auth_name_eng: Option<String>,
    pub auth_name_cym: Option<String>,
    pub measure_code: Option<String>,
    pub measure_name: Option<String>,
    pub year: Option<String>,
    pub value: Option<String>,
    pub single_measure_code: Option<String>,
    pub single_measure_name: Option<String>,
    /// Exact number of fields per row for wide-year CSV files.
    pub expected_columns: Option<usize>,
}

impl ColumnMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    pub fn with(mut self, role: SourceColumn, name: impl Into<String>) -> Self {
        *self.slot_mut(role) = Some(name.into());
        self
    }

    pub fn with_expected_columns(mut self, n: usize) -> Self {
        self.expected_columns = Some(n);
        self
    }

    pub fn get(&self, role: SourceColumn) -> Option<&str> {
        let slot = match role {
            SourceColumn::AuthCode => &self.auth_code,
            SourceColumn::AuthNameEng => &self.auth_name_eng,
            SourceColumn::AuthNameCym => &self.auth_name_cym,
            SourceColumn::MeasureCode => &self.measure_code,
            SourceColumn::MeasureName => &self.measure_name,
            SourceColumn::Year => &self.year,
            SourceColumn::Value => &self.value,
            SourceColumn::SingleMeasureCode => &self.single_measure_code,
            SourceColumn::SingleMeasureName => &self.single_measure_name,
        };
        slot.as_deref()
    }

    pub fn contains(&self, role: SourceColumn) -> bool {
        self.get(role).is_some()
    }

    /// Like [`ColumnMapping::get`], but a missing role is a schema mismatch.
    pub fn require(&self, role: SourceColumn) -> Result<&str> {
        self.get(role)
            .ok_or_else(|| Error::schema(format!("column mapping has no entry for {role}")))
    }

    fn slot_mut(&mut self, role: SourceColumn) -> &mut Option<String> {
        match role {
            SourceColumn::AuthCode => &mut self.auth_code,
            SourceColumn::AuthNameEng => &mut self.auth_name_eng,
            SourceColumn::AuthNameCym => &mut self.auth_name_cym,
            SourceColumn::MeasureCode => &mut self.measure_code,
            SourceColumn::MeasureName => &mut self.measure_name,
            SourceColumn::Year => &mut self.year,
            SourceColumn::Value => &mut self.value,
            SourceColumn::SingleMeasureCode => &mut self.single_measure_code,
            SourceColumn::SingleMeasureName => &mut self.single_measure_name,
        }
    }
}

/// The three supported input shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFormat {
    /// `code,eng,cym` lookup table of authority codes and names.
    LookupCsv,
    /// Authority code followed by one column per year, single measure per file.
    WideYearCsv,
    /// Object with a `value` list of flat records, one observation each.
    NestedJson,
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SourceFormat::LookupCsv => "lookup_csv",
            SourceFormat::WideYearCsv => "wide_year_csv",
            SourceFormat::NestedJson => "nested_json",
        };
        f.write_str(s)
    }
}
