use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// ISO 639-3 style language code, checked after lowercasing.
static LANG_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[a-z]{3}$").expect("valid language code regex"));

/// A single named metric with one value per year.
///
/// The codename is always stored lowercase. Years are kept in ascending order, so
/// "first" and "last" in the derived statistics refer to the earliest and latest
/// year, regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Measure {
    codename: String,
    label: String,
    series: BTreeMap<i32, f64>,
}

impl Measure {
    pub fn new(codename: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            codename: codename.into().to_ascii_lowercase(),
            label: label.into(),
            series: BTreeMap::new(),
        }
    }

    pub fn codename(&self) -> &str {
        &self.codename
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Insert or replace the value for `year`.
    pub fn set_value(&mut self, year: i32, value: f64) {
        self.series.insert(year, value);
    }

    pub fn value(&self, year: i32) -> Result<f64> {
        self.series
            .get(&year)
            .copied()
            .ok_or_else(|| Error::NotFound(format!("no value found for year {year}")))
    }

    /// Year → value pairs in chronological order.
    pub fn series(&self) -> &BTreeMap<i32, f64> {
        &self.series
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    fn first_and_last(&self) -> Option<(f64, f64)> {
        if self.series.len() < 2 {
            return None;
        }
        let first = self.series.values().next().copied()?;
        let last = self.series.values().next_back().copied()?;
        Some((first, last))
    }

    /// Latest-year value minus earliest-year value, or 0 with fewer than two points.
    pub fn difference(&self) -> f64 {
        self.first_and_last()
            .map(|(first, last)| last - first)
            .unwrap_or(0.0)
    }

    /// [`Measure::difference`] relative to the latest-year value, as a percentage.
    ///
    /// Returns 0 with fewer than two points, and also when the latest value is 0.
    pub fn difference_as_percentage(&self) -> f64 {
        match self.first_and_last() {
            Some((_, last)) if last == 0.0 => 0.0,
            Some((first, last)) => (last - first) / last * 100.0,
            None => 0.0,
        }
    }

    /// Arithmetic mean of all values, or 0 for an empty series.
    pub fn average(&self) -> f64 {
        if self.series.is_empty() {
            return 0.0;
        }
        self.series.values().sum::<f64>() / self.series.len() as f64
    }

    /// Right-biased union: takes `other`'s label and upserts every year of `other`.
    /// Years only present in `self` are kept.
    pub fn overwrite_from(&mut self, other: Measure) {
        self.label = other.label;
        self.series.extend(other.series);
    }
}

/// An administrative area: authority code, localized names, and measures keyed by codename.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Area {
    authority_code: String,
    names: BTreeMap<String, String>,
    measures: BTreeMap<String, Measure>,
}

impl Area {
    pub fn new(authority_code: impl Into<String>) -> Self {
        Self {
            authority_code: authority_code.into(),
            names: BTreeMap::new(),
            measures: BTreeMap::new(),
        }
    }

    pub fn authority_code(&self) -> &str {
        &self.authority_code
    }

    /// Set the display name for a three-letter language code (e.g. `eng`, `cym`).
    ///
    /// The code is lowercased before validation; anything other than exactly three
    /// ASCII letters fails with [`Error::InvalidFormat`] and leaves the area unchanged.
    pub fn set_name(&mut self, lang: &str, name: impl Into<String>) -> Result<()> {
        let lang = lang.to_ascii_lowercase();
        if !LANG_CODE.is_match(&lang) {
            return Err(Error::InvalidFormat(format!(
                "language code must be three alphabetical letters, got '{lang}'"
            )));
        }
        self.names.insert(lang, name.into());
        Ok(())
    }

    pub fn name(&self, lang: &str) -> Result<&str> {
        self.names
            .get(&lang.to_ascii_lowercase())
            .map(String::as_str)
            .ok_or_else(|| Error::NotFound(format!("no name in language {lang}")))
    }

    pub fn names(&self) -> &BTreeMap<String, String> {
        &self.names
    }

    /// Add a measure under `codename` (lowercased). An existing measure with the same
    /// codename absorbs the new one via [`Measure::overwrite_from`].
    pub fn set_measure(&mut self, codename: &str, measure: Measure) {
        let key = codename.to_ascii_lowercase();
        match self.measures.get_mut(&key) {
            Some(existing) => existing.overwrite_from(measure),
            None => {
                self.measures.insert(key, measure);
            }
        }
    }

    pub fn measure(&self, codename: &str) -> Result<&Measure> {
        self.measures
            .get(&codename.to_ascii_lowercase())
            .ok_or_else(|| Error::NotFound(format!("no measure found matching {codename}")))
    }

    /// Measures in codename order.
    pub fn measures(&self) -> &BTreeMap<String, Measure> {
        &self.measures
    }

    /// Number of measures held by this area.
    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// Union names (incoming wins on collision), then union measures through
    /// [`Area::set_measure`] so per-measure merging applies.
    pub fn overwrite_from(&mut self, other: Area) {
        self.names.extend(other.names);
        for (codename, measure) in other.measures {
            self.set_measure(&codename, measure);
        }
    }
}
