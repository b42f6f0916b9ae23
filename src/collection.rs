use crate::columns::{ColumnMapping, SourceFormat};
use crate::error::{Error, Result};
use crate::export::{self, ExportDocument};
use crate::filters::Filters;
use crate::ingest::{self, IngestReport};
use crate::models::Area;
use crate::table::{self, TableOptions};
use std::collections::BTreeMap;
use std::io::Read;

/// Top-level store of areas keyed by authority code.
///
/// Iteration is ordered by authority code. Inserting an area whose code is already
/// present merges it into the existing one (see [`Area::overwrite_from`]); the
/// collection never shrinks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AreaCollection {
    areas: BTreeMap<String, Area>,
}

impl AreaCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `area` under `authority_code`, or merge it into the area already there.
    /// Repeating the same upsert leaves the collection unchanged.
    pub fn upsert(&mut self, authority_code: impl Into<String>, area: Area) {
        let key = authority_code.into();
        match self.areas.get_mut(&key) {
            Some(existing) => existing.overwrite_from(area),
            None => {
                self.areas.insert(key, area);
            }
        }
    }

    pub fn get(&self, authority_code: &str) -> Result<&Area> {
        self.areas
            .get(authority_code)
            .ok_or_else(|| Error::NotFound(format!("no area found matching {authority_code}")))
    }

    pub fn contains(&self, authority_code: &str) -> bool {
        self.areas.contains_key(authority_code)
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    /// Areas in authority-code order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Area)> {
        self.areas.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Upsert every area of `other`, in key order.
    pub fn absorb(&mut self, other: AreaCollection) {
        for (code, area) in other.areas {
            self.upsert(code, area);
        }
    }

    /// Read one source stream in `format` and merge its records into this collection.
    ///
    /// On error nothing from this stream is merged; areas from earlier calls stay as
    /// they were. Recoverable per-row problems are returned in the report.
    pub fn ingest<R: Read>(
        &mut self,
        reader: R,
        format: SourceFormat,
        columns: &ColumnMapping,
        filters: &Filters,
    ) -> Result<IngestReport> {
        self.ingest_named("<stream>", reader, format, columns, filters)
    }

    /// [`AreaCollection::ingest`] with a source name for reports and log lines.
    pub fn ingest_named<R: Read>(
        &mut self,
        source_name: &str,
        reader: R,
        format: SourceFormat,
        columns: &ColumnMapping,
        filters: &Filters,
    ) -> Result<IngestReport> {
        ingest::ingest_into(self, source_name, reader, format, columns, filters)
    }

    /// Structured export tree (see [`crate::export`]).
    pub fn export(&self) -> ExportDocument {
        export::export(self)
    }

    /// Compact JSON rendering of [`AreaCollection::export`].
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.export())?)
    }

    /// Fixed-width text report with English/Welsh names.
    pub fn render(&self) -> String {
        table::render(self, &TableOptions::default())
    }

    pub fn render_with(&self, options: &TableOptions) -> String {
        table::render(self, options)
    }
}

impl<'a> IntoIterator for &'a AreaCollection {
    type Item = (&'a String, &'a Area);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Area>;

    fn into_iter(self) -> Self::IntoIter {
        self.areas.iter()
    }
}
