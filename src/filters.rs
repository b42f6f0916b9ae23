//! Inclusion predicates shared by every format reader.
//!
//! Filters are explicit values instead of optional pointers: `Unfiltered`/`All`
//! admit everything, the other variants restrict.

use crate::error::{Error, Result};
use regex::Regex;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})$").expect("valid year regex"));
static YEAR_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("valid year range regex"));

/// A set of case-insensitive terms, or no restriction at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StringFilter {
    #[default]
    Unfiltered,
    /// Terms are stored lowercase. An empty set admits everything.
    Only(BTreeSet<String>),
}

impl StringFilter {
    pub fn only<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        StringFilter::Only(
            terms
                .into_iter()
                .map(|t| t.as_ref().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        )
    }

    /// Build from command-line values. No values, or any value equal to `all`
    /// (any case), means unfiltered.
    pub fn from_args<S: AsRef<str>>(values: &[S]) -> Self {
        if values.is_empty()
            || values
                .iter()
                .any(|v| v.as_ref().trim().eq_ignore_ascii_case("all"))
        {
            return StringFilter::Unfiltered;
        }
        StringFilter::only(values)
    }

    pub fn is_unfiltered(&self) -> bool {
        match self {
            StringFilter::Unfiltered => true,
            StringFilter::Only(terms) => terms.is_empty(),
        }
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        let terms = match self {
            StringFilter::Unfiltered => None,
            StringFilter::Only(terms) => Some(terms.iter().map(String::as_str)),
        };
        terms.into_iter().flatten()
    }
}

/// Closed, inclusive range of years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum YearFilter {
    #[default]
    All,
    Range { start: i32, end: i32 },
}

impl YearFilter {
    /// `(0, 0)` is the "every year" sentinel.
    pub fn from_bounds(start: i32, end: i32) -> Self {
        if start == 0 && end == 0 {
            YearFilter::All
        } else {
            YearFilter::Range { start, end }
        }
    }

    /// Parse `YYYY`, `YYYY-ZZZZ`, `0` or `0-0`.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if s == "0" || s == "0-0" {
            return Ok(YearFilter::All);
        }
        let invalid = || Error::InvalidFormat(format!("invalid input for years argument: '{s}'"));
        if let Some(c) = YEAR.captures(s) {
            let year = c[1].parse::<i32>().map_err(|_| invalid())?;
            return Ok(YearFilter::from_bounds(year, year));
        }
        if let Some(c) = YEAR_RANGE.captures(s) {
            let start = c[1].parse::<i32>().map_err(|_| invalid())?;
            let end = c[2].parse::<i32>().map_err(|_| invalid())?;
            if start > end {
                return Err(Error::InvalidFormat(format!(
                    "year range starts after it ends: '{s}'"
                )));
            }
            return Ok(YearFilter::from_bounds(start, end));
        }
        Err(invalid())
    }

    pub fn contains(&self, year: i32) -> bool {
        match *self {
            YearFilter::All => true,
            YearFilter::Range { start, end } => (start..=end).contains(&year),
        }
    }
}

impl fmt::Display for YearFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            YearFilter::All => write!(f, "all"),
            YearFilter::Range { start, end } if start == end => write!(f, "{start}"),
            YearFilter::Range { start, end } => write!(f, "{start}-{end}"),
        }
    }
}

/// The three filters handed to every reader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub areas: StringFilter,
    pub measures: StringFilter,
    pub years: YearFilter,
}

impl Filters {
    /// Only the area filter; used for the lookup file.
    pub fn areas_only(&self) -> Filters {
        Filters {
            areas: self.areas.clone(),
            ..Filters::default()
        }
    }
}

/// True if any of `fields` contains any filter term as a case-insensitive substring.
pub fn area_included(filter: &StringFilter, fields: &[&str]) -> bool {
    if filter.is_unfiltered() {
        return true;
    }
    let fields: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
    filter
        .terms()
        .any(|term| fields.iter().any(|f| f.contains(term)))
}

/// True if `codename` equals one of the filter terms, ignoring case.
pub fn measure_included(filter: &StringFilter, codename: &str) -> bool {
    if filter.is_unfiltered() {
        return true;
    }
    let codename = codename.to_lowercase();
    filter.terms().any(|term| term == codename)
}

pub fn year_included(filter: &YearFilter, year: i32) -> bool {
    filter.contains(year)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_keyword_disables_filter() {
        assert_eq!(StringFilter::from_args(&["W06", "ALL"]), StringFilter::Unfiltered);
        assert_eq!(StringFilter::from_args::<&str>(&[]), StringFilter::Unfiltered);
        assert!(!StringFilter::from_args(&["W06"]).is_unfiltered());
    }

    #[test]
    fn area_match_is_substring_and_case_insensitive() {
        let f = StringFilter::only(["swan"]);
        assert!(area_included(&f, &["W06000011", "Swansea", "Abertawe"]));
        assert!(!area_included(&f, &["W06000023", "Powys", "Powys"]));
        assert!(area_included(&StringFilter::Only(BTreeSet::new()), &["anything"]));
    }

    #[test]
    fn measure_match_is_exact() {
        let f = StringFilter::only(["POP"]);
        assert!(measure_included(&f, "pop"));
        assert!(measure_included(&f, "Pop"));
        assert!(!measure_included(&f, "popden"));
    }

    #[test]
    fn year_parsing() {
        assert_eq!(YearFilter::parse("0").unwrap(), YearFilter::All);
        assert_eq!(YearFilter::parse("0-0").unwrap(), YearFilter::All);
        assert_eq!(
            YearFilter::parse("2001").unwrap(),
            YearFilter::Range { start: 2001, end: 2001 }
        );
        assert_eq!(
            YearFilter::parse("1999-2010").unwrap(),
            YearFilter::Range { start: 1999, end: 2010 }
        );
        for bad in ["99", "2010-1999", "abcd", "2000-", "2000:2001"] {
            assert!(matches!(YearFilter::parse(bad), Err(Error::InvalidFormat(_))), "{bad}");
        }
    }

    #[test]
    fn year_bounds() {
        let all = YearFilter::from_bounds(0, 0);
        assert!(year_included(&all, 1066));
        let only = YearFilter::from_bounds(2001, 2001);
        assert!(year_included(&only, 2001));
        assert!(!year_included(&only, 2000));
        assert!(!year_included(&only, 2002));
        assert_eq!(only.to_string(), "2001");
    }
}
