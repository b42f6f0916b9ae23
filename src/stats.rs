use crate::collection::AreaCollection;
use serde::{Deserialize, Serialize};

/// Grouping key used in summaries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupKey {
    pub authority_code: String,
    pub codename: String,
}

/// Summary statistics for one measure of one area.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub key: GroupKey,
    pub count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    /// Latest minus earliest year, 0 with fewer than two years.
    pub difference: f64,
    pub difference_pct: f64,
}

/// Compute statistics for every (authority code, measure codename) in key order.
pub fn grouped_summary(areas: &AreaCollection) -> Vec<Summary> {
    let mut out = Vec::new();
    for (code, area) in areas.iter() {
        for (codename, measure) in area.measures() {
            let mut vals: Vec<f64> = measure.series().values().copied().collect();
            vals.sort_by(f64::total_cmp);
            let count = vals.len();
            let min = vals.first().copied();
            let max = vals.last().copied();
            let mean = (count > 0).then(|| measure.average());
            let median = if count == 0 {
                None
            } else if count % 2 == 1 {
                Some(vals[count / 2])
            } else {
                Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
            };
            out.push(Summary {
                key: GroupKey {
                    authority_code: code.to_owned(),
                    codename: codename.clone(),
                },
                count,
                min,
                max,
                mean,
                median,
                difference: measure.difference(),
                difference_pct: measure.difference_as_percentage(),
            });
        }
    }
    out
}
