use serde::{
    Deserialize,
    Serialize
};

use crate::data::aggregator::Aggregator;
use crate::data::observation::RawRecord;
use crate::forecast::forecasterror::ForecastError;

/// 單一類別最新年度的登記數及其佔比（%）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    category: String,
    year: i32,
    count: u64,
    percent: f64
}

impl CategoryShare {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

/// 各類別以自身最後一個歷史年度計算，不含全類別標籤
pub fn latest_distribution(records: &[RawRecord],
                           all_categories_label: &str) -> Result<Vec<CategoryShare>, ForecastError> {
    let aggregator = Aggregator::new(records);

    let mut latest: Vec<(String, i32, u64)> = Vec::new();
    for category in aggregator.categories() {
        if category == all_categories_label {
            continue;
        }
        let observations = aggregator.single_category(&category)?;
        if let Some(last) = observations.last() {
            latest.push((category, last.year(), last.count()));
        }
    }

    // 佔比只需浮點總和，不以 u64 累加
    let total: f64 = latest.iter().map(|&(_, _, count)| count as f64).sum();
    Ok(latest
        .into_iter()
        .map(|(category, year, count)| {
            let percent = if total == 0.0 {
                0.0
            } else {
                count as f64 / total * 100.0
            };
            CategoryShare { category, year, count, percent }
        })
        .collect())
}
