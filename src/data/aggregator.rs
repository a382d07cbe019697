use std::collections::{
    BTreeMap,
    HashSet
};

use crate::data::observation::{
    Observation,
    RawRecord
};
use crate::forecast::forecasterror::{
    DegenerateInput,
    ForecastError
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AggregationMode {
    Category(String),
    AllCategories
}

impl AggregationMode {
    /// 類別名稱等於 all_categories_label 時改為全類別加總
    pub fn resolve(category: &str, all_categories_label: &str) -> AggregationMode {
        if category == all_categories_label {
            AggregationMode::AllCategories
        } else {
            AggregationMode::Category(category.to_owned())
        }
    }
}

pub struct Aggregator<'a> {
    records: &'a [RawRecord]
}

impl<'a> Aggregator<'a> {
    pub fn new(records: &'a [RawRecord]) -> Aggregator<'a> {
        Aggregator { records }
    }

    /// 依首次出現順序列出不重複的類別
    pub fn categories(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .filter(|record| seen.insert(record.category()))
            .map(|record| record.category().to_owned())
            .collect()
    }

    pub fn aggregate(&self, mode: &AggregationMode) -> Result<Vec<Observation>, ForecastError> {
        match mode {
            AggregationMode::Category(category) => self.single_category(category),
            AggregationMode::AllCategories => self.all_categories(),
        }
    }

    pub fn single_category(&self, category: &str) -> Result<Vec<Observation>, ForecastError> {
        let mut matched = self.records
            .iter()
            .filter(|record| record.category() == category)
            .peekable();
        if matched.peek().is_none() {
            return Err(ForecastError::category_not_found(category));
        }
        sum_by_year(matched)
    }

    pub fn all_categories(&self) -> Result<Vec<Observation>, ForecastError> {
        sum_by_year(self.records.iter())
    }
}

// 同年度的數量直接加總；BTreeMap 保證輸出依年度遞增
fn sum_by_year<'r, I>(records: I) -> Result<Vec<Observation>, ForecastError>
    where I: Iterator<Item = &'r RawRecord> {
    let mut totals: BTreeMap<i32, u64> = BTreeMap::new();
    for record in records {
        let total = totals.entry(record.year()).or_insert(0);
        *total = total
            .checked_add(record.count())
            .ok_or(ForecastError::degenerate(DegenerateInput::CountOverflow { year: record.year() }))?;
    }
    Ok(totals
        .into_iter()
        .map(|(year, count)| Observation::new(year, count))
        .collect())
}
