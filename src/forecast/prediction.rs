use serde::{
    Deserialize,
    Serialize
};

/// 單一目標年度的預測值（已四捨五入）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    year: i32,
    count: i64
}

impl Prediction {
    pub fn new(year: i32, count: i64) -> Prediction {
        Prediction { year, count }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn count(&self) -> i64 {
        self.count
    }
}

/// 合併預測實際採用的方法
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForecastMethod {
    LinearOnly,
    Combined
}

/// 只保留 year >= min_year 的預測
pub fn retain_from(predictions: Vec<Prediction>, min_year: Option<i32>) -> Vec<Prediction> {
    match min_year {
        Some(min_year) => predictions
            .into_iter()
            .filter(|p| p.year >= min_year)
            .collect(),
        None => predictions,
    }
}
