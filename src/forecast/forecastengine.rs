use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};
use tracing::{
    info,
    warn
};

use crate::configuration::ForecastConfiguration;
use crate::data::aggregator::{
    AggregationMode,
    Aggregator
};
use crate::data::historicalseries::HistoricalSeries;
use crate::data::observation::{
    Observation,
    RawRecord
};
use crate::forecast::comparator::{
    Comparator,
    ComparisonRecord
};
use crate::forecast::forecasterror::ForecastError;
use crate::forecast::prediction::{
    retain_from,
    ForecastMethod,
    Prediction
};
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::newtonpolynomial::NewtonPolynomial;
use crate::math::curve::nonparametriccurve::nonparametriccurve::NonparametricCurve;
use crate::math::regression::linearregression::{
    LinearFit,
    LinearRegression
};

// ─────────────────────────────────────────────────────────────────────────────
// ForecastRequest / ForecastOutput
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    category: String,
    historical_observations: Vec<Observation>,
    /// 空陣列表示使用最後歷史年度之後的 horizon 個年度
    #[serde(default)]
    target_years: Vec<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_year: Option<i32>
}

impl ForecastRequest {
    pub fn new(category: &str,
               historical_observations: Vec<Observation>,
               target_years: Vec<i32>) -> ForecastRequest {
        ForecastRequest {
            category: category.to_owned(),
            historical_observations,
            target_years,
            min_year: None
        }
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<ForecastRequest, ForecastError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let request: ForecastRequest = serde_json::from_reader(reader)?;
        Ok(request)
    }

    pub fn with_min_year(mut self, min_year: Option<i32>) -> Self {
        self.min_year = min_year;
        self
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn historical_observations(&self) -> &[Observation] {
        &self.historical_observations
    }

    pub fn target_years(&self) -> &[i32] {
        &self.target_years
    }

    pub fn min_year(&self) -> Option<i32> {
        self.min_year
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastOutput {
    category: String,
    historical_observations: Vec<Observation>,
    linear_fit: LinearFit,
    newton_coefficients: Vec<f64>,
    divided_difference_table: Vec<Vec<f64>>,
    linear_predictions: Vec<Prediction>,
    newton_predictions: Vec<Prediction>,
    combined_predictions: Vec<Prediction>,
    method: ForecastMethod,
    comparisons: Vec<ComparisonRecord>,
    linear_mean_absolute_deviation: f64
}

impl ForecastOutput {
    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn historical_observations(&self) -> &[Observation] {
        &self.historical_observations
    }

    pub fn linear_fit(&self) -> &LinearFit {
        &self.linear_fit
    }

    pub fn newton_coefficients(&self) -> &[f64] {
        &self.newton_coefficients
    }

    pub fn divided_difference_table(&self) -> &[Vec<f64>] {
        &self.divided_difference_table
    }

    pub fn linear_predictions(&self) -> &[Prediction] {
        &self.linear_predictions
    }

    pub fn newton_predictions(&self) -> &[Prediction] {
        &self.newton_predictions
    }

    pub fn combined_predictions(&self) -> &[Prediction] {
        &self.combined_predictions
    }

    pub fn method(&self) -> ForecastMethod {
        self.method
    }

    pub fn comparisons(&self) -> &[ComparisonRecord] {
        &self.comparisons
    }

    pub fn linear_mean_absolute_deviation(&self) -> f64 {
        self.linear_mean_absolute_deviation
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// ForecastEngine
// ─────────────────────────────────────────────────────────────────────────────
//
// 流程：
//   1. 驗證歷史序列（HistoricalSeries）
//   2. 兩個模型各自擬合；任一失敗即整體失敗，不回傳部分結果
//   3. 在全部目標年度上求值並四捨五入
//   4. 最後才套用 min_year 篩選，篩選不影響擬合係數

pub struct ForecastEngine {
    configuration: ForecastConfiguration
}

impl ForecastEngine {
    pub fn new(configuration: ForecastConfiguration) -> ForecastEngine {
        ForecastEngine { configuration }
    }

    pub fn forecast(&self, request: &ForecastRequest) -> Result<ForecastOutput, ForecastError> {
        let series = HistoricalSeries::new(request.historical_observations.clone())?;
        let target_years = if request.target_years.is_empty() {
            series.following_years(self.configuration.horizon())?
        } else {
            request.target_years.clone()
        };
        self.forecast_series(&request.category, &series, &target_years, request.min_year)
    }

    pub fn forecast_series(&self,
                           category: &str,
                           series: &HistoricalSeries,
                           target_years: &[i32],
                           min_year: Option<i32>) -> Result<ForecastOutput, ForecastError> {
        let linear = LinearRegression::from_series(series)?;
        let newton = NewtonPolynomial::from_series(series)?;

        let rounding = self.configuration.rounding();
        let comparator = Comparator::new(rounding);

        if newton.degree() >= 3 && target_years.iter().any(|&y| newton.is_extrapolating(y as f64)) {
            warn!(
                category,
                degree = newton.degree(),
                "newton polynomial evaluated outside the historical range"
            );
        }

        let linear_predictions: Vec<Prediction> = target_years
            .iter()
            .map(|&year| Prediction::new(year, linear.predict(year, rounding)))
            .collect();
        let newton_predictions: Vec<Prediction> = target_years
            .iter()
            .map(|&year| Prediction::new(year, rounding.round_to_integer(newton.value(year as f64))))
            .collect();

        let (combined_predictions, method) = if series.len() >= self.configuration.combine_min_points() {
            (comparator.combine(&linear_predictions, &newton_predictions), ForecastMethod::Combined)
        } else {
            (linear_predictions.clone(), ForecastMethod::LinearOnly)
        };

        let linear_predictions = retain_from(linear_predictions, min_year);
        let newton_predictions = retain_from(newton_predictions, min_year);
        let combined_predictions = retain_from(combined_predictions, min_year);

        let comparisons = comparator.compare(&linear_predictions, &newton_predictions);
        let linear_mean_absolute_deviation = comparator.mean_absolute_deviation(&linear, series);

        info!(
            category,
            points = series.len(),
            targets = target_years.len(),
            returned = linear_predictions.len(),
            "forecast completed"
        );

        Ok(ForecastOutput {
            category: category.to_owned(),
            historical_observations: series.observations().to_vec(),
            linear_fit: *linear.fit(),
            newton_coefficients: newton.coefficients().to_vec(),
            divided_difference_table: newton.divided_differences().clone().into_rows(),
            linear_predictions,
            newton_predictions,
            combined_predictions,
            method,
            comparisons,
            linear_mean_absolute_deviation
        })
    }

    /// 由原始紀錄彙總後預測；category 等於全類別標籤時彙總所有類別
    pub fn forecast_records(&self,
                            records: &[RawRecord],
                            category: &str,
                            min_year: Option<i32>) -> Result<ForecastOutput, ForecastError> {
        let mode = AggregationMode::resolve(category, self.configuration.all_categories_label());
        let observations = Aggregator::new(records).aggregate(&mode)?;
        let request = ForecastRequest::new(category, observations, Vec::new()).with_min_year(min_year);
        self.forecast(&request)
    }

    /// 每個類別各自獨立預測（不含全類別標籤本身）
    ///
    /// 單一類別失敗只影響該類別的結果，依類別首次出現順序回傳。
    pub fn forecast_categories(&self,
                               records: &[RawRecord],
                               min_year: Option<i32>) -> Vec<(String, Result<ForecastOutput, ForecastError>)> {
        let label = self.configuration.all_categories_label();
        Aggregator::new(records)
            .categories()
            .into_iter()
            .filter(|category| category.as_str() != label)
            .map(|category| {
                let result = self.forecast_records(records, &category, min_year);
                if let Err(err) = &result {
                    warn!(category = category.as_str(), error = %err, "category skipped");
                }
                (category, result)
            })
            .collect()
    }
}
