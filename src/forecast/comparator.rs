use std::collections::HashMap;

use serde::{
    Deserialize,
    Serialize
};

use crate::data::historicalseries::HistoricalSeries;
use crate::forecast::prediction::Prediction;
use crate::math::curve::curve::Curve;
use crate::math::round::RoundingConvention;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonRecord {
    year: i32,
    linear_value: i64,
    newton_value: i64,
    absolute_difference: u64,
    percent_difference: f64
}

impl ComparisonRecord {
    pub fn new(year: i32, linear_value: i64, newton_value: i64) -> ComparisonRecord {
        let absolute_difference = linear_value.abs_diff(newton_value);
        // 線性預測為 0 時百分比沒有定義，以 0 表示
        let percent_difference = if linear_value == 0 {
            0.0
        } else {
            absolute_difference as f64 / linear_value as f64 * 100.0
        };
        ComparisonRecord {
            year,
            linear_value,
            newton_value,
            absolute_difference,
            percent_difference
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn linear_value(&self) -> i64 {
        self.linear_value
    }

    pub fn newton_value(&self) -> i64 {
        self.newton_value
    }

    pub fn absolute_difference(&self) -> u64 {
        self.absolute_difference
    }

    pub fn percent_difference(&self) -> f64 {
        self.percent_difference
    }
}

pub struct Comparator {
    rounding: RoundingConvention
}

impl Comparator {
    pub fn new(rounding: RoundingConvention) -> Comparator {
        Comparator { rounding }
    }

    /// 兩組預測中年度都存在者才比較，順序依線性預測
    pub fn compare(&self, linear: &[Prediction], newton: &[Prediction]) -> Vec<ComparisonRecord> {
        let newton_by_year: HashMap<i32, i64> = newton
            .iter()
            .map(|p| (p.year(), p.count()))
            .collect();
        linear
            .iter()
            .filter_map(|l| {
                newton_by_year
                    .get(&l.year())
                    .map(|&n| ComparisonRecord::new(l.year(), l.count(), n))
            })
            .collect()
    }

    /// 兩種方法逐年平均後再四捨五入
    pub fn combine(&self, linear: &[Prediction], newton: &[Prediction]) -> Vec<Prediction> {
        let newton_by_year: HashMap<i32, i64> = newton
            .iter()
            .map(|p| (p.year(), p.count()))
            .collect();
        linear
            .iter()
            .filter_map(|l| {
                newton_by_year.get(&l.year()).map(|&n| {
                    let average = (l.count() as f64 + n as f64) / 2.0;
                    Prediction::new(l.year(), self.rounding.round_to_integer(average))
                })
            })
            .collect()
    }

    /// 擬合直線在歷史年度上的平均絕對偏差
    ///
    /// 內插多項式在歷史點上恆為精確值，因此只對線性模型計算。
    pub fn mean_absolute_deviation(&self, line: &dyn Curve, series: &HistoricalSeries) -> f64 {
        let total: f64 = series
            .observations()
            .iter()
            .map(|o| (o.count() as f64 - line.value(o.year() as f64)).abs())
            .sum();
        total / series.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::observation::Observation;
    use crate::math::regression::linearregression::LinearRegression;

    #[test]
    fn comparison_record_matches_worked_example() {
        let record = ComparisonRecord::new(2024, 1250, 1230);
        assert_eq!(record.absolute_difference(), 20);
        assert_relative_eq!(record.percent_difference(), 1.6, epsilon = 1e-12);
    }

    #[test]
    fn zero_linear_value_gives_zero_percent() {
        let record = ComparisonRecord::new(2025, 0, 14);
        assert_eq!(record.absolute_difference(), 14);
        assert_eq!(record.percent_difference(), 0.0);
    }

    #[test]
    fn compare_skips_years_missing_on_either_side() {
        let comparator = Comparator::new(RoundingConvention::HalfAwayFromZero);
        let linear = vec![Prediction::new(2024, 100), Prediction::new(2025, 110), Prediction::new(2026, 120)];
        let newton = vec![Prediction::new(2025, 90), Prediction::new(2026, 150)];
        let records = comparator.compare(&linear, &newton);
        let years: Vec<i32> = records.iter().map(|r| r.year()).collect();
        assert_eq!(years, vec![2025, 2026]);
        assert_eq!(records[1].absolute_difference(), 30);
    }

    #[test]
    fn combine_rounds_the_average() {
        let linear = vec![Prediction::new(2024, 1250), Prediction::new(2025, 1300)];
        let newton = vec![Prediction::new(2024, 1231), Prediction::new(2025, 1300)];

        let away = Comparator::new(RoundingConvention::HalfAwayFromZero).combine(&linear, &newton);
        assert_eq!(away, vec![Prediction::new(2024, 1241), Prediction::new(2025, 1300)]);

        let even = Comparator::new(RoundingConvention::HalfToEven).combine(&linear, &newton);
        assert_eq!(even[0], Prediction::new(2024, 1240));
    }

    #[test]
    fn mean_absolute_deviation_over_history() {
        let series = HistoricalSeries::new(vec![
            Observation::new(2019, 1000),
            Observation::new(2020, 1100),
            Observation::new(2021, 1080),
            Observation::new(2022, 1220),
            Observation::new(2023, 1200),
        ])
        .unwrap();
        let model = LinearRegression::from_series(&series).unwrap();
        let comparator = Comparator::new(RoundingConvention::HalfAwayFromZero);
        // 擬合值 1016, 1068, 1120, 1172, 1224
        let expected = (16.0 + 32.0 + 40.0 + 48.0 + 24.0) / 5.0;
        assert_relative_eq!(comparator.mean_absolute_deviation(&model, &series), expected, epsilon = 1e-6);
    }
}
