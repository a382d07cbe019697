use crate::data::observation::Observation;
use crate::forecast::forecasterror::{
    DegenerateInput,
    ForecastError
};

// ─────────────────────────────────────────────────────────────────────────────
// HistoricalSeries
// ─────────────────────────────────────────────────────────────────────────────
//
// 進入模型階段前的唯一關卡：
//   - 至少 2 筆
//   - 年度嚴格遞增（同年度必須先在 Aggregator 加總）
// 通過驗證後，LinearModel 與 NewtonInterpolator 的運算不會再遇到除以零。

#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalSeries {
    observations: Vec<Observation>
}

impl HistoricalSeries {
    pub fn new(observations: Vec<Observation>) -> Result<HistoricalSeries, ForecastError> {
        if observations.len() < 2 {
            return Err(ForecastError::degenerate(DegenerateInput::TooFewPoints {
                found: observations.len()
            }));
        }

        for pair in observations.windows(2) {
            let previous = pair[0].year();
            let next = pair[1].year();
            if previous == next {
                return Err(ForecastError::degenerate(DegenerateInput::DuplicateYear { year: next }));
            }
            if previous > next {
                return Err(ForecastError::degenerate(DegenerateInput::UnorderedYears { previous, next }));
            }
        }

        Ok(HistoricalSeries { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn last_year(&self) -> i32 {
        self.observations[self.observations.len() - 1].year()
    }

    pub fn latest(&self) -> &Observation {
        &self.observations[self.observations.len() - 1]
    }

    pub fn x(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.year() as f64).collect()
    }

    pub fn y(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.count() as f64).collect()
    }

    /// 最後一個歷史年度之後的連續 horizon 個年度
    pub fn following_years(&self, horizon: u32) -> Result<Vec<i32>, ForecastError> {
        let last = self.last_year();
        let out_of_range = || ForecastError::degenerate(DegenerateInput::YearOutOfRange { last, horizon });

        let span = i32::try_from(horizon).map_err(|_| out_of_range())?;
        last.checked_add(span).ok_or_else(out_of_range)?;
        Ok((1..=span).map(|offset| last + offset).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(pairs: &[(i32, u64)]) -> Vec<Observation> {
        pairs.iter().map(|&(y, c)| Observation::new(y, c)).collect()
    }

    #[test]
    fn rejects_short_series() {
        let err = HistoricalSeries::new(obs(&[(2020, 10)])).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::TooFewPoints { found: 1 })
        ));
    }

    #[test]
    fn rejects_repeated_year() {
        let err = HistoricalSeries::new(obs(&[(2019, 10), (2020, 12), (2020, 13)])).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::DuplicateYear { year: 2020 })
        ));
    }

    #[test]
    fn rejects_descending_years() {
        let err = HistoricalSeries::new(obs(&[(2021, 10), (2020, 12)])).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::UnorderedYears { previous: 2021, next: 2020 })
        ));
    }

    #[test]
    fn following_years_start_after_last_observation() {
        let series = HistoricalSeries::new(obs(&[(2019, 1), (2020, 2), (2023, 3)])).unwrap();
        assert_eq!(series.following_years(5).unwrap(), vec![2024, 2025, 2026, 2027, 2028]);
        assert_eq!(series.following_years(0).unwrap(), Vec::<i32>::new());
        assert_eq!(series.last_year(), 2023);
        assert_eq!(series.latest().count(), 3);
        assert_eq!(series.x(), vec![2019.0, 2020.0, 2023.0]);
    }

    #[test]
    fn following_years_past_i32_max_are_rejected() {
        let series = HistoricalSeries::new(obs(&[(i32::MAX - 1, 1), (i32::MAX, 2)])).unwrap();
        let err = series.following_years(5).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::YearOutOfRange { last: i32::MAX, horizon: 5 })
        ));

        // horizon 本身超出 i32 時同樣拒絕，不做截斷
        let series = HistoricalSeries::new(obs(&[(2019, 1), (2020, 2)])).unwrap();
        let err = series.following_years(u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::YearOutOfRange { last: 2020, horizon: u32::MAX })
        ));
    }
}
