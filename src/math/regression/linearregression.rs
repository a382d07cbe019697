use serde::{
    Deserialize,
    Serialize
};
use tracing::debug;

use crate::data::historicalseries::HistoricalSeries;
use crate::forecast::forecasterror::{
    DegenerateInput,
    ForecastError
};
use crate::math::curve::curve::Curve;
use crate::math::round::RoundingConvention;

// ─────────────────────────────────────────────────────────────────────────────
// LinearRegression - 最小平方法（離均差形式）
// ─────────────────────────────────────────────────────────────────────────────
//
//   Sxy = Σ (x_i - x̄)(y_i - ȳ)
//   Sxx = Σ (x_i - x̄)²
//   Syy = Σ (y_i - ȳ)²
//
//   slope     = Sxy / Sxx
//   intercept = ȳ - slope·x̄
//   r²        = (Sxy / √(Sxx·Syy))²，Syy = 0 時定義為 1
//
// 以離均差逐項累加，不使用 Σxy - n·x̄ȳ 的展開式。

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    slope: f64,
    intercept: f64,
    r_squared: f64
}

impl LinearFit {
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn r_squared(&self) -> f64 {
        self.r_squared
    }
}

pub struct LinearRegression {
    fit: LinearFit
}

impl LinearRegression {
    pub fn new(x: &[f64], y: &[f64]) -> Result<LinearRegression, ForecastError> {
        if x.len() != y.len() {
            return Err(ForecastError::degenerate(DegenerateInput::LengthMismatch {
                x: x.len(),
                y: y.len()
            }));
        }
        let n = x.len();
        if n < 2 {
            return Err(ForecastError::degenerate(DegenerateInput::TooFewPoints { found: n }));
        }

        let mean_x = x.iter().sum::<f64>() / n as f64;
        let mean_y = y.iter().sum::<f64>() / n as f64;

        let mut sum_xy = 0.0;
        let mut sum_xx = 0.0;
        let mut sum_yy = 0.0;
        for i in 0..n {
            let x_dev = x[i] - mean_x;
            let y_dev = y[i] - mean_y;
            sum_xy += x_dev * y_dev;
            sum_xx += x_dev * x_dev;
            sum_yy += y_dev * y_dev;
        }

        if sum_xx == 0.0 {
            return Err(ForecastError::degenerate(DegenerateInput::ZeroYearVariance));
        }

        let slope = sum_xy / sum_xx;
        let intercept = mean_y - slope * mean_x;
        // 常數序列可被斜率為零的直線完全擬合
        let r_squared = if sum_yy == 0.0 {
            1.0
        } else {
            (sum_xy / (sum_xx * sum_yy).sqrt()).powi(2)
        };

        debug!(slope, intercept, r_squared, points = n, "linear regression fitted");

        Ok(LinearRegression {
            fit: LinearFit { slope, intercept, r_squared }
        })
    }

    pub fn from_series(series: &HistoricalSeries) -> Result<LinearRegression, ForecastError> {
        Self::new(&series.x(), &series.y())
    }

    pub fn fit(&self) -> &LinearFit {
        &self.fit
    }

    pub fn predict(&self, year: i32, rounding: RoundingConvention) -> i64 {
        rounding.round_to_integer(self.value(year as f64))
    }
}

impl Curve for LinearRegression {
    fn value(&self, x: f64) -> f64 {
        self.fit.slope * x + self.fit.intercept
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    const YEARS: [f64; 5] = [2019.0, 2020.0, 2021.0, 2022.0, 2023.0];

    #[test]
    fn recovers_exact_line() {
        let counts = [1000.0, 1050.0, 1100.0, 1150.0, 1200.0];
        let model = LinearRegression::new(&YEARS, &counts).unwrap();
        assert_eq!(model.fit().slope(), 50.0);
        assert_eq!(model.fit().intercept(), -99950.0);
        assert_eq!(model.fit().r_squared(), 1.0);
        assert_eq!(model.predict(2024, RoundingConvention::HalfAwayFromZero), 1250);
    }

    #[test]
    fn constant_counts_have_unit_r_squared() {
        let counts = [700.0; 5];
        let model = LinearRegression::new(&YEARS, &counts).unwrap();
        assert_eq!(model.fit().slope(), 0.0);
        assert_eq!(model.fit().intercept(), 700.0);
        assert_eq!(model.fit().r_squared(), 1.0);
    }

    #[test]
    fn noisy_counts() {
        // 手算：x̄ = 2021, ȳ = 1120, Sxy = 520, Sxx = 10, Syy = 32800
        let counts = [1000.0, 1100.0, 1080.0, 1220.0, 1200.0];
        let model = LinearRegression::new(&YEARS, &counts).unwrap();
        assert_relative_eq!(model.fit().slope(), 52.0, epsilon = 1e-12);
        assert_relative_eq!(model.fit().intercept(), 1120.0 - 52.0 * 2021.0, epsilon = 1e-9);
        assert_relative_eq!(model.fit().r_squared(), 520.0 * 520.0 / (10.0 * 32800.0), epsilon = 1e-12);
        assert!(model.fit().r_squared() <= 1.0);
    }

    #[test]
    fn identical_years_are_rejected() {
        let err = LinearRegression::new(&[2020.0, 2020.0], &[1.0, 2.0]).err().unwrap();
        assert!(matches!(err, ForecastError::DegenerateInput(DegenerateInput::ZeroYearVariance)));
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = LinearRegression::new(&YEARS, &[1.0, 2.0]).err().unwrap();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::LengthMismatch { x: 5, y: 2 })
        ));
    }
}
