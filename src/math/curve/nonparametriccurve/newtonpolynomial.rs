use serde::Serialize;
use tracing::debug;

use crate::data::historicalseries::HistoricalSeries;
use crate::forecast::forecasterror::{
    DegenerateInput,
    ForecastError
};
use crate::math::curve::curve::Curve;
use crate::math::curve::nonparametriccurve::nonparametriccurve::{
    NonparametricCurve,
    Point2D
};

// ─────────────────────────────────────────────────────────────────────────────
// NewtonPolynomial - Forward Form
// ─────────────────────────────────────────────────────────────────────────────
//
// P(x) = a_0 + a_1·(x-x_0) + a_2·(x-x_0)(x-x_1) + ... + a_{n-1}·Π_{k<n-1}(x-x_k)
//
// 其中 a_0 = y_0，a_k = f[x_0, ..., x_k] 為差商表第 0 列的第 k-1 欄。
//
// 注意：
//   - 在節點上 P(x_i) = y_i（浮點誤差內）
//   - 節點範圍外是全域多項式外插，高階時會出現 Runge 振盪
//     這是方法本身的特性，不做修正

/// 三角形差商表
///
/// `rows[i][j]` 是以第 i 個節點為錨點的 (j+1) 階差商，
/// 第 i 列恰有 n-1-i 個元素。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DividedDifferenceTable {
    rows: Vec<Vec<f64>>
}

impl DividedDifferenceTable {
    pub fn new(x: &[f64], y: &[f64]) -> Result<DividedDifferenceTable, ForecastError> {
        check_lengths(x, y)?;
        let n = x.len();

        let mut rows: Vec<Vec<f64>> = (0..n - 1)
            .map(|i| Vec::with_capacity(n - 1 - i))
            .collect();

        // 一階差商
        for i in 0..n - 1 {
            if x[i + 1] == x[i] {
                return Err(ForecastError::degenerate(DegenerateInput::CoincidentNodes { index: i }));
            }
            let lhs_pt = Point2D::new(x[i], y[i]);
            let rhs_pt = Point2D::new(x[i + 1], y[i + 1]);
            rows[i].push(Point2D::slope(&lhs_pt, &rhs_pt));
        }

        // 高階差商：第 j 階迭代時，每一列剛好補上第 j 欄
        for j in 1..n - 1 {
            for i in 0..n - j - 1 {
                let span = x[i + j + 1] - x[i];
                if span == 0.0 {
                    return Err(ForecastError::degenerate(DegenerateInput::CoincidentNodes { index: i }));
                }
                let value = (rows[i + 1][j - 1] - rows[i][j - 1]) / span;
                rows[i].push(value);
            }
        }

        Ok(DividedDifferenceTable { rows })
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<Vec<f64>> {
        self.rows
    }
}

pub struct NewtonPolynomial {
    x_data: Vec<f64>,
    y_data: Vec<f64>,
    table: DividedDifferenceTable,
    coefficients: Vec<f64>
}

impl NewtonPolynomial {
    pub fn new(x: &[f64], y: &[f64]) -> Result<NewtonPolynomial, ForecastError> {
        let table = DividedDifferenceTable::new(x, y)?;

        let mut coefficients = Vec::with_capacity(x.len());
        coefficients.push(y[0]);
        coefficients.extend((1..x.len()).map(|k| table.rows[0][k - 1]));

        debug!(
            nodes = x.len(),
            leading_coefficient = coefficients[coefficients.len() - 1],
            "newton polynomial built"
        );

        Ok(NewtonPolynomial {
            x_data: x.to_vec(),
            y_data: y.to_vec(),
            table,
            coefficients
        })
    }

    pub fn from_series(series: &HistoricalSeries) -> Result<NewtonPolynomial, ForecastError> {
        Self::new(&series.x(), &series.y())
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    pub fn divided_differences(&self) -> &DividedDifferenceTable {
        &self.table
    }

    pub fn degree(&self) -> usize {
        self.coefficients.len() - 1
    }

    fn value_forward(&self, xi: f64) -> f64 {
        let mut result = self.coefficients[0];
        let mut term = 1.0;
        for k in 1..self.coefficients.len() {
            term *= xi - self.x_data[k - 1];
            result += self.coefficients[k] * term;
        }
        result
    }
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<(), ForecastError> {
    if x.len() != y.len() {
        return Err(ForecastError::degenerate(DegenerateInput::LengthMismatch {
            x: x.len(),
            y: y.len()
        }));
    }
    if x.len() < 2 {
        return Err(ForecastError::degenerate(DegenerateInput::TooFewPoints { found: x.len() }));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Trait 實作
// ─────────────────────────────────────────────────────────────────────────────

impl NonparametricCurve for NewtonPolynomial {
    fn points(&self) -> Vec<Point2D> {
        self.x_data
            .iter()
            .zip(self.y_data.iter())
            .map(|(&x, &y)| Point2D::new(x, y))
            .collect()
    }

    fn min_x(&self) -> f64 {
        self.x_data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    fn max_x(&self) -> f64 {
        self.x_data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

impl Curve for NewtonPolynomial {
    fn value(&self, x: f64) -> f64 {
        if self.is_extrapolating(x) {
            debug!(x, min_x = self.min_x(), max_x = self.max_x(), "newton polynomial extrapolating");
        }
        self.value_forward(x)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn table_rows_shrink_by_one() {
        let x = [2019.0, 2020.0, 2021.0, 2022.0, 2023.0];
        let y = [1000.0, 1100.0, 1150.0, 1300.0, 1320.0];
        let table = DividedDifferenceTable::new(&x, &y).unwrap();
        let lengths: Vec<usize> = table.rows().iter().map(|r| r.len()).collect();
        assert_eq!(lengths, vec![4, 3, 2, 1]);
    }

    #[test]
    fn hand_computed_quadratic() {
        // y = x² 在 x = 0, 1, 3
        let x = [0.0, 1.0, 3.0];
        let y = [0.0, 1.0, 9.0];
        let poly = NewtonPolynomial::new(&x, &y).unwrap();
        let table = poly.divided_differences();
        assert_eq!(table.rows(), &[vec![1.0, 1.0], vec![4.0]]);
        assert_eq!(poly.coefficients(), &[0.0, 1.0, 1.0]);
        assert_abs_diff_eq!(poly.value(2.0), 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(poly.value(-4.0), 16.0, epsilon = 1e-12);
    }

    #[test]
    fn passes_through_nodes() {
        let x = [2019.0, 2020.0, 2021.0, 2022.0, 2023.0];
        let y = [48210.0, 50115.0, 49870.0, 53302.0, 55990.0];
        let poly = NewtonPolynomial::new(&x, &y).unwrap();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            assert_abs_diff_eq!(poly.value(xi), yi, epsilon = 1e-6);
        }
        assert_eq!(poly.degree(), 4);
    }

    #[test]
    fn linear_data_has_vanishing_higher_orders() {
        let x = [2019.0, 2020.0, 2021.0, 2022.0, 2023.0];
        let y = [1000.0, 1050.0, 1100.0, 1150.0, 1200.0];
        let table = DividedDifferenceTable::new(&x, &y).unwrap();
        for row in table.rows() {
            assert_eq!(row[0], 50.0);
            for &higher in &row[1..] {
                assert_eq!(higher, 0.0);
            }
        }
    }

    #[test]
    fn two_points_give_a_line() {
        let poly = NewtonPolynomial::new(&[2022.0, 2023.0], &[10.0, 14.0]).unwrap();
        assert_eq!(poly.divided_differences().rows(), &[vec![4.0]]);
        assert_abs_diff_eq!(poly.value(2024.0), 18.0, epsilon = 1e-9);
    }

    #[test]
    fn duplicate_node_is_rejected() {
        let err = NewtonPolynomial::new(&[2020.0, 2021.0, 2021.0], &[1.0, 2.0, 3.0]).err().unwrap();
        assert!(matches!(
            err,
            ForecastError::DegenerateInput(DegenerateInput::CoincidentNodes { index: 1 })
        ));
    }

    #[test]
    fn non_adjacent_duplicate_is_rejected() {
        let err = NewtonPolynomial::new(&[2020.0, 2021.0, 2020.0], &[1.0, 2.0, 3.0]).err().unwrap();
        assert!(err.is_degenerate());
    }

    #[test]
    fn extrapolation_is_flagged() {
        let poly = NewtonPolynomial::new(&[2019.0, 2020.0, 2021.0], &[1.0, 4.0, 9.0]).unwrap();
        assert!(!poly.is_extrapolating(2020.5));
        assert!(poly.is_extrapolating(2022.0));
        assert!(poly.is_extrapolating(2018.0));
        assert_eq!(poly.points().len(), 3);
    }
}
