use serde::{
    Deserialize,
    Serialize
};

/// .5 邊界的進位慣例
///
/// 兩種慣例只在恰好落在 .5 的值上分歧，例如 2.5 → 3 (HalfAwayFromZero) 或 2 (HalfToEven)。
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RoundingConvention {
    #[default]
    HalfAwayFromZero,
    HalfToEven
}

impl RoundingConvention {
    pub fn round(&self, x: f64, digits: u32) -> f64 {
        match self {
            RoundingConvention::HalfAwayFromZero => round_half_away_from_zero(x, digits),
            RoundingConvention::HalfToEven => round_half_to_even(x, digits),
        }
    }

    /// 四捨五入至整數；超出 i64 範圍時飽和
    pub fn round_to_integer(&self, x: f64) -> i64 {
        self.round(x, 0) as i64
    }
}

fn scale_factors(digits: u32) -> (f64, f64) {
    if digits > 22 {
        /* pow1 and pow2 are each safe from overflow, but
           pow1*pow2 ~= pow(10.0, ndigits) might overflow */
        ((10.0 as f64).powi((digits - 22) as i32), 1e22)
    } else {
        ((10.0 as f64).powi(digits as i32), 1.0)
    }
}

pub fn round_half_away_from_zero(x: f64, digits: u32) -> f64 {
    let (pow1, pow2) = scale_factors(digits);
    let y = (x * pow1) * pow2;
    (y.round() / pow2) / pow1
}

pub fn round_half_to_even(x: f64, digits: u32) -> f64 {
    let (pow1, pow2) = scale_factors(digits);
    let y = (x * pow1) * pow2;

    let mut z = y.round();

    if (y - z).abs() == 0.5 {
        z = 2.0 * ((y / 2.0).round() as f64)
    }

    (z / pow2) / pow1
}
