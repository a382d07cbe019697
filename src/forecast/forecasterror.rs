use thiserror::Error;

/// 輸入資料本身無法擬合的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DegenerateInput {
    #[error("at least 2 distinct years are required, {found} given")]
    TooFewPoints { found: usize },

    #[error("year {year} appears more than once")]
    DuplicateYear { year: i32 },

    #[error("years must be strictly increasing, {previous} followed by {next}")]
    UnorderedYears { previous: i32, next: i32 },

    #[error("all years are identical")]
    ZeroYearVariance,

    #[error("x has {x} values but y has {y}")]
    LengthMismatch { x: usize, y: usize },

    /// Newton 差商分母為零，index 為發生位置的錨點
    #[error("coincident interpolation nodes anchored at index {index}")]
    CoincidentNodes { index: usize },

    /// 同年度加總超出 u64
    #[error("summed count for year {year} exceeds the representable range")]
    CountOverflow { year: i32 },

    /// 預設預測年度超出 i32
    #[error("{horizon} years after {last} exceed the representable year range")]
    YearOutOfRange { last: i32, horizon: u32 },
}

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error("no historical records found for category '{0}'")]
    NotFound(String),

    #[error("degenerate input: {0}")]
    DegenerateInput(DegenerateInput),

    #[error(transparent)]
    IOError(#[from] std::io::Error),

    #[error(transparent)]
    JsonParseError(#[from] serde_json::Error),
}

impl ForecastError {
    pub fn category_not_found(category: &str) -> ForecastError {
        ForecastError::NotFound(category.to_owned())
    }

    pub fn degenerate(reason: DegenerateInput) -> ForecastError {
        ForecastError::DegenerateInput(reason)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ForecastError::NotFound(_))
    }

    pub fn is_degenerate(&self) -> bool {
        matches!(self, ForecastError::DegenerateInput(_))
    }
}
