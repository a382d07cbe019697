use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::forecast::forecasterror::ForecastError;
use crate::math::round::RoundingConvention;

pub const DEFAULT_HORIZON: u32 = 5;
pub const DEFAULT_ALL_CATEGORIES_LABEL: &'static str = "Semua Kendaraan";
pub const DEFAULT_COMBINE_MIN_POINTS: usize = 3;

/// 預測引擎設定，JSON 中缺少的欄位一律取預設值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ForecastConfiguration {
    horizon: u32,
    all_categories_label: String,
    rounding: RoundingConvention,
    combine_min_points: usize
}

impl Default for ForecastConfiguration {
    fn default() -> Self {
        ForecastConfiguration {
            horizon: DEFAULT_HORIZON,
            all_categories_label: DEFAULT_ALL_CATEGORIES_LABEL.to_owned(),
            rounding: RoundingConvention::default(),
            combine_min_points: DEFAULT_COMBINE_MIN_POINTS
        }
    }
}

impl ForecastConfiguration {
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<ForecastConfiguration, ForecastError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let configuration: ForecastConfiguration = serde_json::from_reader(reader)?;
        Ok(configuration)
    }

    pub fn from_json_str(json: &str) -> Result<ForecastConfiguration, ForecastError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn horizon(&self) -> u32 {
        self.horizon
    }

    pub fn all_categories_label(&self) -> &str {
        &self.all_categories_label
    }

    pub fn rounding(&self) -> RoundingConvention {
        self.rounding
    }

    pub fn combine_min_points(&self) -> usize {
        self.combine_min_points
    }
}
