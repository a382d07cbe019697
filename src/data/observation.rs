use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{
    Deserialize,
    Serialize
};

use crate::forecast::forecasterror::ForecastError;

/// 單一年度的登記數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    year: i32,
    count: u64
}

impl Observation {
    pub fn new(year: i32, count: u64) -> Observation {
        Observation { year, count }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

/// 資料載入端交付的原始紀錄，一筆對應 (類別, 年度, 數量)
///
/// 欄位別名對應原始資料集的欄位名稱。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(alias = "jenis_kendaraan")]
    category: String,
    #[serde(alias = "tahun")]
    year: i32,
    #[serde(alias = "jumlah_kendaraan")]
    count: u64
}

impl RawRecord {
    pub fn new(category: &str, year: i32, count: u64) -> RawRecord {
        RawRecord {
            category: category.to_owned(),
            year,
            count
        }
    }

    /// 讀取已解析好的原始紀錄（JSON 陣列）
    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Vec<RawRecord>, ForecastError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let records: Vec<RawRecord> = serde_json::from_reader(reader)?;
        Ok(records)
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}
