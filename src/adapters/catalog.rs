use crate::domain::model::{CountryCode, CountryInfo};
use crate::domain::ports::CountryLookup;
use crate::utils::error::{Result, SuggestError};
use std::collections::HashMap;
use std::path::Path;

/// 內建國家表,編譯時打包進執行檔
const BUNDLED_COUNTRIES: &str = include_str!("../../assets/countries.json");

/// 靜態國家對照表。載入後不再變動
#[derive(Debug, Clone)]
pub struct CountryCatalog {
    entries: HashMap<CountryCode, CountryInfo>,
}

impl CountryCatalog {
    /// 使用內建資料
    pub fn bundled() -> Result<Self> {
        let entries: Vec<CountryInfo> = serde_json::from_str(BUNDLED_COUNTRIES)?;
        Ok(Self::from_entries(entries))
    }

    /// 重複代碼以後出現者為準
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = CountryInfo>,
    {
        let entries = entries
            .into_iter()
            .map(|info| (info.code.clone(), info))
            .collect();
        Self { entries }
    }

    /// 依副檔名選擇載入格式
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_file(path),
            Some("csv") => Self::from_csv_file(path),
            _ => Err(SuggestError::CatalogError {
                message: format!(
                    "Unsupported country table format: {} (expected .json or .csv)",
                    path.display()
                ),
            }),
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let entries: Vec<CountryInfo> = serde_json::from_str(&content)?;
        Self::non_empty(entries)
    }

    /// CSV 欄位:code,name,emoji,reference_url
    pub fn from_csv_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path.as_ref())?;
        let mut entries = Vec::new();
        for record in reader.deserialize::<CountryInfo>() {
            entries.push(record?);
        }
        Self::non_empty(entries)
    }

    fn non_empty(entries: Vec<CountryInfo>) -> Result<Self> {
        if entries.is_empty() {
            return Err(SuggestError::CatalogError {
                message: "Country table contains no entries".to_string(),
            });
        }
        tracing::debug!("Country table loaded with {} entries", entries.len());
        Ok(Self::from_entries(entries))
    }

    pub fn get(&self, code: &CountryCode) -> Option<&CountryInfo> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 依代碼排序的完整清單,給互動模式的 list 指令用
    pub fn all(&self) -> Vec<&CountryInfo> {
        let mut all: Vec<&CountryInfo> = self.entries.values().collect();
        all.sort_by(|a, b| a.code.cmp(&b.code));
        all
    }
}

impl CountryLookup for CountryCatalog {
    fn resolve(&self, codes: &[CountryCode]) -> Vec<CountryInfo> {
        codes
            .iter()
            .filter_map(|code| {
                let found = self.entries.get(code).cloned();
                if found.is_none() {
                    tracing::debug!("Unknown country code omitted from display: {}", code);
                }
                found
            })
            .collect()
    }
}
