use serde::{Deserialize, Serialize};
use std::fmt;

/// 空選擇提交時顯示的提示訊息
pub const EMPTY_SELECTION_MESSAGE: &str = "Please select at least one country";

/// 建議請求失敗時顯示的固定訊息
pub const SUGGESTIONS_NOT_FOUND_MESSAGE: &str =
    "Could not find your next destinations. Please try again.";

/// 國家代碼。對核心流程而言只是不透明字串，比對採完全相等
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CountryCode {
    fn from(code: &str) -> Self {
        Self(code.to_string())
    }
}

impl From<String> for CountryCode {
    fn from(code: String) -> Self {
        Self(code)
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 建議服務回傳的代碼序列，保留服務給定的順序
pub type SuggestionList = Vec<CountryCode>;

/// 顯示層需要的國家資料
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryInfo {
    pub code: CountryCode,
    pub name: String,
    pub emoji: String,
    pub reference_url: String,
}

/// 已選國家集合：依加入順序排列且不重複。
/// 順序只影響顯示，不影響語意。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSet {
    codes: Vec<CountryCode>,
}

// 反序列化一律經過 from_codes 重建，確保不重複的約束在任何來源都成立
impl<'de> Deserialize<'de> for SelectionSet {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            codes: Vec<CountryCode>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(SelectionSet::from_codes(raw.codes))
    }
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以整批輸入重建集合，重複代碼只保留第一次出現
    pub fn from_codes<I>(codes: I) -> Self
    where
        I: IntoIterator<Item = CountryCode>,
    {
        let mut set = Self::new();
        set.replace(codes);
        set
    }

    pub fn replace<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = CountryCode>,
    {
        self.codes.clear();
        for code in codes {
            if !self.codes.contains(&code) {
                self.codes.push(code);
            }
        }
    }

    pub fn clear(&mut self) {
        self.codes.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn contains(&self, code: &CountryCode) -> bool {
        self.codes.contains(code)
    }

    pub fn codes(&self) -> &[CountryCode] {
        &self.codes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CountryCode> {
        self.codes.iter()
    }

    /// 忽略順序的成員比較
    pub fn same_countries(&self, other: &SelectionSet) -> bool {
        if self.codes.len() != other.codes.len() {
            return false;
        }
        self.codes.iter().all(|code| other.contains(code))
    }
}

impl<'a> IntoIterator for &'a SelectionSet {
    type Item = &'a CountryCode;
    type IntoIter = std::slice::Iter<'a, CountryCode>;

    fn into_iter(self) -> Self::IntoIter {
        self.codes.iter()
    }
}

/// 單一請求的生命週期。用 enum 讓「有結果且失敗」這類組合無法表達
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Pending,
    Succeeded {
        suggestions: SuggestionList,
    },
    Failed {
        reason: String,
    },
}

impl RequestState {
    pub fn is_idle(&self) -> bool {
        matches!(self, RequestState::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn is_succeeded(&self) -> bool {
        matches!(self, RequestState::Succeeded { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, RequestState::Failed { .. })
    }

    /// 成功時的建議清單，其他狀態回傳 None
    pub fn suggestions(&self) -> Option<&SuggestionList> {
        match self {
            RequestState::Succeeded { suggestions } => Some(suggestions),
            _ => None,
        }
    }
}
