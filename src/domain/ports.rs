use crate::domain::model::{CountryCode, CountryInfo, SelectionSet, SuggestionList};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 外部建議服務。單次嘗試，不重試；呼叫前選擇必定非空
#[async_trait]
pub trait SuggestionProvider: Send + Sync {
    async fn request_suggestions(&self, selection: &SelectionSet) -> Result<SuggestionList>;
}

/// 國家對照表查詢。純函數：不在表中的代碼直接省略，不算錯誤
pub trait CountryLookup: Send + Sync {
    fn resolve(&self, codes: &[CountryCode]) -> Vec<CountryInfo>;
}

/// 暫態訊息通道，送出即忘，絕不阻塞呼叫端
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str);
}

pub trait ServiceConfig: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn api_key(&self) -> Option<&str>;
    fn timeout_seconds(&self) -> u64;
    fn max_suggestions(&self) -> usize;
}
