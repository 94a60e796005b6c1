use crate::domain::model::{CountryCode, CountryInfo, RequestState};
use serde::{Deserialize, Serialize};

/// 三個互斥的畫面區域。任一時刻只會顯示其中一個
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    Selecting,
    Loading,
    Results,
}

impl ViewState {
    /// 由請求狀態純推導畫面區域。
    /// 失敗視同回到選擇畫面；成功一律顯示結果畫面，即使清單為空。
    pub fn project(request: &RequestState) -> Self {
        match request {
            RequestState::Idle | RequestState::Failed { .. } => ViewState::Selecting,
            RequestState::Pending => ViewState::Loading,
            RequestState::Succeeded { .. } => ViewState::Results,
        }
    }
}

/// 交給顯示層的完整渲染資料
#[derive(Debug, Clone, Serialize)]
pub struct RenderState {
    pub view: ViewState,
    pub selection: Vec<CountryCode>,
    pub suggestions: Vec<CountryInfo>,
}
