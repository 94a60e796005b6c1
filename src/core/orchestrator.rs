use crate::core::selection::SelectionController;
use crate::core::view::{RenderState, ViewState};
use crate::domain::model::{
    CountryCode, RequestState, SelectionSet, SuggestionList, EMPTY_SELECTION_MESSAGE,
    SUGGESTIONS_NOT_FOUND_MESSAGE,
};
use crate::domain::ports::{CountryLookup, Notifier, SuggestionProvider};
use crate::utils::error::Result;

/// begin_submit 的判定結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStart {
    /// 已轉入 Pending，快照為送出當下的選擇
    Started { selection: SelectionSet },
    /// 空選擇，已送出提示訊息，狀態不變
    EmptySelection,
    /// 已有請求在途，本次忽略
    AlreadyPending,
}

/// 串起選擇、建議服務、對照表與訊息通道的流程核心。
/// 狀態轉換全走同步方法，submit 只是把網路等待夾在中間。
pub struct SuggestionOrchestrator<P, L, N>
where
    P: SuggestionProvider,
    L: CountryLookup,
    N: Notifier,
{
    provider: P,
    lookup: L,
    notifier: N,
    selection: SelectionController,
    request: RequestState,
}

impl<P, L, N> SuggestionOrchestrator<P, L, N>
where
    P: SuggestionProvider,
    L: CountryLookup,
    N: Notifier,
{
    pub fn new(provider: P, lookup: L, notifier: N) -> Self {
        Self {
            provider,
            lookup,
            notifier,
            selection: SelectionController::new(),
            request: RequestState::Idle,
        }
    }

    /// 整批替換目前選擇。請求在途時也接受，但不影響已送出的快照
    pub fn set_selection<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = CountryCode>,
    {
        if self.request.is_pending() {
            tracing::debug!("Selection changed while a request is in flight");
        }
        self.selection.set_selection(codes);
    }

    pub fn selection(&self) -> &SelectionSet {
        self.selection.selection()
    }

    pub fn request_state(&self) -> &RequestState {
        &self.request
    }

    pub fn view(&self) -> ViewState {
        ViewState::project(&self.request)
    }

    /// 請求前的守門檢查。空選擇在任何網路動作之前就被擋下
    pub fn begin_submit(&mut self) -> SubmitStart {
        if self.request.is_pending() {
            tracing::debug!("Submit ignored: a request is already in flight");
            return SubmitStart::AlreadyPending;
        }

        if self.selection.selection().is_empty() {
            tracing::info!("Submit blocked: nothing selected");
            self.notifier.notify(EMPTY_SELECTION_MESSAGE);
            return SubmitStart::EmptySelection;
        }

        let selection = self.selection.snapshot();
        tracing::info!("🔄 Requesting suggestions for {} country(ies)", selection.len());
        self.request = RequestState::Pending;
        SubmitStart::Started { selection }
    }

    /// 把服務回覆收斂回狀態機。
    /// 失敗路徑送出固定提示並回到可重送的狀態，選擇保持原樣
    pub fn apply_outcome(&mut self, outcome: Result<SuggestionList>) -> Result<()> {
        match outcome {
            Ok(suggestions) => {
                tracing::info!("✅ Received {} suggestion(s)", suggestions.len());
                self.request = RequestState::Succeeded { suggestions };
                Ok(())
            }
            Err(e) => {
                tracing::warn!("❌ Suggestion request failed: {}", e);
                self.notifier.notify(SUGGESTIONS_NOT_FOUND_MESSAGE);
                self.request = RequestState::Failed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    /// 單一次完整的送出流程。
    /// 回傳的 Err 僅供外層決定退出碼，狀態機本身已經收斂完畢
    pub async fn submit(&mut self) -> Result<()> {
        let selection = match self.begin_submit() {
            SubmitStart::Started { selection } => selection,
            SubmitStart::EmptySelection | SubmitStart::AlreadyPending => return Ok(()),
        };

        let outcome = self.provider.request_suggestions(&selection).await;
        self.apply_outcome(outcome)
    }

    /// 回到初始畫面：清空選擇並捨棄前一次請求的結果
    pub fn reset(&mut self) {
        tracing::debug!("Resetting to the selection screen");
        self.selection.clear();
        self.request = RequestState::Idle;
    }

    /// 目前該畫出什麼。建議代碼在這裡解析成顯示資料，
    /// 對照表沒有的代碼直接省略
    pub fn render_state(&self) -> RenderState {
        let suggestions = match self.request.suggestions() {
            Some(codes) => self.lookup.resolve(codes),
            None => Vec::new(),
        };

        RenderState {
            view: self.view(),
            selection: self.selection.selection().codes().to_vec(),
            suggestions,
        }
    }
}
