use crate::domain::model::{CountryCode, SelectionSet};

/// 管理使用者目前選擇的國家。
/// 每次 set_selection 都是整批替換，不做增量合併。
#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    selection: SelectionSet,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以選取元件目前的完整內容覆寫選擇，重複代碼去除後保留首次出現的順序
    pub fn set_selection<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = CountryCode>,
    {
        self.selection.replace(codes);
        tracing::debug!("Selection now holds {} country(ies)", self.selection.len());
    }

    pub fn clear(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// 送出請求時用的固定快照
    pub fn snapshot(&self) -> SelectionSet {
        self.selection.clone()
    }
}
