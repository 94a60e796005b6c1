use crate::domain::ports::Notifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// 單則暫態訊息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToastMessage {
    pub text: String,
    pub posted_at: DateTime<Utc>,
}

/// 送出端。可自由複製,送出後不等待任何回應
#[derive(Clone)]
pub struct ToastChannel {
    tx: mpsc::UnboundedSender<ToastMessage>,
}

/// 接收端,由顯示層持有
pub struct ToastReceiver {
    rx: mpsc::UnboundedReceiver<ToastMessage>,
}

pub fn toast_channel() -> (ToastChannel, ToastReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ToastChannel { tx }, ToastReceiver { rx })
}

impl Notifier for ToastChannel {
    fn notify(&self, message: &str) {
        let toast = ToastMessage {
            text: message.to_string(),
            posted_at: Utc::now(),
        };
        // 接收端可能已經離開,送不出去就丟棄
        if self.tx.send(toast).is_err() {
            tracing::debug!("Toast dropped, no receiver attached: {}", message);
        }
    }
}

impl ToastReceiver {
    /// 取出目前累積的所有訊息,依送出順序排列
    pub fn drain(&mut self) -> Vec<ToastMessage> {
        let mut messages = Vec::new();
        while let Ok(toast) = self.rx.try_recv() {
            messages.push(toast);
        }
        messages
    }

    /// 只取最新一則,其餘捨棄
    pub fn latest(&mut self) -> Option<ToastMessage> {
        self.drain().pop()
    }

    pub async fn next(&mut self) -> Option<ToastMessage> {
        self.rx.recv().await
    }
}
