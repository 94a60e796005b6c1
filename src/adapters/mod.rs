// Adapters layer: concrete implementations for external systems (http service, country data, notifications).

pub mod catalog;
pub mod http;
pub mod toast;
