pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::CliConfig;

pub use crate::adapters::catalog::CountryCatalog;
pub use crate::adapters::http::HttpSuggestionProvider;
pub use crate::adapters::toast::{toast_channel, ToastChannel, ToastMessage, ToastReceiver};
pub use crate::config::{toml_config::TomlConfig, EffectiveConfig};
pub use crate::core::orchestrator::{SubmitStart, SuggestionOrchestrator};
pub use crate::core::selection::SelectionController;
pub use crate::core::view::{RenderState, ViewState};
pub use crate::domain::model::{
    CountryCode, CountryInfo, RequestState, SelectionSet, SuggestionList,
    EMPTY_SELECTION_MESSAGE, SUGGESTIONS_NOT_FOUND_MESSAGE,
};
pub use crate::domain::ports::{CountryLookup, Notifier, ServiceConfig, SuggestionProvider};
pub use crate::utils::error::{Result, SuggestError};
