pub mod orchestrator;
pub mod selection;
pub mod view;

pub use crate::domain::model::{CountryCode, CountryInfo, RequestState, SelectionSet, SuggestionList};
pub use crate::domain::ports::{CountryLookup, Notifier, ServiceConfig, SuggestionProvider};
pub use crate::utils::error::Result;
