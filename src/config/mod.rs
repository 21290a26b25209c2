//! Configuration module for Briefly.
//!
//! Handles loading application settings, validating provider configuration,
//! and localized prompt templates.

mod prompts;
mod provider;
mod settings;

pub use prompts::{Prompts, FALLBACK_LANGUAGE};
pub use provider::ProviderConfig;
pub use settings::{
    ExtractorSettings, GeneralSettings, PromptSettings, ProviderSettings, ServerSettings, Settings,
};
