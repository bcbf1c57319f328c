//! Sila chat - chat assistant service for the Sila store
//!
//! Routes each chat message to one of three behaviors: a size suggestion
//! from a fixed size chart, a product search against the WooCommerce store,
//! or a reply generated by Gemini.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::config::{Settings, SettingsError};
pub use crate::core::{classify, Dispatcher, Route};
pub use models::{ChatReply, ChatRequest, Product, SizeSuggestion};
pub use services::{GeminiClient, ProductSearch, ProviderError, TextGeneration, WooCommerceClient};
