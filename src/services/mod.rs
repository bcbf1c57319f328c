// Service exports
pub mod gemini;
pub mod provider;
pub mod woocommerce;

pub use gemini::GeminiClient;
pub use provider::{ProductSearch, ProviderError, TextGeneration};
pub use woocommerce::WooCommerceClient;
