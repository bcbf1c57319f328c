// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Band, Product, SizeCategory, SizeRule, SizeSuggestion};
pub use requests::ChatRequest;
pub use responses::{ChatReply, HealthResponse};
