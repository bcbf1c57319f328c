use crate::config::DispatchSettings;
use crate::core::{replies, sizing};
use crate::models::{ChatReply, ChatRequest, SizeSuggestion};
use crate::services::{ProductSearch, TextGeneration};
use std::sync::Arc;

/// Strategy chosen for a request
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route<'a> {
    Size { category: &'a str, weight: f64, height: f64 },
    ProductSearch { query: &'a str },
    Generate { message: &'a str },
    Instructions,
}

impl Route<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Size { .. } => "size",
            Route::ProductSearch { .. } => "product_search",
            Route::Generate { .. } => "generate",
            Route::Instructions => "instructions",
        }
    }
}

/// Routes a chat request to the size chart, the product catalog or the
/// text generator, and always produces a reply.
///
/// # Policy (first match wins)
/// 1. Category, weight and height present: size suggestion
/// 2. Message mentions a product keyword: catalog search
/// 3. Any other message: text generation
/// 4. Nothing usable: static instructions
pub struct Dispatcher {
    catalog: Arc<dyn ProductSearch>,
    generator: Arc<dyn TextGeneration>,
    product_keywords: Vec<String>,
    search_limit: usize,
}

impl Dispatcher {
    pub fn new(
        catalog: Arc<dyn ProductSearch>,
        generator: Arc<dyn TextGeneration>,
        settings: &DispatchSettings,
    ) -> Self {
        Self {
            catalog,
            generator,
            product_keywords: settings
                .product_keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            search_limit: settings.search_limit,
        }
    }

    /// Pick the route for a request without performing it
    pub fn plan<'a>(&self, request: &'a ChatRequest) -> Route<'a> {
        if let Some((category, weight, height)) = request.measurements() {
            return Route::Size { category, weight, height };
        }

        match request.message.as_deref() {
            Some(message) if self.is_product_query(message) => Route::ProductSearch { query: message },
            Some(message) => Route::Generate { message },
            None => Route::Instructions,
        }
    }

    fn is_product_query(&self, message: &str) -> bool {
        let message = message.to_lowercase();
        self.product_keywords
            .iter()
            .any(|keyword| message.contains(keyword.as_str()))
    }

    /// Answer a request. Provider failures are logged and turned into replies.
    pub async fn handle(&self, request: &ChatRequest) -> ChatReply {
        let route = self.plan(request);

        tracing::info!("Dispatching chat request via {} route", route.name());

        let reply = match route {
            Route::Size { category, weight, height } => {
                match sizing::classify(category, weight, height) {
                    SizeSuggestion::Label(label) => replies::size_suggestion(label),
                    SizeSuggestion::Guidance => {
                        tracing::debug!(
                            "No size band for category={:?} weight={} height={}",
                            category, weight, height
                        );
                        replies::SIZE_GUIDANCE.to_string()
                    }
                }
            }
            Route::ProductSearch { query } => self.search_products(query).await,
            Route::Generate { message } => self.generate(message).await,
            Route::Instructions => replies::INSTRUCTIONS.to_string(),
        };

        ChatReply::new(reply)
    }

    async fn search_products(&self, query: &str) -> String {
        // Failed searches answer like empty ones; they never fall through to generation
        let products = match self.catalog.search(query, self.search_limit).await {
            Ok(products) => products,
            Err(e) => {
                tracing::warn!("Product search failed, answering as no results: {}", e);
                vec![]
            }
        };

        tracing::info!("Product search returned {} products", products.len());

        if products.is_empty() {
            replies::no_products(query)
        } else {
            replies::product_list(&products)
        }
    }

    async fn generate(&self, message: &str) -> String {
        let prompt = replies::generation_prompt(message);

        match self.generator.generate(&prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                tracing::warn!("Text generation returned no usable candidate");
                replies::CLARIFY.to_string()
            }
            Err(e) => {
                tracing::error!("Text generation failed: {}", e);
                replies::CONNECTION_HICCUP.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::services::ProviderError;
    use async_trait::async_trait;

    struct NoCatalog;

    #[async_trait]
    impl ProductSearch for NoCatalog {
        async fn search(&self, _query: &str, _limit: usize) -> Result<Vec<Product>, ProviderError> {
            Err(ProviderError::ApiError("offline".into()))
        }
    }

    struct NoGenerator;

    #[async_trait]
    impl TextGeneration for NoGenerator {
        async fn generate(&self, _prompt: &str) -> Result<Option<String>, ProviderError> {
            Err(ProviderError::Unauthorized)
        }
    }

    fn dispatcher() -> Dispatcher {
        Dispatcher::new(Arc::new(NoCatalog), Arc::new(NoGenerator), &DispatchSettings::default())
    }

    #[test]
    fn test_plan_order() {
        let d = dispatcher();

        let mut req = ChatRequest::with_measurements("men", 80.0, 175.0);
        req.message = Some("عايز شنطة".to_string());
        assert!(matches!(d.plan(&req), Route::Size { category: "men", .. }));

        let req = ChatRequest::with_message("Any T-SHIRT in red?");
        assert_eq!(d.plan(&req), Route::ProductSearch { query: "Any T-SHIRT in red?" });

        let req = ChatRequest::with_message("ازيك");
        assert_eq!(d.plan(&req), Route::Generate { message: "ازيك" });

        assert_eq!(d.plan(&ChatRequest::default()), Route::Instructions);
    }

    #[test]
    fn test_partial_measurements_fall_through() {
        let d = dispatcher();
        let req = ChatRequest {
            message: Some("bag".to_string()),
            category: Some("men".to_string()),
            weight: Some(80.0),
            height: None,
        };
        assert_eq!(d.plan(&req), Route::ProductSearch { query: "bag" });
    }

    #[test]
    fn test_configured_keywords_are_normalized() {
        let settings = DispatchSettings {
            product_keywords: vec!["  Dress ".to_string(), String::new()],
            search_limit: 5,
        };
        let d = Dispatcher::new(Arc::new(NoCatalog), Arc::new(NoGenerator), &settings);
        assert_eq!(d.plan(&ChatRequest::with_message("summer dress")).name(), "product_search");
        assert_eq!(d.plan(&ChatRequest::with_message("t-shirt")).name(), "generate");
    }

    #[tokio::test]
    async fn test_provider_errors_become_replies() {
        let d = dispatcher();

        let reply = d.handle(&ChatRequest::with_message("bag")).await;
        assert_eq!(reply.reply, replies::no_products("bag"));

        let reply = d.handle(&ChatRequest::with_message("hello")).await;
        assert_eq!(reply.reply, replies::CONNECTION_HICCUP);
    }

    #[tokio::test]
    async fn test_size_guidance_reply() {
        let reply = dispatcher()
            .handle(&ChatRequest::with_measurements("women", 120.0, 150.0))
            .await;
        assert_eq!(reply.reply, replies::SIZE_GUIDANCE);
    }
}
