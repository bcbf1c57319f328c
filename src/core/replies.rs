//! Fixed reply texts and formatting for each dispatch route.

use crate::models::Product;

pub const LIVENESS: &str = "سيلا شغالة ✅";

pub const SIZE_GUIDANCE: &str = "برجاء التأكد من الوزن والطول لتحديد المقاس بدقة 😊";

pub const CLARIFY: &str = "معلش ممكن توضحلي أكتر؟ 😊";

pub const CONNECTION_HICCUP: &str = "فيه مشكلة بسيطة في الاتصال، جرب تاني بعد لحظات 💬";

pub const INSTRUCTIONS: &str = "ابعتلي سؤالك في \"message\"، أو ابعت \"category\" (men أو women) مع \"weight\" بالكيلو و\"height\" بالسنتيمتر وأنا أقترحلك المقاس المناسب 😊";

pub fn size_suggestion(label: &str) -> String {
    format!("المقاس الأنسب ليك هو {} 👗", label)
}

pub fn product_line(product: &Product) -> String {
    format!(
        "🛍️ {} - {} ج.م [رابط المنتج]({})",
        product.name, product.price, product.permalink
    )
}

pub fn product_list(products: &[Product]) -> String {
    products
        .iter()
        .map(product_line)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn no_products(query: &str) -> String {
    format!("ملقتش منتجات مطابقة لـ \"{}\" دلوقتي، جرب كلمة تانية 🛍️", query)
}

/// Prompt sent to the text generation provider
pub fn generation_prompt(message: &str) -> String {
    format!(
        "المستخدم قال: \"{}\"\nرد بأسلوب مصري مهذب وودود، وحاول توضح لو تقدر تساعده في المقاسات أو المنتجات.",
        message
    )
}
