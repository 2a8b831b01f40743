use serde::Deserialize;

/// Price in the site's display currency (dollars); converted to the
/// processor's smallest-unit amount at request time.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: f64,
}
