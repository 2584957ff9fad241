use tower_http::limit::RequestBodyLimitLayer;

/// Editor payloads are small JSON documents.
pub const MAX_BODY_BYTES: usize = 256 * 1024;

pub fn body_limit_layer() -> RequestBodyLimitLayer {
    RequestBodyLimitLayer::new(MAX_BODY_BYTES)
}
