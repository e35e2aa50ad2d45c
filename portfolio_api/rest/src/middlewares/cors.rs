use anyhow::Context;
use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Allow browsers on `allowed_origins` to post the contact form.
pub fn layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let allow_origin = if allowed_origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        let origins = allowed_origins
            .iter()
            .map(|origin| {
                HeaderValue::from_str(origin)
                    .with_context(|| format!("Invalid allowed origin {origin:?}"))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        AllowOrigin::list(origins)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST])
        .allow_headers([CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_origin() {
        let result = layer(&["https://example.com\n".into()]);
        assert!(result.is_err());
    }

    #[test]
    fn valid_origins() {
        layer(&["*".into()]).unwrap();
        layer(&["https://example.com".into(), "http://localhost:8080".into()]).unwrap();
    }
}
