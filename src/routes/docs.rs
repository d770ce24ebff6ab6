use actix_web::{get, HttpResponse};
use serde::Serialize;

#[derive(Serialize)]
struct Endpoint {
    path: &'static str,
    methods: &'static [&'static str],
    permission: &'static str,
    pagination: Option<&'static str>,
}

const ENDPOINTS: &[Endpoint] = &[
    Endpoint { path: "/api/auth/register", methods: &["POST"], permission: "open", pagination: None },
    Endpoint { path: "/api/auth/login", methods: &["POST"], permission: "open", pagination: None },
    Endpoint { path: "/api/auth/me", methods: &["GET"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/auth/change-password", methods: &["POST"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/users", methods: &["GET", "POST"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/users/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/profiles", methods: &["GET", "POST"], permission: "authenticated", pagination: Some("standard") },
    Endpoint { path: "/api/profiles/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/portfolios", methods: &["GET", "POST"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/portfolios/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/portfolios/{id}/valuation", methods: &["GET"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/stocks", methods: &["GET", "POST"], permission: "authenticated", pagination: Some("standard") },
    Endpoint { path: "/api/stocks/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/etfs", methods: &["GET", "POST"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/etfs/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/cryptocurrencies", methods: &["GET", "POST"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/cryptocurrencies/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/trades", methods: &["GET", "POST"], permission: "authenticated", pagination: Some("large") },
    Endpoint { path: "/api/trades/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "authenticated", pagination: None },
    Endpoint { path: "/api/posts", methods: &["GET", "POST"], permission: "admin", pagination: None },
    Endpoint { path: "/api/posts/{id}", methods: &["GET", "PUT", "PATCH", "DELETE"], permission: "admin", pagination: None },
    Endpoint { path: "/api/faqs", methods: &["GET"], permission: "open", pagination: None },
    Endpoint { path: "/api/faqs/{id}", methods: &["GET"], permission: "open", pagination: None },
    Endpoint { path: "/api/admin/faqs", methods: &["POST"], permission: "admin", pagination: None },
    Endpoint { path: "/api/admin/faqs/{id}", methods: &["PUT", "PATCH", "DELETE"], permission: "admin", pagination: None },
    Endpoint { path: "/api/health", methods: &["GET"], permission: "open", pagination: None },
];

/// GET /docs - index des endpoints de l'API
#[get("/docs")]
pub async fn api_docs() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "title": "Investment Portfolio API",
        "version": env!("CARGO_PKG_VERSION"),
        "pagination": {
            "standard": { "page_size": 100, "max_page_size": 1000 },
            "large": { "page_size": 1000, "max_page_size": 10000 },
            "params": ["page", "page_size"]
        },
        "endpoints": ENDPOINTS,
    }))
}
