use actix_web::{HttpRequest, HttpResponse, http, web};
use chrono::Utc;
use validator::Validate;

use crate::errors::ShortenError;
use crate::models::click::{ClickEvent, ClickGeo};
use crate::state::app_state::AppState;
use crate::structs::url_request::{ShortenRequest, ShortenResponse, StatsResponse};
use crate::utils::obfuscate::obfuscate_ip;

/// Create a shortened URL
pub async fn create_short_url(
    app_state: web::Data<AppState>,
    web::Json(req): web::Json<ShortenRequest>,
) -> Result<HttpResponse, ShortenError> {
    // Surface validation first; the allocator re-checks everything
    // defensively.
    if req.validate().is_err() {
        return Err(ShortenError::InvalidUrl(req.url.clone()));
    }

    let record = app_state.allocator.allocate(
        &req.url,
        req.validity,
        req.shortcode.as_deref(),
        Utc::now(),
    )?;

    log::info!(
        "shorturl.created shortcode={} url={} expiry={}",
        record.shortcode,
        record.target_url,
        record.expiry_at
    );

    let response = ShortenResponse {
        short_link: format!("{}/{}", app_state.base_url, record.shortcode),
        expiry: record.expiry_at,
    };

    Ok(HttpResponse::Created().json(response))
}

/// Redirect to the target URL, recording one click on the way out.
pub async fn redirect_to_url(
    app_state: web::Data<AppState>,
    req: HttpRequest,
    path: web::Path<String>,
) -> Result<HttpResponse, ShortenError> {
    let code = path.into_inner();

    let record = app_state
        .store
        .get(&code)
        .ok_or_else(|| ShortenError::NotFound(code.clone()))?;

    if record.is_expired_at(Utc::now()) {
        return Err(ShortenError::Expired(code));
    }

    // Get visitor's IP address; obfuscation never blocks the redirect.
    let ip = req
        .connection_info()
        .realip_remote_addr()
        .unwrap_or("")
        .to_string();
    let obfuscated = obfuscate_ip(&ip, &app_state.ip_salt);

    let referrer = header_string(&req, http::header::REFERER.as_str());

    let geo = ClickGeo {
        country: header_string(&req, "x-geo-country"),
        region: header_string(&req, "x-geo-region"),
        city: header_string(&req, "x-geo-city"),
        ip_prefix: obfuscated.ip_prefix,
        ip_hash: obfuscated.ip_hash,
    };

    let click = ClickEvent::new(Utc::now(), referrer.clone(), geo);

    // Records are never removed, so this only fails if the code vanished
    // out from under us.
    app_state
        .store
        .append_click(&code, click)
        .map_err(|_| ShortenError::NotFound(code.clone()))?;

    log::info!(
        "shorturl.click shortcode={} referrer={}",
        code,
        referrer.as_deref().unwrap_or("-")
    );

    Ok(HttpResponse::Found()
        .append_header((http::header::LOCATION, record.target_url))
        .finish())
}

/// Full record projection for a shortcode; expired records stay
/// inspectable.
pub async fn get_url_stats(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ShortenError> {
    let code = path.into_inner();

    let record = app_state
        .store
        .get(&code)
        .ok_or_else(|| ShortenError::NotFound(code.clone()))?;

    let response = StatsResponse {
        shortcode: record.shortcode,
        original_url: record.target_url,
        created_at: record.created_at,
        expiry: record.expiry_at,
        total_clicks: record.clicks.len(),
        clicks: record.clicks,
    };

    Ok(HttpResponse::Ok().json(response))
}

fn header_string(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use chrono::Duration;

    use super::*;
    use crate::models::url::ShortLinkRecord;
    use crate::routes::init_routes;
    use crate::services::allocator::Allocator;
    use crate::store::ShortLinkStore;
    use crate::store::memory::MemoryLinkStore;
    use crate::utils::codegen::RandomCodeGenerator;

    fn test_state() -> web::Data<AppState> {
        let store: Arc<dyn ShortLinkStore> = Arc::new(MemoryLinkStore::new());
        let allocator = Allocator::new(store.clone(), Arc::new(RandomCodeGenerator));
        web::Data::new(AppState {
            store,
            allocator,
            base_url: "http://localhost:3000".to_string(),
            ip_salt: "test-salt".to_string(),
        })
    }

    #[actix_web::test]
    async fn create_then_redirect_records_one_click() {
        let state = test_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/shorturls")
            .set_json(serde_json::json!({ "url": "https://example.com", "validity": 1 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        let short_link = body["shortLink"].as_str().unwrap();
        let code = short_link.rsplit('/').next().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/{}", code))
            .insert_header((http::header::REFERER, "https://ref.example"))
            .peer_addr("203.0.113.7:41000".parse().unwrap())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FOUND);
        assert_eq!(
            resp.headers().get(http::header::LOCATION).unwrap(),
            "https://example.com"
        );

        let record = state.store.get(&code).unwrap();
        assert_eq!(record.clicks.len(), 1);
        assert_eq!(
            record.clicks[0].referrer.as_deref(),
            Some("https://ref.example")
        );
        assert_eq!(record.clicks[0].geo.ip_prefix, "203.0.x.x");
    }

    #[actix_web::test]
    async fn expired_link_is_gone_and_records_nothing() {
        let state = test_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        // A record whose one-minute validity lapsed two minutes ago.
        let record = ShortLinkRecord::new(
            "lapsed1".to_string(),
            "https://example.com".to_string(),
            1,
            Utc::now() - Duration::minutes(2),
        );
        state.store.insert(record).unwrap();

        let req = test::TestRequest::get().uri("/lapsed1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::GONE);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "EXPIRED");
        assert_eq!(state.store.get("lapsed1").unwrap().clicks.len(), 0);
    }

    #[actix_web::test]
    async fn unknown_shortcode_is_not_found() {
        let state = test_state();
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        for uri in ["/missing1", "/shorturls/missing1"] {
            let req = test::TestRequest::get().uri(uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], "NOT_FOUND");
        }
    }

    #[actix_web::test]
    async fn requested_shortcode_conflict_is_reported() {
        let state = test_state();
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let payload = serde_json::json!({ "url": "https://example.com", "shortcode": "mycode1" });
        let req = test::TestRequest::post()
            .uri("/shorturls")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/shorturls")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "SHORTCODE_TAKEN");
    }

    #[actix_web::test]
    async fn invalid_inputs_are_rejected() {
        let state = test_state();
        let app = test::init_service(App::new().app_data(state).configure(init_routes)).await;

        let cases = [
            (serde_json::json!({ "url": "notaurl" }), "INVALID_URL"),
            (
                serde_json::json!({ "url": "https://example.com", "validity": 0 }),
                "INVALID_VALIDITY",
            ),
            (
                serde_json::json!({ "url": "https://example.com", "shortcode": "x" }),
                "INVALID_SHORTCODE",
            ),
        ];

        for (payload, expected) in cases {
            let req = test::TestRequest::post()
                .uri("/shorturls")
                .set_json(payload)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], expected);
        }
    }

    #[actix_web::test]
    async fn stats_expose_clicks_but_never_the_raw_address() {
        let state = test_state();
        let app =
            test::init_service(App::new().app_data(state.clone()).configure(init_routes)).await;

        let req = test::TestRequest::post()
            .uri("/shorturls")
            .set_json(serde_json::json!({ "url": "https://example.com", "shortcode": "stats01" }))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get()
            .uri("/stats01")
            .insert_header(("x-geo-country", "DE"))
            .peer_addr("203.0.113.7:41000".parse().unwrap())
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::get().uri("/shorturls/stats01").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["shortcode"], "stats01");
        assert_eq!(body["originalUrl"], "https://example.com");
        assert_eq!(body["totalClicks"], 1);
        assert_eq!(body["clicks"][0]["geo"]["country"], "DE");
        assert_eq!(body["clicks"][0]["geo"]["ipPrefix"], "203.0.x.x");
        assert_eq!(body["clicks"][0]["geo"]["ipHash"].as_str().unwrap().len(), 16);
        assert!(!body.to_string().contains("203.0.113.7"));
    }
}
