pub mod coach;
pub mod error;
pub mod sessions;

use crate::state::SharedState;
use axum::{routing::get, Router};

async fn health() -> &'static str {
    "OK"
}

pub fn routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/coach", coach::router(state.clone()))
        .nest("/sessions", sessions::router(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::state::AppState;
    use axum::{
        body::{to_bytes, Body},
        extract::connect_info::MockConnectInfo,
        http::{header, Method, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with_limit(max_requests: usize) -> Router {
        app_with(max_requests, Duration::ZERO)
    }

    fn app_with(max_requests: usize, latency: Duration) -> Router {
        let config = AppConfig {
            simulated_latency: latency,
            rate_limit_max_requests: max_requests,
            ..AppConfig::default()
        };
        let state = Arc::new(AppState::from_config(config));
        routes(state).layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))))
    }

    fn app() -> Router {
        app_with_limit(100)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn intake() -> Value {
        json!({
            "health_goal": "Prevent diabetes with regular screening",
            "work_schedule": "multiple-jobs",
            "budget": "very-tight",
            "family_situation": "young-children",
            "neighborhood": "unsafe-limited",
            "transportation": "public-transit"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_options_lists_every_field() {
        let (status, body) = send(&app(), Method::GET, "/coach/options", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["work_schedule"].as_array().unwrap().len(), 6);
        assert_eq!(body["budget"].as_array().unwrap().len(), 4);
        assert_eq!(body["family_situation"].as_array().unwrap().len(), 5);
        assert_eq!(body["neighborhood"].as_array().unwrap().len(), 5);
        assert_eq!(body["transportation"].as_array().unwrap().len(), 4);
        assert_eq!(body["work_schedule"][0]["id"], "standard-9-5");
    }

    #[tokio::test]
    async fn test_defaults() {
        let (status, body) = send(&app(), Method::GET, "/coach/defaults", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "sleep_score": 70,
                "activity_level": 50,
                "stress_level": 60,
                "heart_rate_variability": 45
            })
        );
    }

    #[tokio::test]
    async fn test_evaluate_returns_side_by_side_plan() {
        let payload = json!({
            "intake": intake(),
            "wearable": {
                "sleep_score": 55,
                "activity_level": 40,
                "stress_level": 75,
                "heart_rate_variability": 30
            }
        });
        let (status, body) = send(&app(), Method::POST, "/coach/evaluate", Some(payload)).await;
        assert_eq!(status, StatusCode::OK);

        let plan = &body["plan"];
        assert_eq!(plan["generic"].as_array().unwrap().len(), 5);
        assert_eq!(plan["principles"].as_array().unwrap().len(), 5);

        let advice = plan["barrier_aware"].as_array().unwrap();
        assert_eq!(advice.len(), 4);
        assert_eq!(advice[0]["category"], "sleep");
        assert_eq!(advice[0]["principle"], "Micro-routines (20 min vs 60 min)");
        assert_eq!(advice[1]["barrier"], "Time poverty + budget constraints");
        assert_eq!(advice[2]["barrier"], "Can't afford therapy or wellness apps");
        assert_eq!(advice[3]["principle"], "Meet people where they are");

        assert_eq!(
            body["comparison"]["generic_shortcomings"].as_array().unwrap().len(),
            5
        );
        assert!(body["evaluated_at"].is_string());
    }

    #[tokio::test]
    async fn test_evaluate_rejects_missing_required_answers() {
        let payload = json!({ "intake": { "health_goal": "Sleep more", "budget": "very-tight" } });
        let (status, body) = send(&app(), Method::POST, "/coach/evaluate", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_intake");
        assert_eq!(body["message"], "work_schedule is required");
    }

    #[tokio::test]
    async fn test_evaluate_rejects_out_of_range_metrics() {
        let payload = json!({
            "intake": intake(),
            "wearable": {
                "sleep_score": 70,
                "activity_level": 50,
                "stress_level": 160,
                "heart_rate_variability": 45
            }
        });
        let (status, body) = send(&app(), Method::POST, "/coach/evaluate", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_wearable");
    }

    #[tokio::test]
    async fn test_evaluate_is_rate_limited() {
        let app = app_with_limit(2);
        let payload = json!({ "intake": intake() });
        for _ in 0..2 {
            let (status, _) = send(&app, Method::POST, "/coach/evaluate", Some(payload.clone())).await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, body) = send(&app, Method::POST, "/coach/evaluate", Some(payload)).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["error"], "rate_limited");

        // Reference data is not limited.
        let (status, _) = send(&app, Method::GET, "/coach/options", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_session_flow() {
        let app = app();
        let (status, created) = send(&app, Method::POST, "/sessions", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["step"], "intake");
        assert_eq!(created["results_available"], false);
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(&app, Method::POST, &format!("/sessions/{id}/continue"), None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_intake");

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/sessions/{id}/step"),
            Some(json!({ "step": "results" })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "results_unavailable");

        let (status, _) = send(&app, Method::PUT, &format!("/sessions/{id}/intake"), Some(intake())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&app, Method::POST, &format!("/sessions/{id}/continue"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "wearable");

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/sessions/{id}/wearable"),
            Some(json!({ "metric": "sleep_score", "value": 40 })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["wearable"]["sleep_score"], 40);

        let (status, body) = send(&app, Method::POST, &format!("/sessions/{id}/plan"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "results");
        assert_eq!(body["results_available"], true);
        assert_eq!(body["plan"]["barrier_aware"][0]["category"], "sleep");

        let (status, body) = send(&app, Method::POST, &format!("/sessions/{id}/reset"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["step"], "intake");
        assert_eq!(body["results_available"], false);
        assert_eq!(body["intake"]["health_goal"], "");
        assert_eq!(body["wearable"]["sleep_score"], 40);

        let (status, _) = send(&app, Method::DELETE, &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, body) = send(&app, Method::GET, &format!("/sessions/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "session_not_found");
    }

    #[tokio::test]
    async fn test_session_wearable_validation() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/sessions", None).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/sessions/{id}/wearable"),
            Some(json!({ "metric": "steps", "value": 10 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_wearable");

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/sessions/{id}/wearable"),
            Some(json!({
                "sleep_score": 101,
                "activity_level": 50,
                "stress_level": 60,
                "heart_rate_variability": 45
            })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_bodies_get_json_errors() {
        let app = app();
        let (_, created) = send(&app, Method::POST, "/sessions", None).await;
        let id = created["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            Method::PATCH,
            &format!("/sessions/{id}/wearable"),
            Some(json!({ "metric": "sleep_score", "value": -5 })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_body");
        assert!(body["message"].is_string());

        let request = Request::builder()
            .method(Method::POST)
            .uri("/coach/evaluate")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "invalid_body");
    }

    #[tokio::test]
    async fn test_reset_during_plan_delay_is_not_overwritten() {
        let app = app_with(100, Duration::from_millis(300));
        let (_, created) = send(&app, Method::POST, "/sessions", None).await;
        let id = created["id"].as_str().unwrap().to_string();
        send(&app, Method::PUT, &format!("/sessions/{id}/intake"), Some(intake())).await;

        let pending = {
            let app = app.clone();
            let uri = format!("/sessions/{id}/plan");
            tokio::spawn(async move { send(&app, Method::POST, &uri, None).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        let (status, _) = send(&app, Method::POST, &format!("/sessions/{id}/reset"), None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = pending.await.unwrap();
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"], "invalid_intake");

        let (_, body) = send(&app, Method::GET, &format!("/sessions/{id}"), None).await;
        assert_eq!(body["step"], "intake");
        assert_eq!(body["intake"]["health_goal"], "");
        assert_eq!(body["results_available"], false);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let uri = format!("/sessions/{}/plan", uuid::Uuid::new_v4());
        let (status, _) = send(&app(), Method::POST, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
