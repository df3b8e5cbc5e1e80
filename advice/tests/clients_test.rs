use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, dev::ServerHandle, web};
use advice::{
    AdviceApi, AdviceApiError, AdviceSource, FeedbackClient, FeedbackError, FeedbackSink,
    models::{FeedbackKind, FeedbackRecord},
};
use chrono::Utc;
use serde_json::{Value, json};

type Received = web::Data<Mutex<Vec<Value>>>;

/// Runs a throw-away HTTP server on an ephemeral port and returns its base URL.
fn spawn_server<F>(configure: F) -> (String, ServerHandle)
where
    F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
{
    let server = HttpServer::new(move || App::new().configure(configure.clone()))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    (format!("http://{addr}"), handle)
}

async fn random_advice() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "data": { "quote": "Measure twice, cut once.", "author": "Carpenters" }
    }))
}

async fn record_feedback(received: Received, body: web::Json<Value>) -> HttpResponse {
    received.lock().unwrap().push(body.into_inner());
    HttpResponse::Created().finish()
}

async fn list_feedback() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 1, "name": "Ada", "advice": "a", "feedback": "happy", "timestamp": "2024-01-01T00:00:00Z" },
        { "id": 2, "name": "Bob", "advice": "b", "feedback": "sad", "timestamp": "2024-01-01T00:00:00Z" },
        { "id": 3, "name": "Cy", "advice": "c", "feedback": "happy", "timestamp": "2024-01-01T00:00:00Z" }
    ]))
}

fn record() -> FeedbackRecord {
    FeedbackRecord {
        name: "Ada".to_string(),
        advice: "Be kind".to_string(),
        feedback: FeedbackKind::Happy,
        timestamp: Utc::now(),
    }
}

#[actix_web::test]
async fn advice_api_parses_quote_and_author() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route("/advice/random", web::get().to(random_advice));
    });

    let api = AdviceApi::new(reqwest::Client::new(), format!("{base}/advice/random"));
    let advice = api.random_advice().await.unwrap();

    assert_eq!(advice.quote, "Measure twice, cut once.");
    assert_eq!(advice.author, "Carpenters");
    handle.stop(true).await;
}

#[actix_web::test]
async fn advice_api_reports_non_200_status() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route(
            "/advice/random",
            web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
        );
    });

    let api = AdviceApi::new(reqwest::Client::new(), format!("{base}/advice/random"));
    let err = api.random_advice().await.unwrap_err();

    assert!(matches!(err, AdviceApiError::Status(status) if status.as_u16() == 503));
    handle.stop(true).await;
}

#[actix_web::test]
async fn advice_api_rejects_unexpected_body() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route(
            "/advice/random",
            web::get().to(|| async { HttpResponse::Ok().json(json!({ "slip": "nope" })) }),
        );
    });

    let api = AdviceApi::new(reqwest::Client::new(), format!("{base}/advice/random"));
    let err = api.random_advice().await.unwrap_err();

    assert!(matches!(err, AdviceApiError::Decode(_)));
    handle.stop(true).await;
}

#[actix_web::test]
async fn advice_api_reports_unreachable_host() {
    let api = AdviceApi::new(reqwest::Client::new(), "http://127.0.0.1:1/advice/random");
    let err = api.random_advice().await.unwrap_err();
    assert!(matches!(err, AdviceApiError::Request(_)));
}

#[actix_web::test]
async fn feedback_is_posted_as_json() {
    let received: Received = web::Data::new(Mutex::new(Vec::new()));
    let shared = received.clone();
    let (base, handle) = spawn_server(move |cfg| {
        cfg.app_data(shared.clone())
            .route("/api/v1/feedback", web::post().to(record_feedback));
    });

    let client = FeedbackClient::new(reqwest::Client::new(), &format!("{base}/"));
    assert_eq!(client.endpoint(), format!("{base}/api/v1/feedback"));
    client.submit(&record()).await.unwrap();

    let received = received.lock().unwrap().clone();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0]["name"], "Ada");
    assert_eq!(received[0]["advice"], "Be kind");
    assert_eq!(received[0]["feedback"], "happy");
    assert!(received[0]["timestamp"].is_string());
    handle.stop(true).await;
}

#[actix_web::test]
async fn feedback_rejection_surfaces_status() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route(
            "/api/v1/feedback",
            web::post().to(|| async { HttpResponse::InternalServerError().finish() }),
        );
    });

    let client = FeedbackClient::new(reqwest::Client::new(), &base);
    let err = client.submit(&record()).await.unwrap_err();

    assert!(matches!(err, FeedbackError::Status(status) if status.as_u16() == 500));
    handle.stop(true).await;
}

#[actix_web::test]
async fn feedback_counts_are_tallied_per_kind() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route("/api/v1/feedback", web::get().to(list_feedback));
    });

    let client = FeedbackClient::new(reqwest::Client::new(), &base);
    let counts = client.counts().await.unwrap();

    assert_eq!(counts.happy, 2);
    assert_eq!(counts.neutral, 0);
    assert_eq!(counts.sad, 1);
    assert_eq!(counts.total(), 3);
    handle.stop(true).await;
}

#[actix_web::test]
async fn feedback_counts_skip_unknown_kinds() {
    let (base, handle) = spawn_server(|cfg| {
        cfg.route(
            "/api/v1/feedback",
            web::get().to(|| async {
                HttpResponse::Ok().json(json!([
                    { "feedback": "happy" },
                    { "feedback": "happy" },
                    { "feedback": "Happy" },
                    { "feedback": "ecstatic" },
                    { "feedback": 3 },
                    { "name": "no kind at all" },
                    { "feedback": "neutral" }
                ]))
            }),
        );
    });

    let client = FeedbackClient::new(reqwest::Client::new(), &base);
    let counts = client.counts().await.unwrap();

    assert_eq!(counts.happy, 2);
    assert_eq!(counts.neutral, 1);
    assert_eq!(counts.sad, 0);
    assert_eq!(counts.total(), 3);
    handle.stop(true).await;
}
