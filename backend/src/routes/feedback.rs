use actix_web::{HttpResponse, Result, http::header::ContentType, web};
use advice::models::{FeedbackKind, FeedbackRecord};
use chrono::Utc;
use log::{error, info};
use serde::Deserialize;

use super::html;
use crate::{render, state::AppState};

#[derive(Deserialize)]
pub struct FeedbackForm {
    pub name: String,
    pub advice: String,
    pub feedback: FeedbackKind,
}

#[actix_web::post("/submit_feedback")]
pub async fn submit_feedback(
    state: web::Data<AppState>,
    form: web::Form<FeedbackForm>,
) -> Result<HttpResponse> {
    let form = form.into_inner();
    let record = FeedbackRecord {
        name: form.name,
        advice: form.advice,
        feedback: form.feedback,
        timestamp: Utc::now(),
    };

    // The user is thanked whether or not the feedback service took it.
    match state.feedback.submit(&record).await {
        Ok(()) => info!("Forwarded {} feedback", record.feedback),
        Err(e) => error!("Failed to forward feedback: {}", e),
    }

    Ok(html(render::thank_you_page(&record.name, record.feedback)))
}

#[actix_web::get("/feedback_analytics")]
pub async fn feedback_analytics(state: web::Data<AppState>) -> Result<HttpResponse> {
    match state.feedback.counts().await {
        Ok(counts) => Ok(html(render::analytics_page(&counts))),
        Err(e) => {
            error!("Failed to load feedback analytics: {}", e);
            Ok(HttpResponse::BadGateway()
                .content_type(ContentType::html())
                .body(render::analytics_unavailable_page()))
        }
    }
}
