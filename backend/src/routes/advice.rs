use actix_web::{HttpMessage, HttpRequest, HttpResponse, Result, web};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::html;
use crate::{
    error::AppError,
    render::{self, PublishStatus},
    state::{AdviceChannel, AppState},
};

pub const NO_ADVICE: &str = "No advice available at the moment";
pub const NO_ADVICE_PROVIDED: &str = "No advice provided";

#[derive(Deserialize)]
pub struct UserInputForm {
    #[serde(default)]
    pub user_input: String,
}

#[derive(Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[actix_web::get("/")]
pub async fn index() -> HttpResponse {
    html(render::index_page())
}

#[actix_web::post("/echo_user_input")]
pub async fn echo_user_input(
    state: web::Data<AppState>,
    form: web::Form<UserInputForm>,
) -> Result<HttpResponse> {
    let name = &form.user_input;

    let page = match &state.channel {
        AdviceChannel::Queue { requests, .. } => {
            let status = match requests.send(name).await {
                Ok(message_id) => {
                    info!("Queued advice request {}", message_id);
                    PublishStatus::Sent
                }
                Err(e) => {
                    error!("Failed to queue advice request: {}", e);
                    PublishStatus::Failed
                }
            };
            render::waiting_page(name, status)
        }
        AdviceChannel::Api(source) => match source.random_advice().await {
            Ok(advice) => render::advice_page(name, Some(&advice)),
            Err(e) => {
                error!("Failed to fetch advice: {}", e);
                render::advice_page(name, None)
            }
        },
    };

    Ok(html(page))
}

fn no_advice() -> HttpResponse {
    HttpResponse::NotFound().json(MessageResponse {
        message: NO_ADVICE.to_string(),
    })
}

#[actix_web::get("/get_advice")]
pub async fn get_advice(state: web::Data<AppState>) -> Result<HttpResponse> {
    let AdviceChannel::Queue {
        responses, wait, ..
    } = &state.channel
    else {
        warn!("/get_advice called without a response queue");
        return Ok(no_advice());
    };

    let message = match responses.receive(*wait).await {
        Ok(Some(message)) => message,
        Ok(None) => {
            info!("No advice waiting on the response queue");
            return Ok(no_advice());
        }
        Err(e) => {
            error!("Failed to poll the response queue: {}", e);
            return Ok(no_advice());
        }
    };

    if let Err(e) = responses.delete(&message.receipt_handle).await {
        error!("Failed to delete consumed advice: {}", e);
    }

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: message.body,
    }))
}

/// Mirrors JavaScript-style truthiness, which is what producers posting
/// here expect.
fn is_provided(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Accepts advice pushed by an external producer and echoes it back.
#[actix_web::post("/receive_advice")]
pub async fn receive_advice(
    req: HttpRequest,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let content_type = req.content_type();
    let is_json = content_type == "application/json"
        || (content_type.starts_with("application/") && content_type.ends_with("+json"));
    if !is_json {
        return Err(AppError::NotJson(content_type.to_string()));
    }

    let payload: Value = serde_json::from_slice(&body)?;
    let Value::Object(mut fields) = payload else {
        return Err(AppError::NotAnObject);
    };

    match fields.remove("advice").filter(is_provided) {
        Some(advice) => {
            info!("Received advice from producer");
            Ok(HttpResponse::Ok().json(serde_json::json!({ "message": advice })))
        }
        None => Ok(HttpResponse::BadRequest().json(MessageResponse {
            message: NO_ADVICE_PROVIDED.to_string(),
        })),
    }
}
