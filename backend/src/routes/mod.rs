pub mod advice;
pub mod feedback;

pub use self::advice::*;
pub use self::feedback::*;

use actix_web::{HttpResponse, http::header::ContentType, web};

/// Registers every route. Shared by `main` and the handler tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(echo_user_input)
        .service(get_advice)
        .service(receive_advice)
        .service(submit_feedback)
        .service(feedback_analytics);
}

fn html(page: String) -> HttpResponse {
    HttpResponse::Ok().content_type(ContentType::html()).body(page)
}
