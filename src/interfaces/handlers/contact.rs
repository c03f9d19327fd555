use actix_web::{web, HttpRequest, HttpResponse};
use futures_util::StreamExt;

use crate::{
    constants::MAX_CONTACT_BODY_BYTES,
    entities::contact::ContactForm,
    errors::AppError,
    utils::get_client_ip::get_client_ip,
    AppState,
};

/// `POST /api/contact`
///
/// The body is streamed by hand so the rate limit runs before it is read.
pub async fn create_contact_submission(
    req: HttpRequest,
    state: web::Data<AppState>,
    payload: web::Payload,
) -> Result<HttpResponse, AppError> {
    let client_ip = get_client_ip(&req);

    if !state.rate_limiter.check(&client_ip) {
        tracing::warn!(client_ip = %client_ip, "Contact form throttled");
        return Err(AppError::TooManyRequests(client_ip));
    }

    let body = read_body(payload, MAX_CONTACT_BODY_BYTES).await?;
    let form: ContactForm = serde_json::from_slice(&body)?;

    let response = state.contact_handler.submit(form).await?;

    Ok(HttpResponse::Ok().json(response))
}

async fn read_body(mut payload: web::Payload, limit: usize) -> Result<web::BytesMut, AppError> {
    let mut body = web::BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| AppError::MalformedBody(e.to_string()))?;
        if body.len() + chunk.len() > limit {
            return Err(AppError::PayloadTooLarge(body.len() + chunk.len()));
        }
        body.extend_from_slice(&chunk);
    }

    Ok(body)
}
