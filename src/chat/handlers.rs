use actix_web::http::header::ContentDisposition;
use actix_web::{web, HttpResponse, Responder};

use crate::conversation::InputCollector;
use crate::documents::renderer::RenderError;
use crate::documents::{DocumentError, DocumentRequest, Generator};
use crate::ErrorResponse;

use super::models::{ChatResponse, FileContent, MessageRequest};
use super::AppState;

#[utoipa::path(
    post,
    path = "/api/documents",
    tag = "Documents",
    request_body = DocumentRequest,
    responses(
        (status = 200, description = "Rendered PDF", body = [u8], content_type = "application/pdf"),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 500, description = "Rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_document(
    state: web::Data<AppState>,
    request: web::Json<DocumentRequest>,
) -> impl Responder {
    let request = request.into_inner();
    let service = state.documents.clone();
    let result = match web::block(move || service.generate(request)).await {
        Ok(result) => result,
        Err(e) => {
            log::error!("Document worker failed: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Document worker failed"));
        }
    };

    match result {
        Ok(document) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(ContentDisposition::attachment(document.filename))
            .body(document.pdf),
        Err(DocumentError::Invalid(message)) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&message))
        }
        Err(DocumentError::Render(RenderError::UnsupportedCharacter(ch))) => {
            HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
                "Il carattere {:?} non è stampabile",
                ch
            )))
        }
        Err(e) => {
            log::error!("Failed to generate document: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::internal_error(&e.to_string()))
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/chat/{chat_id}/messages",
    tag = "Chat",
    request_body = MessageRequest,
    params(
        ("chat_id" = String, Path, description = "Conversation identifier assigned by the transport")
    ),
    responses(
        (status = 200, description = "Next state, reply and optional document", body = ChatResponse),
        (status = 500, description = "Conversation worker failed", body = ErrorResponse)
    )
)]
pub async fn post_message(
    state: web::Data<AppState>,
    path: web::Path<String>,
    message: web::Json<MessageRequest>,
) -> impl Responder {
    let chat_id = path.into_inner();
    let service = state.documents.clone();
    let collector = state
        .sessions
        .get_or_create(&chat_id, move || InputCollector::new(service));

    let text = message.into_inner().text;
    let outcome = match web::block(move || collector.lock().handle(&text)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            log::error!("Conversation worker failed for chat {}: {}", chat_id, e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error("Conversation worker failed"));
        }
    };

    HttpResponse::Ok().json(ChatResponse {
        chat_id,
        state: outcome.state,
        reply: outcome.prompt,
        document: outcome.document.map(FileContent::from),
    })
}

#[utoipa::path(
    delete,
    path = "/api/chat/{chat_id}",
    tag = "Chat",
    params(
        ("chat_id" = String, Path, description = "Conversation identifier assigned by the transport")
    ),
    responses(
        (status = 204, description = "Session discarded"),
        (status = 404, description = "No such session", body = ErrorResponse)
    )
)]
pub async fn delete_session(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let chat_id = path.into_inner();
    if state.sessions.remove(&chat_id) {
        log::info!("Chat session {} discarded", chat_id);
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().json(ErrorResponse::not_found(&format!(
            "Chat session '{}' not found",
            chat_id
        )))
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/documents").route(web::post().to(generate_document)))
        .service(web::resource("/chat/{chat_id}/messages").route(web::post().to(post_message)))
        .service(web::resource("/chat/{chat_id}").route(web::delete().to(delete_session)));
}
