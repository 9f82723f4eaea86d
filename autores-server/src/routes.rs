//! HTTP routes for authors and their books.
//!
//! | Route | Methods |
//! |---|---|
//! | `/autores` | GET, POST |
//! | `/autores/:id` | GET, PUT, DELETE |
//! | `/autores/:id/libros` | GET, POST |
//! | `/autores/:id/libros/:idLibro` | GET, PUT, DELETE |
//! | `/health` | GET |

use axum::{
    Json, Router,
    extract::{Path, Request, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info_span;
use uuid::Uuid;

use autores_core::{
    backend::AuthorBackend,
    model::{Author, Book},
    store::AuthorStore,
};

use crate::error::ApiResult;

/// Store handle shared by every handler.
pub type SharedStore<B> = Arc<AuthorStore<B>>;

/// Builds the application router over a shared store.
pub fn router<B>(store: SharedStore<B>) -> Router
where
    B: AuthorBackend + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/autores", get(list_authors::<B>).post(create_author::<B>))
        .route(
            "/autores/:id",
            get(get_author::<B>)
                .put(replace_author::<B>)
                .delete(delete_author::<B>),
        )
        .route(
            "/autores/:id/libros",
            get(list_books::<B>).post(create_book::<B>),
        )
        .route(
            "/autores/:id/libros/:idLibro",
            get(get_book::<B>)
                .put(replace_book::<B>)
                .delete(delete_book::<B>),
        )
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            info_span!(
                "http_request",
                request_id = %Uuid::new_v4(),
                http.method = %request.method(),
                http.target = %request.uri().path(),
            )
        }))
        .with_state(store)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn list_authors<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
) -> ApiResult<Json<Vec<Author>>> {
    Ok(Json(store.list_authors().await?))
}

async fn create_author<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Author>)> {
    let Json(payload) = payload?;
    let author = store.create_author(payload).await?;

    Ok((StatusCode::CREATED, Json(author)))
}

async fn get_author<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Author>> {
    Ok(Json(store.get_author(&id).await?))
}

async fn replace_author<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Author>> {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            store.get_author(&id).await?;
            return Err(rejection.into());
        }
    };

    Ok(Json(store.replace_author(&id, payload).await?))
}

async fn delete_author<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    store.delete_author(&id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn list_books<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Book>>> {
    Ok(Json(store.books(&id).list().await?))
}

async fn create_book<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Book>)> {
    let books = store.books(&id);

    // An unknown author answers 404 even when the body is unreadable.
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            books.list().await?;
            return Err(rejection.into());
        }
    };

    let book = books.create(payload).await?;

    Ok((StatusCode::CREATED, Json(book)))
}

async fn get_book<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path((id, book_id)): Path<(String, String)>,
) -> ApiResult<Json<Book>> {
    Ok(Json(store.books(&id).get(&book_id).await?))
}

async fn replace_book<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path((id, book_id)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<Book>> {
    let books = store.books(&id);

    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            books.get(&book_id).await?;
            return Err(rejection.into());
        }
    };

    Ok(Json(books.replace(&book_id, payload).await?))
}

async fn delete_book<B: AuthorBackend + 'static>(
    State(store): State<SharedStore<B>>,
    Path((id, book_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    store.books(&id).delete(&book_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
