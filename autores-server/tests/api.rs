use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use autores_core::{seed, store::AuthorStore};
use autores_memory::InMemoryBackend;
use autores_server::router;

fn app() -> Router {
    router(Arc::new(AuthorStore::new(InMemoryBackend::with_authors(seed::authors()))))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn cortazar() -> Value {
    json!({
        "id": 2,
        "nombre": "Julio",
        "apellido": "Cortázar",
        "fechaDeNacimiento": "26/08/1914",
        "libros": [
            { "id": 1, "titulo": "Rayuela", "descripcion": "novela", "anioPublicacion": 1963 }
        ]
    })
}

#[tokio::test]
async fn health_check_answers_ok() {
    let (status, body) = send(&app(), "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn lists_seeded_authors() {
    let (status, body) = send(&app(), "GET", "/autores", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["apellido"], "Borges");
    assert_eq!(body[0]["libros"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn empty_collection_lists_as_empty_array() {
    let app = router(Arc::new(AuthorStore::new(InMemoryBackend::new())));

    let (status, body) = send(&app, "GET", "/autores", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn created_author_reads_back_identical() {
    let app = app();

    let (status, created) = send(&app, "POST", "/autores", Some(cortazar())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, cortazar());

    let (status, fetched) = send(&app, "GET", "/autores/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, cortazar());
}

#[tokio::test]
async fn duplicate_author_conflicts_and_adds_nothing() {
    let app = app();

    let (status, _) = send(&app, "POST", "/autores", Some(cortazar())).await;
    assert_eq!(status, StatusCode::CREATED);

    let mut again = cortazar();
    again["id"] = json!(3);
    let (status, body) = send(&app, "POST", "/autores", Some(again)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "El autor Julio Cortázar ya existe");

    let (_, list) = send(&app, "GET", "/autores", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn author_missing_fields_is_bad_request() {
    let (status, body) = send(
        &app(),
        "POST",
        "/autores",
        Some(json!({ "id": 5, "nombre": "Silvina", "apellido": "Ocampo" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Faltan datos del autor: fechaDeNacimiento, libros");
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/autores")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ nombre: "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_author_is_not_found() {
    let (status, body) = send(&app(), "GET", "/autores/99", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("No se encontró el autor"));
}

#[tokio::test]
async fn put_author_replaces_whole_record_idempotently() {
    let app = app();
    let record = json!({
        "id": 1,
        "nombre": "Jorge Luis",
        "apellido": "Borges",
        "fechaDeNacimiento": "24/08/1899",
        "libros": []
    });

    let (status, first) = send(&app, "PUT", "/autores/1", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first, record);

    let (status, second) = send(&app, "PUT", "/autores/1", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second, first);

    let (_, stored) = send(&app, "GET", "/autores/1", None).await;
    assert_eq!(stored, record);
}

#[tokio::test]
async fn put_unknown_author_is_not_found() {
    let (status, _) = send(&app(), "PUT", "/autores/99", Some(cortazar())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_author_then_get_is_not_found() {
    let app = app();

    let (status, body) = send(&app, "DELETE", "/autores/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send(&app, "GET", "/autores/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/autores/1/libros", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/autores/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn book_routes_under_unknown_author_are_not_found() {
    let app = app();
    let book = json!({ "id": 9, "titulo": "x", "descripcion": "x", "anioPublicacion": 2000 });

    let cases = [
        ("GET", "/autores/99/libros", None),
        ("POST", "/autores/99/libros", Some(book.clone())),
        ("POST", "/autores/99/libros", Some(json!({}))),
        ("GET", "/autores/99/libros/1", None),
        ("PUT", "/autores/99/libros/1", Some(book.clone())),
        ("DELETE", "/autores/99/libros/1", None),
    ];

    for (method, uri, body) in cases {
        let (status, _) = send(&app, method, uri, body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
    }
}

#[tokio::test]
async fn seeded_book_scenario() {
    let app = app();

    let (status, aleph) = send(&app, "GET", "/autores/1/libros/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aleph["id"], 2);
    assert_eq!(aleph["titulo"], "El Aleph");
    assert_eq!(aleph["anioPublicacion"], 1949);

    let (status, body) = send(
        &app,
        "POST",
        "/autores/1/libros",
        Some(json!({ "id": 3, "titulo": "El Aleph", "descripcion": "x", "anioPublicacion": 1949 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "El libro El Aleph ya existe");

    let (status, _) = send(&app, "DELETE", "/autores/1/libros/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, libros) = send(&app, "GET", "/autores/1/libros", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(libros.as_array().unwrap().len(), 1);
    assert_eq!(libros[0]["titulo"], "El Aleph");

    let (status, _) = send(&app, "GET", "/autores/99", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_book_then_fetch_it() {
    let app = app();
    let book = json!({
        "id": 3,
        "titulo": "El libro de arena",
        "descripcion": "cuentos",
        "anioPublicacion": 1975
    });

    let (status, created) = send(&app, "POST", "/autores/1/libros", Some(book.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, book);

    let (status, fetched) = send(&app, "GET", "/autores/1/libros/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, book);
}

#[tokio::test]
async fn create_book_accepts_year_zero_but_not_missing_fields() {
    let app = app();

    let (status, _) = send(
        &app,
        "POST",
        "/autores/1/libros",
        Some(json!({ "id": 4, "titulo": "Apócrifo", "descripcion": "x", "anioPublicacion": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(
        &app,
        "POST",
        "/autores/1/libros",
        Some(json!({ "id": 5, "titulo": "Sin año", "descripcion": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Faltan datos del libro: descripcion, anioPublicacion");
}

#[tokio::test]
async fn put_book_replaces_only_that_book() {
    let app = app();
    let record = json!({
        "id": 2,
        "titulo": "El Aleph",
        "descripcion": "edición definitiva",
        "anioPublicacion": 1952
    });

    let (status, replaced) = send(&app, "PUT", "/autores/1/libros/2", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, record);

    let (_, libros) = send(&app, "GET", "/autores/1/libros", None).await;
    assert_eq!(libros[0]["titulo"], "Ficciones");
    assert_eq!(libros[1], record);
}

#[tokio::test]
async fn book_routes_with_unknown_book_are_not_found() {
    let app = app();
    let record = json!({ "id": 9, "titulo": "x", "descripcion": "x", "anioPublicacion": 1 });

    let (status, _) = send(&app, "GET", "/autores/1/libros/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "PUT", "/autores/1/libros/9", Some(record)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(&app, "DELETE", "/autores/1/libros/9", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("No se encontró el libro"));
}

#[tokio::test]
async fn book_mutations_in_second_author_leave_first_untouched() {
    let app = app();

    let (status, _) = send(&app, "POST", "/autores", Some(cortazar())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(&app, "DELETE", "/autores/2/libros/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, borges) = send(&app, "GET", "/autores/1/libros", None).await;
    assert_eq!(borges.as_array().unwrap().len(), 2);

    let (_, cortazar) = send(&app, "GET", "/autores/2/libros", None).await;
    assert_eq!(cortazar, json!([]));
}

#[tokio::test]
async fn put_author_stores_the_body_without_rechecking_fields() {
    let app = app();
    let record = json!({
        "id": 1,
        "nombre": "X",
        "apellido": "Y",
        "fechaDeNacimiento": "1/1/1900"
    });

    let (status, replaced) = send(&app, "PUT", "/autores/1", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, record);

    let (status, stored) = send(&app, "GET", "/autores/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stored, record);

    let (status, libros) = send(&app, "GET", "/autores/1/libros", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(libros, json!([]));
}

#[tokio::test]
async fn put_author_keeps_unknown_keys() {
    let app = app();
    let mut record = cortazar();
    record["id"] = json!(1);
    record["pais"] = json!("AR");

    let (status, replaced) = send(&app, "PUT", "/autores/1", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["pais"], "AR");

    let (_, stored) = send(&app, "GET", "/autores/1", None).await;
    assert_eq!(stored, record);
}

#[tokio::test]
async fn put_book_accepts_a_partial_record() {
    let app = app();
    let record = json!({ "id": 2, "titulo": "El Aleph" });

    let (status, replaced) = send(&app, "PUT", "/autores/1/libros/2", Some(record.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced, record);

    let (_, stored) = send(&app, "GET", "/autores/1/libros/2", None).await;
    assert_eq!(stored, record);
}

#[tokio::test]
async fn put_with_a_non_object_body_is_bad_request() {
    let (status, body) = send(&app(), "PUT", "/autores/1/libros/2", Some(json!([1, 2]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Datos inválidos: el libro debe ser un objeto JSON");
}

#[tokio::test]
async fn create_book_accepts_a_year_given_as_text() {
    let app = app();
    let book = json!({ "id": 5, "titulo": "T", "descripcion": "d", "anioPublicacion": "1949" });

    let (status, created) = send(&app, "POST", "/autores/1/libros", Some(book.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, book);

    let (_, fetched) = send(&app, "GET", "/autores/1/libros/5", None).await;
    assert_eq!(fetched["anioPublicacion"], "1949");
}

#[tokio::test]
async fn create_author_accepts_partial_nested_books() {
    let app = app();
    let author = json!({
        "id": 7,
        "nombre": "X",
        "apellido": "Y",
        "fechaDeNacimiento": "1/1/1900",
        "libros": [{ "id": 1, "titulo": "z" }]
    });

    let (status, created) = send(&app, "POST", "/autores", Some(author.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, author);

    let (status, book) = send(&app, "GET", "/autores/7/libros/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(book, json!({ "id": 1, "titulo": "z" }));
}

#[tokio::test]
async fn path_ids_match_regardless_of_form() {
    let app = app();

    let (status, borges) = send(&app, "GET", "/autores/01", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(borges["apellido"], "Borges");

    let (status, aleph) = send(&app, "GET", "/autores/1/libros/02", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(aleph["titulo"], "El Aleph");

    let mut text_id = cortazar();
    text_id["id"] = json!("3");
    let (status, _) = send(&app, "POST", "/autores", Some(text_id.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, fetched) = send(&app, "GET", "/autores/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, text_id);
    assert_eq!(fetched["id"], "3");
}
