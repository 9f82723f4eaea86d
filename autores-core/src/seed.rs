//! Records the service starts with.

use serde_json::{Map, Value, json};

use crate::model::Author;

/// Jorge Luis Borges with "Ficciones" and "El Aleph".
pub fn borges() -> Author {
    record(json!({
        "id": 1,
        "nombre": "Jorge Luis",
        "apellido": "Borges",
        "fechaDeNacimiento": "24/08/1899",
        "libros": [
            {
                "id": 1,
                "titulo": "Ficciones",
                "descripcion": "Se trata de uno de sus más...",
                "anioPublicacion": 1944
            },
            {
                "id": 2,
                "titulo": "El Aleph",
                "descripcion": "otra recopilación de cuentos...",
                "anioPublicacion": 1949
            }
        ]
    }))
}

/// The full startup collection.
pub fn authors() -> Vec<Author> {
    vec![borges()]
}

fn record(value: Value) -> Author {
    match value {
        Value::Object(fields) => Author::from(fields),
        _ => Author::from(Map::new()),
    }
}
