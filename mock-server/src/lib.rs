use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub id: Uuid,
    pub name: String,
}

#[derive(Deserialize)]
pub struct PersonInput {
    pub name: String,
}

pub type Db = Arc<RwLock<HashMap<Uuid, Person>>>;

/// Routes with one response shape each: JSON bodies, a bodiless 201 with
/// `Location`, a 204 that still declares a content type, and a 202 with a
/// JSON body. Axum answers `HEAD` on every `GET` route.
pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/home", get(home))
        .route("/people", get(list_people).post(create_person))
        .route(
            "/people/{id}",
            get(get_person).put(replace_person).delete(delete_person),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "mock server listening");
    }
    axum::serve(listener, app()).await
}

async fn home() -> Json<serde_json::Value> {
    Json(json!({ "hello": "world" }))
}

async fn list_people(State(db): State<Db>) -> Json<Vec<Person>> {
    let people = db.read().await;
    Json(people.values().cloned().collect())
}

async fn create_person(
    State(db): State<Db>,
    Json(input): Json<PersonInput>,
) -> impl IntoResponse {
    let person = Person {
        id: Uuid::new_v4(),
        name: input.name,
    };
    let location = format!("/people/{}", person.id);
    db.write().await.insert(person.id, person);
    tracing::debug!(%location, "created person");
    (StatusCode::CREATED, [(header::LOCATION, location)])
}

async fn get_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<Json<Person>, StatusCode> {
    let people = db.read().await;
    people.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn replace_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
    Json(input): Json<PersonInput>,
) -> Result<impl IntoResponse, StatusCode> {
    let mut people = db.write().await;
    let person = people.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    person.name = input.name;
    Ok((
        StatusCode::NO_CONTENT,
        [(header::CONTENT_TYPE, "application/json")],
    ))
}

async fn delete_person(
    State(db): State<Db>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, StatusCode> {
    let mut people = db.write().await;
    people.remove(&id).ok_or(StatusCode::NOT_FOUND)?;
    Ok((StatusCode::ACCEPTED, Json(json!({ "result": "pending" }))))
}
