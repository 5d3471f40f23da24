//! In-memory fake of the Freshdesk helpdesk API.
//!
//! Speaks the same envelope wire format as the real service: every reply
//! is `{"status": {...}, "response": <result or error object>}`. Used by
//! the core crate's integration tests and runnable standalone for manual
//! poking.
//!
//! DTOs are defined here independently of the client crate; integration
//! tests catch schema drift between the two.
//!
//! Routing note: the real paths end in `.json` (`/contacts/7.json`), and
//! the router cannot capture a partial segment, so id routes capture the
//! whole segment and the handlers strip the suffix.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Customer {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub domains: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub user: NewUser,
}

#[derive(Default, Deserialize)]
pub struct NewUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateCustomer {
    pub customer: NewCustomer,
}

#[derive(Default, Deserialize)]
pub struct NewCustomer {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub domains: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct ListQuery {
    pub letter: Option<String>,
}

#[derive(Default)]
pub struct Db {
    next_id: u64,
    users: HashMap<u64, User>,
    customers: HashMap<u64, Customer>,
}

impl Db {
    fn next_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

pub type SharedDb = Arc<RwLock<Db>>;

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db::default()));
    Router::new()
        .route("/contacts.json", post(create_contact))
        .route("/contacts/{id}", get(get_contact).delete(delete_contact))
        .route("/customer.json", post(create_customer))
        .route("/customers.json", get(list_customers))
        .route("/customers/{id}", get(get_customer).delete(delete_customer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Wrap a result in the success envelope.
pub fn success(response: Value) -> Json<Value> {
    Json(json!({
        "status": { "code": 0, "message": "OK" },
        "response": response,
        "time_to_process": "0ms",
    }))
}

/// Wrap an error object in the failure envelope.
pub fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    failure_with(status, message, HashMap::new())
}

pub fn failure_with(
    status: StatusCode,
    message: &str,
    more_info: HashMap<String, Vec<String>>,
) -> (StatusCode, Json<Value>) {
    let mut error = json!({
        "error": message,
        "message": message,
        "code": status.as_u16(),
    });
    if !more_info.is_empty() {
        error["more_info"] = json!(more_info);
    }
    (
        status,
        Json(json!({
            "status": { "code": status.as_u16(), "message": message },
            "response": error,
        })),
    )
}

fn parse_id(raw: &str) -> Result<u64, (StatusCode, Json<Value>)> {
    raw.strip_suffix(".json")
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| failure(StatusCode::BAD_REQUEST, "invalid id"))
}

fn required(missing: &mut HashMap<String, Vec<String>>, field: &str, value: &str) {
    if value.is_empty() {
        missing.insert(field.to_string(), vec!["required".to_string()]);
    }
}

async fn create_contact(State(db): State<SharedDb>, Json(input): Json<CreateUser>) -> Reply {
    let mut missing = HashMap::new();
    required(&mut missing, "name", &input.user.name);
    required(&mut missing, "email", &input.user.email);
    if !missing.is_empty() {
        return Err(failure_with(
            StatusCode::BAD_REQUEST,
            "validation failed",
            missing,
        ));
    }
    let mut db = db.write().await;
    let now = Utc::now();
    let user = User {
        id: db.next_id(),
        name: input.user.name,
        email: input.user.email,
        active: true,
        created_at: now,
        updated_at: now,
    };
    db.users.insert(user.id, user.clone());
    Ok(success(json!(user)))
}

async fn get_contact(State(db): State<SharedDb>, Path(id): Path<String>) -> Reply {
    let id = parse_id(&id)?;
    let db = db.read().await;
    db.users
        .get(&id)
        .map(|user| success(json!(user)))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "record not found"))
}

async fn delete_contact(State(db): State<SharedDb>, Path(id): Path<String>) -> Reply {
    let id = parse_id(&id)?;
    let mut db = db.write().await;
    db.users
        .remove(&id)
        .map(|_| success(Value::Null))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "record not found"))
}

async fn create_customer(State(db): State<SharedDb>, Json(input): Json<CreateCustomer>) -> Reply {
    let mut missing = HashMap::new();
    required(&mut missing, "name", &input.customer.name);
    if !missing.is_empty() {
        return Err(failure_with(
            StatusCode::BAD_REQUEST,
            "validation failed",
            missing,
        ));
    }
    let mut db = db.write().await;
    let now = Utc::now();
    let customer = Customer {
        id: db.next_id(),
        name: input.customer.name,
        domains: input.customer.domains,
        description: input.customer.description,
        created_at: now,
        updated_at: now,
    };
    db.customers.insert(customer.id, customer.clone());
    Ok(success(json!(customer)))
}

async fn list_customers(State(db): State<SharedDb>, Query(query): Query<ListQuery>) -> Json<Value> {
    let db = db.read().await;
    let mut customers: Vec<&Customer> = db
        .customers
        .values()
        .filter(|c| query.letter.as_deref().is_none_or(|l| c.name.starts_with(l)))
        .collect();
    customers.sort_by_key(|c| c.id);
    success(json!(customers))
}

async fn get_customer(State(db): State<SharedDb>, Path(id): Path<String>) -> Reply {
    let id = parse_id(&id)?;
    let db = db.read().await;
    db.customers
        .get(&id)
        .map(|customer| success(json!(customer)))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "record not found"))
}

async fn delete_customer(State(db): State<SharedDb>, Path(id): Path<String>) -> Reply {
    let id = parse_id(&id)?;
    let mut db = db.write().await;
    db.customers
        .remove(&id)
        .map(|_| success(Value::Null))
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "record not found"))
}
