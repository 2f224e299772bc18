// In-process customers backend for tests

use axum::{
    extract::{OriginalUri, Path, RawQuery, State},
    http::{header::CONTENT_TYPE, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, put},
    Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Requests for this id fail with a non-JSON 500 body
pub const FAILING_ID: &str = "boom";

const ADDRESS_KEYS: [&str; 5] = ["street", "apartment", "city", "state", "zip_code"];

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Store {
    next_id: u64,
    customers: Vec<Value>,
    requests: Vec<RecordedRequest>,
}

type SharedStore = Arc<Mutex<Store>>;

pub struct MockBackend {
    pub base_url: String,
    store: SharedStore,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self::start_at("", Vec::new()).await
    }

    pub async fn start_with(customers: Vec<Value>) -> Self {
        Self::start_at("", customers).await
    }

    /// Serve the customers routes under `prefix` (e.g. `/api`)
    pub async fn start_at(prefix: &str, customers: Vec<Value>) -> Self {
        let next_id = customers
            .iter()
            .filter_map(|c| c["customer_id"].as_u64())
            .max()
            .unwrap_or(0);

        let store = Arc::new(Mutex::new(Store {
            next_id,
            customers,
            requests: Vec::new(),
        }));

        let routes = Router::new()
            .route("/customers", get(list_handler).post(create_handler))
            .route(
                "/customers/{id}",
                get(retrieve_handler).put(update_handler).delete(delete_handler),
            )
            .route("/customers/{id}/activate", put(activate_handler))
            .route("/customers/{id}/deactivate", put(deactivate_handler));

        let app = if prefix.is_empty() {
            routes
        } else {
            Router::new().nest(prefix, routes)
        };
        let app = app.with_state(Arc::clone(&store));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", addr),
            store,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.store.lock().unwrap().requests.clone()
    }

    pub fn customers(&self) -> Vec<Value> {
        self.store.lock().unwrap().customers.clone()
    }
}

fn record(
    store: &SharedStore,
    method: Method,
    uri: &OriginalUri,
    headers: &HeaderMap,
    body: Option<Value>,
) {
    let request = RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };
    store.lock().unwrap().requests.push(request);
}

fn not_found(id: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": 404,
            "error": "Not Found",
            "message": format!("Customer with id '{}' was not found.", id)
        })),
    )
        .into_response()
}

fn failure() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
}

fn id_of(customer: &Value) -> String {
    match &customer["customer_id"] {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => String::new(),
    }
}

fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn matches_filters(customer: &Value, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(key, expected)| {
        let value = if ADDRESS_KEYS.contains(&key.as_str()) {
            &customer["address"][key.as_str()]
        } else {
            &customer[key.as_str()]
        };
        as_text(value).as_deref() == Some(expected.as_str())
    })
}

/// GET /customers?{query}
async fn list_handler(
    State(store): State<SharedStore>,
    uri: OriginalUri,
    headers: HeaderMap,
    RawQuery(query): RawQuery,
) -> Response {
    record(&store, Method::GET, &uri, &headers, None);

    let filters: HashMap<String, String> = query
        .as_deref()
        .map(|q| serde_urlencoded::from_str(q).unwrap_or_default())
        .unwrap_or_default();

    let store = store.lock().unwrap();
    let found: Vec<Value> = store
        .customers
        .iter()
        .filter(|c| matches_filters(c, &filters))
        .cloned()
        .collect();

    (StatusCode::OK, Json(found)).into_response()
}

/// POST /customers
async fn create_handler(
    State(store): State<SharedStore>,
    uri: OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&store, Method::POST, &uri, &headers, Some(body.clone()));

    let Some(fields) = body.as_object() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid Customer: body must be an object"})),
        )
            .into_response();
    };

    if fields.get("user_id").and_then(Value::as_str).unwrap_or("").is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"message": "Invalid Customer: Data Missing 'user_id'"})),
        )
            .into_response();
    }

    let mut store = store.lock().unwrap();
    store.next_id += 1;

    let mut customer = fields.clone();
    customer.remove("password");
    customer.insert("customer_id".to_string(), json!(store.next_id));
    customer.entry("active").or_insert(json!(true));
    customer.entry("address").or_insert(json!({}));

    let customer = Value::Object(customer);
    store.customers.push(customer.clone());

    (StatusCode::CREATED, Json(customer)).into_response()
}

/// GET /customers/{id}
async fn retrieve_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    uri: OriginalUri,
    headers: HeaderMap,
) -> Response {
    record(&store, Method::GET, &uri, &headers, None);

    if id == FAILING_ID {
        return failure();
    }

    let store = store.lock().unwrap();
    match store.customers.iter().find(|c| id_of(c) == id) {
        Some(customer) => (StatusCode::OK, Json(customer.clone())).into_response(),
        None => not_found(&id),
    }
}

/// PUT /customers/{id}
async fn update_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    uri: OriginalUri,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    record(&store, Method::PUT, &uri, &headers, Some(body.clone()));

    if id == FAILING_ID {
        return failure();
    }

    let mut store = store.lock().unwrap();
    let Some(customer) = store.customers.iter_mut().find(|c| id_of(c) == id) else {
        return not_found(&id);
    };

    if let (Some(target), Some(changes)) = (customer.as_object_mut(), body.as_object()) {
        merge(target, changes);
        target.remove("password");
    }

    (StatusCode::OK, Json(customer.clone())).into_response()
}

fn merge(target: &mut Map<String, Value>, changes: &Map<String, Value>) {
    for (key, value) in changes {
        if let (Some(Value::Object(inner)), Value::Object(inner_changes)) =
            (target.get_mut(key), value)
        {
            merge(inner, inner_changes);
            continue;
        }
        target.insert(key.clone(), value.clone());
    }
}

/// DELETE /customers/{id}
async fn delete_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    uri: OriginalUri,
    headers: HeaderMap,
) -> Response {
    record(&store, Method::DELETE, &uri, &headers, None);

    if id == FAILING_ID {
        return failure();
    }

    store.lock().unwrap().customers.retain(|c| id_of(c) != id);
    StatusCode::NO_CONTENT.into_response()
}

async fn set_active(store: SharedStore, id: String, active: bool) -> Response {
    if id == FAILING_ID {
        return failure();
    }

    let mut store = store.lock().unwrap();
    match store.customers.iter_mut().find(|c| id_of(c) == id) {
        Some(customer) => {
            customer["active"] = json!(active);
            (StatusCode::OK, Json(customer.clone())).into_response()
        }
        None => not_found(&id),
    }
}

/// PUT /customers/{id}/activate
async fn activate_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    uri: OriginalUri,
    headers: HeaderMap,
) -> Response {
    record(&store, Method::PUT, &uri, &headers, None);
    set_active(store, id, true).await
}

/// PUT /customers/{id}/deactivate
async fn deactivate_handler(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    uri: OriginalUri,
    headers: HeaderMap,
) -> Response {
    record(&store, Method::PUT, &uri, &headers, None);
    set_active(store, id, false).await
}
