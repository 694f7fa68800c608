//! In-process stand-in for the shop backend.
//!
//! Implements the endpoints the client uses together with the rules the real server owns:
//! cart lines merge on add, remove-one drops a line at quantity 1, totals are computed here,
//! an empty category and an unknown login are 404, a taken username is 409.

#![allow(dead_code)]

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use golflow_storefront::config::Config;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct StoredProduct {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    pub image: Option<(String, Vec<u8>)>,
}

impl StoredProduct {
    fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "category": self.category,
        })
    }
}

#[derive(Debug, Clone)]
struct Line {
    product_id: u64,
    product_name: String,
    price: f64,
    quantity: u32,
}

#[derive(Debug, Default)]
pub struct BackendState {
    next_id: u64,
    pub products: Vec<StoredProduct>,
    pub users: Vec<String>,
    carts: Vec<(String, Vec<Line>)>,
    /// Makes every image upload fail with 413.
    pub reject_uploads: bool,
    /// Makes `GET /api/products` fail with 500; writes still succeed.
    pub fail_listing: bool,
    pub requests: u32,
}

impl BackendState {
    fn cart_mut(&mut self, username: &str) -> &mut Vec<Line> {
        let index = match self.carts.iter().position(|(user, _)| user == username) {
            Some(index) => index,
            None => {
                self.carts.push((username.to_string(), Vec::new()));
                self.carts.len() - 1
            }
        };
        &mut self.carts[index].1
    }

    fn cart_json(&mut self, username: &str) -> Value {
        let lines = self.cart_mut(username).clone();
        let items: Vec<Value> = lines
            .iter()
            .map(|line| {
                json!({
                    "productId": line.product_id,
                    "productName": line.product_name,
                    "productPrice": line.price,
                    "quantity": line.quantity,
                    "totalItemPrice": line.price * f64::from(line.quantity),
                })
            })
            .collect();
        json!({
            "id": 1,
            "username": username,
            "items": items,
            "totalPrice": lines.iter().map(|l| l.price * f64::from(l.quantity)).sum::<f64>(),
            "totalItems": lines.iter().map(|l| l.quantity).sum::<u32>(),
        })
    }
}

type Shared = Arc<Mutex<BackendState>>;

pub struct FakeBackend {
    pub base_url: String,
    pub state: Shared,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(BackendState::default()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self {
            base_url: format!("http://{addr}/"),
            state,
        }
    }

    pub fn config(&self) -> Config {
        Config::new(&self.base_url).unwrap()
    }

    pub fn add_user(&self, username: &str) {
        self.state.lock().unwrap().users.push(username.to_string());
    }

    pub fn add_product(&self, name: &str, price: f64, category: &str) -> u64 {
        let mut state = self.state.lock().unwrap();
        state.next_id += 1;
        let id = state.next_id;
        state.products.push(StoredProduct {
            id,
            name: name.to_string(),
            description: String::new(),
            price,
            category: category.to_string(),
            image: None,
        });
        id
    }

    pub fn product(&self, id: u64) -> Option<StoredProduct> {
        let state = self.state.lock().unwrap();
        state.products.iter().find(|p| p.id == id).cloned()
    }

    pub fn reject_uploads(&self) {
        self.state.lock().unwrap().reject_uploads = true;
    }

    pub fn fail_listing(&self, fail: bool) {
        self.state.lock().unwrap().fail_listing = fail;
    }

    pub fn product_count(&self) -> usize {
        self.state.lock().unwrap().products.len()
    }

    pub fn request_count(&self) -> u32 {
        self.state.lock().unwrap().requests
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route("/api/products/category/{category}", get(list_by_category))
        .route("/api/products/{id}", put(update_product).delete(delete_product))
        .route("/api/products/upload-product-image/{id}", post(upload_image))
        .route("/api/products/uploads/products/{id}", get(product_image))
        .route("/api/users", post(create_user))
        .route("/api/users/login", post(login))
        .route("/api/cart/{username}", get(get_cart))
        .route("/api/cart/add/{username}", post(add_to_cart))
        .route("/api/cart/{username}/item/{product_id}/one", delete(remove_one))
        .route("/api/cart/{username}/item/{product_id}", delete(remove_item))
        .route("/api/cart/clear/{username}", delete(clear_cart))
        .with_state(state)
}

fn not_found(what: &str) -> Response {
    (StatusCode::NOT_FOUND, format!("{what} not found")).into_response()
}

fn lock(state: &Shared) -> std::sync::MutexGuard<'_, BackendState> {
    let mut guard = state.lock().unwrap();
    guard.requests += 1;
    guard
}

#[derive(Deserialize)]
struct ProductBody {
    name: String,
    #[serde(default)]
    description: String,
    price: f64,
    #[serde(default)]
    category: String,
}

#[derive(Deserialize)]
struct UserBody {
    username: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddBody {
    product_cart_id: u64,
    product_price: f64,
    quantity: u32,
}

async fn list_products(State(state): State<Shared>) -> Response {
    let state = lock(&state);
    if state.fail_listing {
        return (StatusCode::INTERNAL_SERVER_ERROR, "listing unavailable").into_response();
    }
    Json(Value::Array(
        state.products.iter().map(StoredProduct::to_json).collect(),
    ))
    .into_response()
}

async fn list_by_category(State(state): State<Shared>, Path(category): Path<String>) -> Response {
    let state = lock(&state);
    let matches: Vec<Value> = state
        .products
        .iter()
        .filter(|p| p.category == category)
        .map(StoredProduct::to_json)
        .collect();
    if matches.is_empty() {
        return not_found("products in category");
    }
    Json(Value::Array(matches)).into_response()
}

async fn create_product(State(state): State<Shared>, Json(body): Json<ProductBody>) -> Response {
    let mut state = lock(&state);
    state.next_id += 1;
    let product = StoredProduct {
        id: state.next_id,
        name: body.name,
        description: body.description,
        price: body.price,
        category: body.category,
        image: None,
    };
    let json = product.to_json();
    state.products.push(product);
    (StatusCode::CREATED, Json(json)).into_response()
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    Json(body): Json<ProductBody>,
) -> Response {
    let mut state = lock(&state);
    let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
        return not_found("product");
    };
    product.name = body.name;
    product.description = body.description;
    product.price = body.price;
    product.category = body.category;
    Json(product.to_json()).into_response()
}

async fn delete_product(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let mut state = lock(&state);
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
        return not_found("product");
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn upload_image(
    State(state): State<Shared>,
    Path(id): Path<u64>,
    mut multipart: Multipart,
) -> Response {
    let mut file = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or_default().to_string();
            match field.bytes().await {
                Ok(bytes) => file = Some((name, bytes.to_vec())),
                Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            }
        }
    }

    let mut state = lock(&state);
    if state.reject_uploads {
        return (StatusCode::PAYLOAD_TOO_LARGE, "image too large").into_response();
    }
    let Some(file) = file else {
        return (StatusCode::BAD_REQUEST, "missing file field").into_response();
    };
    let Some(product) = state.products.iter_mut().find(|p| p.id == id) else {
        return not_found("product");
    };
    product.image = Some(file);
    Json(product.to_json()).into_response()
}

async fn product_image(State(state): State<Shared>, Path(id): Path<u64>) -> Response {
    let state = lock(&state);
    match state
        .products
        .iter()
        .find(|p| p.id == id)
        .and_then(|p| p.image.clone())
    {
        Some((_, bytes)) => bytes.into_response(),
        None => not_found("image"),
    }
}

async fn create_user(State(state): State<Shared>, Json(body): Json<UserBody>) -> Response {
    let mut state = lock(&state);
    if state.users.contains(&body.username) {
        return (StatusCode::CONFLICT, "username already taken").into_response();
    }
    state.users.push(body.username.clone());
    let id = state.users.len();
    (
        StatusCode::CREATED,
        Json(json!({ "id": id, "username": body.username })),
    )
        .into_response()
}

async fn login(State(state): State<Shared>, Json(body): Json<UserBody>) -> Response {
    let state = lock(&state);
    match state.users.iter().position(|u| *u == body.username) {
        Some(index) => Json(json!({ "id": index + 1, "username": body.username })).into_response(),
        None => not_found("user"),
    }
}

async fn get_cart(State(state): State<Shared>, Path(username): Path<String>) -> Json<Value> {
    Json(lock(&state).cart_json(&username))
}

async fn add_to_cart(
    State(state): State<Shared>,
    Path(username): Path<String>,
    Json(body): Json<AddBody>,
) -> Response {
    let mut state = lock(&state);
    let Some(name) = state
        .products
        .iter()
        .find(|p| p.id == body.product_cart_id)
        .map(|p| p.name.clone())
    else {
        return not_found("product");
    };
    let lines = state.cart_mut(&username);
    match lines
        .iter_mut()
        .find(|line| line.product_id == body.product_cart_id)
    {
        Some(line) => line.quantity += body.quantity,
        None => lines.push(Line {
            product_id: body.product_cart_id,
            product_name: name,
            price: body.product_price,
            quantity: body.quantity,
        }),
    }
    Json(state.cart_json(&username)).into_response()
}

async fn remove_one(
    State(state): State<Shared>,
    Path((username, product_id)): Path<(String, u64)>,
) -> Response {
    let mut state = lock(&state);
    let lines = state.cart_mut(&username);
    let Some(index) = lines.iter().position(|l| l.product_id == product_id) else {
        return not_found("cart item");
    };
    if lines[index].quantity > 1 {
        lines[index].quantity -= 1;
    } else {
        lines.remove(index);
    }
    StatusCode::OK.into_response()
}

async fn remove_item(
    State(state): State<Shared>,
    Path((username, product_id)): Path<(String, u64)>,
) -> Response {
    let mut state = lock(&state);
    let lines = state.cart_mut(&username);
    let before = lines.len();
    lines.retain(|l| l.product_id != product_id);
    if lines.len() == before {
        return not_found("cart item");
    }
    StatusCode::OK.into_response()
}

async fn clear_cart(State(state): State<Shared>, Path(username): Path<String>) -> Response {
    lock(&state).cart_mut(&username).clear();
    StatusCode::OK.into_response()
}
