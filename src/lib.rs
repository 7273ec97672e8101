//! In-browser game state store.
//!
//! Holds the reactive `score`, `round`, `time` and `page` cells for the game
//! UI (see [`store`]) and exports `handle_request(method, path, body)` so the
//! JavaScript side can read, set and reset them. Uses `matchit` for URL
//! routing — the same router engine that powers Axum.

use wasm_bindgen::prelude::*;

pub mod error;
pub mod routes;
pub mod store;

pub use error::StoreError;
pub use store::state::{DEFAULT_TIME, init_score, init_time, reset_store, snapshot, with_store};

/// Process an HTTP-like request against the game state store.
///
/// Called from JavaScript via wasm-bindgen.
///
/// # Arguments
/// * `method` — HTTP method ("GET" or "POST")
/// * `path`   — URL path (e.g., "/api/store/score")
/// * `body`   — JSON request body. Empty string for GET requests.
///
/// # Returns
/// A JSON string: the requested value(s), or `{"error", "status"}`.
#[wasm_bindgen]
pub fn handle_request(method: &str, path: &str, body: &str) -> String {
    let mut router = matchit::Router::new();

    router.insert("/api/store", "store").ok();
    router.insert("/api/store/{cell}", "store_cell").ok();
    router.insert("/api/init/score", "init_score").ok();
    router.insert("/api/init/time", "init_time").ok();

    match router.at(path) {
        Ok(matched) => {
            let cell = matched.params.get("cell").unwrap_or("");
            match (*matched.value, method) {
                ("store", "GET") => routes::store::handle_snapshot_get(),
                ("store_cell", "GET") => routes::store::handle_cell_get(cell),
                ("store_cell", "POST") => routes::store::handle_cell_post(cell, body),
                ("init_score", "POST") => routes::store::handle_init_score_post(),
                ("init_time", "POST") => routes::store::handle_init_time_post(),
                _ => method_not_allowed(),
            }
        }
        Err(_) => not_found(),
    }
}

fn not_found() -> String {
    routes::store::render_error(404, "route not found")
}

fn method_not_allowed() -> String {
    routes::store::render_error(405, "method not allowed")
}
