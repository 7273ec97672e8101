//! `/api/store/*` and `/api/init/*` routes — read, set and reset the game
//! state cells from the JavaScript side.
//!
//! Every response is a JSON string. Errors use `{"error": .., "status": ..}`.

use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::StoreError;
use crate::store::state::{self, CellName};

/// POST body for `/api/store/{cell}`.
#[derive(Debug, Deserialize)]
struct SetBody {
    value: Value,
}

// ── GET /api/store ─────────────────────────────────────────────────

/// Handle GET /api/store
/// Returns all four cell values.
pub fn handle_snapshot_get() -> String {
    render_snapshot()
}

// ── GET /api/store/{cell} ──────────────────────────────────────────

/// Handle GET /api/store/{cell}
/// Returns `{"cell": name, "value": v}`.
pub fn handle_cell_get(cell: &str) -> String {
    match cell.parse::<CellName>() {
        Ok(cell) => render_cell(cell),
        Err(e) => render_store_error(&e),
    }
}

// ── POST /api/store/{cell} ─────────────────────────────────────────

/// Handle POST /api/store/{cell}
/// Body: `{"value": v}` — an integer for score/round/time, a string for page.
/// Returns the cell as GET does, after subscribers have been notified.
pub fn handle_cell_post(cell: &str, body: &str) -> String {
    match set_cell(cell, body) {
        Ok(cell) => render_cell(cell),
        Err(e) => render_store_error(&e),
    }
}

fn set_cell(cell: &str, body: &str) -> Result<CellName, StoreError> {
    let cell: CellName = cell.parse()?;
    let body: SetBody = serde_json::from_str(body)?;
    state::with_store(|s| s.set_from_json(cell, &body.value))?;
    Ok(cell)
}

// ── POST /api/init/score ───────────────────────────────────────────

/// Handle POST /api/init/score
/// Resets score, round and time; returns the snapshot.
pub fn handle_init_score_post() -> String {
    state::init_score();
    render_snapshot()
}

// ── POST /api/init/time ────────────────────────────────────────────

/// Handle POST /api/init/time
/// Resets time only; returns the snapshot.
pub fn handle_init_time_post() -> String {
    state::init_time();
    render_snapshot()
}

// ── Rendering ──────────────────────────────────────────────────────

fn render_snapshot() -> String {
    serde_json::to_string(&state::snapshot()).unwrap_or_else(|_| "{}".to_string())
}

fn render_cell(cell: CellName) -> String {
    let value = state::with_store(|s| s.value_json(cell));
    json!({ "cell": cell.as_str(), "value": value }).to_string()
}

fn render_store_error(err: &StoreError) -> String {
    tracing::warn!(status = err.status(), error = %err, "store request rejected");
    render_error(err.status(), &err.to_string())
}

/// JSON error body shared with the router's 404/405 responses.
pub fn render_error(status: u16, message: &str) -> String {
    json!({ "error": message, "status": status }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Value {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn snapshot_get_returns_defaults() {
        state::reset_store();
        let body = parse(&handle_snapshot_get());
        assert_eq!(body, json!({"score": 0, "round": 1, "time": 5, "page": "title"}));
        state::reset_store();
    }

    #[test]
    fn cell_get_known_and_unknown() {
        state::reset_store();
        assert_eq!(
            parse(&handle_cell_get("round")),
            json!({"cell": "round", "value": 1})
        );
        let err = parse(&handle_cell_get("lives"));
        assert_eq!(err["status"], 404);
        assert!(err["error"].as_str().unwrap().contains("lives"));
        state::reset_store();
    }

    #[test]
    fn cell_post_sets_value() {
        state::reset_store();
        let body = parse(&handle_cell_post("score", r#"{"value": 40}"#));
        assert_eq!(body, json!({"cell": "score", "value": 40}));
        let body = parse(&handle_cell_post("page", r#"{"value": "game"}"#));
        assert_eq!(body["value"], "game");
        assert_eq!(state::snapshot().score, 40);
        assert_eq!(state::snapshot().page, "game");
        state::reset_store();
    }

    #[test]
    fn cell_post_rejects_bad_input_without_change() {
        state::reset_store();
        let err = parse(&handle_cell_post("time", r#"{"value": "soon"}"#));
        assert_eq!(err["status"], 400);
        let err = parse(&handle_cell_post("time", "not json"));
        assert_eq!(err["status"], 400);
        let err = parse(&handle_cell_post("time", r#"{"other": 1}"#));
        assert_eq!(err["status"], 400);
        let err = parse(&handle_cell_post("lives", r#"{"value": 1}"#));
        assert_eq!(err["status"], 404);
        assert_eq!(state::snapshot().time, 5);
        state::reset_store();
    }

    #[test]
    fn cell_post_notifies_subscribers() {
        state::reset_store();
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        {
            let seen = std::rc::Rc::clone(&seen);
            state::with_store(|s| {
                s.time().subscribe(move |v: &i32| seen.borrow_mut().push(*v));
            });
        }
        handle_cell_post("time", r#"{"value": 4}"#);
        handle_init_time_post();
        assert_eq!(*seen.borrow(), vec![5, 4, 5]);
        state::reset_store();
    }

    #[test]
    fn init_routes_reset_cells() {
        state::reset_store();
        state::with_store(|s| {
            s.score().set(90);
            s.round().set(6);
            s.time().set(2);
            s.page().set("game".to_string());
        });

        let body = parse(&handle_init_time_post());
        assert_eq!(body, json!({"score": 90, "round": 6, "time": 5, "page": "game"}));

        let body = parse(&handle_init_score_post());
        assert_eq!(body, json!({"score": 0, "round": 1, "time": 5, "page": "game"}));
        state::reset_store();
    }
}
