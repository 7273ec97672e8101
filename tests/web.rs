//! Browser smoke tests, run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use game_store::handle_request;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn snapshot_from_js_boundary() {
    game_store::reset_store();
    let json = handle_request("GET", "/api/store", "");
    assert!(json.contains(r#""time":5"#));
}

#[wasm_bindgen_test]
fn init_score_from_js_boundary() {
    game_store::reset_store();
    handle_request("POST", "/api/store/score", r#"{"value":25}"#);
    let json = handle_request("POST", "/api/init/score", "");
    assert!(json.contains(r#""score":0"#));
    game_store::reset_store();
}
