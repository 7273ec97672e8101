//! Global game state store.
//!
//! Four reactive cells (`score`, `round`, `time`, `page`) created once per
//! thread with their defaults. The Web Worker keeps the WASM module alive, so
//! the store lives for the whole browser session and is only ever reset in
//! place.

use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::StoreError;
use crate::store::cell::Writable;

pub const DEFAULT_SCORE: i32 = 0;
pub const DEFAULT_ROUND: i32 = 1;
/// Countdown length in seconds. Both resets restore `time` to this.
pub const DEFAULT_TIME: i32 = 5;
pub const TITLE_PAGE: &str = "title";

/// Names of the store cells, as used by the request bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellName {
    Score,
    Round,
    Time,
    Page,
}

impl CellName {
    pub const ALL: [CellName; 4] = [
        CellName::Score,
        CellName::Round,
        CellName::Time,
        CellName::Page,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CellName::Score => "score",
            CellName::Round => "round",
            CellName::Time => "time",
            CellName::Page => "page",
        }
    }
}

impl fmt::Display for CellName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CellName {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CellName::ALL
            .into_iter()
            .find(|cell| cell.as_str() == s)
            .ok_or_else(|| StoreError::UnknownCell(s.to_string()))
    }
}

/// Plain copy of every cell value at one moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoreSnapshot {
    pub score: i32,
    pub round: i32,
    pub time: i32,
    pub page: String,
}

impl Default for StoreSnapshot {
    fn default() -> Self {
        Self {
            score: DEFAULT_SCORE,
            round: DEFAULT_ROUND,
            time: DEFAULT_TIME,
            page: TITLE_PAGE.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct GameStore {
    score: Writable<i32>,
    round: Writable<i32>,
    time: Writable<i32>,
    page: Writable<String>,
}

impl Default for GameStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GameStore {
    pub fn new() -> Self {
        Self {
            score: Writable::with_label("score", DEFAULT_SCORE),
            round: Writable::with_label("round", DEFAULT_ROUND),
            time: Writable::with_label("time", DEFAULT_TIME),
            page: Writable::with_label("page", TITLE_PAGE.to_string()),
        }
    }

    pub fn score(&self) -> &Writable<i32> {
        &self.score
    }

    pub fn round(&self) -> &Writable<i32> {
        &self.round
    }

    pub fn time(&self) -> &Writable<i32> {
        &self.time
    }

    pub fn page(&self) -> &Writable<String> {
        &self.page
    }

    /// Start a new game: score, round and countdown back to their defaults.
    pub fn init_score(&self) {
        tracing::info!("resetting score, round and time");
        self.score.set(DEFAULT_SCORE);
        self.round.set(DEFAULT_ROUND);
        self.time.set(DEFAULT_TIME);
    }

    /// Restart the countdown only.
    pub fn init_time(&self) {
        tracing::info!("resetting time");
        self.time.set(DEFAULT_TIME);
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            score: self.score.get(),
            round: self.round.get(),
            time: self.time.get(),
            page: self.page.get(),
        }
    }

    /// Current value of `cell` as JSON.
    pub fn value_json(&self, cell: CellName) -> Value {
        match self.int_cell(cell) {
            Some(target) => Value::from(target.get()),
            None => Value::from(self.page.get()),
        }
    }

    /// Type-checked set from a JSON value. Nothing changes on error.
    pub fn set_from_json(&self, cell: CellName, value: &Value) -> Result<(), StoreError> {
        if let Some(target) = self.int_cell(cell) {
            let n = value
                .as_i64()
                .and_then(|n| i32::try_from(n).ok())
                .ok_or(StoreError::InvalidValue {
                    cell,
                    expected: "a 32-bit integer",
                })?;
            target.set(n);
        } else {
            let page = value.as_str().ok_or(StoreError::InvalidValue {
                cell,
                expected: "a string",
            })?;
            self.page.set(page.to_string());
        }
        Ok(())
    }

    /// Restore every cell, `page` included, and drop all subscribers.
    fn clear(&self) {
        self.score.clear(DEFAULT_SCORE);
        self.round.clear(DEFAULT_ROUND);
        self.time.clear(DEFAULT_TIME);
        self.page.clear(TITLE_PAGE.to_string());
    }

    fn int_cell(&self, cell: CellName) -> Option<&Writable<i32>> {
        match cell {
            CellName::Score => Some(&self.score),
            CellName::Round => Some(&self.round),
            CellName::Time => Some(&self.time),
            CellName::Page => None,
        }
    }
}

thread_local! {
    static STORE: GameStore = GameStore::new();
}

/// Execute a closure with access to the session store.
pub fn with_store<F, R>(f: F) -> R
where
    F: FnOnce(&GameStore) -> R,
{
    STORE.with(|s| f(s))
}

/// Reset `score`, `round` and `time` on the session store.
pub fn init_score() {
    with_store(GameStore::init_score);
}

/// Reset `time` on the session store.
pub fn init_time() {
    with_store(GameStore::init_time);
}

pub fn snapshot() -> StoreSnapshot {
    with_store(GameStore::snapshot)
}

/// Bring the session store back to its freshly created state: default values
/// everywhere and no subscribers. Subscribers are not notified.
pub fn reset_store() {
    with_store(GameStore::clear);
}
