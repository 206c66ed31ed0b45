//! WebAssembly visit tracker backed by browser local storage.
//!
//! Call [`record_visit`] once per page load and [`snapshot`] when the
//! statistics panel opens. Nothing here throws into JavaScript: failures are
//! written to the browser console and reported as `false` or `None`.

use sitetrack_core::{IdSource, Tracker, VisitorId};
use sitetrack_store::{Error as StoreError, KeyValueStorage, Result as StoreResult};
use sitetrack_types::EnvSignals;
use time::{Date, Month, PrimitiveDateTime, Time};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// `window.localStorage` as a [`KeyValueStorage`].
pub struct LocalStorage {
    inner: web_sys::Storage,
}

impl LocalStorage {
    /// Open the window's local storage.
    pub fn open() -> StoreResult<Self> {
        let window =
            web_sys::window().ok_or_else(|| StoreError::Unavailable("no window".to_string()))?;
        let inner = window
            .local_storage()
            .map_err(|e| StoreError::Unavailable(describe(&e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage is disabled".to_string()))?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for LocalStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| StoreError::Backend(describe(&e)))
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.inner.set_item(key, value).map_err(|e| {
            match e.dyn_ref::<web_sys::DomException>() {
                Some(ex) if ex.name() == "QuotaExceededError" => StoreError::QuotaExceeded {
                    key: key.to_string(),
                },
                _ => StoreError::Backend(describe(&e)),
            }
        })
    }
}

/// Tokens from `Date.now()` and `Math.random()`.
struct JsIdSource;

impl IdSource for JsIdSource {
    fn next_id(&mut self) -> VisitorId {
        VisitorId::compose(js_sys::Date::now() as i64, || {
            (js_sys::Math::random() * 36.0) as usize
        })
    }
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}

fn tracker() -> Option<Tracker<LocalStorage>> {
    match LocalStorage::open() {
        Ok(storage) => Some(Tracker::with_id_source(storage, JsIdSource)),
        Err(e) => {
            warn(&format!("Visitor tracking disabled: {}", e));
            None
        }
    }
}

/// Current local wall-clock time from the JavaScript `Date`.
fn now_local() -> Option<PrimitiveDateTime> {
    let now = js_sys::Date::new_0();
    let month = Month::try_from(u8::try_from(now.get_month() + 1).ok()?).ok()?;
    let date = Date::from_calendar_date(
        i32::try_from(now.get_full_year()).ok()?,
        month,
        u8::try_from(now.get_date()).ok()?,
    )
    .ok()?;
    let time = Time::from_hms(
        u8::try_from(now.get_hours()).ok()?,
        u8::try_from(now.get_minutes()).ok()?,
        u8::try_from(now.get_seconds()).ok()?,
    )
    .ok()?;
    Some(PrimitiveDateTime::new(date, time))
}

/// Signals read from `navigator` and touch-event support.
fn env_signals() -> EnvSignals {
    let Some(window) = web_sys::window() else {
        return EnvSignals::default();
    };
    let navigator = window.navigator();

    // Same probe as `'ontouchend' in document`.
    let has_touch_support = window
        .document()
        .and_then(|doc| js_sys::Reflect::has(&doc, &JsValue::from_str("ontouchend")).ok())
        .unwrap_or(false);

    EnvSignals::new(
        navigator.user_agent().unwrap_or_default(),
        navigator.platform().unwrap_or_default(),
        has_touch_support,
    )
}

/// Initialize the WASM module (called automatically)
#[wasm_bindgen(start)]
pub fn init() {
    log("sitetrack WASM module initialized");
}

/// Record one visit. Returns whether it was saved.
#[wasm_bindgen(js_name = recordVisit)]
pub fn record_visit() -> bool {
    let Some(mut tracker) = tracker() else {
        return false;
    };
    let Some(now) = now_local() else {
        warn("Visitor tracking skipped: could not read the local clock");
        return false;
    };

    let outcome = tracker.record_visit(now, &env_signals());
    if !outcome.persisted {
        warn("Error saving visitor data");
    }
    outcome.persisted
}

/// Statistics snapshot as JSON (`today`, `yesterday`, `thisMonth`,
/// `lastMonth`, `totalVisitors`, `currentDevice`, `deviceBreakdown`).
#[wasm_bindgen]
pub fn snapshot() -> String {
    let env = env_signals();
    let stats = match (tracker(), now_local()) {
        (Some(tracker), Some(now)) => tracker.snapshot(now, &env),
        (None, Some(now)) => {
            sitetrack_core::report::snapshot(&sitetrack_store::VisitorStore::default(), now, &env)
        }
        (_, None) => {
            warn("Could not read the local clock");
            return "null".to_string();
        }
    };

    serde_json::to_string(&stats).unwrap_or_else(|e| {
        warn(&format!("Error serializing statistics: {}", e));
        "null".to_string()
    })
}

/// Classification of the current browser as JSON (`type`, `icon`, `category`).
#[wasm_bindgen]
pub fn classify() -> String {
    let device = sitetrack_types::classify(&env_signals());
    serde_json::to_string(&device).unwrap_or_else(|e| {
        warn(&format!("Error serializing device: {}", e));
        "null".to_string()
    })
}

/// The stored visitor token, if any. Never creates one.
#[wasm_bindgen(js_name = visitorId)]
pub fn visitor_id() -> Option<String> {
    tracker()?.visitor_id().map(|id| id.to_string())
}

