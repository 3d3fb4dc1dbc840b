//! Module-level functions backed by the default handle.
//!
//! The default handle is created on first use, against the element named by
//! `MOUSETRAP_DEFAULT_SCOPE` when set and against the whole document
//! otherwise. Call [`init`] at startup to create it eagerly and surface
//! configuration problems early, or [`init_with`] to pass the configuration
//! explicitly, since a page has no process environment to read it from.

use crate::engine::WebEngine;
use crate::host::WebHost;
use config::Config;
use mousetrap::{Capabilities, DefaultHandle, EventType, Mousetrap, MousetrapError};
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

thread_local! {
    static DEFAULT: DefaultHandle<WebEngine> = const { DefaultHandle::new() };
}

fn create_default() -> Result<Mousetrap<WebEngine>, MousetrapError> {
    create_default_with(&Config::global())
}

/// Build a handle the way the default one is built under `config`.
pub fn create_default_with(config: &Config) -> Result<Mousetrap<WebEngine>, MousetrapError> {
    match config.default_scope.as_deref() {
        Some(selector) => Mousetrap::from_query_selector_with(&WebHost, selector, config),
        None => Mousetrap::global_with(&WebHost, config),
    }
}

/// Run `f` against the default handle, creating it if needed.
pub fn with_default<R, F>(f: F) -> Result<R, MousetrapError>
where
    F: FnOnce(&Mousetrap<WebEngine>) -> Result<R, MousetrapError>,
{
    DEFAULT.with(|slot| f(slot.get_or_try_init(create_default)?))
}

/// Load configuration, install logging and create the default handle.
pub fn init() -> Result<Capabilities, MousetrapError> {
    let config = Config::initialize();
    start(&config)
}

/// Like [`init`], with `config` in place of the environment.
///
/// Must run before anything else touches the default handle or the global
/// configuration.
pub fn init_with(config: Config) -> Result<Capabilities, MousetrapError> {
    if DEFAULT.with(|slot| slot.is_initialized()) {
        return Err(MousetrapError::DefaultAlreadyInitialized);
    }
    let config = Config::install(config).map_err(|_| MousetrapError::ConfigAlreadyLoaded)?;
    start(&config)
}

fn start(config: &Config) -> Result<Capabilities, MousetrapError> {
    logging::init(config.debug);
    with_default(|handle| {
        log::info!("Default handle ready: {:?}", handle.capabilities());
        Ok(handle.capabilities())
    })
}

pub fn capabilities() -> Result<Capabilities, MousetrapError> {
    with_default(|handle| Ok(handle.capabilities()))
}

pub fn bind<F: Fn() + 'static>(keys: &str, callback: F) -> Result<(), MousetrapError> {
    with_default(|handle| handle.bind(keys, callback))
}

pub fn bind_multi<S, F>(keys: &[S], callback: F) -> Result<(), MousetrapError>
where
    S: AsRef<str>,
    F: Fn() + 'static,
{
    with_default(|handle| handle.bind_multi(keys, callback))
}

pub fn bind_event<F: Fn() + 'static>(
    keys: &str,
    callback: F,
    event_type: EventType,
) -> Result<(), MousetrapError> {
    with_default(|handle| handle.bind_event(keys, callback, event_type))
}

pub fn bind_multi_event<S, F>(
    keys: &[S],
    callback: F,
    event_type: EventType,
) -> Result<(), MousetrapError>
where
    S: AsRef<str>,
    F: Fn() + 'static,
{
    with_default(|handle| handle.bind_multi_event(keys, callback, event_type))
}

pub fn unbind(keys: &str) -> Result<(), MousetrapError> {
    with_default(|handle| handle.unbind(keys))
}

pub fn trigger(keys: &str) -> Result<(), MousetrapError> {
    with_default(|handle| handle.trigger(keys))
}

pub fn trigger_type(keys: &str, event_type: EventType) -> Result<(), MousetrapError> {
    with_default(|handle| handle.trigger_type(keys, event_type))
}

pub fn stop_callback(
    event: &KeyboardEvent,
    element: &Element,
    combo: &str,
) -> Result<bool, MousetrapError> {
    with_default(|handle| handle.stop_callback(event, element, combo))
}

pub fn reset() -> Result<(), MousetrapError> {
    with_default(|handle| handle.reset())
}

pub fn pause() -> Result<(), MousetrapError> {
    with_default(|handle| handle.pause())
}

pub fn unpause() -> Result<(), MousetrapError> {
    with_default(|handle| handle.unpause())
}

pub fn record<F>(callback: F) -> Result<(), MousetrapError>
where
    F: FnOnce(Vec<String>) + 'static,
{
    with_default(|handle| handle.record(callback))
}

/// `init_with` for page scripts: `options` is an optional object such as
/// `{ requirePause: true, defaultScope: "#editor" }`.
#[wasm_bindgen(js_name = mousetrapInit)]
pub fn init_js(options: JsValue) -> Result<JsValue, JsValue> {
    let config = if options.is_undefined() || options.is_null() {
        Config::new_for_test()
    } else {
        serde_wasm_bindgen::from_value(options)?
    };
    let capabilities = init_with(config).map_err(|err| JsValue::from_str(&err.to_string()))?;
    serde_wasm_bindgen::to_value(&capabilities).map_err(JsValue::from)
}

/// Capability descriptor of the default handle, for page scripts.
#[wasm_bindgen(js_name = mousetrapCapabilities)]
pub fn capabilities_js() -> Result<JsValue, JsValue> {
    let capabilities = capabilities().map_err(|err| JsValue::from_str(&err.to_string()))?;
    serde_wasm_bindgen::to_value(&capabilities).map_err(JsValue::from)
}
