#![cfg(target_arch = "wasm32")]

use mousetrap::{Capability, EngineError, EventType, Mousetrap, MousetrapError};
use mousetrap_web::WebEngine;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// A scripted object with the engine's method set: exact-string bindings
/// keyed by action, plus the optional plugins. As with the real pause plugin,
/// pausing only changes `stopCallback`; `trigger` still fires.
fn fake_mousetrap(plugins: bool) -> JsValue {
    let source = format!(
        r#"(function() {{
            var bound = {{}};
            var paused = false;
            var engine = {{
                bind: function(keys, cb, action) {{
                    (Array.isArray(keys) ? keys : [keys]).forEach(function(k) {{
                        bound[k + ':' + action] = cb;
                    }});
                }},
                unbind: function(keys, action) {{
                    (Array.isArray(keys) ? keys : [keys]).forEach(function(k) {{
                        delete bound[k + ':' + action];
                    }});
                }},
                trigger: function(keys, action) {{
                    if (keys === 'boom') {{ throw new Error('bad combo'); }}
                    var cb = bound[keys + ':' + action];
                    if (cb) {{ cb({{}}, keys); }}
                }},
                stopCallback: function(e, element, combo) {{
                    return paused || element.tagName === 'INPUT';
                }},
                reset: function() {{ bound = {{}}; }}
            }};
            if ({plugins}) {{
                engine.pause = function() {{ paused = true; }};
                engine.unpause = function() {{ paused = false; }};
                engine.record = function(cb) {{ cb(['ctrl+k', 'g']); }};
            }}
            return engine;
        }})()"#,
        plugins = plugins
    );
    js_sys::eval(&source).unwrap()
}

fn handle(plugins: bool) -> Mousetrap<WebEngine> {
    let engine = WebEngine::from_js(fake_mousetrap(plugins)).unwrap();
    Mousetrap::from_engine_with(engine, &config::Config::new_for_test()).unwrap()
}

fn counter(handle: &Mousetrap<WebEngine>, keys: &str, event_type: Option<EventType>) -> Rc<Cell<u32>> {
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();
    let callback = move || inner.set(inner.get() + 1);
    match event_type {
        Some(event_type) => handle.bind_event(keys, callback, event_type).unwrap(),
        None => handle.bind(keys, callback).unwrap(),
    }
    count
}

#[wasm_bindgen_test]
fn detects_plugins() {
    assert!(!handle(false).supports(Capability::Pause));
    assert!(!handle(false).supports(Capability::Record));
    assert!(handle(true).supports(Capability::Pause));
    assert!(handle(true).supports(Capability::Record));
}

#[wasm_bindgen_test]
fn rejects_objects_without_the_method_set() {
    let err = WebEngine::from_js(js_sys::Object::new().into()).unwrap_err();
    assert!(matches!(err, EngineError::Unavailable(_)));

    let err = WebEngine::from_js(JsValue::UNDEFINED).unwrap_err();
    assert_eq!(
        err,
        EngineError::Unavailable("Mousetrap is not loaded".to_string())
    );
}

#[wasm_bindgen_test]
fn trigger_runs_rust_callback() {
    let mousetrap = handle(false);
    let count = counter(&mousetrap, "g i", None);

    mousetrap.trigger("g i").unwrap();
    assert_eq!(count.get(), 1);

    mousetrap.unbind("g i").unwrap();
    mousetrap.trigger("g i").unwrap();
    assert_eq!(count.get(), 1);
}

#[wasm_bindgen_test]
fn bind_multi_passes_one_array() {
    let mousetrap = handle(false);
    let count = Rc::new(Cell::new(0));
    let inner = count.clone();

    mousetrap
        .bind_multi(&["a", "b"], move || inner.set(inner.get() + 1))
        .unwrap();
    mousetrap.trigger("a").unwrap();
    mousetrap.trigger("b").unwrap();

    assert_eq!(count.get(), 2);
}

#[wasm_bindgen_test]
fn event_type_is_forwarded() {
    let mousetrap = handle(false);
    let count = counter(&mousetrap, "k", Some(EventType::KeyUp));

    mousetrap.trigger("k").unwrap();
    mousetrap.trigger_type("k", EventType::KeyDown).unwrap();
    assert_eq!(count.get(), 0);

    mousetrap.trigger_type("k", EventType::KeyUp).unwrap();
    assert_eq!(count.get(), 1);
}

#[wasm_bindgen_test]
fn reset_clears_bindings() {
    let mousetrap = handle(false);
    let count = counter(&mousetrap, "x", None);

    mousetrap.reset().unwrap();
    mousetrap.trigger("x").unwrap();

    assert_eq!(count.get(), 0);
}

#[wasm_bindgen_test]
fn js_exceptions_surface_as_engine_errors() {
    let err = handle(false).trigger("boom").unwrap_err();

    assert_eq!(
        err,
        MousetrapError::Engine(EngineError::Js {
            method: "trigger",
            message: "bad combo".to_string(),
        })
    );
}

#[wasm_bindgen_test]
fn pause_and_record_through_plugins() {
    let mousetrap = handle(true);
    let count = counter(&mousetrap, "j", None);

    mousetrap.pause().unwrap();
    mousetrap.trigger("j").unwrap();
    assert_eq!(count.get(), 0);
    mousetrap.unpause().unwrap();
    mousetrap.trigger("j").unwrap();
    assert_eq!(count.get(), 1);

    let recorded = Rc::new(RefCell::new(Vec::new()));
    let sink = recorded.clone();
    mousetrap
        .record(move |sequence| *sink.borrow_mut() = sequence)
        .unwrap();
    assert_eq!(*recorded.borrow(), vec!["ctrl+k".to_string(), "g".to_string()]);
}

#[wasm_bindgen_test]
fn paused_handle_skips_engine_trigger() {
    let mousetrap = handle(true);
    let count = counter(&mousetrap, "j", None);
    let document = web_sys::window().unwrap().document().unwrap();
    let div = document.create_element("div").unwrap();
    let event = web_sys::KeyboardEvent::new("keydown").unwrap();

    mousetrap.pause().unwrap();
    assert!(mousetrap.stop_callback(&event, &div, "j").unwrap());
    mousetrap.trigger("j").unwrap();
    mousetrap.clone().trigger("j").unwrap();
    assert_eq!(count.get(), 0);

    mousetrap.unpause().unwrap();
    assert!(!mousetrap.stop_callback(&event, &div, "j").unwrap());
}

#[wasm_bindgen_test]
fn missing_plugins_fail_with_capability_error() {
    let mousetrap = handle(false);

    assert_eq!(
        mousetrap.pause().unwrap_err(),
        MousetrapError::CapabilityUnavailable(Capability::Pause)
    );
    assert_eq!(
        mousetrap.record(|_| {}).unwrap_err(),
        MousetrapError::CapabilityUnavailable(Capability::Record)
    );
}

#[wasm_bindgen_test]
fn stop_callback_asks_the_engine() {
    let document = web_sys::window().unwrap().document().unwrap();
    let input = document.create_element("input").unwrap();
    let div = document.create_element("div").unwrap();
    let event = web_sys::KeyboardEvent::new("keydown").unwrap();
    let mousetrap = handle(false);

    assert!(mousetrap.stop_callback(&event, &input, "a").unwrap());
    assert!(!mousetrap.stop_callback(&event, &div, "a").unwrap());
}
