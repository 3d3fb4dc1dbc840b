use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

#[wasm_bindgen]
extern "C" {
    /// A `Mousetrap` instance, or the `Mousetrap` global acting as the
    /// document instance.
    #[derive(Debug, Clone)]
    pub type JsMousetrap;

    #[wasm_bindgen(method, catch)]
    pub fn bind(this: &JsMousetrap, keys: &JsValue, callback: &Function)
        -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = bind)]
    pub fn bind_action(
        this: &JsMousetrap,
        keys: &JsValue,
        callback: &Function,
        action: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn unbind(this: &JsMousetrap, keys: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = unbind)]
    pub fn unbind_action(this: &JsMousetrap, keys: &JsValue, action: &str)
        -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn trigger(this: &JsMousetrap, keys: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = trigger)]
    pub fn trigger_action(this: &JsMousetrap, keys: &str, action: &str)
        -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch, js_name = stopCallback)]
    pub fn stop_callback(
        this: &JsMousetrap,
        event: &KeyboardEvent,
        element: &Element,
        combo: &str,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn reset(this: &JsMousetrap) -> Result<JsValue, JsValue>;

    // pause/unpause plugin
    #[wasm_bindgen(method, catch)]
    pub fn pause(this: &JsMousetrap) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, catch)]
    pub fn unpause(this: &JsMousetrap) -> Result<JsValue, JsValue>;

    // record plugin
    #[wasm_bindgen(method, catch)]
    pub fn record(this: &JsMousetrap, callback: &Function) -> Result<JsValue, JsValue>;
}

pub(crate) fn error_message(err: &JsValue) -> String {
    if let Some(error) = err.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
