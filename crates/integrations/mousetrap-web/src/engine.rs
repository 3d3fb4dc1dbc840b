use crate::bindings::{error_message, JsMousetrap};
use js_sys::{Array, Function, Reflect};
use mousetrap::{
    Callback, EngineError, EventType, KeyEngine, Keys, Pausable, RecordCallback, Recordable,
};
use wasm_bindgen::prelude::*;
use web_sys::{Element, KeyboardEvent};

const REQUIRED_METHODS: [&str; 5] = ["bind", "unbind", "trigger", "stopCallback", "reset"];

/// One live JS `Mousetrap` instance and the extensions it was loaded with.
#[derive(Debug, Clone)]
pub struct WebEngine {
    inner: JsMousetrap,
    pause: bool,
    record: bool,
}

impl WebEngine {
    /// Check that `value` carries the method set the facade calls, then
    /// detect the optional plugins.
    pub fn from_js(value: JsValue) -> Result<Self, EngineError> {
        if value.is_undefined() || value.is_null() {
            return Err(EngineError::Unavailable(
                "Mousetrap is not loaded".to_string(),
            ));
        }

        for method in REQUIRED_METHODS {
            if !has_method(&value, method) {
                return Err(EngineError::Unavailable(format!(
                    "Mousetrap object has no `{}` method",
                    method
                )));
            }
        }

        let pause = has_method(&value, "pause") && has_method(&value, "unpause");
        let record = has_method(&value, "record");
        log::debug!("Mousetrap plugins: pause={}, record={}", pause, record);

        Ok(Self {
            inner: value.unchecked_into(),
            pause,
            record,
        })
    }
}

impl KeyEngine for WebEngine {
    type Event = KeyboardEvent;
    type Element = Element;

    fn bind(
        &self,
        keys: &Keys,
        callback: Callback,
        event_type: Option<EventType>,
    ) -> Result<(), EngineError> {
        // Ownership passes to the JS side; the function lives as long as the
        // engine keeps a reference to it.
        let function: Function = Closure::<dyn Fn()>::new(move || callback())
            .into_js_value()
            .unchecked_into();
        let keys = keys_to_js(keys);

        let result = match event_type {
            Some(action) => self.inner.bind_action(&keys, &function, action.as_str()),
            None => self.inner.bind(&keys, &function),
        };
        result.map_err(js_error("bind"))?;
        Ok(())
    }

    fn unbind(&self, keys: &Keys, event_type: Option<EventType>) -> Result<(), EngineError> {
        let keys = keys_to_js(keys);
        let result = match event_type {
            Some(action) => self.inner.unbind_action(&keys, action.as_str()),
            None => self.inner.unbind(&keys),
        };
        result.map_err(js_error("unbind"))?;
        Ok(())
    }

    fn trigger(&self, keys: &str, event_type: Option<EventType>) -> Result<(), EngineError> {
        let result = match event_type {
            Some(action) => self.inner.trigger_action(keys, action.as_str()),
            None => self.inner.trigger(keys),
        };
        result.map_err(js_error("trigger"))?;
        Ok(())
    }

    fn stop_callback(
        &self,
        event: &KeyboardEvent,
        element: &Element,
        combo: &str,
    ) -> Result<bool, EngineError> {
        let stop = self
            .inner
            .stop_callback(event, element, combo)
            .map_err(js_error("stopCallback"))?;
        Ok(stop.is_truthy())
    }

    fn reset(&self) -> Result<(), EngineError> {
        self.inner.reset().map_err(js_error("reset"))?;
        Ok(())
    }

    fn pausable(&self) -> Option<&dyn Pausable> {
        if self.pause {
            Some(self)
        } else {
            None
        }
    }

    fn recordable(&self) -> Option<&dyn Recordable> {
        if self.record {
            Some(self)
        } else {
            None
        }
    }
}

impl Pausable for WebEngine {
    fn pause(&self) -> Result<(), EngineError> {
        self.inner.pause().map_err(js_error("pause"))?;
        Ok(())
    }

    fn unpause(&self) -> Result<(), EngineError> {
        self.inner.unpause().map_err(js_error("unpause"))?;
        Ok(())
    }
}

impl Recordable for WebEngine {
    fn record(&self, callback: RecordCallback) -> Result<(), EngineError> {
        let function: Function = Closure::once_into_js(move |sequence: JsValue| {
            let combos = Array::from(&sequence)
                .iter()
                .filter_map(|combo| combo.as_string())
                .collect();
            callback(combos);
        })
        .unchecked_into();

        self.inner.record(&function).map_err(js_error("record"))?;
        Ok(())
    }
}

fn has_method(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &JsValue::from_str(name))
        .map(|value| value.is_function())
        .unwrap_or(false)
}

/// Lists go over as one JS array, the engine's own multi-key form.
fn keys_to_js(keys: &Keys) -> JsValue {
    match keys {
        Keys::One(keys) => JsValue::from_str(keys),
        Keys::Many(list) => list
            .iter()
            .map(|k| JsValue::from_str(k))
            .collect::<Array>()
            .into(),
    }
}

fn js_error(method: &'static str) -> impl Fn(JsValue) -> EngineError {
    move |err| EngineError::Js {
        method,
        message: error_message(&err),
    }
}
