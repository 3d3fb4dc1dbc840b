use crate::bindings::error_message;
use crate::engine::WebEngine;
use js_sys::{Array, Function, Reflect};
use mousetrap::{EngineError, Host};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

/// The ambient browser window: its `document` and its `Mousetrap` global.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebHost;

impl WebHost {
    fn document(&self) -> Result<Document, EngineError> {
        web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| EngineError::Unavailable("no document in this context".to_string()))
    }

    fn mousetrap_global(&self) -> Result<JsValue, EngineError> {
        Reflect::get(&js_sys::global(), &JsValue::from_str("Mousetrap")).map_err(|err| {
            EngineError::Unavailable(format!(
                "cannot read Mousetrap global: {}",
                error_message(&err)
            ))
        })
    }
}

impl Host for WebHost {
    type Engine = WebEngine;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, EngineError> {
        self.document()?
            .query_selector(selector)
            .map_err(|err| EngineError::Js {
                method: "querySelector",
                message: error_message(&err),
            })
    }

    fn attach(&self, scope: &Element) -> Result<WebEngine, EngineError> {
        let constructor: Function = self
            .mousetrap_global()?
            .dyn_into()
            .map_err(|_| EngineError::Unavailable("Mousetrap is not a constructor".to_string()))?;

        let instance = Reflect::construct(&constructor, &Array::of1(scope)).map_err(|err| {
            EngineError::InvalidScope(error_message(&err))
        })?;
        WebEngine::from_js(instance)
    }

    fn global(&self) -> Result<WebEngine, EngineError> {
        WebEngine::from_js(self.mousetrap_global()?)
    }
}
