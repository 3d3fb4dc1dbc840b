use crate::dom::Element;
use crate::engine::MemoryEngine;
use config::Config;
use mousetrap::{EngineError, Host};
use std::cell::RefCell;
use std::time::Duration;

/// Which build of the engine to simulate.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub sequence_timeout: Duration,
    pub pause: bool,
    pub record: bool,
}

impl Default for EngineOptions {
    /// Reads `MOUSETRAP_SEQUENCE_TIMEOUT_MS` through the global config.
    fn default() -> Self {
        Self::from_config(&Config::global())
    }
}

impl EngineOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            sequence_timeout: Duration::from_millis(config.sequence_timeout_ms),
            pause: false,
            record: false,
        }
    }

    pub fn with_pause(mut self) -> Self {
        self.pause = true;
        self
    }

    pub fn with_record(mut self) -> Self {
        self.record = true;
        self
    }
}

/// A document with elements addressable by selector.
pub struct MemoryHost {
    options: EngineOptions,
    elements: RefCell<Vec<(String, Element)>>,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl MemoryHost {
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            elements: RefCell::new(Vec::new()),
        }
    }

    pub fn with_element(self, selector: &str, element: Element) -> Self {
        self.insert(selector, element);
        self
    }

    pub fn insert(&self, selector: &str, element: Element) {
        self.elements
            .borrow_mut()
            .push((selector.to_string(), element));
    }
}

impl Host for MemoryHost {
    type Engine = MemoryEngine;

    fn query_selector(&self, selector: &str) -> Result<Option<Element>, EngineError> {
        Ok(self
            .elements
            .borrow()
            .iter()
            .find(|(s, _)| s == selector)
            .map(|(_, element)| element.clone()))
    }

    fn attach(&self, scope: &Element) -> Result<MemoryEngine, EngineError> {
        if scope.tag_name.is_empty() {
            return Err(EngineError::InvalidScope(
                "element has no tag name".to_string(),
            ));
        }
        Ok(MemoryEngine::new(scope.clone(), self.options.clone()))
    }

    fn global(&self) -> Result<MemoryEngine, EngineError> {
        self.attach(&Element::document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_take_timeout_from_config() {
        let config = Config {
            sequence_timeout_ms: 200,
            ..Config::new_for_test()
        };
        let options = EngineOptions::from_config(&config);

        assert_eq!(options.sequence_timeout, Duration::from_millis(200));
        assert!(!options.pause);
        assert!(!options.record);
    }
}
