use instant::Instant;
use mousetrap::EventType;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub tag_name: String,
    pub class_name: String,
    pub content_editable: Option<String>,
    pub id: Option<String>,
}

impl Element {
    pub fn new(tag_name: &str) -> Self {
        Self {
            tag_name: tag_name.to_ascii_uppercase(),
            ..Self::default()
        }
    }

    pub fn document() -> Self {
        Self::new("html")
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn with_class(mut self, class_name: &str) -> Self {
        self.class_name = class_name.to_string();
        self
    }

    pub fn editable(mut self) -> Self {
        self.content_editable = Some("true".to_string());
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class)
    }
}

/// One raw key event as the engine would receive it from the DOM.
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub combo: String,
    pub event_type: EventType,
    pub at: Instant,
    pub target: Element,
}

impl KeyEvent {
    pub fn new(combo: &str, event_type: EventType, at: Instant, target: Element) -> Self {
        Self {
            combo: combo.to_string(),
            event_type,
            at,
            target,
        }
    }
}
