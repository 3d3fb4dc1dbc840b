use crate::error::MousetrapError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

/// Zero-argument callback fired when a binding matches.
///
/// Shared so the same callback can sit behind several key strings.
pub type Callback = Rc<dyn Fn()>;

/// One-shot callback receiving the recorded combos, in press order.
pub type RecordCallback = Box<dyn FnOnce(Vec<String>)>;

/// Key strings handed to the engine untouched: a combo such as `"ctrl+shift+k"`,
/// a space-separated sequence such as `"g i"`, or a list of either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Keys {
    One(String),
    Many(Vec<String>),
}

impl Keys {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        let slice: &[String] = match self {
            Keys::One(keys) => std::slice::from_ref(keys),
            Keys::Many(list) => list,
        };
        slice.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Keys::One(_) => false,
            Keys::Many(list) => list.is_empty(),
        }
    }
}

impl From<&str> for Keys {
    fn from(keys: &str) -> Self {
        Keys::One(keys.to_string())
    }
}

impl From<String> for Keys {
    fn from(keys: String) -> Self {
        Keys::One(keys)
    }
}

impl<S: AsRef<str>> From<&[S]> for Keys {
    fn from(list: &[S]) -> Self {
        Keys::Many(list.iter().map(|k| k.as_ref().to_string()).collect())
    }
}

impl fmt::Display for Keys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keys::One(keys) => write!(f, "{}", keys),
            Keys::Many(list) => write!(f, "[{}]", list.join(", ")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    KeyPress,
    KeyDown,
    KeyUp,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::KeyPress => "keypress",
            EventType::KeyDown => "keydown",
            EventType::KeyUp => "keyup",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = MousetrapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "keypress" => Ok(EventType::KeyPress),
            "keydown" => Ok(EventType::KeyDown),
            "keyup" => Ok(EventType::KeyUp),
            other => Err(MousetrapError::UnknownEventType(other.to_string())),
        }
    }
}

/// Optional engine extensions that are not present in every build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Capability {
    Pause,
    Record,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Pause => f.write_str("pause/unpause"),
            Capability::Record => f.write_str("record"),
        }
    }
}

/// Which extensions an engine instance exposed when it was wrapped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub pause: bool,
    pub record: bool,
}

impl Capabilities {
    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Pause => self.pause,
            Capability::Record => self.record,
        }
    }

    pub fn missing(&self) -> Vec<Capability> {
        [Capability::Pause, Capability::Record]
            .into_iter()
            .filter(|c| !self.supports(*c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_parses_engine_names() {
        assert_eq!("keyup".parse::<EventType>().unwrap(), EventType::KeyUp);
        assert_eq!("keydown".parse::<EventType>().unwrap(), EventType::KeyDown);
        assert_eq!(EventType::KeyPress.to_string(), "keypress");
    }

    #[test]
    fn event_type_rejects_unknown_names() {
        let err = "click".parse::<EventType>().unwrap_err();
        assert!(matches!(err, MousetrapError::UnknownEventType(ref name) if name == "click"));
    }

    #[test]
    fn keys_iterate_in_order() {
        let keys = Keys::from(&["a", "g i", "ctrl+k"][..]);
        assert_eq!(keys.iter().collect::<Vec<_>>(), vec!["a", "g i", "ctrl+k"]);
        assert_eq!(Keys::from("?").iter().collect::<Vec<_>>(), vec!["?"]);
    }

    #[test]
    fn empty_key_list_is_empty() {
        let none: &[&str] = &[];
        assert!(Keys::from(none).is_empty());
        assert!(!Keys::from("").is_empty());
    }

    #[test]
    fn missing_capabilities_are_listed() {
        let caps = Capabilities {
            pause: true,
            record: false,
        };
        assert!(caps.supports(Capability::Pause));
        assert_eq!(caps.missing(), vec![Capability::Record]);
        assert_eq!(Capabilities::default().missing().len(), 2);
    }
}
