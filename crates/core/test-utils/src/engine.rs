use crate::dom::{Element, KeyEvent};
use crate::host::EngineOptions;
use instant::Instant;
use mousetrap::{
    Callback, EngineError, EventType, KeyEngine, Keys, Pausable, RecordCallback, Recordable,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

type BindingKey = (String, Option<EventType>);

struct Recording {
    callback: RecordCallback,
    combos: Vec<String>,
    last_press: Option<Instant>,
}

#[derive(Default)]
struct PendingSequence {
    combos: Vec<String>,
    last_press: Option<Instant>,
}

pub struct MemoryEngine {
    scope: Element,
    options: EngineOptions,
    bindings: RefCell<HashMap<BindingKey, Callback>>,
    pending: RefCell<HashMap<EventType, PendingSequence>>,
    paused: Cell<bool>,
    recording: RefCell<Option<Recording>>,
}

impl MemoryEngine {
    pub fn new(scope: Element, options: EngineOptions) -> Self {
        Self {
            scope,
            options,
            bindings: RefCell::new(HashMap::new()),
            pending: RefCell::new(HashMap::new()),
            paused: Cell::new(false),
            recording: RefCell::new(None),
        }
    }

    pub fn scope(&self) -> &Element {
        &self.scope
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.borrow().len()
    }

    pub fn is_bound(&self, keys: &str) -> bool {
        self.bindings.borrow().keys().any(|(k, _)| k == keys)
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    pub fn is_recording(&self) -> bool {
        self.recording.borrow().is_some()
    }

    /// Combos held while waiting for a sequence to complete on `event_type`.
    pub fn pending_len(&self, event_type: EventType) -> usize {
        self.pending
            .borrow()
            .get(&event_type)
            .map_or(0, |sequence| sequence.combos.len())
    }

    /// Press and release `combo` on the scope element right now.
    pub fn press(&self, combo: &str) {
        self.press_at(combo, Instant::now());
    }

    /// Press and release `combo` on the scope element at `at`.
    ///
    /// Emits keydown, keypress (for a lone printable key) and keyup, the way a
    /// browser would.
    pub fn press_at(&self, combo: &str, at: Instant) {
        let target = self.scope.clone();
        self.press_on(combo, at, &target);
    }

    pub fn press_on(&self, combo: &str, at: Instant, target: &Element) {
        self.dispatch(&KeyEvent::new(combo, EventType::KeyDown, at, target.clone()));
        if is_printable(combo) {
            self.dispatch(&KeyEvent::new(combo, EventType::KeyPress, at, target.clone()));
        }
        self.dispatch(&KeyEvent::new(combo, EventType::KeyUp, at, target.clone()));
    }

    /// Feed a single raw event.
    pub fn dispatch(&self, event: &KeyEvent) {
        self.advance_to(event.at);

        if self.capture_for_recording(event) {
            return;
        }

        if self.stop_callback_default(&event.target, &event.combo) {
            log::debug!("Stopped `{}` inside {}", event.combo, event.target.tag_name);
            return;
        }

        if self.paused.get() {
            return;
        }

        if let Some(callback) = self.match_sequence(event) {
            callback();
        }
    }

    /// Let time pass without input; ends a recording that has gone quiet.
    pub fn advance_to(&self, now: Instant) {
        let finished = {
            let mut recording = self.recording.borrow_mut();
            let expired = recording
                .as_ref()
                .and_then(|r| r.last_press)
                .map(|last| now.duration_since(last) > self.options.sequence_timeout)
                .unwrap_or(false);
            if expired {
                recording.take()
            } else {
                None
            }
        };

        if let Some(recording) = finished {
            log::debug!("Recording finished: {:?}", recording.combos);
            (recording.callback)(recording.combos);
        }
    }

    fn capture_for_recording(&self, event: &KeyEvent) -> bool {
        let mut recording = self.recording.borrow_mut();
        let Some(recording) = recording.as_mut() else {
            return false;
        };
        if event.event_type == EventType::KeyDown {
            recording.combos.push(event.combo.clone());
            recording.last_press = Some(event.at);
        }
        true
    }

    fn match_sequence(&self, event: &KeyEvent) -> Option<Callback> {
        let mut pending = self.pending.borrow_mut();
        let sequence = pending.entry(event.event_type).or_default();

        let expired = sequence
            .last_press
            .map(|last| event.at.duration_since(last) > self.options.sequence_timeout)
            .unwrap_or(false);
        if expired {
            sequence.combos.clear();
        }
        sequence.combos.push(event.combo.clone());
        sequence.last_press = Some(event.at);

        let bindings = self.bindings.borrow();
        let longest = bindings
            .keys()
            .map(|(keys, _)| keys.split_whitespace().count())
            .max()
            .unwrap_or(0)
            .max(1);
        if sequence.combos.len() > longest {
            let excess = sequence.combos.len() - longest;
            sequence.combos.drain(..excess);
        }

        let mut best: Option<(usize, Callback)> = None;
        for ((keys, explicit), callback) in bindings.iter() {
            let parts: Vec<&str> = keys.split_whitespace().collect();
            if explicit.unwrap_or_else(|| default_action(&parts)) != event.event_type {
                continue;
            }
            if parts.is_empty() || parts.len() > sequence.combos.len() {
                continue;
            }
            let tail = &sequence.combos[sequence.combos.len() - parts.len()..];
            if tail.iter().map(String::as_str).eq(parts.iter().copied())
                && best.as_ref().map_or(true, |(len, _)| parts.len() > *len)
            {
                best = Some((parts.len(), callback.clone()));
            }
        }

        let (len, callback) = best?;
        if len > 1 {
            sequence.combos.clear();
        }
        Some(callback)
    }

    fn stop_callback_default(&self, element: &Element, _combo: &str) -> bool {
        if element.has_class("mousetrap") || *element == self.scope {
            return false;
        }

        matches!(element.tag_name.as_str(), "INPUT" | "SELECT" | "TEXTAREA")
            || element.content_editable.as_deref() == Some("true")
    }
}

impl KeyEngine for MemoryEngine {
    type Event = KeyEvent;
    type Element = Element;

    fn bind(
        &self,
        keys: &Keys,
        callback: Callback,
        event_type: Option<EventType>,
    ) -> Result<(), EngineError> {
        let mut bindings = self.bindings.borrow_mut();
        for key in keys.iter() {
            bindings.insert((key.to_string(), event_type), callback.clone());
        }
        Ok(())
    }

    fn unbind(&self, keys: &Keys, event_type: Option<EventType>) -> Result<(), EngineError> {
        let mut bindings = self.bindings.borrow_mut();
        for key in keys.iter() {
            bindings.remove(&(key.to_string(), event_type));
        }
        Ok(())
    }

    // Like the real pause plugin, pausing only gates dispatched events.
    fn trigger(&self, keys: &str, event_type: Option<EventType>) -> Result<(), EngineError> {
        let callback = self
            .bindings
            .borrow()
            .get(&(keys.to_string(), event_type))
            .cloned();
        if let Some(callback) = callback {
            callback();
        }
        Ok(())
    }

    fn stop_callback(
        &self,
        _event: &KeyEvent,
        element: &Element,
        combo: &str,
    ) -> Result<bool, EngineError> {
        Ok(self.stop_callback_default(element, combo))
    }

    fn reset(&self) -> Result<(), EngineError> {
        self.bindings.borrow_mut().clear();
        self.pending.borrow_mut().clear();
        Ok(())
    }

    fn pausable(&self) -> Option<&dyn Pausable> {
        if self.options.pause {
            Some(self)
        } else {
            None
        }
    }

    fn recordable(&self) -> Option<&dyn Recordable> {
        if self.options.record {
            Some(self)
        } else {
            None
        }
    }
}

impl Pausable for MemoryEngine {
    fn pause(&self) -> Result<(), EngineError> {
        self.paused.set(true);
        Ok(())
    }

    fn unpause(&self) -> Result<(), EngineError> {
        self.paused.set(false);
        Ok(())
    }
}

impl Recordable for MemoryEngine {
    fn record(&self, callback: RecordCallback) -> Result<(), EngineError> {
        *self.recording.borrow_mut() = Some(Recording {
            callback,
            combos: Vec::new(),
            last_press: None,
        });
        Ok(())
    }
}

/// A lone printable character arrives as keypress; anything with a modifier
/// or a named key is matched on keydown.
fn is_printable(combo: &str) -> bool {
    combo.chars().count() == 1
}

fn default_action(parts: &[&str]) -> EventType {
    if !parts.is_empty() && parts.iter().all(|p| is_printable(p)) {
        EventType::KeyPress
    } else {
        EventType::KeyDown
    }
}
