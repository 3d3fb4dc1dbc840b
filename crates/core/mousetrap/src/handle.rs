use crate::engine::{Host, KeyEngine, Pausable, Recordable};
use crate::error::MousetrapError;
use crate::types::{Callback, Capabilities, Capability, EventType, Keys};
use config::Config;
use std::cell::Cell;
use std::rc::Rc;

/// Typed handle over one engine instance and the bindings it holds.
///
/// Cloning is cheap and every clone talks to the same instance. The handle
/// is `!Send`: callbacks run on the thread that delivers key events.
pub struct Mousetrap<E: KeyEngine> {
    engine: Rc<E>,
    capabilities: Capabilities,
    // The pause extension only gates key events, so trigger checks this.
    paused: Rc<Cell<bool>>,
}

impl<E: KeyEngine> Clone for Mousetrap<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Rc::clone(&self.engine),
            capabilities: self.capabilities,
            paused: Rc::clone(&self.paused),
        }
    }
}

impl<E: KeyEngine> Mousetrap<E> {
    /// Wrap an engine instance that is already attached to its scope.
    pub fn from_engine(engine: E) -> Result<Self, MousetrapError> {
        Self::from_engine_with(engine, &Config::global())
    }

    pub fn from_engine_with(engine: E, config: &Config) -> Result<Self, MousetrapError> {
        let capabilities = Capabilities {
            pause: engine.pausable().is_some(),
            record: engine.recordable().is_some(),
        };
        let missing = capabilities.missing();
        log::debug!("Engine capabilities: {:?}, missing: {:?}", capabilities, missing);

        for capability in missing {
            let required = match capability {
                Capability::Pause => config.require_pause,
                Capability::Record => config.require_record,
            };
            if required {
                return Err(MousetrapError::CapabilityUnavailable(capability));
            }
        }

        Ok(Self {
            engine: Rc::new(engine),
            capabilities,
            paused: Rc::new(Cell::new(false)),
        })
    }

    /// Attach a new engine instance to `scope`.
    pub fn new<H>(host: &H, scope: &E::Element) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        Self::new_with(host, scope, &Config::global())
    }

    pub fn new_with<H>(
        host: &H,
        scope: &E::Element,
        config: &Config,
    ) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        let engine = host.attach(scope)?;
        Self::from_engine_with(engine, config)
    }

    /// Resolve `selector` against the host document, then attach to the match.
    pub fn from_query_selector<H>(host: &H, selector: &str) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        Self::from_query_selector_with(host, selector, &Config::global())
    }

    pub fn from_query_selector_with<H>(
        host: &H,
        selector: &str,
        config: &Config,
    ) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        if selector.trim().is_empty() {
            return Err(MousetrapError::EmptySelector);
        }

        match host.query_selector(selector)? {
            Some(element) => {
                log::debug!("Attaching engine to `{}`", selector);
                Self::new_with(host, &element, config)
            }
            None => Err(MousetrapError::NoElementForSelector(selector.to_string())),
        }
    }

    /// Wrap the instance listening on the whole document.
    pub fn global<H>(host: &H) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        Self::global_with(host, &Config::global())
    }

    pub fn global_with<H>(host: &H, config: &Config) -> Result<Self, MousetrapError>
    where
        H: Host<Engine = E>,
    {
        let engine = host.global()?;
        Self::from_engine_with(engine, config)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.capabilities.supports(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), MousetrapError> {
        if self.supports(capability) {
            Ok(())
        } else {
            Err(MousetrapError::CapabilityUnavailable(capability))
        }
    }

    pub fn bind<F>(&self, keys: &str, callback: F) -> Result<(), MousetrapError>
    where
        F: Fn() + 'static,
    {
        self.bind_keys(Keys::from(keys), Rc::new(callback), None)
    }

    pub fn bind_multi<S, F>(&self, keys: &[S], callback: F) -> Result<(), MousetrapError>
    where
        S: AsRef<str>,
        F: Fn() + 'static,
    {
        self.bind_keys(Keys::from(keys), Rc::new(callback), None)
    }

    pub fn bind_event<F>(
        &self,
        keys: &str,
        callback: F,
        event_type: EventType,
    ) -> Result<(), MousetrapError>
    where
        F: Fn() + 'static,
    {
        self.bind_keys(Keys::from(keys), Rc::new(callback), Some(event_type))
    }

    pub fn bind_multi_event<S, F>(
        &self,
        keys: &[S],
        callback: F,
        event_type: EventType,
    ) -> Result<(), MousetrapError>
    where
        S: AsRef<str>,
        F: Fn() + 'static,
    {
        self.bind_keys(Keys::from(keys), Rc::new(callback), Some(event_type))
    }

    /// Bind an already shared callback, e.g. one kept around to re-bind later.
    pub fn bind_keys(
        &self,
        keys: Keys,
        callback: Callback,
        event_type: Option<EventType>,
    ) -> Result<(), MousetrapError> {
        if keys.is_empty() {
            return Ok(());
        }
        log::debug!("Binding {} on {:?}", keys, event_type);
        self.engine.bind(&keys, callback, event_type)?;
        Ok(())
    }

    /// Pass `keys` exactly as it was given to `bind`.
    pub fn unbind(&self, keys: &str) -> Result<(), MousetrapError> {
        self.engine.unbind(&Keys::from(keys), None)?;
        Ok(())
    }

    pub fn unbind_event(&self, keys: &str, event_type: EventType) -> Result<(), MousetrapError> {
        self.engine.unbind(&Keys::from(keys), Some(event_type))?;
        Ok(())
    }

    pub fn unbind_multi<S: AsRef<str>>(&self, keys: &[S]) -> Result<(), MousetrapError> {
        let keys = Keys::from(keys);
        if keys.is_empty() {
            return Ok(());
        }
        self.engine.unbind(&keys, None)?;
        Ok(())
    }

    /// Fire the callback bound to exactly `keys`. Does nothing while paused.
    pub fn trigger(&self, keys: &str) -> Result<(), MousetrapError> {
        self.trigger_keys(keys, None)
    }

    pub fn trigger_type(&self, keys: &str, event_type: EventType) -> Result<(), MousetrapError> {
        self.trigger_keys(keys, Some(event_type))
    }

    fn trigger_keys(
        &self,
        keys: &str,
        event_type: Option<EventType>,
    ) -> Result<(), MousetrapError> {
        if self.paused.get() {
            log::debug!("Paused, not triggering {}", keys);
            return Ok(());
        }
        self.engine.trigger(keys, event_type)?;
        Ok(())
    }

    /// Ask the engine whether `combo` should be suppressed for this event.
    pub fn stop_callback(
        &self,
        event: &E::Event,
        element: &E::Element,
        combo: &str,
    ) -> Result<bool, MousetrapError> {
        Ok(self.engine.stop_callback(event, element, combo)?)
    }

    /// Remove every binding. The handle stays attached and usable.
    pub fn reset(&self) -> Result<(), MousetrapError> {
        log::debug!("Resetting bindings");
        self.engine.reset()?;
        Ok(())
    }

    pub fn pause(&self) -> Result<(), MousetrapError> {
        self.pausable()?.pause()?;
        self.paused.set(true);
        Ok(())
    }

    pub fn unpause(&self) -> Result<(), MousetrapError> {
        self.pausable()?.unpause()?;
        self.paused.set(false);
        Ok(())
    }

    pub fn is_paused(&self) -> bool {
        self.paused.get()
    }

    /// Record the next sequence the user types. `callback` runs exactly once.
    pub fn record<F>(&self, callback: F) -> Result<(), MousetrapError>
    where
        F: FnOnce(Vec<String>) + 'static,
    {
        self.recordable()?.record(Box::new(callback))?;
        Ok(())
    }

    fn pausable(&self) -> Result<&dyn Pausable, MousetrapError> {
        self.engine.pausable().ok_or_else(|| {
            log::warn!("pause requested but the engine has no pause extension");
            MousetrapError::CapabilityUnavailable(Capability::Pause)
        })
    }

    fn recordable(&self) -> Result<&dyn Recordable, MousetrapError> {
        self.engine.recordable().ok_or_else(|| {
            log::warn!("record requested but the engine has no record extension");
            MousetrapError::CapabilityUnavailable(Capability::Record)
        })
    }
}
