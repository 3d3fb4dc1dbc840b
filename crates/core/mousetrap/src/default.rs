use crate::engine::KeyEngine;
use crate::error::MousetrapError;
use crate::handle::Mousetrap;
use std::cell::OnceCell;

/// Slot for the process-wide default handle.
///
/// Backends keep one in a `thread_local!` and either fill it explicitly at
/// startup with [`DefaultHandle::init`] or lazily through
/// [`DefaultHandle::get_or_try_init`]. Once set it never changes.
pub struct DefaultHandle<E: KeyEngine> {
    cell: OnceCell<Mousetrap<E>>,
}

impl<E: KeyEngine> Default for DefaultHandle<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: KeyEngine> DefaultHandle<E> {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    pub fn init(&self, handle: Mousetrap<E>) -> Result<&Mousetrap<E>, MousetrapError> {
        self.cell
            .set(handle)
            .map_err(|_| MousetrapError::DefaultAlreadyInitialized)?;
        log::debug!("Default handle initialized");
        self.get()
    }

    pub fn get(&self) -> Result<&Mousetrap<E>, MousetrapError> {
        self.cell.get().ok_or(MousetrapError::DefaultNotInitialized)
    }

    pub fn get_or_try_init<F>(&self, init: F) -> Result<&Mousetrap<E>, MousetrapError>
    where
        F: FnOnce() -> Result<Mousetrap<E>, MousetrapError>,
    {
        if let Some(handle) = self.cell.get() {
            return Ok(handle);
        }
        let handle = init()?;
        // `init` may have filled the slot itself; the first value wins.
        let _ = self.cell.set(handle);
        self.get()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
