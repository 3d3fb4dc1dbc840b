use crossbeam_channel::{unbounded, Receiver, Sender};
use mousetrap::Mousetrap;
use test_utils::{EngineOptions, MemoryEngine, MemoryHost};

/// Collects callback firings so tests can assert on count and order.
pub struct FireLog {
    sender: Sender<&'static str>,
    receiver: Receiver<&'static str>,
}

impl FireLog {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn callback(&self, label: &'static str) -> impl Fn() + 'static {
        let sender = self.sender.clone();
        move || {
            let _ = sender.send(label);
        }
    }

    pub fn fired(&self) -> Vec<&'static str> {
        self.receiver.try_iter().collect()
    }

    pub fn expect_fired(&self, expected: &[&'static str]) {
        let fired = self.fired();
        if fired != expected {
            panic!("Expected {:?} to fire, got {:?}", expected, fired);
        }
    }

    pub fn expect_nothing(&self) {
        let fired = self.fired();
        if !fired.is_empty() {
            panic!("Expected no callbacks, but got {:?}", fired);
        }
    }
}

#[allow(dead_code)]
pub fn handle() -> Mousetrap<MemoryEngine> {
    handle_with(EngineOptions::default())
}

#[allow(dead_code)]
pub fn handle_with(options: EngineOptions) -> Mousetrap<MemoryEngine> {
    Mousetrap::global(&MemoryHost::new(options)).expect("memory engine attaches")
}

#[allow(dead_code)]
pub fn full_handle() -> Mousetrap<MemoryEngine> {
    handle_with(EngineOptions::default().with_pause().with_record())
}
