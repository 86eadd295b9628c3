//! Input adapters.
//!
//! Raw events from the window host are published on an [`InputBus`]. Each
//! adapter is a registered [`InputHandler`] that turns the events it
//! understands into [`Command`]s; the session applies them. Adapters are
//! switched on and off individually through [`InputSettings`].

pub mod keyboard;
pub mod pointer;
pub mod swipe;

use tracing::debug;

use crate::session::PresentationSession;

pub use keyboard::KeyboardAdapter;
pub use pointer::PointerAdapter;
pub use swipe::SwipeAdapter;

/// Everything an input source can ask the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    First,
    Last,
    /// 0-based slide index.
    GoTo(usize),
    ExitFullscreen,
    ToggleFullscreen,
    ToggleTimer,
    ToggleHelp,
    HideHelp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
    Digit(u8),
    Char(char),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    /// Cmd on macOS, the Windows/Super key elsewhere.
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        meta: false,
        shift: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        meta: false,
        shift: false,
    };

    pub const SHIFT: Self = Self {
        ctrl: false,
        meta: false,
        shift: true,
    };

    /// Ctrl or Cmd: the platform shortcut modifier.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Previous,
    Next,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key { key: Key, modifiers: Modifiers },
    /// `id` identifies the finger for the lifetime of one touch.
    TouchStart { id: u64, pos: Point },
    TouchEnd { id: u64, pos: Point },
    TouchCancel { id: u64 },
    ButtonClicked(NavButton),
    DoubleClick,
    OverlayClicked,
}

/// A typed input adapter registered on the bus.
pub trait InputHandler {
    fn name(&self) -> &'static str;

    fn handle(&mut self, event: &InputEvent) -> Option<Command>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSettings {
    pub keyboard: bool,
    pub touch: bool,
    pub pointer: bool,
    pub swipe_threshold: f32,
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            keyboard: true,
            touch: true,
            pointer: true,
            swipe_threshold: swipe::DEFAULT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    handler: Box<dyn InputHandler>,
}

#[derive(Default)]
pub struct InputBus {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl InputBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bus with the enabled built-in adapters registered.
    pub fn with_adapters(settings: &InputSettings) -> Self {
        let mut bus = Self::new();
        if settings.keyboard {
            bus.subscribe(Box::new(KeyboardAdapter));
        }
        if settings.touch {
            bus.subscribe(Box::new(SwipeAdapter::new(settings.swipe_threshold)));
        }
        if settings.pointer {
            bus.subscribe(Box::new(PointerAdapter));
        }
        bus
    }

    pub fn subscribe(&mut self, handler: Box<dyn InputHandler>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        debug!(adapter = handler.name(), id = id.0, "input adapter subscribed");
        self.subscriptions.push(Subscription { id, handler });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Unregister every handler in registration order. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.subscriptions.len();
        for sub in self.subscriptions.drain(..) {
            debug!(adapter = sub.handler.name(), id = sub.id.0, "input adapter unsubscribed");
        }
        count
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn adapter_names(&self) -> Vec<&'static str> {
        self.subscriptions.iter().map(|s| s.handler.name()).collect()
    }

    /// Offer an event to every handler and collect the resulting commands.
    pub fn publish(&mut self, event: &InputEvent) -> Vec<Command> {
        self.subscriptions
            .iter_mut()
            .filter_map(|s| s.handler.handle(event))
            .collect()
    }

    /// Publish an event and apply the resulting commands to the session.
    pub fn dispatch(&mut self, event: &InputEvent, session: &mut PresentationSession) -> usize {
        let commands = self.publish(event);
        for command in &commands {
            session.apply(*command);
        }
        commands.len()
    }
}

impl Drop for InputBus {
    fn drop(&mut self) {
        self.clear();
    }
}
