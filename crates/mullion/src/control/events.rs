//! Control-specific event types.
//!
//! This module defines the events routed through the control tree: mouse
//! press/release/move, wheel, enter/leave, focus in/out, character input, key
//! press/release, theme changes, and the teardown notification delivered when
//! a control's owning window closes.
//!
//! Every event embeds an [`EventBase`] carrying the accepted flag. A handler
//! that consumes an event either returns `true` from
//! [`Control::event`](super::Control::event) or calls
//! [`ControlEvent::accept`]; both stop the manager from offering the event to
//! anything else.

use mullion_core::Point;

use super::ControlId;

/// Keyboard modifiers that may be held during key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
    /// The Meta/Super key is held.
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Check if any modifier is pressed.
    pub fn any(&self) -> bool {
        self.shift || self.control || self.alt || self.meta
    }

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.any()
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
    /// Additional button 1 (e.g., browser back).
    Button4 = 3,
    /// Additional button 2 (e.g., browser forward).
    Button5 = 4,
}

/// Logical keys delivered by the host.
///
/// The host's raw scancode travels alongside in the key events for anything
/// not covered here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Tab,
    Backspace,
    Enter,
    Space,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Left,
    Right,
    Up,
    Down,
    Shift,
    Control,
    Alt,
    Meta,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    /// A character-producing key, identified by its character.
    Character(char),
    /// A key not otherwise classified.
    Unknown,
}

/// Common data for all control events.
#[derive(Debug, Clone, Copy)]
pub struct EventBase {
    /// Whether the event has been accepted (handled).
    accepted: bool,
}

impl Default for EventBase {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBase {
    /// Create a new event base.
    pub fn new() -> Self {
        Self { accepted: false }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Accept the event, marking it handled.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Ignore the event, clearing the handled mark.
    pub fn ignore(&mut self) {
        self.accepted = false;
    }
}

/// Mouse press event.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Position in control-local coordinates.
    pub local_pos: Point,
    /// Position in screen coordinates.
    pub screen_pos: Point,
}

impl MousePressEvent {
    /// Create a new mouse press event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        screen_pos: Point,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            screen_pos,
        }
    }
}

/// Mouse release event.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The button that was released.
    pub button: MouseButton,
    /// Position in control-local coordinates.
    pub local_pos: Point,
    /// Position in screen coordinates.
    pub screen_pos: Point,
}

impl MouseReleaseEvent {
    /// Create a new mouse release event.
    pub fn new(
        button: MouseButton,
        local_pos: Point,
        screen_pos: Point,
    ) -> Self {
        Self {
            base: EventBase::new(),
            button,
            local_pos,
            screen_pos,
        }
    }
}

/// Mouse move event, delivered only to a captured control.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in control-local coordinates.
    pub local_pos: Point,
    /// Position in screen coordinates.
    pub screen_pos: Point,
}

impl MouseMoveEvent {
    /// Create a new mouse move event.
    pub fn new(local_pos: Point, screen_pos: Point) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            screen_pos,
        }
    }
}

/// Mouse wheel (scroll) event.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Base event data.
    pub base: EventBase,
    /// Position in control-local coordinates.
    pub local_pos: Point,
    /// Position in screen coordinates.
    pub screen_pos: Point,
    /// Scroll delta (positive = away from the user).
    pub delta: f32,
}

impl WheelEvent {
    /// Create a new wheel event.
    pub fn new(
        local_pos: Point,
        screen_pos: Point,
        delta: f32,
    ) -> Self {
        Self {
            base: EventBase::new(),
            local_pos,
            screen_pos,
            delta,
        }
    }
}

/// Pointer entered the control.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnterEvent {
    /// Base event data.
    pub base: EventBase,
}

impl EnterEvent {
    /// Create a new enter event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pointer left the control.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeaveEvent {
    /// Base event data.
    pub base: EventBase,
}

impl LeaveEvent {
    /// Create a new leave event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The control gained keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusInEvent {
    /// Base event data.
    pub base: EventBase,
    /// The control that previously held focus, if any.
    pub old: Option<ControlId>,
}

impl FocusInEvent {
    /// Create a new focus-in event.
    pub fn new(old: Option<ControlId>) -> Self {
        Self {
            base: EventBase::new(),
            old,
        }
    }
}

/// The control lost keyboard focus.
#[derive(Debug, Clone, Copy)]
pub struct FocusOutEvent {
    /// Base event data.
    pub base: EventBase,
    /// The control that is gaining focus, if any.
    pub new: Option<ControlId>,
}

impl FocusOutEvent {
    /// Create a new focus-out event.
    pub fn new(new: Option<ControlId>) -> Self {
        Self {
            base: EventBase::new(),
            new,
        }
    }
}

/// A character was typed while the control held focus.
#[derive(Debug, Clone, Copy)]
pub struct CharEvent {
    /// Base event data.
    pub base: EventBase,
    /// The character produced by the keystroke.
    pub ch: char,
    /// The logical key that produced it.
    pub key: Key,
}

impl CharEvent {
    /// Create a new character event.
    pub fn new(ch: char, key: Key) -> Self {
        Self {
            base: EventBase::new(),
            ch,
            key,
        }
    }
}

/// Key press event.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressEvent {
    /// Base event data.
    pub base: EventBase,
    /// The logical key.
    pub key: Key,
    /// The host's raw scancode.
    pub scancode: u32,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, scancode: u32, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            scancode,
            modifiers,
        }
    }
}

/// Key release event.
#[derive(Debug, Clone, Copy)]
pub struct KeyReleaseEvent {
    /// Base event data.
    pub base: EventBase,
    /// The logical key.
    pub key: Key,
    /// The host's raw scancode.
    pub scancode: u32,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
}

impl KeyReleaseEvent {
    /// Create a new key release event.
    pub fn new(key: Key, scancode: u32, modifiers: KeyboardModifiers) -> Self {
        Self {
            base: EventBase::new(),
            key,
            scancode,
            modifiers,
        }
    }
}

/// The active theme changed; controls should drop cached presentation state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThemeChangedEvent {
    /// Base event data.
    pub base: EventBase,
}

impl ThemeChangedEvent {
    /// Create a new theme-changed event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// The control's owning window is closing; fired exactly once per control.
#[derive(Debug, Clone, Copy, Default)]
pub struct DestroyedEvent {
    /// Base event data.
    pub base: EventBase,
}

impl DestroyedEvent {
    /// Create a new destroyed event.
    pub fn new() -> Self {
        Self::default()
    }
}

/// All events deliverable to a control.
#[derive(Debug, Clone, Copy)]
pub enum ControlEvent {
    /// Mouse press event.
    MousePress(MousePressEvent),
    /// Mouse release event.
    MouseRelease(MouseReleaseEvent),
    /// Mouse move event (capture only).
    MouseMove(MouseMoveEvent),
    /// Mouse wheel event.
    Wheel(WheelEvent),
    /// Pointer enter event.
    Enter(EnterEvent),
    /// Pointer leave event.
    Leave(LeaveEvent),
    /// Focus in event.
    FocusIn(FocusInEvent),
    /// Focus out event.
    FocusOut(FocusOutEvent),
    /// Character typed event.
    Char(CharEvent),
    /// Key press event.
    KeyPress(KeyPressEvent),
    /// Key release event.
    KeyRelease(KeyReleaseEvent),
    /// Theme changed broadcast.
    ThemeChanged(ThemeChangedEvent),
    /// Owning-window teardown notification.
    Destroyed(DestroyedEvent),
}

impl ControlEvent {
    fn base(&self) -> &EventBase {
        match self {
            Self::MousePress(e) => &e.base,
            Self::MouseRelease(e) => &e.base,
            Self::MouseMove(e) => &e.base,
            Self::Wheel(e) => &e.base,
            Self::Enter(e) => &e.base,
            Self::Leave(e) => &e.base,
            Self::FocusIn(e) => &e.base,
            Self::FocusOut(e) => &e.base,
            Self::Char(e) => &e.base,
            Self::KeyPress(e) => &e.base,
            Self::KeyRelease(e) => &e.base,
            Self::ThemeChanged(e) => &e.base,
            Self::Destroyed(e) => &e.base,
        }
    }

    fn base_mut(&mut self) -> &mut EventBase {
        match self {
            Self::MousePress(e) => &mut e.base,
            Self::MouseRelease(e) => &mut e.base,
            Self::MouseMove(e) => &mut e.base,
            Self::Wheel(e) => &mut e.base,
            Self::Enter(e) => &mut e.base,
            Self::Leave(e) => &mut e.base,
            Self::FocusIn(e) => &mut e.base,
            Self::FocusOut(e) => &mut e.base,
            Self::Char(e) => &mut e.base,
            Self::KeyPress(e) => &mut e.base,
            Self::KeyRelease(e) => &mut e.base,
            Self::ThemeChanged(e) => &mut e.base,
            Self::Destroyed(e) => &mut e.base,
        }
    }

    /// Check if the event has been accepted.
    pub fn is_accepted(&self) -> bool {
        self.base().is_accepted()
    }

    /// Accept the event, marking it handled.
    pub fn accept(&mut self) {
        self.base_mut().accept();
    }

    /// Ignore the event, clearing the handled mark.
    pub fn ignore(&mut self) {
        self.base_mut().ignore();
    }
}
