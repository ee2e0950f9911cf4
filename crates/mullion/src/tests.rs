//! Integration tests for the windowing core: focus/capture/drag arbitration,
//! modal precedence, hover tracking, layout laziness, and teardown.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use mullion_core::{Color, Point, Rect, Size};

use crate::control::{
    Control, ControlBase, ControlEvent, ControlId, Draggable, EventContext, Key,
    KeyboardModifiers, MouseButton, PaintContext, PaintSurface,
};
use crate::layout::{LayoutContext, LayoutEngine};
use crate::window::{MultiWindowManager, SingleWindowManager};

type EventLog = Arc<Mutex<Vec<String>>>;

fn new_log() -> EventLog {
    Arc::new(Mutex::new(Vec::new()))
}

fn log_entries(log: &EventLog) -> Vec<String> {
    log.lock().unwrap().clone()
}

fn log_count(log: &EventLog, entry: &str) -> usize {
    log.lock().unwrap().iter().filter(|e| *e == entry).count()
}

/// A control that records every event it sees into a shared log as
/// `"<name>:<tag>"`, with knobs for the behaviors under test.
struct Probe {
    base: ControlBase,
    log: EventLog,
    slot: Option<Box<dyn Draggable>>,
    accepts_drop_policy: bool,
    focus_on_click: bool,
    consume_keys: bool,
    panic_on_key: bool,
    capture_on_press: bool,
    paint_color: Option<Color>,
}

impl Probe {
    fn new(name: &str, log: &EventLog) -> Box<Self> {
        Box::new(Self {
            base: ControlBase::new(name),
            log: Arc::clone(log),
            slot: None,
            accepts_drop_policy: false,
            focus_on_click: true,
            consume_keys: false,
            panic_on_key: false,
            capture_on_press: false,
            paint_color: None,
        })
    }

    fn record(&self, tag: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.base.name(), tag));
    }
}

impl Control for Probe {
    fn control_base(&self) -> &ControlBase {
        &self.base
    }

    fn control_base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        if let Some(color) = self.paint_color {
            ctx.fill_rect(ctx.rect(), color);
        }
    }

    fn event(&mut self, event: &mut ControlEvent, ctx: &mut EventContext<'_>) -> bool {
        let tag = match event {
            ControlEvent::MousePress(_) => "press",
            ControlEvent::MouseRelease(_) => "release",
            ControlEvent::MouseMove(_) => "move",
            ControlEvent::Wheel(_) => "wheel",
            ControlEvent::Enter(_) => "enter",
            ControlEvent::Leave(_) => "leave",
            ControlEvent::FocusIn(_) => "focus-in",
            ControlEvent::FocusOut(_) => "focus-out",
            ControlEvent::Char(_) => "char",
            ControlEvent::KeyPress(_) => "key-down",
            ControlEvent::KeyRelease(_) => "key-up",
            ControlEvent::ThemeChanged(_) => "theme",
            ControlEvent::Destroyed(_) => "destroyed",
        };
        self.record(tag);

        match event {
            ControlEvent::MousePress(_) if self.capture_on_press => {
                ctx.capture_mouse();
                true
            }
            ControlEvent::KeyPress(_) if self.panic_on_key => {
                panic!("probe asked to panic");
            }
            ControlEvent::KeyPress(_) | ControlEvent::KeyRelease(_) | ControlEvent::Char(_) => {
                self.consume_keys
            }
            _ => false,
        }
    }

    fn can_accept_focus(&self) -> bool {
        self.focus_on_click
    }

    fn can_accept_drop(&self, _item: &dyn Draggable) -> bool {
        self.accepts_drop_policy
    }

    fn set_draggable(&mut self, item: Option<Box<dyn Draggable>>) {
        self.slot = item;
    }

    fn take_draggable(&mut self) -> Option<Box<dyn Draggable>> {
        self.slot.take()
    }

    fn has_draggable(&self) -> bool {
        self.slot.is_some()
    }
}

/// A minimal draggable item.
struct Token;

impl Draggable for Token {
    fn size(&self) -> Size {
        Size::new(16.0, 16.0)
    }

    fn paint(&self, ctx: &mut PaintContext<'_>) {
        ctx.fill_rect(ctx.rect(), Color::WHITE);
    }
}

/// A layout engine that counts how often it runs.
struct CountingLayout(Arc<AtomicUsize>);

impl LayoutEngine for CountingLayout {
    fn arrange(&mut self, _area: Rect, _ctx: &mut LayoutContext<'_>) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

/// A paint surface that records fills in call order.
#[derive(Default)]
struct RecordingSurface {
    fills: Vec<(Rect, Color)>,
}

impl PaintSurface for RecordingSurface {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }

    fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: f32) {}
}

/// Single-window manager with a 100x100 window at the origin: root container
/// (not click-focusable) plus two probes side by side.
fn simple_surface(log: &EventLog) -> (SingleWindowManager, ControlId, ControlId, ControlId) {
    let mut manager = SingleWindowManager::new();
    let tree = manager.controls_mut();

    let mut root = Probe::new("root", log);
    root.focus_on_click = false;
    let root = tree.insert(root);
    let a = tree.insert(Probe::new("a", log));
    let b = tree.insert(Probe::new("b", log));
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();
    tree.set_bounds(a, Rect::new(0.0, 0.0, 50.0, 100.0));
    tree.set_bounds(b, Rect::new(50.0, 0.0, 50.0, 100.0));

    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);
    (manager, root, a, b)
}

// =============================================================================
// Focus
// =============================================================================

#[test]
fn at_most_one_focus_holder() {
    let log = new_log();
    let (mut manager, root, a, b) = simple_surface(&log);

    manager.set_focus(Some(a));
    manager.set_focus(Some(b));

    let tree = manager.controls();
    let holders = [root, a, b]
        .iter()
        .filter(|&&id| tree.base(id).unwrap().has_focus())
        .count();
    assert_eq!(holders, 1);
    assert!(tree.base(b).unwrap().has_focus());

    // a heard exactly one gained-focus and one lost-focus, in order.
    let entries = log_entries(&log);
    assert_eq!(
        entries,
        vec!["a:focus-in", "a:focus-out", "b:focus-in"]
    );

    manager.set_focus(None);
    assert_eq!(manager.focused_control(), None);
    assert!(!manager.controls().base(b).unwrap().has_focus());
}

#[test]
fn press_moves_focus_before_delivery() {
    let log = new_log();
    let (mut manager, _root, a, _b) = simple_surface(&log);

    assert!(manager.pointer_down(10.0, 10.0, MouseButton::Left));
    assert_eq!(manager.focused_control(), Some(a));
    // The handler observed itself focused: focus-in preceded press.
    assert_eq!(log_entries(&log), vec!["a:focus-in", "a:press"]);
}

#[test]
fn focus_broadcast_clears_non_owning_windows() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let r2 = tree.insert(Probe::new("r2", &log));
    let a = tree.insert(Probe::new("a", &log));
    let b = tree.insert(Probe::new("b", &log));
    tree.add_child(r1, a).unwrap();
    tree.add_child(r2, b).unwrap();

    let w1 = manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    let w2 = manager.create_window(r2, false, 200.0, 0.0, 100.0, 100.0);

    manager.set_focus(w1, Some(a));
    assert_eq!(manager.window(w1).unwrap().focus_control(), Some(a));

    manager.set_focus(w2, Some(b));
    assert_eq!(manager.window(w2).unwrap().focus_control(), Some(b));
    // The non-owning window dropped its local memory.
    assert_eq!(manager.window(w1).unwrap().focus_control(), None);
}

#[test]
fn tab_navigation_wraps() {
    let log = new_log();
    let (mut manager, _root, a, b) = simple_surface(&log);
    {
        let tree = manager.controls_mut();
        tree.base_mut(a).unwrap().set_tab_index(0);
        tree.base_mut(b).unwrap().set_tab_index(1);
    }

    assert!(manager.focus_next());
    assert_eq!(manager.focused_control(), Some(a));
    assert!(manager.focus_next());
    assert_eq!(manager.focused_control(), Some(b));
    assert!(manager.focus_next());
    assert_eq!(manager.focused_control(), Some(a));
    assert!(manager.focus_previous());
    assert_eq!(manager.focused_control(), Some(b));
}

// =============================================================================
// Capture
// =============================================================================

#[test]
fn capture_routes_all_pointer_events() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let r2 = tree.insert(Probe::new("r2", &log));
    let grab = tree.insert(Probe::new("grab", &log));
    let other = tree.insert(Probe::new("other", &log));
    tree.add_child(r1, grab).unwrap();
    tree.add_child(r2, other).unwrap();
    tree.set_bounds(grab, Rect::new(0.0, 0.0, 100.0, 100.0));
    tree.set_bounds(other, Rect::new(0.0, 0.0, 100.0, 100.0));

    let w1 = manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    let _w2 = manager.create_window(r2, false, 200.0, 0.0, 100.0, 100.0);

    manager.capture_mouse(w1, grab);
    assert!(manager.is_mouse_captured());

    // Pointer is physically over the second window; the capture target gets
    // the events anyway, and nothing else does.
    assert!(manager.pointer_move(250.0, 50.0));
    assert!(manager.pointer_up(250.0, 50.0, MouseButton::Left));
    assert!(manager.wheel(250.0, 50.0, 1.0));

    let entries = log_entries(&log);
    assert_eq!(entries, vec!["grab:move", "grab:release", "grab:wheel"]);

    manager.release_mouse();
    assert!(!manager.is_mouse_captured());
    assert!(!manager.pointer_move(250.0, 50.0));
}

#[test]
fn capture_coordinates_are_control_local() {
    let log = new_log();
    let (mut manager, _root, _a, b) = simple_surface(&log);

    // b sits at (50, 0) within the window; capture it and poke at (60, 10).
    manager.capture_mouse(b);
    manager.pointer_move(60.0, 10.0);

    // The translated local position lands inside b's 50x100 rect.
    let local = manager.controls().screen_to_local(b, Point::new(60.0, 10.0));
    assert_eq!(local, Point::new(10.0, 10.0));
}

// =============================================================================
// Drag and drop
// =============================================================================

#[test]
fn unaccepted_drop_pushes_payload_back() {
    let log = new_log();
    let (mut manager, _root, a, _b) = simple_surface(&log);

    manager.start_dragging(Box::new(Token), a);
    assert!(manager.is_dragging());

    // Nothing in this tree exposes the drop-target capability; the drop
    // resolves by push-back, never leaving a dangling payload.
    assert!(manager.pointer_down(75.0, 50.0, MouseButton::Left));
    assert!(!manager.is_dragging());
    assert!(manager.controls().control(a).unwrap().has_draggable());
}

#[test]
fn right_click_cancels_drag() {
    let log = new_log();
    let (mut manager, _root, a, _b) = simple_surface(&log);

    manager.start_dragging(Box::new(Token), a);
    assert!(manager.pointer_down(10.0, 10.0, MouseButton::Right));
    assert!(!manager.is_dragging());
    assert!(manager.controls().control(a).unwrap().has_draggable());
}

#[test]
fn accepted_drop_lands_in_target_slot() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();

    let tree = manager.controls_mut();
    let mut root = Probe::new("root", &log);
    root.focus_on_click = false;
    let root = tree.insert(root);
    let source = tree.insert(Probe::new("source", &log));
    let mut sink = Probe::new("sink", &log);
    sink.accepts_drop_policy = true;
    sink.base.set_accepts_drops(true);
    let sink = tree.insert(sink);
    tree.add_child(root, source).unwrap();
    tree.add_child(root, sink).unwrap();
    tree.set_bounds(source, Rect::new(0.0, 0.0, 50.0, 100.0));
    tree.set_bounds(sink, Rect::new(50.0, 0.0, 50.0, 100.0));

    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);

    manager.start_dragging(Box::new(Token), source);
    assert!(manager.pointer_down(75.0, 50.0, MouseButton::Left));
    assert!(!manager.is_dragging());
    assert!(manager.controls().control(sink).unwrap().has_draggable());
    assert!(!manager.controls().control(source).unwrap().has_draggable());
}

#[test]
fn drop_target_with_rejecting_policy_pushes_back() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();

    let tree = manager.controls_mut();
    let source = tree.insert(Probe::new("source", &log));
    // Exposes the capability but rejects this particular item.
    let mut picky = Probe::new("picky", &log);
    picky.base.set_accepts_drops(true);
    picky.accepts_drop_policy = false;
    let root = tree.insert(picky);
    tree.add_child(root, source).unwrap();
    tree.set_bounds(source, Rect::new(0.0, 0.0, 10.0, 10.0));

    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);

    manager.start_dragging(Box::new(Token), source);
    assert!(manager.pointer_down(50.0, 50.0, MouseButton::Left));
    assert!(!manager.is_dragging());
    assert!(manager.controls().control(source).unwrap().has_draggable());
    assert!(!manager.controls().control(root).unwrap().has_draggable());
}

#[test]
fn drag_payload_paints_centered_on_pointer() {
    let log = new_log();
    let (mut manager, _root, a, _b) = simple_surface(&log);

    manager.start_dragging(Box::new(Token), a);
    manager.pointer_move(40.0, 40.0);

    let mut surface = RecordingSurface::default();
    manager.paint_foreground(&mut surface);
    assert_eq!(surface.fills.len(), 1);
    // 16x16 token centered on (40, 40): top-left at (32, 32).
    assert_eq!(surface.fills[0].0, Rect::new(32.0, 32.0, 16.0, 16.0));
}

// =============================================================================
// Window routing
// =============================================================================

#[test]
fn modal_window_blocks_modeless_input() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let p1 = tree.insert(Probe::new("p1", &log));
    tree.add_child(r1, p1).unwrap();
    tree.set_bounds(p1, Rect::new(0.0, 0.0, 100.0, 100.0));
    let r2 = tree.insert(Probe::new("r2", &log));
    let rm = tree.insert(Probe::new("rm", &log));

    manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    manager.create_window(r2, false, 0.0, 100.0, 100.0, 100.0);
    let modal = manager.create_window(rm, true, 200.0, 200.0, 100.0, 100.0);

    // The point lies inside the first modeless window, but only the modal
    // window is interactive.
    assert!(!manager.pointer_down(50.0, 50.0, MouseButton::Left));
    assert_eq!(log_count(&log, "p1:press"), 0);

    // Inside the modal window input flows normally.
    assert!(manager.pointer_down(250.0, 250.0, MouseButton::Left));

    // Closing the top modal re-activates what is below it; with an empty
    // stack the modeless windows are interactive again.
    manager.close_window(modal);
    assert!(manager.pointer_down(50.0, 50.0, MouseButton::Left));
    assert_eq!(log_count(&log, "p1:press"), 1);
}

#[test]
fn modal_stack_pops_to_next_modal() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("m1", &log));
    let r2 = tree.insert(Probe::new("m2", &log));
    let m1 = manager.create_window(r1, true, 0.0, 0.0, 100.0, 100.0);
    let m2 = manager.create_window(r2, true, 200.0, 0.0, 100.0, 100.0);

    assert_eq!(manager.active_modal(), Some(m2));
    assert!(!manager.pointer_down(50.0, 50.0, MouseButton::Left));

    manager.close_window(m2);
    assert_eq!(manager.active_modal(), Some(m1));
    assert!(manager.pointer_down(50.0, 50.0, MouseButton::Left));
}

#[test]
fn insertion_order_wins_input_paint_order_wins_occlusion() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();

    let tree = manager.controls_mut();
    let mut root = Probe::new("root", &log);
    root.focus_on_click = false;
    let root = tree.insert(root);
    let mut a = Probe::new("a", &log);
    a.paint_color = Some(Color::from_rgb8(200, 60, 40));
    let a = tree.insert(a);
    let mut b = Probe::new("b", &log);
    b.paint_color = Some(Color::from_rgb8(40, 60, 200));
    let b = tree.insert(b);
    tree.add_child(root, a).unwrap();
    tree.add_child(root, b).unwrap();
    // Overlapping siblings, both covering (5, 5).
    tree.set_bounds(a, Rect::new(0.0, 0.0, 10.0, 10.0));
    tree.set_bounds(b, Rect::new(0.0, 0.0, 10.0, 10.0));

    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);

    // Input priority: a, added first, receives the press even though b is
    // painted over it.
    assert!(manager.pointer_down(5.0, 5.0, MouseButton::Left));
    assert_eq!(log_count(&log, "a:press"), 1);
    assert_eq!(log_count(&log, "b:press"), 0);

    // Paint order: a first, then b on top.
    let mut surface = RecordingSurface::default();
    manager.paint_background(&mut surface);
    assert_eq!(surface.fills.len(), 2);
    assert_eq!(surface.fills[0].1, Color::from_rgb8(200, 60, 40));
    assert_eq!(surface.fills[1].1, Color::from_rgb8(40, 60, 200));
}

#[test]
fn hidden_window_reports_no_match_and_unhandled() {
    let log = new_log();
    let (mut manager, _root, _a, _b) = simple_surface(&log);

    assert!(manager.pointer_down(10.0, 10.0, MouseButton::Left));

    // Hide the root container: content visibility goes false on the next
    // tick and the window stops matching.
    let root = manager.window().unwrap().root();
    manager.controls_mut().base_mut(root).unwrap().set_visible(false);
    manager.update();
    assert!(!manager.window().unwrap().is_content_visible());
    assert!(!manager.pointer_down(10.0, 10.0, MouseButton::Left));

    // The hidden flag gates input the same way, independent of content.
    manager.controls_mut().base_mut(root).unwrap().set_visible(true);
    manager.update();
    manager.window_mut().unwrap().set_hidden(true);
    assert!(!manager.pointer_down(10.0, 10.0, MouseButton::Left));
    manager.window_mut().unwrap().set_hidden(false);
    assert!(manager.pointer_down(10.0, 10.0, MouseButton::Left));
}

#[test]
fn manager_without_window_degrades_to_noop() {
    let mut manager = SingleWindowManager::new();

    assert!(!manager.pointer_down(10.0, 10.0, MouseButton::Left));
    assert!(!manager.pointer_up(10.0, 10.0, MouseButton::Left));
    assert!(!manager.pointer_move(10.0, 10.0));
    assert!(!manager.wheel(10.0, 10.0, 1.0));
    assert!(!manager.key_down(Key::Enter, 28, KeyboardModifiers::NONE));
    assert!(!manager.char_typed('x', Key::Character('x')));
    assert!(!manager.focus_next());
    manager.set_focus(None);
    manager.update();
    manager.reset();
}

// =============================================================================
// Hover tracking
// =============================================================================

#[test]
fn update_fires_one_leave_then_one_enter() {
    let log = new_log();
    let (mut manager, _root, a, b) = simple_surface(&log);

    manager.pointer_move(10.0, 10.0);
    manager.update();
    assert_eq!(manager.window().unwrap().hot_control(), Some(a));
    assert_eq!(log_count(&log, "a:enter"), 1);

    // No change, no extra notifications.
    manager.update();
    assert_eq!(log_count(&log, "a:enter"), 1);

    manager.pointer_move(75.0, 10.0);
    manager.update();
    assert_eq!(log_count(&log, "a:leave"), 1);
    assert_eq!(log_count(&log, "b:enter"), 1);
    assert_eq!(manager.window().unwrap().hot_control(), Some(b));
    assert!(manager.controls().base(b).unwrap().is_hovered());
    assert!(!manager.controls().base(a).unwrap().is_hovered());
}

#[test]
fn hover_suppressed_while_dragging_except_drop_targets() {
    let log = new_log();
    let (mut manager, _root, a, b) = simple_surface(&log);
    manager
        .controls_mut()
        .base_mut(b)
        .unwrap()
        .set_accepts_drops(true);

    manager.start_dragging(Box::new(Token), a);

    // Over a plain control: hover update suppressed entirely.
    manager.pointer_move(10.0, 10.0);
    manager.update();
    assert_eq!(log_count(&log, "a:enter"), 0);
    assert_eq!(manager.window().unwrap().hot_control(), None);

    // Over a drop target: the update goes through.
    manager.pointer_move(75.0, 10.0);
    manager.update();
    assert_eq!(log_count(&log, "b:enter"), 1);
    assert_eq!(manager.window().unwrap().hot_control(), Some(b));
}

// =============================================================================
// Keyboard routing
// =============================================================================

#[test]
fn keys_go_to_focus_target_first() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();

    let tree = manager.controls_mut();
    let mut root = Probe::new("root", &log);
    root.focus_on_click = false;
    let root = tree.insert(root);
    let mut field = Probe::new("field", &log);
    field.consume_keys = true;
    let field = tree.insert(field);
    tree.add_child(root, field).unwrap();
    tree.set_bounds(field, Rect::new(0.0, 0.0, 100.0, 100.0));

    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);

    // Without a focus target nothing consumes.
    assert!(!manager.key_down(Key::Enter, 28, KeyboardModifiers::NONE));

    manager.set_focus(Some(field));
    assert!(manager.key_down(Key::Enter, 28, KeyboardModifiers::NONE));
    assert!(manager.char_typed('x', Key::Character('x')));
    assert!(manager.key_up(Key::Enter, 28, KeyboardModifiers::NONE));
    assert_eq!(log_count(&log, "field:key-down"), 1);
    assert_eq!(log_count(&log, "field:char"), 1);
}

#[test]
fn panicking_control_cannot_break_key_dispatch() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();

    let tree = manager.controls_mut();
    let mut bad = Probe::new("bad", &log);
    bad.panic_on_key = true;
    let root = tree.insert(bad);
    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);
    manager.set_focus(Some(root));

    // The panic is contained and the event reported unhandled.
    assert!(!manager.key_down(Key::Enter, 28, KeyboardModifiers::NONE));

    // The manager is still fully functional afterwards.
    assert!(manager.pointer_down(50.0, 50.0, MouseButton::Left));
}

// =============================================================================
// Layout invalidation
// =============================================================================

#[test]
fn three_mutations_one_layout_pass() {
    let log = new_log();
    let mut manager = SingleWindowManager::new();
    let runs = Arc::new(AtomicUsize::new(0));

    let tree = manager.controls_mut();
    let mut root = Probe::new("root", &log);
    root.focus_on_click = false;
    let root = tree.insert(root);
    tree.set_layout_engine(root, Some(Box::new(CountingLayout(Arc::clone(&runs)))));

    for name in ["a", "b", "c"] {
        let child = tree.insert(Probe::new(name, &log));
        tree.add_child(root, child).unwrap();
    }
    manager.create_window(root, false, 0.0, 0.0, 100.0, 100.0);
    assert_eq!(runs.load(Ordering::SeqCst), 0);

    // First hit test runs the engine exactly once for all three additions.
    manager.pointer_down(10.0, 10.0, MouseButton::Left);
    assert_eq!(runs.load(Ordering::SeqCst), 1);

    // No further structural change, no further pass.
    manager.pointer_down(10.0, 10.0, MouseButton::Left);
    let mut surface = RecordingSurface::default();
    manager.paint_background(&mut surface);
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

// =============================================================================
// Broadcasts, validation, teardown
// =============================================================================

#[test]
fn theme_change_reaches_every_control_in_every_window() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let a = tree.insert(Probe::new("a", &log));
    tree.add_child(r1, a).unwrap();
    let r2 = tree.insert(Probe::new("r2", &log));

    manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    manager.create_window(r2, true, 200.0, 0.0, 100.0, 100.0);

    manager.notify_theme_changed();
    for name in ["r1", "a", "r2"] {
        assert_eq!(log_count(&log, &format!("{name}:theme")), 1);
    }
}

#[test]
fn validate_accumulates_across_windows() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let dup1 = tree.insert(Probe::new("twin", &log));
    let dup2 = tree.insert(Probe::new("twin", &log));
    tree.add_child(r1, dup1).unwrap();
    tree.add_child(r1, dup2).unwrap();
    let r2 = tree.insert(Probe::new("r2", &log));
    let bad = tree.insert(Probe::new("bad", &log));
    tree.add_child(r2, bad).unwrap();
    tree.base_mut(bad).unwrap().set_bounds(Rect::new(0.0, 0.0, -1.0, 5.0));

    manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    manager.create_window(r2, false, 0.0, 100.0, 100.0, 100.0);

    let mut problems = Vec::new();
    manager.validate(&mut problems);
    assert!(problems.iter().any(|p| p.contains("twin")));
    assert!(problems.iter().any(|p| p.contains("bad")));
}

#[test]
fn close_notifies_each_control_exactly_once() {
    let log = new_log();
    let (mut manager, _root, a, _b) = simple_surface(&log);

    manager.set_focus(Some(a));
    manager.capture_mouse(a);
    manager.start_dragging(Box::new(Token), a);

    manager.close_window();
    for name in ["root", "a", "b"] {
        assert_eq!(log_count(&log, &format!("{name}:destroyed")), 1);
    }
    assert!(manager.controls().is_empty());
    assert_eq!(manager.focused_control(), None);
    assert!(!manager.is_mouse_captured());
    assert!(!manager.is_dragging());
}

#[test]
fn reset_tears_down_all_windows() {
    let log = new_log();
    let mut manager = MultiWindowManager::new();

    let tree = manager.controls_mut();
    let r1 = tree.insert(Probe::new("r1", &log));
    let a = tree.insert(Probe::new("a", &log));
    tree.add_child(r1, a).unwrap();
    let r2 = tree.insert(Probe::new("r2", &log));

    let w1 = manager.create_window(r1, false, 0.0, 0.0, 100.0, 100.0);
    manager.create_window(r2, true, 200.0, 0.0, 100.0, 100.0);
    manager.set_focus(w1, Some(a));
    manager.start_dragging(Box::new(Token), a);

    manager.reset();
    for name in ["r1", "a", "r2"] {
        assert_eq!(log_count(&log, &format!("{name}:destroyed")), 1);
    }
    assert_eq!(manager.window_count(), 0);
    assert_eq!(manager.active_modal(), None);
    assert_eq!(manager.focused_control(), None);
    assert!(!manager.is_dragging());
    assert!(manager.controls().is_empty());
}
