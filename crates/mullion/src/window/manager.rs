//! The windows manager: input routing, focus/capture/drag arbitration, and
//! window lifecycle.
//!
//! Two variants share one contract:
//!
//! - [`SingleWindowManager`] owns zero or one window; every operation
//!   degrades to a no-op while no window exists.
//! - [`MultiWindowManager`] owns a list of modeless windows plus a modal
//!   stack. While the stack is non-empty only the top modal window is
//!   interactive; otherwise modeless windows are offered input in
//!   registration order, stopping at the first that reports handled.
//!
//! Every host input event resolves in the same order: an active drag gesture
//! first, then an active pointer capture (move/release/wheel only), then the
//! interactive window set. Keyboard events skip window hit-testing entirely
//! and go straight to the system-wide focus target, falling back to the
//! interactive windows' locally-remembered focus controls.

use std::panic::{AssertUnwindSafe, catch_unwind};

use slotmap::SlotMap;
use tracing::{debug, error, trace};

use mullion_core::logging::targets;
use mullion_core::{Point, Rect};

use crate::control::{
    CharEvent, ControlEvent, ControlId, ControlTree, DestroyedEvent, Draggable, EnterEvent,
    EventContext, FocusInEvent, FocusOutEvent, InputArbiter, Key, KeyPressEvent, KeyReleaseEvent,
    KeyboardModifiers, LeaveEvent, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, PaintContext, PaintSurface, ThemeChangedEvent, WheelEvent,
};

use super::window::{Window, WindowId};

/// Shared state and input pipeline behind both manager variants.
///
/// Methods that resolve input take the interactive window set as a slice in
/// priority order; the variants decide what that set is.
struct ManagerCore {
    controls: ControlTree,
    windows: SlotMap<WindowId, Window>,
    arbiter: InputArbiter,
}

impl ManagerCore {
    fn new() -> Self {
        Self {
            controls: ControlTree::new(),
            windows: SlotMap::with_key(),
            arbiter: InputArbiter::new(),
        }
    }

    // =========================================================================
    // Window lifecycle
    // =========================================================================

    fn create_window(&mut self, root: ControlId, modal: bool, rect: Rect) -> WindowId {
        self.controls.set_bounds(root, rect);
        let id = self.windows.insert(Window::new(root, modal));
        debug!(target: targets::MANAGER, window = ?id, modal, "window created");
        id
    }

    /// Close a window: every control in its tree is notified exactly once,
    /// then the subtree is removed and any arbitration state pointing into it
    /// is dropped.
    fn close_window(&mut self, id: WindowId) {
        let Some(window) = self.windows.remove(id) else {
            return;
        };
        let subtree = self.controls.subtree_ids(window.root());

        if self.arbiter.focus().is_some_and(|(w, _)| w == id) {
            self.arbiter.set_focus_pair(None);
        }
        if self.arbiter.capture().is_some_and(|(w, _)| w == id) {
            self.arbiter.clear_capture();
        }
        if self
            .arbiter
            .drag()
            .is_some_and(|payload| subtree.contains(&payload.source()))
        {
            // The payload's source is going away; nowhere to push back to.
            self.arbiter.take_drag();
        }

        for &control in &subtree {
            let mut event = ControlEvent::Destroyed(DestroyedEvent::new());
            self.deliver(id, control, &mut event);
        }
        for window in self.windows.values_mut() {
            window.forget_controls(&subtree);
        }
        self.controls.remove_subtree(window.root());
        debug!(target: targets::MANAGER, window = ?id, "window closed");
    }

    /// Host surface torn down: notify every control once, then drop all
    /// windows and arbitration state.
    fn reset(&mut self) {
        let roots: Vec<(WindowId, ControlId)> = self
            .windows
            .iter()
            .map(|(id, window)| (id, window.root()))
            .collect();
        for (window, root) in roots {
            for control in self.controls.subtree_ids(root) {
                let mut event = ControlEvent::Destroyed(DestroyedEvent::new());
                self.deliver(window, control, &mut event);
            }
        }
        self.windows.clear();
        self.controls.clear();
        self.arbiter.reset();
        debug!(target: targets::MANAGER, "manager reset");
    }

    // =========================================================================
    // Event delivery
    // =========================================================================

    fn deliver(&mut self, window: WindowId, control: ControlId, event: &mut ControlEvent) -> bool {
        let mut ctx = EventContext::new(window, control, &mut self.arbiter);
        let Some(target) = self.controls.control_mut(control) else {
            return false;
        };
        let handled = target.event(event, &mut ctx);
        handled || event.is_accepted()
    }

    /// Delivery wrapper for keyboard/character dispatch: a panic in
    /// downstream control code is contained and reported as "not handled" so
    /// one misbehaving control cannot abort input processing for the rest of
    /// the tree.
    fn deliver_guarded(
        &mut self,
        window: WindowId,
        control: ControlId,
        event: &mut ControlEvent,
    ) -> bool {
        match catch_unwind(AssertUnwindSafe(|| self.deliver(window, control, event))) {
            Ok(handled) => handled,
            Err(_) => {
                error!(
                    target: targets::MANAGER,
                    ?control,
                    "control panicked during key dispatch; event dropped"
                );
                false
            }
        }
    }

    /// Apply focus changes queued by handlers during an in-flight dispatch.
    fn drain_focus_requests(&mut self) {
        while let Some((window, control)) = self.arbiter.take_focus_request() {
            self.set_focus(window, control);
        }
    }

    // =========================================================================
    // Focus
    // =========================================================================

    /// Move system-wide keyboard focus.
    ///
    /// The old target is told it is losing focus (and to whom), the two
    /// system-wide references update, the new target is told it gained focus
    /// (and from whom), and finally **every** window absorbs the change so
    /// non-owning windows can drop their local focus memory.
    fn set_focus(&mut self, window: WindowId, control: Option<ControlId>) {
        let old = self.arbiter.focus();
        let new = control.map(|c| (window, c));
        if old == new {
            return;
        }
        debug!(target: targets::FOCUS, ?old, ?new, "focus change");

        if let Some((old_window, old_control)) = old {
            self.controls.set_focused(old_control, false);
            let mut event = ControlEvent::FocusOut(FocusOutEvent::new(control));
            self.deliver(old_window, old_control, &mut event);
        }

        self.arbiter.set_focus_pair(new);

        if let Some((new_window, new_control)) = new {
            self.controls.set_focused(new_control, true);
            let mut event = ControlEvent::FocusIn(FocusInEvent::new(old.map(|(_, c)| c)));
            self.deliver(new_window, new_control, &mut event);
        }

        for (id, win) in self.windows.iter_mut() {
            win.handle_focus_changed(id == window && control.is_some(), control);
        }
    }

    /// Controls in a window's tab order: positive tab indices, visible,
    /// enabled, focus-accepting; ordered by index, then tree order.
    fn tab_stops(&self, window: WindowId) -> Vec<ControlId> {
        let Some(win) = self.windows.get(window) else {
            return Vec::new();
        };
        let mut stops: Vec<(i32, usize, ControlId)> = self
            .controls
            .subtree_ids(win.root())
            .into_iter()
            .enumerate()
            .filter_map(|(position, id)| {
                let base = self.controls.base(id)?;
                let control = self.controls.control(id)?;
                (base.tab_index() >= 0
                    && base.is_visible()
                    && base.is_enabled()
                    && control.can_accept_focus())
                .then_some((base.tab_index(), position, id))
            })
            .collect();
        stops.sort_by_key(|&(index, position, _)| (index, position));
        stops.into_iter().map(|(_, _, id)| id).collect()
    }

    fn focus_step(&mut self, window: WindowId, forward: bool) -> bool {
        let stops = self.tab_stops(window);
        if stops.is_empty() {
            return false;
        }
        let current = self.windows.get(window).and_then(|w| w.focus_control());
        let next = match current.and_then(|c| stops.iter().position(|&s| s == c)) {
            Some(pos) if forward => stops[(pos + 1) % stops.len()],
            Some(pos) => stops[(pos + stops.len() - 1) % stops.len()],
            None if forward => stops[0],
            None => stops[stops.len() - 1],
        };
        self.set_focus(window, Some(next));
        self.drain_focus_requests();
        true
    }

    // =========================================================================
    // Drag gestures
    // =========================================================================

    /// End the gesture by pushing the payload back onto its source.
    fn cancel_drag(&mut self) {
        if let Some(payload) = self.arbiter.take_drag() {
            let (item, source) = payload.into_parts();
            debug!(target: targets::DRAG, ?source, "drag cancelled, payload pushed back");
            if let Some(control) = self.controls.control_mut(source) {
                control.set_draggable(Some(item));
            }
        }
    }

    /// Resolve a drop attempt. The gesture always ends here: the item lands
    /// in an accepting target's slot or back in the source's.
    fn attempt_drop(&mut self, order: &[WindowId], point: Point) {
        let Some(payload) = self.arbiter.take_drag() else {
            return;
        };
        let (item, source) = payload.into_parts();

        let mut hit = None;
        for &window in order {
            let found = self
                .windows
                .get(window)
                .and_then(|w| w.find_control(&mut self.controls, point));
            if let Some(control) = found {
                hit = Some(control);
                break;
            }
        }

        let accepted = hit.is_some_and(|target| {
            self.controls.base(target).is_some_and(|b| b.accepts_drops())
                && self
                    .controls
                    .control(target)
                    .is_some_and(|c| c.can_accept_drop(item.as_ref()))
        });

        if let (true, Some(target)) = (accepted, hit) {
            debug!(target: targets::DRAG, ?source, ?target, "drop accepted");
            if let Some(control) = self.controls.control_mut(target) {
                control.set_draggable(Some(item));
            }
        } else {
            debug!(target: targets::DRAG, ?source, "no accepting target, payload pushed back");
            if let Some(control) = self.controls.control_mut(source) {
                control.set_draggable(Some(item));
            }
        }
    }

    // =========================================================================
    // Input entry points
    // =========================================================================

    fn pointer_down(&mut self, order: &[WindowId], point: Point, button: MouseButton) -> bool {
        self.arbiter.set_pointer(point);

        if self.arbiter.is_dragging() {
            if button == MouseButton::Right {
                self.cancel_drag();
            } else {
                self.attempt_drop(order, point);
            }
            return true;
        }

        for &window in order {
            let target = self
                .windows
                .get(window)
                .and_then(|w| w.interactive_target(&mut self.controls, point));
            let Some(target) = target else {
                continue;
            };

            // Default click behavior: move focus to the target first, so its
            // press handler already observes itself focused.
            if self
                .controls
                .control(target)
                .is_some_and(|c| c.can_accept_focus())
            {
                self.set_focus(window, Some(target));
            }

            let local = self.controls.screen_to_local(target, point);
            let mut event = ControlEvent::MousePress(MousePressEvent::new(button, local, point));
            self.deliver(window, target, &mut event);
            self.drain_focus_requests();
            return true;
        }
        false
    }

    fn pointer_up(&mut self, order: &[WindowId], point: Point, button: MouseButton) -> bool {
        self.arbiter.set_pointer(point);

        if self.arbiter.is_dragging() {
            return true;
        }

        if let Some((window, captured)) = self.arbiter.capture() {
            let local = self.controls.screen_to_local(captured, point);
            let mut event =
                ControlEvent::MouseRelease(MouseReleaseEvent::new(button, local, point));
            self.deliver(window, captured, &mut event);
            self.drain_focus_requests();
            return true;
        }

        for &window in order {
            let target = self
                .windows
                .get(window)
                .and_then(|w| w.interactive_target(&mut self.controls, point));
            let Some(target) = target else {
                continue;
            };
            let local = self.controls.screen_to_local(target, point);
            let mut event =
                ControlEvent::MouseRelease(MouseReleaseEvent::new(button, local, point));
            self.deliver(window, target, &mut event);
            self.drain_focus_requests();
            return true;
        }
        false
    }

    fn pointer_move(&mut self, point: Point) -> bool {
        self.arbiter.set_pointer(point);

        if self.arbiter.is_dragging() {
            // The payload follows the pointer; hover updates happen in the
            // per-tick refresh.
            return true;
        }

        if let Some((window, captured)) = self.arbiter.capture() {
            let local = self.controls.screen_to_local(captured, point);
            let mut event = ControlEvent::MouseMove(MouseMoveEvent::new(local, point));
            self.deliver(window, captured, &mut event);
            self.drain_focus_requests();
            return true;
        }
        false
    }

    fn wheel(&mut self, order: &[WindowId], point: Point, delta: f32) -> bool {
        if self.arbiter.is_dragging() {
            return true;
        }

        if let Some((window, captured)) = self.arbiter.capture() {
            let local = self.controls.screen_to_local(captured, point);
            let mut event = ControlEvent::Wheel(WheelEvent::new(local, point, delta));
            self.deliver(window, captured, &mut event);
            self.drain_focus_requests();
            return true;
        }

        for &window in order {
            let target = self
                .windows
                .get(window)
                .and_then(|w| w.interactive_target(&mut self.controls, point));
            let Some(target) = target else {
                continue;
            };
            let local = self.controls.screen_to_local(target, point);
            let mut event = ControlEvent::Wheel(WheelEvent::new(local, point, delta));
            self.deliver(window, target, &mut event);
            self.drain_focus_requests();
            return true;
        }
        false
    }

    /// Shared keyboard routing: the system focus target first, then the
    /// interactive windows' locally-remembered focus controls.
    fn route_key_event(
        &mut self,
        order: &[WindowId],
        make_event: impl Fn() -> ControlEvent,
    ) -> bool {
        let focus = self.arbiter.focus();
        if let Some((window, control)) = focus {
            let mut event = make_event();
            let handled = self.deliver_guarded(window, control, &mut event);
            self.drain_focus_requests();
            if handled {
                return true;
            }
        }

        for &window in order {
            let Some(control) = self.windows.get(window).and_then(|w| w.focus_control()) else {
                continue;
            };
            if focus == Some((window, control)) {
                continue;
            }
            let mut event = make_event();
            let handled = self.deliver_guarded(window, control, &mut event);
            self.drain_focus_requests();
            if handled {
                return true;
            }
        }
        false
    }

    // =========================================================================
    // Per-tick refresh and painting
    // =========================================================================

    fn update(&mut self, order: &[WindowId]) {
        let pointer = self.arbiter.pointer();
        let dragging = self.arbiter.is_dragging();
        let ids: Vec<WindowId> = self.windows.keys().collect();

        for id in ids {
            let interactive = order.contains(&id);
            let change = match self.windows.get_mut(id) {
                Some(window) => window.refresh(&mut self.controls, pointer, dragging, interactive),
                None => continue,
            };

            if let Some(left) = change.left {
                self.controls.set_hovered(left, false);
                let mut event = ControlEvent::Leave(LeaveEvent::new());
                self.deliver(id, left, &mut event);
            }
            if let Some(entered) = change.entered {
                self.controls.set_hovered(entered, true);
                let mut event = ControlEvent::Enter(EnterEvent::new());
                self.deliver(id, entered, &mut event);
            }
            self.drain_focus_requests();
        }
    }

    fn paint_background(&mut self, paint_order: &[WindowId], surface: &mut dyn PaintSurface) {
        for &id in paint_order {
            let Some(window) = self.windows.get(id) else {
                continue;
            };
            if !window.is_visible() {
                continue;
            }
            let root = window.root();
            self.controls.paint(root, surface);
        }
    }

    fn paint_foreground(&mut self, surface: &mut dyn PaintSurface) {
        if let Some(payload) = self.arbiter.drag() {
            let size = payload.item().size();
            let pointer = self.arbiter.pointer();
            let origin = Point::new(
                pointer.x - size.width / 2.0,
                pointer.y - size.height / 2.0,
            );
            let rect = Rect::from_origin_size(Point::ZERO, size);
            let mut ctx = PaintContext::new(surface, origin, rect);
            payload.item().paint(&mut ctx);
        }
    }

    // =========================================================================
    // Broadcasts and validation
    // =========================================================================

    fn notify_theme_changed(&mut self) {
        trace!(target: targets::MANAGER, "theme changed broadcast");
        let roots: Vec<(WindowId, ControlId)> = self
            .windows
            .iter()
            .map(|(id, window)| (id, window.root()))
            .collect();
        for (window, root) in roots {
            for control in self.controls.subtree_ids(root) {
                let mut event = ControlEvent::ThemeChanged(ThemeChangedEvent::new());
                self.deliver(window, control, &mut event);
            }
        }
    }

    fn validate(&self, problems: &mut Vec<String>) {
        for window in self.windows.values() {
            self.controls.validate_subtree(window.root(), problems);
        }
    }
}

/// Pick the interactive window set: the top modal window while the stack is
/// non-empty, otherwise every modeless window in registration order.
fn interactive_set<'a>(modals: &'a [WindowId], modeless: &'a [WindowId]) -> &'a [WindowId] {
    match modals.last() {
        Some(top) => std::slice::from_ref(top),
        None => modeless,
    }
}

// =============================================================================
// Single-window variant
// =============================================================================

/// Windows manager owning zero or one window.
///
/// Every operation degrades to "do nothing" while no window exists. Creating
/// a second window closes the first.
pub struct SingleWindowManager {
    core: ManagerCore,
    window: Option<WindowId>,
}

impl Default for SingleWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SingleWindowManager {
    /// Create a manager with no window.
    pub fn new() -> Self {
        Self {
            core: ManagerCore::new(),
            window: None,
        }
    }

    /// The control tree for this surface.
    pub fn controls(&self) -> &ControlTree {
        &self.core.controls
    }

    /// The control tree, mutably. Build window content here before calling
    /// [`create_window`](Self::create_window).
    pub fn controls_mut(&mut self) -> &mut ControlTree {
        &mut self.core.controls
    }

    /// Wrap `root` in a window at the given screen rectangle.
    ///
    /// A previously created window is closed first.
    pub fn create_window(
        &mut self,
        root: ControlId,
        modal: bool,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> WindowId {
        if let Some(existing) = self.window.take() {
            self.core.close_window(existing);
        }
        let id = self
            .core
            .create_window(root, modal, Rect::new(x, y, width, height));
        self.window = Some(id);
        id
    }

    /// Close the window, notifying every control exactly once.
    pub fn close_window(&mut self) {
        if let Some(id) = self.window.take() {
            self.core.close_window(id);
        }
    }

    /// The window, if one exists.
    pub fn window(&self) -> Option<&Window> {
        self.window.and_then(|id| self.core.windows.get(id))
    }

    /// The window, mutably (e.g. to toggle its hidden flag).
    pub fn window_mut(&mut self) -> Option<&mut Window> {
        self.window.and_then(|id| self.core.windows.get_mut(id))
    }

    /// The window's handle, if one exists.
    pub fn window_id(&self) -> Option<WindowId> {
        self.window
    }

    // -------------------------------------------------------------------------
    // Focus / capture / drag
    // -------------------------------------------------------------------------

    /// Move keyboard focus, or clear it with `None`.
    pub fn set_focus(&mut self, control: Option<ControlId>) {
        if let Some(window) = self.window {
            self.core.set_focus(window, control);
            self.core.drain_focus_requests();
        }
    }

    /// The system-wide focus target, if any.
    pub fn focused_control(&self) -> Option<ControlId> {
        self.core.arbiter.focus().map(|(_, control)| control)
    }

    /// Route all pointer move/release/wheel events to one control.
    pub fn capture_mouse(&mut self, control: ControlId) {
        if let Some(window) = self.window {
            self.core.arbiter.set_capture(window, control);
        }
    }

    /// Release the pointer capture.
    pub fn release_mouse(&mut self) {
        self.core.arbiter.clear_capture();
    }

    /// Check if a capture target is set.
    pub fn is_mouse_captured(&self) -> bool {
        self.core.arbiter.is_mouse_captured()
    }

    /// Begin a drag gesture with `source` as the origin control.
    pub fn start_dragging(&mut self, item: Box<dyn Draggable>, source: ControlId) {
        self.core.arbiter.begin_drag(item, source);
    }

    /// Check if a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.core.arbiter.is_dragging()
    }

    /// Move focus to the next control in tab order.
    pub fn focus_next(&mut self) -> bool {
        match self.window {
            Some(window) => self.core.focus_step(window, true),
            None => false,
        }
    }

    /// Move focus to the previous control in tab order.
    pub fn focus_previous(&mut self) -> bool {
        match self.window {
            Some(window) => self.core.focus_step(window, false),
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Host entry points
    // -------------------------------------------------------------------------

    /// Pointer button pressed.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: MouseButton) -> bool {
        self.core
            .pointer_down(self.window.as_slice(), Point::new(x, y), button)
    }

    /// Pointer button released.
    pub fn pointer_up(&mut self, x: f32, y: f32, button: MouseButton) -> bool {
        self.core
            .pointer_up(self.window.as_slice(), Point::new(x, y), button)
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.core.pointer_move(Point::new(x, y))
    }

    /// Wheel scrolled.
    pub fn wheel(&mut self, x: f32, y: f32, delta: f32) -> bool {
        self.core.wheel(self.window.as_slice(), Point::new(x, y), delta)
    }

    /// Character typed.
    pub fn char_typed(&mut self, ch: char, key: Key) -> bool {
        self.core.route_key_event(self.window.as_slice(), || {
            ControlEvent::Char(CharEvent::new(ch, key))
        })
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: Key, scancode: u32, modifiers: KeyboardModifiers) -> bool {
        self.core.route_key_event(self.window.as_slice(), || {
            ControlEvent::KeyPress(KeyPressEvent::new(key, scancode, modifiers))
        })
    }

    /// Key released.
    pub fn key_up(&mut self, key: Key, scancode: u32, modifiers: KeyboardModifiers) -> bool {
        self.core.route_key_event(self.window.as_slice(), || {
            ControlEvent::KeyRelease(KeyReleaseEvent::new(key, scancode, modifiers))
        })
    }

    /// Per-tick refresh: content visibility and hover enter/leave.
    pub fn update(&mut self) {
        self.core.update(self.window.as_slice());
    }

    /// Paint the window's control tree.
    pub fn paint_background(&mut self, surface: &mut dyn PaintSurface) {
        self.core.paint_background(self.window.as_slice(), surface);
    }

    /// Paint overlays: the drag payload centered on the pointer.
    pub fn paint_foreground(&mut self, surface: &mut dyn PaintSurface) {
        self.core.paint_foreground(surface);
    }

    /// Broadcast a theme change to every control.
    pub fn notify_theme_changed(&mut self) {
        self.core.notify_theme_changed();
    }

    /// Collect configuration problems from the window's tree.
    pub fn validate(&self, problems: &mut Vec<String>) {
        self.core.validate(problems);
    }

    /// Tear down all state (host surface recreated).
    pub fn reset(&mut self) {
        self.core.reset();
        self.window = None;
    }
}

// =============================================================================
// Multi-window variant
// =============================================================================

/// Windows manager owning modeless windows plus a modal stack.
///
/// Modal windows stack: only the most recently created modal window is
/// interactive. Closing it re-activates the next modal below; with an empty
/// stack the modeless windows share input in registration order.
pub struct MultiWindowManager {
    core: ManagerCore,
    modeless: Vec<WindowId>,
    modals: Vec<WindowId>,
}

impl Default for MultiWindowManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiWindowManager {
    /// Create a manager with no windows.
    pub fn new() -> Self {
        Self {
            core: ManagerCore::new(),
            modeless: Vec::new(),
            modals: Vec::new(),
        }
    }

    /// The control tree for this surface.
    pub fn controls(&self) -> &ControlTree {
        &self.core.controls
    }

    /// The control tree, mutably.
    pub fn controls_mut(&mut self) -> &mut ControlTree {
        &mut self.core.controls
    }

    /// Wrap `root` in a window at the given screen rectangle.
    ///
    /// A modal window goes on top of the modal stack and becomes the
    /// interactive window; a modeless window is appended to the registration
    /// list.
    pub fn create_window(
        &mut self,
        root: ControlId,
        modal: bool,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> WindowId {
        let id = self
            .core
            .create_window(root, modal, Rect::new(x, y, width, height));
        if modal {
            self.modals.push(id);
        } else {
            self.modeless.push(id);
        }
        id
    }

    /// Close a window, notifying every control in it exactly once.
    ///
    /// Closing the top modal window re-activates the next modal below it.
    pub fn close_window(&mut self, id: WindowId) {
        self.modals.retain(|&w| w != id);
        self.modeless.retain(|&w| w != id);
        self.core.close_window(id);
    }

    /// Look up a window by handle.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.core.windows.get(id)
    }

    /// Look up a window by handle, mutably (e.g. to toggle its hidden flag).
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.core.windows.get_mut(id)
    }

    /// Number of windows (modeless + modal).
    pub fn window_count(&self) -> usize {
        self.core.windows.len()
    }

    /// The interactive modal window, if the modal stack is non-empty.
    pub fn active_modal(&self) -> Option<WindowId> {
        self.modals.last().copied()
    }

    // -------------------------------------------------------------------------
    // Focus / capture / drag
    // -------------------------------------------------------------------------

    /// Move keyboard focus to a control in `window`, or clear it with `None`.
    pub fn set_focus(&mut self, window: WindowId, control: Option<ControlId>) {
        self.core.set_focus(window, control);
        self.core.drain_focus_requests();
    }

    /// The system-wide focus target and its owning window, if any.
    pub fn focused_control(&self) -> Option<(WindowId, ControlId)> {
        self.core.arbiter.focus()
    }

    /// Route all pointer move/release/wheel events to one control.
    pub fn capture_mouse(&mut self, window: WindowId, control: ControlId) {
        self.core.arbiter.set_capture(window, control);
    }

    /// Release the pointer capture.
    pub fn release_mouse(&mut self) {
        self.core.arbiter.clear_capture();
    }

    /// Check if a capture target is set.
    pub fn is_mouse_captured(&self) -> bool {
        self.core.arbiter.is_mouse_captured()
    }

    /// Begin a drag gesture with `source` as the origin control.
    pub fn start_dragging(&mut self, item: Box<dyn Draggable>, source: ControlId) {
        self.core.arbiter.begin_drag(item, source);
    }

    /// Check if a drag gesture is in progress.
    pub fn is_dragging(&self) -> bool {
        self.core.arbiter.is_dragging()
    }

    /// Move focus to the next control in `window`'s tab order.
    pub fn focus_next(&mut self, window: WindowId) -> bool {
        self.core.focus_step(window, true)
    }

    /// Move focus to the previous control in `window`'s tab order.
    pub fn focus_previous(&mut self, window: WindowId) -> bool {
        self.core.focus_step(window, false)
    }

    // -------------------------------------------------------------------------
    // Host entry points
    // -------------------------------------------------------------------------

    /// Pointer button pressed.
    pub fn pointer_down(&mut self, x: f32, y: f32, button: MouseButton) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.pointer_down(order, Point::new(x, y), button)
    }

    /// Pointer button released.
    pub fn pointer_up(&mut self, x: f32, y: f32, button: MouseButton) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.pointer_up(order, Point::new(x, y), button)
    }

    /// Pointer moved.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.core.pointer_move(Point::new(x, y))
    }

    /// Wheel scrolled.
    pub fn wheel(&mut self, x: f32, y: f32, delta: f32) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.wheel(order, Point::new(x, y), delta)
    }

    /// Character typed.
    pub fn char_typed(&mut self, ch: char, key: Key) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core
            .route_key_event(order, || ControlEvent::Char(CharEvent::new(ch, key)))
    }

    /// Key pressed.
    pub fn key_down(&mut self, key: Key, scancode: u32, modifiers: KeyboardModifiers) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.route_key_event(order, || {
            ControlEvent::KeyPress(KeyPressEvent::new(key, scancode, modifiers))
        })
    }

    /// Key released.
    pub fn key_up(&mut self, key: Key, scancode: u32, modifiers: KeyboardModifiers) -> bool {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.route_key_event(order, || {
            ControlEvent::KeyRelease(KeyReleaseEvent::new(key, scancode, modifiers))
        })
    }

    /// Per-tick refresh: content visibility and hover enter/leave per window.
    /// Windows blocked by a modal get their hover state cleared.
    pub fn update(&mut self) {
        let order = interactive_set(&self.modals, &self.modeless);
        self.core.update(order);
    }

    /// Paint all windows back-to-front: modeless in registration order, then
    /// the modal stack.
    pub fn paint_background(&mut self, surface: &mut dyn PaintSurface) {
        let order: Vec<WindowId> = self
            .modeless
            .iter()
            .chain(self.modals.iter())
            .copied()
            .collect();
        self.core.paint_background(&order, surface);
    }

    /// Paint overlays: the drag payload centered on the pointer.
    pub fn paint_foreground(&mut self, surface: &mut dyn PaintSurface) {
        self.core.paint_foreground(surface);
    }

    /// Broadcast a theme change to every control in every window.
    pub fn notify_theme_changed(&mut self) {
        self.core.notify_theme_changed();
    }

    /// Collect configuration problems across every window's tree.
    pub fn validate(&self, problems: &mut Vec<String>) {
        self.core.validate(problems);
    }

    /// Tear down all state (host surface recreated).
    pub fn reset(&mut self) {
        self.core.reset();
        self.modeless.clear();
        self.modals.clear();
    }
}
