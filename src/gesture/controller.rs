use crate::{
    foundation::{
        core::{Point, Viewport},
        geometry::{distance, touches_near_rect},
    },
    gesture::{
        input::{PointerEvent, PointerSource, WheelEvent},
        scheduler::RenderScheduler,
        state::{
            FlipX, GesturePhase, MIN_PINCH_DISTANCE, TransformState, WHEEL_ZOOM_IN,
            WHEEL_ZOOM_OUT, clamp_scale,
        },
    },
    render::{
        target::SpriteTarget,
        transform::{OffsetBounds, RenderWrites, TransformRenderer},
    },
};

/// Turns pointer input into sprite placement.
///
/// Owns the [`TransformState`] and is the only place it changes. Drag and pinch updates are
/// coalesced into one render per display frame; ending a gesture renders synchronously. No
/// operation fails: malformed or out-of-range input is ignored or clamped.
#[derive(Debug)]
pub struct GestureController<T: SpriteTarget> {
    state: TransformState,
    viewport: Viewport,
    scheduler: RenderScheduler,
    target: T,
}

impl<T: SpriteTarget> GestureController<T> {
    pub fn new(viewport: Viewport, target: T) -> Self {
        Self::with_state(viewport, target, TransformState::default())
    }

    pub fn with_state(viewport: Viewport, target: T, state: TransformState) -> Self {
        Self {
            state,
            viewport,
            scheduler: RenderScheduler::new(),
            target,
        }
    }

    pub fn state(&self) -> &TransformState {
        &self.state
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn into_target(self) -> T {
        self.target
    }

    pub fn has_pending_render(&self) -> bool {
        self.scheduler.is_pending()
    }

    pub fn begin_drag(&mut self, point_id: u32, p: Point) {
        if !p.is_finite() {
            return;
        }
        if self.state.is_pinching() {
            self.end_pinch();
        }
        self.state.phase = GesturePhase::Dragging {
            point_id,
            anchor: p,
            origin_offset: self.state.offset,
        };
        self.target.set_dragging(true);
    }

    pub fn update_drag(&mut self, p: Point) {
        let GesturePhase::Dragging {
            anchor,
            origin_offset,
            ..
        } = self.state.phase
        else {
            return;
        };
        if !p.is_finite() {
            return;
        }
        let candidate = origin_offset + (p - anchor);
        self.state.offset =
            OffsetBounds::for_mode(self.state.anchor_mode, self.viewport).clamp(candidate);
        self.schedule_render();
    }

    pub fn end_drag(&mut self) {
        if self.state.is_dragging() {
            self.state.phase = GesturePhase::Idle;
            self.target.set_dragging(false);
        }
        self.flush();
    }

    /// Start a pinch from exactly two touches. An active drag always ends, even when the fingers
    /// are too close together for the pinch to anchor.
    ///
    /// Returns whether a pinch is active afterwards.
    pub fn begin_pinch(&mut self, points: &[Point]) -> bool {
        let &[a, b] = points else {
            return self.state.is_pinching();
        };
        if self.state.is_dragging() {
            self.state.phase = GesturePhase::Idle;
            self.target.set_dragging(false);
        }
        let d = distance(a, b);
        if !(d.is_finite() && d >= MIN_PINCH_DISTANCE) {
            return self.state.is_pinching();
        }
        self.state.phase = GesturePhase::Pinching {
            anchor_distance: d,
            anchor_scale: self.state.scale,
        };
        true
    }

    pub fn update_pinch(&mut self, points: &[Point]) {
        let &[a, b] = points else {
            if self.state.is_pinching() {
                self.end_pinch();
            }
            return;
        };
        if !self.state.is_pinching() && !self.begin_pinch(points) {
            return;
        }
        let GesturePhase::Pinching {
            mut anchor_distance,
            mut anchor_scale,
        } = self.state.phase
        else {
            return;
        };
        if !(anchor_distance >= MIN_PINCH_DISTANCE) {
            self.begin_pinch(points);
            match self.state.phase {
                GesturePhase::Pinching {
                    anchor_distance: d,
                    anchor_scale: s,
                } if d >= MIN_PINCH_DISTANCE => {
                    anchor_distance = d;
                    anchor_scale = s;
                }
                _ => return,
            }
        }

        let d = distance(a, b);
        if !d.is_finite() {
            return;
        }
        let ratio = (d / anchor_distance).clamp(0.5, 2.0);
        self.state.scale = clamp_scale(anchor_scale * ratio);
        self.schedule_render();
    }

    pub fn end_pinch(&mut self) {
        if self.state.is_pinching() {
            self.state.phase = GesturePhase::Idle;
        }
        self.flush();
    }

    /// One wheel notch: zoom out on positive `delta_y`, in otherwise. Renders immediately.
    pub fn apply_wheel_zoom(&mut self, delta_y: f64) {
        if delta_y.is_nan() {
            return;
        }
        let factor = if delta_y > 0.0 {
            WHEEL_ZOOM_OUT
        } else {
            WHEEL_ZOOM_IN
        };
        self.state.scale = clamp_scale(self.state.scale * factor);
        self.render_now();
    }

    /// Display-refresh callback. Renders when an update is pending.
    pub fn on_animation_frame(&mut self) -> Option<RenderWrites> {
        self.scheduler.take().then(|| self.render_now())
    }

    /// Cancel a pending frame and render synchronously.
    pub fn flush(&mut self) -> Option<RenderWrites> {
        self.cancel_pending().then(|| self.render_now())
    }

    /// Apply the current state to the target right away.
    pub fn render_now(&mut self) -> RenderWrites {
        let writes = TransformRenderer::apply(&self.state, self.viewport, &mut self.target);
        if let Some(y) = writes.corrected_offset_y {
            self.state.offset.y = y;
        }
        writes
    }

    /// Pointer/touch press. Returns whether the event was consumed.
    pub fn on_pointer_down(&mut self, ev: &PointerEvent) -> bool {
        let points = ev.positions();
        match ev.source {
            PointerSource::Mouse => {
                let Some(p) = ev.primary() else {
                    return false;
                };
                if !ev.on_sprite {
                    return false;
                }
                self.begin_drag(p.id, p.position());
                true
            }
            PointerSource::Touch => match points.as_slice() {
                [a, b] if ev.on_sprite || self.near_sprite(*a, *b) => {
                    if self.state.is_dragging() {
                        self.end_drag();
                    }
                    self.begin_pinch(&points);
                    true
                }
                [p] if ev.on_sprite && !self.state.is_pinching() => {
                    let id = ev.primary().map_or(0, |pp| pp.id);
                    self.begin_drag(id, *p);
                    true
                }
                _ => false,
            },
        }
    }

    /// Pointer/touch move. Returns whether the event was consumed.
    pub fn on_pointer_move(&mut self, ev: &PointerEvent) -> bool {
        let points = ev.positions();
        match ev.source {
            PointerSource::Mouse => match ev.primary() {
                Some(p) if self.state.is_dragging() => {
                    self.update_drag(p.position());
                    true
                }
                _ => false,
            },
            PointerSource::Touch => match points.as_slice() {
                [a, b] => {
                    if self.state.is_pinching() || self.near_sprite(*a, *b) {
                        if !self.state.is_pinching() {
                            if self.state.is_dragging() {
                                self.end_drag();
                            }
                            self.begin_pinch(&points);
                        }
                        self.update_pinch(&points);
                    } else if self.state.is_pinching() {
                        self.end_pinch();
                    }
                    true
                }
                [p] if self.state.is_dragging() => {
                    self.update_drag(*p);
                    true
                }
                [_] if self.state.is_pinching() => {
                    // A pinch never degrades into a drag within the same gesture.
                    self.end_pinch();
                    true
                }
                _ => false,
            },
        }
    }

    /// Pointer release / touch end. `ev.points` lists the touches still down.
    pub fn on_pointer_up(&mut self, ev: &PointerEvent) -> bool {
        match ev.source {
            PointerSource::Mouse => {
                if !self.state.is_dragging() {
                    return false;
                }
                self.end_drag();
                true
            }
            PointerSource::Touch => {
                let remaining = ev.points.len();
                let mut consumed = false;
                if self.state.is_pinching() && remaining < 2 {
                    self.end_pinch();
                    consumed = true;
                }
                if self.state.is_dragging() && remaining == 0 {
                    self.end_drag();
                    consumed = true;
                }
                consumed
            }
        }
    }

    /// Touch cancel: same cleanup as a full release.
    pub fn on_pointer_cancel(&mut self) {
        if self.state.is_pinching() {
            self.end_pinch();
        }
        if self.state.is_dragging() {
            self.end_drag();
        }
    }

    pub fn on_wheel(&mut self, ev: &WheelEvent) -> bool {
        if !ev.on_sprite {
            return false;
        }
        self.apply_wheel_zoom(ev.delta_y);
        true
    }

    /// Drop any in-flight gesture and return to the centered default placement.
    pub fn reset_transform(&mut self) {
        if self.state.is_dragging() {
            self.target.set_dragging(false);
        }
        self.cancel_pending();
        self.state.reset();
        self.render_now();
    }

    /// Entry animation finished: switch to centered placement.
    pub fn complete_entry(&mut self) {
        if self.state.complete_entry() {
            self.render_now();
        }
    }

    /// Viewport resize. The offset is re-clamped into the new bounds and rendered immediately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if !(viewport.width.is_finite() && viewport.height.is_finite()) {
            return;
        }
        self.viewport = viewport;
        self.target.viewport_changed(viewport);
        self.state.offset =
            OffsetBounds::for_mode(self.state.anchor_mode, viewport).clamp(self.state.offset);
        self.cancel_pending();
        self.render_now();
    }

    pub fn set_flip(&mut self, flip: FlipX) {
        if self.state.flip == flip {
            return;
        }
        self.state.flip = flip;
        self.render_now();
    }

    /// Host-set rotation. Gestures never change it; non-finite values are ignored.
    pub fn set_rotation(&mut self, deg: f64) {
        if !deg.is_finite() || self.state.rotation_deg == deg {
            return;
        }
        self.state.rotation_deg = deg;
        self.render_now();
    }

    fn near_sprite(&self, a: Point, b: Point) -> bool {
        touches_near_rect(a, b, self.target.bounding_rect())
    }

    fn cancel_pending(&mut self) -> bool {
        let pending = self.scheduler.flush();
        if pending {
            self.target.cancel_frame();
        }
        pending
    }

    fn schedule_render(&mut self) {
        if self.scheduler.schedule() {
            self.target.request_frame();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gesture/controller.rs"]
mod tests;
