//! Drag, resize mode, bake-in and direct setters

use super::ClockView;
use super::element::ClockElement;
use super::geometry::{ElementOffset, PivotSpec};
use super::render::HandPose;
use crate::config::clock as consts;

/// Element being dragged and the last pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    pub element: ClockElement,
    pub last: (f32, f32),
    /// Set once the element has actually moved
    pub moved: bool,
}

impl ClockView {
    /// Enable or disable dragging for `element`.
    ///
    /// Disabling a hand that was moved folds its offset into the pivot so
    /// the hand stays where it was left.
    pub fn set_drag_drop(&mut self, element: ClockElement, enabled: bool) {
        self.drag_enabled.set(element, enabled);
        if enabled {
            return;
        }
        if self.drag.is_some_and(|drag| drag.element == element) {
            self.drag = None;
        }

        let offset = self.geometry.offset(element);
        if !element.is_hand() || offset.is_zero() {
            return;
        }
        let pose = HandPose {
            angle: self.drawn.get(element).angle,
            scale: self.scale.get(element),
            pivot: self.geometry.pivot(element),
            offset,
        };
        let Some(geometry) = self.renderer.hand_geometry(element, self.layout, &pose) else {
            log::warn!("cannot bake the {} offset without its image", element);
            return;
        };
        let pivot = geometry.baked_pivot(offset);
        log::debug!("baked {} offset {:?} into pivot {:?}", element, offset, pivot);
        self.geometry.set_pivot(element, pivot);
        self.geometry.set_offset(element, ElementOffset::ZERO);
        self.geometry.save();
        self.request_full_redraw();
    }

    pub fn set_analog_animation(&mut self, enabled: bool) {
        let mut config = self.config.clone();
        config.animation = enabled;
        self.apply_config(config);
    }

    /// Only one element is in resize mode at a time.
    pub fn set_resize_mode(&mut self, element: ClockElement, enabled: bool) {
        if enabled {
            self.resize_element = Some(element);
        } else if self.resize_element == Some(element) {
            self.resize_element = None;
        }
    }

    /// Step the resize-mode element's scale. Returns false outside resize mode.
    pub fn adjust_resize_scale(&mut self, delta: f32) -> bool {
        let Some(element) = self.resize_element else {
            return false;
        };
        let stepped = ((self.scale.get(element) + delta) * 100.0).round() / 100.0;
        self.scale
            .set(element, stepped.clamp(consts::MIN_SCALE, consts::MAX_SCALE));
        self.request_full_redraw();
        true
    }

    /// Resize-mode key handling: `=`/`+` grow, `-`/`_` shrink.
    pub fn resize_key(&mut self, key: &str) -> bool {
        match key {
            "=" | "+" => self.adjust_resize_scale(consts::RESIZE_STEP),
            "-" | "_" => self.adjust_resize_scale(-consts::RESIZE_STEP),
            _ => false,
        }
    }

    /// Set a scale override directly. Non-finite values are rejected.
    pub fn set_element_scale(&mut self, element: ClockElement, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.scale.set(element, value.max(consts::MIN_SCALE));
        self.request_full_redraw();
        true
    }

    pub fn set_element_rotation(&mut self, element: ClockElement, degrees: f32) -> bool {
        if !degrees.is_finite() {
            return false;
        }
        self.rotation.set(element, degrees);
        self.request_full_redraw();
        true
    }

    /// Set and persist a hand pivot. The face has no pivot.
    pub fn set_hand_pivot(&mut self, element: ClockElement, pivot: PivotSpec) -> bool {
        if !element.is_hand() {
            return false;
        }
        self.geometry.set_pivot(element, pivot);
        self.geometry.save();
        self.request_full_redraw();
        true
    }

    /// Start dragging the topmost drag-enabled element under the pointer.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        match self.renderer.scene().hit_test(x, y) {
            Some(element) if self.drag_enabled.get(element) => {
                self.drag = Some(DragState {
                    element,
                    last: (x, y),
                    moved: false,
                });
                true
            }
            _ => false,
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        let Some(mut drag) = self.drag else {
            return false;
        };
        let (dx, dy) = ((x - drag.last.0).round(), (y - drag.last.1).round());
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        let offset = self.geometry.offset(drag.element).translated(dx as i32, dy as i32);
        self.geometry.set_offset(drag.element, offset);
        self.renderer.scene_mut().move_element(drag.element, dx, dy);
        let pose = self.drawn.get_mut(drag.element);
        pose.offset = offset;

        drag.last = (drag.last.0 + dx, drag.last.1 + dy);
        drag.moved = true;
        self.drag = Some(drag);
        true
    }

    /// End the drag. A hand that moved has its offset written to disk.
    pub fn pointer_up(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        if drag.moved && drag.element.is_hand() {
            self.geometry.save();
        }
        true
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}
