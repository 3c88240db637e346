//! Analog/digital clock view
//!
//! `ClockView` owns the engine state: settings snapshot, geometry store,
//! session overrides and the scene. Callers feed it wall time through
//! [`ClockView::update`]; setters only mark what needs redrawing.

pub mod angles;
pub mod element;
pub mod geometry;
mod interaction;
pub mod render;
pub mod scene;
pub mod transform;

use chrono::{NaiveDateTime, Timelike};

use crate::i18n::Localization;
use crate::settings::{ClockConfig, DisplayMode};
use crate::theme::parse_color;

use element::{ClockElement, ElementMap};
use geometry::GeometryStore;
use render::{ClockLayout, ClockRenderer, HandPose, RedrawKind};
use scene::{Scene, TextStyle};

pub use interaction::DragState;

/// How a settings reload affected the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigChange {
    Unchanged,
    /// Colors, fonts or time format changed
    Restyled,
    /// Switched between analog and digital
    Rebuilt,
}

pub struct ClockView {
    config: ClockConfig,
    geometry: GeometryStore,
    renderer: ClockRenderer,
    scale: ElementMap<f32>,
    rotation: ElementMap<f32>,
    drag_enabled: ElementMap<bool>,
    resize_element: Option<ClockElement>,
    drag: Option<DragState>,
    canvas: Option<(u32, u32)>,
    layout: ClockLayout,
    text_scale: f32,
    placeholder: String,
    /// Poses used by the last analog draw
    drawn: ElementMap<HandPose>,
    /// Wall time of the last draw, truncated to the second
    drawn_second: Option<NaiveDateTime>,
    digital_text: String,
    pending: Option<RedrawKind>,
}

impl ClockView {
    pub fn new(config: ClockConfig, geometry: GeometryStore, renderer: ClockRenderer) -> Self {
        Self {
            config,
            geometry,
            renderer,
            scale: ElementMap::splat(1.0),
            rotation: ElementMap::splat(0.0),
            drag_enabled: ElementMap::splat(false),
            resize_element: None,
            drag: None,
            canvas: None,
            layout: ClockLayout::new(0, 0),
            text_scale: 1.0,
            placeholder: "Clock face image not found".to_string(),
            drawn: ElementMap::default(),
            drawn_second: None,
            digital_text: String::new(),
            pending: Some(RedrawKind::Full),
        }
    }

    pub fn config(&self) -> &ClockConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GeometryStore {
        &self.geometry
    }

    pub fn layout(&self) -> ClockLayout {
        self.layout
    }

    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn renderer(&self) -> &ClockRenderer {
        &self.renderer
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.config.display_mode()
    }

    pub fn scale(&self, element: ClockElement) -> f32 {
        self.scale.get(element)
    }

    pub fn rotation(&self, element: ClockElement) -> f32 {
        self.rotation.get(element)
    }

    pub fn is_drag_enabled(&self, element: ClockElement) -> bool {
        self.drag_enabled.get(element)
    }

    pub fn resize_element(&self) -> Option<ClockElement> {
        self.resize_element
    }

    pub fn request_full_redraw(&mut self) {
        self.pending = Some(RedrawKind::Full);
    }

    /// DPI factor applied to the configured font size.
    pub fn set_text_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale > 0.0 && scale != self.text_scale {
            self.text_scale = scale;
            self.request_full_redraw();
        }
    }

    /// Swap in a freshly loaded settings snapshot.
    pub fn apply_config(&mut self, config: ClockConfig) -> ConfigChange {
        if config == self.config {
            return ConfigChange::Unchanged;
        }
        let rebuilt = config.display_mode() != self.config.display_mode();
        self.config = config;
        self.request_full_redraw();
        if rebuilt {
            self.drag = None;
            self.digital_text.clear();
            ConfigChange::Rebuilt
        } else {
            ConfigChange::Restyled
        }
    }

    pub fn refresh_translations(&mut self, l10n: &Localization) {
        let text = l10n.t_or("clock.face_missing", "Clock face image not found");
        if text != self.placeholder {
            self.placeholder = text.to_string();
            self.request_full_redraw();
        }
    }

    /// Track the canvas size. Offsets follow the canvas proportionally.
    pub fn resize_canvas(&mut self, width: u32, height: u32) {
        if width <= 1 || height <= 1 || self.canvas == Some((width, height)) {
            return;
        }
        if let Some((old_w, old_h)) = self.canvas {
            let scale_x = f64::from(width) / f64::from(old_w);
            let scale_y = f64::from(height) / f64::from(old_h);
            if self.geometry.rescale_offsets(scale_x, scale_y) {
                self.geometry.save();
            }
        }
        self.canvas = Some((width, height));
        self.layout = ClockLayout::new(width, height);
        self.request_full_redraw();
    }

    /// Hand angle including the rotation override.
    pub fn angle(&self, element: ClockElement, now: &NaiveDateTime) -> f32 {
        let base = if self.config.animation && element.is_hand() {
            angles::hand_angles(now, self.config.use_12_hour).for_element(element)
        } else {
            0.0
        };
        base + self.rotation.get(element)
    }

    pub fn poses(&self, now: &NaiveDateTime) -> ElementMap<HandPose> {
        ElementMap::from_fn(|element| HandPose {
            angle: self.angle(element, now),
            scale: self.scale.get(element),
            pivot: self.geometry.pivot(element),
            offset: self.geometry.offset(element),
        })
    }

    pub fn text_style(&self) -> TextStyle {
        let color = parse_color(&self.config.color).unwrap_or_else(|| {
            log::debug!("unknown clock color '{}', using black", self.config.color);
            (0.0, 0.0, 0.0)
        });
        TextStyle {
            font: self.config.font.clone(),
            size: self.config.font_size as f32 * self.text_scale,
            color,
        }
    }

    /// Bring the scene up to date for `now`. Returns true if it changed.
    pub fn update(&mut self, now: NaiveDateTime) -> bool {
        match self.config.display_mode() {
            DisplayMode::Digital => self.update_digital(&now),
            DisplayMode::Analog => self.update_analog(&now),
        }
    }

    fn update_digital(&mut self, now: &NaiveDateTime) -> bool {
        let text = format_time(now, self.config.use_12_hour, &self.config.separator);
        if self.pending.is_none() && text == self.digital_text {
            return false;
        }
        let style = self.text_style();
        self.renderer.draw_text(self.layout, &text, &style);
        self.digital_text = text;
        self.pending = None;
        true
    }

    fn update_analog(&mut self, now: &NaiveDateTime) -> bool {
        let second = now.with_nanosecond(0);
        let kind = match self.pending.take() {
            Some(kind) => kind,
            None if self.renderer.scene().is_empty() => RedrawKind::Full,
            None if self.config.animation && second != self.drawn_second => RedrawKind::HandsOnly,
            None => return false,
        };
        if self.drag.is_some() && kind == RedrawKind::HandsOnly {
            // Moving the scene items under the pointer; redraw once released
            return false;
        }

        let poses = self.poses(now);
        if kind == RedrawKind::Full {
            let style = self.text_style();
            self.renderer.set_placeholder(self.placeholder.clone(), style);
        }
        self.renderer.redraw(kind, self.layout, &poses);
        self.drawn = poses;
        self.drawn_second = second;
        true
    }
}

/// `HH:MM:SS`, or `hh:MM:SS AM|PM` with midnight and noon shown as 12.
pub fn format_time<T: Timelike>(time: &T, use_12_hour: bool, separator: &str) -> String {
    let (minute, second) = (time.minute(), time.second());
    if use_12_hour {
        let (is_pm, hour) = time.hour12();
        let suffix = if is_pm { "PM" } else { "AM" };
        format!("{hour:02}{separator}{minute:02}{separator}{second:02} {suffix}")
    } else {
        let hour = time.hour();
        format!("{hour:02}{separator}{minute:02}{separator}{second:02}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::ClockType;
    use chrono::NaiveDate;
    use geometry::ElementOffset;
    use image::RgbaImage;

    pub(super) fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    pub(super) fn analog_config() -> ClockConfig {
        ClockConfig {
            animation: true,
            clock_type: ClockType::Analog,
            ..ClockConfig::default()
        }
    }

    pub(super) fn test_view(config: ClockConfig) -> ClockView {
        let assets = ElementMap::from_fn(|element| match element {
            ClockElement::Face => Some(RgbaImage::from_pixel(50, 50, image::Rgba([255, 255, 255, 255]))),
            _ => Some(RgbaImage::from_pixel(6, 60, image::Rgba([0, 0, 0, 255]))),
        });
        let mut view = ClockView::new(
            config,
            GeometryStore::in_memory(),
            ClockRenderer::with_assets(assets),
        );
        view.resize_canvas(300, 300);
        view
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(&at(0, 5, 9), false, ":"), "00:05:09");
        assert_eq!(format_time(&at(0, 5, 9), true, ":"), "12:05:09 AM");
        assert_eq!(format_time(&at(13, 0, 0), true, "."), "01.00.00 PM");
        assert_eq!(format_time(&at(12, 30, 0), true, ":"), "12:30:00 PM");
        assert_eq!(format_time(&at(23, 59, 59), false, "-"), "23-59-59");
    }

    #[test]
    fn test_first_update_is_full() {
        let mut view = test_view(analog_config());
        assert!(view.update(at(6, 30, 0)));
        assert_eq!(view.scene().items().len(), 4);
        assert!(!view.update(at(6, 30, 0)));
        assert!(view.update(at(6, 30, 1)));
    }

    #[test]
    fn test_static_clock_does_not_tick() {
        let mut view = test_view(ClockConfig {
            animation: false,
            ..analog_config()
        });
        assert!(view.update(at(6, 30, 0)));
        assert!(!view.update(at(6, 30, 1)));
        assert_eq!(view.angle(ClockElement::Hour, &at(6, 30, 0)), 0.0);
    }

    #[test]
    fn test_rotation_override_adds_to_time() {
        let mut view = test_view(analog_config());
        assert!(view.set_element_rotation(ClockElement::Minute, 10.0));
        let angle = view.angle(ClockElement::Minute, &at(6, 30, 0));
        assert!((angle - 190.0).abs() < 1e-3);
    }

    #[test]
    fn test_digital_mode_renders_text() {
        let mut view = test_view(ClockConfig::default());
        assert_eq!(view.display_mode(), DisplayMode::Digital);
        assert!(view.update(at(9, 5, 0)));
        assert!(!view.update(at(9, 5, 0)));
        assert!(view.update(at(9, 5, 1)));
        assert_eq!(view.scene().images().count(), 0);
    }

    #[test]
    fn test_apply_config_classifies_change() {
        let mut view = test_view(analog_config());
        assert_eq!(view.apply_config(analog_config()), ConfigChange::Unchanged);
        let restyled = ClockConfig {
            color: "Red".into(),
            ..analog_config()
        };
        assert_eq!(view.apply_config(restyled), ConfigChange::Restyled);
        assert_eq!(view.apply_config(ClockConfig::default()), ConfigChange::Rebuilt);
    }

    #[test]
    fn test_canvas_resize_rescales_offsets() {
        let mut view = test_view(analog_config());
        let mut geometry = view.geometry().clone();
        geometry.set_offset(ClockElement::Hour, ElementOffset::new(40, 20));
        view.geometry = geometry;
        view.resize_canvas(600, 450);
        assert_eq!(view.geometry().offset(ClockElement::Hour), ElementOffset::new(80, 30));
        assert_eq!(view.layout(), ClockLayout::new(600, 450));
    }

    #[test]
    fn test_degenerate_canvas_is_ignored() {
        let mut view = test_view(analog_config());
        view.resize_canvas(1, 1);
        assert_eq!(view.layout(), ClockLayout::new(300, 300));
    }
}
