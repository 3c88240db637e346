//! Persisted hand pivots and element offsets
//!
//! The geometry file is a single JSON object:
//!
//! ```json
//! {
//!   "hour": [0.5, 0.82],
//!   "second": "bottom",
//!   "offsets": { "hour": [0, 0], "minute": [12, -4], "second": [0, 0] }
//! }
//! ```
//!
//! Pivot keys are only written for hands whose pivot was set explicitly; a
//! missing key means the element default. Anything unreadable falls back to
//! defaults, one entry at a time.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::element::{ClockElement, ElementMap};
use crate::config::clock as consts;

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("geometry file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("geometry file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("geometry file root is not an object")]
    NotAnObject,
}

/// Point inside a hand's bounding box that stays fixed under rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PivotSpec {
    Center,
    Bottom,
    /// Fractions of width and height, each in `[0, 1]`.
    Ratio(f32, f32),
}

impl PivotSpec {
    pub fn ratio(x: f32, y: f32) -> Self {
        PivotSpec::Ratio(x.clamp(0.0, 1.0), y.clamp(0.0, 1.0))
    }

    pub fn default_for(element: ClockElement) -> Self {
        match element {
            ClockElement::Hour | ClockElement::Minute => {
                let (x, y) = consts::DEFAULT_HAND_PIVOT;
                PivotSpec::Ratio(x, y)
            }
            ClockElement::Second => PivotSpec::Bottom,
            ClockElement::Face => PivotSpec::Center,
        }
    }

    /// Pivot position in a `width` x `height` image.
    pub fn resolve(self, width: u32, height: u32) -> (f32, f32) {
        let (w, h) = (width as f32, height as f32);
        match self {
            PivotSpec::Bottom => (w / 2.0, (h - 1.0).max(0.0)),
            PivotSpec::Ratio(x, y) => (w * x, h * y),
            PivotSpec::Center => (w / 2.0, h / 2.0),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => match name.to_lowercase().as_str() {
                "center" => Some(PivotSpec::Center),
                "bottom" => Some(PivotSpec::Bottom),
                _ => None,
            },
            Value::Array(pair) if pair.len() == 2 => {
                let x = pair[0].as_f64()?;
                let y = pair[1].as_f64()?;
                Some(PivotSpec::ratio(x as f32, y as f32))
            }
            _ => None,
        }
    }
}

/// Manual pixel displacement of an element from the clock center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementOffset {
    pub dx: i32,
    pub dy: i32,
}

impl ElementOffset {
    pub const ZERO: ElementOffset = ElementOffset { dx: 0, dy: 0 };

    pub fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0 && self.dy == 0
    }

    pub fn translated(self, dx: i32, dy: i32) -> Self {
        Self::new(self.dx.saturating_add(dx), self.dy.saturating_add(dy))
    }

    /// Scale independently along each axis, rounding to whole pixels.
    pub fn rescaled(self, scale_x: f64, scale_y: f64) -> Self {
        Self::new(
            (f64::from(self.dx) * scale_x).round() as i32,
            (f64::from(self.dy) * scale_y).round() as i32,
        )
    }

    fn from_json(value: &Value) -> Option<Self> {
        let pair = value.as_array().filter(|pair| pair.len() == 2)?;
        // Components outside the i32 range make the entry malformed
        let component = |v: &Value| {
            let whole = v.as_i64().or_else(|| v.as_f64().map(|f| f.trunc() as i64))?;
            i32::try_from(whole).ok()
        };
        Some(Self::new(component(&pair[0])?, component(&pair[1])?))
    }
}

#[derive(Serialize)]
#[serde(untagged)]
enum PivotRecord {
    Named(&'static str),
    Ratio([f32; 2]),
}

impl From<PivotSpec> for PivotRecord {
    fn from(spec: PivotSpec) -> Self {
        let round4 = |v: f32| (v * 10_000.0).round() / 10_000.0;
        match spec {
            PivotSpec::Center => PivotRecord::Named("center"),
            PivotSpec::Bottom => PivotRecord::Named("bottom"),
            PivotSpec::Ratio(x, y) => PivotRecord::Ratio([round4(x), round4(y)]),
        }
    }
}

#[derive(Serialize)]
struct GeometryRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    hour: Option<PivotRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minute: Option<PivotRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    second: Option<PivotRecord>,
    offsets: BTreeMap<&'static str, [i32; 2]>,
}

/// Pivot and offset state for the clock elements.
///
/// Only hand pivots and hand offsets reach the disk; the face offset is kept
/// for the session.
#[derive(Debug, Clone)]
pub struct GeometryStore {
    path: Option<PathBuf>,
    pivots: ElementMap<Option<PivotSpec>>,
    offsets: ElementMap<ElementOffset>,
}

impl GeometryStore {
    /// Store that never touches the disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            pivots: ElementMap::splat(None),
            offsets: ElementMap::default(),
        }
    }

    /// Load from `path`. A missing or malformed file yields defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut store = Self::in_memory();
        match fs::read_to_string(&path) {
            Ok(content) => {
                if let Err(err) = store.apply_json(&content) {
                    log::warn!("ignoring geometry file {}: {}", path.display(), err);
                }
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("no geometry file at {}, using defaults", path.display());
            }
            Err(err) => log::warn!("cannot read geometry file {}: {}", path.display(), err),
        }
        store.path = Some(path);
        store
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Merge a geometry document into this store, skipping entries that don't parse.
    pub fn apply_json(&mut self, content: &str) -> Result<(), GeometryError> {
        let root: Value = serde_json::from_str(content)?;
        let object = root.as_object().ok_or(GeometryError::NotAnObject)?;

        for element in ClockElement::HANDS {
            if let Some(spec) = object.get(element.key()).and_then(PivotSpec::from_json) {
                self.pivots.set(element, Some(spec));
            }
        }

        if let Some(offsets) = object.get("offsets").and_then(Value::as_object) {
            for element in ClockElement::HANDS {
                if let Some(offset) = offsets.get(element.key()).and_then(ElementOffset::from_json) {
                    self.offsets.set(element, offset);
                }
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String, GeometryError> {
        let pivot = |element| self.pivots.get(element).map(PivotRecord::from);
        let offsets = ClockElement::HANDS
            .iter()
            .map(|&element| {
                let offset = self.offsets.get(element);
                (element.key(), [offset.dx, offset.dy])
            })
            .collect();
        let record = GeometryRecord {
            hour: pivot(ClockElement::Hour),
            minute: pivot(ClockElement::Minute),
            second: pivot(ClockElement::Second),
            offsets,
        };
        Ok(serde_json::to_string_pretty(&record)?)
    }

    /// Effective pivot: explicit setting or the element default.
    pub fn pivot(&self, element: ClockElement) -> PivotSpec {
        self.pivots
            .get(element)
            .unwrap_or_else(|| PivotSpec::default_for(element))
    }

    pub fn set_pivot(&mut self, element: ClockElement, spec: PivotSpec) {
        self.pivots.set(element, Some(spec));
    }

    pub fn offset(&self, element: ClockElement) -> ElementOffset {
        self.offsets.get(element)
    }

    pub fn set_offset(&mut self, element: ClockElement, offset: ElementOffset) {
        self.offsets.set(element, offset);
    }

    /// Rescale every nonzero offset. Returns true if any offset was touched.
    pub fn rescale_offsets(&mut self, scale_x: f64, scale_y: f64) -> bool {
        let mut touched = false;
        for element in ClockElement::ALL {
            let offset = self.offsets.get(element);
            if !offset.is_zero() {
                self.offsets.set(element, offset.rescaled(scale_x, scale_y));
                touched = true;
            }
        }
        touched
    }

    pub fn try_save(&self) -> Result<(), GeometryError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Best-effort save; failures are logged and the in-memory state stays.
    pub fn save(&self) {
        if let Err(err) = self.try_save() {
            log::warn!("failed to save clock geometry: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let store = GeometryStore::in_memory();
        assert_eq!(store.pivot(ClockElement::Hour), PivotSpec::Ratio(0.5, 0.82));
        assert_eq!(store.pivot(ClockElement::Minute), PivotSpec::Ratio(0.5, 0.82));
        assert_eq!(store.pivot(ClockElement::Second), PivotSpec::Bottom);
        assert!(store.offset(ClockElement::Hour).is_zero());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = GeometryStore::load(dir.path().join("clock_pivots.json"));
        assert_eq!(store.pivot(ClockElement::Second), PivotSpec::Bottom);
    }

    #[test]
    fn test_truncated_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock_pivots.json");
        fs::write(&path, r#"{"hour": [0.3, 0.7], "offsets": {"hour": [4,"#).unwrap();
        let store = GeometryStore::load(&path);
        assert_eq!(store.pivot(ClockElement::Hour), PivotSpec::Ratio(0.5, 0.82));
        assert!(store.offset(ClockElement::Hour).is_zero());
    }

    #[test]
    fn test_bad_entries_are_skipped() {
        let mut store = GeometryStore::in_memory();
        store
            .apply_json(
                r#"{"hour": "sideways", "minute": "CENTER", "second": [0.5],
                    "offsets": {"hour": [3, 4], "minute": "x", "second": [1.9, -2]}}"#,
            )
            .unwrap();
        assert_eq!(store.pivot(ClockElement::Hour), PivotSpec::Ratio(0.5, 0.82));
        assert_eq!(store.pivot(ClockElement::Minute), PivotSpec::Center);
        assert_eq!(store.pivot(ClockElement::Second), PivotSpec::Bottom);
        assert_eq!(store.offset(ClockElement::Hour), ElementOffset::new(3, 4));
        assert!(store.offset(ClockElement::Minute).is_zero());
        assert_eq!(store.offset(ClockElement::Second), ElementOffset::new(1, -2));
    }

    #[test]
    fn test_out_of_range_offsets_are_skipped() {
        let mut store = GeometryStore::in_memory();
        store
            .apply_json(r#"{"offsets": {"hour": [1e12, 0], "minute": [5, -3000000000], "second": [-7, 2]}}"#)
            .unwrap();
        assert!(store.offset(ClockElement::Hour).is_zero());
        assert!(store.offset(ClockElement::Minute).is_zero());
        assert_eq!(store.offset(ClockElement::Second), ElementOffset::new(-7, 2));
    }

    #[test]
    fn test_non_object_root_is_rejected() {
        let mut store = GeometryStore::in_memory();
        assert!(matches!(store.apply_json("[1, 2]"), Err(GeometryError::NotAnObject)));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clock_pivots.json");
        let mut store = GeometryStore::load(&path);
        store.set_pivot(ClockElement::Hour, PivotSpec::ratio(0.123456, 0.9));
        store.set_pivot(ClockElement::Second, PivotSpec::Center);
        store.set_offset(ClockElement::Minute, ElementOffset::new(-7, 12));
        store.try_save().unwrap();

        let reloaded = GeometryStore::load(&path);
        assert_eq!(reloaded.pivot(ClockElement::Hour), PivotSpec::Ratio(0.1235, 0.9));
        assert_eq!(reloaded.pivot(ClockElement::Second), PivotSpec::Center);
        assert_eq!(reloaded.pivot(ClockElement::Minute), PivotSpec::Ratio(0.5, 0.82));
        assert_eq!(reloaded.offset(ClockElement::Minute), ElementOffset::new(-7, 12));
    }

    #[test]
    fn test_written_document_shape() {
        let mut store = GeometryStore::in_memory();
        store.set_pivot(ClockElement::Second, PivotSpec::Bottom);
        let doc: Value = serde_json::from_str(&store.to_json().unwrap()).unwrap();
        assert_eq!(doc["second"], "bottom");
        assert!(doc.get("hour").is_none());
        assert_eq!(doc["offsets"]["minute"], serde_json::json!([0, 0]));
        assert!(doc["offsets"].get("face").is_none());
    }

    #[test]
    fn test_rescale_offsets() {
        let mut store = GeometryStore::in_memory();
        store.set_offset(ClockElement::Hour, ElementOffset::new(40, 20));
        assert!(store.rescale_offsets(600.0 / 300.0, 450.0 / 300.0));
        assert_eq!(store.offset(ClockElement::Hour), ElementOffset::new(80, 30));
        assert!(store.offset(ClockElement::Minute).is_zero());
    }

    #[test]
    fn test_rescale_without_offsets_reports_nothing() {
        let mut store = GeometryStore::in_memory();
        assert!(!store.rescale_offsets(2.0, 2.0));
    }

    #[test]
    fn test_pivot_resolution() {
        assert_eq!(PivotSpec::Bottom.resolve(10, 40), (5.0, 39.0));
        assert_eq!(PivotSpec::Center.resolve(10, 40), (5.0, 20.0));
        let (x, y) = PivotSpec::Ratio(0.5, 0.82).resolve(10, 100);
        assert_eq!(x, 5.0);
        assert!((y - 82.0).abs() < 1e-4);
    }
}
