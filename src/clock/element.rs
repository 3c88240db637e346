//! Drawable clock layers

use std::fmt;

use crate::config::clock as consts;

/// One drawable layer of the analog clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClockElement {
    Face,
    Hour,
    Minute,
    Second,
}

impl ClockElement {
    pub const ALL: [ClockElement; 4] = [
        ClockElement::Face,
        ClockElement::Hour,
        ClockElement::Minute,
        ClockElement::Second,
    ];

    /// Hands in draw order (hour below minute below second).
    pub const HANDS: [ClockElement; 3] = [
        ClockElement::Hour,
        ClockElement::Minute,
        ClockElement::Second,
    ];

    pub fn is_hand(self) -> bool {
        !matches!(self, ClockElement::Face)
    }

    /// Key used in the geometry file and in log output.
    pub fn key(self) -> &'static str {
        match self {
            ClockElement::Face => "face",
            ClockElement::Hour => "hour",
            ClockElement::Minute => "minute",
            ClockElement::Second => "second",
        }
    }

    /// Map console input (including the long asset-style aliases) to an element.
    pub fn from_alias(name: &str) -> Option<Self> {
        let key = name.trim().to_lowercase().replace(' ', "_");
        match key.as_str() {
            "face" | "analog_clock" => Some(ClockElement::Face),
            "hour" | "hour_hand" | "analog_clock_hour_hand" => Some(ClockElement::Hour),
            "minute" | "minute_hand" | "analog_clock_minute_hand" => Some(ClockElement::Minute),
            "second" | "second_hand" | "analog_clock_second_hand" => Some(ClockElement::Second),
            _ => None,
        }
    }

    /// Hand length relative to the face radius.
    pub fn base_scale_factor(self) -> f32 {
        match self {
            ClockElement::Face => 1.0,
            ClockElement::Hour => consts::HOUR_SCALE_FACTOR,
            ClockElement::Minute => consts::MINUTE_SCALE_FACTOR,
            ClockElement::Second => consts::SECOND_SCALE_FACTOR,
        }
    }

    pub fn asset_name(self) -> &'static str {
        match self {
            ClockElement::Face => consts::FACE_ASSET,
            ClockElement::Hour => consts::HOUR_ASSET,
            ClockElement::Minute => consts::MINUTE_ASSET,
            ClockElement::Second => consts::SECOND_ASSET,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ClockElement::Face => 0,
            ClockElement::Hour => 1,
            ClockElement::Minute => 2,
            ClockElement::Second => 3,
        }
    }
}

impl fmt::Display for ClockElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Fixed-size map with one slot per element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementMap<T> {
    slots: [T; 4],
}

impl<T: Copy> ElementMap<T> {
    pub fn splat(value: T) -> Self {
        Self { slots: [value; 4] }
    }

    pub fn get(&self, element: ClockElement) -> T {
        self.slots[element.index()]
    }

    pub fn set(&mut self, element: ClockElement, value: T) {
        self.slots[element.index()] = value;
    }
}

impl<T> ElementMap<T> {
    pub fn from_fn(mut f: impl FnMut(ClockElement) -> T) -> Self {
        Self {
            slots: ClockElement::ALL.map(&mut f),
        }
    }

    pub fn get_ref(&self, element: ClockElement) -> &T {
        &self.slots[element.index()]
    }

    pub fn get_mut(&mut self, element: ClockElement) -> &mut T {
        &mut self.slots[element.index()]
    }
}

impl<T: Copy + Default> Default for ElementMap<T> {
    fn default() -> Self {
        Self::splat(T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(ClockElement::from_alias("hour_hand"), Some(ClockElement::Hour));
        assert_eq!(
            ClockElement::from_alias("Analog_Clock_Second_Hand"),
            Some(ClockElement::Second)
        );
        assert_eq!(ClockElement::from_alias("analog clock"), Some(ClockElement::Face));
        assert_eq!(ClockElement::from_alias("pendulum"), None);
    }

    #[test]
    fn test_element_map() {
        let mut map = ElementMap::splat(1.0_f32);
        map.set(ClockElement::Minute, 2.5);
        assert_eq!(map.get(ClockElement::Minute), 2.5);
        assert_eq!(map.get(ClockElement::Hour), 1.0);

        *map.get_mut(ClockElement::Face) += 1.0;
        assert_eq!(map.get(ClockElement::Face), 2.0);

        let keys = ElementMap::from_fn(ClockElement::key);
        assert_eq!(*keys.get_ref(ClockElement::Second), "second");
    }
}
