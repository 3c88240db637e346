//! Wall time to hand angles
//!
//! Angles are in degrees, clockwise from twelve o'clock, always in `[0, 360)`.
//! Nothing here keeps state: the same timestamp always yields the same angles.

use chrono::{Local, NaiveDateTime, Timelike, Utc};
use chrono_tz::Tz;

use super::element::ClockElement;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HandAngles {
    pub hour: f32,
    pub minute: f32,
    pub second: f32,
}

impl HandAngles {
    pub const ZERO: HandAngles = HandAngles {
        hour: 0.0,
        minute: 0.0,
        second: 0.0,
    };

    pub fn for_element(&self, element: ClockElement) -> f32 {
        match element {
            ClockElement::Face => 0.0,
            ClockElement::Hour => self.hour,
            ClockElement::Minute => self.minute,
            ClockElement::Second => self.second,
        }
    }
}

/// Compute hand angles for a timestamp.
///
/// In 12-hour mode the hour hand turns 30° per hour, otherwise the dial is a
/// 24-hour dial and it turns 15° per hour. Minute and second hands sweep
/// continuously with sub-second precision.
pub fn hand_angles<T: Timelike>(time: &T, use_12_hour: bool) -> HandAngles {
    // Leap seconds report nanosecond() >= 1e9
    let micros = f64::from(time.nanosecond().min(999_999_999) / 1_000);
    let seconds = f64::from(time.second()) + micros / 1_000_000.0;
    let minutes = f64::from(time.minute()) + seconds / 60.0;
    let (hours, step) = if use_12_hour {
        (f64::from(time.hour() % 12) + minutes / 60.0, 30.0)
    } else {
        (f64::from(time.hour() % 24) + minutes / 60.0, 15.0)
    };

    HandAngles {
        hour: wrap_degrees(hours * step),
        minute: wrap_degrees(minutes * 6.0),
        second: wrap_degrees(seconds * 6.0),
    }
}

fn wrap_degrees(degrees: f64) -> f32 {
    let wrapped = degrees.rem_euclid(360.0) as f32;
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Resolve a configured timezone: a handful of common abbreviations, or any
/// IANA zone name. Returns `None` (local time) when the name is empty or unknown.
pub fn resolve_timezone(name: &str) -> Option<Tz> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return None;
    }

    let iana = match trimmed.to_uppercase().as_str() {
        "UTC" => "UTC",
        "GMT" => "Etc/GMT",
        "EST" => "America/New_York",
        "CST" => "America/Chicago",
        "MST" => "America/Denver",
        "PST" => "America/Los_Angeles",
        _ => trimmed,
    };

    match iana.parse::<Tz>() {
        Ok(tz) => Some(tz),
        Err(_) => {
            log::warn!("unknown timezone '{}', using local time", trimmed);
            None
        }
    }
}

/// Current wall time in `tz`, or local time when no zone is configured.
pub fn wall_time(tz: Option<Tz>) -> NaiveDateTime {
    match tz {
        Some(tz) => Utc::now().with_timezone(&tz).naive_local(),
        None => Local::now().naive_local(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn at(h: u32, m: u32, s: u32, micro: u32) -> NaiveTime {
        NaiveTime::from_hms_micro_opt(h, m, s, micro).unwrap()
    }

    #[test]
    fn test_midnight_is_all_zero() {
        let angles = hand_angles(&at(0, 0, 0, 0), true);
        assert_eq!(angles, HandAngles::ZERO);
    }

    #[test]
    fn test_half_past_six() {
        let angles = hand_angles(&at(6, 30, 0, 0), true);
        assert!((angles.hour - 195.0).abs() < 1e-4);
        assert!((angles.minute - 180.0).abs() < 1e-4);
        assert_eq!(angles.second, 0.0);
    }

    #[test]
    fn test_afternoon_wraps_in_12_hour_mode() {
        let morning = hand_angles(&at(3, 0, 0, 0), true);
        let afternoon = hand_angles(&at(15, 0, 0, 0), true);
        assert!((morning.hour - 90.0).abs() < 1e-4);
        assert!((afternoon.hour - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_24_hour_dial() {
        let angles = hand_angles(&at(18, 0, 0, 0), false);
        assert!((angles.hour - 270.0).abs() < 1e-4);
    }

    #[test]
    fn test_sub_second_sweep() {
        let angles = hand_angles(&at(0, 0, 15, 500_000), true);
        assert!((angles.second - 93.0).abs() < 1e-4);
        // 15.5 s is 0.2583 min
        assert!((angles.minute - 1.55).abs() < 1e-4);
    }

    #[test]
    fn test_angles_stay_below_full_turn() {
        let angles = hand_angles(&at(23, 59, 59, 999_999), false);
        assert!(angles.hour < 360.0 && angles.minute < 360.0 && angles.second < 360.0);
    }

    #[test]
    fn test_same_timestamp_same_angles() {
        let t = at(9, 41, 27, 123_456);
        assert_eq!(hand_angles(&t, true), hand_angles(&t, true));
    }

    #[test]
    fn test_resolve_timezone() {
        assert_eq!(resolve_timezone("pst"), Some(chrono_tz::America::Los_Angeles));
        assert_eq!(resolve_timezone("Europe/Paris"), Some(chrono_tz::Europe::Paris));
        assert_eq!(resolve_timezone("  "), None);
        assert_eq!(resolve_timezone("Mars/Olympus_Mons"), None);
    }
}
