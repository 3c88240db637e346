//! Settings file loading (`clock_app.ini`)
//!
//! The file is a flat INI store. Keys carry the widget prefix the settings
//! editor uses (`D.app_theme`, `T.app_time_12_hour_format`, ...); only the
//! part after the first dot is significant.

use std::fs;
use std::path::Path;

use chrono_tz::Tz;

use crate::clock::angles::resolve_timezone;
use crate::i18n;
use crate::theme::{self, ThemeKind};

const GENERAL: &str = "-S- General";
const DISPLAY: &str = "-S- Display";
const BEHAVIOR: &str = "-S- Behavior";

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected `key = value` or `[section]`, found `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: key outside of any section")]
    NoSection { line: usize },
}

/// Parsed INI sections in file order. Keys are stored without their prefix.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct IniDocument {
    sections: Vec<(String, Vec<(String, String)>)>,
}

impl IniDocument {
    pub fn parse(content: &str) -> Result<Self, SettingsError> {
        let mut doc = IniDocument::default();
        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || is_comment(line) {
                continue;
            }
            if let Some(name) = section_name(line) {
                doc.sections.push((name.to_string(), Vec::new()));
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                return Err(SettingsError::Syntax {
                    line: index + 1,
                    text: line.to_string(),
                });
            };
            let (_, entries) = doc
                .sections
                .last_mut()
                .ok_or(SettingsError::NoSection { line: index + 1 })?;
            entries.push((strip_prefix(key.trim()).to_string(), value.trim().to_string()));
        }
        Ok(doc)
    }

    /// Last value for `key` in `section`.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .filter(|(name, _)| name == section)
            .flat_map(|(_, entries)| entries.iter())
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .last()
    }

    /// All entries of `section`, in file order.
    pub fn entries(&self, section: &str) -> impl Iterator<Item = (&str, &str)> {
        self.sections
            .iter()
            .filter(move |(name, _)| name == section)
            .flat_map(|(_, entries)| entries.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

fn section_name(line: &str) -> Option<&str> {
    line.strip_prefix('[')
        .and_then(|l| l.strip_suffix(']'))
        .map(str::trim)
}

fn is_comment(line: &str) -> bool {
    line.starts_with(';') || line.starts_with('#')
}

fn strip_prefix(key: &str) -> &str {
    key.split_once('.').map_or(key, |(_, name)| name)
}

fn parse_bool(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockType {
    Analog,
    Digital,
}

impl ClockType {
    fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("digital") {
            ClockType::Digital
        } else {
            ClockType::Analog
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClockType::Analog => "Analog",
            ClockType::Digital => "Digital",
        }
    }
}

/// What the clock view actually shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Analog,
    Digital,
}

/// Snapshot of the user settings the clock view consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockConfig {
    pub animation: bool,
    pub clock_type: ClockType,
    pub color: String,
    pub use_12_hour: bool,
    pub separator: String,
    pub timezone_name: String,
    pub timezone: Option<Tz>,
    pub font: String,
    pub font_size: u32,
    pub theme: ThemeKind,
    pub language: String,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            animation: false,
            clock_type: ClockType::Digital,
            color: "Black".to_string(),
            use_12_hour: false,
            separator: ":".to_string(),
            timezone_name: String::new(),
            timezone: None,
            font: "Arial".to_string(),
            font_size: 12,
            theme: ThemeKind::Light,
            language: "English".to_string(),
        }
    }
}

impl ClockConfig {
    pub fn from_ini(doc: &IniDocument) -> Self {
        let mut config = ClockConfig::default();

        for section in [DISPLAY, BEHAVIOR] {
            for (key, value) in doc.entries(section) {
                match key {
                    "app_animation_option" | "app_clock_animation" => {
                        config.animation = parse_bool(value)
                    }
                    "app_clock_type" => config.clock_type = ClockType::from_name(value),
                    "app_clock_color" => config.color = value.to_string(),
                    "app_time_12_hour_format" => config.use_12_hour = parse_bool(value),
                    "app_time_separator" => config.separator = value.to_string(),
                    "app_timezone" => {
                        config.timezone_name = value.to_string();
                        config.timezone = resolve_timezone(value);
                    }
                    "app_clock_font" => config.font = value.to_string(),
                    "app_clock_font_size" => match value.parse::<f64>() {
                        Ok(size) if size.is_finite() && size > 0.0 => {
                            config.font_size = size.trunc() as u32
                        }
                        _ => log::warn!("ignoring clock font size '{}'", value),
                    },
                    _ => {}
                }
            }
        }

        if let Some(theme) = doc.get(DISPLAY, "app_theme").filter(|v| !v.is_empty()) {
            config.theme = ThemeKind::from_name(theme);
        }
        if let Some(language) = doc.get(GENERAL, "app_language").filter(|v| !v.is_empty()) {
            config.language = language.to_string();
        }
        config
    }

    pub fn try_load(path: &Path) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_ini(&IniDocument::parse(&content)?))
    }

    /// Load settings, writing the default file first if there is none.
    /// Any failure yields the built-in defaults.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            if let Err(err) = write_default_file(path) {
                log::warn!("cannot create default settings at {}: {}", path.display(), err);
            }
        }
        match Self::try_load(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("using default settings, {} is unusable: {}", path.display(), err);
                ClockConfig::default()
            }
        }
    }

    /// Digital only when animation is off and the clock type asks for it.
    pub fn display_mode(&self) -> DisplayMode {
        if !self.animation && self.clock_type == ClockType::Digital {
            DisplayMode::Digital
        } else {
            DisplayMode::Analog
        }
    }
}

pub fn default_ini() -> String {
    let lines = [
        format!("[{GENERAL}]"),
        "; supported: English, Arabic, French, German, Italian, Portuguese, Russian, Spanish, Turkish".into(),
        "D.app_language = English".into(),
        String::new(),
        format!("[{DISPLAY}]"),
        "; supported: Light, Dark".into(),
        "T.app_theme = Light".into(),
        "; supported: UTC, GMT, EST, CST, MST, PST, or any IANA zone name".into(),
        "D.app_timezone = UTC".into(),
        "D.app_time_separator = :".into(),
        "T.app_time_12_hour_format = False".into(),
        String::new(),
        format!("[{BEHAVIOR}]"),
        "T.app_clock_animation = On".into(),
        "; supported: Analog, Digital".into(),
        "D.app_clock_type = Analog".into(),
        "; supported: Red, Green, Blue, Yellow, Purple, Orange, Pink, Brown, Gray, Black, White".into(),
        "D.app_clock_color = Black".into(),
        "D.app_clock_font = Arial".into(),
        "N.app_clock_font_size = 12".into(),
    ];
    let mut content = lines.join("\n");
    content.push('\n');
    content
}

/// A setting the settings screen can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingField {
    Animation,
    ClockType,
    TwelveHour,
    ClockColor,
    Theme,
    Language,
}

impl SettingField {
    pub const ALL: [SettingField; 6] = [
        SettingField::Animation,
        SettingField::ClockType,
        SettingField::TwelveHour,
        SettingField::ClockColor,
        SettingField::Theme,
        SettingField::Language,
    ];

    pub fn section(self) -> &'static str {
        match self {
            SettingField::Language => GENERAL,
            SettingField::TwelveHour | SettingField::Theme => DISPLAY,
            SettingField::Animation | SettingField::ClockType | SettingField::ClockColor => BEHAVIOR,
        }
    }

    /// Key without its widget prefix.
    pub fn key(self) -> &'static str {
        match self {
            SettingField::Animation => "app_clock_animation",
            SettingField::ClockType => "app_clock_type",
            SettingField::TwelveHour => "app_time_12_hour_format",
            SettingField::ClockColor => "app_clock_color",
            SettingField::Theme => "app_theme",
            SettingField::Language => "app_language",
        }
    }

    /// Key written when the file does not have the setting yet.
    fn prefixed_key(self) -> String {
        let prefix = match self {
            SettingField::Animation | SettingField::TwelveHour | SettingField::Theme => "T",
            SettingField::ClockType | SettingField::ClockColor | SettingField::Language => "D",
        };
        format!("{prefix}.{}", self.key())
    }

    pub fn choices(self) -> Vec<&'static str> {
        match self {
            SettingField::Animation | SettingField::TwelveHour => vec!["True", "False"],
            SettingField::ClockType => vec![ClockType::Analog.name(), ClockType::Digital.name()],
            SettingField::ClockColor => theme::CLOCK_COLORS.to_vec(),
            SettingField::Theme => vec![ThemeKind::Light.name(), ThemeKind::Dark.name()],
            SettingField::Language => i18n::language_names().collect(),
        }
    }

    /// Current value as it would be written to the file.
    pub fn current(self, config: &ClockConfig) -> String {
        let flag = |on: bool| String::from(if on { "True" } else { "False" });
        match self {
            SettingField::Animation => flag(config.animation),
            SettingField::TwelveHour => flag(config.use_12_hour),
            SettingField::ClockType => config.clock_type.name().to_string(),
            SettingField::ClockColor => config.color.clone(),
            SettingField::Theme => config.theme.name().to_string(),
            SettingField::Language => config.language.clone(),
        }
    }

    /// Choice after the current one, wrapping around. Values outside the
    /// list step to the first choice.
    pub fn next_value(self, config: &ClockConfig) -> &'static str {
        let current = self.current(config);
        let choices = self.choices();
        let next = choices
            .iter()
            .position(|choice| choice.eq_ignore_ascii_case(current.trim()))
            .map_or(0, |index| (index + 1) % choices.len());
        choices[next]
    }
}

/// Set `key` in `section` of an INI text. Other lines and the key's prefix
/// are left as they are. A missing key is added under `fallback_key`.
pub fn set_value(content: &str, section: &str, key: &str, fallback_key: &str, value: &str) -> String {
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut in_section = false;
    let mut header = None;
    let mut replaced = false;

    for (index, line) in lines.iter_mut().enumerate() {
        let trimmed = line.trim();
        if let Some(name) = section_name(trimmed) {
            in_section = name == section;
            if in_section && header.is_none() {
                header = Some(index);
            }
            continue;
        }
        if !in_section || is_comment(trimmed) {
            continue;
        }
        let Some((raw_key, _)) = trimmed.split_once('=') else {
            continue;
        };
        let raw_key = raw_key.trim();
        if strip_prefix(raw_key) == key {
            *line = format!("{raw_key} = {value}");
            replaced = true;
        }
    }

    if !replaced {
        let entry = format!("{fallback_key} = {value}");
        match header {
            Some(index) => lines.insert(index + 1, entry),
            None => {
                if lines.last().is_some_and(|line| !line.trim().is_empty()) {
                    lines.push(String::new());
                }
                lines.push(format!("[{section}]"));
                lines.push(entry);
            }
        }
    }

    let mut updated = lines.join("\n");
    updated.push('\n');
    updated
}

/// Write one setting back to the settings file. A missing file starts from
/// the default contents.
pub fn write_setting(path: &Path, field: SettingField, value: &str) -> Result<(), SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => default_ini(),
        Err(err) => return Err(err.into()),
    };
    let updated = set_value(&content, field.section(), field.key(), &field.prefixed_key(), value);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, updated)?;
    log::info!("{} = {} written to {}", field.key(), value, path.display());
    Ok(())
}

pub fn write_default_file(path: &Path) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, default_ini())?;
    log::info!("wrote default settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixes_are_stripped() {
        let doc = IniDocument::parse("[-S- Display]\nD.app_theme = Dark\nplain = 1\n").unwrap();
        assert_eq!(doc.get(DISPLAY, "app_theme"), Some("Dark"));
        assert_eq!(doc.get(DISPLAY, "plain"), Some("1"));
        assert_eq!(doc.get(GENERAL, "app_theme"), None);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let doc = IniDocument::parse("; note\n# other\n\n[a]\nk = v = w\n").unwrap();
        assert_eq!(doc.get("a", "k"), Some("v = w"));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            IniDocument::parse("k = v"),
            Err(SettingsError::NoSection { line: 1 })
        ));
        assert!(matches!(
            IniDocument::parse("[a]\njust words"),
            Err(SettingsError::Syntax { line: 2, .. })
        ));
    }

    #[test]
    fn test_defaults_when_keys_missing() {
        let config = ClockConfig::from_ini(&IniDocument::default());
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.display_mode(), DisplayMode::Digital);
    }

    #[test]
    fn test_reads_clock_keys() {
        let doc = IniDocument::parse(
            "[-S- General]\nD.app_language = French\n\
             [-S- Display]\nT.app_theme = Dark\nD.app_timezone = PST\nD.app_time_separator = .\n\
             T.app_time_12_hour_format = yes\n\
             [-S- Behavior]\nT.app_clock_animation = On\nD.app_clock_type = Analog\n\
             D.app_clock_color = Red\nD.app_clock_font = Verdana\nN.app_clock_font_size = 18.7\n",
        )
        .unwrap();
        let config = ClockConfig::from_ini(&doc);
        assert!(config.animation);
        assert!(config.use_12_hour);
        assert_eq!(config.clock_type, ClockType::Analog);
        assert_eq!(config.color, "Red");
        assert_eq!(config.separator, ".");
        assert_eq!(config.timezone, Some(chrono_tz::America::Los_Angeles));
        assert_eq!(config.font, "Verdana");
        assert_eq!(config.font_size, 18);
        assert_eq!(config.theme, ThemeKind::Dark);
        assert_eq!(config.language, "French");
    }

    #[test]
    fn test_display_mode_rule() {
        let mut config = ClockConfig {
            animation: true,
            clock_type: ClockType::Digital,
            ..ClockConfig::default()
        };
        assert_eq!(config.display_mode(), DisplayMode::Analog);
        config.animation = false;
        assert_eq!(config.display_mode(), DisplayMode::Digital);
        config.clock_type = ClockType::Analog;
        assert_eq!(config.display_mode(), DisplayMode::Analog);
    }

    #[test]
    fn test_bad_font_size_keeps_default() {
        let doc = IniDocument::parse("[-S- Behavior]\nN.app_clock_font_size = big\n").unwrap();
        assert_eq!(ClockConfig::from_ini(&doc).font_size, 12);
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("clock_app.ini");
        let config = ClockConfig::load(&path);
        assert!(path.exists());
        assert!(config.animation);
        assert_eq!(config.display_mode(), DisplayMode::Analog);
        assert_eq!(config.timezone, Some(chrono_tz::UTC));
    }

    #[test]
    fn test_set_value_keeps_prefix_and_comments() {
        let content = "[-S- Display]\n; supported: Light, Dark\nT.app_theme = Light\n\n[-S- Behavior]\nD.app_clock_color = Black\n";
        let updated = set_value(content, DISPLAY, "app_theme", "T.app_theme", "Dark");
        assert_eq!(
            updated,
            "[-S- Display]\n; supported: Light, Dark\nT.app_theme = Dark\n\n[-S- Behavior]\nD.app_clock_color = Black\n"
        );
    }

    #[test]
    fn test_set_value_adds_missing_keys() {
        let content = "[-S- Display]\nT.app_theme = Light\n";
        let updated = set_value(content, DISPLAY, "app_time_12_hour_format", "T.app_time_12_hour_format", "True");
        assert_eq!(updated, "[-S- Display]\nT.app_time_12_hour_format = True\nT.app_theme = Light\n");

        let updated = set_value(content, GENERAL, "app_language", "D.app_language", "French");
        assert_eq!(updated, "[-S- Display]\nT.app_theme = Light\n\n[-S- General]\nD.app_language = French\n");
    }

    #[test]
    fn test_next_value_cycles() {
        let config = ClockConfig::default();
        assert_eq!(SettingField::Animation.next_value(&config), "True");
        assert_eq!(SettingField::ClockType.next_value(&config), "Analog");
        assert_eq!(SettingField::ClockColor.next_value(&config), "White");
        assert_eq!(SettingField::Theme.next_value(&config), "Dark");
        assert_eq!(SettingField::Language.next_value(&config), "Arabic");

        let config = ClockConfig {
            color: "Gray".into(),
            language: "no such language".into(),
            ..ClockConfig::default()
        };
        assert_eq!(SettingField::ClockColor.next_value(&config), "Black");
        assert_eq!(SettingField::Language.next_value(&config), "English");
    }

    #[test]
    fn test_written_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock_app.ini");
        ClockConfig::load(&path);
        for field in SettingField::ALL {
            let value = field.next_value(&ClockConfig::load(&path));
            write_setting(&path, field, value).unwrap();
        }
        let config = ClockConfig::load(&path);
        assert!(!config.animation);
        assert!(config.use_12_hour);
        assert_eq!(config.clock_type, ClockType::Digital);
        assert_eq!(config.color, "White");
        assert_eq!(config.theme, ThemeKind::Dark);
        assert_eq!(config.language, "Arabic");
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("; supported: Light, Dark"));
        assert!(content.contains("T.app_clock_animation = False"));
    }

    #[test]
    fn test_unparsable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clock_app.ini");
        fs::write(&path, "garbage without structure").unwrap();
        assert_eq!(ClockConfig::load(&path), ClockConfig::default());
    }
}
