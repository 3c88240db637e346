//! Debug console: command parsing, execution, history and output log

use std::fmt;

use crate::clock::ClockView;
use crate::clock::element::ClockElement;
use crate::clock::geometry::PivotSpec;
use crate::i18n::Localization;
use crate::ui::TextInput;

/// Lines kept in the output log
const MAX_OUTPUT_LINES: usize = 200;

pub const COMMANDS_LIST: &str = "Available commands:
  list_commands
    Show this list of commands
  clock.{element}.drag&drop = true|false
    Enable/disable drag for face, hour_hand, minute_hand, second_hand
  clock.analog_animation = true|false
    Toggle analog clock hand animation
  clock.{element}.resize = true|false
    Toggle resize mode; when on, use =/+ to increase, -/_ to decrease size
  clock.{element}.scale = value
    Set scale directly (1.0 = default)
  clock.{element}.rotate = degrees
    Add rotation offset (degrees)
  clock.{element}.pivot = center|bottom|x,y
    Set hand pivot: center, bottom, or x,y ratios (0-1)
  Elements: face, hour_hand, minute_hand, second_hand
  (Aliases: analog_clock, analog_clock_hour_hand, etc.)";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    ListCommands,
    DragDrop { element: ClockElement, enabled: bool },
    AnalogAnimation(bool),
    Resize { element: ClockElement, enabled: bool },
    Scale { element: ClockElement, value: f32 },
    Rotate { element: ClockElement, degrees: f32 },
    Pivot { element: ClockElement, pivot: PivotSpec },
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Unknown element: {0}")]
    UnknownElement(String),
    #[error("Expected true or false, got: {0}")]
    InvalidBool(String),
    #[error("Invalid scale value: {0}")]
    InvalidScale(String),
    #[error("Invalid rotation value: {0}")]
    InvalidRotation(String),
    #[error("Invalid pivot for {0} (use center, bottom or x,y)")]
    InvalidPivot(String),
    #[error("The {0} has no pivot")]
    NoPivot(String),
}

impl CommandError {
    fn translation_key(&self) -> &'static str {
        match self {
            CommandError::UnknownCommand(_) => "console.unknown_command",
            CommandError::UnknownElement(_) => "console.unknown_element",
            CommandError::InvalidBool(_) => "console.invalid_bool",
            CommandError::InvalidScale(_) => "console.invalid_scale",
            CommandError::InvalidRotation(_) => "console.invalid_rotation",
            CommandError::InvalidPivot(_) => "console.invalid_pivot",
            CommandError::NoPivot(_) => "console.no_pivot",
        }
    }

    fn argument(&self) -> &str {
        match self {
            CommandError::UnknownCommand(arg)
            | CommandError::UnknownElement(arg)
            | CommandError::InvalidBool(arg)
            | CommandError::InvalidScale(arg)
            | CommandError::InvalidRotation(arg)
            | CommandError::InvalidPivot(arg)
            | CommandError::NoPivot(arg) => arg,
        }
    }

    /// Message in the current language; `{0}` in the translation is the argument.
    pub fn localized(&self, l10n: &Localization) -> String {
        match l10n.t_or(self.translation_key(), "") {
            "" => self.to_string(),
            template => l10n.format(self.translation_key(), template, &[self.argument()], &[]),
        }
    }
}

fn parse_bool(value: &str) -> Result<bool, CommandError> {
    match value.to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CommandError::InvalidBool(value.to_string())),
    }
}

fn parse_number(value: &str) -> Option<f32> {
    value.parse::<f32>().ok().filter(|v| v.is_finite())
}

fn parse_pivot(element_name: &str, value: &str) -> Result<PivotSpec, CommandError> {
    let invalid = || CommandError::InvalidPivot(element_name.to_string());
    match value.to_lowercase().as_str() {
        "center" => Ok(PivotSpec::Center),
        "bottom" => Ok(PivotSpec::Bottom),
        pair => {
            let (x, y) = pair.split_once(',').ok_or_else(invalid)?;
            let x = parse_number(x.trim()).ok_or_else(invalid)?;
            let y = parse_number(y.trim()).ok_or_else(invalid)?;
            Ok(PivotSpec::ratio(x, y))
        }
    }
}

/// Parse one console line. Matching is case-insensitive.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let unknown = || CommandError::UnknownCommand(line.to_string());
    if line.eq_ignore_ascii_case("list_commands") {
        return Ok(Command::ListCommands);
    }

    let (target, value) = line.split_once('=').ok_or_else(unknown)?;
    let value = value.trim();
    let target = target.trim();
    let path = target
        .get(..6)
        .filter(|prefix| prefix.eq_ignore_ascii_case("clock."))
        .map(|_| &target[6..])
        .ok_or_else(unknown)?;

    if path.trim().eq_ignore_ascii_case("analog_animation") {
        return Ok(Command::AnalogAnimation(parse_bool(value)?));
    }

    let (element_name, property) = path.rsplit_once('.').ok_or_else(unknown)?;
    let property: String = property
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_lowercase();
    if !matches!(
        property.as_str(),
        "drag&drop" | "resize" | "scale" | "rotate" | "pivot"
    ) || element_name.contains('.')
    {
        return Err(unknown());
    }
    let element = ClockElement::from_alias(element_name)
        .ok_or_else(|| CommandError::UnknownElement(element_name.to_string()))?;

    match property.as_str() {
        "drag&drop" => Ok(Command::DragDrop {
            element,
            enabled: parse_bool(value)?,
        }),
        "resize" => Ok(Command::Resize {
            element,
            enabled: parse_bool(value)?,
        }),
        "scale" => parse_number(value)
            .filter(|v| *v >= 0.0)
            .map(|value| Command::Scale { element, value })
            .ok_or_else(|| CommandError::InvalidScale(value.to_string())),
        "rotate" => parse_number(value)
            .map(|degrees| Command::Rotate { element, degrees })
            .ok_or_else(|| CommandError::InvalidRotation(value.to_string())),
        _ => Ok(Command::Pivot {
            element,
            pivot: parse_pivot(element_name, value)?,
        }),
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::ListCommands => f.write_str("list_commands"),
            Command::DragDrop { element, enabled } => {
                write!(f, "clock.{element}.drag&drop = {enabled}")
            }
            Command::AnalogAnimation(enabled) => write!(f, "clock.analog_animation = {enabled}"),
            Command::Resize { element, enabled } => {
                write!(f, "clock.{element}.resize = {enabled}")?;
                if *enabled {
                    f.write_str(" (use =/+ to increase, -/_ to decrease)")?;
                }
                Ok(())
            }
            Command::Scale { element, value } => write!(f, "clock.{element}.scale = {value}"),
            Command::Rotate { element, degrees } => {
                write!(f, "clock.{element}.rotate = {degrees}°")
            }
            Command::Pivot { element, pivot } => match pivot {
                PivotSpec::Center => write!(f, "clock.{element}.pivot = center"),
                PivotSpec::Bottom => write!(f, "clock.{element}.pivot = bottom"),
                PivotSpec::Ratio(x, y) => write!(f, "clock.{element}.pivot = ({x}, {y})"),
            },
        }
    }
}

/// Apply a command to the clock view and describe the result.
pub fn execute(command: &Command, clock: &mut ClockView, l10n: &Localization) -> Result<String, CommandError> {
    match *command {
        Command::ListCommands => return Ok(l10n.t_or("console.commands_list", COMMANDS_LIST).to_string()),
        Command::DragDrop { element, enabled } => clock.set_drag_drop(element, enabled),
        Command::AnalogAnimation(enabled) => clock.set_analog_animation(enabled),
        Command::Resize { element, enabled } => clock.set_resize_mode(element, enabled),
        Command::Scale { element, value } => {
            clock.set_element_scale(element, value);
        }
        Command::Rotate { element, degrees } => {
            clock.set_element_rotation(element, degrees);
        }
        Command::Pivot { element, pivot } => {
            if !clock.set_hand_pivot(element, pivot) {
                return Err(CommandError::NoPivot(element.to_string()));
            }
        }
    }
    Ok(command.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Closed,
    /// Input line only
    Collapsed,
    /// Input line plus output log
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Input,
    Output,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutputLine {
    pub kind: LineKind,
    pub text: String,
}

pub struct Console {
    visibility: Visibility,
    pub input: TextInput,
    history: Vec<String>,
    /// Distance from the newest history entry while browsing
    history_index: Option<usize>,
    output: Vec<OutputLine>,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        Self {
            visibility: Visibility::Closed,
            input: TextInput::new(),
            history: Vec::new(),
            history_index: None,
            output: Vec::new(),
        }
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_open(&self) -> bool {
        self.visibility != Visibility::Closed
    }

    /// Closed → collapsed → expanded → closed.
    pub fn toggle(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Closed => Visibility::Collapsed,
            Visibility::Collapsed => Visibility::Expanded,
            Visibility::Expanded => Visibility::Closed,
        };
    }

    /// Expanded collapses, anything else closes.
    pub fn escape(&mut self) {
        self.visibility = match self.visibility {
            Visibility::Expanded => Visibility::Collapsed,
            Visibility::Collapsed | Visibility::Closed => Visibility::Closed,
        };
    }

    pub fn history_up(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = self.history_index.map_or(0, |i| i + 1);
        if next < self.history.len() {
            self.history_index = Some(next);
            self.show_history_entry(next);
        }
    }

    pub fn history_down(&mut self) {
        match self.history_index {
            Some(index) if index > 0 => {
                self.history_index = Some(index - 1);
                self.show_history_entry(index - 1);
            }
            Some(_) => {
                self.history_index = None;
                self.input.take();
            }
            None => {}
        }
    }

    fn show_history_entry(&mut self, index: usize) {
        let entry = self.history[self.history.len() - 1 - index].clone();
        self.input.set_text(&entry);
    }

    /// Take the typed line for execution.
    ///
    /// Enter while browsing history confirms the recalled entry into the input
    /// instead of running it.
    pub fn submit(&mut self) -> Option<String> {
        if let Some(index) = self.history_index.take() {
            self.show_history_entry(index);
            return None;
        }
        let line = self.input.take().trim().to_string();
        if line.is_empty() {
            return None;
        }
        self.history.push(line.clone());
        self.log(LineKind::Input, format!("> {line}"));
        Some(line)
    }

    pub fn log(&mut self, kind: LineKind, text: impl Into<String>) {
        for line in text.into().lines() {
            self.output.push(OutputLine {
                kind,
                text: line.to_string(),
            });
        }
        if self.output.len() > MAX_OUTPUT_LINES {
            let excess = self.output.len() - MAX_OUTPUT_LINES;
            self.output.drain(..excess);
        }
    }

    pub fn output(&self) -> &[OutputLine] {
        &self.output
    }

    /// Submit the input line and run it against the clock view.
    pub fn run(&mut self, clock: &mut ClockView, l10n: &Localization) {
        let Some(line) = self.submit() else {
            return;
        };
        let result = parse_command(&line).and_then(|command| execute(&command, clock, l10n));
        match result {
            Ok(message) => self.log(LineKind::Output, message),
            Err(err) => {
                log::debug!("console command rejected: {}", err);
                self.log(LineKind::Error, err.localized(l10n));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_form() {
        assert_eq!(parse_command("LIST_COMMANDS"), Ok(Command::ListCommands));
        assert_eq!(
            parse_command("clock.hour_hand.drag & drop = TRUE"),
            Ok(Command::DragDrop {
                element: ClockElement::Hour,
                enabled: true
            })
        );
        assert_eq!(
            parse_command("Clock.Analog_Animation=false"),
            Ok(Command::AnalogAnimation(false))
        );
        assert_eq!(
            parse_command("clock.analog_clock_second_hand.resize = true"),
            Ok(Command::Resize {
                element: ClockElement::Second,
                enabled: true
            })
        );
        assert_eq!(
            parse_command("clock.face.scale = 1.25"),
            Ok(Command::Scale {
                element: ClockElement::Face,
                value: 1.25
            })
        );
        assert_eq!(
            parse_command("clock.minute_hand.rotate = -15"),
            Ok(Command::Rotate {
                element: ClockElement::Minute,
                degrees: -15.0
            })
        );
        assert_eq!(
            parse_command("clock.second.pivot = 0.5, 0.9"),
            Ok(Command::Pivot {
                element: ClockElement::Second,
                pivot: PivotSpec::Ratio(0.5, 0.9)
            })
        );
        assert_eq!(
            parse_command("clock.hour_hand.pivot = Bottom"),
            Ok(Command::Pivot {
                element: ClockElement::Hour,
                pivot: PivotSpec::Bottom
            })
        );
    }

    #[test]
    fn test_rejections() {
        assert_eq!(
            parse_command("clock.pendulum.scale = 2"),
            Err(CommandError::UnknownElement("pendulum".into()))
        );
        assert_eq!(
            parse_command("clock.face.scale = big"),
            Err(CommandError::InvalidScale("big".into()))
        );
        assert_eq!(
            parse_command("clock.face.scale = -1"),
            Err(CommandError::InvalidScale("-1".into()))
        );
        assert_eq!(
            parse_command("clock.face.rotate = NaN"),
            Err(CommandError::InvalidRotation("NaN".into()))
        );
        assert_eq!(
            parse_command("clock.hour_hand.pivot = left"),
            Err(CommandError::InvalidPivot("hour_hand".into()))
        );
        assert_eq!(
            parse_command("clock.face.drag&drop = maybe"),
            Err(CommandError::InvalidBool("maybe".into()))
        );
        assert!(matches!(parse_command("clock.face.spin = 1"), Err(CommandError::UnknownCommand(_))));
        assert!(matches!(parse_command("hello"), Err(CommandError::UnknownCommand(_))));
        assert!(matches!(parse_command("clk.face.scale = 1"), Err(CommandError::UnknownCommand(_))));
    }

    #[test]
    fn test_localized_error() {
        let l10n = Localization::new(
            "de",
            [("console.unknown_element".to_string(), "Unbekanntes Element: {0}".to_string())]
                .into_iter()
                .collect(),
        );
        let err = CommandError::UnknownElement("pendel".into());
        assert_eq!(err.localized(&l10n), "Unbekanntes Element: pendel");
        let err = CommandError::InvalidScale("x".into());
        assert_eq!(err.localized(&l10n), "Invalid scale value: x");
    }

    #[test]
    fn test_command_echo() {
        let command = Command::Pivot {
            element: ClockElement::Minute,
            pivot: PivotSpec::Ratio(0.5, 0.75),
        };
        assert_eq!(command.to_string(), "clock.minute.pivot = (0.5, 0.75)");
    }

    #[test]
    fn test_visibility_cycle() {
        let mut console = Console::new();
        assert!(!console.is_open());
        console.toggle();
        assert_eq!(console.visibility(), Visibility::Collapsed);
        console.toggle();
        assert_eq!(console.visibility(), Visibility::Expanded);
        console.escape();
        assert_eq!(console.visibility(), Visibility::Collapsed);
        console.escape();
        assert_eq!(console.visibility(), Visibility::Closed);
        console.toggle();
        console.toggle();
        console.toggle();
        assert_eq!(console.visibility(), Visibility::Closed);
    }

    #[test]
    fn test_history_browsing() {
        let mut console = Console::new();
        for line in ["first", "second"] {
            console.input.set_text(line);
            assert_eq!(console.submit().as_deref(), Some(line));
        }
        console.history_up();
        assert_eq!(console.input.text(), "second");
        console.history_up();
        assert_eq!(console.input.text(), "first");
        console.history_up();
        assert_eq!(console.input.text(), "first");
        console.history_down();
        assert_eq!(console.input.text(), "second");
        console.history_down();
        assert_eq!(console.input.text(), "");

        console.history_up();
        // Enter confirms the recalled line; the next Enter runs it
        assert_eq!(console.submit(), None);
        assert_eq!(console.submit().as_deref(), Some("second"));
    }

    #[test]
    fn test_empty_line_is_ignored() {
        let mut console = Console::new();
        console.input.set_text("   ");
        assert_eq!(console.submit(), None);
        assert!(console.output().is_empty());
    }

    #[test]
    fn test_output_is_capped() {
        let mut console = Console::new();
        for i in 0..(MAX_OUTPUT_LINES + 10) {
            console.log(LineKind::Output, format!("line {i}"));
        }
        assert_eq!(console.output().len(), MAX_OUTPUT_LINES);
        assert_eq!(console.output()[0].text, "line 10");
    }

    #[test]
    fn test_run_against_clock() {
        use crate::clock::element::ElementMap;
        use crate::clock::geometry::GeometryStore;
        use crate::clock::render::ClockRenderer;
        use crate::settings::ClockConfig;

        let mut clock = ClockView::new(
            ClockConfig::default(),
            GeometryStore::in_memory(),
            ClockRenderer::with_assets(ElementMap::from_fn(|_| None)),
        );
        let l10n = Localization::default();
        let mut console = Console::new();

        console.input.set_text("clock.hour_hand.scale = 2");
        console.run(&mut clock, &l10n);
        assert_eq!(clock.scale(ClockElement::Hour), 2.0);
        assert_eq!(console.output().last().unwrap().text, "clock.hour.scale = 2");

        console.input.set_text("clock.face.pivot = center");
        console.run(&mut clock, &l10n);
        assert_eq!(console.output().last().unwrap().kind, LineKind::Error);
    }
}
