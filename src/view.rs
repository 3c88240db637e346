//! Screens shown by the app and what they ask the app to do

use crate::clock::ClockView;
use crate::config::layout;
use crate::console::Visibility;
use crate::i18n::Localization;
use crate::settings::{ClockConfig, SettingField};
use crate::theme::Theme;
use crate::ui::{Button, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Main,
    Clock,
    Settings,
}

/// Requests a view hands back to the app instead of calling into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAction {
    SwitchMenu(Menu),
    /// Step a setting to its next choice and write it to the settings file
    CycleSetting(SettingField),
    Quit,
}

/// Every screen gets a chance to react to theme and language changes.
pub trait View {
    fn refresh_theme(&mut self, _theme: &Theme) {}
    fn refresh_translations(&mut self, _l10n: &Localization) {}
}

pub struct MainMenu {
    title: String,
    clock_label: String,
    settings_label: String,
    quit_label: String,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self::new()
    }
}

impl MainMenu {
    pub fn new() -> Self {
        Self {
            title: "Clock App".to_string(),
            clock_label: "Clock".to_string(),
            settings_label: "Settings".to_string(),
            quit_label: "Quit".to_string(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Buttons stacked in the middle of the window.
    pub fn buttons(&self, width: f32, height: f32, scale: f32) -> Vec<Button> {
        let entries = [
            (&self.clock_label, ViewAction::SwitchMenu(Menu::Clock)),
            (&self.settings_label, ViewAction::SwitchMenu(Menu::Settings)),
            (&self.quit_label, ViewAction::Quit),
        ];
        let button_w = layout::MENU_BUTTON_WIDTH * scale;
        let button_h = layout::MENU_BUTTON_HEIGHT * scale;
        let gap = layout::MENU_BUTTON_GAP * scale;
        let count = entries.len() as f32;
        let x = (width - button_w) / 2.0;
        let top = (height - (button_h * count + gap * (count - 1.0))) / 2.0;

        entries
            .into_iter()
            .enumerate()
            .map(|(i, (label, action))| Button {
                rect: Rect::new(x, top + i as f32 * (button_h + gap), button_w, button_h),
                label: label.clone(),
                action,
            })
            .collect()
    }

    pub fn click(&self, x: f32, y: f32, width: f32, height: f32, scale: f32) -> Option<ViewAction> {
        let buttons = self.buttons(width, height, scale);
        Button::hit(&buttons, x, y).map(|button| button.action)
    }
}

impl View for MainMenu {
    fn refresh_translations(&mut self, l10n: &Localization) {
        self.title = l10n.t_or("main_menu.label", "Clock App").to_string();
        self.clock_label = l10n.t_or("main_menu.clock", "Clock").to_string();
        self.settings_label = l10n.t_or("main_menu.options", "Settings").to_string();
        self.quit_label = l10n.t_or("main_menu.exit", "Quit").to_string();
    }
}

/// Top bar button returning to the main menu.
fn back_button(label: &str, scale: f32) -> Button {
    let height = layout::BACK_BUTTON_HEIGHT * scale;
    let y = (layout::TOP_BAR_HEIGHT * scale - height) / 2.0;
    Button {
        rect: Rect::new(
            layout::PADDING * scale,
            y,
            layout::BACK_BUTTON_WIDTH * scale,
            height,
        ),
        label: label.to_string(),
        action: ViewAction::SwitchMenu(Menu::Main),
    }
}

/// The clock with a top bar holding the back button.
pub struct ClockScreen {
    pub clock: ClockView,
    back_label: String,
}

impl ClockScreen {
    pub fn new(clock: ClockView) -> Self {
        Self {
            clock,
            back_label: "Back".to_string(),
        }
    }

    pub fn back_button(&self, scale: f32) -> Button {
        back_button(&self.back_label, scale)
    }

    /// Region the clock canvas occupies below the top bar. The console
    /// overlays its bottom edge.
    pub fn clock_area(width: f32, height: f32, scale: f32) -> Rect {
        let top = layout::TOP_BAR_HEIGHT * scale;
        Rect::new(0.0, top, width, (height - top).max(0.0))
    }

    /// Console panel anchored to the bottom of the window.
    pub fn console_rect(visibility: Visibility, width: f32, height: f32, scale: f32) -> Option<Rect> {
        let panel_height = match visibility {
            Visibility::Closed => return None,
            Visibility::Collapsed => layout::CONSOLE_INPUT_HEIGHT * scale,
            Visibility::Expanded => (layout::CONSOLE_INPUT_HEIGHT + layout::CONSOLE_OUTPUT_HEIGHT) * scale,
        };
        let panel_height = panel_height.min(height);
        Some(Rect::new(0.0, height - panel_height, width, panel_height))
    }

    pub fn click(&self, x: f32, y: f32, scale: f32) -> Option<ViewAction> {
        let back = self.back_button(scale);
        back.rect.contains(x, y).then_some(back.action)
    }
}

impl View for ClockScreen {
    fn refresh_theme(&mut self, _theme: &Theme) {
        self.clock.request_full_redraw();
    }

    fn refresh_translations(&mut self, l10n: &Localization) {
        self.back_label = l10n.t_or("common.back", "Back").to_string();
        self.clock.refresh_translations(l10n);
    }
}

struct SettingRow {
    field: SettingField,
    label: String,
    /// Value as stored in the settings file
    raw: String,
    shown: String,
}

/// One button per setting; clicking a row steps it to the next choice.
pub struct SettingsScreen {
    title: String,
    back_label: String,
    rows: Vec<SettingRow>,
}

impl Default for SettingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsScreen {
    pub fn new() -> Self {
        let rows = SettingField::ALL
            .into_iter()
            .map(|field| SettingRow {
                field,
                label: default_label(field).to_string(),
                raw: String::new(),
                shown: String::new(),
            })
            .collect();
        Self {
            title: "Settings".to_string(),
            back_label: "Back".to_string(),
            rows,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Take the current values from a freshly loaded settings snapshot.
    pub fn sync(&mut self, config: &ClockConfig, l10n: &Localization) {
        for row in &mut self.rows {
            row.raw = row.field.current(config);
        }
        self.refresh_values(l10n);
    }

    fn refresh_values(&mut self, l10n: &Localization) {
        for row in &mut self.rows {
            row.shown = l10n.t_or(&format!("ini.val.{}", row.raw), &row.raw).to_string();
        }
    }

    pub fn back_button(&self, scale: f32) -> Button {
        back_button(&self.back_label, scale)
    }

    /// Vertical center of the title, below the top bar.
    pub fn title_y(scale: f32) -> f32 {
        (layout::TOP_BAR_HEIGHT + layout::SETTINGS_TITLE_HEIGHT / 2.0) * scale
    }

    pub fn rows(&self, width: f32, scale: f32) -> Vec<Button> {
        let row_w = (layout::SETTINGS_ROW_WIDTH * scale).min(width);
        let row_h = layout::SETTINGS_ROW_HEIGHT * scale;
        let step = row_h + layout::SETTINGS_ROW_GAP * scale;
        let x = (width - row_w) / 2.0;
        let top = (layout::TOP_BAR_HEIGHT + layout::SETTINGS_TITLE_HEIGHT) * scale;

        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| Button {
                rect: Rect::new(x, top + i as f32 * step, row_w, row_h),
                label: format!("{}: {}", row.label, row.shown),
                action: ViewAction::CycleSetting(row.field),
            })
            .collect()
    }

    pub fn click(&self, x: f32, y: f32, width: f32, scale: f32) -> Option<ViewAction> {
        let back = self.back_button(scale);
        if back.rect.contains(x, y) {
            return Some(back.action);
        }
        let rows = self.rows(width, scale);
        Button::hit(&rows, x, y).map(|button| button.action)
    }
}

fn default_label(field: SettingField) -> &'static str {
    match field {
        SettingField::Animation => "Clock animation",
        SettingField::ClockType => "Clock type",
        SettingField::TwelveHour => "12-hour format",
        SettingField::ClockColor => "Clock color",
        SettingField::Theme => "Theme",
        SettingField::Language => "Language",
    }
}

impl View for SettingsScreen {
    fn refresh_translations(&mut self, l10n: &Localization) {
        self.title = l10n.t_or("options.title", "Settings").to_string();
        self.back_label = l10n.t_or("common.back", "Back").to_string();
        for row in &mut self.rows {
            let key = format!("ini.opt.{}", row.field.key());
            row.label = l10n.t_or(&key, default_label(row.field)).to_string();
        }
        self.refresh_values(l10n);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_main_menu_layout() {
        let menu = MainMenu::new();
        let buttons = menu.buttons(400.0, 300.0, 1.0);
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0].rect.x, 110.0);
        assert_eq!(buttons[0].rect.y, 78.0);
        assert_eq!(buttons[1].rect.y, 130.0);
        assert_eq!(buttons[2].rect.y, 182.0);

        let (cx, cy) = buttons[0].rect.center();
        assert_eq!(
            menu.click(cx, cy, 400.0, 300.0, 1.0),
            Some(ViewAction::SwitchMenu(Menu::Clock))
        );
        assert_eq!(
            menu.click(cx, 150.0, 400.0, 300.0, 1.0),
            Some(ViewAction::SwitchMenu(Menu::Settings))
        );
        assert_eq!(menu.click(cx, 200.0, 400.0, 300.0, 1.0), Some(ViewAction::Quit));
        assert_eq!(menu.click(5.0, 5.0, 400.0, 300.0, 1.0), None);
    }

    #[test]
    fn test_main_menu_translations() {
        let mut menu = MainMenu::new();
        let table = HashMap::from([("main_menu.exit".to_string(), "Quitter".to_string())]);
        menu.refresh_translations(&Localization::new("fr", table));
        let buttons = menu.buttons(400.0, 300.0, 1.0);
        assert_eq!(buttons[0].label, "Clock");
        assert_eq!(buttons[2].label, "Quitter");
    }

    #[test]
    fn test_clock_area_below_top_bar() {
        let area = ClockScreen::clock_area(300.0, 400.0, 1.0);
        assert_eq!(area, Rect::new(0.0, 40.0, 300.0, 360.0));
        let tiny = ClockScreen::clock_area(300.0, 20.0, 1.0);
        assert_eq!(tiny.height, 0.0);
    }

    #[test]
    fn test_console_rect_follows_visibility() {
        assert_eq!(ClockScreen::console_rect(Visibility::Closed, 300.0, 400.0, 1.0), None);
        assert_eq!(
            ClockScreen::console_rect(Visibility::Collapsed, 300.0, 400.0, 1.0),
            Some(Rect::new(0.0, 370.0, 300.0, 30.0))
        );
        assert_eq!(
            ClockScreen::console_rect(Visibility::Expanded, 300.0, 400.0, 2.0),
            Some(Rect::new(0.0, 60.0, 300.0, 340.0))
        );
    }

    #[test]
    fn test_settings_rows_show_current_values() {
        let mut screen = SettingsScreen::new();
        let config = ClockConfig {
            color: "Red".into(),
            ..ClockConfig::default()
        };
        screen.sync(&config, &Localization::default());
        let rows = screen.rows(400.0, 1.0);
        assert_eq!(rows.len(), SettingField::ALL.len());
        assert_eq!(rows[0].label, "Clock animation: False");
        assert_eq!(rows[3].label, "Clock color: Red");
        assert_eq!(rows[0].rect, Rect::new(60.0, 96.0, 280.0, 32.0));
        assert_eq!(rows[1].rect.y, 136.0);

        let (cx, cy) = rows[4].rect.center();
        assert_eq!(
            screen.click(cx, cy, 400.0, 1.0),
            Some(ViewAction::CycleSetting(SettingField::Theme))
        );
        assert_eq!(
            screen.click(20.0, 20.0, 400.0, 1.0),
            Some(ViewAction::SwitchMenu(Menu::Main))
        );
        assert_eq!(screen.click(5.0, 290.0, 400.0, 1.0), None);
    }

    #[test]
    fn test_settings_translations() {
        let mut screen = SettingsScreen::new();
        let table = HashMap::from([
            ("options.title".to_string(), "Options".to_string()),
            ("ini.opt.app_theme".to_string(), "Thème".to_string()),
            ("ini.val.Light".to_string(), "Clair".to_string()),
        ]);
        let l10n = Localization::new("fr", table);
        screen.refresh_translations(&l10n);
        screen.sync(&ClockConfig::default(), &l10n);
        assert_eq!(screen.title(), "Options");
        let rows = screen.rows(400.0, 1.0);
        assert_eq!(rows[4].label, "Thème: Clair");
        assert_eq!(rows[5].label, "Language: English");
    }
}
