//! Mouse event handling

use super::state::AppResult;
use super::App;
use crate::ui::Button;
use crate::view::{ClockScreen, Menu};

impl App {
    pub fn handle_mouse_move(&mut self, x: f32, y: f32) -> AppResult {
        let mut redraw = false;
        if self.menu == Menu::Clock && self.clock_screen.clock.is_dragging() {
            let area = ClockScreen::clock_area(self.width, self.height, self.scale);
            redraw |= self.clock_screen.clock.pointer_move(x - area.x, y - area.y);
        }

        let hovered = match self.menu {
            Menu::Main => {
                let buttons = self.main_menu.buttons(self.width, self.height, self.scale);
                Button::hit(&buttons, x, y).map(|button| button.action)
            }
            Menu::Clock => self.clock_screen.click(x, y, self.scale),
            Menu::Settings => self.settings_screen.click(x, y, self.width, self.scale),
        };
        if hovered != self.state.hovered {
            self.state.hovered = hovered;
            redraw = true;
        }

        AppResult::from_changed(redraw)
    }

    pub fn mouse_down(&mut self, x: f32, y: f32) -> AppResult {
        match self.menu {
            Menu::Main => match self.main_menu.click(x, y, self.width, self.height, self.scale) {
                Some(action) => self.apply_view_action(action),
                None => AppResult::Ok,
            },
            Menu::Settings => match self.settings_screen.click(x, y, self.width, self.scale) {
                Some(action) => self.apply_view_action(action),
                None => AppResult::Ok,
            },
            Menu::Clock => {
                if let Some(action) = self.clock_screen.click(x, y, self.scale) {
                    return self.apply_view_action(action);
                }
                let over_console = ClockScreen::console_rect(
                    self.console.visibility(),
                    self.width,
                    self.height,
                    self.scale,
                )
                .is_some_and(|panel| panel.contains(x, y));
                let area = ClockScreen::clock_area(self.width, self.height, self.scale);
                if over_console || !area.contains(x, y) {
                    return AppResult::Ok;
                }
                AppResult::from_changed(self.clock_screen.clock.pointer_down(x - area.x, y - area.y))
            }
        }
    }

    pub fn mouse_up(&mut self) -> AppResult {
        AppResult::from_changed(self.clock_screen.clock.pointer_up())
    }
}
