//! Application state and coordination

mod action;
mod keybindings;
mod mouse;
mod state;

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use crate::clock::angles::wall_time;
use crate::clock::geometry::GeometryStore;
use crate::clock::render::ClockRenderer;
use crate::clock::{ClockView, ConfigChange};
use crate::config::timing;
use crate::console::Console;
use crate::i18n::Localization;
use crate::persistence;
use crate::renderer::Renderer;
use crate::settings::{self, ClockConfig};
use crate::theme::Theme;
use crate::view::{ClockScreen, MainMenu, Menu, SettingsScreen, View, ViewAction};
use crate::worker::{Mailbox, WorkerMessage};

pub use action::Action;
pub use keybindings::{resolve, Key, KeyEvent, Modifiers};
pub use state::AppResult;
use state::UiState;

pub struct App {
    renderer: Renderer,
    menu: Menu,
    main_menu: MainMenu,
    clock_screen: ClockScreen,
    settings_screen: SettingsScreen,
    console: Console,
    l10n: Localization,
    mailbox: Mailbox,
    theme: Theme,
    settings_path: PathBuf,
    settings_mtime: Option<SystemTime>,
    lang_dir: PathBuf,
    width: f32,
    height: f32,
    scale: f32,
    state: UiState,
    quit_requested: bool,
}

impl App {
    pub fn new(gl_renderer: femtovg::renderer::OpenGl, width: f32, height: f32, scale: f32) -> Self {
        if let Err(err) = persistence::ensure_data_dir() {
            log::warn!("cannot create data directory: {}", err);
        }
        let settings_path = persistence::settings_path();
        let config = ClockConfig::load(&settings_path);
        let settings_mtime = persistence::modified_time(&settings_path);

        let assets = persistence::assets_dir();
        let lang_dir = persistence::lang_dir(&assets);
        let geometry = GeometryStore::load(persistence::geometry_path(&settings_path));
        let language = config.language.clone();
        let theme = Theme::for_kind(config.theme);

        let clock = ClockView::new(config, geometry, ClockRenderer::load(&assets));
        let renderer = Renderer::new(gl_renderer, width, height, scale, theme.clone());

        let mailbox = Mailbox::new();
        mailbox.spawn_language_load(lang_dir.clone(), language);

        let mut app = Self {
            renderer,
            menu: Menu::Main,
            main_menu: MainMenu::new(),
            clock_screen: ClockScreen::new(clock),
            settings_screen: SettingsScreen::new(),
            console: Console::new(),
            l10n: Localization::default(),
            mailbox,
            theme,
            settings_path,
            settings_mtime,
            lang_dir,
            width,
            height,
            scale,
            state: UiState::new(),
            quit_requested: false,
        };
        app.sync_clock_canvas();
        app
    }

    // =========================================================================
    // Core lifecycle
    // =========================================================================

    pub fn tick(&mut self) -> AppResult {
        let mut needs_redraw = false;

        for message in self.mailbox.drain() {
            match message {
                WorkerMessage::TranslationsLoaded(l10n) => {
                    log::debug!("translations for '{}' loaded", l10n.code());
                    self.set_localization(l10n);
                    needs_redraw = true;
                }
            }
        }

        if self.menu == Menu::Settings && self.settings_changed_on_disk() {
            self.reload_settings();
            self.sync_settings_screen();
            needs_redraw = true;
        }

        if self.menu == Menu::Clock {
            if self.settings_changed_on_disk() {
                needs_redraw |= self.reload_settings();
            }
            needs_redraw |= self.update_clock();

            if self.console.is_open()
                && self.state.last_cursor_blink.elapsed() >= Duration::from_millis(timing::CURSOR_BLINK_MS)
            {
                self.state.cursor_visible = !self.state.cursor_visible;
                self.state.last_cursor_blink = std::time::Instant::now();
                needs_redraw = true;
            }
        }

        AppResult::from_changed(needs_redraw)
    }

    /// Next moment the loop must wake up without input.
    pub fn next_wakeup(&self) -> std::time::Instant {
        let now = std::time::Instant::now();
        if self.menu != Menu::Clock {
            return now + Duration::from_millis(timing::TICK_MS);
        }
        if self.console.is_open() {
            let blink = Duration::from_millis(timing::CURSOR_BLINK_MS);
            let remaining = blink.saturating_sub(self.state.last_cursor_blink.elapsed());
            return now + remaining.min(until_next_second());
        }
        now + until_next_second()
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
        self.renderer.resize(width, height, scale);
        self.sync_clock_canvas();
    }

    pub fn render(&mut self) {
        match self.menu {
            Menu::Main => self.renderer.render_main_menu(&self.main_menu, self.state.hovered),
            Menu::Settings => self
                .renderer
                .render_settings(&self.settings_screen, self.state.hovered),
            Menu::Clock => {
                self.update_clock();
                self.renderer.render_clock(
                    &self.clock_screen,
                    &self.console,
                    self.state.cursor_visible,
                    self.state.hovered,
                );
            }
        }
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    // =========================================================================
    // Views
    // =========================================================================

    pub(crate) fn apply_view_action(&mut self, action: ViewAction) -> AppResult {
        match action {
            ViewAction::SwitchMenu(menu) => self.switch_menu(menu),
            ViewAction::CycleSetting(field) => {
                let value = field.next_value(self.clock_screen.clock.config());
                if let Err(err) = settings::write_setting(&self.settings_path, field, value) {
                    log::warn!("cannot save {}: {}", field.key(), err);
                    return AppResult::Ok;
                }
                self.reload_settings();
                self.sync_settings_screen();
                AppResult::Redraw
            }
            ViewAction::Quit => {
                log::info!("quit requested");
                self.quit_requested = true;
                AppResult::Ok
            }
        }
    }

    fn switch_menu(&mut self, menu: Menu) -> AppResult {
        if menu == self.menu {
            return AppResult::Ok;
        }
        let previous = std::mem::replace(&mut self.menu, menu);
        self.state.hovered = None;
        if previous == Menu::Clock {
            if self.clock_screen.clock.pointer_up() {
                log::debug!("drag ended by leaving the clock screen");
            }
            self.renderer.release_clock_textures();
        }
        match menu {
            Menu::Clock => {
                self.reload_settings();
                self.clock_screen.clock.request_full_redraw();
                self.sync_clock_canvas();
            }
            Menu::Settings => {
                self.reload_settings();
                self.sync_settings_screen();
            }
            Menu::Main => {}
        }
        AppResult::Redraw
    }

    fn set_localization(&mut self, l10n: Localization) {
        self.l10n = l10n;
        self.main_menu.refresh_translations(&self.l10n);
        self.clock_screen.refresh_translations(&self.l10n);
        self.settings_screen.refresh_translations(&self.l10n);
    }

    fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.renderer.set_theme(self.theme.clone());
        self.main_menu.refresh_theme(&self.theme);
        self.clock_screen.refresh_theme(&self.theme);
        self.settings_screen.refresh_theme(&self.theme);
    }

    fn sync_settings_screen(&mut self) {
        self.settings_screen
            .sync(self.clock_screen.clock.config(), &self.l10n);
    }

    // =========================================================================
    // Clock
    // =========================================================================

    fn sync_clock_canvas(&mut self) {
        let area = ClockScreen::clock_area(self.width, self.height, self.scale);
        let clock = &mut self.clock_screen.clock;
        clock.set_text_scale(self.scale);
        clock.resize_canvas(area.width as u32, area.height as u32);
    }

    fn update_clock(&mut self) -> bool {
        let now = wall_time(self.clock_screen.clock.config().timezone);
        self.clock_screen.clock.update(now)
    }

    fn settings_changed_on_disk(&self) -> bool {
        persistence::modified_time(&self.settings_path) != self.settings_mtime
    }

    /// Re-read the settings file and push the snapshot through every view.
    fn reload_settings(&mut self) -> bool {
        let config = ClockConfig::load(&self.settings_path);
        self.settings_mtime = persistence::modified_time(&self.settings_path);

        let current = self.clock_screen.clock.config();
        let language_changed = config.language != current.language;
        let theme_changed = config.theme != self.theme.kind;

        if language_changed {
            self.mailbox
                .spawn_language_load(self.lang_dir.clone(), config.language.clone());
        }
        if theme_changed {
            self.set_theme(Theme::for_kind(config.theme));
        }

        let change = self.clock_screen.clock.apply_config(config);
        if change != ConfigChange::Unchanged {
            log::info!("settings reloaded: {:?}", change);
        }
        change != ConfigChange::Unchanged || theme_changed
    }
}

fn until_next_second() -> Duration {
    let since_epoch = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    Duration::from_secs(1).saturating_sub(Duration::from_nanos(u64::from(since_epoch.subsec_nanos())))
}
