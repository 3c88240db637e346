//! GPU-accelerated rendering with femtovg

mod console;
mod fonts;
mod menu;
mod scene;

use femtovg::{Canvas, Color, FontId, Paint, renderer::OpenGl};

use crate::config::rendering;
use crate::console::Console;
use crate::theme::Theme;
use crate::ui::Rect;
use crate::view::{ClockScreen, MainMenu, SettingsScreen, ViewAction};

use console::ConsoleRenderer;
use fonts::FontBook;
use menu::MenuRenderer;
use scene::ScenePainter;

pub struct Renderer {
    canvas: Canvas<OpenGl>,
    fonts: Vec<FontId>,
    font_book: FontBook,
    painter: ScenePainter,
    theme: Theme,
    width: f32,
    height: f32,
    scale: f32,
}

impl Renderer {
    pub fn new(renderer: OpenGl, width: f32, height: f32, scale: f32, theme: Theme) -> Self {
        let mut canvas = Canvas::new(renderer).expect("Failed to create canvas");
        let fonts = fonts::load_fonts(&mut canvas);

        Self {
            canvas,
            fonts,
            font_book: FontBook::default(),
            painter: ScenePainter::new(),
            theme,
            width,
            height,
            scale,
        }
    }

    pub fn resize(&mut self, width: f32, height: f32, scale: f32) {
        self.width = width;
        self.height = height;
        self.scale = scale;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    fn begin_frame(&mut self) {
        let (width, height) = (self.width, self.height);

        // Use DPI=1.0; sizes are already in physical pixels
        self.canvas.set_size(width as u32, height as u32, 1.0);
        self.canvas.clear_rect(
            0,
            0,
            width as u32,
            height as u32,
            Color::rgbf(self.theme.bg.0, self.theme.bg.1, self.theme.bg.2),
        );
    }

    pub fn render_main_menu(&mut self, menu: &MainMenu, hovered: Option<ViewAction>) {
        self.begin_frame();
        let buttons = menu.buttons(self.width, self.height, self.scale);
        let title_y = buttons
            .first()
            .map_or(self.height / 3.0, |button| button.rect.y - 40.0 * self.scale);

        let mut menu_renderer = MenuRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
        menu_renderer.draw_title(menu.title(), self.width / 2.0, title_y);
        for button in &buttons {
            menu_renderer.draw_button(button, hovered == Some(button.action));
        }
        self.canvas.flush();
    }

    pub fn render_settings(&mut self, screen: &SettingsScreen, hovered: Option<ViewAction>) {
        self.begin_frame();
        let mut menu_renderer = MenuRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
        menu_renderer.draw_top_bar(self.width);
        let back = screen.back_button(self.scale);
        menu_renderer.draw_button(&back, hovered == Some(back.action));
        menu_renderer.draw_title(screen.title(), self.width / 2.0, SettingsScreen::title_y(self.scale));
        for row in screen.rows(self.width, self.scale) {
            menu_renderer.draw_button(&row, hovered == Some(row.action));
        }
        self.canvas.flush();
    }

    pub fn render_clock(
        &mut self,
        screen: &ClockScreen,
        console: &Console,
        cursor_visible: bool,
        hovered: Option<ViewAction>,
    ) {
        self.begin_frame();
        let area = ClockScreen::clock_area(self.width, self.height, self.scale);

        self.canvas.save();
        self.canvas.intersect_scissor(area.x, area.y, area.width, area.height);
        let renderer = screen.clock.renderer();
        self.painter.paint(
            &mut self.canvas,
            &mut self.font_book,
            &self.fonts,
            renderer.scene(),
            renderer.frame_images(),
            (area.x, area.y),
        );
        self.canvas.restore();

        {
            let mut menu_renderer = MenuRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
            menu_renderer.draw_top_bar(self.width);
            let back = screen.back_button(self.scale);
            menu_renderer.draw_button(&back, hovered == Some(back.action));
        }

        if let Some(panel) = Self::console_panel(console, self.width, self.height, self.scale) {
            let mut console_renderer = ConsoleRenderer::new(&mut self.canvas, &self.fonts, &self.theme, self.scale);
            console_renderer.draw(console, panel, cursor_visible);
        }

        self.canvas.flush();
    }

    fn console_panel(console: &Console, width: f32, height: f32, scale: f32) -> Option<Rect> {
        ClockScreen::console_rect(console.visibility(), width, height, scale)
    }

    /// Release clock textures while another screen is shown.
    pub fn release_clock_textures(&mut self) {
        self.painter.clear(&mut self.canvas);
    }

    pub fn console_char_width(&self) -> f32 {
        let mut text_paint = Paint::color(Color::rgb(255, 255, 255));
        text_paint.set_font(&self.fonts);
        text_paint.set_font_size(rendering::CONSOLE_FONT_SIZE * self.scale);
        if let Ok(metrics) = self.canvas.measure_text(0.0, 0.0, "M", &text_paint) {
            metrics.width()
        } else {
            rendering::FALLBACK_CHAR_WIDTH * self.scale
        }
    }
}
