//! Buttons, titles and the clock screen's top bar

use femtovg::{Align, Baseline, Canvas, Color, FontId, Paint, Path, renderer::OpenGl};

use crate::config::{layout, rendering};
use crate::theme::Theme;
use crate::ui::Button;

fn rgb(color: (f32, f32, f32)) -> Color {
    Color::rgbf(color.0, color.1, color.2)
}

pub struct MenuRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
    scale: f32,
}

impl<'a> MenuRenderer<'a> {
    pub fn new(canvas: &'a mut Canvas<OpenGl>, fonts: &'a [FontId], theme: &'a Theme, scale: f32) -> Self {
        Self {
            canvas,
            fonts,
            theme,
            scale,
        }
    }

    pub fn draw_title(&mut self, text: &str, x: f32, y: f32) {
        let mut paint = Paint::color(rgb(self.theme.fg));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::UI_FONT_SIZE * 2.0 * self.scale);
        paint.set_text_align(Align::Center);
        paint.set_text_baseline(Baseline::Middle);
        let _ = self.canvas.fill_text(x, y, text, &paint);
    }

    pub fn draw_button(&mut self, button: &Button, hovered: bool) {
        let rect = button.rect;
        let radius = 6.0 * self.scale;

        let fill = if hovered {
            self.theme.button_hover
        } else {
            self.theme.button_bg
        };
        let mut bg = Path::new();
        bg.rounded_rect(rect.x, rect.y, rect.width, rect.height, radius);
        self.canvas.fill_path(&bg, &Paint::color(rgb(fill)));
        self.canvas
            .stroke_path(&bg, &Paint::color(rgb(self.theme.border)).with_line_width(1.0));

        let mut paint = Paint::color(rgb(self.theme.button_fg));
        paint.set_font(self.fonts);
        paint.set_font_size(rendering::UI_FONT_SIZE * self.scale);
        paint.set_text_align(Align::Center);
        paint.set_text_baseline(Baseline::Middle);
        let (cx, cy) = rect.center();
        let _ = self.canvas.fill_text(cx, cy, &button.label, &paint);
    }

    /// Background strip behind the back button.
    pub fn draw_top_bar(&mut self, width: f32) {
        let height = layout::TOP_BAR_HEIGHT * self.scale;
        let mut bar = Path::new();
        bar.rect(0.0, 0.0, width, height);
        self.canvas.fill_path(&bar, &Paint::color(rgb(self.theme.console_bg)));

        let mut line = Path::new();
        line.rect(0.0, height - 1.0, width, 1.0);
        self.canvas.fill_path(&line, &Paint::color(rgb(self.theme.border)));
    }
}
