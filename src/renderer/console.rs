//! Console overlay rendering

use femtovg::{Canvas, Color, FontId, Paint, Path, renderer::OpenGl};

use crate::config::{layout, rendering};
use crate::console::{Console, LineKind, Visibility};
use crate::theme::Theme;
use crate::ui::Rect;

pub struct ConsoleRenderer<'a> {
    canvas: &'a mut Canvas<OpenGl>,
    fonts: &'a [FontId],
    theme: &'a Theme,
    scale: f32,
}

impl<'a> ConsoleRenderer<'a> {
    pub fn new(canvas: &'a mut Canvas<OpenGl>, fonts: &'a [FontId], theme: &'a Theme, scale: f32) -> Self {
        Self {
            canvas,
            fonts,
            theme,
            scale,
        }
    }

    pub fn draw(&mut self, console: &Console, panel: Rect, cursor_visible: bool) {
        let scale = self.scale;
        let theme = self.theme;

        let mut bg = Path::new();
        bg.rect(panel.x, panel.y, panel.width, panel.height);
        self.canvas.fill_path(
            &bg,
            &Paint::color(Color::rgbaf(theme.console_bg.0, theme.console_bg.1, theme.console_bg.2, 0.95)),
        );
        let mut border = Path::new();
        border.rect(panel.x, panel.y, panel.width, 1.0);
        self.canvas.fill_path(
            &border,
            &Paint::color(Color::rgbf(theme.border.0, theme.border.1, theme.border.2)),
        );

        let font_size = rendering::CONSOLE_FONT_SIZE * scale;
        let padding = layout::PADDING * 0.5 * scale;
        let input_height = layout::CONSOLE_INPUT_HEIGHT * scale;
        let input_top = panel.y + panel.height - input_height;

        if console.visibility() == Visibility::Expanded {
            self.draw_output(console, panel, input_top, padding, font_size);
        }

        let mut text_paint = Paint::color(Color::rgbf(theme.fg.0, theme.fg.1, theme.fg.2));
        text_paint.set_font(self.fonts);
        text_paint.set_font_size(font_size);
        let char_width = self.measure_char_width(&text_paint);

        let prompt = "> ";
        let text_x = panel.x + padding;
        let text_y = input_top + input_height / 2.0 + font_size * 0.35;
        let input_x = text_x + prompt.len() as f32 * char_width;

        let _ = self.canvas.fill_text(text_x, text_y, prompt, &text_paint);

        self.canvas.save();
        self.canvas
            .intersect_scissor(input_x, input_top, (panel.width - input_x - padding).max(0.0), input_height);
        let scroll = console.input.scroll_offset;
        let _ = self
            .canvas
            .fill_text(input_x - scroll, text_y, console.input.text(), &text_paint);

        if cursor_visible {
            let cursor_x = input_x - scroll + console.input.cursor_column() as f32 * char_width;
            let mut cursor = Path::new();
            cursor.rect(cursor_x, input_top + 6.0 * scale, 2.0, input_height - 12.0 * scale);
            self.canvas.fill_path(
                &cursor,
                &Paint::color(Color::rgbf(theme.cursor.0, theme.cursor.1, theme.cursor.2)),
            );
        }
        self.canvas.restore();
    }

    fn draw_output(&mut self, console: &Console, panel: Rect, input_top: f32, padding: f32, font_size: f32) {
        let theme = self.theme;
        let line_height = layout::CONSOLE_LINE_HEIGHT * self.scale;
        let area_top = panel.y + padding;
        let visible = ((input_top - area_top) / line_height).floor().max(0.0) as usize;

        // Newest lines sit just above the input
        let lines = console.output();
        let start = lines.len().saturating_sub(visible);
        for (row, line) in lines[start..].iter().enumerate() {
            let color = match line.kind {
                LineKind::Input => theme.fg,
                LineKind::Output => theme.fg_muted,
                LineKind::Error => theme.error,
            };
            let mut paint = Paint::color(Color::rgbf(color.0, color.1, color.2));
            paint.set_font(self.fonts);
            paint.set_font_size(font_size);
            let y = area_top + (row as f32 + 0.75) * line_height;
            let _ = self.canvas.fill_text(panel.x + padding, y, &line.text, &paint);
        }
    }

    fn measure_char_width(&self, paint: &Paint) -> f32 {
        if let Ok(metrics) = self.canvas.measure_text(0.0, 0.0, "M", paint) {
            metrics.width()
        } else {
            rendering::FALLBACK_CHAR_WIDTH * self.scale
        }
    }
}
