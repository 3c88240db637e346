//! Paints the clock scene onto the GPU canvas
//!
//! Each scene bitmap is uploaded once and keyed by its allocation. A texture
//! is deleted only after a completed frame no longer references it.

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use femtovg::{Align, Baseline, Canvas, Color, FontId, ImageFlags, ImageId, Paint, Path, renderer::OpenGl};
use image::RgbaImage;
use imgref::Img;
use rgb::FromSlice;

use super::fonts::FontBook;
use crate::clock::scene::{Scene, SceneContent, TextStyle};

struct Texture {
    id: ImageId,
    /// Keeps the allocation alive so its address stays unique
    _image: Rc<RgbaImage>,
}

#[derive(Default)]
pub struct ScenePainter {
    textures: HashMap<*const RgbaImage, Texture>,
}

impl ScenePainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paint(
        &mut self,
        canvas: &mut Canvas<OpenGl>,
        font_book: &mut FontBook,
        fallback_fonts: &[FontId],
        scene: &Scene,
        frame_images: &[Rc<RgbaImage>],
        origin: (f32, f32),
    ) {
        for item in scene.items() {
            let (x, y) = (origin.0 + item.x, origin.1 + item.y);
            match &item.content {
                SceneContent::Image(image) => {
                    let Some(id) = self.texture(canvas, image) else {
                        continue;
                    };
                    let (w, h) = (image.width() as f32, image.height() as f32);
                    let mut path = Path::new();
                    path.rect(x, y, w, h);
                    canvas.fill_path(&path, &Paint::image(id, x, y, w, h, 0.0, 1.0));
                }
                SceneContent::Text { text, style } => {
                    let fonts = font_book.resolve(canvas, &style.font, fallback_fonts);
                    draw_centered_text(canvas, &fonts, x, y, text, style);
                }
            }
        }
        self.release_unused(canvas, frame_images);
    }

    fn texture(&mut self, canvas: &mut Canvas<OpenGl>, image: &Rc<RgbaImage>) -> Option<ImageId> {
        let key = Rc::as_ptr(image);
        if let Some(texture) = self.textures.get(&key) {
            return Some(texture.id);
        }
        let pixels = Img::new(
            image.as_raw().as_rgba(),
            image.width() as usize,
            image.height() as usize,
        );
        match canvas.create_image(pixels, ImageFlags::empty()) {
            Ok(id) => {
                self.textures.insert(
                    key,
                    Texture {
                        id,
                        _image: Rc::clone(image),
                    },
                );
                Some(id)
            }
            Err(err) => {
                log::warn!("cannot upload a {}x{} clock image: {:?}", image.width(), image.height(), err);
                None
            }
        }
    }

    fn release_unused(&mut self, canvas: &mut Canvas<OpenGl>, frame_images: &[Rc<RgbaImage>]) {
        let live: HashSet<*const RgbaImage> = frame_images.iter().map(Rc::as_ptr).collect();
        self.textures.retain(|key, texture| {
            let keep = live.contains(key);
            if !keep {
                canvas.delete_image(texture.id);
            }
            keep
        });
    }

    /// Drop every texture, e.g. when leaving the clock screen.
    pub fn clear(&mut self, canvas: &mut Canvas<OpenGl>) {
        for (_, texture) in self.textures.drain() {
            canvas.delete_image(texture.id);
        }
    }
}

fn draw_centered_text(
    canvas: &mut Canvas<OpenGl>,
    fonts: &[FontId],
    x: f32,
    y: f32,
    text: &str,
    style: &TextStyle,
) {
    let (r, g, b) = style.color;
    let mut paint = Paint::color(Color::rgbf(r, g, b));
    paint.set_font(fonts);
    paint.set_font_size(style.size);
    paint.set_text_align(Align::Center);
    paint.set_text_baseline(Baseline::Middle);
    if let Err(err) = canvas.fill_text(x, y, text, &paint) {
        log::debug!("cannot draw clock text: {:?}", err);
    }
}
