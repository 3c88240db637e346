//! Per-tick scene building: full redraws and hands-only redraws

use std::path::{Path, PathBuf};
use std::rc::Rc;

use image::RgbaImage;
use image::imageops::{self, FilterType};

use super::element::{ClockElement, ElementMap};
use super::geometry::{ElementOffset, PivotSpec};
use super::scene::{Layer, Scene, SceneItem, TextStyle};
use super::transform::{self, HandGeometry};
use crate::config::clock as consts;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("no {name} image in {}", dir.display())]
    Missing { name: &'static str, dir: PathBuf },
    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Find and decode the image for `element`, trying each known extension in order.
pub fn load_asset(dir: &Path, element: ClockElement) -> Result<RgbaImage, AssetError> {
    let name = element.asset_name();
    let path = consts::ASSET_EXTENSIONS
        .iter()
        .map(|ext| dir.join(format!("{name}.{ext}")))
        .find(|path| path.is_file())
        .ok_or_else(|| AssetError::Missing {
            name,
            dir: dir.to_path_buf(),
        })?;
    let decoded = image::open(&path).map_err(|source| AssetError::Decode {
        path: path.clone(),
        source,
    })?;
    Ok(decoded.to_rgba8())
}

/// Canvas dimensions and the clock circle derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockLayout {
    pub width: u32,
    pub height: u32,
}

impl ClockLayout {
    pub fn new(width: u32, height: u32) -> Self {
        if width <= 1 || height <= 1 {
            Self {
                width: consts::FALLBACK_CANVAS_SIZE,
                height: consts::FALLBACK_CANVAS_SIZE,
            }
        } else {
            Self { width, height }
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width as f32 / 2.0, self.height as f32 / 2.0)
    }

    pub fn radius(&self) -> f32 {
        (self.width.min(self.height) / 2).max(consts::MIN_RADIUS) as f32
    }

    /// Longest edge any face or hand bitmap may have on this canvas.
    pub fn max_raster_edge(&self) -> f32 {
        let (w, h) = (self.width as f32, self.height as f32);
        (w * w + h * h).sqrt() * consts::MAX_RASTER_FACTOR
    }

    /// Hand length for `scale`, capped by [`Self::max_raster_edge`].
    pub fn hand_length(&self, element: ClockElement, scale: f32) -> f32 {
        transform::target_length(element, self.radius(), scale).min(self.max_raster_edge())
    }

    /// Clock center shifted by an element offset.
    pub fn anchor(&self, offset: ElementOffset) -> (f32, f32) {
        let (cx, cy) = self.center();
        (cx + offset.dx as f32, cy + offset.dy as f32)
    }
}

/// Everything needed to place one element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPose {
    pub angle: f32,
    pub scale: f32,
    pub pivot: PivotSpec,
    pub offset: ElementOffset,
}

impl Default for HandPose {
    fn default() -> Self {
        Self {
            angle: 0.0,
            scale: 1.0,
            pivot: PivotSpec::Center,
            offset: ElementOffset::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawKind {
    Full,
    HandsOnly,
}

pub struct ClockRenderer {
    assets: ElementMap<Option<Rc<RgbaImage>>>,
    face_cache: Option<(u32, Rc<RgbaImage>)>,
    placeholder: Option<(String, TextStyle)>,
    scene: Scene,
    /// Images referenced by the last completed frame
    frame_images: Vec<Rc<RgbaImage>>,
}

impl ClockRenderer {
    /// Load all assets from `dir`. Missing images are logged and skipped.
    pub fn load(dir: &Path) -> Self {
        let assets = ElementMap::from_fn(|element| match load_asset(dir, element) {
            Ok(image) => Some(image),
            Err(err) => {
                log::warn!("{}", err);
                None
            }
        });
        Self::with_assets(assets)
    }

    pub fn with_assets(assets: ElementMap<Option<RgbaImage>>) -> Self {
        let assets = ElementMap::from_fn(|element| assets.get_ref(element).clone().map(Rc::new));
        Self {
            assets,
            face_cache: None,
            placeholder: None,
            scene: Scene::new(),
            frame_images: Vec::new(),
        }
    }

    pub fn has_asset(&self, element: ClockElement) -> bool {
        self.assets.get_ref(element).is_some()
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn frame_images(&self) -> &[Rc<RgbaImage>] {
        &self.frame_images
    }

    /// Text shown instead of the analog clock when the face image is missing.
    pub fn set_placeholder(&mut self, text: impl Into<String>, style: TextStyle) {
        self.placeholder = Some((text.into(), style));
    }

    /// Geometry of a hand as it would currently be drawn, without rasterizing.
    pub fn hand_geometry(
        &self,
        element: ClockElement,
        layout: ClockLayout,
        pose: &HandPose,
    ) -> Option<HandGeometry> {
        let source = self.assets.get_ref(element).as_ref()?;
        let length = layout.hand_length(element, pose.scale);
        Some(HandGeometry::compute(source.dimensions(), length, pose.pivot, pose.angle))
    }

    pub fn redraw(&mut self, kind: RedrawKind, layout: ClockLayout, poses: &ElementMap<HandPose>) {
        match kind {
            RedrawKind::Full => self.draw_full(layout, poses),
            RedrawKind::HandsOnly => self.draw_hands_only(layout, poses),
        }
    }

    pub fn draw_full(&mut self, layout: ClockLayout, poses: &ElementMap<HandPose>) {
        self.scene.clear();
        match self.face_image(layout, poses.get_ref(ClockElement::Face).scale) {
            Some(face) => {
                let (ax, ay) = layout.anchor(poses.get_ref(ClockElement::Face).offset);
                let half = face.width() as f32 / 2.0;
                self.scene.push(SceneItem::image(
                    Layer::Face,
                    ClockElement::Face,
                    (ax - half, ay - half),
                    face,
                ));
                self.push_hands(layout, poses);
            }
            None => {
                if let Some((text, style)) = &self.placeholder {
                    self.scene
                        .push(SceneItem::text(layout.center(), text.clone(), style.clone()));
                }
            }
        }
        self.finish_frame();
    }

    pub fn draw_hands_only(&mut self, layout: ClockLayout, poses: &ElementMap<HandPose>) {
        if !self.scene.contains_element(ClockElement::Face) {
            self.draw_full(layout, poses);
            return;
        }
        self.scene.clear_layer(Layer::Hands);
        self.push_hands(layout, poses);
        self.finish_frame();
    }

    /// Replace the whole scene with one centered line of text.
    pub fn draw_text(&mut self, layout: ClockLayout, text: &str, style: &TextStyle) {
        self.scene.clear();
        self.scene
            .push(SceneItem::text(layout.center(), text, style.clone()));
        self.finish_frame();
    }

    fn push_hands(&mut self, layout: ClockLayout, poses: &ElementMap<HandPose>) {
        for element in ClockElement::HANDS {
            let Some(source) = self.assets.get_ref(element) else {
                continue;
            };
            let pose = poses.get_ref(element);
            let length = layout.hand_length(element, pose.scale);
            let Some(hand) = transform::transform_hand(source, length, pose.pivot, pose.angle) else {
                log::warn!("could not rasterize the {} hand", element);
                continue;
            };
            let position = hand.top_left(layout.anchor(pose.offset));
            self.scene.push(SceneItem::image(
                Layer::Hands,
                element,
                position,
                Rc::new(hand.image),
            ));
        }
    }

    fn face_image(&mut self, layout: ClockLayout, scale: f32) -> Option<Rc<RgbaImage>> {
        let source = self.assets.get_ref(ClockElement::Face).as_ref()?;
        let edge = (2.0 * layout.radius() * scale).min(layout.max_raster_edge());
        let size = (edge.round() as u32).max(consts::MIN_FACE_SIZE);
        if let Some((cached_size, image)) = &self.face_cache {
            if *cached_size == size {
                return Some(Rc::clone(image));
            }
        }
        let image = Rc::new(imageops::resize(&**source, size, size, FilterType::Lanczos3));
        self.face_cache = Some((size, Rc::clone(&image)));
        Some(image)
    }

    fn finish_frame(&mut self) {
        self.frame_images = self.scene.images().cloned().collect();
    }
}
