//! Retained display list for the clock canvas

use std::rc::Rc;

use image::RgbaImage;

use super::element::ClockElement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Face,
    Hands,
    Text,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    /// Font family name as configured by the user
    pub font: String,
    pub size: f32,
    /// RGB 0.0-1.0
    pub color: (f32, f32, f32),
}

#[derive(Debug, Clone)]
pub enum SceneContent {
    /// Image drawn with its top-left at the item position
    Image(Rc<RgbaImage>),
    /// Text centered on the item position
    Text { text: String, style: TextStyle },
}

#[derive(Debug, Clone)]
pub struct SceneItem {
    pub layer: Layer,
    pub element: Option<ClockElement>,
    pub x: f32,
    pub y: f32,
    pub content: SceneContent,
}

impl SceneItem {
    pub fn image(layer: Layer, element: ClockElement, position: (f32, f32), image: Rc<RgbaImage>) -> Self {
        Self {
            layer,
            element: Some(element),
            x: position.0,
            y: position.1,
            content: SceneContent::Image(image),
        }
    }

    pub fn text(position: (f32, f32), text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            layer: Layer::Text,
            element: None,
            x: position.0,
            y: position.1,
            content: SceneContent::Text {
                text: text.into(),
                style,
            },
        }
    }

    /// Bounding box of an image item as (x, y, width, height).
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        match &self.content {
            SceneContent::Image(image) => {
                Some((self.x, self.y, image.width() as f32, image.height() as f32))
            }
            SceneContent::Text { .. } => None,
        }
    }
}

/// Items in paint order; later items are on top.
#[derive(Debug, Default)]
pub struct Scene {
    items: Vec<SceneItem>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SceneItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn clear_layer(&mut self, layer: Layer) {
        self.items.retain(|item| item.layer != layer);
    }

    pub fn push(&mut self, item: SceneItem) {
        self.items.push(item);
    }

    pub fn contains_element(&self, element: ClockElement) -> bool {
        self.items.iter().any(|item| item.element == Some(element))
    }

    /// Shift every item tagged with `element`.
    pub fn move_element(&mut self, element: ClockElement, dx: f32, dy: f32) {
        for item in self.items.iter_mut().filter(|item| item.element == Some(element)) {
            item.x += dx;
            item.y += dy;
        }
    }

    /// Topmost element whose image covers the point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ClockElement> {
        self.items.iter().rev().find_map(|item| {
            let (left, top, width, height) = item.bounds()?;
            let inside = x >= left && x < left + width && y >= top && y < top + height;
            if inside { item.element } else { None }
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &Rc<RgbaImage>> {
        self.items.iter().filter_map(|item| match &item.content {
            SceneContent::Image(image) => Some(image),
            SceneContent::Text { .. } => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(size: u32) -> Rc<RgbaImage> {
        Rc::new(RgbaImage::new(size, size))
    }

    fn sample_scene() -> Scene {
        let mut scene = Scene::new();
        scene.push(SceneItem::image(Layer::Face, ClockElement::Face, (0.0, 0.0), square(100)));
        scene.push(SceneItem::image(Layer::Hands, ClockElement::Hour, (40.0, 20.0), square(20)));
        scene.push(SceneItem::image(Layer::Hands, ClockElement::Second, (45.0, 10.0), square(10)));
        scene
    }

    #[test]
    fn test_hit_test_prefers_topmost() {
        let scene = sample_scene();
        assert_eq!(scene.hit_test(47.0, 15.0), Some(ClockElement::Second));
        assert_eq!(scene.hit_test(41.0, 35.0), Some(ClockElement::Hour));
        assert_eq!(scene.hit_test(5.0, 90.0), Some(ClockElement::Face));
        assert_eq!(scene.hit_test(150.0, 150.0), None);
    }

    #[test]
    fn test_clear_layer_keeps_face() {
        let mut scene = sample_scene();
        scene.clear_layer(Layer::Hands);
        assert_eq!(scene.items().len(), 1);
        assert!(scene.contains_element(ClockElement::Face));
        assert!(!scene.contains_element(ClockElement::Hour));
    }

    #[test]
    fn test_move_element() {
        let mut scene = sample_scene();
        scene.move_element(ClockElement::Hour, 5.0, -3.0);
        let hour = &scene.items()[1];
        assert_eq!((hour.x, hour.y), (45.0, 17.0));
        let face = &scene.items()[0];
        assert_eq!((face.x, face.y), (0.0, 0.0));
    }

    #[test]
    fn test_text_items_are_not_hit() {
        let mut scene = Scene::new();
        let style = TextStyle {
            font: "Arial".into(),
            size: 12.0,
            color: (0.0, 0.0, 0.0),
        };
        scene.push(SceneItem::text((50.0, 50.0), "12:00:00", style));
        assert_eq!(scene.hit_test(50.0, 50.0), None);
        assert_eq!(scene.images().count(), 0);
    }
}
