//! Font loading and discovery

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use femtovg::{Canvas, FontId, renderer::OpenGl};

const FONT_ROOTS: [&str; 3] = ["/usr/share/fonts", "/usr/local/share/fonts", "/Library/Fonts"];

/// Load the UI font with fallbacks for extended coverage
pub fn load_fonts(canvas: &mut Canvas<OpenGl>) -> Vec<FontId> {
    let mut fonts = Vec::new();

    let primary_paths = [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/ubuntu/Ubuntu-R.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    ];

    for path in &primary_paths {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
            break;
        }
    }

    // Arabic and Cyrillic translations need wider coverage than most UI fonts
    let fallback_paths = [
        "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
        "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    ];

    for path in &fallback_paths {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
        }
    }

    if fonts.is_empty() {
        let roots: Vec<&Path> = FONT_ROOTS.iter().map(Path::new).collect();
        if let Some(path) = first_font_file(&roots) {
            match canvas.add_font(&path) {
                Ok(font) => fonts.push(font),
                Err(err) => log::warn!("cannot load {}: {:?}", path.display(), err),
            }
        }
    }

    if fonts.is_empty() {
        log::error!("no usable font found; install dejavu-fonts or liberation-fonts");
    }

    fonts
}

/// Fonts requested by name from the settings file, loaded on first use.
#[derive(Default)]
pub struct FontBook {
    by_name: HashMap<String, Option<FontId>>,
}

impl FontBook {
    /// The named font followed by the UI fallbacks.
    pub fn resolve(&mut self, canvas: &mut Canvas<OpenGl>, name: &str, fallback: &[FontId]) -> Vec<FontId> {
        let key = normalize(name);
        let found = *self.by_name.entry(key).or_insert_with(|| {
            let roots: Vec<&Path> = FONT_ROOTS.iter().map(Path::new).collect();
            let path = find_font_file(&roots, name)?;
            match canvas.add_font(&path) {
                Ok(id) => {
                    log::debug!("loaded font '{}' from {}", name, path.display());
                    Some(id)
                }
                Err(err) => {
                    log::warn!("cannot load font {}: {:?}", path.display(), err);
                    None
                }
            }
        });

        let mut fonts = Vec::with_capacity(fallback.len() + 1);
        fonts.extend(found);
        fonts.extend_from_slice(fallback);
        fonts
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_font_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ttf") || ext.eq_ignore_ascii_case("otf"))
}

fn font_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            font_files(&path, out);
        } else if is_font_file(&path) {
            out.push(path);
        }
    }
}

/// Find a font file whose name matches `name`, ignoring case and spacing.
///
/// An exact stem match wins, then a "-Regular" style match, then any file
/// whose stem starts with the name.
pub fn find_font_file(roots: &[&Path], name: &str) -> Option<PathBuf> {
    let wanted = normalize(name);
    if wanted.is_empty() {
        return None;
    }
    let mut files = Vec::new();
    for root in roots {
        font_files(root, &mut files);
    }
    files.sort();

    let stem = |path: &PathBuf| {
        path.file_stem()
            .and_then(|s| s.to_str())
            .map(normalize)
            .unwrap_or_default()
    };
    let regular = format!("{wanted}regular");

    files
        .iter()
        .find(|path| stem(path) == wanted)
        .or_else(|| files.iter().find(|path| stem(path) == regular))
        .or_else(|| files.iter().find(|path| stem(path).starts_with(&wanted)))
        .cloned()
}

fn first_font_file(roots: &[&Path]) -> Option<PathBuf> {
    let mut files = Vec::new();
    for root in roots {
        font_files(root, &mut files);
    }
    files.sort();
    files.into_iter().next()
}
