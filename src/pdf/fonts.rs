//! Korean font discovery and loading
//!
//! The worksheet needs one TrueType face that covers Hangul. It is looked up
//! in a fixed priority list: the bundled file next to the application first,
//! then well-known operating-system install locations.

use crate::error::{Error, Result};
use crate::pdf::layout::{TextMeasure, PT_TO_MM};
use fontdue::{Font, FontSettings};
use parking_lot::Mutex;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// File name of the font shipped alongside the server
pub const BUNDLED_FONT_FILE: &str = "NanumGothic.ttf";

/// Syllables checked to decide whether a face can print Korean terms
const HANGUL_SAMPLE: &str = "가나다사과한글";

/// OS font locations tried after the bundled file
const SYSTEM_FONT_PATHS: &[&str] = &[
    // Windows
    "C:\\Windows\\Fonts\\NanumGothic.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
    // Linux (fonts-nanum package)
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/nanum/NanumGothic.ttf",
    // macOS
    "/Library/Fonts/NanumGothic.ttf",
    "/System/Library/Fonts/Supplemental/AppleGothic.ttf",
];

/// Default search order: working directory, executable directory, OS paths
pub fn default_font_search_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(BUNDLED_FONT_FILE)];

    if let Some(dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        paths.push(dir.join(BUNDLED_FONT_FILE));
    }

    paths.extend(SYSTEM_FONT_PATHS.iter().map(PathBuf::from));
    paths
}

/// Result of the read-only font diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FontStatus {
    /// Whether any candidate path resolved
    pub found: bool,
    /// The resolved path, if any
    pub path: Option<String>,
    /// Whether the resolved path exists right now
    pub exists: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Ordered list of candidate font paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontLocator {
    search_paths: Vec<PathBuf>,
}

impl Default for FontLocator {
    fn default() -> Self {
        Self::new(default_font_search_paths())
    }
}

impl FontLocator {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// First candidate that exists on disk
    pub fn resolve(&self) -> Result<PathBuf> {
        self.search_paths
            .iter()
            .find(|path| path.is_file())
            .cloned()
            .ok_or_else(|| Error::FontNotFound {
                searched: self.search_paths.clone(),
            })
    }

    /// Report whether the font is currently locatable without failing
    pub fn status(&self) -> FontStatus {
        match self.resolve() {
            Ok(path) => FontStatus {
                found: true,
                exists: path.exists(),
                path: Some(path.display().to_string()),
                error: None,
            },
            Err(e) => FontStatus {
                found: false,
                path: None,
                exists: false,
                error: Some(e.to_string()),
            },
        }
    }

    /// Resolve, read and parse the font
    pub fn load(&self) -> Result<LoadedFont> {
        LoadedFont::read(self.resolve()?)
    }
}

/// A [`FontLocator`] that keeps the last parsed face.
///
/// The path is resolved again on every call so that installing or removing
/// a font takes effect without a restart; the face is only re-read when the
/// resolved path changes.
pub struct FontCache {
    locator: FontLocator,
    loaded: Mutex<Option<Arc<LoadedFont>>>,
}

impl FontCache {
    pub fn new(locator: FontLocator) -> Self {
        Self {
            locator,
            loaded: Mutex::new(None),
        }
    }

    pub fn status(&self) -> FontStatus {
        self.locator.status()
    }

    pub fn load(&self) -> Result<Arc<LoadedFont>> {
        let path = self.locator.resolve()?;

        if let Some(font) = self.loaded.lock().as_ref() {
            if font.path() == path.as_path() {
                return Ok(Arc::clone(font));
            }
        }

        // Parse outside the lock; a concurrent miss costs one extra parse
        let font = Arc::new(LoadedFont::read(path)?);
        *self.loaded.lock() = Some(Arc::clone(&font));
        Ok(font)
    }
}

/// A parsed font face plus the raw bytes printpdf embeds
pub struct LoadedFont {
    path: PathBuf,
    data: Vec<u8>,
    face: Font,
}

impl LoadedFont {
    pub fn from_bytes(path: PathBuf, data: Vec<u8>) -> Result<Self> {
        let face = Font::from_bytes(data.as_slice(), FontSettings::default()).map_err(|reason| {
            Error::InvalidFont {
                path: path.display().to_string(),
                reason: reason.to_string(),
            }
        })?;
        Ok(Self { path, data, face })
    }

    /// Read and parse the font file at `path`
    pub fn read(path: PathBuf) -> Result<Self> {
        let data = std::fs::read(&path)?;
        let font = Self::from_bytes(path, data)?;

        if font.covers_hangul() {
            tracing::info!(path = %font.path.display(), "using Korean font");
        } else {
            tracing::warn!(
                path = %font.path.display(),
                "font has no Hangul glyphs; Korean terms will print as blanks"
            );
        }
        Ok(font)
    }

    /// Whether every non-whitespace character of `text` has a glyph
    pub fn covers(&self, text: &str) -> bool {
        text.chars()
            .filter(|ch| !ch.is_whitespace())
            .all(|ch| self.face.lookup_glyph_index(ch) != 0)
    }

    pub fn covers_hangul(&self) -> bool {
        self.covers(HANGUL_SAMPLE)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}

impl TextMeasure for LoadedFont {
    fn text_width_mm(&self, text: &str, size_pt: f32) -> f32 {
        // Rasterizing at `size_pt` pixels gives advances in points
        let width_pt: f32 = text
            .chars()
            .map(|ch| self.face.metrics(ch, size_pt).advance_width)
            .sum();
        width_pt * PT_TO_MM
    }
}
