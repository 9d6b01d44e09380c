//! TrueType font discovery for chart text
//!
//! plotters renders text through ab_glyph, which only knows fonts that were
//! registered explicitly. The first successful registration wins for the
//! lifetime of the process.

use crate::error::{AppError, ErrorContext, Result};
use plotters::style::{register_font, FontStyle};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Family name every chart element asks for
pub const FONT_FAMILY: &str = "sans-serif";

/// Well-known (regular, bold) font locations per platform
const CANDIDATES: &[(&str, &str)] = &[
    ("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf"),
    ("/usr/share/fonts/TTF/DejaVuSans.ttf", "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf"),
    ("/usr/share/fonts/dejavu/DejaVuSans.ttf", "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf"),
    ("/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf", "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf"),
    ("/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf", "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf"),
    ("/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf", "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf"),
    ("/usr/share/fonts/noto/NotoSans-Regular.ttf", "/usr/share/fonts/noto/NotoSans-Bold.ttf"),
    ("/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf", "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf"),
    ("/System/Library/Fonts/Supplemental/Arial.ttf", "/System/Library/Fonts/Supplemental/Arial Bold.ttf"),
    ("/Library/Fonts/Arial.ttf", "/Library/Fonts/Arial Bold.ttf"),
    ("C:\\Windows\\Fonts\\arial.ttf", "C:\\Windows\\Fonts\\arialbd.ttf"),
];

/// Directories scanned when no well-known font exists
const SEARCH_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts", "/Library/Fonts"];

const MAX_SEARCH_DEPTH: usize = 4;

static REGISTERED: Mutex<Option<PathBuf>> = Mutex::new(None);

/// Register a font for [`FONT_FAMILY`], preferring `preferred` when given.
/// Returns the regular font file in use.
pub fn ensure_font_registered(preferred: Option<&Path>) -> Result<PathBuf> {
    let mut registered = REGISTERED
        .lock()
        .map_err(|_| AppError::internal("Font registry lock poisoned"))?;

    if let Some(path) = registered.as_ref() {
        return Ok(path.clone());
    }

    let (regular, bold) = match preferred {
        Some(path) => {
            if !path.is_file() {
                return Err(AppError::render(format!("Font file not found: {}", path.display())));
            }
            (path.to_path_buf(), None)
        }
        None => discover_font().ok_or_else(|| {
            AppError::render("No TrueType font found on this system; pass one with --font or CHART_FONT")
        })?,
    };

    let regular_bytes = leak_font(&regular)?;
    let bold_bytes = match bold {
        Some(path) => leak_font(&path)?,
        None => regular_bytes,
    };

    register(FontStyle::Normal, regular_bytes, &regular)?;
    register(FontStyle::Bold, bold_bytes, &regular)?;

    *registered = Some(regular.clone());
    Ok(regular)
}

/// First usable (regular, bold) pair on this host
pub fn discover_font() -> Option<(PathBuf, Option<PathBuf>)> {
    for (regular, bold) in CANDIDATES {
        let regular = Path::new(regular);
        if regular.is_file() {
            let bold = Path::new(bold);
            return Some((regular.to_path_buf(), bold.is_file().then(|| bold.to_path_buf())));
        }
    }

    SEARCH_DIRS
        .iter()
        .find_map(|dir| find_ttf(Path::new(dir), MAX_SEARCH_DEPTH))
        .map(|path| (path, None))
}

fn find_ttf(dir: &Path, depth: usize) -> Option<PathBuf> {
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    entries.sort();

    if let Some(font) = entries.iter().find(|p| p.is_file() && is_ttf(p)) {
        return Some(font.clone());
    }

    if depth == 0 {
        return None;
    }

    entries
        .iter()
        .filter(|p| p.is_dir())
        .find_map(|p| find_ttf(p, depth - 1))
}

fn is_ttf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("ttf"))
        .unwrap_or(false)
}

// ab_glyph keeps references to the font bytes for the whole process.
fn leak_font(path: &Path) -> Result<&'static [u8]> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;
    Ok(Box::leak(bytes.into_boxed_slice()))
}

fn register(style: FontStyle, bytes: &'static [u8], path: &Path) -> Result<()> {
    register_font(FONT_FAMILY, style, bytes)
        .map_err(|_| AppError::render(format!("{} is not a usable TrueType font", path.display())))
}
