use figlet_rs::FIGfont;
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;

/// Usable FIGlet fonts found on the system, keyed by lowercased name without the `.flf` extension.
static SYSTEM_FONT_PATHS: OnceCell<HashMap<String, String>> = OnceCell::new();

const FONT_DIRS: &[&str] =
    &["/opt/homebrew/share/figlet/fonts", "/usr/local/share/figlet", "/usr/share/figlet", "/usr/share/figlet/fonts"];

/// Fonts that load and render with figlet-rs 0.1.5. Among the rest, banner, big, bubble, digital,
/// dwhistled, gradient, ivrit, l4me, maxfour, morse, pyramid, rot13, term and tsalagi make it panic.
const SAFE_FONTS: &[&str] = &[
    "3-d", "3x5", "5lineoblique", "acrobatic", "alligator", "alligator2", "alphabet", "avatar", "banner3",
    "banner3-d", "banner4", "barbwire", "basic", "bell", "bigchief", "binary", "block", "broadway", "bulbhead",
    "calgphy2", "caligraphy", "catwalk", "chunky", "coinstak", "colossal", "computer", "contessa", "contrast",
    "cosmic", "cosmike", "crawford", "cricket", "cursive", "cyberlarge", "cybermedium", "cybersmall", "decimal",
    "diamond", "doh", "doom", "dotmatrix", "double", "drpepper", "eftichess", "eftifont", "eftipiti", "eftirobot",
    "eftitalic", "eftiwall", "eftiwater", "epic", "fender", "fourtops", "fraktur", "fuzzy", "goofy", "gothic",
    "graceful", "graffiti", "hex", "hollywood", "invita", "isometric1", "isometric2", "isometric3", "isometric4",
    "italic", "jazmine", "jerusalem", "katakana", "kban", "larry3d", "lcd", "lean", "letters", "linux",
    "lockergnome", "madrid", "marquee", "mike", "mini", "mirror", "mnemonic", "moscow", "mshebrew210", "nancyj",
    "nancyj-fancy", "nancyj-underlined", "nipples", "ntgreek", "nvscript", "o8", "octal", "ogre", "os2", "pawp",
    "peaks", "pebbles", "pepper", "poison", "puffy", "rectangles", "relief", "relief2", "rev", "roman", "rounded",
    "rowancap", "rozzo", "runic", "runyc", "sblood", "script", "serifcap", "shadow", "short", "slant", "slide",
    "slscript", "small", "smisome1", "smkeyboard", "smscript", "smshadow", "smslant", "smtengwar", "speed",
    "stacey", "stampatello", "standard", "starwars", "stellar", "stop", "straight", "tanja", "tengwar", "thick",
    "thin", "threepoint", "ticks", "ticksslant", "tinker-toy", "tombstone", "trek", "twopoint", "univers",
    "usaflag", "weird", "whimsy",
];

fn is_safe_font(name: &str) -> bool {
    SAFE_FONTS.contains(&name.to_lowercase().as_str())
}

/// Whether the font at `path` loads and renders a sample without panicking.
fn validate_font_file(path: &str) -> bool {
    let Ok(Ok(font)) = catch_unwind(AssertUnwindSafe(|| FIGfont::from_file(path))) else {
        return false;
    };
    matches!(catch_unwind(AssertUnwindSafe(|| font.convert("TEST"))), Ok(Some(_)))
}

fn scan_font_dirs<P: AsRef<Path>>(dirs: &[P]) -> HashMap<String, String> {
    let mut fonts = HashMap::new();
    for dir in dirs {
        let dir: &Path = dir.as_ref();
        let Ok(entries) = std::fs::read_dir(dir) else {
            continue;
        };
        for path in entries.flatten().map(|entry| entry.path()) {
            if !path.extension().is_some_and(|ext| ext == "flf") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()).map(str::to_lowercase) else {
                continue;
            };
            if fonts.contains_key(&stem) || !is_safe_font(&stem) {
                continue;
            }
            let path = path.to_string_lossy().to_string();
            if validate_font_file(&path) {
                fonts.insert(stem, path);
            } else {
                log::debug!("skipping FIGlet font {path}: it fails to render");
            }
        }
    }
    fonts
}

fn scan_system_fonts() -> HashMap<String, String> {
    let fonts = scan_font_dirs(FONT_DIRS);
    log::debug!("found {} usable system FIGlet font(s)", fonts.len());
    fonts
}

/// Renders words as multi-line ASCII art.
pub(crate) struct BannerGenerator {
    font: FIGfont,
}

impl BannerGenerator {
    /// Load a font by name (`standard` is built in) or by path to a `.flf` file.
    pub(crate) fn new(font: &str) -> Result<Self, BannerError> {
        let font = Self::load_font(font)?;
        Ok(Self { font })
    }

    /// Render `text`, one string per output row.
    pub(crate) fn generate(&self, text: &str) -> Result<Vec<String>, BannerError> {
        // Some fonts make the converter panic on unusual input.
        let figure = catch_unwind(AssertUnwindSafe(|| self.font.convert(text).map(|figure| figure.to_string())));
        match figure {
            Ok(Some(figure)) => Ok(trim_blank_rows(&figure)),
            Ok(None) | Err(_) => Err(BannerError::ConversionFailed(text.to_string())),
        }
    }

    fn load_font(name: &str) -> Result<FIGfont, BannerError> {
        let loaded = if name.eq_ignore_ascii_case("standard") {
            catch_unwind(FIGfont::standard)
        } else {
            let path = if Path::new(name).is_file() {
                name.to_string()
            } else {
                SYSTEM_FONT_PATHS
                    .get_or_init(scan_system_fonts)
                    .get(&name.to_lowercase())
                    .cloned()
                    .ok_or_else(|| BannerError::FontUnavailable(name.to_string()))?
            };
            catch_unwind(AssertUnwindSafe(|| FIGfont::from_file(&path)))
        };
        match loaded {
            Ok(Ok(font)) => Ok(font),
            Ok(Err(e)) => Err(BannerError::FontLoadFailed(name.to_string(), e)),
            Err(_) => Err(BannerError::FontLoadFailed(name.to_string(), "panic during font loading".to_string())),
        }
    }
}

/// Drop trailing whitespace and all-blank rows at the bottom, which FIGlet fonts pad with.
fn trim_blank_rows(figure: &str) -> Vec<String> {
    let mut rows: Vec<String> = figure.lines().map(|line| line.trim_end().to_string()).collect();
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    rows
}

/// Errors that can occur when generating banners
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    #[error("failed to load font '{0}': {1}")]
    FontLoadFailed(String, String),

    #[error("failed to convert text '{0}' to ASCII art")]
    ConversionFailed(String),

    #[error("requested figlet font '{0}' is not available")]
    FontUnavailable(String),
}
