//! SVG-to-PNG rasterization.

use std::path::Path;
use std::sync::Arc;

use resvg::{tiny_skia, usvg};

/// Output width of every thumbnail; height follows the SVG aspect ratio.
pub const THUMBNAIL_WIDTH: u32 = 1280;

/// Default font family the templates reference.
const FONT_FAMILY: &str = "Roboto";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("invalid thumbnail svg: {0}")]
    Svg(#[from] usvg::Error),

    #[error("could not allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// Rasterizes template SVGs into PNG bytes.
///
/// Holds the parsed font database, which is expensive to build; construct
/// once at startup and share behind an `Arc`.
pub struct Renderer {
    options: usvg::Options<'static>,
}

impl Renderer {
    /// Build a renderer, loading fonts from `fonts_dir` when given and
    /// falling back to system fonts otherwise.
    pub fn new(fonts_dir: Option<&Path>) -> Self {
        let mut fontdb = usvg::fontdb::Database::new();
        if let Some(dir) = fonts_dir {
            fontdb.load_fonts_dir(dir);
            tracing::debug!(dir = %dir.display(), faces = fontdb.len(), "Loaded thumbnail fonts");
        }
        if fontdb.len() == 0 {
            fontdb.load_system_fonts();
            tracing::debug!(faces = fontdb.len(), "Loaded system fonts for thumbnails");
        }

        let mut options = usvg::Options::default();
        options.font_family = FONT_FAMILY.to_string();
        options.fontdb = Arc::new(fontdb);
        Self { options }
    }

    /// Rasterize an SVG document to a PNG scaled to [`THUMBNAIL_WIDTH`].
    pub fn render_png(&self, svg: &str) -> Result<Vec<u8>, RenderError> {
        let tree = usvg::Tree::from_str(svg, &self.options)?;

        let size = tree.size();
        let scale = THUMBNAIL_WIDTH as f32 / size.width();
        let height = (size.height() * scale).round().max(1.0) as u32;

        let mut pixmap = tiny_skia::Pixmap::new(THUMBNAIL_WIDTH, height).ok_or(
            RenderError::Pixmap {
                width: THUMBNAIL_WIDTH,
                height,
            },
        )?;
        resvg::render(
            &tree,
            tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        pixmap
            .encode_png()
            .map_err(|err| RenderError::Encode(err.to_string()))
    }
}
