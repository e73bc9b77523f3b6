//! Social-preview thumbnail generation.
//!
//! A content row is parsed into display fields ([`parser`]), laid out as an
//! SVG document ([`template`]), and rasterized to a fixed-width PNG
//! ([`render`]).

pub mod parser;
pub mod render;
pub mod template;

pub use parser::{parse_card, ContentCard, ParsedCard};
pub use render::{RenderError, Renderer, THUMBNAIL_WIDTH};
pub use template::render_template;
