pub mod brightness;
pub mod errors;
pub mod generator;
pub mod glyph;
pub mod image;

pub use brightness::{CharacterBrightness, CharacterBrightnessIndex};
pub use errors::{ArtError, Result};
pub use generator::{ArtMatrix, generate};
pub use glyph::{BitmapFontRasterizer, GLYPH_RESOLUTION, Glyph, GlyphRasterizer, TrueTypeRasterizer};
pub use crate::image::{Image, Rgb, TileGrid};
