use font8x8::{BASIC_FONTS, BLOCK_FONTS, BOX_FONTS, LATIN_FONTS, UnicodeFonts};

use super::{GLYPH_RESOLUTION, Glyph, GlyphRasterizer};

/// font8x8 のビットマップ一辺のピクセル数
const FONT8X8_SIZE: usize = 8;

const SCALE: usize = GLYPH_RESOLUTION / FONT8X8_SIZE;

/// 組み込みの 8x8 ビットマップフォントを使うラスタライザー
///
/// 8x8 のビットマップを最近傍で R×R に拡大する。
/// フォントに含まれない文字は空のグリフになる。
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFontRasterizer;

impl BitmapFontRasterizer {
    pub fn new() -> Self {
        Self
    }

    /// 文字の 8x8 ビットマップを検索
    fn lookup(character: char) -> Option<[u8; FONT8X8_SIZE]> {
        BASIC_FONTS
            .get(character)
            .or_else(|| LATIN_FONTS.get(character))
            .or_else(|| BLOCK_FONTS.get(character))
            .or_else(|| BOX_FONTS.get(character))
    }
}

impl GlyphRasterizer for BitmapFontRasterizer {
    fn rasterize(&self, character: char) -> Glyph {
        let Some(rows) = Self::lookup(character) else {
            return Glyph::empty(character);
        };

        // 各バイトの最下位ビットが左端のピクセル
        Glyph::from_fn(character, |row, col| {
            let bits = rows[row / SCALE];
            bits & (1 << (col / SCALE)) != 0
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_is_empty() {
        let glyph = BitmapFontRasterizer.rasterize(' ');
        assert_eq!(glyph.lit_cells(), 0);
    }

    #[test]
    fn test_full_block_is_full() {
        let glyph = BitmapFontRasterizer.rasterize('█');
        assert_eq!(glyph.coverage_ratio(), 1.0);
    }

    #[test]
    fn test_unknown_character_is_empty() {
        let glyph = BitmapFontRasterizer.rasterize('\u{1F600}');
        assert_eq!(glyph, Glyph::empty('\u{1F600}'));
    }

    #[test]
    fn test_rasterize_is_deterministic() {
        let rasterizer = BitmapFontRasterizer::new();
        for c in ['a', 'Z', '@', '7', '%'] {
            assert_eq!(rasterizer.rasterize(c), rasterizer.rasterize(c));
        }
    }

    #[test]
    fn test_density_order() {
        let rasterizer = BitmapFontRasterizer::new();
        let dot = rasterizer.rasterize('.').coverage_ratio();
        let star = rasterizer.rasterize('*').coverage_ratio();
        let at = rasterizer.rasterize('@').coverage_ratio();
        assert!(0.0 < dot && dot < star && star < at);
    }
}
