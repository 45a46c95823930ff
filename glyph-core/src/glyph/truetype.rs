use std::path::Path;

use fontdue::{Font, FontSettings};

use super::{GLYPH_RESOLUTION, Glyph, GlyphRasterizer};
use crate::errors::{ArtError, Result};

/// 描画済みとみなすカバレッジ値の下限
const COVERAGE_THRESHOLD: u8 = 128;

/// TrueType / OpenType フォントを使うラスタライザー
pub struct TrueTypeRasterizer {
    font: Font,
}

impl TrueTypeRasterizer {
    /// フォントファイルを読み込む
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(data)
    }

    /// メモリ上のフォントデータから作成
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(data, FontSettings::default())
            .map_err(|e| ArtError::FontLoad(e.to_string()))?;
        Ok(Self { font })
    }
}

impl GlyphRasterizer for TrueTypeRasterizer {
    fn rasterize(&self, character: char) -> Glyph {
        let px = GLYPH_RESOLUTION as f32;
        let (metrics, bitmap) = self.font.rasterize(character, px);
        if metrics.width == 0 || metrics.height == 0 {
            return Glyph::empty(character);
        }

        // セルの上端から ascent の位置をベースラインとする
        let ascent = self
            .font
            .horizontal_line_metrics(px)
            .map(|line| line.ascent)
            .unwrap_or(px * 0.8);
        let baseline = ascent.round() as i32;
        let top = baseline - (metrics.ymin + metrics.height as i32);
        let left = metrics.xmin.max(0);

        Glyph::from_fn(character, |row, col| {
            let y = row as i32 - top;
            let x = col as i32 - left;
            if y < 0 || x < 0 || y >= metrics.height as i32 || x >= metrics.width as i32 {
                return false;
            }
            bitmap[y as usize * metrics.width + x as usize] >= COVERAGE_THRESHOLD
        })
    }
}
