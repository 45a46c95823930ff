//! 文字グリフのラスタライズ
//!
//! 文字を R×R の二値カバレッジビットマップに変換する。
//! 同じ文字からは常に同じビットマップが得られる。

pub mod bitmap;
pub mod truetype;

pub use bitmap::BitmapFontRasterizer;
pub use truetype::TrueTypeRasterizer;

/// グリフビットマップの解像度（R）
pub const GLYPH_RESOLUTION: usize = 16;

/// 文字とそのカバレッジビットマップ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    character: char,
    coverage: [[bool; GLYPH_RESOLUTION]; GLYPH_RESOLUTION],
}

impl Glyph {
    /// 何も描かれていないグリフを作成
    pub fn empty(character: char) -> Self {
        Self {
            character,
            coverage: [[false; GLYPH_RESOLUTION]; GLYPH_RESOLUTION],
        }
    }

    /// 各セル (row, col) の値を関数から決めてグリフを作成
    pub fn from_fn<F>(character: char, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut glyph = Self::empty(character);
        for (row, cells) in glyph.coverage.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                *cell = f(row, col);
            }
        }
        glyph
    }

    pub fn character(&self) -> char {
        self.character
    }

    /// セルが描画されているか。範囲外は false
    pub fn is_set(&self, row: usize, col: usize) -> bool {
        self.coverage
            .get(row)
            .and_then(|cells| cells.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// 描画されているセルの数
    pub fn lit_cells(&self) -> usize {
        self.coverage
            .iter()
            .map(|cells| cells.iter().filter(|&&cell| cell).count())
            .sum()
    }

    /// 描画セルの割合（非線形明度）
    pub fn coverage_ratio(&self) -> f64 {
        self.lit_cells() as f64 / (GLYPH_RESOLUTION * GLYPH_RESOLUTION) as f64
    }
}

/// 文字をグリフに変換するラスタライザー
pub trait GlyphRasterizer {
    fn rasterize(&self, character: char) -> Glyph;
}
