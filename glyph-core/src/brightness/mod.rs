pub mod index;

pub use index::CharacterBrightnessIndex;

use std::cmp::Ordering;

use crate::glyph::GlyphRasterizer;

/// 正規化で全ての明度が同じだった場合の線形明度
pub const DEGENERATE_LINEAR_BRIGHTNESS: f64 = 0.5;

/// 文字の明度情報
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterBrightness {
    character: char,
    non_linear: f64,
    linear: f64,
}

impl CharacterBrightness {
    /// グリフから非線形明度を計算して作成
    ///
    /// 線形明度は `normalize` が呼ばれるまで 0.0 のまま。
    pub fn new(character: char, rasterizer: &dyn GlyphRasterizer) -> Self {
        Self::with_non_linear(character, rasterizer.rasterize(character).coverage_ratio())
    }

    pub(crate) fn with_non_linear(character: char, non_linear: f64) -> Self {
        Self {
            character,
            non_linear,
            linear: 0.0,
        }
    }

    pub fn character(&self) -> char {
        self.character
    }

    pub fn non_linear(&self) -> f64 {
        self.non_linear
    }

    pub fn linear(&self) -> f64 {
        self.linear
    }

    /// 最小・最大の非線形明度に対して線形明度を再計算
    pub(crate) fn normalize(&mut self, min: f64, max: f64) {
        self.linear = if max > min {
            ((self.non_linear - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            DEGENERATE_LINEAR_BRIGHTNESS
        };
    }

    /// (非線形明度, 文字) の順序
    pub(crate) fn order(&self, other: &Self) -> Ordering {
        self.non_linear
            .total_cmp(&other.non_linear)
            .then(self.character.cmp(&other.character))
    }
}
