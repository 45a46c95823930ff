use std::cmp::Ordering;
use std::fmt;

use super::CharacterBrightness;
use crate::errors::{ArtError, Result};
use crate::glyph::{BitmapFontRasterizer, GlyphRasterizer};

/// 明度順に並んだ文字セット
///
/// エントリは常に (非線形明度, 文字) の昇順に保たれる。
/// 線形明度は現在のセットの最小・最大非線形明度に対して正規化される。
pub struct CharacterBrightnessIndex {
    rasterizer: Box<dyn GlyphRasterizer>,
    entries: Vec<CharacterBrightness>,
    /// 非線形明度の (最小, 最大)。空のときは None
    range: Option<(f64, f64)>,
}

impl CharacterBrightnessIndex {
    /// 組み込みビットマップフォントで空のインデックスを作成
    pub fn new() -> Self {
        Self::with_rasterizer(Box::new(BitmapFontRasterizer::new()))
    }

    /// 指定したラスタライザーで空のインデックスを作成
    pub fn with_rasterizer(rasterizer: Box<dyn GlyphRasterizer>) -> Self {
        Self {
            rasterizer,
            entries: Vec::new(),
            range: None,
        }
    }

    /// 文字の集合からインデックスを作成
    pub fn from_chars<I>(rasterizer: Box<dyn GlyphRasterizer>, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        let mut index = Self::with_rasterizer(rasterizer);
        for c in chars {
            index.add(c);
        }
        index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, character: char) -> bool {
        self.entries.iter().any(|entry| entry.character() == character)
    }

    /// 明度順のエントリ
    pub fn entries(&self) -> &[CharacterBrightness] {
        &self.entries
    }

    pub fn min_brightness(&self) -> Option<f64> {
        self.range.map(|(min, _)| min)
    }

    pub fn max_brightness(&self) -> Option<f64> {
        self.range.map(|(_, max)| max)
    }

    /// 文字を追加。既に含まれていれば何もしない
    pub fn add(&mut self, character: char) {
        let entry = CharacterBrightness::new(character, self.rasterizer.as_ref());

        // ラスタライズは決定的なので、同じ文字は同じ位置に見つかる
        let position = match self.entries.binary_search_by(|probe| probe.order(&entry)) {
            Ok(_) => return,
            Err(position) => position,
        };

        let non_linear = entry.non_linear();
        self.entries.insert(position, entry);

        match self.range {
            Some((min, max)) if min <= non_linear && non_linear <= max => {
                self.entries[position].normalize(min, max);
            }
            _ => self.relinearize(),
        }
    }

    /// 文字を削除。含まれていなければ何もしない
    pub fn remove(&mut self, character: char) {
        let Some(position) = self
            .entries
            .iter()
            .position(|entry| entry.character() == character)
        else {
            return;
        };

        let removed = self.entries.remove(position);
        match self.range {
            Some((min, max)) if removed.non_linear() != min && removed.non_linear() != max => {}
            _ => self.relinearize(),
        }
    }

    /// 目標の明度に最も近い文字を取得
    ///
    /// 距離が等しい場合は暗い方、線形明度が等しい場合はコードの小さい文字を選ぶ。
    pub fn query(&self, target: f64) -> Result<char> {
        let split = self.entries.partition_point(|entry| entry.linear() < target);

        let below = split.checked_sub(1).map(|i| self.run_around(i));
        let above = (split < self.entries.len()).then(|| self.run_around(split));

        below
            .into_iter()
            .chain(above)
            .flatten()
            .min_by(|a, b| compare_candidates(a, b, target))
            .map(CharacterBrightness::character)
            .ok_or(ArtError::EmptySet)
    }

    /// 文字コード順の文字一覧
    pub fn list_alphabetical(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.entries.iter().map(CharacterBrightness::character).collect();
        chars.sort_unstable();
        chars
    }

    /// 最小・最大を取り直し、全エントリの線形明度を再計算
    fn relinearize(&mut self) {
        self.range = match (self.entries.first(), self.entries.last()) {
            (Some(first), Some(last)) => Some((first.non_linear(), last.non_linear())),
            _ => None,
        };

        if let Some((min, max)) = self.range {
            for entry in &mut self.entries {
                entry.normalize(min, max);
            }
        }
    }

    /// `index` と同じ線形明度を持つ連続したエントリ
    fn run_around(&self, index: usize) -> &[CharacterBrightness] {
        let linear = self.entries[index].linear();
        let start = self.entries[..index]
            .iter()
            .rposition(|entry| entry.linear() != linear)
            .map_or(0, |i| i + 1);
        let end = self.entries[index..]
            .iter()
            .position(|entry| entry.linear() != linear)
            .map_or(self.entries.len(), |i| index + i);
        &self.entries[start..end]
    }
}

impl Default for CharacterBrightnessIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CharacterBrightnessIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharacterBrightnessIndex")
            .field("entries", &self.entries)
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// 候補の優先順位: 目標との距離、線形明度、文字コードの順に小さい方
fn compare_candidates(a: &CharacterBrightness, b: &CharacterBrightness, target: f64) -> Ordering {
    let distance_a = (a.linear() - target).abs();
    let distance_b = (b.linear() - target).abs();
    distance_a
        .total_cmp(&distance_b)
        .then(a.linear().total_cmp(&b.linear()))
        .then(a.character().cmp(&b.character()))
}
