use std::fmt;

use crate::brightness::CharacterBrightnessIndex;
use crate::errors::{ArtError, Result};
use crate::image::{Image, pad, partition, reduce};

/// タイルごとに1文字を持つ行優先の文字グリッド
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtMatrix {
    rows: usize,
    columns: usize,
    cells: Vec<char>,
}

impl ArtMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        if row >= self.rows {
            return None;
        }
        let start = row * self.columns;
        Some(&self.cells[start..start + self.columns])
    }

    /// 各行を文字列として列挙
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.columns.max(1))
            .map(|row| row.iter().collect())
    }
}

impl fmt::Display for ArtMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// 画像を `columns` 列の ASCII アートに変換
///
/// パディング、タイル分割、輝度計算を行い、タイルごとにインデックスを1回引く。
pub fn generate(image: &Image, columns: u32, index: &CharacterBrightnessIndex) -> Result<ArtMatrix> {
    if index.is_empty() {
        return Err(ArtError::EmptySet);
    }

    let padded = pad(image)?;
    let grid = partition(&padded, columns)?;

    let cells = grid
        .iter()
        .map(|tile| index.query(reduce(tile)))
        .collect::<Result<Vec<char>>>()?;

    Ok(ArtMatrix {
        rows: grid.rows() as usize,
        columns: grid.columns() as usize,
        cells,
    })
}
