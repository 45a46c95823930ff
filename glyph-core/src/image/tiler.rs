use ::image::imageops;

use super::{Image, WHITE};
use crate::errors::{ArtError, Result};

/// 正方形タイルの行優先グリッド
#[derive(Debug, Clone)]
pub struct TileGrid {
    rows: u32,
    columns: u32,
    tile_side: u32,
    tiles: Vec<Image>,
}

impl TileGrid {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    pub fn tile_side(&self) -> u32 {
        self.tile_side
    }

    pub fn tile(&self, row: u32, column: u32) -> Option<&Image> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.tiles.get((row * self.columns + column) as usize)
    }

    /// 行優先でタイルを列挙
    pub fn iter(&self) -> impl Iterator<Item = &Image> {
        self.tiles.iter()
    }
}

/// 幅と高さを2の累乗に拡張し、元画像を中央に配置する
///
/// 追加された領域は白で埋める。幅が奇数、または大きさが 0 の画像はエラー。
pub fn pad(image: &Image) -> Result<Image> {
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 || width % 2 != 0 {
        return Err(ArtError::InvalidDimension { width, height });
    }

    let (padded_width, padded_height) = padded_size(width, height);
    if (padded_width, padded_height) == (width, height) {
        return Ok(image.clone());
    }

    let left = (padded_width - width) / 2;
    let top = (padded_height - height) / 2;

    Ok(Image::from_fn(padded_width, padded_height, |x, y| {
        let inside = (left..left + width).contains(&x) && (top..top + height).contains(&y);
        if inside {
            image.pixel(x - left, y - top)
        } else {
            WHITE
        }
    }))
}

/// パディング後の大きさ（それぞれ以上の最小の2の累乗）
pub fn padded_size(width: u32, height: u32) -> (u32, u32) {
    (width.next_power_of_two(), height.next_power_of_two())
}

/// 画像を `columns` 列の正方形タイルに分割する
///
/// タイルの一辺は `幅 / columns`。列数が幅を割り切れない場合や、
/// タイルが画像の高さに収まらない場合はエラー。
pub fn partition(image: &Image, columns: u32) -> Result<TileGrid> {
    let (width, height) = (image.width(), image.height());
    let invalid = || ArtError::InvalidResolution {
        columns,
        width,
        height,
    };

    if columns == 0 || width % columns != 0 {
        return Err(invalid());
    }
    let tile_side = width / columns;
    if tile_side > height || height % tile_side != 0 {
        return Err(invalid());
    }
    let rows = height / tile_side;

    let buffer = image.buffer();
    let mut tiles = Vec::with_capacity((rows * columns) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let tile = imageops::crop_imm(
                buffer,
                column * tile_side,
                row * tile_side,
                tile_side,
                tile_side,
            );
            tiles.push(Image::from_rgb(tile.to_image()));
        }
    }

    Ok(TileGrid {
        rows,
        columns,
        tile_side,
        tiles,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Rgb;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

    /// 座標ごとに異なる色の画像
    fn coordinate_image(width: u32, height: u32) -> Image {
        Image::from_fn(width, height, |x, y| Rgb([x as u8, y as u8, 3]))
    }

    #[test]
    fn test_pad_centers_source_image() {
        let image = Image::filled(6, 3, BLACK);
        let padded = pad(&image).unwrap();
        assert_eq!((padded.width(), padded.height()), (8, 4));

        for y in 0..4 {
            for x in 0..8 {
                let expected = if (1..7).contains(&x) && y < 3 { BLACK } else { WHITE };
                assert_eq!(padded.pixel(x, y), expected, "pixel ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_pad_preserves_pixels() {
        let image = coordinate_image(10, 5);
        let padded = pad(&image).unwrap();
        assert_eq!((padded.width(), padded.height()), (16, 8));
        for y in 0..5 {
            for x in 0..10 {
                assert_eq!(padded.pixel(x + 3, y + 1), image.pixel(x, y));
            }
        }
    }

    #[test]
    fn test_pad_power_of_two_unchanged() {
        let image = coordinate_image(16, 8);
        assert_eq!(pad(&image).unwrap(), image);
    }

    #[test]
    fn test_pad_rejects_odd_width() {
        let result = pad(&Image::filled(5, 4, BLACK));
        assert!(matches!(
            result,
            Err(ArtError::InvalidDimension { width: 5, height: 4 })
        ));
    }

    #[test]
    fn test_pad_rejects_empty() {
        assert!(pad(&Image::filled(0, 4, BLACK)).is_err());
        assert!(pad(&Image::filled(4, 0, BLACK)).is_err());
    }

    #[test]
    fn test_partition_dimensions() {
        let grid = partition(&coordinate_image(16, 8), 4).unwrap();
        assert_eq!(grid.columns(), 4);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.tile_side(), 4);
        assert_eq!(grid.iter().count(), 8);
        assert!(grid.tile(2, 0).is_none());
        assert!(grid.tile(0, 4).is_none());
    }

    #[test]
    fn test_partition_covers_every_pixel() {
        let padded = pad(&coordinate_image(12, 7)).unwrap();
        for columns in [2, 4, 8, 16] {
            let grid = partition(&padded, columns).unwrap();
            let side = grid.tile_side();

            let area: u32 = grid.iter().map(|tile| tile.width() * tile.height()).sum();
            assert_eq!(area, padded.width() * padded.height());

            for row in 0..grid.rows() {
                for column in 0..grid.columns() {
                    let tile = grid.tile(row, column).unwrap();
                    for y in 0..side {
                        for x in 0..side {
                            assert_eq!(
                                tile.pixel(x, y),
                                padded.pixel(column * side + x, row * side + y)
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_partition_invalid_columns() {
        let image = coordinate_image(16, 8);
        assert!(matches!(
            partition(&image, 0),
            Err(ArtError::InvalidResolution { .. })
        ));
        assert!(partition(&image, 3).is_err());
        // タイル (16x16) が高さ 8 に収まらない
        assert!(partition(&image, 1).is_err());
    }
}
