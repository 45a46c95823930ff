pub mod reducer;
pub mod tiler;

pub use reducer::reduce;
pub use tiler::{TileGrid, pad, padded_size, partition};

pub use ::image::Rgb;

use std::path::Path;

use ::image::{ImageBuffer, RgbImage};

use crate::errors::{ArtError, Result};

/// 白ピクセル
pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// 生成後に変更されない RGB 画像
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pixels: RgbImage,
}

impl Image {
    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// 各ピクセル (x, y) の色を関数から決めて作成
    pub fn from_fn<F>(width: u32, height: u32, f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgb<u8>,
    {
        Self {
            pixels: ImageBuffer::from_fn(width, height, f),
        }
    }

    /// 単色の画像を作成
    pub fn filled(width: u32, height: u32, color: Rgb<u8>) -> Self {
        Self {
            pixels: ImageBuffer::from_pixel(width, height, color),
        }
    }

    /// 画像ファイルを開く
    ///
    /// アルファチャンネルは破棄される。
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let decoded = ::image::open(path).map_err(|e| ArtError::ImageLoad {
            source_name: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_rgb(decoded.to_rgb8()))
    }

    /// メモリ上のエンコード済みデータから作成
    pub fn from_bytes(bytes: &[u8], source_name: &str) -> Result<Self> {
        let decoded = ::image::load_from_memory(bytes).map_err(|e| ArtError::ImageLoad {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_rgb(decoded.to_rgb8()))
    }

    /// 画像を保存。形式は拡張子から決まる
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.pixels.save(path)?;
        Ok(())
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        *self.pixels.get_pixel(x, y)
    }

    pub fn pixels(&self) -> impl Iterator<Item = &Rgb<u8>> {
        self.pixels.pixels()
    }

    pub(crate) fn buffer(&self) -> &RgbImage {
        &self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");

        let image = Image::from_fn(6, 4, |x, y| Rgb([(x * 40) as u8, (y * 60) as u8, 7]));
        image.save(&path).unwrap();

        let loaded = Image::open(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_open_missing_file() {
        let result = Image::open("/nonexistent/cat.jpeg");
        assert!(matches!(result, Err(ArtError::ImageLoad { .. })));
    }

    #[test]
    fn test_from_bytes_invalid() {
        let result = Image::from_bytes(b"not an image", "memory");
        match result {
            Err(ArtError::ImageLoad { source_name, .. }) => assert_eq!(source_name, "memory"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_filled() {
        let image = Image::filled(3, 2, WHITE);
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert!(image.pixels().all(|&p| p == WHITE));
    }
}
