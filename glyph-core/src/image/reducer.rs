use super::Image;

const RED_WEIGHT: f64 = 0.2126;
const GREEN_WEIGHT: f64 = 0.7152;
const BLUE_WEIGHT: f64 = 0.0722;
const MAX_RGB: f64 = 255.0;

/// タイルの平均輝度を [0, 1] で求める
pub fn reduce(tile: &Image) -> f64 {
    let area = tile.width() as f64 * tile.height() as f64;
    if area == 0.0 {
        return 0.0;
    }

    let luma_sum: f64 = tile
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
        })
        .sum();

    (luma_sum / (area * MAX_RGB)).clamp(0.0, 1.0)
}
