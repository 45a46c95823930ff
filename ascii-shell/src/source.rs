use glyph_core::{ArtError, Image, Result};
use url::Url;

/// HTTPまたはHTTPS URLかチェック
pub fn is_http_url(input: &str) -> bool {
    if let Ok(parsed) = Url::parse(input) {
        matches!(parsed.scheme(), "http" | "https")
    } else {
        false
    }
}

/// ファイルパスまたはURLから画像を読み込む
pub fn load_image(name: &str) -> Result<Image> {
    if is_http_url(name) {
        log::debug!("Downloading image from {}", name);
        let bytes = download(name).map_err(|e| ArtError::ImageLoad {
            source_name: name.to_string(),
            reason: e.to_string(),
        })?;
        Image::from_bytes(&bytes, name)
    } else {
        Image::open(name)
    }
}

fn download(url: &str) -> reqwest::Result<Vec<u8>> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    Ok(response.bytes()?.to_vec())
}

#[cfg(test)]
mod tests {
    use glyph_core::Rgb;

    use super::*;

    #[test]
    fn test_is_http_url() {
        assert!(is_http_url("http://example.com/cat.jpeg"));
        assert!(is_http_url("https://example.com/cat.jpeg"));
        assert!(!is_http_url("ftp://example.com/cat.jpeg"));
        assert!(!is_http_url("cat.jpeg"));
        assert!(!is_http_url("/tmp/cat.jpeg"));
    }

    #[test]
    fn test_load_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.png");
        let image = Image::from_fn(4, 4, |x, y| if (x + y) % 2 == 0 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        image.save(&path).unwrap();

        let loaded = load_image(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_image("/nonexistent/cat.jpeg"),
            Err(ArtError::ImageLoad { .. })
        ));
    }
}
