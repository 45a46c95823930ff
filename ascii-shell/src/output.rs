use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crossterm::{queue, style::Print};
use glyph_core::ArtMatrix;

use crate::config::OutputConfig;

/// ASCII アートの出力方法
#[derive(Debug, Clone, PartialEq)]
pub enum OutputMethod {
    /// シェルの出力に1行ずつ書き出す
    Console,
    /// HTMLファイルに書き出す
    Html { path: PathBuf, font: String },
}

impl From<OutputConfig> for OutputMethod {
    fn from(config: OutputConfig) -> Self {
        match config {
            OutputConfig::Console => Self::Console,
            OutputConfig::Html { path, font } => Self::Html { path, font },
        }
    }
}

impl OutputMethod {
    /// アートを出力
    pub fn emit<W: Write>(&self, art: &ArtMatrix, console: &mut W) -> std::io::Result<()> {
        match self {
            Self::Console => {
                for line in art.lines() {
                    queue!(console, Print(line), Print("\n"))?;
                }
                console.flush()
            }
            Self::Html { path, font } => {
                fs::write(path, render_html(art, font))?;
                log::info!("Wrote ASCII art to {}", path.display());
                Ok(())
            }
        }
    }
}

/// 単独で表示できるHTML文書を生成
pub fn render_html(art: &ArtMatrix, font: &str) -> String {
    let mut body = String::with_capacity((art.columns() + 1) * art.rows());
    for line in art.lines() {
        body.push_str(&escape_html(&line));
        body.push('\n');
    }

    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>ASCII Art</title>\n",
            "</head>\n",
            "<body style=\"margin: 0; background: #000000;\">\n",
            "<pre style=\"font-family: '{font}', monospace; font-size: 6px; line-height: 0.6em; color: #ffffff;\">\n",
            "{body}",
            "</pre>\n",
            "</body>\n",
            "</html>\n",
        ),
        font = escape_html(font),
        body = body,
    )
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use glyph_core::{CharacterBrightnessIndex, Image, Rgb, generate};

    use super::*;

    fn sample_art() -> ArtMatrix {
        let index = CharacterBrightnessIndex::from_chars(Box::new(glyph_core::BitmapFontRasterizer), ['<', '&']);
        let image = Image::from_fn(4, 4, |x, _| if x < 2 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) });
        generate(&image, 2, &index).unwrap()
    }

    #[test]
    fn test_console_output() {
        let art = sample_art();
        let mut console = Vec::new();
        OutputMethod::Console.emit(&art, &mut console).unwrap();

        let text = String::from_utf8(console).unwrap();
        assert_eq!(text, art.to_string());
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_html_output() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.html");
        let method = OutputMethod::Html {
            path: path.clone(),
            font: "Courier New".to_string(),
        };

        let art = sample_art();
        let mut console = Vec::new();
        method.emit(&art, &mut console).unwrap();
        assert!(console.is_empty());

        let html = fs::read_to_string(&path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("font-family: 'Courier New'"));
        assert!(html.contains("&lt;") || html.contains("&amp;"));
        assert_eq!(html.matches("</pre>").count(), 1);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a<b>&\"c'"), "a&lt;b&gt;&amp;&quot;c&#39;");
        assert_eq!(escape_html("0123"), "0123");
    }

    #[test]
    fn test_from_config() {
        assert_eq!(OutputMethod::from(OutputConfig::Console), OutputMethod::Console);
        let html = OutputConfig::Html {
            path: PathBuf::from("a.html"),
            font: "Monaco".to_string(),
        };
        assert_eq!(
            OutputMethod::from(html),
            OutputMethod::Html {
                path: PathBuf::from("a.html"),
                font: "Monaco".to_string(),
            }
        );
    }
}
