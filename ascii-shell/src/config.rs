use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::charsets;

/// HTML出力のデフォルトのファイル名
pub const DEFAULT_HTML_PATH: &str = "out.html";

/// HTML出力のデフォルトのフォント
pub const DEFAULT_HTML_FONT: &str = "Courier New";

/// 出力先の設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutputConfig {
    Console,
    Html {
        #[serde(default = "default_html_path")]
        path: PathBuf,
        #[serde(default = "default_html_font")]
        font: String,
    },
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::Console
    }
}

fn default_html_path() -> PathBuf {
    PathBuf::from(DEFAULT_HTML_PATH)
}

fn default_html_font() -> String {
    DEFAULT_HTML_FONT.to_string()
}

/// シェル設定
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// 起動時に読み込む画像（パスまたはURL）
    pub image: Option<String>,
    /// 初期文字セットの指定（`add` と同じ形式）
    pub charset: String,
    /// 1行あたりの文字数
    pub resolution: u32,
    pub output: OutputConfig,
    /// グリフ描画に使うフォントファイル。未指定なら組み込みフォント
    pub font: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            image: None,
            charset: "0-9".to_string(),
            resolution: 128,
            output: OutputConfig::default(),
            font: None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Resolution must be a power of two, got {0}")]
    Resolution(u32),

    #[error("Invalid charset: '{0}'")]
    Charset(String),
}

impl ShellConfig {
    /// JSONファイルから設定を読み込む
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// 設定値を検証
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.resolution.is_power_of_two() {
            return Err(ConfigError::Resolution(self.resolution));
        }
        if charsets::parse_selections(&self.charset).is_none() {
            return Err(ConfigError::Charset(self.charset.clone()));
        }
        Ok(())
    }

    /// 初期文字セット
    pub fn initial_chars(&self) -> Vec<char> {
        charsets::parse_selections(&self.charset).unwrap_or_default()
    }
}
