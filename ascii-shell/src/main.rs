mod charsets;
mod config;
mod output;
mod shell;
mod source;

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::config::{DEFAULT_HTML_FONT, OutputConfig, ShellConfig};
use crate::shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "ascii-art")]
#[command(about = "Interactive shell that converts images into ASCII art")]
struct Args {
    /// JSON config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial image path or URL
    #[arg(short, long)]
    image: Option<String>,

    /// Initial character set (same syntax as `add`, space separated)
    #[arg(long)]
    chars: Option<String>,

    /// Characters per row (power of two)
    #[arg(short, long)]
    resolution: Option<u32>,

    /// TrueType font used to measure character brightness
    #[arg(short, long)]
    font: Option<PathBuf>,

    /// Write art to an HTML file instead of the console
    #[arg(long, value_name = "FILE")]
    html: Option<PathBuf>,
}

impl Args {
    /// コマンドライン引数で設定を上書き
    fn apply(self, config: &mut ShellConfig) {
        if let Some(image) = self.image {
            config.image = Some(image);
        }
        if let Some(chars) = self.chars {
            config.charset = chars;
        }
        if let Some(resolution) = self.resolution {
            config.resolution = resolution;
        }
        if let Some(font) = self.font {
            config.font = Some(font);
        }
        if let Some(path) = self.html {
            let font = match &config.output {
                OutputConfig::Html { font, .. } => font.clone(),
                OutputConfig::Console => DEFAULT_HTML_FONT.to_string(),
            };
            config.output = OutputConfig::Html { path, font };
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ShellConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ShellConfig::default(),
    };
    args.apply(&mut config);
    log::debug!("Config: {:?}", config);

    let mut shell = Shell::new(config)?;

    let stdin = io::stdin();
    shell.run(stdin.lock(), io::stdout())?;
    log::debug!(
        "Exiting with {} characters at resolution {}",
        shell.index().len(),
        shell.resolution()
    );

    Ok(())
}
