use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use glyph_core::image::padded_size;
use glyph_core::{
    ArtError, BitmapFontRasterizer, CharacterBrightnessIndex, GlyphRasterizer, Image,
    TrueTypeRasterizer, generate,
};
use thiserror::Error;

use crate::charsets;
use crate::config::{DEFAULT_HTML_FONT, DEFAULT_HTML_PATH, ShellConfig};
use crate::output::OutputMethod;
use crate::source;

const PROMPT: &str = ">>> ";

/// ユーザーに表示するシェルのエラー
#[derive(Error, Debug)]
pub enum ShellError {
    #[error("Did not execute due to incorrect command.")]
    IncorrectCommand,

    #[error("Did not add due to incorrect format.")]
    AddFormat,

    #[error("Did not remove due to incorrect format.")]
    RemoveFormat,

    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionBounds,

    #[error("Did not change resolution due to incorrect format.")]
    ResolutionFormat,

    #[error("Did not execute due to problem with image file.")]
    ImageFile,

    #[error("Did not change output method due to incorrect format.")]
    OutputFormat,

    #[error("Did not execute. Charset is empty.")]
    EmptyCharset,

    #[error("Did not execute. No image loaded.")]
    NoImage,

    #[error("Did not write output: {0}")]
    Output(io::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// シェルのコマンド
#[derive(Debug, Clone, PartialEq)]
enum Command<'a> {
    Exit,
    Chars,
    Add(&'a str),
    Remove(&'a str),
    Resolution(Option<&'a str>),
    Image(&'a str),
    Output(Vec<&'a str>),
    AsciiArt,
}

impl<'a> Command<'a> {
    /// 入力行をコマンドに変換
    fn parse(line: &'a str) -> Result<Self, ShellError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(ShellError::IncorrectCommand);
        };
        let args: Vec<&str> = words.collect();

        match (name, args.as_slice()) {
            ("exit", []) => Ok(Self::Exit),
            ("chars", []) => Ok(Self::Chars),
            ("add", [arg]) => Ok(Self::Add(*arg)),
            ("add", _) => Err(ShellError::AddFormat),
            ("remove", [arg]) => Ok(Self::Remove(*arg)),
            ("remove", _) => Err(ShellError::RemoveFormat),
            ("res", []) => Ok(Self::Resolution(None)),
            ("res", [arg]) => Ok(Self::Resolution(Some(*arg))),
            ("res", _) => Err(ShellError::ResolutionFormat),
            ("image", [arg]) => Ok(Self::Image(*arg)),
            ("image", _) => Err(ShellError::ImageFile),
            ("output", _) => Ok(Self::Output(args.clone())),
            ("asciiArt", []) => Ok(Self::AsciiArt),
            _ => Err(ShellError::IncorrectCommand),
        }
    }
}

/// コマンド処理後の状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// 行単位で命令を受け付ける ASCII アートシェル
pub struct Shell {
    index: CharacterBrightnessIndex,
    image: Option<Image>,
    resolution: u32,
    output: OutputMethod,
}

impl Shell {
    /// 設定からシェルを作成
    ///
    /// 初期画像の読み込みに失敗しても起動は続け、画像なしで開始する。
    pub fn new(config: ShellConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let rasterizer: Box<dyn GlyphRasterizer> = match &config.font {
            Some(path) => Box::new(
                TrueTypeRasterizer::from_file(path)
                    .with_context(|| format!("Failed to load font {}", path.display()))?,
            ),
            None => Box::new(BitmapFontRasterizer::new()),
        };
        let index = CharacterBrightnessIndex::from_chars(rasterizer, config.initial_chars());

        let image = config.image.as_deref().and_then(|name| match load_checked(name) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("Failed to load initial image '{}': {}", name, e);
                None
            }
        });

        let mut shell = Self {
            index,
            image,
            resolution: config.resolution,
            output: config.output.into(),
        };
        shell.clamp_resolution();
        Ok(shell)
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn index(&self) -> &CharacterBrightnessIndex {
        &self.index
    }

    /// 入力が終わるか `exit` を受け取るまでコマンドを処理
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        let mut lines = input.lines();
        loop {
            write!(output, "{}", PROMPT)?;
            output.flush()?;

            let Some(line) = lines.next().transpose()? else {
                break;
            };
            if self.execute(&line, &mut output)? == Flow::Exit {
                break;
            }
        }
        Ok(())
    }

    /// 1行分のコマンドを実行
    ///
    /// コマンドの失敗はメッセージとして `output` に書き出し、
    /// 出力先への書き込み失敗だけをエラーとして返す。
    pub fn execute<W: Write>(&mut self, line: &str, output: &mut W) -> io::Result<Flow> {
        log::debug!("Command: {:?}", line);

        let result = Command::parse(line).and_then(|command| self.handle(command, output));
        match result {
            Ok(flow) => Ok(flow),
            Err(ShellError::Io(e)) => Err(e),
            Err(e) => {
                log::warn!("{}", e);
                writeln!(output, "{}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn handle<W: Write>(&mut self, command: Command<'_>, output: &mut W) -> Result<Flow, ShellError> {
        match command {
            Command::Exit => return Ok(Flow::Exit),
            Command::Chars => self.show_chars(output)?,
            Command::Add(arg) => {
                let chars = charsets::parse_selection(arg).ok_or(ShellError::AddFormat)?;
                for c in chars {
                    self.index.add(c);
                }
            }
            Command::Remove(arg) => {
                let chars = charsets::parse_selection(arg).ok_or(ShellError::RemoveFormat)?;
                for c in chars {
                    self.index.remove(c);
                }
            }
            Command::Resolution(arg) => self.change_resolution(arg, output)?,
            Command::Image(name) => self.change_image(name, output)?,
            Command::Output(args) => self.change_output(&args)?,
            Command::AsciiArt => self.render(output)?,
        }
        Ok(Flow::Continue)
    }

    fn show_chars<W: Write>(&self, output: &mut W) -> Result<(), ShellError> {
        let chars: Vec<String> = self
            .index
            .list_alphabetical()
            .into_iter()
            .map(String::from)
            .collect();
        writeln!(output, "{}", chars.join(" "))?;
        Ok(())
    }

    fn change_resolution<W: Write>(&mut self, arg: Option<&str>, output: &mut W) -> Result<(), ShellError> {
        let (min, max) = self.resolution_bounds();
        let resolution = match arg {
            None => self.resolution,
            Some("up") => self
                .resolution
                .checked_mul(2)
                .filter(|&r| r <= max)
                .ok_or(ShellError::ResolutionBounds)?,
            Some("down") => Some(self.resolution / 2)
                .filter(|&r| r >= min)
                .ok_or(ShellError::ResolutionBounds)?,
            Some(_) => return Err(ShellError::ResolutionFormat),
        };

        self.resolution = resolution;
        writeln!(output, "Resolution set to {}.", self.resolution)?;
        Ok(())
    }

    fn change_image<W: Write>(&mut self, name: &str, output: &mut W) -> Result<(), ShellError> {
        let image = load_checked(name).map_err(|e| {
            log::warn!("Failed to load image '{}': {}", name, e);
            ShellError::ImageFile
        })?;
        log::info!("Loaded image {} ({}x{})", name, image.width(), image.height());

        self.image = Some(image);
        if self.clamp_resolution() {
            writeln!(output, "Resolution set to {}.", self.resolution)?;
        }
        Ok(())
    }

    fn change_output(&mut self, args: &[&str]) -> Result<(), ShellError> {
        self.output = match args {
            ["console"] => OutputMethod::Console,
            ["html"] => OutputMethod::Html {
                path: PathBuf::from(DEFAULT_HTML_PATH),
                font: DEFAULT_HTML_FONT.to_string(),
            },
            ["html", path] => OutputMethod::Html {
                path: PathBuf::from(*path),
                font: DEFAULT_HTML_FONT.to_string(),
            },
            ["html", path, font @ ..] => OutputMethod::Html {
                path: PathBuf::from(*path),
                font: font.join(" "),
            },
            _ => return Err(ShellError::OutputFormat),
        };
        Ok(())
    }

    fn render<W: Write>(&self, output: &mut W) -> Result<(), ShellError> {
        let image = self.image.as_ref().ok_or(ShellError::NoImage)?;
        let art = generate(image, self.resolution, &self.index).map_err(|e| match e {
            ArtError::EmptySet => ShellError::EmptyCharset,
            ArtError::InvalidResolution { .. } => ShellError::ResolutionBounds,
            _ => ShellError::ImageFile,
        })?;

        match &self.output {
            OutputMethod::Console => self.output.emit(&art, output)?,
            OutputMethod::Html { .. } => self.output.emit(&art, output).map_err(ShellError::Output)?,
        }
        Ok(())
    }

    /// 現在の画像で使える解像度の範囲
    fn resolution_bounds(&self) -> (u32, u32) {
        match &self.image {
            Some(image) => {
                let (width, height) = padded_size(image.width(), image.height());
                ((width / height).max(1), width)
            }
            None => (1, u32::MAX),
        }
    }

    /// 解像度を画像の範囲内に収める。変更した場合は true
    fn clamp_resolution(&mut self) -> bool {
        let (min, max) = self.resolution_bounds();
        let clamped = self.resolution.clamp(min, max);
        if clamped == self.resolution {
            return false;
        }
        log::info!("Resolution {} is out of bounds, using {}", self.resolution, clamped);
        self.resolution = clamped;
        true
    }
}

/// 画像を読み込み、タイル分割できる大きさか確認
fn load_checked(name: &str) -> glyph_core::Result<Image> {
    let image = source::load_image(name)?;
    let (width, height) = (image.width(), image.height());
    if width == 0 || height == 0 || width % 2 != 0 {
        return Err(ArtError::InvalidDimension { width, height });
    }
    Ok(image)
}
