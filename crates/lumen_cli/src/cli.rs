use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use lumen_renderer::{ImageFormat, PpmFormat, RenderConfig, SpotlightCutoff};

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output encodings selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Plain-text PPM
    P3,
    /// Binary PPM
    P6,
    Png,
}

impl From<OutputFormat> for ImageFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::P3 => ImageFormat::Ppm(PpmFormat::Plain),
            OutputFormat::P6 => ImageFormat::Ppm(PpmFormat::Binary),
            OutputFormat::Png => ImageFormat::Png,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "A recursive ray tracer for plane, sphere and quadric scenes")]
pub struct Args {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Scene file (JSON array of camera, light and object records)
    pub input: PathBuf,

    /// Output image path
    pub output: PathBuf,

    /// Output format (defaults from the output extension: .png is PNG, otherwise P3)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Maximum reflection/refraction depth
    #[arg(long, default_value_t = lumen_renderer::DEFAULT_MAX_DEPTH)]
    pub max_depth: u32,

    /// Leave points outside a spotlight's cone unlit
    #[arg(long)]
    pub spotlight_cutoff: bool,

    /// Trace image rows in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Print the loaded scene before rendering
    #[arg(long)]
    pub dump_scene: bool,

    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Format to save with: the explicit flag, else guessed from the path.
    pub fn image_format(&self) -> ImageFormat {
        self.format
            .map(ImageFormat::from)
            .unwrap_or_else(|| ImageFormat::from_path(&self.output))
    }

    pub fn render_config(&self) -> RenderConfig {
        let cutoff = if self.spotlight_cutoff {
            SpotlightCutoff::Enforce
        } else {
            SpotlightCutoff::Bypass
        };

        RenderConfig::default()
            .with_max_depth(self.max_depth)
            .with_spotlight_cutoff(cutoff)
            .with_parallel(self.parallel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("lumen").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_arguments() {
        let args = parse(&["320", "240", "scene.json", "out.ppm"]).unwrap();
        assert_eq!(args.width, 320);
        assert_eq!(args.height, 240);
        assert_eq!(args.input, PathBuf::from("scene.json"));
        assert_eq!(args.output, PathBuf::from("out.ppm"));
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(!args.dump_scene);
    }

    #[test]
    fn test_defaults_match_render_config() {
        let args = parse(&["4", "4", "scene.json", "out.ppm"]).unwrap();
        let config = args.render_config();
        let default = RenderConfig::default();

        assert_eq!(config.max_depth, default.max_depth);
        assert_eq!(config.spotlight_cutoff, SpotlightCutoff::Bypass);
        assert!(!config.parallel);
    }

    #[test]
    fn test_flags_map_onto_config() {
        let args = parse(&[
            "4",
            "4",
            "scene.json",
            "out.ppm",
            "--max-depth",
            "2",
            "--spotlight-cutoff",
            "--parallel",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let config = args.render_config();

        assert_eq!(config.max_depth, 2);
        assert_eq!(config.spotlight_cutoff, SpotlightCutoff::Enforce);
        assert!(config.parallel);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_format_from_extension() {
        let args = parse(&["4", "4", "scene.json", "out.png"]).unwrap();
        assert_eq!(args.image_format(), ImageFormat::Png);

        let args = parse(&["4", "4", "scene.json", "out.ppm"]).unwrap();
        assert_eq!(args.image_format(), ImageFormat::Ppm(PpmFormat::Plain));
    }

    #[test]
    fn test_explicit_format_wins() {
        let args = parse(&["4", "4", "scene.json", "out.png", "--format", "p6"]).unwrap();
        assert_eq!(args.image_format(), ImageFormat::Ppm(PpmFormat::Binary));
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(parse(&["4", "4", "scene.json"]).is_err());
        assert!(parse(&["-4", "4", "scene.json", "out.ppm"]).is_err());
        assert!(parse(&["4", "4", "scene.json", "out.ppm", "--format", "jpg"]).is_err());
    }
}
