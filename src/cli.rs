use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{io::Write, path::PathBuf};

use crate::utils::Result;

pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    format!(
        "{}-{}",
        env!("CARGO_PKG_VERSION"),
        env!("VERGEN_GIT_DESCRIBE")
    )
});

#[derive(Parser)]
#[command(name="icongen",
          version=&**FULL_VERSION,
          about="Android launcher icon generator",
          long_about = None,
          disable_help_subcommand = true,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[clap(short = 'v')]
    #[clap(long = "verbose")]
    #[clap(action = ArgAction::Count, help = "Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)")]
    pub verbosity: u8,
}

#[derive(Subcommand)]
pub enum Command {
    #[clap(about = "Convert the app vector icon into every launcher density bucket")]
    Convert(ConvertArgs),
}

#[derive(Parser, Debug)]
pub struct ConvertArgs {
    #[clap(short = 'i')]
    #[clap(long = "input")]
    #[clap(help = "Source vector icon file")]
    #[clap(value_name = "SVG")]
    #[clap(default_value = "app_icon.svg")]
    pub source: PathBuf,

    #[clap(short = 'o')]
    #[clap(long = "res-root")]
    #[clap(help = "Root of the Android resource tree that receives the mipmap directories")]
    #[clap(value_name = "DIR")]
    #[clap(default_value = "app/src/main/res")]
    pub res_root: PathBuf,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "thumb-size")]
    #[clap(value_name = "PX")]
    #[clap(help = "Pixel size of the intermediate thumbnail rendered from the vector")]
    #[clap(default_value = "200")]
    #[arg(value_parser = size_in_range)]
    pub thumb_size: u32,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "rasterizer")]
    #[clap(value_name = "TOOL")]
    #[clap(help = "Rasterizer program (qlmanage argument conventions)")]
    #[clap(default_value = "qlmanage")]
    #[arg(value_parser = check_tool_nonempty)]
    pub rasterizer: String,

    #[clap(help_heading("Advanced"))]
    #[clap(long = "resizer")]
    #[clap(value_name = "TOOL")]
    #[clap(help = "Resizer program (sips argument conventions)")]
    #[clap(default_value = "sips")]
    #[arg(value_parser = check_tool_nonempty)]
    pub resizer: String,
}

pub fn init_verbose(args: &Cli) {
    // Progress lines are the tool's primary console output, so Info is on
    // by default.
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn size_in_range(s: &str) -> Result<u32> {
    let size: u32 = s
        .parse()
        .map_err(|_| format!("`{}` is not a valid pixel size", s))?;
    if size >= 1 {
        Ok(size)
    } else {
        Err("Pixel size must be at least 1".into())
    }
}

fn check_tool_nonempty(s: &str) -> Result<String> {
    if s.trim().is_empty() {
        Err("Tool name cannot be an empty string".to_string())
    } else {
        Ok(s.to_string())
    }
}
