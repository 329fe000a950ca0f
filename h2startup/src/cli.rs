use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use startup_gen::{Config, OutputFormat};
use crate::error::CliError;

/// Generate the startup module of a Cortex-M microcontroller from its device header.
///
/// Produces startup_<mcuname>.c containing the complete startup module, with exception
/// vectors named after the interrupt enumeration of <mcuname>.h.
#[derive(Debug, Parser)]
#[command(name = "h2startup", version, arg_required_else_help = true)]
pub struct Cli {
    /// Define names for unused NVIC interrupts
    #[arg(short = 'i')]
    pub unused_names: bool,

    /// Define the table with <IRQN> IRQ vectors, up to <IRQN>-1
    #[arg(short = 'n', value_name = "IRQN", value_parser = clap::value_parser!(u16).range(0..=496))]
    pub vectors: Option<u16>,

    /// Use short standard names for core exception handlers
    #[arg(short = 's')]
    pub short_names: bool,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::C)]
    pub format: Format,

    /// Directory the module is written to
    #[arg(short = 'o', long = "out-dir", value_name = "DIR", default_value = ".")]
    pub out_dir: PathBuf,

    /// MCU header file, <mcuname>.h
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    C,
    Rust,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> OutputFormat {
        match format {
            Format::C => OutputFormat::C,
            Format::Rust => OutputFormat::Rust,
        }
    }
}

impl Cli {
    pub fn config(&self) -> Result<Config, CliError> {
        let config = Config::default()
            .emit_unused(self.unused_names)
            .short_core_names(self.short_names);
        match self.vectors {
            Some(count) => Ok(config.requested_vectors(count)?),
            None => Ok(config),
        }
    }
}
