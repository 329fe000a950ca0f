//! Startup module generation.
//!
//! Both output formats share the [`VectorPlan`]: which handler every vector of the table points
//! at, and which handlers must be declared with a default fallback.

use std::fmt;
use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::slot::Slot;
use crate::table::ResolvedTable;

pub mod c;
pub mod casing;
pub mod layout;
pub mod rust;

/// File name prefix of every generated module.
pub const OUTPUT_PREFIX: &str = "startup_";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// gcc-arm compatible C source.
    C,
    /// Rust module plus a linker script fragment.
    Rust,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::C => "c",
            OutputFormat::Rust => "rs",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::C => "C",
            OutputFormat::Rust => "Rust",
        }
    }
}

impl Default for OutputFormat {
    fn default() -> OutputFormat {
        OutputFormat::C
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    pub file_name: String,
    pub contents: String,
}

/// Base name (without extension) of the module generated from `input`: `startup_<stem>`.
pub fn output_stem<P: AsRef<Path>>(input: P) -> String {
    let stem = input
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{}{}", OUTPUT_PREFIX, stem)
}

/// Name of the handler a vector points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerName<'a> {
    /// Base name taken from the header.
    Vendor(&'a str),
    /// CMSIS short base name of a core exception.
    Standard(&'static str),
    /// Stand-in for an NVIC slot the header leaves unnamed.
    Placeholder(u16),
}

impl<'a> HandlerName<'a> {
    pub fn is_placeholder(&self) -> bool {
        match self {
            HandlerName::Placeholder(..) => true,
            _ => false,
        }
    }
}

impl<'a> fmt::Display for HandlerName<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HandlerName::Vendor(base) | HandlerName::Standard(base) => write!(f, "{}Handler", base),
            HandlerName::Placeholder(index) => write!(f, "IRQ{}_IRQHandler", index),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoreVector<'a> {
    pub slot: Slot,
    pub handler: HandlerName<'a>,
}

/// Everything a backend needs to write one startup module.
#[derive(Debug, Clone)]
pub struct VectorPlan<'a> {
    /// Source header name, as shown in the generated heading.
    pub source_name: String,
    /// Output base name, `startup_<stem>`.
    pub stem: String,
    /// Named core exceptions in slot order.
    pub core: Vec<CoreVector<'a>>,
    /// One entry per emitted NVIC vector; `None` leaves the vector zero.
    pub nvic: Vec<Option<HandlerName<'a>>>,
    /// Heading lines describing the active options.
    pub notes: Vec<String>,
}

impl<'a> VectorPlan<'a> {
    pub fn new(resolved: &'a ResolvedTable, config: &Config, source_name: &str) -> VectorPlan<'a> {
        let core = resolved
            .core_names()
            .map(|(slot, name)| {
                let handler = match slot.standard_name() {
                    Some(short) if config.short_core_names => HandlerName::Standard(short),
                    _ => HandlerName::Vendor(name),
                };
                CoreVector { slot, handler }
            })
            .collect();
        let nvic = resolved
            .nvic_range()
            .map(|index| match resolved.nvic_name(index) {
                Some(name) => Some(HandlerName::Vendor(name)),
                None if config.emit_unused => Some(HandlerName::Placeholder(index)),
                None => None,
            })
            .collect();
        VectorPlan {
            source_name: source_name.to_string(),
            stem: output_stem(source_name),
            core,
            nvic,
            notes: notes(resolved, config),
        }
    }

    /// Handlers to declare with a default fallback, in slot order.
    pub fn declarations(&self) -> impl Iterator<Item = HandlerName<'a>> + '_ {
        self.core
            .iter()
            .map(|v| v.handler)
            .chain(self.nvic.iter().filter_map(|h| *h))
    }

    /// NVIC entries that have a handler, with their index.
    pub fn nvic_entries(&self) -> impl Iterator<Item = (u16, HandlerName<'a>)> + '_ {
        self.nvic
            .iter()
            .enumerate()
            .filter_map(|(index, h)| h.map(|h| (index as u16, h)))
    }

    /// Width of the printed NVIC index.
    pub fn index_width(&self) -> usize {
        if self.nvic.len() > 100 { 3 } else { 2 }
    }
}

fn notes(resolved: &ResolvedTable, config: &Config) -> Vec<String> {
    let mut notes = Vec::new();
    if config.short_core_names {
        notes.push("Standard short core exception names.".to_string());
    }
    match resolved.requested_vectors() {
        Some(count) if count != resolved.mcu_vectors() => notes.push(format!(
            "{} NVIC IRQ vectors (MCU defines {}).",
            count,
            resolved.mcu_vectors()
        )),
        _ => {},
    }
    if config.emit_unused {
        notes.push("Unused vector names defined.".to_string());
    }
    notes
}

/// A startup module writer for one output format.
pub trait StartupBuilder {
    fn build(&self, plan: &VectorPlan) -> Result<Vec<OutputFile>>;
}

pub fn builder(format: OutputFormat) -> Box<dyn StartupBuilder> {
    match format {
        OutputFormat::C => Box::new(c::CStartup),
        OutputFormat::Rust => Box::new(rust::RustStartup),
    }
}
