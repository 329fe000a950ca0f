//! Cortex-M startup module generator.
//!
//! Reads the `IRQn_Type` enumeration of a vendor device header and writes a startup module
//! with a reset handler, default-bound exception handlers and the interrupt vector table.
//!
//! The work happens in three stages that each consume the previous stage's output:
//! [`scanner::scan`] builds an [`IrqTable`], [`IrqTable::resolve`] bounds it according to a
//! [`Config`], and a [`StartupBuilder`] turns the resulting [`VectorPlan`] into files.

extern crate heck;
extern crate prettyplease;
extern crate proc_macro2;
extern crate quote;
extern crate syn;

pub mod config;
pub mod error;
pub mod generator;
pub mod scanner;
pub mod slot;
pub mod table;

pub use config::{Config, SuffixRule};
pub use error::{Error, Result};
pub use generator::{OutputFile, OutputFormat, StartupBuilder, VectorPlan};
pub use scanner::{Rejection, ScanReport};
pub use table::{IrqTable, ResolvedTable};

use log::debug;

/// Result of one header-to-module run.
#[derive(Debug, Clone)]
pub struct Generated {
    pub files: Vec<OutputFile>,
    /// Enumerator lines that were recognised but not stored.
    pub rejected: Vec<Rejection>,
    /// False when the header had no interrupt enumeration.
    pub found_marker: bool,
    pub mcu_vectors: u16,
    pub vector_count: u16,
}

/// Generate the startup module for the header text `header`.
///
/// `source_name` is the header's file name; it appears in the generated heading and gives the
/// output files their `startup_<stem>` names.
pub fn generate(header: &str, source_name: &str, config: &Config, format: OutputFormat) -> Result<Generated> {
    let ScanReport { table, rejected, found_marker } = scanner::scan(header.lines(), config.suffix_rule);
    debug!("scanned {} interrupt names from {}", table.len(), source_name);
    let resolved = table.resolve(config)?;
    let plan = VectorPlan::new(&resolved, config, source_name);
    let files = generator::builder(format).build(&plan)?;
    Ok(Generated {
        files,
        rejected,
        found_marker,
        mcu_vectors: resolved.mcu_vectors(),
        vector_count: resolved.vector_count(),
    })
}
