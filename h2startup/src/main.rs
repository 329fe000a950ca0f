extern crate clap;
extern crate env_logger;
extern crate startup_gen;

mod cli;
mod error;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use log::{error, info, warn};
use std::fs;
use std::process;

use cli::Cli;
use error::CliError;

/// Exit code for unknown options and bad option arguments.
const EXIT_BAD_OPTION: i32 = 4;

fn run(cli: &Cli) -> Result<(), CliError> {
    let input = cli.input.as_ref().ok_or(CliError::NoInput)?;
    let config = cli.config()?;
    let bytes = fs::read(input).map_err(|source| CliError::InputNotFound {
        path: input.clone(),
        source,
    })?;
    let header = String::from_utf8_lossy(&bytes);
    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let generated = startup_gen::generate(&header, &source_name, &config, cli.format.into())?;
    for rejection in generated.rejected.iter() {
        error!("{}", rejection);
    }
    if !generated.found_marker {
        warn!("{} has no interrupt enumeration", input.display());
    }
    info!("{} NVIC vectors ({} defined by {})", generated.vector_count, generated.mcu_vectors, source_name);

    for file in generated.files {
        let path = cli.out_dir.join(&file.file_name);
        fs::write(&path, file.contents).map_err(|source| CliError::CannotCreate {
            path: path.clone(),
            source,
        })?;
        info!("wrote {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                let _ = Cli::command().print_help();
                process::exit(0);
            },
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                let _ = e.print();
                process::exit(EXIT_BAD_OPTION);
            },
        },
    };

    if let Err(e) = run(&cli) {
        eprintln!("{}", e);
        process::exit(e.exit_code());
    }
}
