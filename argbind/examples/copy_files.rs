//! Example demonstrating declarative argument binding
//!
//! Run with:
//!
//! ```text
//! cargo run --example copy_files -- -s src -d out -x tmp bak --mode move -v
//! cargo run --example copy_files -- /?
//! ```

use std::path::PathBuf;

use argbind::logging::{ConsoleLogger, Logger, init_logging};
use argbind::{ArgEnum, ArgumentParser, Arguments};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ArgEnum)]
enum Mode {
    #[default]
    Copy,
    Move,
    Link,
}

#[derive(Debug, Default, Arguments)]
#[arg(details = "Copies files from one directory to another")]
struct CopyOptions {
    #[arg(short = "s", long = "source", details = "Directory to copy from")]
    source: PathBuf,

    #[arg(short = "d", long = "dest", details = "Directory to copy into")]
    dest: PathBuf,

    #[arg(array, short = "x", long = "exclude", details = "Extensions to skip", optional)]
    exclude: Vec<String>,

    #[arg(short = "m", long = "mode", details = "Copy, Move or Link", default = "copy")]
    mode: Mode,

    #[arg(short = "r", long = "retries", details = "Attempts per file", default = 3)]
    retries: u32,

    #[arg(flag, short = "v", long = "verbose", details = "Log every file", optional)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging("copy_files");

    let logger = ConsoleLogger::new(Some("copy_files"));
    let mut parser = ArgumentParser::<CopyOptions>::new()?.with_logger(logger.clone());

    let Some(options) = parser.parse_env() else {
        if !parser.help_requested() {
            logger.log_message("");
        }
        parser.print_usage();
        return Ok(());
    };

    logger.log_info(&format!("{options:?}"));
    logger.log_message(&format!(
        "{:?} {} -> {} ({} attempt(s) per file)",
        options.mode,
        options.source.display(),
        options.dest.display(),
        options.retries,
    ));
    for ext in &options.exclude {
        logger.log_message(&format!("  skipping *.{ext}"));
    }
    if options.verbose {
        logger.log_success("Arguments bound");
    }
    Ok(())
}
