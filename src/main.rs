use std::path::Path;
use std::process;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};

use clap::Parser;

use crate::cli::{Cli, Command};
use crate::configuration::{load_config, ConfigReadError, SamplerConfig};
use crate::log::log;
use crate::source::DirectorySource;
use crate::validator::{ValidateError, Validator};

mod cli;
mod configuration;
mod enumeration;
mod grammar;
mod log;
mod membership;
mod source;
mod validator;

const DEFAULT_CONFIG: &str = "sampler.toml";

fn read_config(explicit: Option<&Path>) -> Result<SamplerConfig, ConfigReadError> {
    match explicit {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG).exists() => load_config(DEFAULT_CONFIG),
        None => Ok(SamplerConfig::default()),
    }
}

fn not_found(e: ValidateError) -> ! {
    eprintln!("{e}");
    process::exit(exitcode::NOINPUT)
}

fn main() {
    let cli = Cli::parse();

    let config = match read_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e @ ConfigReadError::ReadError(_)) => {
            eprintln!("{e}");
            process::exit(exitcode::IOERR)
        }
        Err(e) => {
            eprintln!("{e}");
            process::exit(exitcode::CONFIG)
        }
    };

    log::set_level(config.log.level);

    // validated while loading the config
    let time_limit = config.enumeration.time_limit().unwrap_or_default();

    let interrupted = Arc::new(AtomicBool::new(false));
    {
        let interrupted = interrupted.clone();
        if let Err(e) = ctrlc::set_handler(move || interrupted.store(true, Ordering::SeqCst)) {
            log!(Warn, "could not install interrupt handler: {e}");
        }
    }

    let validator = Validator::new(DirectorySource::new(&config.source.directory))
        .with_interrupt(interrupted)
        .with_time_limit(time_limit);

    match cli.command {
        Command::Message => println!("{}", validator.message()),

        Command::Validate { id, word, bounds } => {
            let report = match validator.validate(&id, word.as_deref(), bounds.over(config.bounds)) {
                Ok(report) => report,
                Err(e) => not_found(e),
            };

            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("failed to serialize report: {e}");
                    process::exit(exitcode::SOFTWARE)
                }
            }
        }

        Command::Generate { id, bounds } => {
            let (_, enumeration) = match validator.generate(&id, bounds.over(config.bounds)) {
                Ok(generated) => generated,
                Err(e) => not_found(e),
            };

            for word in enumeration.words.iter() {
                println!("{word}");
            }
        }
    }
}
