//! Implementation of `alex init`.

use std::{env, fs, process::ExitCode};

use crate::{
    cli::args::InitCommand,
    config::{CONFIG_FILENAME, CONFIG_TEMPLATE, global_config_path},
};

/// Creates an `.alex.toml` configuration file.
pub fn run(cmd: &InitCommand) -> ExitCode {
    let config_path = if cmd.global {
        match global_config_path() {
            Some(path) => path,
            None => {
                eprintln!("error: could not determine home directory");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let cwd = match env::current_dir() {
            Ok(cwd) => cwd,
            Err(e) => {
                eprintln!("error: could not determine current directory: {e}");
                return ExitCode::FAILURE;
            }
        };
        cwd.join(CONFIG_FILENAME)
    };

    if config_path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            config_path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&config_path, CONFIG_TEMPLATE) {
        eprintln!("error: failed to write {}: {e}", config_path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", config_path.display());
    ExitCode::SUCCESS
}
