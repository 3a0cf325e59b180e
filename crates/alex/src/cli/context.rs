//! Shared context for running CLI commands.

use std::{env, path::PathBuf, process::ExitCode};

use alex_fetch::WikipediaFetcher;
use alex_query::Dispatcher;
use alex_store::{DocumentStore, FileCollection};

use crate::config::Config;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (defaults when no config file exists).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = env::current_dir().map_err(|e| {
            eprintln!("error: could not determine current directory: {e}");
            ExitCode::FAILURE
        })?;

        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;

        Ok(Self { cwd, config })
    }

    /// Opens the document store configured for this invocation.
    pub fn open_store(&self) -> Result<DocumentStore<FileCollection>, ExitCode> {
        let collection = FileCollection::open(&self.config.store_path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        Ok(DocumentStore::new(collection))
    }

    /// Builds a dispatcher over the configured store and Wikipedia fetcher.
    pub fn dispatcher(
        &self,
    ) -> Result<Dispatcher<FileCollection, WikipediaFetcher>, ExitCode> {
        let store = self.open_store()?;
        let fetcher =
            WikipediaFetcher::new(&self.config.language, &self.config.user_agent).map_err(
                |e| {
                    eprintln!("error: could not build http client: {e}");
                    ExitCode::FAILURE
                },
            )?;
        Ok(Dispatcher::new(store, fetcher))
    }
}
