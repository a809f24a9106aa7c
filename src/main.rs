use std::{cell::RefCell, process::ExitCode, rc::Rc};

use clap::Parser;
use log::{error, info};

use notekeep::{App, Cli, Config, FileStore, NoteStore, Result, SharedStore};

fn initialize_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config)?;
    if let Some(data_file) = cli.data_file {
        config.data_file = data_file;
    }
    info!("Using store file {}", config.data_file.display());

    let store: SharedStore = Rc::new(RefCell::new(FileStore::open(&config.data_file)?));
    let notes = NoteStore::open(Rc::clone(&store));

    let mut app = App::new(notes, store, config);
    app.run(cli.command)
}
