mod builtins;
mod config;
mod histfile;
mod history;
mod launcher;
mod parser;
mod repl;
mod signals;
mod util;

use anyhow::Context;

use crate::config::ShellConfig;
use crate::histfile::HistoryFile;
use crate::history::HistoryStore;
use crate::launcher::ForkLauncher;
use crate::repl::{EditorReader, Shell};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // The shell always exits 0; start-up failures are only reported.
    if let Err(err) = run() {
        log::error!("{:#}", err);
        eprintln!("frank-shell: {:#}", err);
    }
}

fn run() -> anyhow::Result<()> {
    if let Err(errno) = signals::ignore_interrupts() {
        log::warn!("could not install interrupt handlers: {}", errno);
    }

    let config = ShellConfig::from_env();
    let file = HistoryFile::new(config.history_path.clone());
    let (history, load_error) = HistoryStore::load(file.clone(), config.history_size);
    log::info!(
        "history {} holds {} of {} entries",
        file.path().display(),
        history.len(),
        history.capacity()
    );

    let reader = EditorReader::new().context("failed to start the line editor")?;
    let mut shell = Shell::new(config, reader, ForkLauncher, history, std::io::stdout());
    if let Some(err) = load_error {
        shell.report_load_error(&err);
    }
    shell.run()?;
    Ok(())
}
