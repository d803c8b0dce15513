use bahth::config::{self, AppConfig};
use bahth::controller::Controller;
use bahth::navigator::SystemNavigator;
use bahth::repl;
use bahth::storage::SqliteStorage;
use bahth::view::TerminalView;
use bahth::voice::{CommandRecognizer, SpeechRecognizer};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting {} v{}", config::APP_NAME, config::APP_VERSION);

    match start() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn start() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let storage = SqliteStorage::open(&config.data_dir()?)?;
    let navigator = SystemNavigator::new(config.opener());

    let recognizer = config
        .voice_command
        .as_deref()
        .and_then(CommandRecognizer::new)
        .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>);
    if recognizer.is_none() {
        log::info!("No voice_command configured, voice search unavailable");
    }

    let stdin = std::io::stdin();
    let view = TerminalView::new(stdin.lock(), std::io::stdout());
    let mut controller = Controller::new(storage, view, navigator, recognizer);
    repl::run(&mut controller);
    Ok(())
}
