use anyhow::Result;
use goto_language_server::cli::run_check;
use goto_language_server::config::{Config, Mode};
use goto_language_server::lsp::server::serve;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.config_path {
        log::info!("using configuration from {}", path.display());
    }

    match &config.mode {
        Mode::Serve => serve(&config).await,
        Mode::Check { files, output } => {
            if !run_check(&config, files, output.as_deref())? {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}
