use anyhow::Result;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Environment variable that makes the server exit on its own, for integration tests
pub const TEST_EXIT_ENV: &str = "GOTO_LS_TEST_EXIT";

/// Start the LSP server on stdio
pub async fn serve(config: &Config) -> Result<()> {
    log::info!(
        "starting goto-ls {} (log level {})",
        env!("CARGO_PKG_VERSION"),
        config.log_level
    );

    // Let integration tests read stdout to EOF
    if std::env::var(TEST_EXIT_ENV).as_deref() == Ok("1") {
        tokio::spawn(async {
            tokio::time::sleep(Duration::from_secs(3)).await;
            std::process::exit(0);
        });
    }

    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin(), stdout(), socket).serve(service).await;

    log::info!("goto-ls stopped");
    Ok(())
}
