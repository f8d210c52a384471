use anyhow::Context;
use clap::Parser;
use course_catalog::app::commands;
use course_catalog::utils::error::ErrorCategory;
use course_catalog::utils::logger;
use course_catalog::{
    CatalogError, CatalogSession, CatalogSettings, CliConfig, Command, LocalSource, Menu,
};
use std::io::Write;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    let (settings, logging) = match config.resolve() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    logger::init_cli_logger(logging.verbose, logging.level.as_deref(), logging.format);

    tracing::info!("Starting course-catalog");
    tracing::debug!("Resolved settings: {:?}", settings);

    let source = LocalSource::new();
    let stdout = std::io::stdout();

    let result = match &config.command {
        None => {
            let stdin = std::io::stdin();
            let mut menu = Menu::new(
                source,
                &settings,
                stdin.lock(),
                stdout.lock(),
                std::io::stderr(),
            );
            menu.run()
        }
        Some(Command::List { json }) => load_session(&source, &settings)
            .and_then(|session| commands::list(&session, &mut stdout.lock(), *json)),
        Some(Command::Show { id, json }) => load_session(&source, &settings)
            .and_then(|session| commands::show(&session, id, &mut stdout.lock(), *json)),
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        // 查無課程: 2，其餘 (包含檔案開不了): 1
        let exit_code = match e.category() {
            ErrorCategory::Lookup => 2,
            _ => 1,
        };
        std::process::exit(exit_code);
    }

    stdout.lock().flush().context("failed to flush stdout")?;
    Ok(())
}

fn load_session(
    source: &LocalSource,
    settings: &CatalogSettings,
) -> Result<CatalogSession, CatalogError> {
    let mut session = CatalogSession::new();
    session.load(source, settings)?;

    for row in session.rejected_rows()? {
        eprintln!(
            "ERROR: Row needs at least 2 values. Row {} not read!",
            row.line
        );
    }

    Ok(session)
}
