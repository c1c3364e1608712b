use amity::logger::*;
use amity::settings::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    // $ cargo run --bin logger_demo -- --settings=settings/dev.toml
    let cli = Cli::parse();
    let project_settings = parse_settings(cli.settings.as_deref())?;
    logger.reload_from_settings(&project_settings.log)?;
    info!(filter = %project_settings.log.filter, "filter reloaded");
    trace!(target: "amity::demo", "application trace log");
    debug!(target: "amity::demo", "application debug log");
    info!(target: "amity::demo", "application info log");

    logger.reload("warn")?;
    info!("hidden after reload to warn");
    warn!("still visible");

    Ok(())
}
