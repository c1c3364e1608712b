use super::Parser;

/// Friend-relationship service.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Path to a settings file; defaults to `settings/dev.toml` in debug builds
    /// and `settings/release.toml` otherwise.
    #[arg(long)]
    pub settings: Option<String>,
}
