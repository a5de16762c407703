mod bootstrap;
mod session;

use anyhow::Result;
use bikeshare_core::settings::Settings;
use bikeshare_ui::prompt::Prompter;

use session::{Presets, Session};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("bikeshare v{} starting", env!("CARGO_PKG_VERSION"));

    let cwd = std::env::current_dir()?;
    let data_dir = bootstrap::resolve_data_dir(settings.data_dir.as_deref(), &cwd)?;
    tracing::info!("Reading city data from {}", data_dir.display());

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let prompter = Prompter::new(stdin.lock(), stdout.lock());

    let presets = Presets {
        city: settings.city,
        month: settings.month,
        day: settings.day,
    };

    Session::new(prompter, data_dir, settings.page_size())
        .with_presets(presets)
        .run()?;

    Ok(())
}
