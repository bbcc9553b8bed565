use std::path::PathBuf;

use rackplan::{demo_sheet, init_logging, load_config, preview, Size, BUILD_DATE, VERSION};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;
    tracing::info!("Rackplan {} (built {})", VERSION, BUILD_DATE);

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = load_config(config_path.as_deref())?;

    let summary = preview(config, demo_sheet()?, Size::new(1280.0, 800.0))?;
    for (kind, count) in &summary.by_kind {
        tracing::info!("{:>14}: {}", kind, count);
    }
    tracing::info!(
        "{} geometries, {} draw commands",
        summary.geometries,
        summary.commands
    );

    Ok(())
}
