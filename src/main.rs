use clap::Parser;
use std::path::Path;
use tracing::info;

use hdr2sdr::{
    cli::{confirm_organize, CliArgs},
    config::Config,
    convert::BatchConverter,
    organize::{render_tree, PrefixOrganizer},
    utils::{setup_logging, CancelSignal, Error, JobPaths, Result},
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    args.validate()?;

    let mut config = Config::load_with_fallback(args.config.as_deref())?;
    config.apply_overrides(args.overrides());
    config.validate()?;

    setup_logging(
        &config.logging.level,
        config.logging.show_timestamps,
        config.logging.colored_output,
    )?;

    if !args.organize_only {
        let paths = JobPaths::resolve(&config.paths.input, &config.paths.output)?;
        let (cancel, interrupts) = CancelSignal::ctrl_c();
        let converted = BatchConverter::new(&config, cancel)
            .with_dry_run(args.dry_run)
            .convert(&paths)
            .await;
        drop(interrupts);
        converted?;

        if args.dry_run {
            return Ok(());
        }
    }

    let organize = match config.organize.auto {
        Some(auto) => auto,
        None => confirm_organize()?,
    };

    if organize {
        let output_dir = std::path::absolute(&config.paths.output)?;
        handle_organizing(&config, &output_dir)?;
    }

    Ok(())
}

fn handle_organizing(config: &Config, output_dir: &Path) -> Result<()> {
    if !output_dir.is_dir() {
        return Err(Error::directory_not_found(output_dir));
    }

    info!("Files before organizing:");
    log_tree(output_dir)?;

    PrefixOrganizer::from_config(&config.organize).organize(output_dir)?;

    info!("Files after organizing:");
    log_tree(output_dir)
}

fn log_tree(dir: &Path) -> Result<()> {
    for line in render_tree(dir)?.lines() {
        info!("  {}", line);
    }
    Ok(())
}
