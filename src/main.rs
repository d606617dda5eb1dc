use clap::Parser;
use log::LevelFilter;
use thumbnailer::{generate, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    let request = cli.request();
    log::debug!(
        "Generating thumbnails for {} ({:?}) into {:?} storage",
        request.path.display(),
        request.kind,
        request.storage
    );

    let outcome = generate(&request, &cli.options())?;

    if outcome.failed > 0 {
        log::warn!("{} of {} thumbnails failed", outcome.failed, outcome.total);
    }

    Ok(())
}
