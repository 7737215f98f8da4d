use anyhow::Context as _;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = chartreel::RevealConfig::default();
    let mut reel = chartreel::Reel::new(config).context("failed to plan the chart reveal")?;
    let stats = chartreel::render_to_gif(&mut reel, |event| println!("{event}"))
        .context("failed to render the chart reveal")?;
    tracing::debug!(frames = stats.frames_total, out = %stats.out_path.display(), "done");
    Ok(())
}
