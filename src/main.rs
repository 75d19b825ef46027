use anyhow::Context;
use language_fixer::{app, config, utils::tracing::init_tracing};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cfg = match config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = ?e, "failed to load config, using defaults");
            config::Config::default()
        }
    };

    app::run(&cfg).context("language fixer stopped")
}
