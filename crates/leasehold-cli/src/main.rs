//! Leasehold CLI entry point.

use clap::Parser;
use leasehold_cli::{app, run, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let ctx = app::Context::load(cli.config.as_deref())?;
    app::init_logging(&ctx.logging(), cli.verbose);

    run(cli, ctx).await
}
