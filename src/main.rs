use anyhow::Result;
use clap::Parser;
use conf_mover::{cli::Cli, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
