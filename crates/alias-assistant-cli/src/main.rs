#[macro_use]
extern crate log;

mod icons;
mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use env_logger::Env;

#[derive(Parser)]
#[clap(version, about = "Alias Assistant build utilities")]
struct Opts {
    /// Project root containing package.json, logo.png and src-tauri/
    #[clap(short, long, default_value = "./")]
    root: PathBuf,
    #[clap(subcommand)]
    subcmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Regenerate every icon under src-tauri/icons from logo.png
    GenerateIcons,
    /// Copy the package.json version into the Tauri manifests
    SyncVersion,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let opts: Opts = Opts::parse();

    match opts.subcmd {
        Command::GenerateIcons => icons::generate_icons(&opts.root)?,
        Command::SyncVersion => {
            let version = sync::sync_version(&opts.root)?;
            info!("version {} synced", version);
        }
    }

    Ok(())
}
