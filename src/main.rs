//! CLI entry point for the polyform exact-cover search

use clap::Parser;
use polycover::io::cli::{Cli, CoverRunner};

fn main() -> polycover::Result<()> {
    let cli = Cli::parse();
    let mut runner = CoverRunner::new(cli);
    runner.run()?;
    Ok(())
}
