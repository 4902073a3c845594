use clap::{Parser, Subcommand};
use std::io::Read;

use crate::error::Result;
use crate::strategy::Analyzer;

#[derive(Parser)]
#[command(name = "betfoot")]
#[command(author = "BetFoot Team")]
#[command(version)]
#[command(about = "Football fair-odds pricing and fractional-Kelly staking", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config directory
    #[arg(short, long, default_value = "config", env = "BETFOOT_CONFIG_DIR")]
    pub config: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen host (overrides config)
        #[arg(long)]
        host: Option<String>,
        /// Listen port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Analyze one match description and print the result as JSON
    Analyze {
        /// Match text; read from stdin when omitted
        text: Option<String>,
    },
}

/// Run a single analysis and print the result and any executed trade
pub fn run_analyze(analyzer: &Analyzer, text: Option<&str>) -> Result<()> {
    let text = match text {
        Some(t) => t.to_string(),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let analysis = analyzer.analyze(&text)?;
    println!("{}", serde_json::to_string_pretty(&analysis)?);

    if let Some(trade) = analyzer.trades()?.last() {
        println!("{}", serde_json::to_string_pretty(trade)?);
    }
    Ok(())
}
