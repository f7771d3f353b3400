use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use id3_tree::{DecisionTree, read_table};

#[derive(Parser, Debug)]
#[command(
    name = "id3-tree",
    version,
    about = "Induce an ID3 decision tree from a delimited table."
)]
struct Cli {
    /// Table whose first column is the class label.
    #[arg(long, short = 'i', value_name = "FILE", env = "ID3_INPUT")]
    input: PathBuf,

    /// Treat the first row as data instead of column names.
    #[arg(long)]
    no_header: bool,

    #[arg(long, short = 'd', default_value_t = ',')]
    delimiter: char,

    /// Print the tree as JSON instead of indented text.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let table = read_table(&args.input, args.delimiter, !args.no_header)
        .with_context(|| format!("Failed to load table from {}", args.input.display()))?;
    info!(
        "loaded {} entries with classes {:?}",
        table.entries.len(),
        table.entries.classes()
    );

    let tree = DecisionTree::build(&table.entries, &table.attribute_names)
        .context("Failed to build decision tree")?;

    if args.json {
        println!("{}", tree.to_json()?);
    } else {
        print!("{tree}");
    }
    Ok(())
}
