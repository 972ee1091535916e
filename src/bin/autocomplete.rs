//! # Place Autocomplete CLI
//!
//! ## Purpose
//! One-shot query tool: loads the dataset, builds a throwaway index, and
//! prints ranked suggestions for a prefix. Useful for inspecting the
//! dataset and the ranking without starting the server.

use anyhow::Context;
use clap::{Arg, Command};
use place_suggest::ingestion::load_dataset;
use place_suggest::{rank, PrefixIndex, RelativeLengthScorer};

fn main() -> anyhow::Result<()> {
    let args = Command::new("place-autocomplete")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Query the place dataset from the command line")
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("FILE")
                .help("Path to the TSV dataset")
                .default_value("data/cities_canada-usa.tsv"),
        )
        .arg(
            Arg::new("limit")
                .short('l')
                .long("limit")
                .value_name("N")
                .help("Maximum number of results, 0 for unlimited")
                .value_parser(clap::value_parser!(usize))
                .default_value("10"),
        )
        .arg(
            Arg::new("query")
                .value_name("PREFIX")
                .help("Name prefix to complete")
                .required(true),
        )
        .get_matches();

    let data_path = args.get_one::<String>("data").unwrap();
    let limit = *args.get_one::<usize>("limit").unwrap();
    let query = args.get_one::<String>("query").unwrap();

    let records = load_dataset(data_path)
        .with_context(|| format!("failed to load dataset {}", data_path))?;

    let mut index = PrefixIndex::new();
    for record in records {
        let name = record.name.clone();
        index.insert(&name, record);
    }

    let limit = (limit > 0).then_some(limit);
    let matches = index.find_matches(query, limit);
    for suggestion in rank(matches, &RelativeLengthScorer::new(query), limit) {
        println!("{:.6}  {}", suggestion.score, suggestion.name);
    }

    Ok(())
}
