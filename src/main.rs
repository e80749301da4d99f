//! Layout Graph CLI
//!
//! Usage:
//!   layout-graph [OPTIONS] [FILE]
//!
//! Options:
//!   -c, --config <FILE>            Engine configuration (TOML format)
//!   -o, --orientation <ROW|COLUMN> Configuration constraints are resolved against
//!       --constraint <TEXT>        Extra constraint, may be repeated
//!       --json                     Print the resolved document as JSON
//!   -v, --verbose...               Raise the log level
//!   -h, --help                     Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use layout_graph::{
    layout::{track_list, GridConfiguration},
    load, EngineConfig, Error, LayoutDocument, LayoutGraph, Orientation,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OrientationArg {
    Row,
    Column,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Row => Orientation::Row,
            OrientationArg::Column => Orientation::Column,
        }
    }
}

#[derive(Parser)]
#[command(name = "layout-graph")]
#[command(about = "Grid inference, size limits and constraint resolution for rectangle layouts")]
struct Cli {
    /// Layout document (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Engine configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Configuration the constraints are resolved against
    #[arg(short, long, value_enum, default_value_t = OrientationArg::Row)]
    orientation: OrientationArg,

    /// Additional constraint, applied after the document's own
    #[arg(long = "constraint", value_name = "TEXT")]
    constraints: Vec<String>,

    /// Print the resolved document as JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    // Load engine configuration
    let config = match &cli.config {
        Some(path) => match EngineConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading configuration '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => EngineConfig::default(),
    };

    // Read input
    let source = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => buffer,
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut doc = match LayoutDocument::from_str(&source) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    doc.constraints.extend(cli.constraints.iter().cloned());

    if let Err(e) = run(&cli, &doc, &config) {
        if let Error::Parse { index, source } = &e {
            let text: String = doc
                .constraints
                .get(*index)
                .map(|c| c.chars().filter(|c| !c.is_whitespace()).collect())
                .unwrap_or_default();
            eprint!("{}", source.format(&text, &format!("constraint {}", index)));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli, doc: &LayoutDocument, config: &EngineConfig) -> Result<(), Error> {
    let orientation = Orientation::from(cli.orientation);
    let constraints = doc.parse_constraints()?;
    let graph = load(doc, config);

    if cli.json {
        let resolved = if constraints.is_empty() {
            doc.clone()
        } else {
            let resolution = graph.resolve(orientation, &constraints)?;
            LayoutDocument::new(resolution.apply_to(&doc.layout), doc.constraints.clone())
        };
        println!("{}", resolved.to_json()?);
        return Ok(());
    }

    print_report(&graph);
    if !constraints.is_empty() {
        let resolution = graph.resolve(orientation, &constraints)?;
        println!("\nResolved {} configuration:", orientation);
        print_configuration(resolution.configuration());
        println!("\nSizing:");
        for tokens in resolution.sizing() {
            println!("  {}", track_list(tokens));
        }
    }
    Ok(())
}

fn print_report(graph: &LayoutGraph) {
    let boundary = graph.boundary();
    println!(
        "{} rectangles, boundary {} x {}",
        graph.rectangles().len(),
        boundary.width,
        boundary.height
    );
    println!("Limits: {}", graph.limits());

    let sections = [
        ("Rows", graph.row_configuration()),
        ("Columns", graph.column_configuration()),
        ("Resized rows", graph.resized_rows()),
        ("Resized columns", graph.resized_columns()),
    ];
    for (title, configuration) in sections {
        if configuration.is_empty() {
            continue;
        }
        println!("\n{}:", title);
        print_configuration(configuration);
    }
}

fn print_configuration(configuration: &GridConfiguration) {
    for sequence in configuration {
        let cells: Vec<String> = sequence
            .iter()
            .map(|r| format!("{} {}x{}@{},{}", r.name, r.width, r.height, r.left, r.top))
            .collect();
        println!("  {}", cells.join("  "));
    }
}
