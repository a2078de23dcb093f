use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;

use keyed_presort::id_policy::IdPolicy;
use keyed_presort::key_mode::KeyMode;
use keyed_presort::presort::Presort;

#[derive(Parser)]
#[command(name = "presort")]
#[command(about = "Sort, merge and deduplicate id,a,b,updated_at record files by primary key")]
struct Cli {
    #[command(flatten)]
    options: Options,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct Options {
    #[arg(long, global = true, help = "Use id 0 for lines with an invalid id instead of failing")]
    lenient_ids: bool,

    #[arg(long, global = true, help = "Maximum number of records held in memory by sort and sortmerge")]
    capacity: Option<usize>,

    #[arg(long, global = true, default_value = "warn", help = "Log level: off, error, warn, info, debug, trace")]
    log_level: LevelFilter,
}

#[derive(Subcommand)]
enum Command {
    /// Merge two files sorted by key, keeping the latest version of each key
    Merge {
        input1: PathBuf,
        input2: PathBuf,
        output: PathBuf,
        #[arg(help = "id, id_a or id_a_b")]
        key_mode: KeyMode,
    },
    /// Sort a file by key in memory, keeping every record
    Sort {
        input: PathBuf,
        output: PathBuf,
        #[arg(help = "id, id_a or id_a_b")]
        key_mode: KeyMode,
    },
    /// Sort two files together in memory, keeping the earliest version of each key
    Sortmerge {
        input1: PathBuf,
        input2: PathBuf,
        output: PathBuf,
        #[arg(help = "id, id_a, id_a_b or id_b_a")]
        key_mode: KeyMode,
    },
    /// Report whether the inputs are sorted by key
    Check {
        key_mode: KeyMode,
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },
    /// Print the key mode matching a CREATE TABLE statement
    DetectKey {
        ddl: PathBuf,
    },
}

impl Options {
    fn apply(&self, presort: &mut Presort, key_mode: KeyMode) {
        presort.with_key_mode(key_mode);
        if self.lenient_ids {
            presort.with_id_policy(IdPolicy::Zero);
        }
        if let Some(capacity) = self.capacity {
            presort.with_capacity(capacity);
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    SimpleLogger::new()
        .with_level(cli.options.log_level)
        .init()?;

    match cli.command {
        Command::Merge { input1, input2, output, key_mode } => {
            let mut presort = Presort::new(vec![input1, input2], output);
            cli.options.apply(&mut presort, key_mode);
            println!("{}", presort.merge()?);
        }
        Command::Sort { input, output, key_mode } => {
            let mut presort = Presort::new(vec![input], output);
            cli.options.apply(&mut presort, key_mode);
            println!("{}", presort.sort()?);
        }
        Command::Sortmerge { input1, input2, output, key_mode } => {
            let mut presort = Presort::new(vec![input1, input2], output);
            cli.options.apply(&mut presort, key_mode);
            println!("{}", presort.sort_merge()?);
        }
        Command::Check { key_mode, inputs } => {
            let mut presort = Presort::new(inputs, PathBuf::new());
            cli.options.apply(&mut presort, key_mode);
            let sorted = presort.check()?;
            println!("{}", if sorted { "sorted" } else { "not sorted" });
            if !sorted {
                std::process::exit(1);
            }
        }
        Command::DetectKey { ddl } => {
            let sql = fs::read_to_string(&ddl)
                .with_context(|| format!("path: {}", ddl.display()))?;
            println!("{}", KeyMode::detect(&sql));
        }
    }
    Ok(())
}
