use std::cmp::Reverse;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tagstream::{serializable, DataStream, StreamError, StreamOptions};

#[derive(Parser)]
#[command(name = "tagstream", version, about = "Inspect and produce tagged binary streams")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the records of a persisted stream
    Dump {
        file: PathBuf,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
        /// Stream options as a JSON file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a sample aggregate and a descending set to FILE, then dump it
    Demo { file: PathBuf },
}

#[derive(Debug, Default)]
struct Pet {
    name: String,
    age: i32,
}

serializable!(Pet { name, age });

fn init_logging() {
    #[cfg(feature = "logging")]
    {
        use tracing_subscriber::EnvFilter;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

fn dump(file: PathBuf, json: bool, config: Option<PathBuf>) -> Result<(), StreamError> {
    let mut stream = DataStream::open(&file)?;
    if let Some(config) = config {
        stream.set_options(StreamOptions::from_json_file(config)?);
    }

    if json {
        let records = stream.records()?;
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        print!("{}", stream.show()?);
    }
    Ok(())
}

fn demo(file: PathBuf) -> Result<(), StreamError> {
    let pet = Pet {
        name: "kitty".to_string(),
        age: 18,
    };
    let set: BTreeSet<Reverse<i32>> = [5, 100, 0, 40, 25].into_iter().map(Reverse).collect();

    let mut stream = DataStream::new();
    stream.write(&pet)?.write(&set)?;
    stream.save(&file)?;

    let mut loaded = DataStream::open(&file)?;
    let (mut pet, mut set) = (Pet::default(), BTreeSet::<Reverse<i32>>::new());
    loaded.read_args((&mut pet, &mut set))?;
    tracing::info!(name = %pet.name, age = pet.age, elements = set.len(), "demo stream verified");

    print!("{}", loaded.show()?);
    Ok(())
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Dump { file, json, config } => dump(file, json, config),
        Command::Demo { file } => demo(file),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
