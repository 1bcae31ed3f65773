//! Assetlane CLI
//!
//! Entry point for the `assetlane` command-line tool.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use assetlane::config::{write_scaffold, WELL_KNOWN_JSON, WELL_KNOWN_TOML};
use assetlane::{
    BuiltinDefaults, ExplainOutput, LoadError, LoadedDescriptor, Matcher, ValidationMode,
};

#[derive(Parser)]
#[command(name = "assetlane")]
#[command(about = "Typed build-configuration descriptor for front-end asset pipelines", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load and validate a descriptor file
    Validate {
        /// Path to descriptor file (default: discover in current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Fail on loader names outside the recognized set
        #[arg(long)]
        strict: bool,

        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Explain which transform chain a source file receives.
    /// Exits 0 when a rule matches, 1 when none does, so scripts can
    /// branch on the result without parsing output.
    Explain {
        /// Path to descriptor file (default: discover in current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Which configuration in the descriptor set to consult
        #[arg(long, default_value_t = 0)]
        config_index: usize,

        /// Report every matching rule, not just the winner
        #[arg(long)]
        all: bool,

        /// Output in human-readable format instead of JSON
        #[arg(long)]
        human: bool,

        /// The source-file path to look up
        path: String,
    },

    /// Print the loaded descriptor with provenance as pretty JSON
    Show {
        /// Path to descriptor file (default: discover in current directory)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,
    },

    /// Write the built-in default descriptor to the well-known file name
    Init {
        /// Write TOML instead of JSON
        #[arg(long)]
        toml: bool,

        /// Overwrite an existing descriptor file
        #[arg(long)]
        force: bool,

        /// Target directory (default: current directory)
        dir: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Validate {
            config,
            strict,
            json,
        } => {
            run_validate(config, strict, json);
        }
        Commands::Explain {
            config,
            config_index,
            all,
            human,
            path,
        } => {
            run_explain(config, config_index, all, human, &path);
        }
        Commands::Show { config } => {
            run_show(config);
        }
        Commands::Init { toml, force, dir } => {
            run_init(toml, force, dir);
        }
    }
}

fn run_validate(config_path: Option<PathBuf>, strict: bool, json: bool) {
    let loaded = load_descriptor(config_path);

    let mode = if strict {
        ValidationMode::Strict
    } else {
        ValidationMode::Lenient
    };

    // from_file already validated leniently; strict re-checks loader names
    let result = loaded.validate(mode);

    if json {
        let output = serde_json::json!({
            "path": loaded.source.path,
            "digest": loaded.source.digest,
            "strict": strict,
            "valid": result.is_ok(),
            "error": result.as_ref().err().map(|e| e.to_string()),
        });
        match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    } else {
        match &result {
            Ok(()) => {
                println!("Descriptor valid: {}", loaded.source.path);
                println!();
                for (index, config) in loaded.descriptor.configs.iter().enumerate() {
                    println!("  Config {}:", index);
                    println!("    Entries: {}", config.entries.join(", "));
                    println!("    Output: {}", config.output.filename);
                    println!("    Rules: {}", config.rules.len());
                }
            }
            Err(e) => eprintln!("Descriptor error: {}", e),
        }
    }

    if result.is_err() {
        process::exit(1);
    }
}

fn run_explain(
    config_path: Option<PathBuf>,
    config_index: usize,
    all: bool,
    human: bool,
    path: &str,
) {
    let loaded = load_descriptor(config_path);

    let config = match loaded.descriptor.configs.get(config_index) {
        Some(config) => config,
        None => {
            eprintln!(
                "No config at index {} (descriptor has {})",
                config_index,
                loaded.descriptor.configs.len()
            );
            process::exit(1);
        }
    };

    let matcher = match Matcher::new(config, config_index) {
        Ok(matcher) => matcher,
        Err(e) => {
            eprintln!("Error compiling rules: {}", e);
            process::exit(1);
        }
    };

    let explanation = ExplainOutput::from_lookup(&matcher, path, config_index, all);

    if human {
        println!("{}", explanation.to_human());
    } else {
        match explanation.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing output: {}", e);
                process::exit(1);
            }
        }
    }

    if !explanation.matched {
        process::exit(1);
    }
}

fn run_show(config_path: Option<PathBuf>) {
    let loaded = load_descriptor(config_path);

    match loaded.to_json() {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing output: {}", e);
            process::exit(1);
        }
    }
}

fn run_init(toml: bool, force: bool, dir: Option<PathBuf>) {
    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    let name = if toml { WELL_KNOWN_TOML } else { WELL_KNOWN_JSON };
    let path = dir.join(name);

    let set = BuiltinDefaults::default().to_descriptor_set();

    match write_scaffold(&set, &path, force) {
        Ok(()) => println!("Wrote {}", path.display()),
        Err(e) => {
            eprintln!("Error writing descriptor: {}", e);
            process::exit(1);
        }
    }
}

fn load_descriptor(config_path: Option<PathBuf>) -> LoadedDescriptor {
    let result = match config_path {
        Some(path) => LoadedDescriptor::from_file(&path),
        None => LoadedDescriptor::discover(Path::new(".")),
    };

    match result {
        Ok(loaded) => loaded,
        Err(e @ LoadError::NotDiscovered { .. }) => {
            eprintln!("{}", e);
            eprintln!("Run 'assetlane init' to scaffold a default descriptor.");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error loading descriptor: {}", e);
            process::exit(1);
        }
    }
}
