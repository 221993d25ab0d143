#![cfg(feature = "json_schema")]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jsonschema::{Draft, JSONSchema};
use recordview::core::loader::FileFormat;
use recordview::core::{SchemaFile, validate_columns};
use schemars::schema_for;
use std::{fs, path::PathBuf};

/// Generate the JSON Schema for column schema files or validate one against it.
#[derive(Parser, Debug)]
#[command(name = "column-schema", about = "Column schema generator and validator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the schema file JSON schema (or write it to a file)
    Schema {
        /// Optional output path for the schema JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Validate a JSON, JSON5 or YAML schema file
    Validate {
        /// Path to the schema file to validate
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema { output } => {
            let schema = schema_for!(SchemaFile);
            let json = serde_json::to_string_pretty(&schema)?;

            if let Some(path) = output {
                fs::write(&path, json)?;
                eprintln!("Wrote schema to {}", path.display());
            } else {
                println!("{json}");
            }
        }
        Command::Validate { file } => {
            let schema = schema_for!(SchemaFile);
            // jsonschema keeps a reference to the schema; leak a small boxed value to satisfy 'static.
            let schema_json = serde_json::to_value(schema)?;
            let schema_ref: &'static serde_json::Value = Box::leak(Box::new(schema_json));
            let compiled = JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(schema_ref)
                .context("failed to compile schema file JSON schema")?;

            let format = FileFormat::from_path(&file)?;
            let text = fs::read_to_string(&file).context("failed to read schema file")?;
            // Parse as a plain value first so shape errors come from the JSON schema
            let value: serde_json::Value = format
                .parse(&text)
                .context("failed to parse schema file")?;

            if let Err(errors) = compiled.validate(&value) {
                eprintln!("Validation errors for {}:", file.display());
                for err in errors {
                    eprintln!("- {} at {}", err, err.instance_path);
                }
                std::process::exit(1);
            }

            let parsed: SchemaFile =
                serde_json::from_value(value).context("failed to deserialize schema file")?;
            for warning in validate_columns(&parsed.columns) {
                eprintln!("warning: {warning}");
            }
            println!("{} is a valid schema file", file.display());
        }
    }

    Ok(())
}
