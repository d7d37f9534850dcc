//! Minimal CLI: descriptor set → (schema documents | enum table)
use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::{Args, Parser, Subcommand};
use indexmap::IndexMap;

use crate::convert::{ConvertOptions, Converter};
use crate::descriptor::{FileDescriptor, FileDescriptorSet};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

/// translate compiled protobuf descriptor sets (protoc JSON output) into
/// JSON Schema documents
#[derive(Parser, Debug)]
pub struct CommandLineInterface {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// emit one JSON Schema document per top-level message
    Schema(SchemaOut),
    /// dump the resolved enum symbol table
    Enums(EnumsOut),
}

#[derive(Args, Debug, Clone)]
struct InputSettings {
    /// One or more descriptor-set JSON files. May be literal paths or quoted
    /// glob patterns
    #[arg(long, short, num_args = 1.., required = true)]
    input: Vec<String>,
}

#[derive(clap::Parser, Debug)]
struct SchemaOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// output directory for <Message>.jsonschema files (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// shape singular fields as oneOf [null, T]
    #[arg(long, default_value_t = false)]
    allow_null_values: bool,

    /// emit 64-bit integers as JSON integers instead of strings
    #[arg(long, default_value_t = false)]
    disallow_big_ints_as_strings: bool,

    /// emit additionalProperties: false on every object schema
    #[arg(long, default_value_t = false)]
    disallow_additional_properties: bool,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

#[derive(clap::Parser, Debug)]
struct EnumsOut {
    #[command(flatten)]
    input_settings: InputSettings,

    /// debugging
    #[arg(long)]
    no_op: bool,
}

// ————————————————————————————————————————————————————————————————————————————
// IMPLEMENTATION
// ————————————————————————————————————————————————————————————————————————————

impl InputSettings {
    fn load_files(&self) -> anyhow::Result<Vec<FileDescriptor>> {
        let source_paths = resolve_file_path_patterns(&self.input)?;
        let mut files = Vec::new();
        for source_path in source_paths {
            let source = std::fs::read_to_string(&source_path)
                .with_context(|| format!("failed to read {}", source_path.display()))?;
            let set: FileDescriptorSet = crate::path_de::from_str_with_path(&source)
                .map_err(|e| anyhow!("failed to parse {}: {e}", source_path.display()))?;
            files.extend(set.file);
        }
        Ok(files)
    }
}

impl CommandLineInterface {
    pub fn load() -> Self {
        Self::parse()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        match &self.cmd {
            Command::Schema(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let files = target.input_settings.load_files()?;
                let options = ConvertOptions {
                    allow_null_values: target.allow_null_values,
                    disallow_big_ints_as_strings: target.disallow_big_ints_as_strings,
                    disallow_additional_properties: target.disallow_additional_properties,
                };
                let converter = Converter::new(&files, options);
                let documents = converter.convert_all()?;

                if let Some(out) = target.out.as_ref() {
                    std::fs::create_dir_all(out)
                        .with_context(|| format!("failed to create {}", out.display()))?;
                    for document in &documents {
                        let path = out.join(document.file_name());
                        std::fs::write(&path, document.to_json_pretty()?)
                            .with_context(|| format!("failed to write {}", path.display()))?;
                    }
                } else {
                    for document in &documents {
                        println!("{}", document.to_json_pretty()?);
                    }
                }
                Ok(())
            }
            Command::Enums(target) => {
                // debug path
                if target.no_op {
                    eprintln!("{self:#?}");
                    return Ok(());
                }

                let files = target.input_settings.load_files()?;
                let converter = Converter::new(&files, ConvertOptions::default());
                let table: IndexMap<&str, Vec<&str>> = converter
                    .enums()
                    .iter()
                    .map(|(name, enum_)| (name, enum_.value_names().collect()))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&table)?);
                Ok(())
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL HELPERS
// ————————————————————————————————————————————————————————————————————————————

fn resolve_file_path_patterns<I>(patterns: I) -> anyhow::Result<Vec<PathBuf>>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    fn has_glob_chars(s: &str) -> bool {
        // Minimal glob detection for the `glob` crate syntax.
        s.bytes().any(|b| matches!(b, b'*' | b'?' | b'[' | b'{'))
    }

    let mut out = Vec::<PathBuf>::new();

    for raw in patterns {
        let pattern = raw.as_ref();

        if has_glob_chars(pattern) {
            let mut matched_any = false;
            for entry in glob::glob(pattern)? {
                out.push(entry?);
                matched_any = true;
            }
            if !matched_any {
                // Pattern was explicitly a glob but matched nothing -> surface as an error
                return Err(anyhow!("glob pattern matched no files: {pattern}"));
            }
        } else {
            // Treat as a literal path
            out.push(PathBuf::from(pattern));
        }
    }

    Ok(out)
}
