//! Generate command - flatten a compiled schema request into DTO models.

use clap::Args;
use protodto_typegen::{Emitter, GeneratorConfig, Generation, TypegenError, generate};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Generate command arguments
#[derive(Args)]
pub struct GenerateArgs {
    /// Schema request JSON file (stdin if not specified)
    pub input: Option<PathBuf>,

    /// Output emitter (see `protodto emitters`)
    #[arg(short, long, default_value = "json")]
    pub emit: String,

    /// Output directory (stdout if not specified)
    ///
    /// On stdout every unit is one document, in request order. JSON documents
    /// form a concatenated stream; YAML documents are separated by `---`.
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Treat every field as public
    #[arg(long)]
    pub all_public: bool,

    /// Config file to use instead of the global and project ones
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Run the generate command
pub fn run(args: GenerateArgs) -> i32 {
    let Some(emitter) = protodto_typegen::get_emitter(&args.emit) else {
        eprintln!("Unknown emitter: {}. Available:", args.emit);
        for name in protodto_typegen::emitter_names() {
            eprintln!("  {}", name);
        }
        return 1;
    };

    match execute(&args, emitter) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("{}", e);
            1
        }
    }
}

fn execute(args: &GenerateArgs, emitter: &dyn Emitter) -> Result<(), TypegenError> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_file(path)?.with_env(),
        None => GeneratorConfig::load(&std::env::current_dir()?),
    };
    if args.all_public {
        config.all_public = true;
    }
    debug!(?config, "resolved configuration");

    let content = read_input(args.input.as_deref())?;
    let request = protodto_typegen::parse_request(&content)?;
    let generation = generate(&request, &config)?;
    write_outputs(&generation, emitter, args.out.as_deref())
}

fn read_input(path: Option<&Path>) -> Result<String, TypegenError> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            Ok(content)
        }
    }
}

fn write_outputs(
    generation: &Generation,
    emitter: &dyn Emitter,
    out: Option<&Path>,
) -> Result<(), TypegenError> {
    for (index, file) in generation.files.iter().enumerate() {
        let rendered = emitter.emit(file)?;
        match out {
            Some(dir) => {
                let path = dir.join(format!("{}.{}", file.name, emitter.extension()));
                if let Some(parent) = path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(&path, &rendered)?;
                eprintln!("Generated {}", path.display());
            }
            None => {
                if index > 0 {
                    print!("{}", emitter.stream_separator());
                }
                println!("{}", rendered.trim_end());
            }
        }
    }
    Ok(())
}
