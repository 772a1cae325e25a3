use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use buildinfo_gen::{
    generate_buildinfo, load_config, render, GenerateOutcome, SKIP_NO_PUBLICATIONS,
};

fn usage() -> &'static str {
    "Usage:\n  buildinfo-gen generate <config.toml> [output-file]\n  buildinfo-gen print <config.toml>"
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        [cmd, config] if cmd == "generate" => generate(Path::new(config), None),
        [cmd, config, output] if cmd == "generate" => {
            generate(Path::new(config), Some(PathBuf::from(output)))
        }
        [cmd, config] if cmd == "print" => print(Path::new(config)),
        _ => bail!(usage()),
    }
}

fn generate(config_path: &Path, output_override: Option<PathBuf>) -> Result<()> {
    let mut inputs = load_config(config_path)
        .with_context(|| format!("loading buildinfo config '{}'", config_path.display()))?;
    if let Some(output) = output_override {
        inputs.output_path = output;
    }

    match generate_buildinfo(&inputs)? {
        GenerateOutcome::Skipped { reason } => {
            println!("[buildinfo] skipped: {reason}");
        }
        GenerateOutcome::Written { path } => {
            println!("[buildinfo] wrote {}", path.display());
        }
    }
    Ok(())
}

fn print(config_path: &Path) -> Result<()> {
    let inputs = load_config(config_path)
        .with_context(|| format!("loading buildinfo config '{}'", config_path.display()))?;
    if inputs.publications.is_empty() {
        println!("[buildinfo] skipped: {SKIP_NO_PUBLICATIONS}");
        return Ok(());
    }
    print!("{}", render(&inputs)?);
    Ok(())
}
