/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

use anyhow::{Context, Result};
use bandchip_assembler::errors::CliError;
use bandchip_assembler::extension::ExtensionTier;
use bandchip_assembler::file_reader::AsmFileReader;
use bandchip_assembler::output::OutputFormat;
use bandchip_assembler::{assemble_file, AssembleReport};
use clap::Parser as ClapParser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(ClapParser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Source file to assemble.
    input: PathBuf,

    /// Output ROM path.
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Pre-seeds the target extension; any in-source EXTENSION directive overrides it.
    #[clap(long)]
    extension: Option<ExtensionTier>,

    /// Pre-seeds the output format; any in-source OUTPUT directive overrides it.
    #[clap(long)]
    format: Option<OutputFormat>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("bandchip_assembler: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let opts: Opts = Opts::parse();

    let output = opts.output.clone().ok_or(CliError::NoOutputGiven)?;
    if output == opts.input {
        return Err(CliError::OutputCollidesWithInput(output.clone()).into());
    }

    let reader = AsmFileReader;
    let report: AssembleReport = assemble_file(
        &opts.input,
        opts.extension.unwrap_or_default(),
        opts.format.unwrap_or_default(),
        &reader,
    )
    .map_err(|_| CliError::InputNotFound(opts.input.clone()))
    .with_context(|| format!("could not read {}", opts.input.display()))?;

    for line in report.sink.render_all() {
        println!("{line}");
    }

    match report.image {
        Some(image) => {
            let rendered = report.output_format.render(&image);
            fs::write(&output, &rendered)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!(
                "bandchip_assembler: assembled {} ({} bytes)",
                opts.input.display(),
                image.len()
            );
            Ok(())
        }
        None => {
            println!("bandchip_assembler: {} error(s)", report.sink.error_count());
            Ok(())
        }
    }
}
