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

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod extension;
pub mod file_reader;
pub mod lexer;
pub mod literal;
pub mod output;

pub use assembler::AssembleReport;

use assembler::Assembler;
use extension::ExtensionTier;
use file_reader::FileReader;
use output::OutputFormat;
use std::path::Path;

/// Assembles `source` into a finished report. `initial_extension` and
/// `initial_output_format` pre-seed the forward pass per §4.12; any in-source
/// `EXTENSION`/`OUTPUT` directive overrides them for everything scanned after
/// it. `reader` answers any `INCBIN` path the source references.
pub fn assemble<R: FileReader>(
    source: &str,
    initial_extension: ExtensionTier,
    initial_output_format: OutputFormat,
    reader: &R,
) -> AssembleReport {
    let mut sink = errors::DiagnosticSink::new();
    let lines = lexer::lex_source(source, &mut sink);

    let mut assembler = Assembler::new()
        .with_extension(initial_extension)
        .with_output_format(initial_output_format);
    assembler.sink = sink;
    assembler.assemble_lines(&lines, reader);
    assembler.finish()
}

/// Convenience entry point for the CLI adapter: reads the entry file as text
/// through `reader` first, since that failure is a precondition for running
/// the core at all rather than a mid-file diagnostic (§4.11).
pub fn assemble_file<R: FileReader>(
    source_path: &Path,
    initial_extension: ExtensionTier,
    initial_output_format: OutputFormat,
    reader: &R,
) -> std::io::Result<AssembleReport> {
    let source = reader.read_to_string(source_path)?;
    Ok(assemble(&source, initial_extension, initial_output_format, reader))
}
