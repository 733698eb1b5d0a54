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

use std::path::PathBuf;
use thiserror::Error;

/// One of the assembler's taxonomised problem kinds. These never propagate as
/// `Result::Err` out of the forward pass; they accumulate in a `DiagnosticSink`
/// so one bad line does not stop the rest of the file from being scanned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("'{0}' is a reserved word and cannot be used as a label")]
    ReservedToken(String),
    #[error("invalid token '{0}'")]
    InvalidToken(String),
    #[error("'{0}' does not accept any operands")]
    NoOperandsSupported(String),
    #[error("too few operands for '{0}' (expected at least {1})")]
    TooFewOperands(String, usize),
    #[error("too many operands for '{0}' (expected at most {1})")]
    TooManyOperands(String, usize),
    #[error("invalid value '{0}'")]
    InvalidValue(String),
    #[error("invalid register '{0}'")]
    InvalidRegister(String),
    #[error("origin address 0x{0:04X} is reserved, must be >= 0x200")]
    ReservedAddress(u16),
    #[error("origin address 0x{0:04X} is below the current address 0x{1:04X}")]
    BelowCurrentAddress(u16, u16),
    #[error("address 0x{0:04X} exceeds the 4KB address space for the current extension")]
    Only4KBSupported(u16),
    #[error("'{0}' requires the SuperCHIP V1.0 extension")]
    SuperCHIP10Required(String),
    #[error("'{0}' requires the SuperCHIP V1.1 extension")]
    SuperCHIP11Required(String),
    #[error("'{0}' requires the XO-CHIP extension")]
    XOCHIPRequired(String),
    #[error("'{0}' requires the HyperCHIP-64 extension")]
    HyperCHIP64Required(String),
    #[error("binary file '{0}' does not exist")]
    BinaryFileDoesNotExist(String),
    #[error("unresolved reference '{0}'")]
    UnresolvedReference(String),
}

/// A single reported problem, tied to the source line/column it was detected at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

impl Diagnostic {
    pub fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// Render per the human-readable line formats of §6: unresolved references
    /// get their own sentence (no column), everything else gets `Error at l:c : msg`.
    pub fn render(&self) -> String {
        match &self.kind {
            ErrorKind::UnresolvedReference(name) => {
                format!("Unresolved reference '{name}' at line {}.", self.line)
            }
            other => format!("Error at {}:{} : {other}", self.line, self.column),
        }
    }
}

/// Accumulates diagnostics across a forward pass without aborting it.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: ErrorKind, line: usize, column: usize) {
        tracing::error!("{}", Diagnostic::new(kind.clone(), line, column).render());
        self.diagnostics.push(Diagnostic::new(kind, line, column));
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn render_all(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::render).collect()
    }
}

/// Hard failures from the CLI adapter: these are the only errors in the whole
/// pipeline represented as a Rust `Result::Err` rather than a sink entry.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("could not open input file '{0}'")]
    InputNotFound(PathBuf),
    #[error("no output path given")]
    NoOutputGiven,
    #[error("output file '{0}' collides with the input file")]
    OutputCollidesWithInput(PathBuf),
}
