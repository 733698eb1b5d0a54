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

pub mod encoder;
pub mod resolver;
pub mod symbol_table;

use crate::ast::{DbValue, Directive, Line, Operand, Statement};
use crate::errors::{DiagnosticSink, ErrorKind};
use crate::extension::ExtensionTier;
use crate::file_reader::FileReader;
use crate::literal::parse_literal;
use crate::output::OutputFormat;
use resolver::UnresolvedReference;
use symbol_table::SymbolTable;

/// A resolved or deferred address, produced while encoding an `addr`-shaped
/// operand or a `DW` identifier operand.
pub(crate) enum AddrResolution {
    Known(u16),
    Deferred(String),
}

/// Everything the forward pass mutates. Constructed fresh per run; no
/// process-wide mutable state exists anywhere in the crate.
pub struct Assembler {
    pub(crate) extension: ExtensionTier,
    pub(crate) output_format: OutputFormat,
    pub(crate) align: bool,
    pub(crate) current_address: u16,
    pub(crate) image: Vec<u8>,
    pub(crate) symbols: SymbolTable,
    pub(crate) unresolved: Vec<UnresolvedReference>,
    pub(crate) sink: DiagnosticSink,
}

/// The outcome of a full assembly run: the finished image (present only if
/// no diagnostic was ever raised) plus the accumulated diagnostics.
pub struct AssembleReport {
    pub image: Option<Vec<u8>>,
    pub output_format: OutputFormat,
    pub sink: DiagnosticSink,
}

impl Default for Assembler {
    fn default() -> Self {
        Self {
            extension: ExtensionTier::default(),
            output_format: OutputFormat::default(),
            align: true,
            current_address: 0x200,
            image: Vec::new(),
            symbols: SymbolTable::new(),
            unresolved: Vec::new(),
            sink: DiagnosticSink::new(),
        }
    }
}

impl Assembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_extension(mut self, extension: ExtensionTier) -> Self {
        self.extension = extension;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn assemble_lines<R: FileReader>(&mut self, lines: &[Line], reader: &R) {
        for line in lines {
            self.process_line(line, reader);
        }
    }

    fn process_line<R: FileReader>(&mut self, line: &Line, reader: &R) {
        if let Some(label) = &line.label {
            tracing::debug!("label '{}' @ 0x{:04X}", label, self.current_address);
            self.symbols.define(label.clone(), self.current_address);
        }

        match &line.statement {
            None => {}
            Some(Statement::Directive(directive)) => self.handle_directive(directive, line.line_number, reader),
            Some(Statement::Instruction { mnemonic, operands }) => {
                encoder::encode_instruction(self, *mnemonic, operands, line.line_number);
            }
        }
    }

    pub(crate) fn emit_byte(&mut self, byte: u8, line_number: usize) {
        if self.current_address > 0x0FFF && !self.extension.supports_extended_memory() {
            self.sink
                .push(ErrorKind::Only4KBSupported(self.current_address), line_number, 1);
            return;
        }
        self.image.push(byte);
        self.current_address = self.current_address.wrapping_add(1);
    }

    pub(crate) fn emit_bytes(&mut self, bytes: &[u8], line_number: usize) {
        for &b in bytes {
            self.emit_byte(b, line_number);
        }
    }

    /// Looks an address-shaped operand up now, or defers it. Shared by the
    /// instruction encoder (instruction-style patches) and `DW` (data-word
    /// patches) per §4.3/§9's `resolve_or_defer` guidance.
    pub(crate) fn resolve_addr_operand(
        &mut self,
        operand: &Operand,
        width_bits: u32,
        line_number: usize,
    ) -> Option<AddrResolution> {
        match operand {
            Operand::Immediate(text) => match parse_literal(text, width_bits) {
                Ok(v) => Some(AddrResolution::Known(v as u16)),
                Err(kind) => {
                    self.sink.push(kind, line_number, 1);
                    None
                }
            },
            Operand::Label(name) => match self.symbols.lookup(name) {
                Some(symbol) => Some(AddrResolution::Known(symbol.location)),
                None => Some(AddrResolution::Deferred(name.clone())),
            },
            other => {
                self.sink.push(
                    ErrorKind::InvalidValue(format!("{other:?}")),
                    line_number,
                    1,
                );
                None
            }
        }
    }

    fn handle_directive<R: FileReader>(&mut self, directive: &Directive, line_number: usize, reader: &R) {
        match directive {
            Directive::Output(format) => {
                tracing::info!("OUTPUT {:?}", format);
                self.output_format = *format;
            }
            Directive::Extension(ext) => {
                tracing::info!("EXTENSION {}", ext.name());
                self.extension = *ext;
            }
            Directive::Align(on) => {
                self.align = *on;
            }
            Directive::Org(operand) => self.handle_org(operand, line_number),
            Directive::IncBin(path) => self.handle_incbin(path, line_number, reader),
            Directive::Db(values) => self.handle_db(values, line_number),
            Directive::Dw(values) => self.handle_dw(values, line_number),
        }
    }

    fn handle_org(&mut self, operand: &Operand, line_number: usize) {
        let Operand::Immediate(text) = operand else {
            self.sink
                .push(ErrorKind::InvalidValue(format!("{operand:?}")), line_number, 1);
            return;
        };
        let Ok(target) = parse_literal(text, 16).map(|v| v as u16) else {
            self.sink
                .push(ErrorKind::InvalidValue(text.clone()), line_number, 1);
            return;
        };

        if target < 0x200 {
            self.sink.push(ErrorKind::ReservedAddress(target), line_number, 1);
            return;
        }
        if target < self.current_address {
            self.sink.push(
                ErrorKind::BelowCurrentAddress(target, self.current_address),
                line_number,
                1,
            );
            return;
        }
        if target > 0x0FFF && !self.extension.supports_extended_memory() {
            self.sink.push(ErrorKind::Only4KBSupported(target), line_number, 1);
            return;
        }

        tracing::info!("ORG 0x{:04X}", target);
        let target_size = (target - 0x200) as usize;
        while self.image.len() < target_size {
            self.image.push(0x00);
        }
        self.current_address = target;
    }

    fn handle_incbin<R: FileReader>(&mut self, path: &str, line_number: usize, reader: &R) {
        match reader.read_binary(std::path::Path::new(path)) {
            Ok(bytes) => {
                tracing::info!("INCBIN '{}' ({} bytes)", path, bytes.len());
                self.emit_bytes(&bytes, line_number);
            }
            Err(_) => {
                self.sink
                    .push(ErrorKind::BinaryFileDoesNotExist(path.to_string()), line_number, 1);
            }
        }
    }

    fn handle_db(&mut self, values: &[DbValue], line_number: usize) {
        let last_index = values.len() - 1;
        for (i, value) in values.iter().enumerate() {
            match value {
                DbValue::Str(s) => self.emit_bytes(s.as_bytes(), line_number),
                DbValue::Byte(Operand::Immediate(text)) => {
                    let Ok(byte) = parse_literal(text, 8) else {
                        self.sink.push(ErrorKind::InvalidValue(text.clone()), line_number, 1);
                        return;
                    };
                    self.emit_byte(byte as u8, line_number);
                    let followed_by_more = i != last_index;
                    if self.align && followed_by_more && self.image.len() % 2 != 0 {
                        self.emit_byte(0x00, line_number);
                    }
                }
                DbValue::Byte(_) => unreachable!("lexer only ever produces Immediate DB bytes"),
            }
        }
    }

    fn handle_dw(&mut self, values: &[Operand], line_number: usize) {
        for value in values {
            if self.align && self.image.len() % 2 != 0 {
                self.emit_byte(0x00, line_number);
            }
            match self.resolve_addr_operand(value, 16, line_number) {
                Some(AddrResolution::Known(addr)) => {
                    self.emit_bytes(&[(addr >> 8) as u8, (addr & 0xFF) as u8], line_number);
                }
                Some(AddrResolution::Deferred(name)) => {
                    let offset = self.image.len();
                    self.emit_bytes(&[0x00, 0x00], line_number);
                    self.unresolved.push(UnresolvedReference {
                        name,
                        source_line: line_number,
                        image_offset: offset,
                        is_instruction: false,
                        is_extended: false,
                    });
                }
                None => {}
            }
        }
    }

    /// Runs the reference resolver and produces the final report. The image
    /// is withheld entirely if any diagnostic was ever raised, per §4.7.
    pub fn finish(mut self) -> AssembleReport {
        resolver::resolve(&mut self.image, &self.symbols, &self.unresolved, &mut self.sink);
        let image = if self.sink.is_empty() { Some(self.image) } else { None };
        AssembleReport {
            image,
            output_format: self.output_format,
            sink: self.sink,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file_reader::MockFileReader;
    use crate::lexer::lex_source;

    fn assemble(source: &str) -> AssembleReport {
        let mut sink = DiagnosticSink::new();
        let lines = lex_source(source, &mut sink);
        let mut assembler = Assembler::new();
        assembler.sink = sink;
        let reader = MockFileReader::default();
        assembler.assemble_lines(&lines, &reader);
        assembler.finish()
    }

    #[test]
    fn scenario_cls_ret() {
        let report = assemble("CLS\nRET\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0x00, 0xE0, 0x00, 0xEE]);
    }

    #[test]
    fn scenario_self_referencing_forward_jump() {
        let report = assemble("start: JP start\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0x12, 0x00]);
    }

    #[test]
    fn scenario_extended_hchip64_ld_i_immediate() {
        let report = assemble("EXTENSION HCHIP64\nLD I, 0x1234\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0xF1, 0xB0, 0xA2, 0x34]);
    }

    #[test]
    fn scenario_db_mixed_bytes_and_string() {
        let report = assemble("DB 0x41, \"Bc\", 0x44\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0x41, 0x42, 0x43, 0x44]);
    }

    #[test]
    fn scenario_org_then_forward_label() {
        let report = assemble("main: JP forward\nORG 0x300\nforward: RET\n");
        assert!(report.sink.is_empty());
        let image = report.image.unwrap();
        assert_eq!(image.len(), 0x102);
        assert_eq!(&image[0..2], &[0x13, 0x00]);
        assert!(image[2..0x100].iter().all(|&b| b == 0x00));
        assert_eq!(&image[0x100..0x102], &[0x00, 0xEE]);
    }

    #[test]
    fn scenario_dw_forward_label() {
        let report = assemble("DW mylabel\nmylabel:\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0x02, 0x02]);
    }

    #[test]
    fn org_below_0x200_is_reserved_address() {
        let report = assemble("ORG 0x1FF\n");
        assert_eq!(report.sink.error_count(), 1);
        assert_eq!(
            report.sink.diagnostics()[0].kind,
            ErrorKind::ReservedAddress(0x1FF)
        );
    }

    #[test]
    fn org_no_op_at_current_address() {
        let report = assemble("ORG 0x200\nCLS\n");
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0x00, 0xE0]);
    }

    #[test]
    fn org_below_current_address_is_an_error() {
        let report = assemble("ORG 0x300\nORG 0x201\n");
        assert_eq!(report.sink.error_count(), 1);
        assert_eq!(
            report.sink.diagnostics()[0].kind,
            ErrorKind::BelowCurrentAddress(0x201, 0x300)
        );
    }

    #[test]
    fn incbin_reads_through_file_reader() {
        let mut sink = DiagnosticSink::new();
        let lines = lex_source("INCBIN \"sprite.bin\"\n", &mut sink);
        let mut assembler = Assembler::new();
        assembler.sink = sink;
        let mut reader = MockFileReader::default();
        reader.add_binary_file("sprite.bin", vec![0xDE, 0xAD]);
        assembler.assemble_lines(&lines, &reader);
        let report = assembler.finish();
        assert!(report.sink.is_empty());
        assert_eq!(report.image.unwrap(), vec![0xDE, 0xAD]);
    }

    #[test]
    fn incbin_missing_file_is_diagnosed() {
        let report = assemble("INCBIN \"missing.bin\"\n");
        assert_eq!(report.sink.error_count(), 1);
        assert_eq!(
            report.sink.diagnostics()[0].kind,
            ErrorKind::BinaryFileDoesNotExist("missing.bin".to_string())
        );
    }

    #[test]
    fn any_diagnostic_withholds_the_image() {
        let report = assemble("ORG 0x1FF\nCLS\n");
        assert!(report.image.is_none());
    }
}
