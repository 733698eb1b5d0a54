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

//! Branching and skip mnemonics: `JP`, `CALL`, `SE`, `SNE`, `SKP`, `SKNP`.

use crate::assembler::encoder::components::{emit_addr_instruction, parse_index_plus_reg};
use crate::assembler::encoder::constants::{fx, reg_nn};
use crate::assembler::encoder::{reg, required_error};
use crate::assembler::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;
use crate::extension::ExtensionTier;
use crate::literal::parse_literal;

pub(crate) fn encode(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    match mnemonic {
        Mnemonic::Jp => encode_jp(asm, operands, line_number),
        Mnemonic::Call => encode_call(asm, operands, line_number),
        Mnemonic::Se => encode_se_sne(asm, 3, 5, operands, line_number),
        Mnemonic::Sne => encode_se_sne(asm, 4, 9, operands, line_number),
        Mnemonic::Skp => encode_skip(asm, 0x9E, operands, line_number),
        Mnemonic::Sknp => encode_skip(asm, 0xA1, operands, line_number),
        _ => unreachable!("control_flow::encode called with a non-control-flow mnemonic"),
    }
}

fn encode_jp(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    match operands {
        [Operand::Pointer(text)] => encode_indexed_pointer(asm, 0x20, text, line_number),
        [addr_operand] => emit_addr_instruction(asm, 0x1, addr_operand, line_number, false),
        [base, addr_operand] => encode_jp_v0(asm, base, addr_operand, line_number),
        _ => unreachable!("operand-count guard already bounded JP to 1 or 2 operands"),
    }
}

fn encode_jp_v0(asm: &mut Assembler, base: &Operand, addr_operand: &Operand, line_number: usize) {
    let Some(base_reg) = reg(base) else {
        asm.sink
            .push(ErrorKind::InvalidRegister(format!("{base:?}")), line_number, 1);
        return;
    };
    if base_reg != 0 {
        if asm.extension < ExtensionTier::HChip64 {
            asm.sink
                .push(required_error(ExtensionTier::HChip64, Mnemonic::Jp), line_number, 1);
            return;
        }
        asm.emit_bytes(&fx(base_reg, 0xB1), line_number);
    }
    emit_addr_instruction(asm, 0xB, addr_operand, line_number, false);
}

fn encode_call(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    match &operands[0] {
        Operand::Pointer(text) => encode_indexed_pointer(asm, 0x21, text, line_number),
        addr_operand => emit_addr_instruction(asm, 0x2, addr_operand, line_number, false),
    }
}

fn encode_indexed_pointer(asm: &mut Assembler, low: u8, text: &str, line_number: usize) {
    if asm.extension < ExtensionTier::HChip64 {
        asm.sink
            .push(required_error(ExtensionTier::HChip64, Mnemonic::Jp), line_number, 1);
        return;
    }
    let Some(x) = parse_index_plus_reg(text) else {
        asm.sink.push(ErrorKind::InvalidValue(text.to_string()), line_number, 1);
        return;
    };
    asm.emit_bytes(&fx(x, low), line_number);
}

fn encode_se_sne(asm: &mut Assembler, byte_hi: u8, reg_hi: u8, operands: &[Operand], line_number: usize) {
    let Some(x) = reg(&operands[0]) else {
        asm.sink
            .push(ErrorKind::InvalidRegister(format!("{:?}", operands[0])), line_number, 1);
        return;
    };
    match &operands[1] {
        Operand::Register(y) => {
            let bytes = [(reg_hi << 4) | x, *y << 4];
            asm.emit_bytes(&bytes, line_number);
        }
        Operand::Immediate(text) => match parse_literal(text, 8) {
            Ok(nn) => asm.emit_bytes(&reg_nn(byte_hi, x, nn as u8), line_number),
            Err(kind) => asm.sink.push(kind, line_number, 1),
        },
        other => asm.sink.push(ErrorKind::InvalidValue(format!("{other:?}")), line_number, 1),
    }
}

fn encode_skip(asm: &mut Assembler, low: u8, operands: &[Operand], line_number: usize) {
    match reg(&operands[0]) {
        Some(x) => asm.emit_bytes(&fx(x, low), line_number),
        None => asm
            .sink
            .push(ErrorKind::InvalidRegister(format!("{:?}", operands[0])), line_number, 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::symbol_table::SymbolTable;
    use crate::errors::DiagnosticSink;
    use crate::output::OutputFormat;

    fn new_asm(ext: ExtensionTier) -> Assembler {
        Assembler {
            extension: ext,
            output_format: OutputFormat::Binary,
            align: true,
            current_address: 0x200,
            image: Vec::new(),
            symbols: SymbolTable::new(),
            unresolved: Vec::new(),
            sink: DiagnosticSink::new(),
        }
    }

    #[test]
    fn jp_addr_known() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        asm.symbols.define("start".to_string(), 0x200);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Label("start".to_string())], 1);
        assert_eq!(asm.image, vec![0x12, 0x00]);
    }

    #[test]
    fn jp_addr_deferred() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Label("start".to_string())], 1);
        assert_eq!(asm.image, vec![0x10, 0x00]);
        assert_eq!(asm.unresolved.len(), 1);
        assert!(asm.unresolved[0].is_instruction);
        assert!(!asm.unresolved[0].is_extended);
    }

    #[test]
    fn jp_extended_hchip64_known_address() {
        let mut asm = new_asm(ExtensionTier::HChip64);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Immediate("0x1000".to_string())], 1);
        assert_eq!(asm.image, vec![0xF1, 0xB0, 0x10, 0x00]);
    }

    #[test]
    fn jp_beyond_4k_without_extension_is_an_error() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Immediate("0x1000".to_string())], 1);
        assert_eq!(asm.sink.diagnostics()[0].kind, ErrorKind::Only4KBSupported(0x1000));
    }

    #[test]
    fn jp_v0_addr_standard() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Jp,
            &[Operand::Register(0), Operand::Immediate("0x300".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0xB3, 0x00]);
    }

    #[test]
    fn jp_non_v0_base_requires_hchip64_and_emits_prefix() {
        let mut asm = new_asm(ExtensionTier::HChip64);
        encode(
            &mut asm,
            Mnemonic::Jp,
            &[Operand::Register(3), Operand::Immediate("0x300".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0xF3, 0xB1, 0xB3, 0x00]);
    }

    #[test]
    fn jp_indexed_pointer_requires_hchip64() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Pointer("I+V3".to_string())], 1);
        assert_eq!(
            asm.sink.diagnostics()[0].kind,
            ErrorKind::HyperCHIP64Required("JP".to_string())
        );
    }

    #[test]
    fn jp_indexed_pointer_under_hchip64() {
        let mut asm = new_asm(ExtensionTier::HChip64);
        encode(&mut asm, Mnemonic::Jp, &[Operand::Pointer("I+V3".to_string())], 1);
        assert_eq!(asm.image, vec![0xF3, 0x20]);
    }

    #[test]
    fn call_addr() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(&mut asm, Mnemonic::Call, &[Operand::Immediate("0x300".to_string())], 1);
        assert_eq!(asm.image, vec![0x23, 0x00]);
    }

    #[test]
    fn se_register_immediate() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Se,
            &[Operand::Register(1), Operand::Immediate("0x42".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0x31, 0x42]);
    }

    #[test]
    fn se_register_register() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Se,
            &[Operand::Register(1), Operand::Register(2)],
            1,
        );
        assert_eq!(asm.image, vec![0x51, 0x20]);
    }

    #[test]
    fn sne_register_register() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Sne,
            &[Operand::Register(1), Operand::Register(2)],
            1,
        );
        assert_eq!(asm.image, vec![0x91, 0x20]);
    }

    #[test]
    fn skp_and_sknp() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(&mut asm, Mnemonic::Skp, &[Operand::Register(5)], 1);
        encode(&mut asm, Mnemonic::Sknp, &[Operand::Register(5)], 2);
        assert_eq!(asm.image, vec![0xE5, 0x9E, 0xE5, 0xA1]);
    }
}
