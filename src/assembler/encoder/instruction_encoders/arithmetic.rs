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

//! The ALU family: `ADD`, the bitwise/arithmetic `8XYc` group, the
//! `HCHIP64`-only rotate/test group, and `RND`.

use crate::assembler::encoder::constants::{fx, reg_nn, xy};
use crate::assembler::encoder::reg;
use crate::assembler::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;
use crate::literal::parse_literal;

pub(crate) fn encode(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    match mnemonic {
        Mnemonic::Add => encode_add(asm, operands, line_number),
        Mnemonic::Rnd => encode_rnd(asm, operands, line_number),
        _ => encode_alu_pair(asm, mnemonic, operands, line_number),
    }
}

fn encode_add(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    match (&operands[0], &operands[1]) {
        (Operand::IndexRegister, rhs) => match reg(rhs) {
            Some(x) => asm.emit_bytes(&fx(x, 0x1E), line_number),
            None => asm.sink.push(ErrorKind::InvalidRegister(format!("{rhs:?}")), line_number, 1),
        },
        (Operand::Register(x), Operand::Register(y)) => asm.emit_bytes(&xy(*x, *y, 4), line_number),
        (Operand::Register(x), Operand::Immediate(text)) => match parse_literal(text, 8) {
            Ok(nn) => asm.emit_bytes(&reg_nn(7, *x, nn as u8), line_number),
            Err(kind) => asm.sink.push(kind, line_number, 1),
        },
        (lhs, _) => asm.sink.push(ErrorKind::InvalidValue(format!("{lhs:?}")), line_number, 1),
    }
}

fn encode_rnd(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    let Some(x) = reg(&operands[0]) else {
        asm.sink
            .push(ErrorKind::InvalidRegister(format!("{:?}", operands[0])), line_number, 1);
        return;
    };
    let Operand::Immediate(text) = &operands[1] else {
        asm.sink
            .push(ErrorKind::InvalidValue(format!("{:?}", operands[1])), line_number, 1);
        return;
    };
    match parse_literal(text, 8) {
        Ok(nn) => asm.emit_bytes(&reg_nn(0xC, x, nn as u8), line_number),
        Err(kind) => asm.sink.push(kind, line_number, 1),
    }
}

fn alu_opcode_nibble(mnemonic: Mnemonic) -> u8 {
    match mnemonic {
        Mnemonic::Or => 1,
        Mnemonic::And => 2,
        Mnemonic::Xor => 3,
        Mnemonic::Sub => 5,
        Mnemonic::Shr => 6,
        Mnemonic::Subn => 7,
        Mnemonic::Shl => 0xE,
        Mnemonic::Ror => 8,
        Mnemonic::Rol => 9,
        Mnemonic::Test => 0xA,
        Mnemonic::Not => 0xB,
        _ => unreachable!("not an 8XYc-family mnemonic"),
    }
}

fn encode_alu_pair(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    let Some(x) = reg(&operands[0]) else {
        asm.sink
            .push(ErrorKind::InvalidRegister(format!("{:?}", operands[0])), line_number, 1);
        return;
    };
    let Some(y) = reg(&operands[1]) else {
        asm.sink
            .push(ErrorKind::InvalidRegister(format!("{:?}", operands[1])), line_number, 1);
        return;
    };
    asm.emit_bytes(&xy(x, y, alu_opcode_nibble(mnemonic)), line_number);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembler::symbol_table::SymbolTable;
    use crate::errors::DiagnosticSink;
    use crate::extension::ExtensionTier;
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
    fn add_register_immediate() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Add,
            &[Operand::Register(2), Operand::Immediate("0x10".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0x72, 0x10]);
    }

    #[test]
    fn add_register_register() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Add,
            &[Operand::Register(2), Operand::Register(3)],
            1,
        );
        assert_eq!(asm.image, vec![0x82, 0x34]);
    }

    #[test]
    fn add_index_register() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Add,
            &[Operand::IndexRegister, Operand::Register(7)],
            1,
        );
        assert_eq!(asm.image, vec![0xF7, 0x1E]);
    }

    #[test]
    fn or_and_xor_sub_shr_subn_shl() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        for (m, nibble) in [
            (Mnemonic::Or, 1),
            (Mnemonic::And, 2),
            (Mnemonic::Xor, 3),
            (Mnemonic::Sub, 5),
            (Mnemonic::Shr, 6),
            (Mnemonic::Subn, 7),
            (Mnemonic::Shl, 0xE),
        ] {
            asm.image.clear();
            encode(&mut asm, m, &[Operand::Register(1), Operand::Register(2)], 1);
            assert_eq!(asm.image, vec![0x81, 0x20 | nibble]);
        }
    }

    #[test]
    fn hchip64_rotate_and_test_group() {
        let mut asm = new_asm(ExtensionTier::HChip64);
        encode(&mut asm, Mnemonic::Ror, &[Operand::Register(1), Operand::Register(2)], 1);
        assert_eq!(asm.image, vec![0x81, 0x28]);
    }

    #[test]
    fn rnd_register_immediate() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Rnd,
            &[Operand::Register(0), Operand::Immediate("0xFF".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0xC0, 0xFF]);
    }
}
