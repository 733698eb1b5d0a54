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

//! Sprite drawing and the `XOCHIP` bit-plane selector: `DRW`, `PLANE`.

use crate::assembler::encoder::constants::nibbles;
use crate::assembler::encoder::reg;
use crate::assembler::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;
use crate::literal::parse_literal;

pub(crate) fn encode(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    match mnemonic {
        Mnemonic::Drw => encode_drw(asm, operands, line_number),
        Mnemonic::Plane => encode_plane(asm, operands, line_number),
        _ => unreachable!("graphics::encode called with a non-graphics mnemonic"),
    }
}

fn encode_drw(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    let (Some(x), Some(y)) = (reg(&operands[0]), reg(&operands[1])) else {
        asm.sink
            .push(ErrorKind::InvalidRegister("DRW requires two registers".to_string()), line_number, 1);
        return;
    };
    let Operand::Immediate(text) = &operands[2] else {
        asm.sink
            .push(ErrorKind::InvalidValue(format!("{:?}", operands[2])), line_number, 1);
        return;
    };
    match parse_literal(text, 4) {
        Ok(n) => asm.emit_bytes(&nibbles(0xD, x, y, n as u8), line_number),
        Err(kind) => asm.sink.push(kind, line_number, 1),
    }
}

fn encode_plane(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    let Operand::Immediate(text) = &operands[0] else {
        asm.sink
            .push(ErrorKind::InvalidValue(format!("{:?}", operands[0])), line_number, 1);
        return;
    };
    match parse_literal(text, 4) {
        Ok(n) => asm.emit_bytes(&[0xF0 | (n as u8), 0x01], line_number),
        Err(kind) => asm.sink.push(kind, line_number, 1),
    }
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
    fn drw_three_operands() {
        let mut asm = new_asm(ExtensionTier::Chip8);
        encode(
            &mut asm,
            Mnemonic::Drw,
            &[Operand::Register(1), Operand::Register(2), Operand::Immediate("5".to_string())],
            1,
        );
        assert_eq!(asm.image, vec![0xD1, 0x25]);
    }

    #[test]
    fn plane_selects_bitplane() {
        let mut asm = new_asm(ExtensionTier::XoChip);
        encode(&mut asm, Mnemonic::Plane, &[Operand::Immediate("3".to_string())], 1);
        assert_eq!(asm.image, vec![0xF3, 0x01]);
    }
}
