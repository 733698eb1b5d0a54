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

//! Zero/one-operand screen and control mnemonics: `CLS`, `RET`, `SCD`/`SCU`,
//! `SCR`/`SCL`, `EXIT`, `LOW`, `HIGH`.

use crate::assembler::encoder::constants::zero;
use crate::assembler::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;
use crate::literal::parse_literal;

pub(crate) fn encode(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    match mnemonic {
        Mnemonic::Cls => asm.emit_bytes(&[0x00, 0xE0], line_number),
        Mnemonic::Ret => asm.emit_bytes(&[0x00, 0xEE], line_number),
        Mnemonic::Scr => asm.emit_bytes(&zero(0xFB), line_number),
        Mnemonic::Scl => asm.emit_bytes(&zero(0xFC), line_number),
        Mnemonic::Exit => asm.emit_bytes(&zero(0xFD), line_number),
        Mnemonic::Low => asm.emit_bytes(&zero(0xFE), line_number),
        Mnemonic::High => asm.emit_bytes(&zero(0xFF), line_number),
        Mnemonic::Scd => encode_scroll(asm, 0xC0, operands, line_number),
        Mnemonic::Scu => encode_scroll(asm, 0xD0, operands, line_number),
        _ => unreachable!("misc::encode called with a non-misc mnemonic"),
    }
}

fn encode_scroll(asm: &mut Assembler, base: u8, operands: &[Operand], line_number: usize) {
    let Operand::Immediate(text) = &operands[0] else {
        asm.sink
            .push(ErrorKind::InvalidValue(format!("{:?}", operands[0])), line_number, 1);
        return;
    };
    match parse_literal(text, 4) {
        Ok(n) => asm.emit_bytes(&zero(base | n as u8), line_number),
        Err(kind) => asm.sink.push(kind, line_number, 1),
    }
}
