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

//! `LD`, by far the widest mnemonic: register/immediate moves, the index
//! register, the timers, the BCD/font/RPL memory shapes, and the `XOCHIP`
//! two-register memory-range shapes.

use crate::assembler::encoder::components::{emit_addr_instruction, parse_index_plus_reg};
use crate::assembler::encoder::constants::{fx, nibbles, reg_nn, xy};
use crate::assembler::encoder::required_error;
use crate::assembler::Assembler;
use crate::ast::Operand;
use crate::errors::ErrorKind;
use crate::extension::ExtensionTier;
use crate::literal::parse_literal;

pub(crate) fn encode(asm: &mut Assembler, operands: &[Operand], line_number: usize) {
    match operands {
        [Operand::IndexRegister, rhs] => encode_ld_i(asm, rhs, line_number),
        [Operand::Register(x), Operand::Immediate(text)] => encode_ld_reg_imm(asm, *x, text, line_number),
        [Operand::Register(x), Operand::Register(y)] => asm.emit_bytes(&xy(*x, *y, 0), line_number),
        [Operand::Register(x), Operand::DelayTimer] => asm.emit_bytes(&fx(*x, 0x07), line_number),
        [Operand::DelayTimer, Operand::Register(x)] => asm.emit_bytes(&fx(*x, 0x15), line_number),
        [Operand::SoundTimer, Operand::Register(x)] => asm.emit_bytes(&fx(*x, 0x18), line_number),
        [Operand::Font, Operand::Register(x)] => asm.emit_bytes(&fx(*x, 0x29), line_number),
        [Operand::HighFont, Operand::Register(x)] => encode_gated(asm, ExtensionTier::SChip11, &fx(*x, 0x30), line_number),
        [Operand::Bcd, Operand::Register(x)] => asm.emit_bytes(&fx(*x, 0x33), line_number),
        [Operand::Pointer(p), Operand::Register(x)] => encode_ld_pointer_store(asm, p, *x, line_number),
        [Operand::Register(x), Operand::Pointer(p)] => encode_ld_pointer_load(asm, *x, p, line_number),
        [Operand::UserRpl, Operand::Register(x)] => encode_gated(asm, ExtensionTier::SChip10, &fx(*x, 0x75), line_number),
        [Operand::Register(x), Operand::UserRpl] => encode_gated(asm, ExtensionTier::SChip10, &fx(*x, 0x85), line_number),
        [Operand::Register(x), Operand::Key] => asm.emit_bytes(&fx(*x, 0x0A), line_number),
        [Operand::Pointer(p), Operand::Register(x), Operand::Register(y)] => {
            encode_ld_range(asm, p, *x, *y, 2, line_number)
        }
        [Operand::Register(x), Operand::Register(y), Operand::Pointer(p)] => {
            encode_ld_range(asm, p, *x, *y, 3, line_number)
        }
        _ => asm.sink.push(
            ErrorKind::InvalidValue(format!("unsupported LD operand shape {operands:?}")),
            line_number,
            1,
        ),
    }
}

fn encode_gated(asm: &mut Assembler, min_ext: ExtensionTier, bytes: &[u8], line_number: usize) {
    if asm.extension < min_ext {
        asm.sink
            .push(required_error(min_ext, crate::ast::Mnemonic::Ld), line_number, 1);
        return;
    }
    asm.emit_bytes(bytes, line_number);
}

fn encode_ld_i(asm: &mut Assembler, rhs: &Operand, line_number: usize) {
    match rhs {
        Operand::Pointer(text) => {
            if asm.extension < ExtensionTier::HChip64 {
                asm.sink
                    .push(required_error(ExtensionTier::HChip64, crate::ast::Mnemonic::Ld), line_number, 1);
                return;
            }
            let Some(x) = parse_index_plus_reg(text) else {
                asm.sink.push(ErrorKind::InvalidValue(text.clone()), line_number, 1);
                return;
            };
            asm.emit_bytes(&fx(x, 0xA2), line_number);
        }
        other => emit_addr_instruction(asm, 0xA, other, line_number, true),
    }
}

fn encode_ld_reg_imm(asm: &mut Assembler, x: u8, text: &str, line_number: usize) {
    match parse_literal(text, 8) {
        Ok(nn) => asm.emit_bytes(&reg_nn(6, x, nn as u8), line_number),
        Err(kind) => asm.sink.push(kind, line_number, 1),
    }
}

fn encode_ld_pointer_store(asm: &mut Assembler, pointer: &str, x: u8, line_number: usize) {
    if pointer.eq_ignore_ascii_case("I") {
        asm.emit_bytes(&fx(x, 0x55), line_number);
    } else {
        asm.sink.push(ErrorKind::InvalidValue(pointer.to_string()), line_number, 1);
    }
}

fn encode_ld_pointer_load(asm: &mut Assembler, x: u8, pointer: &str, line_number: usize) {
    if pointer.eq_ignore_ascii_case("I") {
        asm.emit_bytes(&fx(x, 0x65), line_number);
    } else {
        asm.sink.push(ErrorKind::InvalidValue(pointer.to_string()), line_number, 1);
    }
}

fn encode_ld_range(asm: &mut Assembler, pointer: &str, x: u8, y: u8, low_nibble: u8, line_number: usize) {
    if asm.extension < ExtensionTier::XoChip {
        asm.sink
            .push(required_error(ExtensionTier::XoChip, crate::ast::Mnemonic::Ld), line_number, 1);
        return;
    }
    if !pointer.eq_ignore_ascii_case("I") {
        asm.sink.push(ErrorKind::InvalidValue(pointer.to_string()), line_number, 1);
        return;
    }
    asm.emit_bytes(&nibbles(5, x, y, low_nibble), line_number);
}
