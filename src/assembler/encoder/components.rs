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

//! Composite byte-assembly helpers shared by more than one instruction
//! category: the `addr`-operand family (`JP`/`CALL`/`LD I,addr`/`JP V0,addr`)
//! and `[I+VX]`-style pointer operands.

use super::constants::addr as addr_bytes;
use crate::assembler::resolver::UnresolvedReference;
use crate::assembler::{AddrResolution, Assembler};
use crate::ast::Operand;
use crate::errors::ErrorKind;
use crate::extension::ExtensionTier;

/// Emits an `addr`-shaped operand for `JP addr` (`hi=1`), `CALL addr` (`hi=2`),
/// `LD I,addr` (`hi=0xA`, `is_ld_i=true`) or the address half of `JP V0,addr`
/// (`hi=0xB`). Handles the immediately-resolved path, the `HCHIP64` and
/// `XOCHIP` long-load extended-address paths, and deferred label references
/// for all of the above, per §4.5's "Extended addresses" rules.
pub(crate) fn emit_addr_instruction(
    asm: &mut Assembler,
    hi: u8,
    operand: &Operand,
    line_number: usize,
    is_ld_i: bool,
) {
    let Some(resolution) = asm.resolve_addr_operand(operand, 16, line_number) else {
        return;
    };

    match resolution {
        AddrResolution::Known(value) => emit_known_addr(asm, hi, value, line_number, is_ld_i),
        AddrResolution::Deferred(name) => emit_deferred_addr(asm, hi, name, line_number, is_ld_i),
    }
}

fn emit_known_addr(asm: &mut Assembler, hi: u8, value: u16, line_number: usize, is_ld_i: bool) {
    if value <= 0x0FFF {
        asm.emit_bytes(&addr_bytes(hi, value), line_number);
        return;
    }

    match asm.extension {
        ExtensionTier::HChip64 => {
            let prefix = [0xF0 | ((value >> 12) as u8), 0xB0];
            asm.emit_bytes(&prefix, line_number);
            asm.emit_bytes(&addr_bytes(hi, value), line_number);
        }
        ExtensionTier::XoChip if is_ld_i => {
            asm.emit_bytes(&[0xF0, 0x00, (value >> 8) as u8, (value & 0xFF) as u8], line_number);
        }
        _ => asm.sink.push(ErrorKind::Only4KBSupported(value), line_number, 1),
    }
}

fn emit_deferred_addr(asm: &mut Assembler, hi: u8, name: String, line_number: usize, is_ld_i: bool) {
    match asm.extension {
        ExtensionTier::HChip64 => {
            let offset = asm.image.len();
            asm.emit_bytes(&[0xF0, 0xB0, hi << 4, 0x00], line_number);
            asm.unresolved.push(UnresolvedReference {
                name,
                source_line: line_number,
                image_offset: offset,
                is_instruction: true,
                is_extended: true,
            });
        }
        ExtensionTier::XoChip if is_ld_i => {
            let offset = asm.image.len();
            asm.emit_bytes(&[0xF0, 0x00, 0x00, 0x00], line_number);
            asm.unresolved.push(UnresolvedReference {
                name,
                source_line: line_number,
                image_offset: offset + 2,
                is_instruction: false,
                is_extended: false,
            });
        }
        _ => {
            let offset = asm.image.len();
            asm.emit_bytes(&addr_bytes(hi, 0), line_number);
            asm.unresolved.push(UnresolvedReference {
                name,
                source_line: line_number,
                image_offset: offset,
                is_instruction: true,
                is_extended: false,
            });
        }
    }
}

/// Parses a `[I+VX]` pointer body (case-insensitive), returning the register
/// index `X`. Used by the `HCHIP64` indexed-jump/call/load forms.
pub(crate) fn parse_index_plus_reg(text: &str) -> Option<u8> {
    let upper = text.to_ascii_uppercase().replace(' ', "");
    let rest = upper.strip_prefix("I+V")?;
    if rest.len() != 1 {
        return None;
    }
    u8::from_str_radix(rest, 16).ok()
}
