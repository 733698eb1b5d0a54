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

//! Instruction encoder (§4.5): admissibility/operand-count guard, then
//! dispatch into the per-category encoder modules.

pub(crate) mod components;
pub(crate) mod constants;
mod instruction_encoders;

use super::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;
use crate::extension::ExtensionTier;

/// `(min_operands, max_operands, minimum_extension)`. The extension named
/// here is the *mnemonic's* floor; several mnemonics (`LD`, `SCD`/`SCU`,
/// `LD F,VX` vs. `LD HF,VX`, …) additionally gate specific shapes at a
/// stricter tier inside their own encoder function.
fn operand_bounds(mnemonic: Mnemonic) -> (usize, usize, ExtensionTier) {
    use ExtensionTier::*;
    use Mnemonic::*;
    match mnemonic {
        Cls | Ret => (0, 0, Chip8),
        Scr | Scl => (0, 0, SChip11),
        Exit | Low | High => (0, 0, SChip10),
        Audio => (0, 0, XoChip),
        Scd => (1, 1, SChip11),
        Scu => (1, 1, XoChip),
        Plane => (1, 1, XoChip),
        Jp => (1, 2, Chip8),
        Call => (1, 1, Chip8),
        Se | Sne => (2, 2, Chip8),
        Ld => (2, 3, Chip8),
        Add => (2, 2, Chip8),
        Or | And | Xor | Sub | Subn | Shr | Shl => (2, 2, Chip8),
        Ror | Rol | Test | Not => (2, 2, HChip64),
        Rnd => (2, 2, Chip8),
        Drw => (3, 3, Chip8),
        Skp | Sknp => (1, 1, Chip8),
        Pitch => (1, 1, XoChip),
    }
}

pub(crate) fn encode_instruction(
    asm: &mut Assembler,
    mnemonic: Mnemonic,
    operands: &[Operand],
    line_number: usize,
) {
    let (min, max, min_ext) = operand_bounds(mnemonic);

    if min == 0 && max == 0 && !operands.is_empty() {
        asm.sink
            .push(ErrorKind::NoOperandsSupported(mnemonic.name().to_string()), line_number, 1);
        return;
    }
    if operands.len() < min {
        asm.sink
            .push(ErrorKind::TooFewOperands(mnemonic.name().to_string(), min), line_number, 1);
        return;
    }
    if operands.len() > max {
        asm.sink
            .push(ErrorKind::TooManyOperands(mnemonic.name().to_string(), max), line_number, 1);
        return;
    }
    if asm.extension < min_ext {
        asm.sink.push(required_error(min_ext, mnemonic), line_number, 1);
        return;
    }

    use Mnemonic::*;
    match mnemonic {
        Cls | Ret | Scd | Scu | Scr | Scl | Exit | Low | High => {
            instruction_encoders::misc::encode(asm, mnemonic, operands, line_number)
        }
        Jp | Call | Se | Sne | Skp | Sknp => {
            instruction_encoders::control_flow::encode(asm, mnemonic, operands, line_number)
        }
        Ld => instruction_encoders::load_store::encode(asm, operands, line_number),
        Add | Or | And | Xor | Sub | Subn | Shr | Shl | Ror | Rol | Test | Not | Rnd => {
            instruction_encoders::arithmetic::encode(asm, mnemonic, operands, line_number)
        }
        Drw | Plane => instruction_encoders::graphics::encode(asm, mnemonic, operands, line_number),
        Audio | Pitch => instruction_encoders::sound::encode(asm, mnemonic, operands, line_number),
    }
}

/// Maps a failed minimum-extension check to the right taxonomised error.
pub(crate) fn required_error(min_ext: ExtensionTier, mnemonic: Mnemonic) -> ErrorKind {
    match min_ext {
        ExtensionTier::SChip10 => ErrorKind::SuperCHIP10Required(mnemonic.name().to_string()),
        ExtensionTier::SChip11 => ErrorKind::SuperCHIP11Required(mnemonic.name().to_string()),
        ExtensionTier::XoChip => ErrorKind::XOCHIPRequired(mnemonic.name().to_string()),
        ExtensionTier::HChip64 => ErrorKind::HyperCHIP64Required(mnemonic.name().to_string()),
        ExtensionTier::Chip8 => unreachable!("CHIP8 is the default floor, never a failing gate"),
    }
}

/// Extracts the register index from an operand known to be `Operand::Register`.
pub(crate) fn reg(operand: &Operand) -> Option<u8> {
    match operand {
        Operand::Register(r) => Some(*r),
        _ => None,
    }
}
