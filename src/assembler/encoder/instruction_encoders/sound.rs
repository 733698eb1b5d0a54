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

//! `XOCHIP` audio pattern mnemonics: `AUDIO`, `PITCH`.

use crate::assembler::encoder::constants::fx;
use crate::assembler::encoder::reg;
use crate::assembler::Assembler;
use crate::ast::{Mnemonic, Operand};
use crate::errors::ErrorKind;

pub(crate) fn encode(asm: &mut Assembler, mnemonic: Mnemonic, operands: &[Operand], line_number: usize) {
    match mnemonic {
        Mnemonic::Audio => asm.emit_bytes(&[0xF0, 0x02], line_number),
        Mnemonic::Pitch => match reg(&operands[0]) {
            Some(x) => asm.emit_bytes(&fx(x, 0x3A), line_number),
            None => asm
                .sink
                .push(ErrorKind::InvalidRegister(format!("{:?}", operands[0])), line_number, 1),
        },
        _ => unreachable!("sound::encode called with a non-sound mnemonic"),
    }
}
