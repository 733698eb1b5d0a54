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

use crate::extension::ExtensionTier;
use crate::output::OutputFormat;

/// An operand as classified by the lexer (§4.1). Immediates carry their raw
/// text rather than a decoded value, since the bit width they are bound to
/// is only known at the point of use (byte vs. word vs. nibble).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(u8),
    IndexRegister,
    DelayTimer,
    SoundTimer,
    Key,
    Font,
    HighFont,
    Bcd,
    UserRpl,
    Immediate(String),
    Label(String),
    /// Raw text enclosed in `[ ]`, e.g. `"I"` or `"I+V3"`.
    Pointer(String),
    /// A decoded (escape-processed) string body; only ever produced for `DB`
    /// string operands and the single `INCBIN` path operand.
    Str(String),
}

/// Every mnemonic this assembler recognises, independent of extension gating
/// (admissibility is a property of the instruction table, not of this type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mnemonic {
    Cls,
    Ret,
    Scd,
    Scu,
    Scr,
    Scl,
    Exit,
    Low,
    High,
    Jp,
    Call,
    Se,
    Sne,
    Ld,
    Add,
    Or,
    And,
    Xor,
    Sub,
    Subn,
    Shr,
    Shl,
    Ror,
    Rol,
    Test,
    Not,
    Rnd,
    Drw,
    Skp,
    Sknp,
    Plane,
    Audio,
    Pitch,
}

impl Mnemonic {
    pub fn parse(text: &str) -> Option<Self> {
        Some(match text.to_ascii_uppercase().as_str() {
            "CLS" => Self::Cls,
            "RET" => Self::Ret,
            "SCD" => Self::Scd,
            "SCU" => Self::Scu,
            "SCR" => Self::Scr,
            "SCL" => Self::Scl,
            "EXIT" => Self::Exit,
            "LOW" => Self::Low,
            "HIGH" => Self::High,
            "JP" => Self::Jp,
            "CALL" => Self::Call,
            "SE" => Self::Se,
            "SNE" => Self::Sne,
            "LD" => Self::Ld,
            "ADD" => Self::Add,
            "OR" => Self::Or,
            "AND" => Self::And,
            "XOR" => Self::Xor,
            "SUB" => Self::Sub,
            "SUBN" => Self::Subn,
            "SHR" => Self::Shr,
            "SHL" => Self::Shl,
            "ROR" => Self::Ror,
            "ROL" => Self::Rol,
            "TEST" => Self::Test,
            "NOT" => Self::Not,
            "RND" => Self::Rnd,
            "DRW" => Self::Drw,
            "SKP" => Self::Skp,
            "SKNP" => Self::Sknp,
            "PLANE" => Self::Plane,
            "AUDIO" => Self::Audio,
            "PITCH" => Self::Pitch,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Cls => "CLS",
            Self::Ret => "RET",
            Self::Scd => "SCD",
            Self::Scu => "SCU",
            Self::Scr => "SCR",
            Self::Scl => "SCL",
            Self::Exit => "EXIT",
            Self::Low => "LOW",
            Self::High => "HIGH",
            Self::Jp => "JP",
            Self::Call => "CALL",
            Self::Se => "SE",
            Self::Sne => "SNE",
            Self::Ld => "LD",
            Self::Add => "ADD",
            Self::Or => "OR",
            Self::And => "AND",
            Self::Xor => "XOR",
            Self::Sub => "SUB",
            Self::Subn => "SUBN",
            Self::Shr => "SHR",
            Self::Shl => "SHL",
            Self::Ror => "ROR",
            Self::Rol => "ROL",
            Self::Test => "TEST",
            Self::Not => "NOT",
            Self::Rnd => "RND",
            Self::Drw => "DRW",
            Self::Skp => "SKP",
            Self::Sknp => "SKNP",
            Self::Plane => "PLANE",
            Self::Audio => "AUDIO",
            Self::Pitch => "PITCH",
        }
    }
}

/// A `DB` list item: either a literal byte value or a string body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbValue {
    Byte(Operand),
    Str(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Output(OutputFormat),
    Extension(ExtensionTier),
    Align(bool),
    Org(Operand),
    IncBin(String),
    Db(Vec<DbValue>),
    Dw(Vec<Operand>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Directive(Directive),
    Instruction {
        mnemonic: Mnemonic,
        operands: Vec<Operand>,
    },
}

/// One parsed source line: an optional label definition plus an optional
/// statement. Both absent means a blank or comment-only line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub line_number: usize,
    pub label: Option<String>,
    pub statement: Option<Statement>,
}
