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

use super::LineToken;
use crate::ast::Operand;
use crate::errors::{DiagnosticSink, ErrorKind};

/// Splits a comma-delimited run of tokens into individually-classified
/// operands. Each comma-separated segment must reduce to exactly one token.
pub(crate) fn parse_operand_list(
    tokens: &[LineToken],
    line_number: usize,
    sink: &mut DiagnosticSink,
) -> Option<Vec<Operand>> {
    if tokens.is_empty() {
        return Some(Vec::new());
    }

    let mut operands = Vec::new();
    let mut segment: Vec<&LineToken> = Vec::new();

    for tok in tokens {
        if matches!(tok, LineToken::Comma) {
            operands.push(classify_segment(&segment, line_number, sink)?);
            segment.clear();
        } else {
            segment.push(tok);
        }
    }
    operands.push(classify_segment(&segment, line_number, sink)?);

    Some(operands)
}

fn classify_segment(
    segment: &[&LineToken],
    line_number: usize,
    sink: &mut DiagnosticSink,
) -> Option<Operand> {
    if segment.len() != 1 {
        sink.push(
            ErrorKind::InvalidToken("malformed operand".to_string()),
            line_number,
            1,
        );
        return None;
    }

    Some(match segment[0] {
        LineToken::Bracketed(s) => Operand::Pointer(s.clone()),
        LineToken::QuotedString(s) => Operand::Str(s.clone()),
        LineToken::Word(w) => classify_word(w),
        LineToken::Colon | LineToken::Comma => {
            sink.push(
                ErrorKind::InvalidToken("malformed operand".to_string()),
                line_number,
                1,
            );
            return None;
        }
    })
}

pub(crate) fn classify_word(w: &str) -> Operand {
    let upper = w.to_ascii_uppercase();
    if let Some(reg) = parse_register(&upper) {
        return Operand::Register(reg);
    }
    match upper.as_str() {
        "I" => return Operand::IndexRegister,
        "DT" => return Operand::DelayTimer,
        "ST" => return Operand::SoundTimer,
        "K" => return Operand::Key,
        "F" => return Operand::Font,
        "HF" => return Operand::HighFont,
        "B" => return Operand::Bcd,
        "R" => return Operand::UserRpl,
        _ => {}
    }
    if w.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        Operand::Immediate(w.to_string())
    } else {
        Operand::Label(w.to_string())
    }
}

fn parse_register(upper: &str) -> Option<u8> {
    let rest = upper.strip_prefix('V')?;
    if rest.len() != 1 {
        return None;
    }
    u8::from_str_radix(rest, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_registers() {
        assert_eq!(classify_word("V0"), Operand::Register(0));
        assert_eq!(classify_word("vf"), Operand::Register(0xF));
        assert_eq!(classify_word("Va"), Operand::Register(0xA));
    }

    #[test]
    fn classifies_singleton_keywords() {
        assert_eq!(classify_word("I"), Operand::IndexRegister);
        assert_eq!(classify_word("dt"), Operand::DelayTimer);
        assert_eq!(classify_word("ST"), Operand::SoundTimer);
        assert_eq!(classify_word("k"), Operand::Key);
        assert_eq!(classify_word("F"), Operand::Font);
        assert_eq!(classify_word("hf"), Operand::HighFont);
        assert_eq!(classify_word("B"), Operand::Bcd);
        assert_eq!(classify_word("r"), Operand::UserRpl);
    }

    #[test]
    fn classifies_immediate_by_leading_digit() {
        assert_eq!(classify_word("0x200"), Operand::Immediate("0x200".to_string()));
        assert_eq!(classify_word("42"), Operand::Immediate("42".to_string()));
    }

    #[test]
    fn classifies_label_when_not_digit_led() {
        assert_eq!(classify_word("loop"), Operand::Label("loop".to_string()));
    }
}
