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

use super::operands::classify_word;
use super::LineToken;
use crate::ast::{DbValue, Directive, Operand};
use crate::errors::{DiagnosticSink, ErrorKind};
use crate::extension::ExtensionTier;
use crate::output::OutputFormat;

/// Dispatches on the directive keyword through a single `match`, fixing the
/// non-mutually-exclusive branch bug noted against the original source.
///
/// Returns `None` (outer) if a structural error already aborted the line,
/// `Some(None)` if `upper` is not a directive keyword at all (caller should
/// try mnemonic dispatch next), `Some(Some(directive))` on success.
pub(crate) fn parse_directive(
    upper: &str,
    tokens: &[LineToken],
    line_number: usize,
    sink: &mut DiagnosticSink,
) -> Option<Option<Directive>> {
    let directive = match upper {
        "OUTPUT" => Directive::Output(parse_output(tokens, line_number, sink)?),
        "EXTENSION" => Directive::Extension(parse_extension(tokens, line_number, sink)?),
        "ALIGN" => Directive::Align(parse_align(tokens, line_number, sink)?),
        "ORG" => Directive::Org(parse_org(tokens, line_number, sink)?),
        "INCBIN" => Directive::IncBin(parse_incbin(tokens, line_number, sink)?),
        "DB" => Directive::Db(parse_db(tokens, line_number, sink)?),
        "DW" => Directive::Dw(parse_dw(tokens, line_number, sink)?),
        _ => return Some(None),
    };
    Some(Some(directive))
}

fn single_word(tokens: &[LineToken]) -> Option<&str> {
    match tokens {
        [LineToken::Word(w)] => Some(w),
        _ => None,
    }
}

fn parse_output(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<OutputFormat> {
    let word = single_word(tokens).ok_or(()).ok();
    match word.and_then(OutputFormat::parse) {
        Some(fmt) => Some(fmt),
        None => {
            sink.push(
                ErrorKind::InvalidValue(describe(tokens)),
                line_number,
                1,
            );
            None
        }
    }
}

fn parse_extension(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<ExtensionTier> {
    let word = single_word(tokens);
    match word.and_then(ExtensionTier::parse) {
        Some(ext) => Some(ext),
        None => {
            sink.push(ErrorKind::InvalidValue(describe(tokens)), line_number, 1);
            None
        }
    }
}

fn parse_align(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<bool> {
    match single_word(tokens).map(|w| w.to_ascii_uppercase()) {
        Some(ref w) if w == "ON" => Some(true),
        Some(ref w) if w == "OFF" => Some(false),
        _ => {
            sink.push(ErrorKind::InvalidValue(describe(tokens)), line_number, 1);
            None
        }
    }
}

fn parse_org(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<Operand> {
    match single_word(tokens) {
        Some(w) => match classify_word(w) {
            op @ Operand::Immediate(_) => Some(op),
            _ => {
                sink.push(ErrorKind::InvalidValue(w.to_string()), line_number, 1);
                None
            }
        },
        None => {
            sink.push(ErrorKind::InvalidValue(describe(tokens)), line_number, 1);
            None
        }
    }
}

fn parse_incbin(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<String> {
    match tokens {
        [LineToken::QuotedString(s)] => Some(s.clone()),
        _ => {
            sink.push(
                ErrorKind::InvalidValue("expected a quoted path".to_string()),
                line_number,
                1,
            );
            None
        }
    }
}

fn parse_db(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<Vec<DbValue>> {
    let mut values = Vec::new();
    for segment in tokens.split(|t| matches!(t, LineToken::Comma)) {
        match segment {
            [LineToken::QuotedString(s)] => values.push(DbValue::Str(s.clone())),
            [LineToken::Word(w)] => match classify_word(w) {
                op @ Operand::Immediate(_) => values.push(DbValue::Byte(op)),
                _ => {
                    sink.push(ErrorKind::InvalidValue(w.to_string()), line_number, 1);
                    return None;
                }
            },
            _ => {
                sink.push(
                    ErrorKind::InvalidValue("malformed DB operand".to_string()),
                    line_number,
                    1,
                );
                return None;
            }
        }
    }
    if values.is_empty() {
        sink.push(ErrorKind::TooFewOperands("DB".to_string(), 1), line_number, 1);
        return None;
    }
    Some(values)
}

fn parse_dw(tokens: &[LineToken], line_number: usize, sink: &mut DiagnosticSink) -> Option<Vec<Operand>> {
    let mut values = Vec::new();
    for segment in tokens.split(|t| matches!(t, LineToken::Comma)) {
        match segment {
            [LineToken::Word(w)] => values.push(classify_word(w)),
            _ => {
                sink.push(
                    ErrorKind::InvalidValue("malformed DW operand".to_string()),
                    line_number,
                    1,
                );
                return None;
            }
        }
    }
    if values.is_empty() {
        sink.push(ErrorKind::TooFewOperands("DW".to_string(), 1), line_number, 1);
        return None;
    }
    Some(values)
}

fn describe(tokens: &[LineToken]) -> String {
    match tokens {
        [LineToken::Word(w)] => w.clone(),
        [] => String::new(),
        _ => "<malformed>".to_string(),
    }
}
