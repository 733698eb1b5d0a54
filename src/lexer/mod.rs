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

//! Character-by-character lexer (§4.1). Built as a hand-written state machine
//! rather than a grammar, since the rules are context-sensitive at the level
//! of individual delimiters (a `;` is a comment outside a string, an error
//! inside a pointer span, and literal inside a string) in a way a
//! context-free grammar does not express directly.

mod directives;
mod operands;

use crate::ast::{Directive, Line, Statement};
use crate::errors::{DiagnosticSink, ErrorKind};

const MAX_LINE_LEN: usize = 4095;

const RESERVED_WORDS: &[&str] = &[
    "I", "OUTPUT", "EXTENSION", "ALIGN", "ORG", "INCBIN", "DB", "DW", "CLS", "RET", "SCD", "SCU",
    "SCR", "SCL", "EXIT", "LOW", "HIGH", "JP", "CALL", "SE", "SNE", "LD", "ADD", "OR", "AND",
    "XOR", "SUB", "SUBN", "SHR", "SHL", "ROR", "ROL", "TEST", "NOT", "RND", "DRW", "SKP", "SKNP",
    "PLANE", "AUDIO", "PITCH",
];

/// A raw token produced by the character scan, before statement-level
/// interpretation (label detection, directive vs. instruction dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineToken {
    Word(String),
    Colon,
    Comma,
    QuotedString(String),
    Bracketed(String),
}

pub fn lex_source(source: &str, sink: &mut DiagnosticSink) -> Vec<Line> {
    source
        .split('\n')
        .enumerate()
        .filter_map(|(idx, raw_line)| {
            let line_number = idx + 1;
            let line_text = raw_line.strip_suffix('\r').unwrap_or(raw_line);
            lex_line(line_text, line_number, sink)
        })
        .collect()
}

fn lex_line(line_text: &str, line_number: usize, sink: &mut DiagnosticSink) -> Option<Line> {
    let truncated = if line_text.len() > MAX_LINE_LEN {
        sink.push(
            ErrorKind::InvalidToken(format!("line exceeds {MAX_LINE_LEN} characters")),
            line_number,
            MAX_LINE_LEN,
        );
        &line_text[..MAX_LINE_LEN]
    } else {
        line_text
    };

    let tokens = scan_tokens(truncated, line_number, sink)?;
    build_line(tokens, line_number, sink)
}

/// Walks the line once, honouring comment/string/pointer modal state, and
/// produces the flat token stream for stage two to interpret.
fn scan_tokens(line: &str, line_number: usize, sink: &mut DiagnosticSink) -> Option<Vec<LineToken>> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut in_string = false;
    let mut in_escape = false;
    let mut in_pointer = false;
    let mut token_col = 1usize;

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0usize;

    macro_rules! fail {
        ($kind:expr, $col:expr) => {{
            sink.push($kind, line_number, $col);
            return None;
        }};
    }

    while i < chars.len() {
        let c = chars[i];
        let col = i + 1;

        if in_string {
            if in_escape {
                buffer.push(c);
                in_escape = false;
            } else if c == '\\' {
                in_escape = true;
            } else if c == '"' {
                in_string = false;
                tokens.push(LineToken::QuotedString(std::mem::take(&mut buffer)));
            } else {
                buffer.push(c);
            }
            i += 1;
            continue;
        }

        if in_pointer {
            match c {
                ';' => fail!(ErrorKind::InvalidToken("comment inside pointer".to_string()), col),
                '[' => fail!(ErrorKind::InvalidToken("nested '['".to_string()), col),
                ']' => {
                    in_pointer = false;
                    tokens.push(LineToken::Bracketed(std::mem::take(&mut buffer)));
                }
                _ => buffer.push(c),
            }
            i += 1;
            continue;
        }

        match c {
            ';' => break,
            ' ' | '\t' => {
                if !buffer.is_empty() {
                    tokens.push(LineToken::Word(std::mem::take(&mut buffer)));
                }
            }
            '"' => {
                if !buffer.is_empty() {
                    tokens.push(LineToken::Word(std::mem::take(&mut buffer)));
                }
                in_string = true;
                token_col = col;
            }
            '[' => {
                if !buffer.is_empty() {
                    tokens.push(LineToken::Word(std::mem::take(&mut buffer)));
                }
                in_pointer = true;
                token_col = col;
            }
            ']' => fail!(ErrorKind::InvalidToken("unmatched ']'".to_string()), col),
            ',' => {
                if !buffer.is_empty() {
                    tokens.push(LineToken::Word(std::mem::take(&mut buffer)));
                }
                tokens.push(LineToken::Comma);
            }
            ':' => {
                if buffer.is_empty() {
                    fail!(
                        ErrorKind::InvalidToken("':' with no preceding identifier".to_string()),
                        col
                    );
                }
                tokens.push(LineToken::Word(std::mem::take(&mut buffer)));
                tokens.push(LineToken::Colon);
            }
            _ => {
                if buffer.is_empty() {
                    token_col = col;
                }
                buffer.push(c);
            }
        }
        i += 1;
    }

    if in_string {
        fail!(
            ErrorKind::InvalidToken("unterminated string literal".to_string()),
            token_col
        );
    }
    if in_pointer {
        fail!(
            ErrorKind::InvalidToken("unterminated pointer operand".to_string()),
            token_col
        );
    }
    if !buffer.is_empty() {
        tokens.push(LineToken::Word(buffer));
    }

    Some(tokens)
}

fn build_line(tokens: Vec<LineToken>, line_number: usize, sink: &mut DiagnosticSink) -> Option<Line> {
    let mut idx = 0usize;
    let mut label = None;

    if let (Some(LineToken::Word(w)), Some(LineToken::Colon)) = (tokens.get(0), tokens.get(1)) {
        if RESERVED_WORDS.contains(&w.to_ascii_uppercase().as_str()) {
            sink.push(ErrorKind::ReservedToken(w.clone()), line_number, 1);
            return None;
        }
        label = Some(w.clone());
        idx = 2;
    }

    if idx >= tokens.len() {
        return Some(Line {
            line_number,
            label,
            statement: None,
        });
    }

    let keyword = match &tokens[idx] {
        LineToken::Word(w) => w.clone(),
        _ => {
            sink.push(
                ErrorKind::InvalidToken("expected a mnemonic or directive".to_string()),
                line_number,
                1,
            );
            return None;
        }
    };
    idx += 1;
    let upper = keyword.to_ascii_uppercase();

    if let Some(directive) = directives::parse_directive(&upper, &tokens[idx..], line_number, sink)? {
        return Some(Line {
            line_number,
            label,
            statement: Some(Statement::Directive(directive)),
        });
    }

    if let Some(mnemonic) = crate::ast::Mnemonic::parse(&upper) {
        let operands = operands::parse_operand_list(&tokens[idx..], line_number, sink)?;
        return Some(Line {
            line_number,
            label,
            statement: Some(Statement::Instruction { mnemonic, operands }),
        });
    }

    sink.push(ErrorKind::InvalidToken(keyword), line_number, 1);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Mnemonic, Operand, Statement};

    fn lex_ok(source: &str) -> (Vec<Line>, DiagnosticSink) {
        let mut sink = DiagnosticSink::new();
        let lines = lex_source(source, &mut sink);
        (lines, sink)
    }

    #[test]
    fn lexes_bare_instruction() {
        let (lines, sink) = lex_ok("CLS\n");
        assert!(sink.is_empty());
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0].statement,
            Some(Statement::Instruction {
                mnemonic: Mnemonic::Cls,
                operands: vec![]
            })
        );
    }

    #[test]
    fn lexes_label_only_line() {
        let (lines, sink) = lex_ok("forward:\n");
        assert!(sink.is_empty());
        assert_eq!(lines[0].label.as_deref(), Some("forward"));
        assert!(lines[0].statement.is_none());
    }

    #[test]
    fn lexes_label_and_instruction_together() {
        let (lines, sink) = lex_ok("start: JP start\n");
        assert!(sink.is_empty());
        assert_eq!(lines[0].label.as_deref(), Some("start"));
        assert_eq!(
            lines[0].statement,
            Some(Statement::Instruction {
                mnemonic: Mnemonic::Jp,
                operands: vec![Operand::Label("start".to_string())]
            })
        );
    }

    #[test]
    fn reserved_word_as_label_is_an_error() {
        let (_, sink) = lex_ok("JP: CLS\n");
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn comment_strips_rest_of_line() {
        let (lines, sink) = lex_ok("CLS ; clear the screen\n");
        assert!(sink.is_empty());
        assert_eq!(
            lines[0].statement,
            Some(Statement::Instruction {
                mnemonic: Mnemonic::Cls,
                operands: vec![]
            })
        );
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let (_, sink) = lex_ok("INCBIN \"no-closing-quote\n");
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn nested_brackets_are_an_error() {
        let (_, sink) = lex_ok("JP [I+[V3]]\n");
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn semicolon_inside_pointer_is_an_error() {
        let (_, sink) = lex_ok("JP [I+V3 ; oops]\n");
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn pointer_operand_is_classified() {
        let (lines, sink) = lex_ok("JP [I+V3]\n");
        assert!(sink.is_empty());
        assert_eq!(
            lines[0].statement,
            Some(Statement::Instruction {
                mnemonic: Mnemonic::Jp,
                operands: vec![Operand::Pointer("I+V3".to_string())]
            })
        );
    }

    #[test]
    fn overlong_line_is_diagnosed_not_silently_truncated() {
        let long = "X".repeat(5000);
        let source = format!("{long}\n");
        let (_, sink) = lex_ok(&source);
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn blank_line_produces_no_statement() {
        let (lines, sink) = lex_ok("\n");
        assert!(sink.is_empty());
        assert!(lines[0].label.is_none());
        assert!(lines[0].statement.is_none());
    }
}
