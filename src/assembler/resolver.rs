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

use crate::assembler::symbol_table::SymbolTable;
use crate::errors::{DiagnosticSink, ErrorKind};

/// A forward reference the encoder could not settle immediately. Recorded
/// once, patched (or diagnosed) once the whole file has been scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub name: String,
    pub source_line: usize,
    pub image_offset: usize,
    pub is_instruction: bool,
    pub is_extended: bool,
}

/// Patches every recorded reference against the now-complete symbol table,
/// per §4.7. Unmatched names raise an `UnresolvedReference` diagnostic each.
pub fn resolve(image: &mut [u8], symbols: &SymbolTable, refs: &[UnresolvedReference], sink: &mut DiagnosticSink) {
    for reference in refs {
        let Some(symbol) = symbols.lookup(&reference.name) else {
            sink.push(
                ErrorKind::UnresolvedReference(reference.name.clone()),
                reference.source_line,
                0,
            );
            continue;
        };
        let addr = symbol.location;
        let off = reference.image_offset;

        if reference.is_instruction {
            if reference.is_extended {
                image[off] |= (addr >> 12) as u8;
                image[off + 2] |= ((addr & 0x0F00) >> 8) as u8;
                image[off + 3] = (addr & 0xFF) as u8;
            } else {
                image[off] |= ((addr & 0x0F00) >> 8) as u8;
                image[off + 1] = (addr & 0xFF) as u8;
            }
        } else {
            image[off] = (addr >> 8) as u8;
            image[off + 1] = (addr & 0xFF) as u8;
        }

        tracing::trace!(
            "resolved '{}' -> 0x{:04X} at offset {}",
            reference.name,
            addr,
            off
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patches_non_extended_instruction_reference() {
        let mut image = vec![0x10, 0x00];
        let mut symbols = SymbolTable::new();
        symbols.define("start".to_string(), 0x200);
        let refs = vec![UnresolvedReference {
            name: "start".to_string(),
            source_line: 1,
            image_offset: 0,
            is_instruction: true,
            is_extended: false,
        }];
        let mut sink = DiagnosticSink::new();
        resolve(&mut image, &symbols, &refs, &mut sink);
        assert_eq!(image, vec![0x12, 0x00]);
        assert!(sink.is_empty());
    }

    #[test]
    fn patches_extended_hchip64_instruction_reference() {
        // LD I, <forward> under HCHIP64: prefix F0 B0, then A0 00 (base A, mid 0).
        let mut image = vec![0xF0, 0xB0, 0xA0, 0x00];
        let mut symbols = SymbolTable::new();
        symbols.define("big".to_string(), 0x1234);
        let refs = vec![UnresolvedReference {
            name: "big".to_string(),
            source_line: 1,
            image_offset: 0,
            is_instruction: true,
            is_extended: true,
        }];
        let mut sink = DiagnosticSink::new();
        resolve(&mut image, &symbols, &refs, &mut sink);
        assert_eq!(image, vec![0xF1, 0xB0, 0xA2, 0x34]);
    }

    #[test]
    fn patches_data_word_reference_big_endian() {
        let mut image = vec![0x00, 0x00];
        let mut symbols = SymbolTable::new();
        symbols.define("mylabel".to_string(), 0x0202);
        let refs = vec![UnresolvedReference {
            name: "mylabel".to_string(),
            source_line: 1,
            image_offset: 0,
            is_instruction: false,
            is_extended: false,
        }];
        let mut sink = DiagnosticSink::new();
        resolve(&mut image, &symbols, &refs, &mut sink);
        assert_eq!(image, vec![0x02, 0x02]);
    }

    #[test]
    fn unmatched_reference_raises_diagnostic() {
        let mut image = vec![0x00, 0x00];
        let symbols = SymbolTable::new();
        let refs = vec![UnresolvedReference {
            name: "ghost".to_string(),
            source_line: 7,
            image_offset: 0,
            is_instruction: false,
            is_extended: false,
        }];
        let mut sink = DiagnosticSink::new();
        resolve(&mut image, &symbols, &refs, &mut sink);
        assert_eq!(sink.error_count(), 1);
        assert_eq!(
            sink.diagnostics()[0].kind,
            ErrorKind::UnresolvedReference("ghost".to_string())
        );
    }
}
