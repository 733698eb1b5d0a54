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

use crate::errors::ErrorKind;

/// Decodes a decimal, `0x` hex, or `0b` binary literal, masking to `width_bits`.
/// The full operand text must match one grammar; leftover characters are an error.
pub fn parse_literal(text: &str, width_bits: u32) -> Result<u32, ErrorKind> {
    let mask = if width_bits >= 32 {
        u32::MAX
    } else {
        (1u32 << width_bits) - 1
    };

    let value = if let Some(digits) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ErrorKind::InvalidValue(text.to_string()));
        }
        u32::from_str_radix(digits, 16).map_err(|_| ErrorKind::InvalidValue(text.to_string()))?
    } else if let Some(digits) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        if digits.is_empty() || !digits.chars().all(|c| c == '0' || c == '1') {
            return Err(ErrorKind::InvalidValue(text.to_string()));
        }
        u32::from_str_radix(digits, 2).map_err(|_| ErrorKind::InvalidValue(text.to_string()))?
    } else {
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
            return Err(ErrorKind::InvalidValue(text.to_string()));
        }
        text.parse::<u32>()
            .map_err(|_| ErrorKind::InvalidValue(text.to_string()))?
    };

    Ok(value & mask)
}
