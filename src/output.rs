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

/// Chosen by the `OUTPUT` directive; governs how the finished image is
/// serialised to the output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Binary,
    HexAsciiString,
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Binary
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = crate::errors::ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::errors::ErrorKind::InvalidValue(s.to_string()))
    }
}

impl OutputFormat {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "BINARY" => Some(Self::Binary),
            "HEXASCIISTRING" => Some(Self::HexAsciiString),
            _ => None,
        }
    }

    pub fn render(self, image: &[u8]) -> Vec<u8> {
        match self {
            Self::Binary => image.to_vec(),
            Self::HexAsciiString => {
                let mut out = String::with_capacity(image.len() * 2);
                for byte in image {
                    out.push_str(&format!("{byte:02x}"));
                }
                out.into_bytes()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_passes_bytes_through() {
        let image = [0x00, 0xE0, 0xFF];
        assert_eq!(OutputFormat::Binary.render(&image), vec![0x00, 0xE0, 0xFF]);
    }

    #[test]
    fn hex_ascii_string_is_lowercase_no_separators() {
        let image = [0x00, 0xE0, 0xAB];
        assert_eq!(
            OutputFormat::HexAsciiString.render(&image),
            b"00e0ab".to_vec()
        );
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(OutputFormat::parse("binary"), Some(OutputFormat::Binary));
        assert_eq!(
            OutputFormat::parse("HexAsciiString"),
            Some(OutputFormat::HexAsciiString)
        );
        assert_eq!(OutputFormat::parse("nope"), None);
    }
}
