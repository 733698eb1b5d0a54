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

/// Target instruction set tier. Declaration order IS the admissibility order:
/// `CHIP8 < SCHIP10 < SCHIP11 < XOCHIP < HCHIP64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExtensionTier {
    Chip8,
    SChip10,
    SChip11,
    XoChip,
    HChip64,
}

impl ExtensionTier {
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "CHIP8" => Some(Self::Chip8),
            "SCHIP10" => Some(Self::SChip10),
            "SCHIP11" => Some(Self::SChip11),
            "XOCHIP" => Some(Self::XoChip),
            "HCHIP64" => Some(Self::HChip64),
            _ => None,
        }
    }

    /// `XOCHIP` and `HCHIP64` both lift the 4KB address ceiling.
    pub fn supports_extended_memory(self) -> bool {
        matches!(self, Self::XoChip | Self::HChip64)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Chip8 => "CHIP8",
            Self::SChip10 => "SCHIP10",
            Self::SChip11 => "SCHIP11",
            Self::XoChip => "XOCHIP",
            Self::HChip64 => "HCHIP64",
        }
    }
}

impl Default for ExtensionTier {
    fn default() -> Self {
        Self::Chip8
    }
}

impl std::str::FromStr for ExtensionTier {
    type Err = crate::errors::ErrorKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| crate::errors::ErrorKind::InvalidValue(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_names_case_insensitively() {
        assert_eq!(ExtensionTier::parse("chip8"), Some(ExtensionTier::Chip8));
        assert_eq!(ExtensionTier::parse("Schip10"), Some(ExtensionTier::SChip10));
        assert_eq!(ExtensionTier::parse("SCHIP11"), Some(ExtensionTier::SChip11));
        assert_eq!(ExtensionTier::parse("xochip"), Some(ExtensionTier::XoChip));
        assert_eq!(ExtensionTier::parse("HChip64"), Some(ExtensionTier::HChip64));
        assert_eq!(ExtensionTier::parse("nonsense"), None);
    }

    #[test]
    fn total_order_matches_spec() {
        assert!(ExtensionTier::Chip8 < ExtensionTier::SChip10);
        assert!(ExtensionTier::SChip10 < ExtensionTier::SChip11);
        assert!(ExtensionTier::SChip11 < ExtensionTier::XoChip);
        assert!(ExtensionTier::XoChip < ExtensionTier::HChip64);
    }

    #[test]
    fn only_xochip_and_hchip64_extend_memory() {
        assert!(!ExtensionTier::Chip8.supports_extended_memory());
        assert!(!ExtensionTier::SChip10.supports_extended_memory());
        assert!(!ExtensionTier::SChip11.supports_extended_memory());
        assert!(ExtensionTier::XoChip.supports_extended_memory());
        assert!(ExtensionTier::HChip64.supports_extended_memory());
    }
}
