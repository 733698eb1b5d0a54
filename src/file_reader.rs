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

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Abstracts the filesystem accesses the core performs: reading the entry
/// source as text, and reading an `INCBIN` target as raw bytes. Lets the
/// assembler be driven entirely from in-memory fixtures in tests.
pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
    fn read_binary(&self, path: &Path) -> std::io::Result<Vec<u8>>;
}

/// Production implementation backed by `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsmFileReader;

impl FileReader for AsmFileReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        fs::read_to_string(path)
    }

    fn read_binary(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        fs::read(path)
    }
}

#[derive(Debug, Clone)]
enum FileData {
    Text(String),
    Binary(Vec<u8>),
}

/// Test double answering from a pre-seeded map of path to contents.
#[derive(Debug, Default, Clone)]
pub struct MockFileReader {
    files: HashMap<PathBuf, FileData>,
}

impl MockFileReader {
    pub fn add_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<String>) -> &mut Self {
        self.files.insert(path.into(), FileData::Text(contents.into()));
        self
    }

    pub fn add_binary_file(&mut self, path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> &mut Self {
        self.files.insert(path.into(), FileData::Binary(contents.into()));
        self
    }
}

impl FileReader for MockFileReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        match self.files.get(path) {
            Some(FileData::Text(s)) => Ok(s.clone()),
            Some(FileData::Binary(b)) => Ok(String::from_utf8_lossy(b).into_owned()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such mock file: {}", path.display()),
            )),
        }
    }

    fn read_binary(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        match self.files.get(path) {
            Some(FileData::Binary(b)) => Ok(b.clone()),
            Some(FileData::Text(s)) => Ok(s.clone().into_bytes()),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no such mock file: {}", path.display()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_reader_answers_seeded_text_file() {
        let mut reader = MockFileReader::default();
        reader.add_file("test.asm", "CLS\n");
        assert_eq!(reader.read_to_string(Path::new("test.asm")).unwrap(), "CLS\n");
    }

    #[test]
    fn mock_reader_answers_seeded_binary_file() {
        let mut reader = MockFileReader::default();
        reader.add_binary_file("sprite.bin", vec![0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(
            reader.read_binary(Path::new("sprite.bin")).unwrap(),
            vec![0xDE, 0xAD, 0xBE, 0xEF]
        );
    }

    #[test]
    fn mock_reader_errors_on_missing_file() {
        let reader = MockFileReader::default();
        assert!(reader.read_binary(Path::new("missing.bin")).is_err());
    }
}
