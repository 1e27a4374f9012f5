use std::borrow::Cow;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use encoding_rs::{GBK, UTF_8};
use serde::{Deserialize, Serialize};

use crate::errors::GenerationError;

/// Text encoding of the written point table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputEncoding {
    /// Legacy Chinese codepage expected by the configuration tools.
    #[default]
    Gbk,
    Utf8,
}

impl OutputEncoding {
    pub fn name(self) -> &'static str {
        match self {
            OutputEncoding::Gbk => "gbk",
            OutputEncoding::Utf8 => "utf8",
        }
    }

    pub fn encode(self, text: &str) -> Result<Vec<u8>, GenerationError> {
        match self {
            OutputEncoding::Utf8 => Ok(text.as_bytes().to_vec()),
            OutputEncoding::Gbk => {
                let (bytes, _, had_errors) = GBK.encode(text);
                if had_errors {
                    return Err(GenerationError::Encode {
                        encoding: self.name(),
                        text: first_unmappable(text),
                    });
                }
                Ok(bytes.into_owned())
            }
        }
    }
}

impl FromStr for OutputEncoding {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "gbk" | "ansi" => Ok(OutputEncoding::Gbk),
            "utf8" | "utf-8" => Ok(OutputEncoding::Utf8),
            other => Err(format!("unknown encoding '{other}' (expected gbk or utf8)")),
        }
    }
}

impl fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode input bytes as UTF-8 (BOM stripped), falling back to GBK.
///
/// Returns `None` when neither decoding succeeds without replacement.
pub fn decode_text(bytes: &[u8]) -> Option<String> {
    let (text, had_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !had_errors {
        return Some(text.into_owned());
    }
    GBK.decode_without_bom_handling_and_without_replacement(bytes)
        .map(Cow::into_owned)
}

/// Read a file and decode it with [`decode_text`].
pub fn read_text(path: &Path) -> Result<String, GenerationError> {
    let bytes = std::fs::read(path)?;
    decode_text(&bytes).ok_or_else(|| GenerationError::Decode {
        path: path.to_path_buf(),
    })
}

fn first_unmappable(text: &str) -> String {
    let mut buf = [0_u8; 4];
    text.chars()
        .find(|ch| {
            let (_, _, had_errors) = GBK.encode(ch.encode_utf8(&mut buf));
            had_errors
        })
        .map(String::from)
        .unwrap_or_default()
}
