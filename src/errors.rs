pub mod tool {
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Eq, Error)]
    pub enum ToolError {
        #[error("Value too large to be written as a vint: {0}")]
        ValueTooLarge(u64),

        #[error("Malformed vint: leading byte has no marker bit set")]
        MalformedVint,

        #[error("Could not read unsigned int from array: {0:?}")]
        ReadU64Overflow(Vec<u8>),

        #[error("Could not read int from array: {0:?}")]
        ReadI64Overflow(Vec<u8>),

        #[error("Could not read float from array: {0:?}")]
        ReadF64Mismatch(Vec<u8>),

        #[error("Block payload of {0} bytes ends before its flags byte")]
        TruncatedBlock(usize),
    }
}

pub mod tag_parser {
    use thiserror::Error;

    #[derive(Debug, Clone, PartialEq, Error)]
    pub enum SpecMismatchError {
        #[error("Error parsing data as Unsigned Int: {0}")]
        UintParseError(String),

        #[error("Error parsing data as Integer: {0}")]
        IntParseError(String),

        #[error("Error parsing data as Utf8: {0}")]
        Utf8ParseError(#[from] std::string::FromUtf8Error),

        #[error("Error parsing data as Float: {0}")]
        FloatParseError(String),

        #[error("Tag declares an unknown size but is not allowed to")]
        UnknownSizeNotAllowed,

        #[error("Tag holds {actual} data, not {requested}")]
        WrongDataType {
            requested: String,
            actual: String,
        },
    }

    ///
    /// Errors produced while parsing an element buffer.
    ///
    /// Every variant carries the absolute offset (relative to the buffer handed to the outermost parse call) of the element or field that failed.
    ///
    #[derive(Debug, Clone, PartialEq, Error)]
    pub enum ParseError {
        #[error("Malformed vint at offset {offset}: leading byte is zero")]
        MalformedVint {
            offset: usize,
        },

        #[error("Unknown tag id 0x{id:x} at offset {offset}")]
        UnknownTag {
            id: u64,
            offset: usize,
        },

        #[error("Truncated input at offset {offset}{}: needed {needed} bytes but only {available} remain", .tag.map(|t| format!(" ({})", t)).unwrap_or_default())]
        TruncatedInput {
            offset: usize,
            tag: Option<&'static str>,
            needed: usize,
            available: usize,
        },

        #[error("Source data does not match the specification for tag {tag} at offset {offset}. {problem}")]
        SpecMismatch {
            tag: &'static str,
            offset: usize,
            problem: SpecMismatchError,
        },
    }
}

pub mod tag_writer {
    use thiserror::Error;
    use std::io;

    use super::config::ConfigError;
    use super::tool::ToolError;

    #[derive(Debug, Error)]
    pub enum TagWriterError {
        #[error("Problem writing tag {tag}. {source}")]
        ValueTooLarge {
            tag: &'static str,
            source: ToolError,
        },

        #[error("Tag {tag} declares a size of {declared} bytes but holds {actual}")]
        SizeMismatch {
            tag: &'static str,
            declared: usize,
            actual: usize,
        },

        #[error("Tag {tag} cannot be written with an unknown size")]
        UnknownSizeNotAllowed {
            tag: &'static str,
        },

        #[error("Unexpected closing tag '{tag}'{}", .expected.map(|e| format!(". Expected '{}'", e)).unwrap_or_default())]
        UnexpectedClosingTag {
            tag: &'static str,
            expected: Option<&'static str>,
        },

        #[error("Cannot write a stream for this config. {source}")]
        InvalidConfig {
            #[from]
            source: ConfigError,
        },

        #[error("Error writing to destination.")]
        WriteError {
            #[from]
            source: io::Error,
        },
    }
}

pub mod config {
    use thiserror::Error;
    use std::io;
    use std::path::PathBuf;

    #[derive(Debug, Error)]
    pub enum ConfigError {
        #[error("Failed to read config file '{}'", .path.display())]
        Read {
            path: PathBuf,
            source: io::Error,
        },

        #[error("Failed to parse config: {source}")]
        Parse {
            #[from]
            source: toml::de::Error,
        },

        #[error("Invalid config: {0}")]
        Invalid(String),
    }
}
