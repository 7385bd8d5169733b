//! This crate builds and reads the [EBML][EBML] element tree of live-streamed [WebM][webm] files.
//!
//! [EBML][EBML] stands for Extensible Binary Meta-Language and is somewhat of a
//! binary version of XML. It's used for container formats like [WebM][webm] or
//! [MKV][mkv].
//!
//! # Writing
//! [`init_segment`] turns a [`MuxConfig`] into the EBML header and an open `Segment` (Info, Tracks and a first `Cluster`).  Frames are then appended with a [`MuxSession`], which starts a new `Cluster` whenever a block's timestamp can no longer be expressed relative to the current one.  [`WebmMuxer`] ties both together over any [`std::io::Write`].
//!
//! # Reading
//! [`tag_parser::parse_element`] and [`tag_parser::parse_children`] read elements from an in-memory buffer using the closed [`MatroskaTag`] registry.  Elements with an "Unknown Data Size" as defined in [RFC8794][rfc8794] are supported: they end at the next element that is their parent, their sibling or a root element, or at the end of the buffer.  [`tag_parser::parse_children_partial`] also returns the elements read before a parse error.
//!
//! [EBML]: http://ebml.sourceforge.net/
//! [webm]: https://www.webmproject.org/
//! [mkv]: http://www.matroska.org/technical/specs/index.html
//! [rfc8794]: https://datatracker.ietf.org/doc/rfc8794/
//!

mod errors;
mod spec_util;
mod tag_writer;
pub mod tools;
pub mod specs;
pub mod element;
pub mod matroska_spec;
pub mod tag_parser;
pub mod cluster;
pub mod config;
pub mod init_segment;
pub mod muxer;

#[cfg(feature = "futures")]
pub mod nonblocking;

pub use self::cluster::{MuxSession, SimpleBlock};
pub use self::config::MuxConfig;
pub use self::element::{EbmlSize, Element};
pub use self::matroska_spec::MatroskaTag;
pub use self::muxer::WebmMuxer;
pub use self::tag_parser::ParsedElement;
pub use self::tag_writer::TagWriter;

pub mod error {
    //! Errors produced by this crate.

    pub use super::errors::tool::ToolError;
    pub use super::errors::tag_parser::{ParseError, SpecMismatchError};
    pub use super::errors::tag_writer::TagWriterError;
    pub use super::errors::config::ConfigError;
}
