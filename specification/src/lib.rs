//! This crate provides the core EBML specification trait used by the zero-webm crate.
//!
//! The related zero-webm-specification-derive crate provides the `easy_ebml!` macro, which is the intended way to implement this trait.
//!

use std::fmt;

///
/// Different data types defined in the EBML specification.
///
/// # Notes
///
/// "Date" elements are treated as [`TagDataType::Binary`] so that consumers can interpret the unaltered bytes with the library of their choice.
///
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum TagDataType {
    Master,
    UnsignedInt,
    Integer,
    Utf8,
    Binary,
    Float,
}

impl fmt::Display for TagDataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagDataType::Master => "master",
            TagDataType::UnsignedInt => "unsigned int",
            TagDataType::Integer => "integer",
            TagDataType::Utf8 => "utf8",
            TagDataType::Binary => "binary",
            TagDataType::Float => "float",
        };
        f.write_str(name)
    }
}

///
/// This trait should be implemented to define a closed registry of EBML tags.  Typically implemented on a field-less enum of tag variants by the `easy_ebml!` macro.
///
/// The registry is closed: [`EbmlSpecification::get_tag`] *must* return [`None`] for any id that is not part of the specification, and parsers are expected to treat that as a hard error rather than skipping the element.
///
pub trait EbmlSpecification: Copy + Eq + fmt::Debug {
    ///
    /// Pulls a tag from the spec, based on the tag id.
    ///
    /// Ids include their vint marker bits, i.e. the EBML header tag is `0x1a45dfa3`.
    ///
    fn get_tag(id: u64) -> Option<Self>;

    ///
    /// Gets the id of `self`, vint marker bits included.
    ///
    fn get_id(&self) -> u64;

    ///
    /// Gets the name of `self` as it was declared in the specification.
    ///
    fn get_name(&self) -> &'static str;

    ///
    /// Gets the type of data held by `self`.
    ///
    fn get_data_type(&self) -> TagDataType;

    ///
    /// Gets the direct parent of `self`, if any.  Root elements and global elements return `None`.
    ///
    fn get_parent(&self) -> Option<Self>;

    ///
    /// Whether `self` may be written with an "unknown" data size.
    ///
    /// Only master elements that are appended to while streaming (e.g. a Matroska `Segment` or `Cluster`) should return `true`.
    ///
    fn supports_unknown_size(&self) -> bool;

    ///
    /// Whether `self` is a global element (e.g. `Void` or `CRC-32`) that may appear inside any master element.
    ///
    fn is_global(&self) -> bool;

    ///
    /// Whether `self` is a "master" element whose data is a sequence of child elements.
    ///
    fn is_master(&self) -> bool {
        matches!(self.get_data_type(), TagDataType::Master)
    }

    ///
    /// Gets the document path of `self`, starting at the root element and ending at the direct parent.  Root elements return an empty path.
    ///
    fn get_path(&self) -> Vec<Self> {
        let mut path = Vec::new();
        let mut current = self.get_parent();
        while let Some(parent) = current {
            path.push(parent);
            current = parent.get_parent();
        }
        path.reverse();
        path
    }

    ///
    /// Gets the id of `self` as it appears on the wire, i.e. big endian with leading zero bytes removed.
    ///
    fn get_id_bytes(&self) -> Vec<u8> {
        self.get_id().to_be_bytes().iter().skip_while(|&b| *b == 0u8).copied().collect()
    }
}
