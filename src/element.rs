//!
//! Contains the in-memory element tree model and its wire encoding.
//!
//! An [`Element`] is a value: a tag, a size mode and the payload bytes.  Master elements are built bottom-up by concatenating the encoded children into the parent's payload, so an element never holds references to other elements.
//!

use super::errors::tag_writer::TagWriterError;
use super::specs::EbmlSpecification;
use super::tools::{self, Vint};

///
/// The size mode of an element.
///
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EbmlSize {
    ///
    /// The element's data is exactly this many bytes.
    ///
    Known(usize),

    ///
    /// The element's size was declared "unknown" - it is still being appended to (e.g. a live `Cluster`).
    ///
    Unknown,
}

impl EbmlSize {
    pub fn is_known(&self) -> bool {
        matches!(self, EbmlSize::Known(_))
    }

    pub fn known(&self) -> Option<usize> {
        match self {
            EbmlSize::Known(size) => Some(*size),
            EbmlSize::Unknown => None,
        }
    }
}

///
/// A single EBML element ready to be encoded.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element<T: EbmlSpecification> {
    pub tag: T,
    pub size: EbmlSize,
    pub payload: Vec<u8>,
}

impl<T: EbmlSpecification> Element<T> {

    ///
    /// Creates an element with a known size matching `payload`.
    ///
    pub fn new(tag: T, payload: Vec<u8>) -> Self {
        Element {
            tag,
            size: EbmlSize::Known(payload.len()),
            payload,
        }
    }

    ///
    /// Creates an element whose size field will be written as "unknown".
    ///
    /// # Errors
    ///
    /// Fails if the specification does not allow `tag` to be written with an unknown size.
    ///
    pub fn unknown_size(tag: T, payload: Vec<u8>) -> Result<Self, TagWriterError> {
        if !tag.supports_unknown_size() {
            return Err(TagWriterError::UnknownSizeNotAllowed { tag: tag.get_name() });
        }

        Ok(Element {
            tag,
            size: EbmlSize::Unknown,
            payload,
        })
    }

    ///
    /// Creates an unsigned integer element, using the fewest big endian bytes that hold `value`.
    ///
    pub fn unsigned_int(tag: T, value: u64) -> Self {
        Element::new(tag, tools::as_minimal_be_bytes(value))
    }

    ///
    /// Creates a signed integer element, using the fewest two's complement bytes that hold `value`.
    ///
    pub fn signed_int(tag: T, value: i64) -> Self {
        Element::new(tag, tools::as_minimal_be_bytes_signed(value))
    }

    ///
    /// Creates a string element.  The text is written as-is, without a terminator.
    ///
    pub fn utf8(tag: T, value: &str) -> Self {
        Element::new(tag, value.as_bytes().to_vec())
    }

    pub fn binary(tag: T, value: &[u8]) -> Self {
        Element::new(tag, value.to_vec())
    }

    ///
    /// Creates a float element holding an 8 byte IEEE-754 value.
    ///
    pub fn float(tag: T, value: f64) -> Self {
        Element::new(tag, value.to_be_bytes().to_vec())
    }

    ///
    /// Creates a known-size master element from already built children, in order.
    ///
    /// # Errors
    ///
    /// Fails if any child cannot be encoded.
    ///
    pub fn master(tag: T, children: &[Element<T>]) -> Result<Self, TagWriterError> {
        Ok(Element::new(tag, concat_children(children)?))
    }

    ///
    /// Creates an unknown-size master element from already built children, in order.
    ///
    /// # Errors
    ///
    /// Fails if any child cannot be encoded or if `tag` cannot have an unknown size.
    ///
    pub fn unknown_sized_master(tag: T, children: &[Element<T>]) -> Result<Self, TagWriterError> {
        Element::unknown_size(tag, concat_children(children)?)
    }

    ///
    /// Encodes the id and size field of this element.
    ///
    /// # Errors
    ///
    /// Fails if a known size does not match the payload length or cannot be written as a vint, or if the size is unknown for a tag that cannot have an unknown size.
    ///
    pub fn header_bytes(&self) -> Result<Vec<u8>, TagWriterError> {
        match self.size {
            EbmlSize::Known(declared) if declared != self.payload.len() => {
                return Err(TagWriterError::SizeMismatch {
                    tag: self.tag.get_name(),
                    declared,
                    actual: self.payload.len(),
                });
            },
            EbmlSize::Unknown if !self.tag.supports_unknown_size() => {
                return Err(TagWriterError::UnknownSizeNotAllowed { tag: self.tag.get_name() });
            },
            _ => {}
        }

        let mut header = self.tag.get_id_bytes();
        let size = tools::encode_size(self.size)
            .map_err(|source| TagWriterError::ValueTooLarge { tag: self.tag.get_name(), source })?;
        header.extend_from_slice(&size);
        Ok(header)
    }

    ///
    /// Encodes this element as `id ++ size field ++ payload`.
    ///
    /// # Errors
    ///
    /// See [`Element::header_bytes`].
    ///
    pub fn to_wire_bytes(&self) -> Result<Vec<u8>, TagWriterError> {
        let mut bytes = self.header_bytes()?;
        bytes.extend_from_slice(&self.payload);
        Ok(bytes)
    }

    ///
    /// Total number of bytes [`Element::to_wire_bytes`] produces.
    ///
    pub fn wire_len(&self) -> usize {
        let size_len = match self.size {
            EbmlSize::Unknown => tools::UNKNOWN_SIZE.len(),
            EbmlSize::Known(len) => (len as u64).as_vint().map(|v| v.len()).unwrap_or(8),
        };
        self.tag.get_id_bytes().len() + size_len + self.payload.len()
    }
}

fn concat_children<T: EbmlSpecification>(children: &[Element<T>]) -> Result<Vec<u8>, TagWriterError> {
    let mut payload = Vec::with_capacity(children.iter().map(Element::wire_len).sum());
    for child in children {
        payload.extend_from_slice(&child.header_bytes()?);
        payload.extend_from_slice(&child.payload);
    }
    Ok(payload)
}
