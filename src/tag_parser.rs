//!
//! Contains the recursive descent parser used to read EBML elements back out of an in-memory buffer.
//!
//! Elements with a known size are bounded by their size field.  Elements with an unknown size (a live `Segment` or `Cluster`) end at the first following element that cannot be one of their descendants: an ancestor, a sibling or a root element.  When no such element follows, they run to the end of the buffer.
//!

use std::fmt;

use log::{debug, trace};

use super::element::EbmlSize;
use super::errors::tag_parser::{ParseError, SpecMismatchError};
use super::errors::tool::ToolError;
use super::spec_util;
use super::specs::{EbmlSpecification, TagDataType};
use super::tools;

///
/// One element read from a buffer.
///
/// The payload borrows from the parsed buffer.  For master elements it holds the encoded children.
///
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ParsedElement<'a, T: EbmlSpecification> {
    pub tag: T,

    ///
    /// The size mode read from the size field.  For [`EbmlSize::Unknown`] the payload length is the resolved one.
    ///
    pub size: EbmlSize,

    ///
    /// Absolute offset of the element's first id byte in the buffer handed to the outermost parse call.
    ///
    pub offset: usize,
    pub payload: &'a [u8],

    ///
    /// Total number of bytes read for this element: id, size field and payload.
    ///
    pub consumed: usize,
}

impl<'a, T: EbmlSpecification> ParsedElement<'a, T> {

    ///
    /// Number of bytes taken by the id and size field.
    ///
    pub fn header_len(&self) -> usize {
        self.consumed - self.payload.len()
    }

    ///
    /// Absolute offset of the first payload byte.
    ///
    pub fn payload_offset(&self) -> usize {
        self.offset + self.header_len()
    }

    fn mismatch(&self, problem: SpecMismatchError) -> ParseError {
        ParseError::SpecMismatch { tag: self.tag.get_name(), offset: self.offset, problem }
    }

    fn check_type(&self, requested: TagDataType) -> Result<(), ParseError> {
        let actual = self.tag.get_data_type();
        if actual == requested {
            Ok(())
        } else {
            Err(self.mismatch(SpecMismatchError::WrongDataType { requested: requested.to_string(), actual: actual.to_string() }))
        }
    }

    ///
    /// Reads the payload of an unsigned integer element.
    ///
    /// # Errors
    ///
    /// Fails if the tag is not an unsigned integer tag or the payload is longer than 8 bytes.
    ///
    pub fn as_unsigned_int(&self) -> Result<u64, ParseError> {
        self.check_type(TagDataType::UnsignedInt)?;
        tools::arr_to_u64(self.payload).map_err(|e| self.mismatch(SpecMismatchError::UintParseError(e.to_string())))
    }

    ///
    /// Reads the payload of a signed integer element.
    ///
    /// # Errors
    ///
    /// Fails if the tag is not an integer tag or the payload is longer than 8 bytes.
    ///
    pub fn as_signed_int(&self) -> Result<i64, ParseError> {
        self.check_type(TagDataType::Integer)?;
        tools::arr_to_i64(self.payload).map_err(|e| self.mismatch(SpecMismatchError::IntParseError(e.to_string())))
    }

    ///
    /// Reads the payload of a string element.  Trailing zero padding is dropped.
    ///
    /// # Errors
    ///
    /// Fails if the tag is not a string tag or the payload is not valid UTF-8.
    ///
    pub fn as_utf8(&self) -> Result<String, ParseError> {
        self.check_type(TagDataType::Utf8)?;
        let end = self.payload.iter().position(|b| *b == 0).unwrap_or(self.payload.len());
        String::from_utf8(self.payload[..end].to_vec()).map_err(|e| self.mismatch(e.into()))
    }

    ///
    /// Reads the payload of a float element (0, 4 or 8 bytes).
    ///
    /// # Errors
    ///
    /// Fails if the tag is not a float tag or the payload has any other length.
    ///
    pub fn as_float(&self) -> Result<f64, ParseError> {
        self.check_type(TagDataType::Float)?;
        tools::arr_to_f64(self.payload).map_err(|e| self.mismatch(SpecMismatchError::FloatParseError(e.to_string())))
    }

    ///
    /// Returns the raw payload of a binary element.
    ///
    /// # Errors
    ///
    /// Fails if the tag is not a binary tag.
    ///
    pub fn as_binary(&self) -> Result<&'a [u8], ParseError> {
        self.check_type(TagDataType::Binary)?;
        Ok(self.payload)
    }

    ///
    /// Returns a short human readable rendering of the element's value.
    ///
    /// Payloads that do not decode as their declared type are shown as raw bytes instead of failing.
    ///
    pub fn value_preview(&self) -> String {
        let decoded = match self.tag.get_data_type() {
            TagDataType::Master => return match self.size {
                EbmlSize::Known(len) => format!("master, {} bytes", len),
                EbmlSize::Unknown => format!("master, unknown size ({} bytes)", self.payload.len()),
            },
            TagDataType::UnsignedInt => self.as_unsigned_int().map(|v| v.to_string()),
            TagDataType::Integer => self.as_signed_int().map(|v| v.to_string()),
            TagDataType::Utf8 => self.as_utf8().map(|v| format!("{:?}", v)),
            TagDataType::Float => self.as_float().map(|v| v.to_string()),
            TagDataType::Binary => Ok(binary_preview(self.payload)),
        };
        decoded.unwrap_or_else(|_| binary_preview(self.payload))
    }
}

impl<'a, T: EbmlSpecification + fmt::Display> fmt::Display for ParsedElement<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @{}: {}", self.tag, self.offset, self.value_preview())
    }
}

fn binary_preview(bytes: &[u8]) -> String {
    const SHOWN: usize = 8;
    let hex: Vec<String> = bytes.iter().take(SHOWN).map(|b| format!("{:02x}", b)).collect();
    let ellipsis = if bytes.len() > SHOWN { " .." } else { "" };
    format!("{} bytes [{}{}]", bytes.len(), hex.join(" "), ellipsis)
}

///
/// Reads the single element starting at `start` in `buffer`.
///
/// # Errors
///
/// Fails with [`ParseError::MalformedVint`] on a zero leading byte, [`ParseError::UnknownTag`] on an id missing from the registry and [`ParseError::TruncatedInput`] if the element runs past the end of `buffer`.
///
/// ## Example
///
/// ```
/// use zero_webm::tag_parser::parse_element;
/// use zero_webm::MatroskaTag;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = [0xd7, 0x81, 0x01];
/// let element = parse_element::<MatroskaTag>(&bytes, 0)?;
/// assert_eq!(MatroskaTag::TrackNumber, element.tag);
/// assert_eq!(1, element.as_unsigned_int()?);
/// assert_eq!(3, element.consumed);
/// # Ok(())
/// # }
/// ```
///
pub fn parse_element<T: EbmlSpecification>(buffer: &[u8], start: usize) -> Result<ParsedElement<'_, T>, ParseError> {
    read_element(buffer, start, 0)
}

///
/// Parses every element in `payload`, expanding master elements in place.
///
/// Master elements are not part of the result, only their (recursively expanded) children are.  Offsets are relative to `payload`.
///
/// # Errors
///
/// See [`parse_element`].
///
pub fn parse_children<T: EbmlSpecification>(payload: &[u8]) -> Result<Vec<ParsedElement<'_, T>>, ParseError> {
    let mut elements = Vec::new();
    collect(payload, 0, false, &mut elements)?;
    Ok(elements)
}

///
/// Parses every element in `buffer` in document order, master elements included.
///
/// Each master element is followed by its descendants, so nesting can be recovered from [`EbmlSpecification::get_path`].
///
/// # Errors
///
/// See [`parse_element`].
///
pub fn parse_tree<T: EbmlSpecification>(buffer: &[u8]) -> Result<Vec<ParsedElement<'_, T>>, ParseError> {
    let mut elements = Vec::new();
    collect(buffer, 0, true, &mut elements)?;
    Ok(elements)
}

///
/// Like [`parse_children`], but keeps the elements read before a failure.
///
/// Returns every element completed before the first error, together with that error if there was one.  Elements in the prefix are exactly the ones [`parse_children`] would have returned for them.
///
/// ## Example
///
/// ```
/// use zero_webm::tag_parser::parse_children_partial;
/// use zero_webm::MatroskaTag;
///
/// // TrackNumber 1, then a TrackUid cut short
/// let bytes = [0xd7, 0x81, 0x01, 0x73, 0xc5, 0x84, 0x00];
/// let (elements, error) = parse_children_partial::<MatroskaTag>(&bytes);
/// assert_eq!(1, elements.len());
/// assert_eq!(MatroskaTag::TrackNumber, elements[0].tag);
/// assert!(error.is_some());
/// ```
///
pub fn parse_children_partial<T: EbmlSpecification>(payload: &[u8]) -> (Vec<ParsedElement<'_, T>>, Option<ParseError>) {
    let mut elements = Vec::new();
    let error = collect(payload, 0, false, &mut elements).err();
    (elements, error)
}

///
/// Like [`parse_tree`], but keeps the elements read before a failure.
///
pub fn parse_tree_partial<T: EbmlSpecification>(buffer: &[u8]) -> (Vec<ParsedElement<'_, T>>, Option<ParseError>) {
    let mut elements = Vec::new();
    let error = collect(buffer, 0, true, &mut elements).err();
    (elements, error)
}

fn collect<'a, T: EbmlSpecification>(data: &'a [u8], base: usize, keep_masters: bool, out: &mut Vec<ParsedElement<'a, T>>) -> Result<(), ParseError> {
    let mut position = 0;
    while position < data.len() {
        let element: ParsedElement<'a, T> = read_element(data, position, base)?;
        position += element.consumed;

        if element.tag.is_master() {
            if keep_masters {
                out.push(element);
            }
            collect(element.payload, element.payload_offset(), keep_masters, out)?;
        } else {
            out.push(element);
        }
    }
    Ok(())
}

struct Header<T> {
    tag: T,
    size: EbmlSize,
    len: usize,
}

fn read_width(data: &[u8], position: usize, base: usize, tag: Option<&'static str>) -> Result<usize, ParseError> {
    let available = data.len().saturating_sub(position);
    let first = *data.get(position).ok_or(ParseError::TruncatedInput { offset: base + position, tag, needed: 1, available })?;
    let width = tools::vint_width(first).map_err(|_| ParseError::MalformedVint { offset: base + position })?;
    if width > available {
        return Err(ParseError::TruncatedInput { offset: base + position, tag, needed: width, available });
    }
    Ok(width)
}

fn read_header<T: EbmlSpecification>(data: &[u8], position: usize, base: usize) -> Result<Header<T>, ParseError> {
    let offset = base + position;

    let id_len = read_width(data, position, base, None)?;
    let id = tools::arr_to_u64(&data[position..(position + id_len)]).map_err(|_| ParseError::MalformedVint { offset })?;
    let tag = T::get_tag(id).ok_or(ParseError::UnknownTag { id, offset })?;

    let size_position = position + id_len;
    let size_len = read_width(data, size_position, base, Some(tag.get_name()))?;
    let size = tools::decode_size(&data[size_position..(size_position + size_len)]).map_err(|err| match err {
        ToolError::ValueTooLarge(_) => ParseError::TruncatedInput {
            offset,
            tag: Some(tag.get_name()),
            needed: usize::MAX,
            available: data.len() - size_position - size_len,
        },
        _ => ParseError::MalformedVint { offset: base + size_position },
    })?;

    Ok(Header { tag, size, len: id_len + size_len })
}

fn check_payload_fits<T: EbmlSpecification>(data: &[u8], position: usize, base: usize, header: &Header<T>, len: usize) -> Result<usize, ParseError> {
    let payload_start = position + header.len;
    let available = data.len() - payload_start;
    if len > available {
        return Err(ParseError::TruncatedInput { offset: base + position, tag: Some(header.tag.get_name()), needed: len, available });
    }
    Ok(payload_start + len)
}

fn check_unknown_size_allowed<T: EbmlSpecification>(position: usize, base: usize, header: &Header<T>) -> Result<(), ParseError> {
    if header.tag.supports_unknown_size() {
        Ok(())
    } else {
        Err(ParseError::SpecMismatch { tag: header.tag.get_name(), offset: base + position, problem: SpecMismatchError::UnknownSizeNotAllowed })
    }
}

fn read_element<T: EbmlSpecification>(data: &[u8], position: usize, base: usize) -> Result<ParsedElement<'_, T>, ParseError> {
    let header: Header<T> = read_header(data, position, base)?;
    let payload_start = position + header.len;

    let payload_end = match header.size {
        EbmlSize::Known(len) => check_payload_fits(data, position, base, &header, len)?,
        EbmlSize::Unknown => {
            check_unknown_size_allowed(position, base, &header)?;
            let end = find_unknown_end(data, header.tag, payload_start, base)?;
            debug!("Unknown sized {} at offset {} ends at offset {}", header.tag.get_name(), base + position, base + end);
            end
        }
    };

    let element = ParsedElement {
        tag: header.tag,
        size: header.size,
        offset: base + position,
        payload: &data[payload_start..payload_end],
        consumed: payload_end - position,
    };
    trace!("Read {} at offset {} ({} payload bytes)", element.tag.get_name(), element.offset, element.payload.len());
    Ok(element)
}

//
// Walks the headers following an unknown sized `tag` until one of them ends it.  Known sized children are skipped using their size field, unknown sized children with this same rule.
//
fn find_unknown_end<T: EbmlSpecification>(data: &[u8], tag: T, start: usize, base: usize) -> Result<usize, ParseError> {
    let mut position = start;
    while position < data.len() {
        let next: Header<T> = read_header(data, position, base)?;
        if spec_util::is_ended_by(tag, next.tag) {
            return Ok(position);
        }

        position = match next.size {
            EbmlSize::Known(len) => check_payload_fits(data, position, base, &next, len)?,
            EbmlSize::Unknown => {
                check_unknown_size_allowed(position, base, &next)?;
                find_unknown_end(data, next.tag, position + next.len, base)?
            }
        };
    }
    Ok(data.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use crate::matroska_spec::MatroskaTag;

    fn cluster(timestamp: u64, blocks: &[&[u8]]) -> Vec<u8> {
        let mut children = vec![Element::unsigned_int(MatroskaTag::Timestamp, timestamp)];
        children.extend(blocks.iter().map(|b| Element::binary(MatroskaTag::SimpleBlock, b)));
        Element::unknown_sized_master(MatroskaTag::Cluster, &children).unwrap().to_wire_bytes().unwrap()
    }

    #[test]
    fn parse_single_leaf() {
        let bytes = [0x42, 0x82, 0x84, b'w', b'e', b'b', b'm'];
        let element = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(MatroskaTag::DocType, element.tag);
        assert_eq!(EbmlSize::Known(4), element.size);
        assert_eq!("webm", element.as_utf8().unwrap());
        assert_eq!(7, element.consumed);
        assert_eq!(3, element.header_len());
    }

    #[test]
    fn parse_element_at_offset() {
        let bytes = [0xec, 0x80, 0xd7, 0x81, 0x02];
        let element = parse_element::<MatroskaTag>(&bytes, 2).unwrap();
        assert_eq!(MatroskaTag::TrackNumber, element.tag);
        assert_eq!(2, element.offset);
        assert_eq!(2, element.as_unsigned_int().unwrap());
    }

    #[test]
    fn children_are_flattened() {
        let entry = Element::master(MatroskaTag::TrackEntry, &[
            Element::unsigned_int(MatroskaTag::TrackNumber, 1),
            Element::utf8(MatroskaTag::CodecId, "V_VP9"),
            Element::master(MatroskaTag::Video, &[
                Element::unsigned_int(MatroskaTag::PixelWidth, 1280),
                Element::unsigned_int(MatroskaTag::PixelHeight, 720),
            ]).unwrap(),
        ]).unwrap();
        let bytes = entry.to_wire_bytes().unwrap();

        let children = parse_children::<MatroskaTag>(&bytes).unwrap();
        let tags: Vec<MatroskaTag> = children.iter().map(|c| c.tag).collect();
        assert_eq!(vec![MatroskaTag::TrackNumber, MatroskaTag::CodecId, MatroskaTag::PixelWidth, MatroskaTag::PixelHeight], tags);
        assert_eq!(1280, children[2].as_unsigned_int().unwrap());
    }

    #[test]
    fn offsets_are_absolute() {
        let video = Element::master(MatroskaTag::Video, &[
            Element::unsigned_int(MatroskaTag::PixelWidth, 1280),
            Element::unsigned_int(MatroskaTag::PixelHeight, 720),
        ]).unwrap();
        let bytes = video.to_wire_bytes().unwrap();
        let children = parse_children::<MatroskaTag>(&bytes).unwrap();

        // e0 88 | b0 82 05 00 | ba 82 02 d0
        assert_eq!(2, children[0].offset);
        assert_eq!(6, children[1].offset);
        assert_eq!(8, children[1].payload_offset());
    }

    #[test]
    fn tree_keeps_masters() {
        let video = Element::master(MatroskaTag::Video, &[Element::unsigned_int(MatroskaTag::PixelWidth, 640)]).unwrap();
        let bytes = video.to_wire_bytes().unwrap();
        let tree = parse_tree::<MatroskaTag>(&bytes).unwrap();
        assert_eq!(vec![MatroskaTag::Video, MatroskaTag::PixelWidth], tree.iter().map(|e| e.tag).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_size_last_runs_to_end() {
        let bytes = cluster(0, &[&[0x81, 0x00, 0x00, 0x80, 0xaa]]);
        let element = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(EbmlSize::Unknown, element.size);
        assert_eq!(bytes.len(), element.consumed);
    }

    #[test]
    fn unknown_size_ends_at_sibling() {
        let mut bytes = cluster(0, &[&[1, 2, 3]]);
        let first_len = bytes.len();
        bytes.extend(cluster(40100, &[&[4, 5, 6]]));

        let first = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(first_len, first.consumed);

        let second = parse_element::<MatroskaTag>(&bytes, first.consumed).unwrap();
        assert_eq!(MatroskaTag::Cluster, second.tag);
        assert_eq!(bytes.len(), first.consumed + second.consumed);

        let timestamps: Vec<u64> = parse_children::<MatroskaTag>(&bytes).unwrap()
            .iter()
            .filter(|e| e.tag == MatroskaTag::Timestamp)
            .map(|e| e.as_unsigned_int().unwrap())
            .collect();
        assert_eq!(vec![0, 40100], timestamps);
    }

    #[test]
    fn unknown_size_ends_at_ancestor_sibling() {
        let mut bytes = cluster(0, &[&[1]]);
        let cluster_len = bytes.len();
        bytes.extend(Element::master(MatroskaTag::Cues, &[]).unwrap().to_wire_bytes().unwrap());

        let first = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(cluster_len, first.consumed);
    }

    #[test]
    fn global_tags_do_not_end_unknown_size() {
        let void = Element::binary(MatroskaTag::Void, &[0, 0]);
        let cluster = Element::unknown_sized_master(MatroskaTag::Cluster, &[
            Element::unsigned_int(MatroskaTag::Timestamp, 5),
            void,
            Element::binary(MatroskaTag::SimpleBlock, &[0x81, 0, 0, 0]),
        ]).unwrap();
        let bytes = cluster.to_wire_bytes().unwrap();
        let element = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(bytes.len(), element.consumed);
    }

    #[test]
    fn nested_unknown_sizes() {
        let mut segment_payload = Element::master(MatroskaTag::Info, &[Element::unsigned_int(MatroskaTag::TimestampScale, 1_000_000)]).unwrap().to_wire_bytes().unwrap();
        segment_payload.extend(cluster(0, &[&[1]]));
        segment_payload.extend(cluster(30000, &[&[2]]));
        let mut bytes = Element::unknown_size(MatroskaTag::Segment, segment_payload).unwrap().to_wire_bytes().unwrap();
        let segment_len = bytes.len();
        bytes.extend(Element::master(MatroskaTag::Ebml, &[]).unwrap().to_wire_bytes().unwrap());

        let segment = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert_eq!(segment_len, segment.consumed);

        let tree = parse_tree::<MatroskaTag>(&bytes).unwrap();
        let clusters = tree.iter().filter(|e| e.tag == MatroskaTag::Cluster).count();
        assert_eq!(2, clusters);
        assert_eq!(Some(&MatroskaTag::Ebml), tree.last().map(|e| &e.tag));
    }

    #[test]
    fn unknown_tag_is_fatal() {
        let bytes = [0xd7, 0x81, 0x01, 0xf2, 0x80];
        let result = parse_children::<MatroskaTag>(&bytes);
        assert_eq!(Err(ParseError::UnknownTag { id: 0xf2, offset: 3 }), result);
    }

    #[test]
    fn zero_leading_byte_is_malformed() {
        assert_eq!(Err(ParseError::MalformedVint { offset: 0 }), parse_element::<MatroskaTag>(&[0x00, 0x81], 0));
        assert_eq!(Err(ParseError::MalformedVint { offset: 1 }), parse_element::<MatroskaTag>(&[0xd7, 0x00, 0x01], 0));
    }

    #[test]
    fn truncated_payload() {
        let bytes = [0xd7, 0x84, 0x01, 0x02];
        assert_eq!(
            Err(ParseError::TruncatedInput { offset: 0, tag: Some("TrackNumber"), needed: 4, available: 2 }),
            parse_element::<MatroskaTag>(&bytes, 0)
        );
    }

    #[test]
    fn truncated_header() {
        let bytes = [0x1a, 0x45];
        assert_eq!(
            Err(ParseError::TruncatedInput { offset: 0, tag: None, needed: 4, available: 2 }),
            parse_element::<MatroskaTag>(&bytes, 0)
        );
        let bytes = [0xd7];
        assert_eq!(
            Err(ParseError::TruncatedInput { offset: 1, tag: Some("TrackNumber"), needed: 1, available: 0 }),
            parse_element::<MatroskaTag>(&bytes, 0)
        );
    }

    #[test]
    fn unknown_size_rejected_for_fixed_tags() {
        let mut bytes = vec![0x16, 0x54, 0xae, 0x6b];
        bytes.extend_from_slice(&tools::UNKNOWN_SIZE);
        assert!(matches!(
            parse_element::<MatroskaTag>(&bytes, 0),
            Err(ParseError::SpecMismatch { tag: "Tracks", offset: 0, problem: SpecMismatchError::UnknownSizeNotAllowed })
        ));
    }

    #[test]
    fn wrong_accessor_is_a_mismatch() {
        let bytes = [0xd7, 0x81, 0x01];
        let element = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        assert!(matches!(element.as_utf8(), Err(ParseError::SpecMismatch { problem: SpecMismatchError::WrongDataType { .. }, .. })));
    }

    #[test]
    fn float_and_signed_accessors() {
        let rate = Element::float(MatroskaTag::SamplingFrequency, 48000.0).to_wire_bytes().unwrap();
        assert_eq!(48000.0, parse_element::<MatroskaTag>(&rate, 0).unwrap().as_float().unwrap());

        let reference = Element::signed_int(MatroskaTag::ReferenceBlock, -40).to_wire_bytes().unwrap();
        assert_eq!(-40, parse_element::<MatroskaTag>(&reference, 0).unwrap().as_signed_int().unwrap());
    }

    #[test]
    fn previews() {
        let name = Element::utf8(MatroskaTag::CodecId, "A_OPUS").to_wire_bytes().unwrap();
        assert_eq!("\"A_OPUS\"", parse_element::<MatroskaTag>(&name, 0).unwrap().value_preview());

        let block = Element::binary(MatroskaTag::SimpleBlock, &[0u8; 10]).to_wire_bytes().unwrap();
        assert_eq!("10 bytes [00 00 00 00 00 00 00 00 ..]", parse_element::<MatroskaTag>(&block, 0).unwrap().value_preview());

        let bytes = cluster(7, &[]);
        assert_eq!("Cluster @0: master, unknown size (3 bytes)", parse_element::<MatroskaTag>(&bytes, 0).unwrap().to_string());
    }

    #[test]
    fn partial_parse_keeps_prefix() {
        let first = cluster(0, &[&[0xaa]]);
        let mut bytes = first.clone();
        bytes.extend(cluster(40100, &[&[0xbb]]));
        let truncated_at = bytes.len();
        bytes.extend_from_slice(&[0xd7, 0x84, 0x01]);

        let (children, error) = parse_children_partial::<MatroskaTag>(&bytes);
        assert_eq!(vec![MatroskaTag::Timestamp, MatroskaTag::SimpleBlock], children.iter().map(|e| e.tag).collect::<Vec<_>>());
        assert_eq!(parse_children::<MatroskaTag>(&first).unwrap(), children);
        assert_eq!(
            Some(ParseError::TruncatedInput { offset: truncated_at, tag: Some("TrackNumber"), needed: 4, available: 1 }),
            error
        );

        let (tree, error) = parse_tree_partial::<MatroskaTag>(&bytes);
        assert_eq!(vec![MatroskaTag::Cluster, MatroskaTag::Timestamp, MatroskaTag::SimpleBlock], tree.iter().map(|e| e.tag).collect::<Vec<_>>());
        assert!(error.is_some());
    }

    #[test]
    fn partial_parse_without_error_matches_full_parse() {
        let bytes = cluster(5, &[&[1, 2], &[3]]);
        let (children, error) = parse_children_partial::<MatroskaTag>(&bytes);
        assert_eq!(None, error);
        assert_eq!(parse_children::<MatroskaTag>(&bytes).unwrap(), children);
    }
}
