//!
//! Contains the streaming cluster policy: which Cluster a new block goes into, and the SimpleBlock payload layout.
//!

use std::convert::TryFrom;

use log::debug;

use super::element::Element;
use super::errors::tag_writer::TagWriterError;
use super::errors::tool::ToolError;
use super::matroska_spec::MatroskaTag;
use super::specs::EbmlSpecification;
use super::tools::{self, Vint};

///
/// Flag bit set in a SimpleBlock's flags byte when the frame is a keyframe.
///
pub const KEYFRAME_FLAG: u8 = 0x80;

///
/// The payload of a `SimpleBlock` element.
///
/// Wire layout: track number as a vint, the timestamp relative to the enclosing Cluster as a big endian `i16`, a flags byte, then the frame bytes.
///
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimpleBlock {
    pub track_number: u64,
    pub relative_timestamp: i16,
    pub keyframe: bool,
    pub frame: Vec<u8>,
}

impl SimpleBlock {

    ///
    /// Encodes the block payload.
    ///
    /// # Errors
    ///
    /// Fails if the track number cannot be written as a vint.
    ///
    pub fn to_payload(&self) -> Result<Vec<u8>, ToolError> {
        let mut payload = self.track_number.as_vint()?;
        payload.extend_from_slice(&self.relative_timestamp.to_be_bytes());
        payload.push(if self.keyframe { KEYFRAME_FLAG } else { 0 });
        payload.extend_from_slice(&self.frame);
        Ok(payload)
    }

    ///
    /// Decodes a block payload.
    ///
    /// # Errors
    ///
    /// Fails if the track number is not a valid vint or the payload ends before the flags byte.
    ///
    pub fn from_payload(payload: &[u8]) -> Result<Self, ToolError> {
        let (track_number, track_len) = tools::read_vint(payload)?.ok_or(ToolError::MalformedVint)?;
        let rest = &payload[track_len..];
        if rest.len() < 3 {
            return Err(ToolError::TruncatedBlock(payload.len()));
        }

        Ok(SimpleBlock {
            track_number,
            relative_timestamp: i16::from_be_bytes([rest[0], rest[1]]),
            keyframe: rest[2] & KEYFRAME_FLAG != 0,
            frame: rest[3..].to_vec(),
        })
    }

    ///
    /// Wraps the encoded payload in a `SimpleBlock` element.
    ///
    pub fn to_element(&self) -> Result<Element<MatroskaTag>, TagWriterError> {
        let payload = self.to_payload().map_err(|source| TagWriterError::ValueTooLarge { tag: MatroskaTag::SimpleBlock.get_name(), source })?;
        Ok(Element::new(MatroskaTag::SimpleBlock, payload))
    }
}

///
/// Streaming state of one mux session.
///
/// Holds the timestamp of the most recently opened Cluster.  Blocks are timestamped relative to it with a signed 16 bit value, so a block that is too far away from it starts a new Cluster.
///
/// ## Example
///
/// ```
/// use zero_webm::MuxSession;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut session = MuxSession::new();
/// session.open_cluster(0)?;
/// assert_eq!(1, session.append_block(1, 32767, &[0xaa], true)?.len());
/// assert_eq!(2, session.append_block(1, 32768, &[0xaa], false)?.len());
/// assert_eq!(32768, session.last_cluster_timestamp_ms());
/// # Ok(())
/// # }
/// ```
///
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MuxSession {
    last_cluster_timestamp_ms: u64,
}

impl MuxSession {
    pub fn new() -> Self {
        MuxSession::default()
    }

    pub fn last_cluster_timestamp_ms(&self) -> u64 {
        self.last_cluster_timestamp_ms
    }

    ///
    /// Builds an unknown-size `Cluster` holding its absolute `Timestamp`, and makes it the current Cluster.
    ///
    /// The `Timestamp` is written as a minimal-width big-endian unsigned integer like every other unsigned element, not as a fixed 2-byte field: `0` becomes `e7 81 00` and `40100` becomes `e7 82 9c a4`.  Timestamps past 65535 ms therefore need no truncation.
    ///
    /// # Errors
    ///
    /// Fails if the Cluster cannot be encoded.
    ///
    pub fn open_cluster(&mut self, timestamp_ms: u64) -> Result<Element<MatroskaTag>, TagWriterError> {
        let timestamp = Element::unsigned_int(MatroskaTag::Timestamp, timestamp_ms);
        let cluster = Element::unknown_sized_master(MatroskaTag::Cluster, &[timestamp])?;
        debug!("Opening cluster at {} ms (previous at {} ms)", timestamp_ms, self.last_cluster_timestamp_ms);
        self.last_cluster_timestamp_ms = timestamp_ms;
        Ok(cluster)
    }

    ///
    /// Builds the elements to append for one frame.
    ///
    /// The result is a single `SimpleBlock` when the frame fits the current Cluster, or a new `Cluster` followed by the `SimpleBlock` at relative time 0 when the relative timestamp falls outside the `i16` range.
    ///
    /// # Errors
    ///
    /// Fails if the track number cannot be written as a vint.
    ///
    pub fn append_block(&mut self, track_number: u64, timestamp_ms: u64, frame: &[u8], is_keyframe: bool) -> Result<Vec<Element<MatroskaTag>>, TagWriterError> {
        let delta = i128::from(timestamp_ms) - i128::from(self.last_cluster_timestamp_ms);

        let mut elements = Vec::with_capacity(2);
        let relative_timestamp = match i16::try_from(delta) {
            Ok(relative) => relative,
            Err(_) => {
                elements.push(self.open_cluster(timestamp_ms)?);
                0
            }
        };

        let block = SimpleBlock {
            track_number,
            relative_timestamp,
            keyframe: is_keyframe,
            frame: frame.to_vec(),
        };
        elements.push(block.to_element()?);
        Ok(elements)
    }
}
