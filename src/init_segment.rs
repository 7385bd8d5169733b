//!
//! Builds the init segment of a live WebM stream from a [`MuxConfig`].
//!
//! The init segment is the EBML header followed by an unknown-size `Segment` that holds `Info`, `Tracks` and the first, still open, `Cluster`.  Blocks appended afterwards land in that Cluster.
//!

use super::cluster::MuxSession;
use super::config::{AudioTrackConfig, MuxConfig, VideoTrackConfig};
use super::element::Element;
use super::errors::tag_writer::TagWriterError;
use super::matroska_spec::{MatroskaTag, TRACK_TYPE_AUDIO, TRACK_TYPE_VIDEO};

const EBML_VERSION: u64 = 1;
const EBML_READ_VERSION: u64 = 1;
const EBML_MAX_ID_LENGTH: u64 = 4;
const EBML_MAX_SIZE_LENGTH: u64 = 8;
const DOC_TYPE_VERSION: u64 = 2;
const DOC_TYPE_READ_VERSION: u64 = 2;

pub fn ebml_header(config: &MuxConfig) -> Result<Element<MatroskaTag>, TagWriterError> {
    Element::master(MatroskaTag::Ebml, &[
        Element::unsigned_int(MatroskaTag::EbmlVersion, EBML_VERSION),
        Element::unsigned_int(MatroskaTag::EbmlReadVersion, EBML_READ_VERSION),
        Element::unsigned_int(MatroskaTag::EbmlMaxIdLength, EBML_MAX_ID_LENGTH),
        Element::unsigned_int(MatroskaTag::EbmlMaxSizeLength, EBML_MAX_SIZE_LENGTH),
        Element::utf8(MatroskaTag::DocType, &config.doc_type),
        Element::unsigned_int(MatroskaTag::DocTypeVersion, DOC_TYPE_VERSION),
        Element::unsigned_int(MatroskaTag::DocTypeReadVersion, DOC_TYPE_READ_VERSION),
    ])
}

pub fn info(config: &MuxConfig) -> Result<Element<MatroskaTag>, TagWriterError> {
    Element::master(MatroskaTag::Info, &[
        Element::unsigned_int(MatroskaTag::TimestampScale, config.timestamp_scale),
        Element::utf8(MatroskaTag::MuxingApp, &config.muxing_app),
        Element::utf8(MatroskaTag::WritingApp, &config.writing_app),
    ])
}

pub fn video_track_entry(video: &VideoTrackConfig) -> Result<Element<MatroskaTag>, TagWriterError> {
    Element::master(MatroskaTag::TrackEntry, &[
        Element::unsigned_int(MatroskaTag::TrackNumber, video.track_number),
        Element::unsigned_int(MatroskaTag::TrackUid, video.track_uid),
        Element::unsigned_int(MatroskaTag::TrackType, TRACK_TYPE_VIDEO),
        Element::utf8(MatroskaTag::CodecId, &video.codec_id),
        Element::master(MatroskaTag::Video, &[
            Element::unsigned_int(MatroskaTag::PixelWidth, video.pixel_width),
            Element::unsigned_int(MatroskaTag::PixelHeight, video.pixel_height),
        ])?,
    ])
}

pub fn audio_track_entry(audio: &AudioTrackConfig) -> Result<Element<MatroskaTag>, TagWriterError> {
    let mut children = vec![
        Element::unsigned_int(MatroskaTag::TrackNumber, audio.track_number),
        Element::unsigned_int(MatroskaTag::TrackUid, audio.track_uid),
        Element::unsigned_int(MatroskaTag::TrackType, TRACK_TYPE_AUDIO),
        Element::utf8(MatroskaTag::CodecId, &audio.codec_id),
    ];
    if let Some(codec_private) = audio.codec_private() {
        children.push(Element::binary(MatroskaTag::CodecPrivate, &codec_private));
    }
    children.push(Element::master(MatroskaTag::Audio, &[
        Element::float(MatroskaTag::SamplingFrequency, audio.sampling_frequency),
        Element::unsigned_int(MatroskaTag::Channels, u64::from(audio.channels)),
    ])?);

    Element::master(MatroskaTag::TrackEntry, &children)
}

///
/// Builds `Tracks` with the video entry first and the audio entry second.
///
pub fn tracks(config: &MuxConfig) -> Result<Element<MatroskaTag>, TagWriterError> {
    Element::master(MatroskaTag::Tracks, &[
        video_track_entry(&config.video)?,
        audio_track_entry(&config.audio)?,
    ])
}

///
/// Builds the unknown-size `Segment`, opening its first Cluster at timestamp 0 on `session`.
///
pub fn segment(config: &MuxConfig, session: &mut MuxSession) -> Result<Element<MatroskaTag>, TagWriterError> {
    Element::unknown_sized_master(MatroskaTag::Segment, &[
        info(config)?,
        tracks(config)?,
        session.open_cluster(0)?,
    ])
}

///
/// Encodes the complete init segment.
///
/// ## Example
///
/// ```
/// use zero_webm::{MatroskaTag, MuxConfig, MuxSession};
/// use zero_webm::init_segment::init_segment;
/// use zero_webm::tag_parser::parse_children;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let bytes = init_segment(&MuxConfig::default(), &mut MuxSession::new())?;
/// let elements = parse_children::<MatroskaTag>(&bytes)?;
/// assert!(elements.iter().any(|e| e.tag == MatroskaTag::CodecPrivate));
/// # Ok(())
/// # }
/// ```
///
pub fn init_segment(config: &MuxConfig, session: &mut MuxSession) -> Result<Vec<u8>, TagWriterError> {
    let mut bytes = ebml_header(config)?.to_wire_bytes()?;
    bytes.extend(segment(config, session)?.to_wire_bytes()?);
    Ok(bytes)
}
