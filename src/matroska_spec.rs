//!
//! The closed Matroska/WebM tag registry.
//!
//! Only the elements needed to write a live WebM stream and to inspect typical WebM files are declared.  Any other id is rejected by the parser.
//!

use crate::specs::easy_ebml;

easy_ebml! {
    ///
    /// A Matroska/WebM element tag.
    ///
    pub enum MatroskaTag {
        Ebml                                        : Master = 0x1a45dfa3,
        Ebml/EbmlVersion                            : UnsignedInt = 0x4286,
        Ebml/EbmlReadVersion                        : UnsignedInt = 0x42f7,
        Ebml/EbmlMaxIdLength                        : UnsignedInt = 0x42f2,
        Ebml/EbmlMaxSizeLength                      : UnsignedInt = 0x42f3,
        Ebml/DocType                                : Utf8 = 0x4282,
        Ebml/DocTypeVersion                         : UnsignedInt = 0x4287,
        Ebml/DocTypeReadVersion                     : UnsignedInt = 0x4285,

        #[global]
        Void                                        : Binary = 0xec,
        #[global]
        Crc32                                       : Binary = 0xbf,

        #[unknown_size]
        Segment                                     : Master = 0x18538067,

        Segment/SeekHead                            : Master = 0x114d9b74,
        Segment/SeekHead/Seek                       : Master = 0x4dbb,
        Segment/SeekHead/Seek/SeekId                : Binary = 0x53ab,
        Segment/SeekHead/Seek/SeekPosition          : UnsignedInt = 0x53ac,

        Segment/Info                                : Master = 0x1549a966,
        Segment/Info/SegmentUid                     : Binary = 0x73a4,
        Segment/Info/TimestampScale                 : UnsignedInt = 0x2ad7b1,
        Segment/Info/Duration                       : Float = 0x4489,
        Segment/Info/DateUtc                        : Binary = 0x4461,
        Segment/Info/Title                          : Utf8 = 0x7ba9,
        Segment/Info/MuxingApp                      : Utf8 = 0x4d80,
        Segment/Info/WritingApp                     : Utf8 = 0x5741,

        Segment/Tracks                              : Master = 0x1654ae6b,
        Segment/Tracks/TrackEntry                   : Master = 0xae,
        Segment/Tracks/TrackEntry/TrackNumber       : UnsignedInt = 0xd7,
        Segment/Tracks/TrackEntry/TrackUid          : UnsignedInt = 0x73c5,
        Segment/Tracks/TrackEntry/TrackType         : UnsignedInt = 0x83,
        Segment/Tracks/TrackEntry/FlagEnabled       : UnsignedInt = 0xb9,
        Segment/Tracks/TrackEntry/FlagDefault       : UnsignedInt = 0x88,
        Segment/Tracks/TrackEntry/FlagLacing        : UnsignedInt = 0x9c,
        Segment/Tracks/TrackEntry/DefaultDuration   : UnsignedInt = 0x23e383,
        Segment/Tracks/TrackEntry/Name              : Utf8 = 0x536e,
        Segment/Tracks/TrackEntry/Language          : Utf8 = 0x22b59c,
        Segment/Tracks/TrackEntry/CodecId           : Utf8 = 0x86,
        Segment/Tracks/TrackEntry/CodecPrivate      : Binary = 0x63a2,
        Segment/Tracks/TrackEntry/CodecName         : Utf8 = 0x258688,
        Segment/Tracks/TrackEntry/CodecDelay        : UnsignedInt = 0x56aa,
        Segment/Tracks/TrackEntry/SeekPreRoll       : UnsignedInt = 0x56bb,
        Segment/Tracks/TrackEntry/Video             : Master = 0xe0,
        Segment/Tracks/TrackEntry/Video/FlagInterlaced : UnsignedInt = 0x9a,
        Segment/Tracks/TrackEntry/Video/PixelWidth  : UnsignedInt = 0xb0,
        Segment/Tracks/TrackEntry/Video/PixelHeight : UnsignedInt = 0xba,
        Segment/Tracks/TrackEntry/Video/DisplayWidth  : UnsignedInt = 0x54b0,
        Segment/Tracks/TrackEntry/Video/DisplayHeight : UnsignedInt = 0x54ba,
        Segment/Tracks/TrackEntry/Audio             : Master = 0xe1,
        Segment/Tracks/TrackEntry/Audio/SamplingFrequency : Float = 0xb5,
        Segment/Tracks/TrackEntry/Audio/Channels    : UnsignedInt = 0x9f,
        Segment/Tracks/TrackEntry/Audio/BitDepth    : UnsignedInt = 0x6264,

        #[unknown_size]
        Segment/Cluster                             : Master = 0x1f43b675,
        Segment/Cluster/Timestamp                   : UnsignedInt = 0xe7,
        Segment/Cluster/Position                    : UnsignedInt = 0xa7,
        Segment/Cluster/PrevSize                    : UnsignedInt = 0xab,
        Segment/Cluster/SimpleBlock                 : Binary = 0xa3,
        Segment/Cluster/BlockGroup                  : Master = 0xa0,
        Segment/Cluster/BlockGroup/Block            : Binary = 0xa1,
        Segment/Cluster/BlockGroup/BlockDuration    : UnsignedInt = 0x9b,
        Segment/Cluster/BlockGroup/ReferenceBlock   : Integer = 0xfb,

        Segment/Cues                                : Master = 0x1c53bb6b,
        Segment/Cues/CuePoint                       : Master = 0xbb,
        Segment/Cues/CuePoint/CueTime               : UnsignedInt = 0xb3,
        Segment/Cues/CuePoint/CueTrackPositions     : Master = 0xb7,
        Segment/Cues/CuePoint/CueTrackPositions/CueTrack : UnsignedInt = 0xf7,
        Segment/Cues/CuePoint/CueTrackPositions/CueClusterPosition : UnsignedInt = 0xf1,
    }
}

///
/// `TrackType` value for video tracks.
///
pub const TRACK_TYPE_VIDEO: u64 = 1;

///
/// `TrackType` value for audio tracks.
///
pub const TRACK_TYPE_AUDIO: u64 = 2;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::{EbmlSpecification, TagDataType};

    #[test]
    fn lookup_by_id() {
        assert_eq!(Some(MatroskaTag::Ebml), MatroskaTag::get_tag(0x1a45dfa3));
        assert_eq!(Some(MatroskaTag::SimpleBlock), MatroskaTag::get_tag(0xa3));
        assert_eq!(None, MatroskaTag::get_tag(0xf2));
    }

    #[test]
    fn id_bytes_are_canonical() {
        assert_eq!(vec![0x18, 0x53, 0x80, 0x67], MatroskaTag::Segment.get_id_bytes());
        assert_eq!(vec![0x2a, 0xd7, 0xb1], MatroskaTag::TimestampScale.get_id_bytes());
        assert_eq!(vec![0x42, 0x86], MatroskaTag::EbmlVersion.get_id_bytes());
        assert_eq!(vec![0x86], MatroskaTag::CodecId.get_id_bytes());
    }

    #[test]
    fn master_classification() {
        for tag in &[MatroskaTag::Ebml, MatroskaTag::Segment, MatroskaTag::Info, MatroskaTag::Tracks, MatroskaTag::TrackEntry, MatroskaTag::Video, MatroskaTag::Audio, MatroskaTag::Cluster] {
            assert!(tag.is_master(), "{} should be a master tag", tag);
        }
        for tag in &[MatroskaTag::Timestamp, MatroskaTag::SimpleBlock, MatroskaTag::TrackNumber, MatroskaTag::CodecId] {
            assert!(!tag.is_master(), "{} should be a leaf tag", tag);
        }
    }

    #[test]
    fn only_streaming_containers_allow_unknown_size() {
        assert!(MatroskaTag::Segment.supports_unknown_size());
        assert!(MatroskaTag::Cluster.supports_unknown_size());
        assert!(!MatroskaTag::Tracks.supports_unknown_size());
        assert!(!MatroskaTag::Ebml.supports_unknown_size());
    }

    #[test]
    fn document_paths() {
        assert_eq!(
            vec![MatroskaTag::Segment, MatroskaTag::Tracks, MatroskaTag::TrackEntry, MatroskaTag::Video],
            MatroskaTag::PixelWidth.get_path()
        );
        assert!(MatroskaTag::Segment.get_path().is_empty());
        assert_eq!(Some(MatroskaTag::Segment), MatroskaTag::Cluster.get_parent());
    }

    #[test]
    fn data_types_and_names() {
        assert_eq!(TagDataType::Float, MatroskaTag::SamplingFrequency.get_data_type());
        assert_eq!(TagDataType::Utf8, MatroskaTag::DocType.get_data_type());
        assert_eq!("TrackEntry", MatroskaTag::TrackEntry.to_string());
        assert!(MatroskaTag::Void.is_global());
    }
}
