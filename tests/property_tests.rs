//! Property-based tests for the vint codec, the element encoder/parser pair and the cluster policy.

use proptest::prelude::*;
use zero_webm::tag_parser::{parse_children, parse_element};
use zero_webm::tools::{self, Vint, MAX_VINT_VALUE};
use zero_webm::{EbmlSize, Element, MatroskaTag, MuxSession, SimpleBlock};

fn minimal_width(value: u64) -> usize {
    (1..=8).find(|width| value < (1u64 << (7 * width))).unwrap_or(8)
}

fn info_leaf() -> impl Strategy<Value = Element<MatroskaTag>> {
    prop_oneof![
        any::<u64>().prop_map(|v| Element::unsigned_int(MatroskaTag::TimestampScale, v)),
        "[a-zA-Z0-9 _-]{0,40}".prop_map(|s| Element::utf8(MatroskaTag::Title, &s)),
        any::<f64>().prop_map(|f| Element::float(MatroskaTag::Duration, f)),
        proptest::collection::vec(any::<u8>(), 0..300).prop_map(|b| Element::binary(MatroskaTag::SegmentUid, &b)),
    ]
}

proptest! {
    /// Encoding then decoding a vint gives back the value, using the narrowest width.
    #[test]
    fn vint_roundtrip(value in 0u64..=MAX_VINT_VALUE) {
        let encoded = value.as_vint().unwrap();
        prop_assert_eq!(minimal_width(value), encoded.len());
        prop_assert_eq!(encoded.len(), tools::vint_width(encoded[0]).unwrap());
        prop_assert_eq!(value, tools::decode_vint_value(&encoded).unwrap());
    }

    /// Values beyond 56 bits cannot be written.
    #[test]
    fn vint_too_large(value in (MAX_VINT_VALUE + 1)..=u64::MAX) {
        prop_assert!(value.as_vint().is_err());
    }

    /// Every known size except the reserved one decodes back to itself, never to `Unknown`.
    #[test]
    fn size_roundtrip(size in 0usize..=(u32::MAX as usize)) {
        let encoded = tools::encode_size(EbmlSize::Known(size)).unwrap();
        prop_assert_eq!(EbmlSize::Known(size), tools::decode_size(&encoded).unwrap());
    }

    /// The flattened children of an encoded master are exactly the leaves it was built from.
    #[test]
    fn element_roundtrip(children in proptest::collection::vec(info_leaf(), 0..20)) {
        let info = Element::master(MatroskaTag::Info, &children).unwrap();
        let bytes = info.to_wire_bytes().unwrap();

        let parsed = parse_children::<MatroskaTag>(&bytes).unwrap();
        prop_assert_eq!(children.len(), parsed.len());
        for (built, read) in children.iter().zip(parsed.iter()) {
            prop_assert_eq!(built.tag, read.tag);
            prop_assert_eq!(&built.payload[..], read.payload);
        }
    }

    /// Nested masters flatten in document order.
    #[test]
    fn nested_roundtrip(sizes in proptest::collection::vec((1u64..10_000, 1u64..10_000), 1..8)) {
        let entries: Vec<Element<MatroskaTag>> = sizes.iter().enumerate().map(|(i, (width, height))| {
            Element::master(MatroskaTag::TrackEntry, &[
                Element::unsigned_int(MatroskaTag::TrackNumber, i as u64 + 1),
                Element::master(MatroskaTag::Video, &[
                    Element::unsigned_int(MatroskaTag::PixelWidth, *width),
                    Element::unsigned_int(MatroskaTag::PixelHeight, *height),
                ]).unwrap(),
            ]).unwrap()
        }).collect();
        let tracks = Element::master(MatroskaTag::Tracks, &entries).unwrap();

        let parsed = parse_children::<MatroskaTag>(&tracks.payload).unwrap();
        prop_assert_eq!(sizes.len() * 3, parsed.len());
        for (i, (width, height)) in sizes.iter().enumerate() {
            prop_assert_eq!(i as u64 + 1, parsed[i * 3].as_unsigned_int().unwrap());
            prop_assert_eq!(*width, parsed[i * 3 + 1].as_unsigned_int().unwrap());
            prop_assert_eq!(*height, parsed[i * 3 + 2].as_unsigned_int().unwrap());
        }
    }

    /// An unknown-size Cluster at the end of a buffer takes the whole rest of it.
    #[test]
    fn unknown_size_runs_to_end(frames in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..64), 0..10)) {
        let mut session = MuxSession::new();
        let mut bytes = session.open_cluster(0).unwrap().to_wire_bytes().unwrap();
        for (i, frame) in frames.iter().enumerate() {
            for element in session.append_block(1, i as u64 * 20, frame, i == 0).unwrap() {
                bytes.extend(element.to_wire_bytes().unwrap());
            }
        }

        let cluster = parse_element::<MatroskaTag>(&bytes, 0).unwrap();
        prop_assert_eq!(EbmlSize::Unknown, cluster.size);
        prop_assert_eq!(bytes.len(), cluster.consumed);
    }

    /// Cluster timestamp plus relative block timestamp always gives the absolute timestamp.
    #[test]
    fn blocks_are_placed_relative_to_their_cluster(mut timestamps in proptest::collection::vec(0u64..200_000, 1..60)) {
        timestamps.sort_unstable();
        let mut session = MuxSession::new();
        session.open_cluster(0).unwrap();
        let mut cluster_timestamp = 0u64;

        for timestamp in timestamps {
            let elements = session.append_block(1, timestamp, &[0], false).unwrap();
            for element in &elements {
                if element.tag == MatroskaTag::Cluster {
                    let children = parse_children::<MatroskaTag>(&element.payload).unwrap();
                    cluster_timestamp = children[0].as_unsigned_int().unwrap();
                }
            }
            let block = SimpleBlock::from_payload(&elements[elements.len() - 1].payload).unwrap();
            prop_assert_eq!(timestamp as i64, cluster_timestamp as i64 + i64::from(block.relative_timestamp));
            prop_assert_eq!(cluster_timestamp, session.last_cluster_timestamp_ms());
        }
    }

    /// Arbitrary input never panics the parser.
    #[test]
    fn parser_does_not_panic(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
        let _ = parse_children::<MatroskaTag>(&bytes);
    }
}
