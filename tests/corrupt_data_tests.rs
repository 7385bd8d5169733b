
pub mod corrupt_data_tests {
    use zero_webm::error::{ParseError, SpecMismatchError};
    use zero_webm::tag_parser::parse_children;
    use zero_webm::tools::UNKNOWN_SIZE;
    use zero_webm::{Element, TagWriter};

    use super::test_spec::TestSpec;

    fn get_data_with_invalid_ids() -> Vec<u8> {
        let mut writer = TagWriter::new(Vec::new());
        writer.start_tag(TestSpec::Root).unwrap();
        writer.write(&Element::unsigned_int(TestSpec::Int, 0x01)).expect("Test shouldn't error");
        writer.end_tag(TestSpec::Root).unwrap();
        let mut bytes = writer.into_inner();

        // Append an id that is not part of the registry
        bytes.extend_from_slice(&[0xf2, 0x81, 0x01]);
        bytes
    }

    #[test]
    pub fn error_on_invalid_ids() {
        let bytes = get_data_with_invalid_ids();
        let result = parse_children::<TestSpec>(&bytes);
        assert!(matches!(result, Err(ParseError::UnknownTag { id: 0xf2, offset: 9 })));
    }

    #[test]
    pub fn error_on_invalid_ids_inside_master() {
        let mut payload = Element::unsigned_int(TestSpec::Int, 3).to_wire_bytes().unwrap();
        payload.extend_from_slice(&[0xf2, 0x80]);
        let bytes = Element::new(TestSpec::Root, payload).to_wire_bytes().unwrap();

        let result = parse_children::<TestSpec>(&bytes);
        assert!(matches!(result, Err(ParseError::UnknownTag { id: 0xf2, offset: 9 })));
    }

    #[test]
    pub fn error_on_child_overrunning_parent() {
        // Child claims 4 bytes but the parent only holds 2 after its header
        let bytes = vec![0x1a, 0x45, 0xdf, 0xa3, 0x85, 0x41, 0x01, 0x84, 0x01, 0x02];
        let result = parse_children::<TestSpec>(&bytes);
        assert!(matches!(result, Err(ParseError::TruncatedInput { offset: 5, tag: Some("Int"), needed: 4, available: 2 })));
    }

    #[test]
    pub fn error_on_truncated_buffer() {
        let bytes = Element::utf8(TestSpec::String, "truncated").to_wire_bytes().unwrap();
        let result = parse_children::<TestSpec>(&bytes[..6]);
        assert!(matches!(result, Err(ParseError::TruncatedInput { offset: 0, needed: 9, available: 3, .. })));
    }

    #[test]
    pub fn error_on_zero_vint() {
        let bytes = vec![0x41, 0x01, 0x00, 0x01];
        assert!(matches!(parse_children::<TestSpec>(&bytes), Err(ParseError::MalformedVint { offset: 2 })));
    }

    #[test]
    pub fn error_on_unknown_size_for_fixed_tag() {
        let mut bytes = vec![0x41, 0x03];
        bytes.extend_from_slice(&UNKNOWN_SIZE);
        assert!(matches!(
            parse_children::<TestSpec>(&bytes),
            Err(ParseError::SpecMismatch { tag: "Parent", offset: 0, problem: SpecMismatchError::UnknownSizeNotAllowed })
        ));
    }

    #[test]
    pub fn error_on_invalid_utf8() {
        let bytes = Element::binary(TestSpec::String, &[0xff, 0xfe]).to_wire_bytes().unwrap();
        let elements = parse_children::<TestSpec>(&bytes).unwrap();
        assert!(matches!(
            elements[0].as_utf8(),
            Err(ParseError::SpecMismatch { tag: "String", problem: SpecMismatchError::Utf8ParseError(_), .. })
        ));
    }

    #[test]
    pub fn oversized_integer_payload() {
        let bytes = Element::binary(TestSpec::Int, &[1; 9]).to_wire_bytes().unwrap();
        let elements = parse_children::<TestSpec>(&bytes).unwrap();
        assert!(matches!(
            elements[0].as_unsigned_int(),
            Err(ParseError::SpecMismatch { problem: SpecMismatchError::UintParseError(_), .. })
        ));
    }
}
