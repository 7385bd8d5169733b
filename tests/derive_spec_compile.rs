pub mod derive_spec_compile {
    use zero_webm::specs::{easy_ebml, EbmlSpecification, TagDataType};

    easy_ebml! {
        /// A registry declared outside the crate.
        pub enum Trial {
            Root                    : Master = 0x81,
            Root/Parent             : Master = 0x4102,
            Root/Parent/Count       : UnsignedInt = 0x4100,
            Root/Parent/Data        : Binary = 0x4200,
            #[unknown_size]
            Root/Stream             : Master = 0x1f43b675,
            #[global]
            Padding                 : Binary = 0xec,
        }
    }

    #[test]
    pub fn compile_worked() {
        let tag = Trial::get_tag(0x81).unwrap();
        assert_eq!(Trial::Root, tag);
        assert_eq!(TagDataType::Master, tag.get_data_type());
        assert_eq!(0x81, tag.get_id());
        assert_eq!("Root", tag.get_name());
    }

    #[test]
    pub fn unknown_ids_are_rejected() {
        assert_eq!(None, Trial::get_tag(0x82));
    }

    #[test]
    pub fn hierarchy() {
        assert_eq!(Some(Trial::Parent), Trial::Count.get_parent());
        assert_eq!(vec![Trial::Root, Trial::Parent], Trial::Data.get_path());
        assert_eq!(None, Trial::Root.get_parent());
        assert_eq!(None, Trial::Padding.get_parent());
    }

    #[test]
    pub fn attributes() {
        assert!(Trial::Stream.supports_unknown_size());
        assert!(!Trial::Parent.supports_unknown_size());
        assert!(Trial::Padding.is_global());
        assert!(!Trial::Root.is_global());
    }

    #[test]
    pub fn id_bytes_skip_leading_zeros() {
        assert_eq!(vec![0x42, 0x00], Trial::Data.get_id_bytes());
        assert_eq!(vec![0x1f, 0x43, 0xb6, 0x75], Trial::Stream.get_id_bytes());
    }

    #[test]
    pub fn display_uses_declared_name() {
        assert_eq!("Padding", format!("{}", Trial::Padding));
    }
}
