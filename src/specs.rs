//!
//! Provides the EBML specification types.
//!
//! The tag registry used by this crate lives in [`crate::matroska_spec`]; the items here are only needed to declare a different registry with [`easy_ebml!`].
//!

pub use zero_webm_specification_derive::easy_ebml;

pub use zero_webm_specification::EbmlSpecification;
pub use zero_webm_specification::TagDataType;
