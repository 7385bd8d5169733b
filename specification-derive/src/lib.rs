extern crate proc_macro;

mod ast;
mod easy_ebml;

use proc_macro::TokenStream;
use syn::Error;
use crate::easy_ebml::EasyEBML;

///
/// Macro that declares a closed EBML tag registry.
///
/// The macro generates a field-less enum (deriving `Copy`, `Clone`, `PartialEq`, `Eq`, `Hash` and `Debug`) along with implementations of [`EbmlSpecification`][spec] and [`std::fmt::Display`].  Each line declares one tag as `Path/To/Name: DataType = id`, where the path segments before the name are the tag's ancestors (only the last one, the direct parent, is significant) and the data type is a variant of [`TagDataType`][data_type].
///
/// Two attributes are understood on individual lines:
///   * __#[unknown_size]__ - the tag may be written with an "unknown" data size.  Only allowed on `Master` tags.
///   * __#[global]__ - the tag may appear inside any master element (e.g. `Void`).  Global tags cannot declare a parent.
///
/// Any other attributes (including doc comments) are passed through to the generated enum or variant.
///
/// ```
/// # use zero_webm_specification_derive::easy_ebml;
/// easy_ebml! {
///   pub enum Example {
///     #[unknown_size]
///     Root                : Master = 0x1a45dfa3,
///     Root/Parent         : Master = 0x4103,
///     Root/Parent/Data    : UnsignedInt = 0x4101,
///     #[global]
///     Void                : Binary = 0xec,
///   }
/// }
/// ```
///
/// The macro rejects duplicate ids or names, parents that are missing or not `Master`, circular parent chains, and misplaced attributes.
///
/// [spec]: zero_webm_specification::EbmlSpecification
/// [data_type]: zero_webm_specification::TagDataType

#[proc_macro]
pub fn easy_ebml(input: TokenStream) -> TokenStream {
    let input = match syn::parse::<EasyEBML>(input) {
        Ok(syntax_tree) => syntax_tree,
        Err(err) => {
            return TokenStream::from(Error::new(err.span(), "easy_ebml! {} content must be of format: enum Name {\
                Root: Type = id,\
                Path/Of/Component: Type = id,\
                // example\
                Ebml: Master = 0x1a45dfa3,\
                Ebml/EbmlVersion: UnsignedInt = 0x4286,\
                // streaming containers and global elements are marked with attributes\
                #[unknown_size] Segment: Master = 0x18538067,\
                #[global] Void: Binary = 0xec,\
            }").to_compile_error())
        },
    };

    input.implement().unwrap_or_else(|err| err.to_compile_error()).into()
}
