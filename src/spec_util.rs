use crate::specs::EbmlSpecification;

///
/// Returns whether or not `test` is an ancestor of `current`.
///
pub fn is_parent<T: EbmlSpecification>(current: T, test: T) -> bool {
    current.get_path().contains(&test)
}

///
/// Returns whether or not `test` is a sibling of `current`.
///
/// A sibling tag is one which shares the same direct parent.  A separate instance of the current tag counts as a sibling.
///
pub fn is_sibling<T: EbmlSpecification>(current: T, test: T) -> bool {
    current.get_parent() == test.get_parent()
}

///
/// Returns whether or not `test` would end this "Unknown" sized `current` tag.
///
/// Unknown sized tags are ended when we reach an element that is:
///  - A parent of the tag
///  - A direct sibling of the tag
///  - A Root element
///
/// Global elements (e.g. `Void`) can appear inside any master element and never end it.  The remaining cases in the [EBML RFC](https://www.rfc-editor.org/rfc/rfc8794.html#name-unknown-data-size) rely on document position and are covered by the end of the buffer.
///
pub fn is_ended_by<T: EbmlSpecification>(current: T, test: T) -> bool {
    if test.is_global() {
        return false;
    }

    is_parent(current, test) || // parent
    is_sibling(current, test) || // sibling
    test.get_parent().is_none() // Root element
}
