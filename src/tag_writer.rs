use std::io::Write;

use super::element::{EbmlSize, Element};
use super::specs::EbmlSpecification;
use super::tools;

use super::errors::tag_writer::TagWriterError;

///
/// Provides a tool to write EBML elements to a destination that implements [`std::io::Write`].
///
/// Complete [`Element`] values can be written directly.  Known-size master elements can also be written incrementally with [`TagWriter::start_tag`] and [`TagWriter::end_tag`]: their content is buffered until the tag is closed so that the size field can be filled in.  Unknown-size master elements (a live `Segment` or `Cluster`) are opened with [`TagWriter::start_unknown_sized_tag`] and are never closed; whatever is written afterwards belongs to them until a sibling or ancestor starts.
///
/// ## Example
///
/// ```
/// use zero_webm::{Element, MatroskaTag, TagWriter};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut writer = TagWriter::new(Vec::new());
/// writer.start_tag(MatroskaTag::Video)?;
/// writer.write(&Element::unsigned_int(MatroskaTag::PixelWidth, 1280))?;
/// writer.end_tag(MatroskaTag::Video)?;
/// assert_eq!(vec![0xe0, 0x84, 0xb0, 0x82, 0x05, 0x00], writer.into_inner());
/// # Ok(())
/// # }
/// ```
///
pub struct TagWriter<W: Write>
{
    dest: W,
    open_tags: Vec<OpenTag>,
    working_buffer: Vec<u8>,
}

struct OpenTag {
    id_bytes: Vec<u8>,
    name: &'static str,
    start: usize,
}

impl<W: Write> TagWriter<W>
{
    pub fn new(dest: W) -> Self {
        TagWriter {
            dest,
            open_tags: Vec::new(),
            working_buffer: Vec::new(),
        }
    }

    ///
    /// Opens a known-size master tag.  Everything written until the matching [`TagWriter::end_tag`] becomes its content.
    ///
    pub fn start_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        self.open_tags.push(OpenTag {
            id_bytes: tag.get_id_bytes(),
            name: tag.get_name(),
            start: self.working_buffer.len(),
        });
        Ok(())
    }

    ///
    /// Closes the most recently opened master tag, writing its header now that its size is known.
    ///
    /// # Errors
    ///
    /// Returns [`TagWriterError::UnexpectedClosingTag`] if `tag` is not the most recently opened tag.
    ///
    pub fn end_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        match self.open_tags.pop() {
            Some(open_tag) => {
                if open_tag.name == tag.get_name() && open_tag.id_bytes == tag.get_id_bytes() {
                    self.finalize_tag(open_tag)
                } else {
                    let expected = Some(open_tag.name);
                    self.open_tags.push(open_tag);
                    Err(TagWriterError::UnexpectedClosingTag { tag: tag.get_name(), expected })
                }
            },
            None => Err(TagWriterError::UnexpectedClosingTag { tag: tag.get_name(), expected: None })
        }
    }

    ///
    /// Writes the header of an unknown-size master tag.
    ///
    /// # Errors
    ///
    /// Fails if `tag` may not be written with an unknown size.
    ///
    pub fn start_unknown_sized_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        let header = Element::unknown_size(tag, Vec::new())?.header_bytes()?;
        self.emit(&header)
    }

    ///
    /// Writes a complete element.
    ///
    /// # Errors
    ///
    /// Fails if the element cannot be encoded or the destination cannot be written to.
    ///
    pub fn write<T: EbmlSpecification>(&mut self, element: &Element<T>) -> Result<(), TagWriterError> {
        let mut bytes = element.header_bytes()?;
        bytes.extend_from_slice(&element.payload);
        self.emit(&bytes)
    }

    pub fn write_all<T: EbmlSpecification>(&mut self, elements: &[Element<T>]) -> Result<(), TagWriterError> {
        for element in elements {
            self.write(element)?;
        }
        Ok(())
    }

    ///
    /// Writes `data` as the payload of `tag`, regardless of the tag's declared data type.
    ///
    pub fn write_raw<T: EbmlSpecification>(&mut self, tag: T, data: &[u8]) -> Result<(), TagWriterError> {
        self.write(&Element::new(tag, data.to_vec()))
    }

    ///
    /// Flushes the destination.  Content of open known-size tags stays buffered.
    ///
    pub fn flush(&mut self) -> Result<(), TagWriterError> {
        self.dest.flush().map_err(|source| TagWriterError::WriteError { source })
    }

    ///
    /// Returns whether a known-size tag is still waiting for [`TagWriter::end_tag`].
    ///
    pub fn has_open_tags(&self) -> bool {
        !self.open_tags.is_empty()
    }

    pub fn get_ref(&self) -> &W {
        &self.dest
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.dest
    }

    ///
    /// Consumes the writer, returning the destination.  Content of tags that were never closed is dropped.
    ///
    pub fn into_inner(self) -> W {
        self.dest
    }

    fn emit(&mut self, bytes: &[u8]) -> Result<(), TagWriterError> {
        if self.open_tags.is_empty() {
            self.dest.write_all(bytes).map_err(|source| TagWriterError::WriteError { source })?;
        } else {
            self.working_buffer.extend_from_slice(bytes);
        }
        Ok(())
    }

    fn finalize_tag(&mut self, open_tag: OpenTag) -> Result<(), TagWriterError> {
        let size = self.working_buffer.len() - open_tag.start;
        let size_vint = tools::encode_size(EbmlSize::Known(size))
            .map_err(|source| TagWriterError::ValueTooLarge { tag: open_tag.name, source })?;

        let index = open_tag.start;
        self.working_buffer.splice(index..index, open_tag.id_bytes.iter().chain(size_vint.iter()).copied());

        if self.open_tags.is_empty() {
            self.dest.write_all(self.working_buffer.drain(..).as_slice()).map_err(|source| TagWriterError::WriteError { source })?;
            self.dest.flush().map_err(|source| TagWriterError::WriteError { source })?;
        }

        Ok(())
    }
}
