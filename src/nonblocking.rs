use std::mem;

use futures::{AsyncWrite, AsyncWriteExt};

use crate::element::Element;
use crate::errors::tag_writer::TagWriterError;
use crate::specs::EbmlSpecification;
use crate::TagWriter;

///
/// An asynchronous counterpart of [`TagWriter`] for destinations implementing [`futures::AsyncWrite`].
///
/// Elements are encoded by an inner [`TagWriter`] into memory and then written out with `.await`.  Content of open known-size tags stays in memory until the tag is closed.
///
pub struct TagWriterAsync<W: AsyncWrite + Unpin> {
    dest: W,
    writer: TagWriter<Vec<u8>>,
}

impl<W: AsyncWrite + Unpin> TagWriterAsync<W> {

    pub fn new(dest: W) -> Self {
        Self {
            dest,
            writer: TagWriter::new(Vec::new()),
        }
    }

    pub async fn write<T: EbmlSpecification>(&mut self, element: &Element<T>) -> Result<(), TagWriterError> {
        self.writer.write(element)?;
        self.drain().await
    }

    pub async fn write_all<T: EbmlSpecification>(&mut self, elements: &[Element<T>]) -> Result<(), TagWriterError> {
        self.writer.write_all(elements)?;
        self.drain().await
    }

    pub fn start_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        self.writer.start_tag(tag)
    }

    pub async fn end_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        self.writer.end_tag(tag)?;
        self.drain().await
    }

    pub async fn start_unknown_sized_tag<T: EbmlSpecification>(&mut self, tag: T) -> Result<(), TagWriterError> {
        self.writer.start_unknown_sized_tag(tag)?;
        self.drain().await
    }

    pub async fn flush(&mut self) -> Result<(), TagWriterError> {
        self.dest.flush().await.map_err(|source| TagWriterError::WriteError { source })
    }

    pub fn into_inner(self) -> W {
        self.dest
    }

    async fn drain(&mut self) -> Result<(), TagWriterError> {
        let bytes = mem::take(self.writer.get_mut());
        if !bytes.is_empty() {
            self.dest.write_all(&bytes).await.map_err(|source| TagWriterError::WriteError { source })?;
        }
        Ok(())
    }
}
