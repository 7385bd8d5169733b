use std::io::Write;

use log::info;

use super::cluster::MuxSession;
use super::config::MuxConfig;
use super::errors::tag_writer::TagWriterError;
use super::init_segment;
use super::tag_writer::TagWriter;

///
/// Writes a live WebM stream: the init segment on creation, then one `SimpleBlock` per frame, opening new Clusters as needed.
///
/// The muxer owns the stream's [`MuxSession`], so frames of every track must go through the same muxer in timestamp order.
///
/// ## Example
///
/// ```
/// use zero_webm::{MuxConfig, WebmMuxer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut muxer = WebmMuxer::new(Vec::new(), &MuxConfig::default())?;
/// muxer.write_frame(1, 0, &[0x10, 0x20], true)?;
/// muxer.write_frame(2, 20, &[0x30], false)?;
/// let bytes = muxer.into_inner();
/// assert_eq!(&[0x1a, 0x45, 0xdf, 0xa3], &bytes[..4]);
/// # Ok(())
/// # }
/// ```
///
pub struct WebmMuxer<W: Write> {
    writer: TagWriter<W>,
    session: MuxSession,
}

impl<W: Write> WebmMuxer<W> {

    ///
    /// Validates `config`, then creates a muxer and writes the init segment to `dest`.
    ///
    /// # Errors
    ///
    /// Fails with [`TagWriterError::InvalidConfig`] if [`MuxConfig::validate`] rejects `config`, or if the init segment cannot be encoded or written.
    ///
    pub fn new(dest: W, config: &MuxConfig) -> Result<Self, TagWriterError> {
        config.validate()?;
        let mut writer = TagWriter::new(dest);
        let mut session = MuxSession::new();

        writer.write(&init_segment::ebml_header(config)?)?;
        writer.write(&init_segment::segment(config, &mut session)?)?;
        info!("Wrote init segment ({} x {} {}, {} Hz {})", config.video.pixel_width, config.video.pixel_height, config.video.codec_id, config.audio.sampling_frequency, config.audio.codec_id);

        Ok(WebmMuxer { writer, session })
    }

    ///
    /// Appends one frame.
    ///
    /// # Errors
    ///
    /// Fails if the block cannot be encoded or written.
    ///
    pub fn write_frame(&mut self, track_number: u64, timestamp_ms: u64, frame: &[u8], is_keyframe: bool) -> Result<(), TagWriterError> {
        let elements = self.session.append_block(track_number, timestamp_ms, frame, is_keyframe)?;
        self.writer.write_all(&elements)
    }

    pub fn session(&self) -> &MuxSession {
        &self.session
    }

    pub fn flush(&mut self) -> Result<(), TagWriterError> {
        self.writer.flush()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
