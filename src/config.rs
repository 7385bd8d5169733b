//!
//! Contains the application configuration fed into the init segment builder.
//!
//! Every field has a default, so an empty TOML document yields the usual live WebM setup: a VP9 1280x720 video track and an Opus 48 kHz stereo audio track.
//!

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::errors::config::ConfigError;

///
/// Settings of a whole mux session.
///
/// ## Example
///
/// ```
/// use zero_webm::MuxConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = MuxConfig::from_toml_str(r#"
///     writing_app = "my-recorder"
///
///     [video]
///     pixel_width = 1920
///     pixel_height = 1080
/// "#)?;
/// assert_eq!(1920, config.video.pixel_width);
/// assert_eq!("A_OPUS", config.audio.codec_id);
/// # Ok(())
/// # }
/// ```
///
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MuxConfig {
    /// DocType written in the EBML header (default: "webm")
    pub doc_type: String,
    /// MuxingApp written in Info (default: "zero-webm")
    pub muxing_app: String,
    /// WritingApp written in Info (default: "zero-webm")
    pub writing_app: String,
    /// Nanoseconds per timestamp tick (default: 1_000_000, i.e. millisecond timestamps)
    pub timestamp_scale: u64,
    pub video: VideoTrackConfig,
    pub audio: AudioTrackConfig,
}

/// Video track settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct VideoTrackConfig {
    pub track_number: u64,
    pub track_uid: u64,
    pub codec_id: String,
    pub pixel_width: u64,
    pub pixel_height: u64,
}

/// Audio track settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AudioTrackConfig {
    pub track_number: u64,
    pub track_uid: u64,
    pub codec_id: String,
    /// Sampling frequency in Hz
    pub sampling_frequency: f64,
    pub channels: u8,
    /// Samples to discard at the start of the stream, written into the OpusHead
    pub pre_skip: u16,
}

impl Default for MuxConfig {
    fn default() -> Self {
        MuxConfig {
            doc_type: "webm".to_string(),
            muxing_app: "zero-webm".to_string(),
            writing_app: "zero-webm".to_string(),
            timestamp_scale: 1_000_000,
            video: VideoTrackConfig::default(),
            audio: AudioTrackConfig::default(),
        }
    }
}

impl Default for VideoTrackConfig {
    fn default() -> Self {
        VideoTrackConfig {
            track_number: 1,
            track_uid: 1,
            codec_id: "V_VP9".to_string(),
            pixel_width: 1280,
            pixel_height: 720,
        }
    }
}

impl Default for AudioTrackConfig {
    fn default() -> Self {
        AudioTrackConfig {
            track_number: 2,
            track_uid: 2,
            codec_id: "A_OPUS".to_string(),
            sampling_frequency: 48_000.0,
            channels: 2,
            pre_skip: 0,
        }
    }
}

impl AudioTrackConfig {

    ///
    /// Returns the `CodecPrivate` payload for this track, if its codec needs one.
    ///
    /// Opus tracks carry an `OpusHead` identification header, with the sampling frequency rounded to whole Hz.
    ///
    pub fn codec_private(&self) -> Option<Vec<u8>> {
        if self.codec_id == "A_OPUS" {
            Some(opus_head(self.channels, self.sampling_frequency.round() as u32, self.pre_skip))
        } else {
            None
        }
    }
}

///
/// Builds the 19 byte Opus identification header (RFC 7845, section 5.1) using channel mapping family 0.
///
pub fn opus_head(channels: u8, input_sample_rate: u32, pre_skip: u16) -> Vec<u8> {
    let mut header = Vec::with_capacity(19);
    header.extend_from_slice(b"OpusHead");
    header.push(1); // Version
    header.push(channels);
    header.extend_from_slice(&pre_skip.to_le_bytes());
    header.extend_from_slice(&input_sample_rate.to_le_bytes());
    header.extend_from_slice(&0i16.to_le_bytes()); // Output gain
    header.push(0); // Channel mapping family
    header
}

impl MuxConfig {

    ///
    /// Parses and validates a TOML document.  Missing fields take their default value.
    ///
    /// # Errors
    ///
    /// Fails if the document is not valid TOML for this structure or the resulting config is invalid.
    ///
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: MuxConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    ///
    /// Reads a TOML config file.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read, or for any reason [`MuxConfig::from_toml_str`] fails.
    ///
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        MuxConfig::from_toml_str(&content)
    }

    ///
    /// Checks the constraints the container puts on the configured values.
    ///
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.doc_type.is_empty() {
            return Err(ConfigError::Invalid("doc_type must not be empty".to_string()));
        }
        if self.timestamp_scale == 0 {
            return Err(ConfigError::Invalid("timestamp_scale must be greater than 0".to_string()));
        }
        if self.video.track_number == 0 || self.audio.track_number == 0 {
            return Err(ConfigError::Invalid("track numbers must be greater than 0".to_string()));
        }
        if self.video.track_number == self.audio.track_number {
            return Err(ConfigError::Invalid(format!("video and audio share track number {}", self.video.track_number)));
        }
        if self.video.track_uid == 0 || self.audio.track_uid == 0 {
            return Err(ConfigError::Invalid("track uids must be greater than 0".to_string()));
        }
        if self.audio.channels == 0 {
            return Err(ConfigError::Invalid("audio channels must be greater than 0".to_string()));
        }
        if self.audio.sampling_frequency.is_nan() || self.audio.sampling_frequency <= 0.0 || self.audio.sampling_frequency.round() > f64::from(u32::MAX) {
            return Err(ConfigError::Invalid(format!("invalid sampling frequency {}", self.audio.sampling_frequency)));
        }
        Ok(())
    }
}
