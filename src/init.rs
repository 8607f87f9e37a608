//! Construction parameters for [`AudioFrameSet`](crate::AudioFrameSet).
//!
//! ```rust
//! use audio_frames::{AudioFrameSet, AudioFrameSetInit, ByteBuffer, SampleFormat};
//!
//! let buffer = ByteBuffer::zeroed(2 * 100 * 4);
//! let init = AudioFrameSetInit::new()
//!     .with_data(buffer.clone())
//!     .with_format(SampleFormat::F32Planar)
//!     .with_number_of_channels(2)
//!     .with_number_of_frames(100)
//!     .with_sample_rate(8000.0)
//!     .with_timestamp(1234)
//!     .with_transfer(vec![buffer.clone()]);
//!
//! let frames = AudioFrameSet::new(init).unwrap();
//! assert_eq!(frames.duration(), 12500.0);
//! assert_eq!(buffer.byte_length(), 0);
//! ```

use crate::{AudioFrameError, AudioFrameResult, BufferView, ByteBuffer, SampleFormat};

/// Initialization data for an audio frame set.
///
/// Every field except `transfer` is required; a missing field fails
/// construction with [`AudioFrameError::MissingField`].
#[derive(Debug, Clone, Default)]
pub struct AudioFrameSetInit {
    /// Backing samples, laid out as `format` describes.
    pub data: Option<BufferView>,
    /// Sample format of `data`.
    pub format: Option<SampleFormat>,
    /// Number of channels, > 0.
    pub number_of_channels: Option<u32>,
    /// Frames per channel, > 0.
    pub number_of_frames: Option<u32>,
    /// Frames per second, finite and > 0.
    pub sample_rate: Option<f64>,
    /// Presentation timestamp in microseconds.
    pub timestamp: Option<i64>,
    /// Buffers to detach once the frame set has captured its data.
    pub transfer: Vec<ByteBuffer>,
}

/// Validated metadata of an open frame set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FrameLayout {
    pub(crate) format: SampleFormat,
    pub(crate) number_of_channels: u32,
    pub(crate) number_of_frames: u32,
    pub(crate) sample_rate: f64,
}

impl FrameLayout {
    /// Bytes needed to hold every sample, or `None` on overflow.
    pub(crate) fn required_bytes(&self) -> Option<usize> {
        (self.number_of_frames as usize)
            .checked_mul(self.number_of_channels as usize)?
            .checked_mul(self.format.bytes_per_sample())
    }
}

impl AudioFrameSetInit {
    /// Create an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the backing data, either a whole [`ByteBuffer`] or a [`BufferView`].
    pub fn with_data(mut self, data: impl Into<BufferView>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the sample format.
    pub fn with_format(mut self, format: SampleFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Set the channel count.
    pub fn with_number_of_channels(mut self, number_of_channels: u32) -> Self {
        self.number_of_channels = Some(number_of_channels);
        self
    }

    /// Set the frame count.
    pub fn with_number_of_frames(mut self, number_of_frames: u32) -> Self {
        self.number_of_frames = Some(number_of_frames);
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: f64) -> Self {
        self.sample_rate = Some(sample_rate);
        self
    }

    /// Set the timestamp in microseconds.
    pub fn with_timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the buffers to transfer.
    pub fn with_transfer(mut self, transfer: Vec<ByteBuffer>) -> Self {
        self.transfer = transfer;
        self
    }

    /// Check presence, positivity and backing length, in that order.
    pub(crate) fn validate(&self) -> AudioFrameResult<(FrameLayout, i64, &BufferView)> {
        let data = self
            .data
            .as_ref()
            .ok_or(AudioFrameError::MissingField { field: "data" })?;
        let format = self
            .format
            .ok_or(AudioFrameError::MissingField { field: "format" })?;
        let number_of_channels = self.number_of_channels.ok_or(AudioFrameError::MissingField {
            field: "numberOfChannels",
        })?;
        let number_of_frames = self.number_of_frames.ok_or(AudioFrameError::MissingField {
            field: "numberOfFrames",
        })?;
        let sample_rate = self
            .sample_rate
            .ok_or(AudioFrameError::MissingField { field: "sampleRate" })?;
        let timestamp = self
            .timestamp
            .ok_or(AudioFrameError::MissingField { field: "timestamp" })?;

        if number_of_channels == 0 {
            return Err(AudioFrameError::invalid_parameter(
                "numberOfChannels",
                "must be > 0",
            ));
        }
        if number_of_frames == 0 {
            return Err(AudioFrameError::invalid_parameter(
                "numberOfFrames",
                "must be > 0",
            ));
        }
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return Err(AudioFrameError::invalid_parameter(
                "sampleRate",
                format!("must be a finite number > 0, got {sample_rate}"),
            ));
        }

        let layout = FrameLayout {
            format,
            number_of_channels,
            number_of_frames,
            sample_rate,
        };
        let available = data.byte_length();
        match layout.required_bytes() {
            Some(required) if required <= available => Ok((layout, timestamp, data)),
            required => Err(AudioFrameError::InsufficientBuffer {
                required: required.unwrap_or(usize::MAX),
                available,
            }),
        }
    }
}
