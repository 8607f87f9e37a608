//! The audio frame set: a fixed block of PCM samples plus its metadata.
//!
//! An [`AudioFrameSet`] owns its backing bytes exclusively. Metadata is fixed at
//! construction and the only state change is the one-way [`close`](AudioFrameSet::close),
//! after which every operation except reading the timestamp fails with
//! [`AudioFrameError::InvalidState`].
//!
//! # Examples
//!
//! ```rust
//! use audio_frames::{AudioFrameSet, CopyToOptions, SampleFormat};
//!
//! // Two interleaved channels, five frames
//! let samples = [0u8, 128, 255, 10, 20, 30, 40, 50, 60, 70];
//! let frames = AudioFrameSet::from_samples(&samples, SampleFormat::U8, 2, 44100.0, 0)?;
//!
//! let options = CopyToOptions::plane(0).with_format(SampleFormat::U8Planar);
//! let mut left = vec![0u8; frames.allocation_size(&options)?];
//! frames.copy_to(&mut left, &options)?;
//! assert_eq!(left, [0, 255, 20, 40, 60]);
//! # Ok::<(), audio_frames::AudioFrameError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::addressing::{CopyPlan, compute_copy_element_count};
use crate::buffer::{detach_all, validate_transfer_list};
use crate::conversions::copy_samples;
use crate::init::FrameLayout;
use crate::{
    AudioFrameError, AudioFrameResult, AudioFrameSetInit, AudioSample, ByteBuffer, SampleFormat,
};

/// Options for [`AudioFrameSet::allocation_size`] and [`AudioFrameSet::copy_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CopyToOptions {
    /// Plane to copy. Always 0 for interleaved destination formats.
    pub plane_index: usize,
    /// First frame to copy; defaults to 0.
    #[serde(default)]
    pub frame_offset: Option<usize>,
    /// Frames to copy; defaults to every frame after `frame_offset`.
    #[serde(default)]
    pub frame_count: Option<usize>,
    /// Destination format; defaults to the frame set's own format.
    #[serde(default)]
    pub format: Option<SampleFormat>,
}

impl CopyToOptions {
    /// Options copying plane `plane_index` with every other option defaulted.
    pub const fn plane(plane_index: usize) -> Self {
        Self {
            plane_index,
            frame_offset: None,
            frame_count: None,
            format: None,
        }
    }

    /// Set the first frame to copy.
    pub const fn with_frame_offset(mut self, frame_offset: usize) -> Self {
        self.frame_offset = Some(frame_offset);
        self
    }

    /// Set the number of frames to copy.
    pub const fn with_frame_count(mut self, frame_count: usize) -> Self {
        self.frame_count = Some(frame_count);
        self
    }

    /// Set the destination format.
    pub const fn with_format(mut self, format: SampleFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A block of PCM audio samples with format, channel, frame and timing metadata.
///
/// There is no [`Clone`] impl; use [`try_clone`](AudioFrameSet::try_clone),
/// which fails on a closed frame set.
#[derive(Debug)]
pub struct AudioFrameSet {
    data: Vec<u8>,
    layout: Option<FrameLayout>,
    timestamp: i64,
}

impl AudioFrameSet {
    /// Construct a frame set from `init`, capturing its data and then detaching
    /// every buffer in `init.transfer`.
    ///
    /// Nothing is detached unless construction succeeds.
    ///
    /// # Errors
    /// - [`AudioFrameError::MissingField`] / [`AudioFrameError::InvalidParameter`]
    ///   for absent or non-positive fields
    /// - [`AudioFrameError::InsufficientBuffer`] if `data` is too short
    /// - [`AudioFrameError::DuplicateTransfer`] if `transfer` lists a buffer twice
    pub fn new(init: AudioFrameSetInit) -> AudioFrameResult<Self> {
        let (layout, timestamp, view) = init.validate()?;
        validate_transfer_list(&init.transfer)?;

        let data_transferred = init
            .transfer
            .iter()
            .any(|buffer| buffer.ptr_eq(view.buffer()));
        // Another handle may have shrunk the buffer since validation, so the
        // length is checked again against what is actually captured.
        let required = layout.required_bytes().unwrap_or(usize::MAX);
        let data = view.capture(required, data_transferred)?;
        detach_all(&init.transfer);

        debug!(
            format = %layout.format,
            channels = layout.number_of_channels,
            frames = layout.number_of_frames,
            sample_rate = layout.sample_rate,
            timestamp,
            transferred = init.transfer.len(),
            "constructed audio frame set"
        );
        Ok(Self {
            data,
            layout: Some(layout),
            timestamp,
        })
    }

    /// Construct an open frame set from typed samples.
    ///
    /// The encoding comes from `T` and only the layout of `format` is used;
    /// the frame count is `samples.len() / number_of_channels`.
    ///
    /// # Errors
    /// Same as [`AudioFrameSet::new`]; an empty slice fails as a zero frame count.
    pub fn from_samples<T: AudioSample>(
        samples: &[T],
        format: SampleFormat,
        number_of_channels: u32,
        sample_rate: f64,
        timestamp: i64,
    ) -> AudioFrameResult<Self> {
        let format = SampleFormat::from_parts(T::ENCODING, format.layout());
        let number_of_frames = match number_of_channels {
            0 => 0,
            channels => samples.len() / channels as usize,
        };
        let number_of_frames = u32::try_from(number_of_frames).map_err(|_| {
            AudioFrameError::invalid_parameter("numberOfFrames", "exceeds u32::MAX")
        })?;
        Self::new(
            AudioFrameSetInit::new()
                .with_data(ByteBuffer::from_samples(samples))
                .with_format(format)
                .with_number_of_channels(number_of_channels)
                .with_number_of_frames(number_of_frames)
                .with_sample_rate(sample_rate)
                .with_timestamp(timestamp),
        )
    }

    fn open_layout(&self, operation: &'static str) -> AudioFrameResult<&FrameLayout> {
        self.layout
            .as_ref()
            .ok_or(AudioFrameError::closed(operation))
    }

    /// Sample format, or `None` once closed.
    pub fn format(&self) -> Option<SampleFormat> {
        self.layout.map(|layout| layout.format)
    }

    /// Frames per second; 0 once closed.
    pub fn sample_rate(&self) -> f64 {
        self.layout.map_or(0.0, |layout| layout.sample_rate)
    }

    /// Frames per channel; 0 once closed.
    pub fn number_of_frames(&self) -> u32 {
        self.layout.map_or(0, |layout| layout.number_of_frames)
    }

    /// Channel count; 0 once closed.
    pub fn number_of_channels(&self) -> u32 {
        self.layout.map_or(0, |layout| layout.number_of_channels)
    }

    /// Planes in the frame set's own format; 0 once closed.
    pub fn number_of_planes(&self) -> u32 {
        self.layout.map_or(0, |layout| {
            if layout.format.is_planar() {
                layout.number_of_channels
            } else {
                1
            }
        })
    }

    /// Duration in microseconds, `number_of_frames / sample_rate * 1_000_000`; 0 once closed.
    pub fn duration(&self) -> f64 {
        self.layout.map_or(0.0, |layout| {
            f64::from(layout.number_of_frames) / layout.sample_rate * 1_000_000.0
        })
    }

    /// Presentation timestamp in microseconds. Still readable after close.
    pub const fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Returns true once [`close`](AudioFrameSet::close) has been called.
    pub const fn is_closed(&self) -> bool {
        self.layout.is_none()
    }

    /// Read-only view of the backing bytes.
    ///
    /// # Errors
    /// Returns [`AudioFrameError::InvalidState`] if the frame set is closed.
    pub fn bytes(&self) -> AudioFrameResult<&[u8]> {
        self.open_layout("read bytes")?;
        Ok(&self.data)
    }

    fn plan_copy(
        &self,
        operation: &'static str,
        options: &CopyToOptions,
    ) -> AudioFrameResult<(SampleFormat, SampleFormat, CopyPlan)> {
        let layout = self.open_layout(operation)?;
        let format = options.format.unwrap_or(layout.format);
        let number_of_frames = layout.number_of_frames as usize;
        let number_of_channels = layout.number_of_channels as usize;
        let frame_offset = options.frame_offset.unwrap_or(0);
        let frame_count = options
            .frame_count
            .unwrap_or_else(|| number_of_frames.saturating_sub(frame_offset));

        let element_count = compute_copy_element_count(
            format,
            frame_count,
            frame_offset,
            number_of_channels,
            number_of_frames,
            options.plane_index,
        )?;
        Ok((
            layout.format,
            format,
            CopyPlan {
                source_layout: layout.format.layout(),
                destination_layout: format.layout(),
                number_of_channels,
                number_of_frames,
                frame_offset,
                plane_index: options.plane_index,
                element_count,
            },
        ))
    }

    /// Bytes a [`copy_to`](AudioFrameSet::copy_to) with the same options writes.
    ///
    /// # Errors
    /// - [`AudioFrameError::InvalidState`] if the frame set is closed
    /// - [`AudioFrameError::OutOfBounds`] if the plane or frame window is out of range
    pub fn allocation_size(&self, options: &CopyToOptions) -> AudioFrameResult<usize> {
        let (_, format, plan) = self.plan_copy("compute allocation size", options)?;
        plan.element_count
            .checked_mul(format.bytes_per_sample())
            .ok_or_else(|| AudioFrameError::out_of_bounds("frameCount", plan.element_count, 0))
    }

    /// Copy samples into `destination`, converting to `options.format`.
    ///
    /// Returns the number of bytes written, which always equals
    /// [`allocation_size`](AudioFrameSet::allocation_size) for the same options.
    /// Nothing is written when an error is returned.
    ///
    /// # Errors
    /// - [`AudioFrameError::InvalidState`] if the frame set is closed
    /// - [`AudioFrameError::OutOfBounds`] if the plane or frame window is out of range
    /// - [`AudioFrameError::DestinationTooSmall`] if `destination` cannot hold the copy
    /// - [`AudioFrameError::UnsupportedConversion`] if the format pair is not supported
    pub fn copy_to(&self, destination: &mut [u8], options: &CopyToOptions) -> AudioFrameResult<usize> {
        let (source_format, format, plan) = self.plan_copy("copy", options)?;
        let required = plan
            .element_count
            .checked_mul(format.bytes_per_sample())
            .unwrap_or(usize::MAX);
        if required > destination.len() {
            return Err(AudioFrameError::DestinationTooSmall {
                required,
                available: destination.len(),
            });
        }

        trace!(
            from = %source_format,
            to = %format,
            plane = plan.plane_index,
            frame_offset = plan.frame_offset,
            elements = plan.element_count,
            "copying audio frames"
        );
        copy_samples(source_format, format, &self.data, destination, &plan)
    }

    /// Create an independent open frame set with a copy of the backing bytes.
    ///
    /// # Errors
    /// Returns [`AudioFrameError::InvalidState`] if the frame set is closed.
    pub fn try_clone(&self) -> AudioFrameResult<Self> {
        let layout = *self.open_layout("clone")?;
        debug!(bytes = self.data.len(), timestamp = self.timestamp, "cloned audio frame set");
        Ok(Self {
            data: self.data.clone(),
            layout: Some(layout),
            timestamp: self.timestamp,
        })
    }

    /// Close the frame set, releasing its samples.
    ///
    /// Afterwards the format reads as `None` and channels, frames, sample rate
    /// and duration read as 0; the timestamp keeps its value.
    ///
    /// # Errors
    /// Returns [`AudioFrameError::InvalidState`] if the frame set is already closed.
    pub fn close(&mut self) -> AudioFrameResult<()> {
        self.open_layout("close")?;
        self.layout = None;
        self.data = Vec::new();
        debug!(timestamp = self.timestamp, "closed audio frame set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BufferView, ErrorKind};

    fn stereo_u8() -> AudioFrameSet {
        AudioFrameSet::from_samples(
            &[0u8, 128, 255, 10, 20, 30, 40, 50, 60, 70],
            SampleFormat::U8,
            2,
            8000.0,
            42,
        )
        .unwrap()
    }

    #[test]
    fn test_accessors() {
        let frames = stereo_u8();
        assert_eq!(frames.format(), Some(SampleFormat::U8));
        assert_eq!(frames.number_of_channels(), 2);
        assert_eq!(frames.number_of_frames(), 5);
        assert_eq!(frames.number_of_planes(), 1);
        assert_eq!(frames.sample_rate(), 8000.0);
        assert_eq!(frames.timestamp(), 42);
        assert_eq!(frames.duration(), 625.0);
        assert!(!frames.is_closed());
        assert_eq!(frames.bytes().unwrap().len(), 10);
    }

    #[test]
    fn test_duration_uses_full_precision_rate() {
        let frames = AudioFrameSet::from_samples(&[0u8], SampleFormat::U8, 1, 0.1, 0).unwrap();
        assert_eq!(frames.sample_rate(), 0.1);
        assert_eq!(frames.duration(), 1.0 / 0.1 * 1_000_000.0);
        assert_eq!(frames.duration(), 10_000_000.0);
    }

    #[test]
    fn test_from_samples_takes_encoding_from_type() {
        let frames =
            AudioFrameSet::from_samples(&[0.0f32; 6], SampleFormat::U8Planar, 3, 48000.0, 0)
                .unwrap();
        assert_eq!(frames.format(), Some(SampleFormat::F32Planar));
        assert_eq!(frames.number_of_frames(), 2);
        assert_eq!(frames.number_of_planes(), 3);
    }

    #[test]
    fn test_from_samples_rejects_empty_input() {
        let err = AudioFrameSet::from_samples::<i16>(&[], SampleFormat::S16, 2, 48000.0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);

        let err = AudioFrameSet::from_samples(&[1i16, 2], SampleFormat::S16, 0, 48000.0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
    }

    #[test]
    fn test_copy_defaults_to_own_format() {
        let frames = stereo_u8();
        let options = CopyToOptions::plane(0);
        assert_eq!(frames.allocation_size(&options).unwrap(), 10);
        let mut out = [0u8; 10];
        assert_eq!(frames.copy_to(&mut out, &options).unwrap(), 10);
        assert_eq!(out, [0, 128, 255, 10, 20, 30, 40, 50, 60, 70]);
    }

    #[test]
    fn test_copy_with_frame_window() {
        let frames = stereo_u8();
        let options = CopyToOptions::plane(1)
            .with_format(SampleFormat::U8Planar)
            .with_frame_offset(1)
            .with_frame_count(3);
        assert_eq!(frames.allocation_size(&options).unwrap(), 3);
        let mut out = [0u8; 3];
        frames.copy_to(&mut out, &options).unwrap();
        assert_eq!(out, [10, 30, 50]);
    }

    #[test]
    fn test_copy_leaves_tail_of_larger_destination_untouched() {
        let frames = stereo_u8();
        let options = CopyToOptions::plane(0).with_format(SampleFormat::U8Planar);
        let mut out = [9u8; 8];
        assert_eq!(frames.copy_to(&mut out, &options).unwrap(), 5);
        assert_eq!(out, [0, 255, 20, 40, 60, 9, 9, 9]);
    }

    #[test]
    fn test_destination_too_small() {
        let frames = stereo_u8();
        let mut out = [7u8; 9];
        let err = frames
            .copy_to(&mut out, &CopyToOptions::plane(0))
            .unwrap_err();
        assert_eq!(
            err,
            AudioFrameError::DestinationTooSmall {
                required: 10,
                available: 9
            }
        );
        assert_eq!(err.kind(), ErrorKind::Bounds);
        assert_eq!(out, [7u8; 9]);
    }

    #[test]
    fn test_interleaved_plane_index_must_be_zero() {
        let frames = stereo_u8();
        let err = frames.allocation_size(&CopyToOptions::plane(1)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Bounds);
    }

    #[test]
    fn test_close_resets_metadata_but_keeps_timestamp() {
        let mut frames = stereo_u8();
        frames.close().unwrap();
        assert!(frames.is_closed());
        assert_eq!(frames.format(), None);
        assert_eq!(frames.number_of_channels(), 0);
        assert_eq!(frames.number_of_frames(), 0);
        assert_eq!(frames.number_of_planes(), 0);
        assert_eq!(frames.sample_rate(), 0.0);
        assert_eq!(frames.duration(), 0.0);
        assert_eq!(frames.timestamp(), 42);
    }

    #[test]
    fn test_operations_fail_after_close() {
        let mut frames = stereo_u8();
        frames.close().unwrap();
        let options = CopyToOptions::plane(0);

        let err = frames.close().unwrap_err();
        assert_eq!(err, AudioFrameError::closed("close"));
        assert_eq!(
            frames.allocation_size(&options).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        let mut out = [0u8; 10];
        assert_eq!(
            frames.copy_to(&mut out, &options).unwrap_err().kind(),
            ErrorKind::InvalidState
        );
        assert_eq!(frames.try_clone().unwrap_err().kind(), ErrorKind::InvalidState);
        assert_eq!(frames.bytes().unwrap_err().kind(), ErrorKind::InvalidState);
    }

    #[test]
    fn test_construction_copies_view_window() {
        let buffer = ByteBuffer::new((0..12).collect());
        let view = BufferView::new(buffer.clone(), 4, 4).unwrap();
        let frames = AudioFrameSet::new(
            AudioFrameSetInit::new()
                .with_data(view)
                .with_format(SampleFormat::U8Planar)
                .with_number_of_channels(2)
                .with_number_of_frames(2)
                .with_sample_rate(1000.0)
                .with_timestamp(0),
        )
        .unwrap();
        assert_eq!(frames.bytes().unwrap(), &[4, 5, 6, 7]);

        // Later writes to the caller's buffer are not observed
        buffer.with_bytes_mut(|bytes| bytes.fill(0));
        assert_eq!(frames.bytes().unwrap(), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_copy_to_options_deserialize_from_camel_case() {
        let options: CopyToOptions =
            serde_json::from_str(r#"{"planeIndex": 1, "frameOffset": 2, "format": "s16-planar"}"#)
                .unwrap();
        assert_eq!(
            options,
            CopyToOptions::plane(1)
                .with_frame_offset(2)
                .with_format(SampleFormat::S16Planar)
        );
    }
}
