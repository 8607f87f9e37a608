//! Tests for audio frame sets across construction, copying and lifecycle.
//!
//! Each file exercises one concern end to end through the public API.

use crate::{AudioFrameSet, AudioFrameSetInit, ByteBuffer, SampleEncoding, SampleFormat};

mod scenario_tests;

/// Helper building a frame set whose samples count up from zero in every
/// encoding, so each byte pattern is distinguishable.
pub(crate) fn create_test_frames(
    format: SampleFormat,
    number_of_channels: u32,
    number_of_frames: u32,
) -> AudioFrameSet {
    let samples = (number_of_channels * number_of_frames) as usize;
    let bytes: Vec<u8> = match format.encoding() {
        SampleEncoding::U8 => (0..samples).map(|i| i as u8).collect(),
        SampleEncoding::S16 => (0..samples)
            .flat_map(|i| (i as i16 * 100).to_ne_bytes())
            .collect(),
        SampleEncoding::S32 => (0..samples)
            .flat_map(|i| (i as i32 * 1_000_000).to_ne_bytes())
            .collect(),
        SampleEncoding::F32 => (0..samples)
            .flat_map(|i| (i as f32 / samples as f32).to_ne_bytes())
            .collect(),
    };
    AudioFrameSet::new(
        AudioFrameSetInit::new()
            .with_data(ByteBuffer::new(bytes))
            .with_format(format)
            .with_number_of_channels(number_of_channels)
            .with_number_of_frames(number_of_frames)
            .with_sample_rate(48000.0)
            .with_timestamp(0),
    )
    .expect("Failed to create test frames")
}
