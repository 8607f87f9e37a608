//! # Buffer Conversions
//!
//! Byte-level copy kernels behind [`AudioFrameSet::copy_to`](crate::AudioFrameSet::copy_to).
//!
//! ## Supported Conversions
//! Copies are accepted for:
//!
//! - any source format into a destination with the **same encoding**, in either
//!   layout (plain memory copy, re-addressed when the layouts differ)
//! - any source format into **`f32-planar`** (decode through [`ConvertTo<f32>`]
//!   and de-interleave when the source is interleaved)
//!
//! Every other pair fails with [`AudioFrameError::UnsupportedConversion`] unless
//! the `extended-conversions` feature is enabled, in which case the remaining
//! pairs are converted sample by sample with the direct scalar converters.

use crate::addressing::CopyPlan;
use crate::{
    AudioFrameError, AudioFrameResult, AudioSample, ConvertTo, SampleEncoding, SampleFormat,
};

/// Returns true if a copy from `source` into `destination` is accepted.
pub fn conversion_supported(source: SampleFormat, destination: SampleFormat) -> bool {
    source.encoding() == destination.encoding()
        || destination == SampleFormat::F32Planar
        || cfg!(feature = "extended-conversions")
}

/// Copy the samples described by `plan` from `source` into `destination`,
/// converting from `source_format` to `destination_format`.
///
/// `plan` must come from a validated request and `destination` must hold at
/// least `plan.element_count` destination samples.
///
/// Returns the number of bytes written.
///
/// # Errors
/// Returns [`AudioFrameError::UnsupportedConversion`] if the pair is not
/// accepted by [`conversion_supported`].
pub(crate) fn copy_samples(
    source_format: SampleFormat,
    destination_format: SampleFormat,
    source: &[u8],
    destination: &mut [u8],
    plan: &CopyPlan,
) -> AudioFrameResult<usize> {
    if !conversion_supported(source_format, destination_format) {
        return Err(AudioFrameError::UnsupportedConversion {
            from: source_format,
            to: destination_format,
        });
    }

    let bytes_written = plan.element_count * destination_format.bytes_per_sample();
    if source_format.encoding() == destination_format.encoding() {
        if let Some(range) = plan.contiguous_source() {
            let width = source_format.bytes_per_sample();
            destination[..bytes_written]
                .copy_from_slice(&source[range.start * width..range.end * width]);
            return Ok(bytes_written);
        }
    }

    let source_encoding = source_format.encoding();
    match destination_format.encoding() {
        SampleEncoding::U8 => copy_into::<u8>(source_encoding, source, destination, plan),
        SampleEncoding::S16 => copy_into::<i16>(source_encoding, source, destination, plan),
        SampleEncoding::S32 => copy_into::<i32>(source_encoding, source, destination, plan),
        SampleEncoding::F32 => copy_into::<f32>(source_encoding, source, destination, plan),
    }
    Ok(bytes_written)
}

fn copy_into<D: AudioSample>(
    source_encoding: SampleEncoding,
    source: &[u8],
    destination: &mut [u8],
    plan: &CopyPlan,
) where
    u8: ConvertTo<D>,
    i16: ConvertTo<D>,
    i32: ConvertTo<D>,
    f32: ConvertTo<D>,
{
    match source_encoding {
        SampleEncoding::U8 => convert_elements::<u8, D>(source, destination, plan),
        SampleEncoding::S16 => convert_elements::<i16, D>(source, destination, plan),
        SampleEncoding::S32 => convert_elements::<i32, D>(source, destination, plan),
        SampleEncoding::F32 => convert_elements::<f32, D>(source, destination, plan),
    }
}

fn convert_elements<S, D>(source: &[u8], destination: &mut [u8], plan: &CopyPlan)
where
    S: AudioSample + ConvertTo<D>,
    D: AudioSample,
{
    for element in 0..plan.element_count {
        let sample = S::read_from(source, plan.source_index(element));
        let converted: D = ConvertTo::<D>::convert_to(sample);
        converted.write_to(destination, element);
    }
}
