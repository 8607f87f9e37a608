//! Sample types and scalar conversions between them.
//!
//! Every conversion is computed in single precision, so results match a host
//! that rounds each intermediate step to `f32`. Signed ranges are asymmetric:
//! negative values scale by the magnitude of the minimum (128, 32768, 2^31) and
//! non-negative values by the maximum (127, 32767, 2^31 - 1). Float to integer
//! conversions round to nearest (ties away from zero) and saturate at the
//! destination bounds; out-of-range inputs are not rejected.

use bytemuck::Pod;
use num_traits::Bounded;
use std::fmt::{Debug, Display};

use crate::SampleEncoding;

/// Core trait for the four sample encodings (`u8`, `i16`, `i32`, `f32`).
///
/// Implementors can be read from and written to unaligned native-endian byte
/// buffers and convert to every other encoding.
pub trait AudioSample:
    Pod
    + Default
    + Debug
    + Display
    + PartialEq
    + PartialOrd
    + Send
    + Sync
    + Bounded
    + ConvertTo<u8>
    + ConvertTo<i16>
    + ConvertTo<i32>
    + ConvertTo<f32>
{
    /// Encoding tag for this sample type.
    const ENCODING: SampleEncoding;
    /// The value representing silence.
    const SILENCE: Self;
    /// Size of one sample in bytes.
    const BYTES: usize = std::mem::size_of::<Self>();

    /// Read the sample at `index` (in samples, not bytes) from `bytes`.
    ///
    /// # Panics
    /// Panics if the sample lies outside `bytes`.
    #[inline]
    fn read_from(bytes: &[u8], index: usize) -> Self {
        let start = index * Self::BYTES;
        bytemuck::pod_read_unaligned(&bytes[start..start + Self::BYTES])
    }

    /// Write this sample at `index` (in samples, not bytes) into `bytes`.
    ///
    /// # Panics
    /// Panics if the sample lies outside `bytes`.
    #[inline]
    fn write_to(self, bytes: &mut [u8], index: usize) {
        let start = index * Self::BYTES;
        bytes[start..start + Self::BYTES].copy_from_slice(bytemuck::bytes_of(&self));
    }

    /// Convert a slice of samples into a byte vector in native-endian order.
    #[inline]
    fn slice_to_bytes(samples: &[Self]) -> Vec<u8> {
        Vec::from(bytemuck::cast_slice(samples))
    }
}

/// Conversion of one sample value into another encoding.
///
/// ```rust
/// use audio_frames::ConvertTo;
///
/// let low: f32 = 0u8.convert_to();
/// assert_eq!(low, -1.0);
/// let high: i16 = 1.0f32.convert_to();
/// assert_eq!(high, i16::MAX);
/// ```
pub trait ConvertTo<T> {
    /// Convert this sample to the target encoding.
    fn convert_to(self) -> T;

    /// Convert from another sample type to this type.
    /// This is a convenience method that calls `convert_to` on the source value.
    fn convert_from<F: ConvertTo<T>>(source: F) -> T {
        source.convert_to()
    }
}

/// Zero point and scale magnitudes of an integer encoding, as `f32`.
trait PcmRange {
    const CENTER: f32;
    const NEGATIVE: f32;
    const POSITIVE: f32;
}

impl PcmRange for u8 {
    const CENTER: f32 = 128.0;
    const NEGATIVE: f32 = 128.0;
    const POSITIVE: f32 = 127.0;
}

impl PcmRange for i16 {
    const CENTER: f32 = 0.0;
    const NEGATIVE: f32 = 32768.0;
    const POSITIVE: f32 = 32767.0;
}

impl PcmRange for i32 {
    const CENTER: f32 = 0.0;
    const NEGATIVE: f32 = 2147483648.0;
    const POSITIVE: f32 = 2147483647.0;
}

// ========================
// Conversion Macros
// ========================

/// Generates identity conversions (same type to same type)
macro_rules! impl_identity_conversion {
    ($type:ty) => {
        impl ConvertTo<$type> for $type {
            #[inline(always)]
            fn convert_to(self) -> $type {
                self
            }
        }
    };
}

/// Generates integer-to-float conversions with asymmetric scaling
macro_rules! impl_int_to_float_conversion {
    ($from:ty) => {
        impl ConvertTo<f32> for $from {
            #[inline(always)]
            fn convert_to(self) -> f32 {
                let centered = self as f32 - <$from as PcmRange>::CENTER;
                let divisor = if centered < 0.0 {
                    <$from as PcmRange>::NEGATIVE
                } else {
                    <$from as PcmRange>::POSITIVE
                };
                centered * (1.0 / divisor)
            }
        }
    };
}

/// Generates float-to-integer conversions with asymmetric scaling
macro_rules! impl_float_to_int_conversion {
    ($to:ty) => {
        impl ConvertTo<$to> for f32 {
            #[inline(always)]
            fn convert_to(self) -> $to {
                let scale = if self < 0.0 {
                    <$to as PcmRange>::NEGATIVE
                } else {
                    <$to as PcmRange>::POSITIVE
                };
                // `as` saturates, which clamps 1.0 -> 2^31 onto i32::MAX.
                (<$to as PcmRange>::CENTER + self * scale).round() as $to
            }
        }
    };
}

/// Generates integer-to-integer conversions through the ratio of the two ranges
macro_rules! impl_int_to_int_conversion {
    ($from:ty => $to:ty) => {
        impl ConvertTo<$to> for $from {
            #[inline(always)]
            fn convert_to(self) -> $to {
                let centered = self as f32 - <$from as PcmRange>::CENTER;
                let ratio = if centered < 0.0 {
                    <$to as PcmRange>::NEGATIVE / <$from as PcmRange>::NEGATIVE
                } else {
                    <$to as PcmRange>::POSITIVE / <$from as PcmRange>::POSITIVE
                };
                (<$to as PcmRange>::CENTER + centered * ratio).round() as $to
            }
        }
    };
}

// ========================
// AudioSample Implementations
// ========================

impl AudioSample for u8 {
    const ENCODING: SampleEncoding = SampleEncoding::U8;
    const SILENCE: Self = 128;
}

impl AudioSample for i16 {
    const ENCODING: SampleEncoding = SampleEncoding::S16;
    const SILENCE: Self = 0;
}

impl AudioSample for i32 {
    const ENCODING: SampleEncoding = SampleEncoding::S32;
    const SILENCE: Self = 0;
}

impl AudioSample for f32 {
    const ENCODING: SampleEncoding = SampleEncoding::F32;
    const SILENCE: Self = 0.0;
}

impl_identity_conversion!(u8);
impl_identity_conversion!(i16);
impl_identity_conversion!(i32);
impl_identity_conversion!(f32);

impl_int_to_float_conversion!(u8);
impl_int_to_float_conversion!(i16);
impl_int_to_float_conversion!(i32);

impl_float_to_int_conversion!(u8);
impl_float_to_int_conversion!(i16);
impl_float_to_int_conversion!(i32);

impl_int_to_int_conversion!(u8 => i16);
impl_int_to_int_conversion!(u8 => i32);
impl_int_to_int_conversion!(i16 => u8);
impl_int_to_int_conversion!(i16 => i32);
impl_int_to_int_conversion!(i32 => u8);
impl_int_to_int_conversion!(i32 => i16);
