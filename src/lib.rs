// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::let_unit_value)] // Avoids binding `()` to variables
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_safety_doc)] // Docs for `unsafe` functions
#![deny(missing_docs)] // Documentation is a must for release

//! # AudioFrames
//!
//! A fallback implementation of raw PCM audio frame buffers for hosts whose native
//! WebCodecs `AudioData` is missing or broken. An [`AudioFrameSet`] owns a fixed
//! block of samples in one of eight sample formats and copies them out with exact,
//! single-precision format conversion and plane/frame addressing.
//!
//! ## Features
//!
//! - `extended-conversions`: accept copies between every pair of encodings, not just
//!   the guaranteed matrix (same encoding, or anything into `f32-planar`)
//!
//! ## Copying
//!
//! Samples only leave a frame set through [`AudioFrameSet::copy_to`], which checks
//! the plane and frame window before touching any memory. The copy plan and the
//! byte kernels behind it are internal; [`conversion_supported`] reports which
//! format pairs are accepted.
//!
//! ```compile_fail
//! use audio_frames::CopyPlan;
//! ```
//!
//! ```compile_fail
//! use audio_frames::conversions::copy_samples;
//! ```
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`AudioFrameResult`]. [`AudioFrameError::kind`]
//! classifies errors so a host adapter can map them onto its own exception types:
//!
//! ```rust
//! use audio_frames::{AudioFrameError, AudioFrameResult, ErrorKind};
//!
//! let result: AudioFrameResult<()> = Err(AudioFrameError::closed("copy"));
//!
//! match result.map_err(|err| err.kind()) {
//!     Ok(()) => {}
//!     Err(ErrorKind::InvalidState) => eprintln!("frame set already closed"),
//!     Err(ErrorKind::Bounds) => eprintln!("bad plane or frame window"),
//!     Err(other) => eprintln!("other error: {other:?}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ### Creating Frame Sets
//!
//! ```rust
//! use audio_frames::{AudioFrameSet, AudioFrameSetInit, ByteBuffer, SampleFormat};
//!
//! // From typed samples; the encoding comes from the element type
//! let stereo = AudioFrameSet::from_samples(&[0i16, 0, 100, -100], SampleFormat::S16, 2, 48000.0, 0)?;
//! assert_eq!(stereo.number_of_frames(), 2);
//!
//! // From a caller buffer that is transferred into the frame set
//! let buffer = ByteBuffer::zeroed(4 * 480);
//! let mono = AudioFrameSet::new(
//!     AudioFrameSetInit::new()
//!         .with_data(buffer.clone())
//!         .with_format(SampleFormat::F32)
//!         .with_number_of_channels(1)
//!         .with_number_of_frames(480)
//!         .with_sample_rate(48000.0)
//!         .with_timestamp(0)
//!         .with_transfer(vec![buffer.clone()]),
//! )?;
//! assert_eq!(mono.duration(), 10_000.0);
//! assert_eq!(buffer.byte_length(), 0);
//! # Ok::<(), audio_frames::AudioFrameError>(())
//! ```
//!
//! ### Copying and Converting
//!
//! ```rust
//! use audio_frames::{AudioFrameSet, AudioSample, CopyToOptions, SampleFormat};
//!
//! let frames = AudioFrameSet::from_samples(&[0u8, 255, 128, 128], SampleFormat::U8, 2, 8000.0, 0)?;
//!
//! // Decode the right channel to planar f32
//! let options = CopyToOptions::plane(1).with_format(SampleFormat::F32Planar);
//! let mut right = vec![0u8; frames.allocation_size(&options)?];
//! frames.copy_to(&mut right, &options)?;
//! assert!((f32::read_from(&right, 0) - 1.0).abs() < 1e-6);
//! assert_eq!(f32::read_from(&right, 1), 0.0);
//! # Ok::<(), audio_frames::AudioFrameError>(())
//! ```
//!
//! ### Lifecycle
//!
//! ```rust
//! use audio_frames::{AudioFrameSet, ErrorKind, SampleFormat};
//!
//! let mut frames = AudioFrameSet::from_samples(&[0.0f32; 8], SampleFormat::F32Planar, 2, 8000.0, 1234)?;
//! let copy = frames.try_clone()?;
//!
//! frames.close()?;
//! assert_eq!(frames.format(), None);
//! assert_eq!(frames.timestamp(), 1234);
//! assert_eq!(frames.close().unwrap_err().kind(), ErrorKind::InvalidState);
//!
//! // The clone is unaffected
//! assert_eq!(copy.number_of_frames(), 4);
//! # Ok::<(), audio_frames::AudioFrameError>(())
//! ```

mod addressing;
mod buffer;
mod conversions;
mod error;
mod format;
mod init;
mod repr;
/// Sample types and scalar conversions.
pub mod traits;

#[cfg(test)]
mod tests;

pub use crate::addressing::compute_copy_element_count;
pub use crate::buffer::{BufferView, ByteBuffer, detach_all, validate_transfer_list};
pub use crate::conversions::conversion_supported;
pub use crate::error::{AudioFrameError, AudioFrameResult, ErrorKind};
pub use crate::format::{SampleEncoding, SampleFormat};
pub use crate::init::AudioFrameSetInit;
pub use crate::repr::{AudioFrameSet, CopyToOptions};
pub use crate::traits::{AudioSample, ConvertTo};

/// Array of supported sample format tags, in [`SampleFormat::ALL`] order
pub const SUPPORTED_FORMATS: [&str; 8] = [
    "u8",
    "u8-planar",
    "s16",
    "s16-planar",
    "s32",
    "s32-planar",
    "f32",
    "f32-planar",
];

/// Describes how multi-channel audio data is organized in memory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChannelLayout {
    /// Samples from different channels are stored sequentially (LRLRLR...)
    /// This is the most common format for audio files and streaming
    #[default]
    Interleaved,
    /// Samples from each channel are stored in separate contiguous planes (LLL...RRR...)
    /// This format is often preferred for digital signal processing
    Planar,
}

impl ChannelLayout {
    /// Returns true if the layout is interleaved
    pub const fn is_interleaved(&self) -> bool {
        matches!(self, ChannelLayout::Interleaved)
    }

    /// Returns true if the layout is planar
    pub const fn is_planar(&self) -> bool {
        matches!(self, ChannelLayout::Planar)
    }
}
