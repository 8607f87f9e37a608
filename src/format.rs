//! Sample encodings and the eight WebCodecs sample format tags.
//!
//! A [`SampleFormat`] pairs a [`SampleEncoding`] (how one sample is stored) with a
//! [`ChannelLayout`] (how channels are arranged in memory). Formats print and parse
//! using the WebCodecs string tags:
//!
//! ```rust
//! use audio_frames::{ChannelLayout, SampleEncoding, SampleFormat};
//!
//! let format: SampleFormat = "s16-planar".parse().unwrap();
//! assert_eq!(format.encoding(), SampleEncoding::S16);
//! assert_eq!(format.layout(), ChannelLayout::Planar);
//! assert_eq!(format.bytes_per_sample(), 2);
//! assert_eq!(format.to_string(), "s16-planar");
//! ```

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AudioFrameError, ChannelLayout};

/// Numeric representation of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleEncoding {
    /// Unsigned 8-bit, silence at 128.
    U8,
    /// Signed 16-bit.
    S16,
    /// Signed 32-bit.
    S32,
    /// 32-bit float, nominally in [-1.0, 1.0].
    F32,
}

impl SampleEncoding {
    /// All encodings, in ascending storage size.
    pub const ALL: [SampleEncoding; 4] = [
        SampleEncoding::U8,
        SampleEncoding::S16,
        SampleEncoding::S32,
        SampleEncoding::F32,
    ];

    /// Size of one sample in bytes.
    pub const fn bytes_per_sample(self) -> usize {
        match self {
            SampleEncoding::U8 => 1,
            SampleEncoding::S16 => 2,
            SampleEncoding::S32 | SampleEncoding::F32 => 4,
        }
    }

    /// Tag of the encoding, which is also the tag of its interleaved format.
    pub const fn as_str(self) -> &'static str {
        match self {
            SampleEncoding::U8 => "u8",
            SampleEncoding::S16 => "s16",
            SampleEncoding::S32 => "s32",
            SampleEncoding::F32 => "f32",
        }
    }
}

impl Display for SampleEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the eight supported sample formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleFormat {
    /// Interleaved unsigned 8-bit.
    #[serde(rename = "u8")]
    U8,
    /// Planar unsigned 8-bit.
    #[serde(rename = "u8-planar")]
    U8Planar,
    /// Interleaved signed 16-bit.
    #[serde(rename = "s16")]
    S16,
    /// Planar signed 16-bit.
    #[serde(rename = "s16-planar")]
    S16Planar,
    /// Interleaved signed 32-bit.
    #[serde(rename = "s32")]
    S32,
    /// Planar signed 32-bit.
    #[serde(rename = "s32-planar")]
    S32Planar,
    /// Interleaved 32-bit float.
    #[serde(rename = "f32")]
    F32,
    /// Planar 32-bit float.
    #[serde(rename = "f32-planar")]
    F32Planar,
}

impl SampleFormat {
    /// All formats, interleaved before planar for each encoding.
    pub const ALL: [SampleFormat; 8] = [
        SampleFormat::U8,
        SampleFormat::U8Planar,
        SampleFormat::S16,
        SampleFormat::S16Planar,
        SampleFormat::S32,
        SampleFormat::S32Planar,
        SampleFormat::F32,
        SampleFormat::F32Planar,
    ];

    /// Build a format from its encoding and layout.
    pub const fn from_parts(encoding: SampleEncoding, layout: ChannelLayout) -> Self {
        match (encoding, layout) {
            (SampleEncoding::U8, ChannelLayout::Interleaved) => SampleFormat::U8,
            (SampleEncoding::U8, ChannelLayout::Planar) => SampleFormat::U8Planar,
            (SampleEncoding::S16, ChannelLayout::Interleaved) => SampleFormat::S16,
            (SampleEncoding::S16, ChannelLayout::Planar) => SampleFormat::S16Planar,
            (SampleEncoding::S32, ChannelLayout::Interleaved) => SampleFormat::S32,
            (SampleEncoding::S32, ChannelLayout::Planar) => SampleFormat::S32Planar,
            (SampleEncoding::F32, ChannelLayout::Interleaved) => SampleFormat::F32,
            (SampleEncoding::F32, ChannelLayout::Planar) => SampleFormat::F32Planar,
        }
    }

    /// The sample encoding of this format.
    pub const fn encoding(self) -> SampleEncoding {
        match self {
            SampleFormat::U8 | SampleFormat::U8Planar => SampleEncoding::U8,
            SampleFormat::S16 | SampleFormat::S16Planar => SampleEncoding::S16,
            SampleFormat::S32 | SampleFormat::S32Planar => SampleEncoding::S32,
            SampleFormat::F32 | SampleFormat::F32Planar => SampleEncoding::F32,
        }
    }

    /// The channel layout of this format.
    pub const fn layout(self) -> ChannelLayout {
        match self {
            SampleFormat::U8 | SampleFormat::S16 | SampleFormat::S32 | SampleFormat::F32 => {
                ChannelLayout::Interleaved
            }
            SampleFormat::U8Planar
            | SampleFormat::S16Planar
            | SampleFormat::S32Planar
            | SampleFormat::F32Planar => ChannelLayout::Planar,
        }
    }

    /// Returns true if each channel is stored as its own plane.
    pub const fn is_planar(self) -> bool {
        self.layout().is_planar()
    }

    /// Size of one sample in bytes.
    pub const fn bytes_per_sample(self) -> usize {
        self.encoding().bytes_per_sample()
    }

    /// Number of planes a buffer with `number_of_channels` channels has in this format.
    pub const fn number_of_planes(self, number_of_channels: usize) -> usize {
        if self.is_planar() {
            number_of_channels
        } else {
            1
        }
    }

    /// The WebCodecs string tag, e.g. `"f32-planar"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            SampleFormat::U8 => "u8",
            SampleFormat::U8Planar => "u8-planar",
            SampleFormat::S16 => "s16",
            SampleFormat::S16Planar => "s16-planar",
            SampleFormat::S32 => "s32",
            SampleFormat::S32Planar => "s32-planar",
            SampleFormat::F32 => "f32",
            SampleFormat::F32Planar => "f32-planar",
        }
    }
}

impl Display for SampleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SampleFormat {
    type Err = AudioFrameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SampleFormat::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| AudioFrameError::UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, SUPPORTED_FORMATS};

    #[test]
    fn test_parts_are_consistent() {
        for format in SampleFormat::ALL {
            assert_eq!(
                SampleFormat::from_parts(format.encoding(), format.layout()),
                format
            );
        }
    }

    #[test]
    fn test_every_encoding_has_both_layouts() {
        for encoding in SampleEncoding::ALL {
            let interleaved = SampleFormat::from_parts(encoding, ChannelLayout::Interleaved);
            let planar = SampleFormat::from_parts(encoding, ChannelLayout::Planar);

            assert!(interleaved.layout().is_interleaved());
            assert!(!planar.layout().is_interleaved());
            assert_eq!(interleaved.as_str(), encoding.as_str());
            assert_eq!(planar.encoding(), encoding);
            assert_eq!(planar.bytes_per_sample(), encoding.bytes_per_sample());
        }
    }

    #[test]
    fn test_bytes_per_sample() {
        assert_eq!(SampleFormat::U8.bytes_per_sample(), 1);
        assert_eq!(SampleFormat::U8Planar.bytes_per_sample(), 1);
        assert_eq!(SampleFormat::S16.bytes_per_sample(), 2);
        assert_eq!(SampleFormat::S32Planar.bytes_per_sample(), 4);
        assert_eq!(SampleFormat::F32.bytes_per_sample(), 4);
    }

    #[test]
    fn test_number_of_planes() {
        assert_eq!(SampleFormat::S16.number_of_planes(6), 1);
        assert_eq!(SampleFormat::S16Planar.number_of_planes(6), 6);
    }

    #[test]
    fn test_tags_round_trip_through_str() {
        for (format, tag) in SampleFormat::ALL.iter().zip(SUPPORTED_FORMATS) {
            assert_eq!(format.to_string(), tag);
            assert_eq!(tag.parse::<SampleFormat>().unwrap(), *format);
        }
    }

    #[test]
    fn test_unknown_tag_is_malformed_input() {
        let err = "s24".parse::<SampleFormat>().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedInput);
        assert!("F32".parse::<SampleFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_string_tags() {
        let json = serde_json::to_string(&SampleFormat::F32Planar).unwrap();
        assert_eq!(json, "\"f32-planar\"");
        let format: SampleFormat = serde_json::from_str("\"u8\"").unwrap();
        assert_eq!(format, SampleFormat::U8);
        let encoding: SampleEncoding = serde_json::from_str("\"s32\"").unwrap();
        assert_eq!(encoding, SampleEncoding::S32);
    }
}
