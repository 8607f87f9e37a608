//! Plane and frame addressing for copies out of a frame set.
//!
//! [`compute_copy_element_count`] validates a copy request and returns how many
//! samples it touches. `CopyPlan` then maps each destination element onto the
//! source sample it is read from, for any pair of layouts.

use crate::{AudioFrameError, AudioFrameResult, ChannelLayout, SampleFormat};

/// Number of scalar elements a copy in `format` reads or writes.
///
/// Only the layout of `format` matters: planar formats address a single
/// channel, so the count is `frame_count`; interleaved formats address every
/// channel of each frame, so the count is `frame_count * number_of_channels`.
///
/// # Errors
/// Returns [`AudioFrameError::OutOfBounds`] if `plane_index` is not below the
/// number of planes, if `frame_offset` is not below `number_of_frames`, or if
/// `frame_count` exceeds the frames remaining after `frame_offset`.
pub fn compute_copy_element_count(
    format: SampleFormat,
    frame_count: usize,
    frame_offset: usize,
    number_of_channels: usize,
    number_of_frames: usize,
    plane_index: usize,
) -> AudioFrameResult<usize> {
    let number_of_planes = format.number_of_planes(number_of_channels);
    if plane_index >= number_of_planes {
        return Err(AudioFrameError::out_of_bounds(
            "planeIndex",
            plane_index,
            number_of_planes,
        ));
    }
    if frame_offset >= number_of_frames {
        return Err(AudioFrameError::out_of_bounds(
            "frameOffset",
            frame_offset,
            number_of_frames,
        ));
    }
    let remaining = number_of_frames - frame_offset;
    if frame_count > remaining {
        return Err(AudioFrameError::out_of_bounds(
            "frameCount",
            frame_count,
            remaining,
        ));
    }

    if format.is_planar() {
        Ok(frame_count)
    } else {
        frame_count
            .checked_mul(number_of_channels)
            .ok_or_else(|| AudioFrameError::out_of_bounds("frameCount", frame_count, remaining))
    }
}

/// Mapping from destination elements to source samples for one validated copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
///
/// Only built from a request that passed [`compute_copy_element_count`] against
/// an open frame set, so `number_of_channels` is non-zero and every source index
/// lies inside the frame set's data.
pub(crate) struct CopyPlan {
    /// Layout of the frame set being read.
    pub(crate) source_layout: ChannelLayout,
    /// Layout requested for the destination.
    pub(crate) destination_layout: ChannelLayout,
    /// Channels in the frame set.
    pub(crate) number_of_channels: usize,
    /// Frames per channel in the frame set.
    pub(crate) number_of_frames: usize,
    /// First frame to copy.
    pub(crate) frame_offset: usize,
    /// Plane to copy when the destination is planar; always 0 otherwise.
    pub(crate) plane_index: usize,
    /// Elements written to the destination.
    pub(crate) element_count: usize,
}

impl CopyPlan {
    /// Index of the source sample that lands at destination element `element`.
    #[inline]
    pub(crate) const fn source_index(&self, element: usize) -> usize {
        let (frame, channel) = match self.destination_layout {
            ChannelLayout::Planar => (self.frame_offset + element, self.plane_index),
            ChannelLayout::Interleaved => (
                self.frame_offset + element / self.number_of_channels,
                element % self.number_of_channels,
            ),
        };
        match self.source_layout {
            ChannelLayout::Planar => channel * self.number_of_frames + frame,
            ChannelLayout::Interleaved => frame * self.number_of_channels + channel,
        }
    }

    /// The source samples as one contiguous run, when no re-addressing is needed.
    ///
    /// This holds when both layouts match, and also for any single-channel copy.
    pub(crate) const fn contiguous_source(&self) -> Option<std::ops::Range<usize>> {
        let same_layout = matches!(
            (self.source_layout, self.destination_layout),
            (ChannelLayout::Planar, ChannelLayout::Planar)
                | (ChannelLayout::Interleaved, ChannelLayout::Interleaved)
        );
        if !same_layout && self.number_of_channels != 1 {
            return None;
        }
        let start = self.source_index(0);
        Some(start..start + self.element_count)
    }
}
