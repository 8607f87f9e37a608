//! Known-answer scenarios through the public API.

use approx_eq::assert_approx_eq;

use crate::{
    AudioFrameSet, AudioFrameSetInit, AudioSample, ByteBuffer, ConvertTo, CopyToOptions,
    SampleFormat,
};

#[test]
fn test_u8_interleaved_channel_zero_to_planar() {
    let frames = AudioFrameSet::from_samples(
        &[0u8, 128, 255, 10, 20, 30, 40, 50, 60, 70],
        SampleFormat::U8,
        2,
        48000.0,
        0,
    )
    .unwrap();
    let options = CopyToOptions::plane(0).with_format(SampleFormat::U8Planar);

    assert_eq!(frames.allocation_size(&options).unwrap(), 5);
    let mut destination = [0u8; 5];
    assert_eq!(frames.copy_to(&mut destination, &options).unwrap(), 5);
    assert_eq!(destination, [0, 255, 20, 40, 60]);
}

#[test]
fn test_f32_planar_duration() {
    let frames = AudioFrameSet::new(
        AudioFrameSetInit::new()
            .with_data(ByteBuffer::zeroed(2 * 100 * 4))
            .with_format(SampleFormat::F32Planar)
            .with_number_of_channels(2)
            .with_number_of_frames(100)
            .with_sample_rate(8000.0)
            .with_timestamp(1234),
    )
    .unwrap();

    assert_eq!(frames.duration(), 12500.0);
    assert_eq!(frames.timestamp(), 1234);
    assert_eq!(frames.number_of_planes(), 2);
}

#[test]
fn test_u8_scalar_endpoints() {
    let top: f32 = ConvertTo::<f32>::convert_to(255u8);
    assert_approx_eq!(top as f64, 1.0, 1e-6);
    assert_eq!(ConvertTo::<f32>::convert_to(0u8), -1.0);
}

#[test]
fn test_decode_s32_interleaved_window_to_f32_planar() {
    let samples = [i32::MIN, 0, 0, i32::MAX, i32::MIN, i32::MAX];
    let frames = AudioFrameSet::from_samples(&samples, SampleFormat::S32, 2, 8000.0, 0).unwrap();
    let options = CopyToOptions::plane(1)
        .with_format(SampleFormat::F32Planar)
        .with_frame_offset(1)
        .with_frame_count(2);

    let mut destination = vec![0u8; frames.allocation_size(&options).unwrap()];
    assert_eq!(destination.len(), 8);
    frames.copy_to(&mut destination, &options).unwrap();
    assert_eq!(f32::read_from(&destination, 0), 1.0);
    assert_eq!(f32::read_from(&destination, 1), 1.0);
}

#[test]
fn test_planar_to_interleaved_same_encoding() {
    let frames =
        AudioFrameSet::from_samples(&[1i16, 2, 3, -1, -2, -3], SampleFormat::S16Planar, 2, 8000.0, 0)
            .unwrap();
    let options = CopyToOptions::plane(0).with_format(SampleFormat::S16);

    let mut destination = vec![0u8; frames.allocation_size(&options).unwrap()];
    frames.copy_to(&mut destination, &options).unwrap();
    assert_eq!(destination, i16::slice_to_bytes(&[1, -1, 2, -2, 3, -3]));
}

#[cfg(not(feature = "extended-conversions"))]
#[test]
fn test_unsupported_conversion_is_distinguishable() {
    use crate::{AudioFrameError, ErrorKind};

    let frames = AudioFrameSet::from_samples(&[0u8, 255], SampleFormat::U8, 1, 8000.0, 0).unwrap();
    let options = CopyToOptions::plane(0).with_format(SampleFormat::S16);
    let mut destination = [0xAAu8; 4];

    let err = frames.copy_to(&mut destination, &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    assert_eq!(
        err,
        AudioFrameError::UnsupportedConversion {
            from: SampleFormat::U8,
            to: SampleFormat::S16
        }
    );
    assert_eq!(destination, [0xAA; 4]);
}

#[cfg(feature = "extended-conversions")]
#[test]
fn test_extended_conversion_round_trips_u8() {
    let bytes: Vec<u8> = (0..=255).collect();
    let frames = AudioFrameSet::from_samples(&bytes, SampleFormat::U8, 1, 8000.0, 0).unwrap();

    let to_f32 = CopyToOptions::plane(0).with_format(SampleFormat::F32);
    let mut decoded = vec![0u8; frames.allocation_size(&to_f32).unwrap()];
    frames.copy_to(&mut decoded, &to_f32).unwrap();

    let floats: Vec<f32> = (0..256).map(|i| f32::read_from(&decoded, i)).collect();
    let back = AudioFrameSet::from_samples(&floats, SampleFormat::F32, 1, 8000.0, 0).unwrap();
    let to_u8 = CopyToOptions::plane(0).with_format(SampleFormat::U8);
    let mut encoded = vec![0u8; 256];
    back.copy_to(&mut encoded, &to_u8).unwrap();
    assert_eq!(encoded, bytes);
}
