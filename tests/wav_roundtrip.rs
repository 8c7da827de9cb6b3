//! Cross-checks the hand-rolled WAV codec against `hound`.

use paulstretch::io::wav::{read_wav, write_wav_16bit, write_wav_float};
use paulstretch::AudioBuffer;
use std::io::Cursor;

fn test_signal(n: usize) -> Vec<f32> {
    (0..n)
        .map(|i| (2.0 * std::f32::consts::PI * i as f32 / 64.0).sin() * 0.8)
        .collect()
}

#[test]
fn test_float_wav_parses_with_hound() {
    let buffer = AudioBuffer::from_mono(test_signal(512), 44100);
    let bytes = write_wav_float(&buffer);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.sample_rate, 44100);
    assert_eq!(spec.sample_format, hound::SampleFormat::Float);
    assert_eq!(spec.bits_per_sample, 32);

    let samples: Vec<f32> = reader.samples::<f32>().map(|s| s.unwrap()).collect();
    assert_eq!(samples, buffer.data);
}

#[test]
fn test_16bit_wav_parses_with_hound() {
    let buffer = AudioBuffer::new(test_signal(256), 2, 48000);
    let bytes = write_wav_16bit(&buffer);

    let mut reader = hound::WavReader::new(Cursor::new(bytes)).unwrap();
    let spec = reader.spec();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.sample_format, hound::SampleFormat::Int);
    assert_eq!(spec.bits_per_sample, 16);

    let samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(samples.len(), buffer.data.len());
    for (&raw, &orig) in samples.iter().zip(buffer.data.iter()) {
        assert!((raw as f32 / 32768.0 - orig).abs() < 0.001);
    }
}

#[test]
fn test_hound_wav_parses_with_ours() {
    let mut bytes = Vec::new();
    {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for s in test_signal(128) {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
    }

    let decoded = read_wav(&bytes).unwrap();
    assert_eq!(decoded.channels, 1);
    assert_eq!(decoded.sample_rate, 22050);
    assert_eq!(decoded.data, test_signal(128));
}

#[test]
fn test_hound_pcm16_parses_with_ours() {
    let mut bytes = Vec::new();
    {
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(Cursor::new(&mut bytes), spec).unwrap();
        for i in 0..64i16 {
            writer.write_sample(i * 500).unwrap();
            writer.write_sample(-i * 500).unwrap();
        }
        writer.finalize().unwrap();
    }

    let decoded = read_wav(&bytes).unwrap();
    assert_eq!(decoded.channels, 2);
    assert_eq!(decoded.num_frames(), 64);
    assert!((decoded.data[2] - 500.0 / 32768.0).abs() < 1e-6);
}
