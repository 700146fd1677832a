use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use parking_lot::Mutex;

use crate::error::EngineError;

/// Decode a standard-alphabet base64 payload into raw bytes.
pub fn decode_base64(data: &str) -> Result<Vec<u8>, EngineError> {
    STANDARD
        .decode(data.trim())
        .map_err(|e| EngineError::malformed("inline_data", format!("invalid base64 payload: {}", e)))
}

/// De-interleaved PCM audio with samples normalized to [-1.0, 1.0].
#[derive(Debug, Clone)]
pub struct PcmBuffer {
    pub channels: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

/// Interpret `bytes` as interleaved signed 16-bit little-endian PCM frames.
/// Channel `c`, frame `i` reads interleaved sample `i * num_channels + c`;
/// a trailing partial frame is ignored.
pub fn decode_pcm16(bytes: &[u8], sample_rate: u32, num_channels: usize) -> PcmBuffer {
    let samples: Vec<i16> = bytes
        .chunks_exact(2)
        .map(|pair| i16::from_le_bytes([pair[0], pair[1]]))
        .collect();

    let frame_count = if num_channels == 0 {
        0
    } else {
        samples.len() / num_channels
    };

    let mut channels: Vec<Vec<f32>> = (0..num_channels)
        .map(|_| Vec::with_capacity(frame_count))
        .collect();
    for (channel, out) in channels.iter_mut().enumerate() {
        for frame in 0..frame_count {
            out.push(samples[frame * num_channels + channel] as f32 / 32768.0);
        }
    }

    PcmBuffer {
        channels,
        sample_rate,
    }
}

impl PcmBuffer {
    pub fn frame_count(&self) -> usize {
        self.channels.first().map(|c| c.len()).unwrap_or(0)
    }

    pub fn duration(&self) -> Duration {
        if self.sample_rate == 0 {
            return Duration::ZERO;
        }
        Duration::from_secs_f64(self.frame_count() as f64 / self.sample_rate as f64)
    }

    /// Re-quantize to interleaved 16-bit WAV bytes, e.g. for saving a clip.
    pub fn to_wav_bytes(&self) -> Result<Vec<u8>, EngineError> {
        let mut cursor = std::io::Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels: self.channels.len() as u16,
            sample_rate: self.sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };

        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| EngineError::Audio(format!("WAV error: {}", e)))?;

        for frame in 0..self.frame_count() {
            for channel in &self.channels {
                let s = (channel[frame] * 32767.0).clamp(-32768.0, 32767.0) as i16;
                writer
                    .write_sample(s)
                    .map_err(|e| EngineError::Audio(format!("WAV write error: {}", e)))?;
            }
        }

        writer
            .finalize()
            .map_err(|e| EngineError::Audio(format!("WAV finalize error: {}", e)))?;

        Ok(cursor.into_inner())
    }

    /// Play the clip on the default output device, blocking until it drains.
    pub fn play(&self) -> Result<(), EngineError> {
        if self.channels.is_empty() || self.frame_count() == 0 {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| EngineError::Audio("no output device available".to_string()))?;

        let config = cpal::StreamConfig {
            channels: self.channels.len() as u16,
            sample_rate: cpal::SampleRate(self.sample_rate),
            buffer_size: cpal::BufferSize::Default,
        };

        // Interleave once up front; the callback just drains a cursor.
        let mut interleaved = Vec::with_capacity(self.frame_count() * self.channels.len());
        for frame in 0..self.frame_count() {
            for channel in &self.channels {
                interleaved.push(channel[frame]);
            }
        }
        let samples = Arc::new(interleaved);
        let cursor = Arc::new(Mutex::new(0usize));

        let stream_samples = samples.clone();
        let stream_cursor = cursor.clone();
        let stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    let mut pos = stream_cursor.lock();
                    for sample in data.iter_mut() {
                        *sample = stream_samples.get(*pos).copied().unwrap_or(0.0);
                        *pos += 1;
                    }
                },
                |err| {
                    log::error!("Audio stream error: {}", err);
                },
                None,
            )
            .map_err(|e| EngineError::Audio(format!("failed to build output stream: {}", e)))?;

        stream
            .play()
            .map_err(|e| EngineError::Audio(format!("failed to start stream: {}", e)))?;

        // Keep the stream alive until the clip drains, with a hard deadline in
        // case the device stalls.
        let total = samples.len();
        let deadline = Instant::now() + self.duration() + Duration::from_millis(500);
        while *cursor.lock() < total && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(50));
        }

        Ok(())
    }
}
