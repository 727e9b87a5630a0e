use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::levels::{LevelTap, block_rms};

#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    #[error("input device '{0}' not found")]
    DeviceNotFound(String),
    #[error("no audio input device available")]
    NoDefaultDevice,
    #[error("could not query default input: {0}")]
    Config(#[from] cpal::DefaultStreamConfigError),
    #[error("failed to build input stream: {0}")]
    Build(#[from] cpal::BuildStreamError),
    #[error("failed to start input: {0}")]
    Play(#[from] cpal::PlayStreamError),
    #[error("unsupported sample format: {0:?}")]
    UnsupportedFormat(cpal::SampleFormat),
}

/// A running capture stream that feeds block levels into a `LevelTap`.
#[derive(Clone)]
pub struct LevelInput {
    _stream: Arc<cpal::Stream>,
    pub device_name: String,
}

impl LevelInput {
    pub fn new(tap: Arc<Mutex<LevelTap>>) -> Result<Self, AudioError> {
        Self::new_with_device(tap, None)
    }

    pub fn new_with_device(
        tap: Arc<Mutex<LevelTap>>,
        device_name: Option<&str>,
    ) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = select_input_device(&host, device_name)?;
        let resolved_device_name = device
            .name()
            .unwrap_or_else(|_| "<unknown input>".to_string());
        let supported_config = device.default_input_config()?;
        let sample_format = supported_config.sample_format();
        let config: cpal::StreamConfig = supported_config.into();
        let channels = config.channels as usize;
        log::info!(
            "opening input '{resolved_device_name}': {} Hz, {channels} ch, {sample_format:?}",
            config.sample_rate.0
        );

        let err_fn = |err| log::error!("audio input stream error: {err}");
        let stream = match sample_format {
            cpal::SampleFormat::F32 => {
                let tap = Arc::clone(&tap);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _| record_block(&tap, data, channels, |s| s),
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::I16 => {
                let tap = Arc::clone(&tap);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _| {
                        record_block(&tap, data, channels, |s| s as f32 / i16::MAX as f32)
                    },
                    err_fn,
                    None,
                )?
            }
            cpal::SampleFormat::U16 => {
                let tap = Arc::clone(&tap);
                device.build_input_stream(
                    &config,
                    move |data: &[u16], _| {
                        record_block(&tap, data, channels, |s| {
                            (s as f32 / u16::MAX as f32) * 2.0 - 1.0
                        })
                    },
                    err_fn,
                    None,
                )?
            }
            other => return Err(AudioError::UnsupportedFormat(other)),
        };
        stream.play()?;
        Ok(Self {
            _stream: Arc::new(stream),
            device_name: resolved_device_name,
        })
    }
}

fn select_input_device(host: &cpal::Host, name: Option<&str>) -> Result<cpal::Device, AudioError> {
    if let Some(target) = name {
        if let Ok(devices) = host.input_devices() {
            for device in devices {
                if let Ok(device_name) = device.name() {
                    if device_name == target {
                        return Ok(device);
                    }
                }
            }
        }
        return Err(AudioError::DeviceNotFound(target.to_string()));
    }

    host.default_input_device()
        .ok_or(AudioError::NoDefaultDevice)
}

pub fn list_input_device_names() -> Vec<String> {
    let host = cpal::default_host();
    host.input_devices()
        .map(|devices| {
            devices
                .filter_map(|d| d.name().ok())
                .collect::<Vec<String>>()
        })
        .unwrap_or_default()
}

/// Downmixes interleaved frames to mono and records the block level.
fn record_block<T: Copy>(
    tap: &Arc<Mutex<LevelTap>>,
    data: &[T],
    channels: usize,
    to_f32: impl Fn(T) -> f32,
) {
    let channels = channels.max(1);
    let mono: Vec<f32> = data
        .chunks(channels)
        .map(|frame| frame.iter().map(|&s| to_f32(s)).sum::<f32>() / frame.len() as f32)
        .collect();
    let level = block_rms(&mono);
    if let Ok(mut tap) = tap.lock() {
        tap.record(level);
    }
}
