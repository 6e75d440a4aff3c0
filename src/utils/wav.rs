use crate::error::{PhyError, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Write a mono 16-bit WAV; samples are divided by `peak_voltage` and
/// clipped to full scale.
pub fn write_to_wav(
    signal: &[f64],
    sample_rate: u32,
    peak_voltage: f64,
    filename: &Path,
) -> Result<()> {
    if !(peak_voltage.is_finite() && peak_voltage > 0.0) {
        return Err(PhyError::invalid("peak_voltage", "must be positive"));
    }
    if let Some(parent) = filename.parent() {
        fs::create_dir_all(parent)?;
    }
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(filename, spec)?;
    let amplitude = f64::from(i16::MAX);
    let mut clipped = 0usize;
    for &sample in signal {
        let scaled = sample / peak_voltage;
        if scaled.abs() > 1.0 {
            clipped += 1;
        }
        writer.write_sample((scaled.clamp(-1.0, 1.0) * amplitude).round() as i16)?;
    }
    writer.finalize()?;
    if clipped > 0 {
        warn!("{} of {} samples clipped at full scale", clipped, signal.len());
    }
    info!("Wrote {} samples to {}", signal.len(), filename.display());
    Ok(())
}

/// Read a mono WAV back into volts. Returns the samples and the sample rate.
pub fn read_wav(filename: &Path, peak_voltage: f64) -> Result<(Vec<f64>, u32)> {
    let reader = hound::WavReader::open(filename)?;
    let spec = reader.spec();
    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|sample| Ok(f64::from(sample?) * peak_voltage))
            .collect::<Result<Vec<_>>>()?,
        hound::SampleFormat::Int => {
            let amplitude = if spec.bits_per_sample == 16 {
                f64::from(i16::MAX)
            } else {
                (1i64 << spec.bits_per_sample.saturating_sub(1)) as f64
            };
            reader
                .into_samples::<i32>()
                .map(|sample| Ok(f64::from(sample?) / amplitude * peak_voltage))
                .collect::<Result<Vec<_>>>()?
        }
    };
    info!("Read {} samples from {}", samples.len(), filename.display());
    Ok((samples, spec.sample_rate))
}
