use anyhow::{Context, Result};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Stream metadata for journal analytics. Every field is best-effort; the
/// workflow proceeds without it when probing fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioInfo {
    pub duration_seconds: Option<f64>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
}

/// Probe an encoded recording (M4A, MP3, WAV, FLAC, OGG) for duration and
/// stream parameters.
pub fn probe_payload(bytes: &[u8]) -> Result<AudioInfo> {
    let cursor = std::io::Cursor::new(bytes.to_vec());
    let stream = MediaSourceStream::new(Box::new(cursor), Default::default());

    let probed = symphonia::default::get_probe()
        .format(
            &Hint::new(),
            stream,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .context("Unrecognized audio container")?;

    let track = probed
        .format
        .default_track()
        .context("No default audio track")?;
    let params = &track.codec_params;

    let duration_seconds = match (params.time_base, params.n_frames) {
        (Some(time_base), Some(frames)) => {
            let time = time_base.calc_time(frames);
            Some(time.seconds as f64 + time.frac)
        }
        _ => params
            .sample_rate
            .zip(params.n_frames)
            .map(|(rate, frames)| frames as f64 / rate as f64),
    };

    Ok(AudioInfo {
        duration_seconds,
        sample_rate: params.sample_rate,
        channels: params.channels.map(|c| c.count() as u16),
    })
}
