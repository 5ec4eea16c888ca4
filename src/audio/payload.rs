use anyhow::{Context, Result};

/// Bytes of one finished recording plus the content type to upload them with.
///
/// Created by an `AudioSource`, consumed exactly once by
/// `TranscriptionClient::upload`.
#[derive(Debug, Clone)]
pub struct AudioPayload {
    bytes: Vec<u8>,
    content_type: String,
}

impl AudioPayload {
    pub fn new(bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            bytes,
            content_type: content_type.into(),
        }
    }

    /// Build a payload with the content type sniffed from the container's
    /// magic bytes.
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let content_type = sniff_content_type(&bytes);
        Self::new(bytes, content_type)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Best-effort container sniff. Unknown data uploads as octet-stream, which
/// the upload endpoint accepts for any raw body.
fn sniff_content_type(bytes: &[u8]) -> &'static str {
    if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE" {
        return "audio/wav";
    }
    if bytes.len() >= 12 && &bytes[4..8] == b"ftyp" {
        return "audio/mp4";
    }
    if bytes.starts_with(b"OggS") {
        return "audio/ogg";
    }
    if bytes.starts_with(b"fLaC") {
        return "audio/flac";
    }
    if bytes.starts_with(b"ID3")
        || (bytes.len() >= 2 && bytes[0] == 0xFF && (bytes[1] & 0xE0) == 0xE0)
    {
        return "audio/mpeg";
    }
    "application/octet-stream"
}

/// Encode raw 16-bit PCM into a WAV payload for callers that hold samples
/// rather than an encoded file.
pub fn payload_from_pcm(samples: &[i16], sample_rate: u32, channels: u16) -> Result<AudioPayload> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = std::io::Cursor::new(Vec::new());
    {
        let mut writer =
            hound::WavWriter::new(&mut cursor, spec).context("Failed to create WAV writer")?;
        for &sample in samples {
            writer
                .write_sample(sample)
                .context("Failed to write sample to WAV payload")?;
        }
        writer
            .finalize()
            .context("Failed to finalize WAV payload")?;
    }

    Ok(AudioPayload::new(cursor.into_inner(), "audio/wav"))
}
