//! Audio payload supply for finished recordings.
//!
//! Capture and encoding happen outside this crate; what arrives here is a
//! completed recording (a file on disk or raw PCM samples) that needs to be
//! turned into an uploadable payload plus best-effort stream metadata for
//! the journal.

mod payload;
mod probe;
mod source;

pub use payload::{payload_from_pcm, AudioPayload};
pub use probe::{probe_payload, AudioInfo};
pub use source::{AudioSource, FileAudioSource};
