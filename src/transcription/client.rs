use super::cancel::CancelToken;
use super::error::{TranscriptionError, TranscriptionResult};
use super::types::{JobHandle, JobStatus, PollConfig, UploadHandle};
use crate::audio::AudioPayload;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Client for the remote upload-then-poll transcription service.
///
/// Holds the base URL and credential injected at construction; the client is
/// read-only for the lifetime of a workflow, so concurrent workflows can
/// share a clone freely.
#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct SubmitRequest<'a> {
    audio_url: &'a str,
}

#[derive(Deserialize)]
struct UploadResponse {
    upload_url: Option<String>,
}

#[derive(Deserialize)]
struct SubmitResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct StatusResponse {
    status: Option<String>,
    text: Option<String>,
    error: Option<String>,
}

impl TranscriptionClient {
    /// Create a client with its own HTTP connection pool.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self::with_http(http, base_url, api_key)
    }

    /// Create a client sharing an existing `reqwest::Client`.
    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Upload a finished recording to the service's temporary storage.
    ///
    /// The payload is consumed; a retry needs a fresh payload from its
    /// `AudioSource`. Empty payloads are rejected before any network I/O.
    pub async fn upload(&self, audio: AudioPayload) -> TranscriptionResult<UploadHandle> {
        if audio.is_empty() {
            return Err(TranscriptionError::Upload(
                "audio payload is empty".to_string(),
            ));
        }

        let url = self.endpoint("upload");
        let content_type = audio.content_type().to_string();
        info!(
            "Uploading recording: {} bytes ({})",
            audio.len(),
            content_type
        );

        let res = self
            .http
            .post(&url)
            .header("authorization", &self.api_key)
            .header("content-type", content_type)
            .body(audio.into_bytes())
            .send()
            .await
            .map_err(|e| TranscriptionError::Upload(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(TranscriptionError::Upload(format!(
                "upload endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: UploadResponse = res
            .json()
            .await
            .map_err(|e| TranscriptionError::Upload(e.to_string()))?;

        let upload_url = parsed
            .upload_url
            .ok_or_else(|| TranscriptionError::Upload("response missing upload_url".to_string()))?;

        debug!("Upload stored at {}", upload_url);
        Ok(UploadHandle::new(upload_url))
    }

    /// Submit a transcription job for a previously uploaded recording.
    pub async fn submit(&self, handle: &UploadHandle) -> TranscriptionResult<JobHandle> {
        let url = self.endpoint("transcript");

        let res = self
            .http
            .post(&url)
            .header("authorization", &self.api_key)
            .json(&SubmitRequest {
                audio_url: handle.as_url(),
            })
            .send()
            .await
            .map_err(|e| TranscriptionError::Submission(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(TranscriptionError::Submission(format!(
                "transcript endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: SubmitResponse = res
            .json()
            .await
            .map_err(|e| TranscriptionError::Submission(e.to_string()))?;

        let id = parsed
            .id
            .ok_or_else(|| TranscriptionError::Submission("response missing job id".to_string()))?;

        info!("Transcription job submitted: {}", id);
        Ok(JobHandle::new(id))
    }

    /// One status check against the job endpoint; never loops.
    ///
    /// A poll that cannot produce an observable status (transport failure,
    /// non-success response, unparseable body) is a hard error.
    pub async fn poll(&self, job: &JobHandle) -> TranscriptionResult<JobStatus> {
        let url = self.endpoint(&format!("transcript/{}", job.as_str()));

        let res = self
            .http
            .get(&url)
            .header("authorization", &self.api_key)
            .send()
            .await
            .map_err(|e| TranscriptionError::Poll(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(TranscriptionError::Poll(format!(
                "status endpoint returned {}: {}",
                status, body
            )));
        }

        let parsed: StatusResponse = res
            .json()
            .await
            .map_err(|e| TranscriptionError::Poll(e.to_string()))?;

        Ok(JobStatus::from_response(
            parsed.status.as_deref().unwrap_or_default(),
            parsed.text.as_deref(),
            parsed.error.as_deref(),
        ))
    }

    /// Poll the job until it reaches a terminal state.
    ///
    /// Sleeps `cfg.interval` between checks, so N non-terminal statuses
    /// before completion cost exactly N waits. Stops at the first terminal
    /// status; a `Poll` error aborts immediately without consuming an
    /// attempt. Exceeding `cfg.max_attempts` (or the optional wall-clock
    /// budget) yields `TimedOut`.
    pub async fn await_result(
        &self,
        job: &JobHandle,
        cfg: &PollConfig,
        cancel: &CancelToken,
    ) -> TranscriptionResult<String> {
        let started = Instant::now();
        let mut attempts: u32 = 0;

        loop {
            if cancel.is_cancelled() {
                return Err(TranscriptionError::Cancelled);
            }
            if let Some(budget) = cfg.overall_timeout {
                if started.elapsed() >= budget {
                    warn!(
                        "Transcription {} exceeded {:?} wall-clock budget",
                        job.as_str(),
                        budget
                    );
                    return Err(TranscriptionError::TimedOut { attempts });
                }
            }

            let status = self.poll(job).await?;
            attempts += 1;

            match status {
                JobStatus::Completed { transcript } => {
                    info!(
                        "Transcription {} completed after {} status checks",
                        job.as_str(),
                        attempts
                    );
                    return Ok(transcript);
                }
                JobStatus::Failed { detail } => {
                    warn!("Transcription {} failed: {}", job.as_str(), detail);
                    return Err(TranscriptionError::JobFailed(detail));
                }
                other => {
                    debug!(
                        "Transcription {} still in progress ({:?}, attempt {})",
                        job.as_str(),
                        other,
                        attempts
                    );
                }
            }

            if attempts >= cfg.max_attempts {
                warn!(
                    "Transcription {} gave no terminal status in {} checks",
                    job.as_str(),
                    attempts
                );
                return Err(TranscriptionError::TimedOut { attempts });
            }

            tokio::select! {
                _ = cancel.cancelled() => return Err(TranscriptionError::Cancelled),
                _ = tokio::time::sleep(cfg.interval) => {}
            }
        }
    }

    /// The whole workflow: upload, submit, poll until terminal.
    ///
    /// Each stage's error short-circuits the rest and is returned as-is, so
    /// the caller can tell where the pipeline broke.
    pub async fn transcribe(
        &self,
        audio: AudioPayload,
        cfg: &PollConfig,
        cancel: &CancelToken,
    ) -> TranscriptionResult<String> {
        let handle = self.upload(audio).await?;
        let job = self.submit(&handle).await?;
        self.await_result(&job, cfg, cancel).await
    }
}
