//! Media library sizes and active sessions on the media server.

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ReaderError;
use crate::types::MediaSessions;

pub const MEDIA_SERVER_TIMEOUT: Duration = Duration::from_secs(2);

/// Number of entries directly under `path`; an unset path counts as empty.
pub fn count_entries(path: Option<&Path>) -> Result<usize, ReaderError> {
    let Some(path) = path else {
        return Ok(0);
    };
    let entries = fs::read_dir(path).map_err(|e| ReaderError::io(path, e))?;
    Ok(entries.filter(|e| e.is_ok()).count())
}

#[derive(Debug, Deserialize)]
pub struct SessionsResponse {
    #[serde(rename = "MediaContainer")]
    pub media_container: MediaContainer,
}

#[derive(Debug, Default, Deserialize)]
pub struct MediaContainer {
    #[serde(default)]
    pub size: usize,
    #[serde(rename = "Metadata", default)]
    pub metadata: Vec<SessionMetadata>,
}

#[derive(Debug, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "TranscodeSession", default)]
    pub transcode_session: Option<Map<String, Value>>,
}

impl From<SessionsResponse> for MediaSessions {
    fn from(resp: SessionsResponse) -> Self {
        let container = resp.media_container;
        let transcoding = container
            .metadata
            .iter()
            .filter(|m| m.transcode_session.as_ref().is_some_and(|t| !t.is_empty()))
            .count();
        MediaSessions {
            playing: container.size,
            transcoding,
        }
    }
}

/// GET `{base_url}/status/sessions`. `client` carries the request timeout.
pub async fn fetch_sessions(
    client: &reqwest::Client,
    base_url: Option<&str>,
    token: Option<&str>,
) -> Result<MediaSessions, ReaderError> {
    let (Some(base_url), Some(token)) = (base_url, token) else {
        return Err(ReaderError::NotConfigured("media server URL/token"));
    };
    let resp = client
        .get(format!("{base_url}/status/sessions"))
        .header(ACCEPT, "application/json")
        .header("X-Plex-Token", token)
        .send()
        .await?
        .error_for_status()?;
    let body: SessionsResponse = resp.json().await?;
    Ok(body.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_transcoding_sessions() {
        let body = r#"{"MediaContainer":{"size":3,"Metadata":[
            {"title":"a","TranscodeSession":{"key":"/transcode/sessions/1","videoDecision":"transcode"}},
            {"title":"b"},
            {"title":"c","TranscodeSession":{}}
        ]}}"#;
        let resp: SessionsResponse = serde_json::from_str(body).unwrap();
        let s = MediaSessions::from(resp);
        assert_eq!(s.playing, 3);
        assert_eq!(s.transcoding, 1);
    }

    #[test]
    fn idle_server_has_no_metadata() {
        let resp: SessionsResponse = serde_json::from_str(r#"{"MediaContainer":{"size":0}}"#).unwrap();
        assert_eq!(MediaSessions::from(resp), MediaSessions::default());
    }

    #[test]
    fn unset_library_path_counts_zero() {
        assert_eq!(count_entries(None).unwrap(), 0);
        assert!(count_entries(Some(Path::new("/definitely/not/here"))).is_err());
    }

    #[tokio::test]
    async fn missing_credentials_skip_the_request() {
        let client = reqwest::Client::new();
        let err = fetch_sessions(&client, Some("http://127.0.0.1:9"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, ReaderError::NotConfigured(_)));
    }
}
