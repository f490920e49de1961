use serde::{Deserialize, Serialize};

/// Lifecycle event delivered by the updater plugin while it downloads and
/// installs an update.
///
/// The serialized form matches the plugin's callback payload, e.g.
/// `{"event":"Progress","data":{"chunkLength":4096}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum DownloadEvent {
    #[serde(rename_all = "camelCase")]
    Started { content_length: Option<u64> },
    #[serde(rename_all = "camelCase")]
    Progress { chunk_length: usize },
    Finished,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_decode_plugin_events() {
        let started: DownloadEvent =
            serde_json::from_str(r#"{"event":"Started","data":{"contentLength":1024}}"#).unwrap();
        assert_eq!(
            started,
            DownloadEvent::Started {
                content_length: Some(1024)
            }
        );

        let started: DownloadEvent =
            serde_json::from_str(r#"{"event":"Started","data":{"contentLength":null}}"#).unwrap();
        assert_eq!(
            started,
            DownloadEvent::Started {
                content_length: None
            }
        );

        let progress: DownloadEvent =
            serde_json::from_str(r#"{"event":"Progress","data":{"chunkLength":4096}}"#).unwrap();
        assert_eq!(progress, DownloadEvent::Progress { chunk_length: 4096 });

        let finished: DownloadEvent = serde_json::from_str(r#"{"event":"Finished"}"#).unwrap();
        assert_eq!(finished, DownloadEvent::Finished);
    }

    #[test]
    fn test_decode_unknown_event() {
        let result = serde_json::from_str::<DownloadEvent>(r#"{"event":"Paused"}"#);
        assert!(result.is_err());
    }
}
