use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use snapfold_types::RawSnapshot;
use snapfold_view::{SnapshotSource, SnapshotTicket, snapshot_channel};
use tracing::{debug, error, warn};

pub fn parse_snapshot(json: &str) -> Result<RawSnapshot, String> {
    facet_json::from_str(json).map_err(|e| format!("decode snapshot json: {e}"))
}

pub async fn load_snapshot(path: &Path) -> Result<RawSnapshot, String> {
    let json = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("read {}: {e}", path.display()))?;
    parse_snapshot(&json).map_err(|e| format!("{}: {e}", path.display()))
}

/// Serves one JSON snapshot file per request, in order.
///
/// Each request spawns a task on the current runtime that reads and decodes
/// the next file. A request after the queue is exhausted, or one whose file
/// fails to load, closes its ticket without delivering.
pub struct JsonFileSource {
    queue: VecDeque<PathBuf>,
}

impl JsonFileSource {
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            queue: paths.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl SnapshotSource for JsonFileSource {
    fn request_snapshot(&mut self) -> SnapshotTicket {
        let (delivery, ticket) = snapshot_channel();
        let Some(path) = self.queue.pop_front() else {
            warn!("no snapshot files left to serve");
            return ticket;
        };
        tokio::spawn(async move {
            match load_snapshot(&path).await {
                Ok(snapshot) => {
                    if let Err(e) = snapshot.validate() {
                        warn!(path = %path.display(), %e, "snapshot failed integrity check");
                    }
                    debug!(path = %path.display(), "delivering snapshot");
                    if delivery.deliver(snapshot).is_err() {
                        debug!(path = %path.display(), "snapshot request was abandoned");
                    }
                }
                Err(e) => error!(%e, "failed to load snapshot"),
            }
        });
        ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapfold_view::{CaptureError, ProfilerWindow};

    const FIRST: &str = r#"{
        "native_objects": [
            {"type_index": 0, "size": 60, "instance_id": 1, "name": "a"},
            {"type_index": 1, "size": 40, "instance_id": 2, "name": ""}
        ],
        "native_types": ["A", "B"],
        "type_descriptions": [
            {"is_value_type": true, "is_array": false, "array_rank": 0, "name": ".Vec3", "size": 12}
        ]
    }"#;

    const SECOND: &str = r#"{
        "native_objects": [
            {"type_index": 0, "size": 80, "instance_id": 1, "name": "a"}
        ],
        "native_types": ["A"]
    }"#;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("snapfold-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join(name);
        std::fs::write(&path, contents).expect("write snapshot file");
        path
    }

    #[test]
    fn parses_snapshot_documents() {
        let snapshot = parse_snapshot(FIRST).expect("valid document");
        assert_eq!(snapshot.native_objects.len(), 2);
        assert_eq!(snapshot.type_descriptions[0].name, ".Vec3");
        assert!(parse_snapshot("{\"native_objects\": 3}").is_err());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn serves_files_in_request_order() {
        let first = write_temp("first.json", FIRST);
        let second = write_temp("second.json", SECOND);
        let mut window = ProfilerWindow::new(JsonFileSource::new([first, second]));

        window.request_capture().expect("request first");
        window.finish_capture().await.expect("first capture");
        window.request_capture().expect("request second");
        window.finish_capture().await.expect("second capture");

        assert_eq!(window.source_mut().remaining(), 0);
        let current = window.current().expect("current snapshot");
        let last = window.last().expect("last snapshot");
        assert_eq!(current.total_bytes(), 80);
        assert_eq!(last.total_bytes(), 100);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_file_closes_the_ticket() {
        let missing = std::env::temp_dir().join("snapfold-test-definitely-missing.json");
        let mut window = ProfilerWindow::new(JsonFileSource::new([missing]));
        window.request_capture().expect("request");
        let err = window.finish_capture().await.expect_err("file does not exist");
        assert!(matches!(err, CaptureError::SourceClosed));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn exhausted_queue_closes_the_ticket() {
        let mut window = ProfilerWindow::new(JsonFileSource::new(Vec::new()));
        window.request_capture().expect("request");
        let err = window.finish_capture().await.expect_err("queue is empty");
        assert!(matches!(err, CaptureError::SourceClosed));
    }
}
