use std::path::{Path, PathBuf};

use tokio::sync::mpsc;

use crate::deck::QueueSnapshot;
use crate::error::{ErrorInfo, QueueError, Result};

use super::state::AppMessage;

async fn read_snapshot(path: &Path) -> Result<QueueSnapshot> {
    let json = tokio::fs::read_to_string(path).await?;
    QueueSnapshot::from_json(&json)
}

pub(super) fn spawn_load_snapshot(path: PathBuf, tx: &mpsc::UnboundedSender<AppMessage>) {
    let tx_clone = tx.clone();
    tokio::spawn(async move {
        match read_snapshot(&path).await {
            Ok(snapshot) => {
                tracing::debug!(
                    path = %path.display(),
                    decks = snapshot.decks.len(),
                    "snapshot read"
                );
                let _ = tx_clone.send(AppMessage::SnapshotLoaded(snapshot));
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "snapshot load failed");
                let _ = tx_clone.send(AppMessage::Error(ErrorInfo::snapshot(&e)));
            }
        }
    });
}

/// Read a note for the preview. `note` is the path as the queue knows it,
/// `file` is where it lives on disk.
pub(super) fn spawn_load_note(note: String, file: PathBuf, tx: &mpsc::UnboundedSender<AppMessage>) {
    let tx_clone = tx.clone();
    tokio::spawn(async move {
        match tokio::fs::read_to_string(&file).await {
            Ok(content) => {
                let _ = tx_clone.send(AppMessage::NoteLoaded {
                    path: note,
                    content,
                });
            }
            Err(e) => {
                let e = QueueError::from(e);
                tracing::warn!(file = %file.display(), error = %e, "note load failed");
                let _ = tx_clone.send(AppMessage::Error(ErrorInfo::note(&note, &e)));
            }
        }
    });
}
