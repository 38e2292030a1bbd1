use boards_core::{BoardsError, BoardsResult};
use serde::de::DeserializeOwned;
use std::path::Path;

/// Reads and parses a JSON input file, naming the file in any error.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> BoardsResult<T> {
    let contents = std::fs::read_to_string(path).map_err(|err| {
        if err.kind() == std::io::ErrorKind::NotFound {
            BoardsError::NotFound(path.display().to_string())
        } else {
            BoardsError::Io(err)
        }
    })?;
    tracing::debug!(path = %path.display(), bytes = contents.len(), "Read input file");

    serde_json::from_str(&contents).map_err(|err| {
        BoardsError::Serialization(format!("{}: {}", path.display(), err))
    })
}
