use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use uuid::Uuid;

/// A request-scoped copy of an uploaded file. The file is deleted when this is dropped.
pub struct ScratchUpload {
    file: NamedTempFile,
}

impl ScratchUpload {
    /// Writes `data` to `<dir>/cv-<request_id>-<random>.pdf`.
    pub fn persist(dir: &Path, request_id: Uuid, data: &[u8]) -> io::Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix(&format!("cv-{request_id}-"))
            .suffix(".pdf")
            .tempfile_in(dir)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persist_writes_bytes_and_removes_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let request_id = Uuid::new_v4();

        let scratch = ScratchUpload::persist(dir.path(), request_id, b"%PDF-1.5").unwrap();
        let path = scratch.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");

        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.starts_with(&format!("cv-{request_id}-")));
        assert!(name.ends_with(".pdf"));

        drop(scratch);
        assert!(!path.exists());
    }

    #[test]
    fn test_same_request_content_gets_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let request_id = Uuid::new_v4();

        let first = ScratchUpload::persist(dir.path(), request_id, b"a").unwrap();
        let second = ScratchUpload::persist(dir.path(), request_id, b"b").unwrap();
        assert_ne!(first.path(), second.path());
    }
}
