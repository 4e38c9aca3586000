use super::types::{guess_content_type, SelectedFile};
use crate::error::{FileRejection, RejectReason};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Accept rules applied to every dropped or picked file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePolicy {
    pub max_file_size: u64,
    pub accepted_types: Vec<String>,
}

impl FilePolicy {
    pub fn check(&self, file: SelectedFile) -> Result<SelectedFile, FileRejection> {
        if let Err(reason) = self
            .check_type(&file.content_type)
            .and_then(|()| self.check_size(file.size()))
        {
            return Err(FileRejection::new(file.name, reason));
        }
        Ok(file)
    }

    fn check_type(&self, content_type: &str) -> Result<(), RejectReason> {
        let content_type = content_type.to_lowercase();
        if self.accepted_types.iter().any(|ty| *ty == content_type) {
            Ok(())
        } else {
            Err(RejectReason::InvalidType(content_type))
        }
    }

    fn check_size(&self, size: u64) -> Result<(), RejectReason> {
        if size > self.max_file_size {
            Err(RejectReason::TooLarge {
                size,
                max: self.max_file_size,
            })
        } else {
            Ok(())
        }
    }

    /// Loads a file from disk. Type and size are checked from the name and metadata
    /// first, so rejected files are never read.
    pub fn read_path(&self, path: &Path) -> Result<SelectedFile, FileRejection> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let reject = |reason: RejectReason| FileRejection::new(name.clone(), reason);
        let unreadable = |e: std::io::Error| reject(RejectReason::Unreadable(e.to_string()));

        self.check_type(&guess_content_type(&name)).map_err(reject)?;
        let size = fs::metadata(path).map_err(unreadable)?.len();
        self.check_size(size).map_err(reject)?;

        let bytes = fs::read(path).map_err(unreadable)?;
        Ok(SelectedFile::new(name, bytes))
    }

    /// Splits candidates into accepted files and rejections, keeping the drop order of both.
    pub fn partition<I>(&self, candidates: I) -> (Vec<SelectedFile>, Vec<FileRejection>)
    where
        I: IntoIterator<Item = Result<SelectedFile, FileRejection>>,
    {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();

        for candidate in candidates {
            match candidate.and_then(|file| self.check(file)) {
                Ok(file) => accepted.push(file),
                Err(rejection) => {
                    debug!("Rejected {}", rejection);
                    rejected.push(rejection);
                }
            }
        }

        (accepted, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn policy() -> FilePolicy {
        FilePolicy {
            max_file_size: 1024 * 1024,
            accepted_types: vec!["image/png".to_string()],
        }
    }

    #[test]
    fn png_within_limit_is_accepted() {
        let file = SelectedFile::new("a.png", vec![0u8; 1024 * 1024]);
        assert!(policy().check(file).is_ok());
    }

    #[test]
    fn oversized_png_is_rejected() {
        let file = SelectedFile::new("big.png", vec![0u8; 1024 * 1024 + 1]);
        let rejection = policy().check(file).unwrap_err();

        assert_eq!(rejection.name, "big.png");
        assert_eq!(
            rejection.reason,
            RejectReason::TooLarge {
                size: 1024 * 1024 + 1,
                max: 1024 * 1024
            }
        );
    }

    #[test]
    fn other_types_are_rejected() {
        let file = SelectedFile::new("notes.txt", b"hello".to_vec());
        let rejection = policy().check(file).unwrap_err();
        assert_eq!(
            rejection.reason,
            RejectReason::InvalidType("text/plain".to_string())
        );
    }

    #[test]
    fn partition_keeps_order_and_collects_rejections() {
        let candidates = vec![
            Ok(SelectedFile::new("a.png", vec![1])),
            Ok(SelectedFile::new("b.jpg", vec![2])),
            Err(FileRejection::new(
                "gone.png",
                RejectReason::Unreadable("missing".to_string()),
            )),
            Ok(SelectedFile::new("c.png", vec![3])),
        ];

        let (accepted, rejected) = policy().partition(candidates);

        let names: Vec<_> = accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.png", "c.png"]);
        let rejected: Vec<_> = rejected.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, vec!["b.jpg", "gone.png"]);
    }

    #[test]
    fn read_path_loads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let selected = policy().read_path(&path).unwrap();
        assert_eq!(selected.name, "logo.png");
        assert_eq!(selected.content_type, "image/png");
        assert_eq!(&*selected.bytes, &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn read_path_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let rejection = policy()
            .read_path(&dir.path().join("missing.png"))
            .unwrap_err();

        assert_eq!(rejection.name, "missing.png");
        assert!(matches!(rejection.reason, RejectReason::Unreadable(_)));
    }

    #[test]
    fn oversized_file_is_rejected_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huge.png");
        let file = fs::File::create(&path).unwrap();
        // Sparse: no data blocks are written, only the length.
        file.set_len(4 * 1024 * 1024 * 1024).unwrap();

        let rejection = policy().read_path(&path).unwrap_err();

        assert_eq!(rejection.name, "huge.png");
        assert_eq!(
            rejection.reason,
            RejectReason::TooLarge {
                size: 4 * 1024 * 1024 * 1024,
                max: 1024 * 1024
            }
        );
    }

    #[test]
    fn wrong_type_is_rejected_without_touching_disk() {
        let dir = tempfile::tempdir().unwrap();

        let rejection = policy()
            .read_path(&dir.path().join("movie.mp4"))
            .unwrap_err();

        assert_eq!(
            rejection.reason,
            RejectReason::InvalidType("video/mp4".to_string())
        );
    }
}
