//! All-or-nothing persistence of the generated files.

use crate::{Error, Result};
use log::{debug, warn};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// One generated file, rendered in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub contents: String,
}

impl Artifact {
    pub fn new(file_name: impl Into<String>, contents: impl Into<String>) -> Self {
        Artifact {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }
}

/// Writes every artifact into `out_dir`.
///
/// Each file is first staged as a temporary file next to its target. Targets
/// that cannot be replaced are refused before any of them is touched, and if
/// a rename still fails the targets already replaced are restored, so a
/// failed write leaves no generated file behind.
pub fn write_all(out_dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut staged = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let target = out_dir.join(&artifact.file_name);
        if target.is_dir() {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", target.display()),
            )));
        }
        let mut file = NamedTempFile::new_in(out_dir)?;
        file.write_all(artifact.contents.as_bytes())?;
        file.flush()?;
        staged.push((file, target));
    }

    // Target => contents it had before this run, if it existed.
    let mut replaced: Vec<(PathBuf, Option<Vec<u8>>)> = Vec::with_capacity(staged.len());
    for (file, target) in staged {
        let previous = match fs::read(&target) {
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                roll_back(&replaced);
                return Err(e.into());
            }
        };
        if let Err(e) = file.persist(&target) {
            roll_back(&replaced);
            return Err(Error::Io(e.error));
        }
        debug!("Wrote {}", target.display());
        replaced.push((target, previous));
    }
    Ok(replaced.into_iter().map(|(target, _)| target).collect())
}

fn roll_back(replaced: &[(PathBuf, Option<Vec<u8>>)]) {
    for (target, previous) in replaced.iter().rev() {
        let restored = match previous {
            Some(bytes) => fs::write(target, bytes),
            None => fs::remove_file(target),
        };
        if let Err(e) = restored {
            warn!("Could not roll back {}: {}", target.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_writes_all_files() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("nested");
        let written = write_all(
            &out,
            &[Artifact::new("a.css", ".a {}\n"), Artifact::new("b.js", "b\n")],
        )
        .unwrap();
        assert_eq!(written, vec![out.join("a.css"), out.join("b.js")]);
        assert_eq!(fs::read_to_string(out.join("a.css")).unwrap(), ".a {}\n");
        // No staging files are left over.
        assert_eq!(fs::read_dir(&out).unwrap().count(), 2);
    }

    #[test]
    fn test_overwrites_existing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.css"), "old").unwrap();
        write_all(dir.path(), &[Artifact::new("a.css", "new")]).unwrap();
        assert_eq!(fs::read_to_string(dir.path().join("a.css")).unwrap(), "new");
    }

    #[test]
    fn test_unwritable_target_leaves_nothing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("styles.css"), "old").unwrap();
        fs::create_dir(dir.path().join("App.js")).unwrap();

        let result = write_all(
            dir.path(),
            &[
                Artifact::new("styles.css", "new"),
                Artifact::new("ConvertedComponent.jsx", "component"),
                Artifact::new("App.js", "app"),
            ],
        );
        assert!(matches!(result, Err(Error::Io(_))));
        assert_eq!(fs::read_to_string(dir.path().join("styles.css")).unwrap(), "old");
        assert!(!dir.path().join("ConvertedComponent.jsx").exists());
        assert!(dir.path().join("App.js").is_dir());
        // Staging files are cleaned up as well.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_roll_back_restores_previous_contents() {
        let dir = TempDir::new().unwrap();
        let kept = dir.path().join("a.css");
        let fresh = dir.path().join("b.js");
        fs::write(&kept, "new").unwrap();
        fs::write(&fresh, "new").unwrap();

        roll_back(&[(kept.clone(), Some(b"old".to_vec())), (fresh.clone(), None)]);
        assert_eq!(fs::read_to_string(&kept).unwrap(), "old");
        assert!(!fresh.exists());
    }
}
