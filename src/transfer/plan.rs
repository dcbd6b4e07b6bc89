//! Transfer preparation
//!
//! A transfer always ships the file as saved on disk. Preparing one saves
//! the session first, then checks that everything the upload needs is there.
//! A missing prerequisite refuses the transfer before anything is sent.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::TransferConfig;
use crate::session::Session;

use super::errors::{TransferError, TransferResult};

/// Where the file goes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferTarget {
    pub host: String,
    pub remote_dir: String,
    pub remote_filename: String,
}

impl TransferTarget {
    pub fn from_config(config: &TransferConfig) -> Self {
        Self {
            host: config.host.clone(),
            remote_dir: config.remote_dir.clone(),
            remote_filename: config.remote_filename.clone(),
        }
    }

    /// Checks that the folder only descends and the file name is a single
    /// plain name, so the remote path stays under the folder.
    pub fn check_paths(&self) -> TransferResult<()> {
        let name = self.remote_filename.as_str();
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(TransferError::InvalidTarget {
                setting: "destination file name",
                value: name.to_string(),
            });
        }
        if self.remote_dir.split(['/', '\\']).any(|part| part == "..") {
            return Err(TransferError::InvalidTarget {
                setting: "destination folder",
                value: self.remote_dir.clone(),
            });
        }
        Ok(())
    }

    /// Remote path: folder joined with file name, with one `/` between them
    pub fn remote_path(&self) -> String {
        format!(
            "{}/{}",
            self.remote_dir.trim_end_matches('/'),
            self.remote_filename
        )
    }
}

/// Login for the transfer session
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: Option<String>,
}

impl Credentials {
    /// Username from config, password from the configured environment variable.
    pub fn from_config(config: &TransferConfig) -> Self {
        let password = std::env::var(&config.password_env)
            .ok()
            .filter(|p| !p.is_empty());
        Self {
            username: config.username.clone(),
            password,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// A saved file ready to hand to an uploader
#[derive(Debug, Clone, Serialize)]
pub struct TransferPlan {
    pub local_path: PathBuf,
    pub size: u64,
    pub target: TransferTarget,
}

impl TransferPlan {
    /// Saves the session and checks prerequisites.
    ///
    /// `save_to` is used when the session has no file yet. With neither, the
    /// save is refused and so is the transfer.
    pub fn prepare(
        session: &mut Session,
        save_to: Option<&Path>,
        target: TransferTarget,
    ) -> TransferResult<Self> {
        let local_path = match (session.path().map(Path::to_path_buf), save_to) {
            (Some(path), _) => {
                session.save()?;
                path
            }
            (None, Some(path)) => {
                session.save_as(path)?;
                path.to_path_buf()
            }
            (None, None) => session.save()?,
        };
        Self::for_file(&local_path, target)
    }

    /// Plans the transfer of an existing file without touching any session.
    pub fn for_file(local_path: &Path, target: TransferTarget) -> TransferResult<Self> {
        if target.host.trim().is_empty() {
            return Err(TransferError::MissingPrerequisite("destination address"));
        }
        if target.remote_dir.trim().is_empty() {
            return Err(TransferError::MissingPrerequisite("destination folder"));
        }
        if target.remote_filename.trim().is_empty() {
            return Err(TransferError::MissingPrerequisite("destination file name"));
        }
        target.check_paths()?;

        let metadata = fs::metadata(local_path)
            .map_err(|_| TransferError::LocalFileMissing(local_path.to_path_buf()))?;
        if !metadata.is_file() {
            return Err(TransferError::LocalFileMissing(local_path.to_path_buf()));
        }

        Ok(Self {
            local_path: local_path.to_path_buf(),
            size: metadata.len(),
            target,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EditorConfig;
    use crate::record::Record;
    use crate::session::SessionError;
    use tempfile::TempDir;

    fn target() -> TransferTarget {
        TransferTarget::from_config(&TransferConfig::default())
    }

    fn session_with_row() -> Session {
        let mut session = Session::new(&EditorConfig::default());
        session.store_mut().push(Record::from_values([
            "05527", "DOE JANE", "N12345678", "456", "", "", "25",
        ]));
        session
    }

    #[test]
    fn test_remote_path_joins_once() {
        assert_eq!(target().remote_path(), "/inbound/paysrp.nben902.sccea.input");
        let mut t = target();
        t.remote_dir = "/inbound".into();
        assert_eq!(t.remote_path(), "/inbound/paysrp.nben902.sccea.input");
    }

    #[test]
    fn test_prepare_saves_first() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.input");
        let mut session = session_with_row();

        let plan = TransferPlan::prepare(&mut session, Some(&path), target()).unwrap();
        assert_eq!(plan.local_path, path);
        assert_eq!(plan.size, 104);
        assert_eq!(session.path(), Some(path.as_path()));
    }

    #[test]
    fn test_prepare_without_destination_is_refused() {
        let mut session = session_with_row();
        let err = TransferPlan::prepare(&mut session, None, target()).unwrap_err();
        assert!(matches!(err, TransferError::Session(SessionError::NoDestination)));
    }

    #[test]
    fn test_missing_folder_refuses() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.input");
        let mut t = target();
        t.remote_dir = " ".into();

        let mut session = session_with_row();
        let err = TransferPlan::prepare(&mut session, Some(&path), t).unwrap_err();
        assert!(matches!(err, TransferError::MissingPrerequisite("destination folder")));
    }

    #[test]
    fn test_file_name_must_stay_in_folder() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.input");
        std::fs::write(&path, "x").unwrap();

        for name in ["../escape.input", "/etc/passwd", "sub\\file", ".."] {
            let mut t = target();
            t.remote_filename = name.into();
            let err = TransferPlan::for_file(&path, t).unwrap_err();
            assert!(
                matches!(err, TransferError::InvalidTarget { setting: "destination file name", .. }),
                "{}",
                name
            );
        }

        let mut t = target();
        t.remote_dir = "/inbound/../../tmp/".into();
        let err = TransferPlan::for_file(&path, t).unwrap_err();
        assert_eq!(err.code(), "NBEN_TRANSFER_INVALID_TARGET");

        let mut t = target();
        t.remote_dir = "/inbound/daily/".into();
        assert!(TransferPlan::for_file(&path, t).is_ok());
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let creds = Credentials {
            username: "sccea_paysr".into(),
            password: Some("hunter2".into()),
        };
        let shown = format!("{:?}", creds);
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("***"));
    }
}
