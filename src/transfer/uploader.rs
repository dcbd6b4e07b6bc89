//! Uploaders
//!
//! The wire protocol lives behind `Uploader`. The shipped implementation
//! drops the file into a directory tree standing in for the remote side,
//! which is what a mounted share or a staging area for a separate
//! transfer job needs.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::observability::{Event, Logger};

use super::errors::{TransferError, TransferResult};
use super::plan::{Credentials, TransferPlan};

const CHUNK_SIZE: usize = 32 * 1024;

/// Outcome of a completed transfer
#[derive(Debug, Clone, Serialize)]
pub struct TransferReceipt {
    pub destination: String,
    pub bytes: u64,
    pub completed_at: DateTime<Utc>,
}

/// Moves a planned file to its destination.
pub trait Uploader {
    /// Whether `transmit` must refuse to start without a password
    fn requires_password(&self) -> bool;

    /// Sends the file. `progress` is called with (bytes sent, total bytes).
    fn upload(
        &self,
        plan: &TransferPlan,
        credentials: &Credentials,
        progress: &mut dyn FnMut(u64, u64),
    ) -> TransferResult<TransferReceipt>;
}

/// Copies the file under a local root, at `<root>/<remote_dir>/<remote_filename>`
#[derive(Debug)]
pub struct DirectoryUploader {
    root: PathBuf,
}

impl DirectoryUploader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Local path the plan's remote path maps to, always under the root
    pub fn destination(&self, plan: &TransferPlan) -> TransferResult<PathBuf> {
        plan.target.check_paths()?;
        let remote_dir = plan.target.remote_dir.trim_matches('/');
        let mut path = self.root.clone();
        if !remote_dir.is_empty() {
            path.push(remote_dir);
        }
        path.push(&plan.target.remote_filename);
        Ok(path)
    }
}

impl Uploader for DirectoryUploader {
    fn requires_password(&self) -> bool {
        false
    }

    fn upload(
        &self,
        plan: &TransferPlan,
        _credentials: &Credentials,
        progress: &mut dyn FnMut(u64, u64),
    ) -> TransferResult<TransferReceipt> {
        let destination = self.destination(plan)?;
        let io_err = |source: std::io::Error| TransferError::Io {
            destination: destination.display().to_string(),
            source,
        };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut input = File::open(&plan.local_path)
            .map_err(|_| TransferError::LocalFileMissing(plan.local_path.clone()))?;
        let mut output = File::create(&destination).map_err(io_err)?;

        let mut buf = vec![0u8; CHUNK_SIZE];
        let mut sent = 0u64;
        progress(0, plan.size);
        loop {
            let n = input.read(&mut buf).map_err(io_err)?;
            if n == 0 {
                break;
            }
            output.write_all(&buf[..n]).map_err(io_err)?;
            sent += n as u64;
            progress(sent, plan.size);
        }
        output.sync_all().map_err(io_err)?;

        Ok(TransferReceipt {
            destination: destination.display().to_string(),
            bytes: sent,
            completed_at: Utc::now(),
        })
    }
}

/// Runs a planned transfer through `uploader`, logging its outcome.
pub fn transmit(
    plan: &TransferPlan,
    credentials: &Credentials,
    uploader: &dyn Uploader,
    progress: &mut dyn FnMut(u64, u64),
) -> TransferResult<TransferReceipt> {
    let local = plan.local_path.display().to_string();
    let remote = plan.target.remote_path();

    if uploader.requires_password() && credentials.password.is_none() {
        Logger::warn(Event::TransferRefused, &[("reason", "password missing")]);
        return Err(TransferError::MissingPrerequisite("password"));
    }

    Logger::info(
        Event::TransferBegin,
        &[
            ("host", plan.target.host.as_str()),
            ("local", local.as_str()),
            ("remote", remote.as_str()),
        ],
    );

    match uploader.upload(plan, credentials, progress) {
        Ok(receipt) => {
            Logger::info(
                Event::TransferComplete,
                &[
                    ("bytes", receipt.bytes.to_string().as_str()),
                    ("destination", receipt.destination.as_str()),
                ],
            );
            Ok(receipt)
        }
        Err(e) => {
            Logger::error(Event::TransferFailed, &[("error", e.to_string().as_str())]);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transfer::plan::TransferTarget;
    use std::path::Path;
    use tempfile::TempDir;

    fn same_contents(a: &Path, b: &Path) -> bool {
        fs::read(a).unwrap() == fs::read(b).unwrap()
    }

    fn plan(dir: &TempDir) -> TransferPlan {
        let local = dir.path().join("local.input");
        fs::write(&local, "x".repeat(100_000)).unwrap();
        TransferPlan::for_file(
            &local,
            TransferTarget {
                host: "localhost".into(),
                remote_dir: "/inbound/".into(),
                remote_filename: "paysrp.nben902.sccea.input".into(),
            },
        )
        .unwrap()
    }

    fn creds(password: Option<&str>) -> Credentials {
        Credentials {
            username: "user".into(),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn test_directory_upload_copies_bytes_with_progress() {
        let tmp = TempDir::new().unwrap();
        let plan = plan(&tmp);
        let uploader = DirectoryUploader::new(tmp.path().join("remote"));

        let mut calls = Vec::new();
        let receipt = transmit(&plan, &creds(None), &uploader, &mut |sent: u64, total: u64| {
            calls.push((sent, total))
        })
        .unwrap();

        let dest = tmp.path().join("remote").join("inbound").join("paysrp.nben902.sccea.input");
        assert_eq!(receipt.bytes, 100_000);
        assert!(same_contents(&plan.local_path, &dest));
        assert_eq!(calls.first(), Some(&(0, 100_000)));
        assert_eq!(calls.last(), Some(&(100_000, 100_000)));
    }

    struct NeedsPassword;

    impl Uploader for NeedsPassword {
        fn requires_password(&self) -> bool {
            true
        }

        fn upload(
            &self,
            plan: &TransferPlan,
            _credentials: &Credentials,
            _progress: &mut dyn FnMut(u64, u64),
        ) -> TransferResult<TransferReceipt> {
            Ok(TransferReceipt {
                destination: plan.target.remote_path(),
                bytes: plan.size,
                completed_at: Utc::now(),
            })
        }
    }

    #[test]
    fn test_directory_upload_refuses_escaping_name() {
        let tmp = TempDir::new().unwrap();
        let mut plan = plan(&tmp);
        plan.target.remote_filename = "../../outside.input".into();
        let uploader = DirectoryUploader::new(tmp.path().join("remote"));

        let err = transmit(&plan, &creds(None), &uploader, &mut |_: u64, _: u64| {}).unwrap_err();
        assert!(matches!(err, TransferError::InvalidTarget { .. }));
        assert!(!tmp.path().join("outside.input").exists());
    }

    #[test]
    fn test_password_required_refuses_before_upload() {
        let tmp = TempDir::new().unwrap();
        let plan = plan(&tmp);

        let err = transmit(&plan, &creds(None), &NeedsPassword, &mut |_: u64, _: u64| {}).unwrap_err();
        assert!(matches!(err, TransferError::MissingPrerequisite("password")));

        let receipt = transmit(&plan, &creds(Some("secret")), &NeedsPassword, &mut |_: u64, _: u64| {}).unwrap();
        assert_eq!(receipt.destination, "/inbound/paysrp.nben902.sccea.input");
    }
}
