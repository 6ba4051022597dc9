// SPDX-License-Identifier: MPL-2.0
//! Permission broker backed by filesystem readability.
//!
//! On desktop platforms there is no library permission dialog; access is
//! whatever the process can read. The broker probes the configured roots:
//! all readable is [`PermissionStatus::Granted`], some is
//! [`PermissionStatus::Limited`], none (or no roots at all) is
//! [`PermissionStatus::Denied`].

use crate::application::port::PermissionBroker;
use crate::domain::permission::PermissionStatus;
use async_trait::async_trait;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct FsPermissionBroker {
    roots: Vec<PathBuf>,
}

impl FsPermissionBroker {
    #[must_use]
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

fn probe(roots: &[PathBuf]) -> PermissionStatus {
    let readable = roots
        .iter()
        .filter(|root| match fs::read_dir(root) {
            Ok(_) => true,
            Err(err) => {
                tracing::debug!(root = %root.display(), error = %err, "root not readable");
                false
            }
        })
        .count();

    match readable {
        0 => PermissionStatus::Denied,
        n if n == roots.len() => PermissionStatus::Granted,
        _ => PermissionStatus::Limited,
    }
}

#[async_trait]
impl PermissionBroker for FsPermissionBroker {
    async fn request_access(&self) -> PermissionStatus {
        let roots = self.roots.clone();
        tokio::task::spawn_blocking(move || probe(&roots))
            .await
            .unwrap_or(PermissionStatus::Denied)
    }

    async fn open_system_settings(&self) -> bool {
        tracing::debug!("no permission settings page on this platform");
        false
    }
}
