mod categories;
mod check;
mod download;
mod install;
mod offline;


use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use log::warn;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use winup_backend::{PackageInstaller, UpdateSource};

use crate::events::Reporter;
use crate::gate::WorkflowGate;
use crate::repo::LocalRepository;
use crate::settings::{Settings, SettingsStore, UpdateCategory};

const SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Orchestrates the update workflows against an update source and a package
/// installer, reporting everything it does through the event channel.
///
/// Workflows are expected to run on spawned tasks; the struct itself only
/// hands out snapshots and never blocks the caller beyond its own step
/// sequence.
pub struct Engine {
    source: Arc<dyn UpdateSource>,
    installer: Arc<dyn PackageInstaller>,
    store: Arc<dyn SettingsStore>,
    settings: RwLock<Settings>,
    reporter: Reporter,
    check_gate: WorkflowGate,
    install_gate: WorkflowGate,
    cancel: CancellationToken,
    background: TaskTracker,
}

impl Engine {
    pub fn new(
        source: Arc<dyn UpdateSource>,
        installer: Arc<dyn PackageInstaller>,
        store: Arc<dyn SettingsStore>,
        reporter: Reporter,
    ) -> Self {
        let settings = store.load();
        Self {
            source,
            installer,
            store,
            settings: RwLock::new(settings),
            reporter,
            check_gate: WorkflowGate::new(),
            install_gate: WorkflowGate::new(),
            cancel: CancellationToken::new(),
            background: TaskTracker::new(),
        }
    }

    /// Snapshot of the current settings.
    pub fn settings(&self) -> Settings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn set_repo_path(&self, path: PathBuf) {
        let snapshot = self.mutate(|settings| settings.repo_path = path);
        self.reporter.log(format!(
            "Repository path changed to: {}",
            snapshot.repo_path.display()
        ));
    }

    pub fn set_auto_reboot(&self, enabled: bool) {
        self.mutate(|settings| settings.auto_reboot = enabled);
        let state = if enabled { "enabled" } else { "disabled" };
        self.reporter.log(format!("Automatic restart {state}"));
    }

    pub fn set_dark_mode(&self, enabled: bool) {
        self.mutate(|settings| settings.dark_mode = enabled);
    }

    pub fn set_category(&self, category: UpdateCategory, enabled: bool) {
        self.mutate(|settings| settings.update_categories.set(category, enabled));
    }

    /// Signal shutdown: the offline install loop stops before its next file.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Wait for detached background work (manifest writes) to finish.
    pub async fn quiesce(&self) {
        self.background.close();
        self.background.wait().await;
    }

    // Mutations land on disk before the caller proceeds, so in-memory and
    // persisted settings cannot diverge in normal operation.
    fn mutate(&self, apply: impl FnOnce(&mut Settings)) -> Settings {
        let mut guard = self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        apply(&mut guard);
        let snapshot = guard.clone();
        drop(guard);

        if let Err(err) = self.store.save(&snapshot) {
            warn!("Could not persist settings: {err}");
        }
        snapshot
    }

    fn repository(&self) -> LocalRepository {
        LocalRepository::new(self.settings().repo_path)
    }

    async fn ramp_progress(&self, from: u8, to: u8, step: u8, delay: Duration) {
        let mut value = from;
        while value < to {
            self.reporter.progress(value);
            tokio::time::sleep(delay).await;
            value = value.saturating_add(step);
        }
    }

    async fn finish_progress(&self) {
        self.reporter.progress(100);
        tokio::time::sleep(SETTLE_DELAY).await;
        self.reporter.progress(0);
    }
}
