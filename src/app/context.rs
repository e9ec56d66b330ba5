use crate::domain::{AppConfig, RemoteSettings};
use crate::ports::{Git, RemoteHost};

use super::cancellation::CancellationToken;

/// Hosting API client paired with the settings it was built from.
#[derive(Debug)]
pub struct RemoteBinding<R: RemoteHost> {
    pub host: R,
    pub settings: RemoteSettings,
}

/// Application context holding configuration and adapters for command execution.
pub struct AppContext<G: Git, R: RemoteHost> {
    config: AppConfig,
    git: G,
    remote: Option<RemoteBinding<R>>,
    cancel: CancellationToken,
}

impl<G: Git, R: RemoteHost> AppContext<G, R> {
    pub fn new(
        config: AppConfig,
        git: G,
        remote: Option<RemoteBinding<R>>,
        cancel: CancellationToken,
    ) -> Self {
        Self { config, git, remote, cancel }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn git(&self) -> &G {
        &self.git
    }

    /// Present only when publishing to the hosted remote.
    pub fn remote(&self) -> Option<&RemoteBinding<R>> {
        self.remote.as_ref()
    }

    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }
}
