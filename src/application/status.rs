use serde::Serialize;
use tokio::sync::watch;

use crate::domain::todolist::RequestStatus;

/// Receives app-wide request progress for the global loading/error banner.
pub trait StatusNotifier: Send + Sync + 'static {
    fn set_status(&self, status: RequestStatus);
    fn set_error(&self, error: Option<String>);
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppStatus {
    pub status: RequestStatus,
    pub error: Option<String>,
}

/// Notifier backed by a watch channel so a UI can render the latest status.
#[derive(Debug)]
pub struct AppStatusNotifier {
    state: watch::Sender<AppStatus>,
}

impl Default for AppStatusNotifier {
    fn default() -> Self {
        let (state, _) = watch::channel(AppStatus::default());
        Self { state }
    }
}

impl AppStatusNotifier {
    pub fn current(&self) -> AppStatus { self.state.borrow().clone() }

    pub fn subscribe(&self) -> watch::Receiver<AppStatus> { self.state.subscribe() }
}

impl StatusNotifier for AppStatusNotifier {
    fn set_status(&self, status: RequestStatus) {
        self.state.send_modify(|s| s.status = status);
    }

    fn set_error(&self, error: Option<String>) {
        self.state.send_modify(|s| s.error = error);
    }
}

impl<N: StatusNotifier + ?Sized> StatusNotifier for std::sync::Arc<N> {
    fn set_status(&self, status: RequestStatus) { (**self).set_status(status) }
    fn set_error(&self, error: Option<String>) { (**self).set_error(error) }
}
