//! Live reload of the route document
//!
//! A background worker watches the directory containing the route file and
//! reports create/modify events for that file name. The worker never touches
//! the route model; it only signals the UI side, which reloads and re-renders.

use std::any::TypeId;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::thread::JoinHandle;

use cosmic::iced_futures::Subscription;
use crossbeam_channel::{Receiver, select};
use futures::SinkExt;
use futures::channel::mpsc::Sender;
use notify::{Event, EventKind, RecursiveMode, Watcher};

use crate::error::WatchError;

/// Name of the background watcher thread
pub const THREAD_NAME: &str = "route-watcher";

/// Notification delivered to the UI side
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The route file was created or modified
    Changed,
    /// Watching stopped after an error; live reload is off for this session
    Stopped,
}

/// Handle to the running watcher worker
///
/// Dropping the handle cancels the worker. Cancelling never waits for the
/// thread, so a stuck watcher cannot hold up shutdown.
pub struct RouteWatcher {
    shutdown: crossbeam_channel::Sender<()>,
    thread: JoinHandle<()>,
}

impl RouteWatcher {
    /// Start watching `route_path`
    ///
    /// `on_event` is called on the worker thread once per matching event and
    /// once with [`WatchEvent::Stopped`] if the watch fails. Returning `false`
    /// ends the worker.
    pub fn spawn<F>(route_path: &Path, mut on_event: F) -> Result<Self, WatchError>
    where
        F: FnMut(WatchEvent) -> bool + Send + 'static,
    {
        let file_name = route_path
            .file_name()
            .map(OsString::from)
            .ok_or_else(|| WatchError::NoFileName(route_path.to_path_buf()))?;
        let dir = watch_dir(route_path);

        // Establish the watch up front so setup errors reach the caller
        let (event_tx, event_rx) = crossbeam_channel::unbounded::<notify::Result<Event>>();
        let mut watcher = notify::recommended_watcher(move |res| {
            let _ = event_tx.send(res);
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        log::info!("Watching {} for changes to {:?}", dir.display(), file_name);

        let (shutdown_tx, shutdown_rx) = crossbeam_channel::bounded::<()>(1);
        let thread = std::thread::Builder::new()
            .name(THREAD_NAME.to_string())
            .spawn(move || {
                // Keep the OS watch alive for the lifetime of the worker
                let _watcher = watcher;
                run(&dir, &file_name, &event_rx, &shutdown_rx, &mut on_event);
                log::debug!("Route watcher thread exiting");
            })
            .map_err(WatchError::Spawn)?;

        Ok(Self {
            shutdown: shutdown_tx,
            thread,
        })
    }

    /// Signal the worker to stop without waiting for it
    pub fn cancel(&self) {
        let _ = self.shutdown.try_send(());
    }

    #[cfg(test)]
    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }
}

impl Drop for RouteWatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Directory to watch for a route path; a bare file name means the working directory
fn watch_dir(route_path: &Path) -> PathBuf {
    match route_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Whether a notify event is a create/modify of the watched file name
fn is_route_change(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|name| name == file_name.as_os_str()))
}

/// Whether the watched directory itself went away
fn is_watch_lost(event: &Event, dir: &Path) -> bool {
    matches!(event.kind, EventKind::Remove(_)) && event.paths.iter().any(|p| p == dir)
}

fn run<F>(
    dir: &Path,
    file_name: &OsString,
    events: &Receiver<notify::Result<Event>>,
    shutdown: &Receiver<()>,
    on_event: &mut F,
) where
    F: FnMut(WatchEvent) -> bool,
{
    loop {
        select! {
            recv(shutdown) -> _ => return,
            recv(events) -> msg => match msg {
                Ok(Ok(event)) if is_watch_lost(&event, dir) => {
                    log::error!("Watched directory {} was removed", dir.display());
                    on_event(WatchEvent::Stopped);
                    return;
                }
                Ok(Ok(event)) => {
                    if is_route_change(&event, file_name) && !on_event(WatchEvent::Changed) {
                        return;
                    }
                }
                Ok(Err(err)) => {
                    log::error!("Route watch failed: {}", err);
                    on_event(WatchEvent::Stopped);
                    return;
                }
                Err(_) => {
                    log::error!("Route watch closed unexpectedly");
                    on_event(WatchEvent::Stopped);
                    return;
                }
            },
        }
    }
}

/// Subscription delivering route file events to the UI thread
///
/// The subscription owns the watcher; when the application stops polling it
/// the watcher is dropped and cancelled.
pub fn subscription(route_path: PathBuf) -> Subscription<WatchEvent> {
    struct RouteWatchSub;

    Subscription::run_with_id(
        TypeId::of::<RouteWatchSub>(),
        cosmic::iced::stream::channel(10, move |mut output| async move {
            use futures::StreamExt;

            // Bridge the blocking worker callback into an async stream
            let (mut tx, mut async_rx) =
                futures::channel::mpsc::channel::<WatchEvent>(10);

            let _watcher = match RouteWatcher::spawn(&route_path, move |event| forward(&mut tx, event)) {
                Ok(watcher) => Some(watcher),
                Err(err) => {
                    log::error!("Could not watch {}: {}", route_path.display(), err);
                    let _ = output.send(WatchEvent::Stopped).await;
                    None
                }
            };

            while let Some(event) = async_rx.next().await {
                if output.send(event).await.is_err() {
                    break;
                }
            }

            futures::future::pending::<()>().await;
        }),
    )
}

/// Hand a worker event to the UI side; false once the UI side is gone
///
/// Changes coalesce when the UI is behind, since a reload reads the whole
/// file anyway. `Stopped` is never dropped.
fn forward(tx: &mut Sender<WatchEvent>, event: WatchEvent) -> bool {
    match event {
        WatchEvent::Changed => match tx.try_send(event) {
            Ok(()) => true,
            Err(err) => err.is_full(),
        },
        WatchEvent::Stopped => {
            let _ = futures::executor::block_on(tx.send(event));
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, DataChange, ModifyKind, RemoveKind};
    use std::time::{Duration, Instant};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_watch_dir_for_bare_file_name() {
        assert_eq!(watch_dir(Path::new("route.json")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/srv/maps/route.json")),
            PathBuf::from("/srv/maps")
        );
    }

    #[test]
    fn test_matches_create_and_modify_only() {
        let name = OsString::from("route.json");
        assert!(is_route_change(
            &event(EventKind::Create(CreateKind::File), "/tmp/x/route.json"),
            &name
        ));
        assert!(is_route_change(
            &event(
                EventKind::Modify(ModifyKind::Data(DataChange::Content)),
                "/tmp/x/route.json"
            ),
            &name
        ));
        assert!(!is_route_change(
            &event(EventKind::Remove(RemoveKind::File), "/tmp/x/route.json"),
            &name
        ));
        assert!(!is_route_change(
            &event(EventKind::Create(CreateKind::File), "/tmp/x/route.json.tmp"),
            &name
        ));
    }

    #[test]
    fn test_directory_removal_ends_watch() {
        let dir = Path::new("/srv/maps");
        assert!(is_watch_lost(
            &event(EventKind::Remove(RemoveKind::Folder), "/srv/maps"),
            dir
        ));
        assert!(!is_watch_lost(
            &event(EventKind::Remove(RemoveKind::File), "/srv/maps/route.json"),
            dir
        ));
    }

    #[test]
    fn test_spawn_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone").join("route.json");
        assert!(RouteWatcher::spawn(&path, |_| true).is_err());
    }

    #[test]
    fn test_reports_writes_to_route_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        let (tx, rx) = crossbeam_channel::unbounded();

        let watcher = RouteWatcher::spawn(&path, move |event| tx.send(event).is_ok()).unwrap();

        std::fs::write(dir.path().join("other.json"), "{}").unwrap();
        std::fs::write(&path, "{}").unwrap();

        let got = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(got, WatchEvent::Changed);

        watcher.cancel();
    }

    #[test]
    fn test_cancel_stops_worker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        let watcher = RouteWatcher::spawn(&path, |_| true).unwrap();
        watcher.cancel();
        watcher.cancel();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !watcher.is_finished() {
            assert!(Instant::now() < deadline, "watcher did not stop");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_callback_can_end_worker() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        let watcher = RouteWatcher::spawn(&path, |_| false).unwrap();
        std::fs::write(&path, "{}").unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while !watcher.is_finished() {
            assert!(Instant::now() < deadline, "watcher did not stop");
            std::thread::sleep(Duration::from_millis(10));
        }
    }

    #[test]
    fn test_changes_coalesce_when_ui_is_behind() {
        let (mut tx, mut rx) = futures::channel::mpsc::channel::<WatchEvent>(0);
        assert!(forward(&mut tx, WatchEvent::Changed));
        // Buffer is full; the second change is dropped but the worker keeps going
        assert!(forward(&mut tx, WatchEvent::Changed));

        assert_eq!(rx.try_next().unwrap(), Some(WatchEvent::Changed));
        assert!(rx.try_next().is_err());
    }

    #[test]
    fn test_stopped_is_delivered_when_ui_is_behind() {
        let (mut tx, rx) = futures::channel::mpsc::channel::<WatchEvent>(0);
        assert!(forward(&mut tx, WatchEvent::Changed));

        let worker = std::thread::spawn(move || forward(&mut tx, WatchEvent::Stopped));

        let received: Vec<WatchEvent> = futures::executor::block_on_stream(rx).collect();
        assert_eq!(received, vec![WatchEvent::Changed, WatchEvent::Stopped]);
        assert!(!worker.join().unwrap());
    }

    #[test]
    fn test_forward_reports_closed_ui() {
        let (mut tx, rx) = futures::channel::mpsc::channel::<WatchEvent>(4);
        drop(rx);
        assert!(!forward(&mut tx, WatchEvent::Changed));
        assert!(!forward(&mut tx, WatchEvent::Stopped));
    }
}
