mod state;
mod ui;

use crate::api::HttpClient;
use crate::config::Config;
use crate::error::{FileRejection, RejectReason};
use crate::upload::{self, BatchEvent, FilePolicy, Notify, SelectedFile};
use eframe::{egui, App};
pub use state::UploadState;
use std::path::PathBuf;
use std::sync::mpsc::{self as std_mpsc, Receiver};
use std::sync::Arc;
use tracing::{error, info};

pub struct PngUploader {
    backend: Arc<HttpClient>,
    policy: FilePolicy,
    max_file_size: u64,
    state: UploadState,
    event_receiver: Option<Receiver<BatchEvent>>,
}

impl PngUploader {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config) -> Self {
        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Self {
        info!("Initializing uploader against {}", config.api_url);
        Self {
            backend: Arc::new(HttpClient::new(config.api_url.clone())),
            policy: config.file_policy(),
            max_file_size: config.max_file_size,
            state: UploadState::default(),
            event_receiver: None,
        }
    }

    pub fn state(&self) -> &UploadState {
        &self.state
    }

    /// Runs every candidate through the accept policy; rejections replace the previous ones.
    pub fn select_files<I>(&mut self, candidates: I)
    where
        I: IntoIterator<Item = Result<SelectedFile, FileRejection>>,
    {
        let (accepted, rejected) = self.policy.partition(candidates);
        if !accepted.is_empty() {
            info!("Selected {} files", accepted.len());
        }
        self.state.add_files(accepted);
        self.state.set_rejections(rejected);
    }

    pub fn select_paths(&mut self, paths: Vec<PathBuf>) {
        let candidates: Vec<_> = paths.iter().map(|path| self.policy.read_path(path)).collect();
        self.select_files(candidates);
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        let candidates: Vec<_> = dropped
            .iter()
            .map(|file| read_dropped(file, &self.policy))
            .collect();
        self.select_files(candidates);
    }

    fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("PNG image", &["png"])
            .pick_files()
        {
            self.select_paths(paths);
        }
    }

    pub fn remove_file(&mut self, index: usize) {
        if let Some(item) = self.state.remove(index) {
            info!("Removed {}", item.file.name);
        }
    }

    pub fn reset(&mut self) {
        if self.state.reset() {
            info!("Cleared upload list");
        }
    }

    pub fn start_upload(&mut self, ctx: &egui::Context) {
        let Some(files) = self.state.begin_batch() else {
            return;
        };
        info!("Starting upload of {} files", files.len());

        let (sender, receiver) = std_mpsc::channel();
        self.event_receiver = Some(receiver);

        let repaint = ctx.clone();
        let notify: Notify = Arc::new(move |event: BatchEvent| {
            sender.send(event).unwrap_or_default();
            repaint.request_repaint();
        });
        let backend = Arc::clone(&self.backend);

        std::thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(e) => {
                    error!("Failed to start upload runtime: {}", e);
                    notify(BatchEvent::Aborted(e.to_string()));
                    return;
                }
            };
            runtime.block_on(upload::run_batch(backend.as_ref(), files, notify));
        });
    }

    pub fn update_state(&mut self) {
        let Some(receiver) = &self.event_receiver else {
            return;
        };

        let mut finished = false;
        let mut disconnected = false;
        loop {
            match receiver.try_recv() {
                Ok(event) => {
                    finished |= !matches!(event, BatchEvent::Progress { .. });
                    self.state.apply(event);
                }
                Err(std_mpsc::TryRecvError::Empty) => break,
                Err(std_mpsc::TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if disconnected && !finished && self.state.is_loading {
            error!("Upload worker exited without reporting a result");
            self.state.apply(BatchEvent::Aborted("worker exited".to_string()));
            finished = true;
        }
        if finished || disconnected {
            self.event_receiver = None;
        }
    }
}

fn read_dropped(
    file: &egui::DroppedFile,
    policy: &FilePolicy,
) -> Result<SelectedFile, FileRejection> {
    if let Some(path) = &file.path {
        return policy.read_path(path);
    }

    match &file.bytes {
        Some(bytes) => Ok(SelectedFile::new(file.name.clone(), Arc::clone(bytes))),
        None => Err(FileRejection::new(
            file.name.clone(),
            RejectReason::Unreadable("no path or contents available".to_string()),
        )),
    }
}

impl App for PngUploader {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.update_state();
        self.handle_dropped_files(ctx);
        self.render(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploader() -> PngUploader {
        PngUploader::from_config(Config {
            api_url: "http://localhost:3333".to_string(),
            max_file_size: 8,
            accepted_types: vec!["image/png".to_string()],
        })
    }

    #[test]
    fn selection_adds_accepted_and_records_rejections() {
        let mut app = uploader();

        app.select_files(vec![
            Ok(SelectedFile::new("a.png", vec![1, 2])),
            Ok(SelectedFile::new("b.png", vec![0; 9])),
            Ok(SelectedFile::new("c.gif", vec![1])),
        ]);

        let names: Vec<_> = app.state().items.iter().map(|i| i.name()).collect();
        assert_eq!(names, vec!["a.png"]);
        let rejected: Vec<_> = app.state().rejections.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(rejected, vec!["b.png", "c.gif"]);

        app.select_files(vec![Ok(SelectedFile::new("d.png", vec![1]))]);
        assert!(app.state().rejections.is_empty());
        assert_eq!(app.state().items.len(), 2);
    }

    #[test]
    fn dropped_bytes_become_a_file() {
        let dropped = egui::DroppedFile {
            name: "drop.png".to_string(),
            bytes: Some(Arc::from(vec![1u8, 2, 3])),
            ..Default::default()
        };

        let file = read_dropped(&dropped, &uploader().policy).unwrap();
        assert_eq!(file.name, "drop.png");
        assert_eq!(file.content_type, "image/png");
        assert_eq!(file.size(), 3);
    }

    #[test]
    fn dropped_file_without_contents_is_rejected() {
        let dropped = egui::DroppedFile {
            name: "ghost.png".to_string(),
            ..Default::default()
        };

        let rejection = read_dropped(&dropped, &uploader().policy).unwrap_err();
        assert!(matches!(rejection.reason, RejectReason::Unreadable(_)));
    }

    #[test]
    fn queued_events_are_applied_and_channel_released() {
        let mut app = uploader();
        app.select_files(vec![Ok(SelectedFile::new("a.png", vec![1]))]);
        app.state.begin_batch();

        let (sender, receiver) = std_mpsc::channel();
        app.event_receiver = Some(receiver);
        sender
            .send(BatchEvent::Progress {
                index: 0,
                percent: 100,
            })
            .unwrap();
        sender
            .send(BatchEvent::Settled(vec![crate::upload::UploadStatus::Success]))
            .unwrap();

        app.update_state();

        assert!(!app.state().is_loading);
        assert_eq!(app.state().items[0].progress, 100);
        assert!(app.event_receiver.is_none());
    }

    #[test]
    fn dead_worker_clears_loading() {
        let mut app = uploader();
        app.select_files(vec![Ok(SelectedFile::new("a.png", vec![1]))]);
        app.state.begin_batch();

        let (sender, receiver) = std_mpsc::channel::<BatchEvent>();
        app.event_receiver = Some(receiver);
        drop(sender);

        app.update_state();

        assert!(!app.state().is_loading);
        assert!(app.event_receiver.is_none());
    }
}
