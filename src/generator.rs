//! Launch the external deck generator and read back its result.
//!
//! The generator is `<python> <script>`; it writes the result file named in
//! `.env`. Instead of reading after a fixed delay we wait for the process to
//! exit (bounded by a timeout) and only then read the file.

use crate::{deck::Deck, env::Settings, error::DataSourceError};
use log::{info, warn};
use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, TryRecvError},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant, SystemTime},
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Clone, Debug)]
pub struct Generator {
    pub program: PathBuf,
    pub script: PathBuf,
    pub timeout: Duration,
}

impl Generator {
    pub fn from_settings(settings: &Settings) -> Result<Self, DataSourceError> {
        Ok(Self {
            program: settings.python.clone(),
            script: settings.script.clone().ok_or(DataSourceError::NoScript)?,
            timeout: settings.generator_timeout,
        })
    }

    /// Run the generator to completion.
    ///
    /// A non-zero exit status is logged, not returned: the script may still
    /// have written a usable (or `{"error": ...}`) result.
    pub fn run(&self, result_path: &Path) -> Result<(), DataSourceError> {
        self.run_until(result_path, &AtomicBool::new(false))
    }

    /// [`Generator::run`], killing the child as soon as `cancel` is set.
    pub fn run_until(&self, result_path: &Path, cancel: &AtomicBool) -> Result<(), DataSourceError> {
        let before = modified(result_path);

        let mut child = Command::new(&self.program)
            .arg(&self.script)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| DataSourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait().map_err(DataSourceError::Wait)? {
                Some(status) => break status,
                None if cancel.load(Ordering::Relaxed) => {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DataSourceError::Cancelled);
                }
                None if Instant::now() >= deadline => {
                    // Reap it so no zombie outlives the refresh.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(DataSourceError::GeneratorTimeout {
                        timeout: self.timeout,
                    });
                }
                None => thread::sleep(POLL_INTERVAL),
            }
        };

        if !status.success() {
            warn!("generator {} exited with {status}", self.script.display());
        }
        if before.is_some() && modified(result_path) == before {
            warn!("{} was not rewritten by the generator", result_path.display());
        }
        Ok(())
    }
}

/// Run the generator, then load the deck it wrote.
pub fn refresh(settings: &Settings) -> Result<Deck, DataSourceError> {
    refresh_until(settings, &AtomicBool::new(false))
}

fn refresh_until(settings: &Settings, cancel: &AtomicBool) -> Result<Deck, DataSourceError> {
    let result_path = settings
        .result_path
        .as_deref()
        .ok_or(DataSourceError::NoResultPath)?;

    let generator = Generator::from_settings(settings)?;
    info!(
        "running {} {}",
        generator.program.display(),
        generator.script.display()
    );
    generator.run_until(result_path, cancel)?;

    Deck::load(result_path)
}

/// A refresh running on a background thread.
///
/// Dropping it before the refresh finishes kills the generator and waits
/// for the worker to exit.
pub struct PendingRefresh {
    rx: Receiver<Result<Deck, DataSourceError>>,
    cancel: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl PendingRefresh {
    pub fn spawn(settings: Settings) -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancel);
        let worker = thread::spawn(move || {
            // The receiver is gone if the display was dropped first.
            let _ = tx.send(refresh_until(&settings, &flag));
        });
        Self {
            rx,
            cancel,
            worker: Some(worker),
        }
    }

    /// The result, if the refresh has finished.
    pub fn poll(&self) -> Option<Result<Deck, DataSourceError>> {
        match self.rx.try_recv() {
            Ok(res) => Some(res),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(DataSourceError::Disconnected)),
        }
    }

    /// Block until the refresh finishes.
    pub fn wait(self) -> Result<Deck, DataSourceError> {
        self.rx.recv().unwrap_or(Err(DataSourceError::Disconnected))
    }
}

impl Drop for PendingRefresh {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("refresh worker panicked");
            }
        }
    }
}

fn modified(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|m| m.modified()).ok()
}
