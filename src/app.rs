//! Wiring between the key listener, the dispatcher and the injection worker.
//!
//! The listener calls [`App::handle`] for every key event on its own thread.
//! Replace commands go over a channel to a single worker thread that types
//! them through a [`TextSink`], so the OS hook callback never blocks on
//! synthetic input. While the worker is busy, listener events are dropped:
//! they are our own backspaces and inserted text coming back through the hook.

use std::{
    io,
    path::Path,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver, Sender},
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use language_fixer_core::{Command, Dispatcher, KeyEvent, Scope, TextSink, apply_command};

use crate::{
    config::{self, Config, ConfigError},
    mapping_file,
};

/// How long synthetic events may keep arriving after the worker finished.
const SETTLE: Duration = Duration::from_millis(50);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("no enabled language pair could be loaded")]
    NoLanguagePairs,

    #[error("keyboard listener failed: {0}")]
    Listen(String),

    #[error("this platform has no keyboard hook backend")]
    UnsupportedPlatform,
}

#[derive(Debug, Clone, Copy)]
pub struct InjectOptions {
    /// Wait before typing so the user can release the hotkey.
    pub delay: Duration,
    /// Quiet period after typing during which listener events are dropped.
    pub settle: Duration,
    pub switch_layout: bool,
}

impl InjectOptions {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            delay: cfg.inject_delay(),
            settle: SETTLE,
            switch_layout: cfg.switch_layout(),
        }
    }
}

/// Builds one dispatcher scope per enabled pair.
///
/// A pair whose mapping can not be loaded is logged and skipped; the call
/// fails only when nothing is left.
pub fn build_scopes(cfg: &Config, base_dir: &Path) -> Result<Vec<Scope>, AppError> {
    cfg.validate()?;

    let mut scopes = Vec::new();
    for pair in cfg.enabled_pairs() {
        let path = mapping_file::resolve_path(&pair.mapping_file, base_dir);
        let table = match mapping_file::load(&path) {
            Ok(table) => table,
            Err(e) => {
                tracing::error!(pair = %pair.name, error = %e, "skipping language pair");
                continue;
            }
        };

        scopes.push(Scope {
            name: pair.name.clone(),
            hotkey: pair.parsed_hotkey()?,
            table: Arc::new(table),
            timeout: cfg.timeout_for(pair),
            direction: pair.direction.into(),
        });
    }

    if scopes.is_empty() {
        return Err(AppError::NoLanguagePairs);
    }
    Ok(scopes)
}

struct Shared {
    dispatcher: Mutex<Dispatcher>,
    injecting: AtomicBool,
}

pub struct App {
    shared: Arc<Shared>,
    tx: Option<Sender<Command>>,
    worker: Option<JoinHandle<()>>,
}

impl App {
    pub fn start<S>(dispatcher: Dispatcher, sink: S, opts: InjectOptions) -> io::Result<Self>
    where
        S: TextSink + Send + 'static,
    {
        let shared = Arc::new(Shared {
            dispatcher: Mutex::new(dispatcher),
            injecting: AtomicBool::new(false),
        });
        let (tx, rx) = mpsc::channel();

        let worker = {
            let shared = Arc::clone(&shared);
            thread::Builder::new()
                .name("injector".into())
                .spawn(move || run_worker(&shared, sink, &rx, opts))?
        };

        Ok(Self {
            shared,
            tx: Some(tx),
            worker: Some(worker),
        })
    }

    pub fn is_injecting(&self) -> bool {
        self.shared.injecting.load(Ordering::Acquire)
    }

    /// Feeds one listener event to the dispatcher and queues any resulting
    /// replacement.
    ///
    /// Events arriving while a replacement is being typed are dropped. The
    /// listener can not tell synthetic events from real ones, so a key the
    /// user types in that window reaches the screen but not the buffer, and
    /// the next replace erases one character too few for each.
    pub fn handle(&self, event: KeyEvent, now: Instant) {
        if self.is_injecting() {
            tracing::trace!(?event, "dropping event while injecting");
            return;
        }

        let cmd = match self.shared.dispatcher.lock() {
            Ok(mut d) => d.handle(event, now),
            Err(_) => {
                tracing::error!("dispatcher lock poisoned");
                return;
            }
        };
        let Some(cmd) = cmd else {
            return;
        };

        self.shared.injecting.store(true, Ordering::Release);
        let scope = cmd.scope;
        let sent = self.tx.as_ref().is_some_and(|tx| tx.send(cmd).is_ok());
        if !sent {
            tracing::error!("injection worker is gone");
            self.shared.injecting.store(false, Ordering::Release);
            if let Ok(mut d) = self.shared.dispatcher.lock() {
                d.injection_failed(scope);
            }
        }
    }

    pub fn with_dispatcher<R>(&self, f: impl FnOnce(&Dispatcher) -> R) -> Option<R> {
        self.shared.dispatcher.lock().ok().map(|d| f(&d))
    }

    /// Drains queued commands, stops the worker and hands back the dispatcher.
    pub fn shutdown(self) -> Option<Dispatcher> {
        let shared = Arc::clone(&self.shared);
        drop(self);
        let shared = Arc::try_unwrap(shared).ok()?;
        shared.dispatcher.into_inner().ok()
    }

    fn stop_worker(&mut self) {
        drop(self.tx.take());
        if let Some(worker) = self.worker.take()
            && worker.join().is_err()
        {
            tracing::error!("injection worker panicked");
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.stop_worker();
    }
}

fn run_worker<S: TextSink>(shared: &Shared, mut sink: S, rx: &Receiver<Command>, opts: InjectOptions) {
    for cmd in rx {
        thread::sleep(opts.delay);

        match apply_command(&mut sink, &cmd) {
            Ok(()) => {
                if opts.switch_layout
                    && let Err(e) = sink.switch_layout()
                {
                    tracing::debug!(error = %e, "layout switch failed");
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    scope = cmd.scope.0,
                    "text injection failed, leaving text as typed"
                );
                if let Ok(mut d) = shared.dispatcher.lock() {
                    d.injection_failed(cmd.scope);
                }
            }
        }

        thread::sleep(opts.settle);
        shared.injecting.store(false, Ordering::Release);
    }
}

/// Startup banner, one line per active pair.
fn log_scopes(scopes: &[Scope]) {
    for scope in scopes {
        tracing::info!(
            pair = %scope.name,
            hotkey = %scope.hotkey,
            timeout_secs = scope.timeout.as_secs_f64(),
            keys = scope.table.len(),
            "language pair active"
        );
    }
}

/// Loads the mapping tables and blocks on the OS keyboard listener.
pub fn run(cfg: &Config) -> Result<(), AppError> {
    let base_dir = config::config_dir()?;
    let scopes = build_scopes(cfg, &base_dir)?;
    log_scopes(&scopes);

    listen(Dispatcher::new(scopes), InjectOptions::from_config(cfg))
}

#[cfg(target_os = "macos")]
fn listen(dispatcher: Dispatcher, opts: InjectOptions) -> Result<(), AppError> {
    crate::platform::macos::run(dispatcher, opts)
}

#[cfg(not(target_os = "macos"))]
fn listen(_dispatcher: Dispatcher, _opts: InjectOptions) -> Result<(), AppError> {
    Err(AppError::UnsupportedPlatform)
}
