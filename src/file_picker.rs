//! Native file-selection surface: a hidden, one-shot picker owned by
//! whichever call most recently created it.
//!
//! The platform picker itself (an OS dialog, a web file input, ...) lives
//! behind [`SurfaceHost`]; this module owns the single-surface rule and the
//! resolve/reject contract around its change notification.

use std::path::PathBuf;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;
use tracing::debug;

use crate::error::DialogError;

/// Properties injected into a surface before it is triggered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickerProps {
    /// Pre-filled save-target name (save-as mode).
    pub save_as: Option<String>,
    /// Directory the picker opens in.
    pub working_dir: Option<PathBuf>,
    /// Select a directory instead of a file.
    pub directory: bool,
}

impl PickerProps {
    /// Plain open-file selection.
    pub fn open() -> Self {
        Self::default()
    }

    /// Save-as selection with a suggested target and working directory.
    pub fn save_target(path: impl Into<String>, base: impl Into<PathBuf>) -> Self {
        Self {
            save_as: Some(path.into()),
            working_dir: Some(base.into()),
            directory: false,
        }
    }

    /// Directory selection.
    pub fn folder() -> Self {
        Self {
            directory: true,
            ..Self::default()
        }
    }
}

/// One live native surface: hidden until triggered, signalling its change
/// at most once, removed after use.
#[async_trait]
pub trait FileSurface: Send {
    /// Reveal the native picker.
    fn trigger(&mut self);

    /// Await the one-shot change notification. An empty string means the
    /// user selected nothing.
    async fn changed(&mut self) -> String;

    /// Tear the surface down. Idempotent.
    fn remove(&mut self);
}

/// Platform host able to mount one hidden surface at a time.
pub trait SurfaceHost: Send + Sync {
    fn mount(&self, props: PickerProps) -> Box<dyn FileSurface>;
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    evict: Option<oneshot::Sender<()>>,
}

/// Exclusive-ownership token for the process-wide surface.
///
/// A new claim evicts the current occupant, which resolves the superseded
/// call with [`DialogError::Cancelled`]. The generation counter keeps a
/// finished call from evicting a newer one.
#[derive(Default)]
pub struct SurfaceSlot {
    inner: Mutex<SlotState>,
}

impl SurfaceSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn claim(&self) -> (u64, oneshot::Receiver<()>) {
        let mut state = self.inner.lock().unwrap();
        if let Some(stale) = state.evict.take() {
            debug!("evicting stale file surface");
            let _ = stale.send(());
        }
        state.generation += 1;
        let (tx, rx) = oneshot::channel();
        state.evict = Some(tx);
        (state.generation, rx)
    }

    fn release(&self, generation: u64) {
        let mut state = self.inner.lock().unwrap();
        if state.generation == generation {
            state.evict = None;
        }
    }
}

/// Drive one file selection to its single outcome.
///
/// Evicts any stale surface first, mounts a fresh hidden one, triggers it,
/// and awaits its change. A non-empty path resolves; an empty path rejects
/// with [`DialogError::NoFileSelected`]. The surface is removed immediately
/// after either outcome — it is never reused.
pub async fn pick(
    host: &dyn SurfaceHost,
    slot: &SurfaceSlot,
    props: PickerProps,
) -> Result<PathBuf, DialogError> {
    let (generation, mut evicted) = slot.claim();
    let mut surface = host.mount(props);
    surface.trigger();

    let path = tokio::select! {
        path = surface.changed() => path,
        _ = &mut evicted => {
            surface.remove();
            return Err(DialogError::Cancelled);
        }
    };

    surface.remove();
    slot.release(generation);

    if path.is_empty() {
        Err(DialogError::NoFileSelected)
    } else {
        Ok(PathBuf::from(path))
    }
}
