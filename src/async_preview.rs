// Background preview rendering with caching, polled from the synchronous TUI loop

use crate::domain::Item;
use crate::error::Result;
use crate::preview::{generate_preview, PreviewContent};
use std::collections::{HashMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;

/// Maximum number of cached previews
const CACHE_SIZE: usize = 10;

/// Preview loading state for the item on screen
#[derive(Debug, Clone)]
pub enum PreviewState {
    Loading,
    Ready(PreviewContent),
    /// The file could not be read or decoded
    Broken(String),
    /// Rendering itself went wrong; says nothing about the file
    Failed(String),
}

/// Previews depend on the area they were fitted to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PreviewKey {
    path: PathBuf,
    width: u16,
    height: u16,
}

/// LRU-like cache for previews
#[derive(Debug)]
struct PreviewCache {
    entries: HashMap<PreviewKey, PreviewContent>,
    /// Most recently used at the back
    access_order: VecDeque<PreviewKey>,
    max_size: usize,
}

impl PreviewCache {
    fn new(max_size: usize) -> Self {
        Self {
            entries: HashMap::new(),
            access_order: VecDeque::new(),
            max_size,
        }
    }

    fn get(&mut self, key: &PreviewKey) -> Option<PreviewContent> {
        let preview = self.entries.get(key)?.clone();
        self.touch(key);
        Some(preview)
    }

    fn insert(&mut self, key: PreviewKey, preview: PreviewContent) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
        } else {
            if self.entries.len() >= self.max_size {
                if let Some(oldest) = self.access_order.pop_front() {
                    self.entries.remove(&oldest);
                }
            }
            self.access_order.push_back(key.clone());
        }
        self.entries.insert(key, preview);
    }

    fn touch(&mut self, key: &PreviewKey) {
        self.access_order.retain(|k| k != key);
        self.access_order.push_back(key.clone());
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Renders previews on a blocking worker so large images never stall input.
///
/// The TUI calls `request_preview` every frame; the first call for a new item
/// (or a new area size) starts a render, later calls pick up the result.
pub struct SyncPreviewManager {
    runtime: Runtime,
    cache: PreviewCache,
    current: Option<PreviewKey>,
    current_state: PreviewState,
    pending: Option<JoinHandle<Result<PreviewContent>>>,
}

impl SyncPreviewManager {
    pub fn new() -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("mswp-preview")
            .build()?;

        Ok(Self {
            runtime,
            cache: PreviewCache::new(CACHE_SIZE),
            current: None,
            current_state: PreviewState::Loading,
            pending: None,
        })
    }

    /// Request a preview for an item, returns current state (non-blocking)
    pub fn request_preview(&mut self, item: &Item, width: u16, height: u16) -> &PreviewState {
        let key = PreviewKey {
            path: item.path.clone(),
            width,
            height,
        };

        if self.current.as_ref() != Some(&key) {
            // A stale render keeps running but its result is dropped
            self.pending = None;
            self.current = Some(key.clone());

            if let Some(cached) = self.cache.get(&key) {
                self.current_state = PreviewState::Ready(cached);
                return &self.current_state;
            }

            self.current_state = PreviewState::Loading;
            let item = item.clone();
            self.pending = Some(
                self.runtime
                    .spawn_blocking(move || generate_preview(&item, width, height)),
            );
        }

        self.poll();
        &self.current_state
    }

    /// Returns the broken-file reason if the item at `path` failed to render,
    /// and forgets it so the next item starts fresh.
    pub fn take_broken(&mut self, path: &Path) -> Option<String> {
        let is_current = self.current.as_ref().map(|k| k.path.as_path()) == Some(path);
        if !is_current {
            return None;
        }

        match self.current_state {
            PreviewState::Broken(ref reason) => {
                let reason = reason.clone();
                self.reset();
                Some(reason)
            }
            _ => None,
        }
    }

    pub fn current_state(&self) -> &PreviewState {
        &self.current_state
    }

    /// Forget the item on screen (e.g. after a decision)
    pub fn reset(&mut self) {
        self.current = None;
        self.current_state = PreviewState::Loading;
        self.pending = None;
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    fn poll(&mut self) {
        let finished = matches!(self.pending, Some(ref handle) if handle.is_finished());
        if !finished {
            return;
        }

        let Some(handle) = self.pending.take() else {
            return;
        };

        self.current_state = match self.runtime.block_on(handle) {
            Ok(Ok(preview)) => {
                if let Some(key) = self.current.clone() {
                    self.cache.insert(key, preview.clone());
                }
                PreviewState::Ready(preview)
            }
            Ok(Err(e)) => PreviewState::Broken(e.to_string()),
            Err(e) => {
                tracing::error!(error = %e, "preview task failed");
                PreviewState::Failed(format!("Preview task failed: {}", e))
            }
        };
    }
}
