use ascii_models::{ensure_absolute, AnimationRegistry, AnimationSpec, StreamerError};
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

pub type Frames = Arc<Vec<String>>;

#[derive(Default)]
struct Lru {
    entries: HashMap<PathBuf, Frames>,
    // Most recently used at the back.
    order: VecDeque<PathBuf>,
}

impl Lru {
    fn touch(&mut self, path: &Path) {
        if let Some(pos) = self.order.iter().position(|p| p == path) {
            if let Some(p) = self.order.remove(pos) {
                self.order.push_back(p);
            }
        }
    }

    fn insert(&mut self, path: PathBuf, frames: Frames, capacity: usize) {
        if capacity == 0 {
            return;
        }
        if self.entries.insert(path.clone(), frames).is_some() {
            self.touch(&path);
            return;
        }
        self.order.push_back(path);
        while self.order.len() > capacity {
            if let Some(evicted) = self.order.pop_front() {
                debug!("Evicting frames for {}", evicted.display());
                self.entries.remove(&evicted);
            }
        }
    }
}

/// Parsed animation assets, cached by absolute path.
pub struct FrameStore {
    capacity: usize,
    cache: Mutex<Lru>,
}

impl FrameStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            cache: Mutex::new(Lru::default()),
        }
    }

    /// Frames of a registered animation; a relative `json_path` is reported
    /// under the animation's name.
    pub async fn load_animation(&self, anim: &AnimationSpec) -> Result<Frames, StreamerError> {
        ensure_absolute(anim)?;
        self.load(&anim.json_path).await
    }

    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn load(&self, path: &Path) -> Result<Frames, StreamerError> {
        {
            let mut cache = self.cache.lock().await;
            if let Some(frames) = cache.entries.get(path).cloned() {
                cache.touch(path);
                return Ok(frames);
            }
        }

        let frames = Arc::new(read_frames(path).await?);
        debug!("Loaded {} frames", frames.len());

        let mut cache = self.cache.lock().await;
        cache.insert(path.to_path_buf(), frames.clone(), self.capacity);
        Ok(frames)
    }

    pub async fn clear(&self) {
        let mut cache = self.cache.lock().await;
        cache.entries.clear();
        cache.order.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Preloads every registered animation. Failures are logged, not fatal.
    pub async fn warm(&self, registry: &AnimationRegistry) {
        self.clear().await;
        for anim in registry.iter() {
            match self.load_animation(anim).await {
                Ok(frames) => info!(
                    animation = %anim.name,
                    frames = frames.len(),
                    "Animation warmed"
                ),
                Err(e) => warn!(animation = %anim.name, "Failed to warm animation: {}", e),
            }
        }
    }
}

async fn read_frames(path: &Path) -> Result<Vec<String>, StreamerError> {
    let display = path.display().to_string();
    if !path.is_absolute() {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| display.clone());
        return Err(StreamerError::NonAbsolutePath {
            name,
            path: display,
        });
    }

    let raw = match tokio::fs::read(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(StreamerError::AssetNotFound { path: display })
        }
        Err(e) => return Err(StreamerError::Io(e)),
    };

    let invalid = |reason: String| StreamerError::InvalidAsset {
        path: display.clone(),
        reason,
    };

    let value: serde_json::Value =
        serde_json::from_slice(&raw).map_err(|e| invalid(e.to_string()))?;

    let items = match value {
        serde_json::Value::Array(items) if !items.is_empty() => items,
        _ => {
            return Err(invalid(
                "JSON must be a non-empty list of frames (strings)".to_string(),
            ))
        }
    };

    items
        .into_iter()
        .enumerate()
        .map(|(i, item)| match item {
            serde_json::Value::String(s) => Ok(s),
            _ => Err(invalid(format!("Frame #{} is not a string", i))),
        })
        .collect()
}
