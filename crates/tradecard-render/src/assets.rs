//! Item identifier → icon lookup.
//!
//! An identifier such as `"King Doot"` is lowercased and probed as
//! `king doot.png`, `king doot.gif`, `king_doot.png`, `king_doot.gif` in that
//! order. The first regular file that exists wins. Nothing found is not an
//! error; the item is drawn as text instead.

use std::path::{Path, PathBuf};

use tradecard_core::frame::FrameBuffer;

use crate::image_loader;

/// Supported icon extensions, in probe order.
pub const ASSET_EXTENSIONS: [&str; 2] = ["png", "gif"];

/// A file that backs an item identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetHandle {
    path: PathBuf,
}

impl AssetHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A decoded icon, every frame already scaled to the cell size.
#[derive(Debug, Clone)]
pub struct Asset {
    frames: Vec<FrameBuffer>,
}

impl Asset {
    /// Build an asset from decoded frames. Returns None for an empty sequence.
    pub fn from_frames(frames: Vec<FrameBuffer>) -> Option<Self> {
        if frames.is_empty() {
            None
        } else {
            Some(Self { frames })
        }
    }

    /// Number of source frames. Always at least 1.
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// The frame shown at timeline position `index`. Shorter animations wrap,
    /// so they loop faster than the shared timeline.
    pub fn frame_at(&self, index: usize) -> &FrameBuffer {
        &self.frames[index % self.frames.len()]
    }
}

/// Resolves identifiers against one asset directory.
#[derive(Debug, Clone)]
pub struct AssetResolver {
    root: PathBuf,
}

impl AssetResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File names tried for `identifier`, in priority order.
    pub fn candidates(identifier: &str) -> Vec<String> {
        let base = identifier.to_lowercase();
        let underscored = base.replace(' ', "_");

        let mut stems = vec![base];
        if underscored != stems[0] {
            stems.push(underscored);
        }

        stems
            .iter()
            .flat_map(|stem| ASSET_EXTENSIONS.iter().map(move |ext| format!("{}.{}", stem, ext)))
            .collect()
    }

    /// Locate the file backing `identifier`, if any.
    pub fn resolve(&self, identifier: &str) -> Option<AssetHandle> {
        if !is_plain_name(identifier) {
            tracing::debug!("Identifier {:?} is not a plain file name; no asset", identifier);
            return None;
        }

        let found = Self::candidates(identifier)
            .into_iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file());

        match &found {
            Some(path) => tracing::debug!("Resolved {:?} to {}", identifier, path.display()),
            None => tracing::debug!("No asset for {:?} under {}", identifier, self.root.display()),
        }
        found.map(|path| AssetHandle { path })
    }

    /// Number of frames in the asset. Decode failures count as a single frame
    /// so the layout stays stable.
    pub fn frame_count(&self, handle: &AssetHandle) -> usize {
        match image_loader::load_frames(handle.path()) {
            Ok(frames) => frames.len().max(1),
            Err(e) => {
                tracing::warn!("Treating {} as a still image: {}", handle.path().display(), e);
                1
            }
        }
    }

    /// Decode an asset and scale every frame to `cell_size` square.
    ///
    /// Falls back to a still decode when the animation cannot be read.
    /// Returns None when the file cannot be decoded at all.
    pub fn load(&self, handle: &AssetHandle, cell_size: u32) -> Option<Asset> {
        let path = handle.path();
        let frames = match image_loader::load_frames(path) {
            Ok(frames) => frames,
            Err(e) => {
                tracing::warn!("Animated decode failed for {}: {}", path.display(), e);
                match image_loader::load_image(path) {
                    Ok(still) => vec![still],
                    Err(e) => {
                        tracing::warn!("Falling back to text for {}: {}", path.display(), e);
                        return None;
                    }
                }
            }
        };

        let mut scaled = Vec::with_capacity(frames.len());
        for frame in &frames {
            match image_loader::resize_exact(frame, cell_size, cell_size) {
                Ok(fb) => scaled.push(fb),
                Err(e) => {
                    tracing::warn!("Could not scale {}: {}", path.display(), e);
                    return None;
                }
            }
        }
        Asset::from_frames(scaled)
    }

    /// Resolve and load in one step.
    pub fn lookup(&self, identifier: &str, cell_size: u32) -> Option<Asset> {
        self.resolve(identifier)
            .and_then(|handle| self.load(&handle, cell_size))
    }
}

// Identifiers come from users; keep them inside the asset directory.
fn is_plain_name(identifier: &str) -> bool {
    !identifier.trim().is_empty()
        && !identifier.contains(['/', '\\', '\0'])
        && identifier != "."
        && identifier != ".."
}
