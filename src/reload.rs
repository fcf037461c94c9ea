use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use crate::error::ResourceError;
use crate::resources::read_shader;

fn hash_source(source: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    source.hash(&mut hasher);
    hasher.finish()
}

/// Watches a fragment shader file for edits by re-reading it every few ticks and comparing a hash
/// of its contents against the last version that was handed out.
pub struct ShaderWatcher {
    path: PathBuf,
    last_hash: Option<u64>,
    interval_ticks: u32,
    ticks_since_check: u32,
}

impl ShaderWatcher {
    /// Watch `path`, checking once every `interval_ticks` ticks. A zero interval disables polling.
    pub fn new(path: PathBuf, interval_ticks: u32) -> Self {
        Self {
            path,
            last_hash: None,
            interval_ticks,
            ticks_since_check: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remember `source` as the version currently in use.
    pub fn mark_loaded(&mut self, source: &str) {
        self.last_hash = Some(hash_source(source));
    }

    /// Read the file now, whether or not a check is due, and remember it as loaded so the next
    /// check doesn't hand out the same source again.
    pub fn read_now(&mut self) -> Result<String, ResourceError> {
        let source = read_shader(&self.path)?;
        self.mark_loaded(&source);
        Ok(source)
    }

    /// Count a tick, and if a check is due return the file contents when they differ from what
    /// was last loaded. Read errors are returned so the caller can report them.
    pub fn tick(&mut self) -> Option<Result<String, ResourceError>> {
        if self.interval_ticks == 0 {
            return None;
        }

        self.ticks_since_check += 1;
        if self.ticks_since_check < self.interval_ticks {
            return None;
        }
        self.ticks_since_check = 0;

        match read_shader(&self.path) {
            Ok(source) => self.changed(source).map(Ok),
            Err(err) => Some(Err(err)),
        }
    }

    /// Return `source` if it differs from the last loaded version.
    pub fn changed(&mut self, source: String) -> Option<String> {
        let hash = hash_source(&source);
        if self.last_hash == Some(hash) {
            None
        }
        else {
            // Remember it even if it turns out not to compile, so a broken file is only
            // reported once rather than on every check.
            self.last_hash = Some(hash);
            Some(source)
        }
    }
}
