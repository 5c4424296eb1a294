use std::thread;

/// Creates named threads for background work.
pub trait NamedThreadCreator: Send + Sync {
    /// Returns a thread builder for a thread with the given name.
    fn create_thread_with_name(&self, name: &str) -> thread::Builder;
}

/// Names threads "{prefix}-{name}".
#[derive(Clone, Debug)]
pub struct PrefixedThreadCreator {
    prefix: String,
}

impl PrefixedThreadCreator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }
}

impl Default for PrefixedThreadCreator {
    fn default() -> Self {
        Self::new("scanpager")
    }
}

impl NamedThreadCreator for PrefixedThreadCreator {
    fn create_thread_with_name(&self, name: &str) -> thread::Builder {
        thread::Builder::new().name(format!("{}-{}", self.prefix, name))
    }
}
