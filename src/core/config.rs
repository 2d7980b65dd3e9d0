//! Configuration for element construction and port enumeration
//!
//! This module provides the builder-style configuration consumed when a media
//! element is created and when ports are enumerated across many elements.

use crate::core::element::MediaElement;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Element type name used when none is configured
pub const DEFAULT_ELEMENT_TYPE: &str = "MediaElement";

/// Configuration for a single media element
#[derive(Debug, Clone)]
pub struct ElementConfig {
    /// Type name of the element, e.g. "PlayerEndpoint"
    pub element_type: String,
    /// Element this one belongs to, if any
    pub parent: Option<Arc<MediaElement>>,
    /// Construction parameters, stored as given
    pub params: BTreeMap<String, String>,
}

impl ElementConfig {
    /// Create a new element configuration with default values
    pub fn new() -> Self {
        Self {
            element_type: DEFAULT_ELEMENT_TYPE.to_string(),
            parent: None,
            params: BTreeMap::new(),
        }
    }

    /// Set the element type name
    pub fn with_element_type(mut self, element_type: &str) -> Self {
        self.element_type = element_type.to_string();
        self
    }

    /// Set the parent element
    pub fn with_parent(mut self, parent: Arc<MediaElement>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Add a construction parameter
    ///
    /// # Arguments
    /// * `name` - Parameter name; a previous value under this name is replaced
    /// * `value` - Parameter value, stored without validation
    pub fn with_param(mut self, name: &str, value: &str) -> Self {
        self.params.insert(name.to_string(), value.to_string());
        self
    }
}

impl Default for ElementConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Enumeration of supported modes for walking many elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerationMode {
    /// Elements are visited in order on the calling thread
    Sequential,
    /// Elements are visited concurrently using Rayon
    Rayon,
}

impl Default for EnumerationMode {
    fn default() -> Self {
        EnumerationMode::Sequential
    }
}

/// Configuration for registry-wide port enumeration
#[derive(Debug, Clone)]
pub struct EnumerationConfig {
    /// The mode used to visit elements
    pub mode: EnumerationMode,
    /// The size of a dedicated thread pool.
    /// Only relevant when mode is Rayon; `None` uses the global pool
    pub thread_pool_size: Option<usize>,
}

impl EnumerationConfig {
    /// Create a new configuration with default values
    ///
    /// Default configuration uses Sequential mode with no thread pool
    pub fn new() -> Self {
        Self {
            mode: EnumerationMode::default(),
            thread_pool_size: None,
        }
    }

    /// Set the enumeration mode
    ///
    /// # Arguments
    /// * `mode` - How registered elements are visited
    ///
    /// # Returns
    /// A new configuration with the specified mode
    pub fn with_mode(mut self, mode: EnumerationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the thread pool size for Rayon enumeration
    ///
    /// # Arguments
    /// * `size` - The number of threads in the dedicated pool
    ///
    /// # Returns
    /// A new configuration with the specified thread pool size
    ///
    /// # Note
    /// This setting only affects enumeration when mode is Rayon. The registry
    /// builds one pool per distinct size and reuses it across calls
    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }
}

impl Default for EnumerationConfig {
    fn default() -> Self {
        Self::new()
    }
}
