use crate::core::config::{EnumerationConfig, EnumerationMode};
use crate::core::element::MediaElement;
use crate::core::port::MediaPort;
use crate::core::types::{ElementId, MediaType, MediaTypeError, PortDescriptor, PortDirection};
use log::{debug, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Error types for registry operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// An element with this ID is already registered
    DuplicateElement(ElementId),
    /// No element is registered under this ID
    ElementNotFound(String),
    /// The wire media type value could not be decoded
    InvalidMediaType(i32),
}

impl std::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryError::DuplicateElement(id) => write!(f, "Element with ID '{}' already exists", id),
            RegistryError::ElementNotFound(id) => write!(f, "Element not found: {}", id),
            RegistryError::InvalidMediaType(value) => write!(f, "Invalid media type: {}", value),
        }
    }
}

impl std::error::Error for RegistryError {}

impl From<MediaTypeError> for RegistryError {
    fn from(err: MediaTypeError) -> Self {
        RegistryError::InvalidMediaType(err.0)
    }
}

/// Maps element IDs received from the service layer to live elements.
///
/// Elements are keyed by their raw ID string, so one raw ID names at most one
/// element regardless of its type. The registry holds elements strongly; an
/// element stays alive until it is removed and every port referring to it is
/// released.
pub struct ElementRegistry {
    elements: RwLock<BTreeMap<String, Arc<MediaElement>>>,
    /// Dedicated Rayon pools, one per requested size
    pools: Mutex<HashMap<usize, Arc<ThreadPool>>>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self {
            elements: RwLock::new(BTreeMap::new()),
            pools: Mutex::new(HashMap::new()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, Arc<MediaElement>>> {
        self.elements.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Arc<MediaElement>>> {
        self.elements.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an element
    pub fn register(&self, element: Arc<MediaElement>) -> Result<(), RegistryError> {
        let mut elements = self.write();
        let id = element.id().clone();

        if let Some(existing) = elements.get(id.id()) {
            warn!(
                "Rejecting {} element {}, ID already used by a {}",
                id.element_type(),
                id,
                existing.element_type()
            );
            return Err(RegistryError::DuplicateElement(id));
        }

        debug!("Registered {} element {}", id.element_type(), id);
        elements.insert(id.id().to_string(), element);
        Ok(())
    }

    /// Get an element by ID, `None` if the raw ID belongs to another type
    pub fn get(&self, id: &ElementId) -> Option<Arc<MediaElement>> {
        self.read()
            .get(id.id())
            .filter(|element| element.id() == id)
            .cloned()
    }

    /// Get an element by its raw ID string, as received over the wire
    pub fn find(&self, id: &str) -> Option<Arc<MediaElement>> {
        self.read().get(id).cloned()
    }

    /// Remove an element by ID
    pub fn remove(&self, id: &ElementId) -> Option<Arc<MediaElement>> {
        let mut elements = self.write();
        if elements.get(id.id()).map_or(true, |element| element.id() != id) {
            return None;
        }

        debug!("Removed element {}", id);
        elements.remove(id.id())
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Get all element IDs, ordered by raw ID
    pub fn element_ids(&self) -> Vec<ElementId> {
        self.read().values().map(|element| element.id().clone()).collect()
    }

    /// Get all elements of the given type name
    pub fn elements_of_type(&self, element_type: &str) -> Vec<Arc<MediaElement>> {
        self.read()
            .values()
            .filter(|element| element.element_type() == element_type)
            .cloned()
            .collect()
    }

    /// Get the source ports of a wire media type on the element with raw ID `id`
    pub fn source_ports_of_type(&self, id: &str, media_type: i32) -> Result<Vec<Arc<MediaPort>>, RegistryError> {
        self.ports_of_type(id, PortDirection::Source, media_type)
    }

    /// Get the sink ports of a wire media type on the element with raw ID `id`
    pub fn sink_ports_of_type(&self, id: &str, media_type: i32) -> Result<Vec<Arc<MediaPort>>, RegistryError> {
        self.ports_of_type(id, PortDirection::Sink, media_type)
    }

    /// Like `source_ports_of_type`, returning snapshots instead of handles
    pub fn sources_of_type(&self, id: &str, media_type: i32) -> Result<Vec<PortDescriptor>, RegistryError> {
        let ports = self.source_ports_of_type(id, media_type)?;
        Ok(ports.iter().map(|port| port.descriptor()).collect())
    }

    /// Like `sink_ports_of_type`, returning snapshots instead of handles
    pub fn sinks_of_type(&self, id: &str, media_type: i32) -> Result<Vec<PortDescriptor>, RegistryError> {
        let ports = self.sink_ports_of_type(id, media_type)?;
        Ok(ports.iter().map(|port| port.descriptor()).collect())
    }

    fn ports_of_type(
        &self,
        id: &str,
        direction: PortDirection,
        media_type: i32,
    ) -> Result<Vec<Arc<MediaPort>>, RegistryError> {
        let media_type = MediaType::try_from(media_type)?;
        let element = self
            .find(id)
            .ok_or_else(|| RegistryError::ElementNotFound(id.to_string()))?;

        Ok(match direction {
            PortDirection::Source => element.sources_of_type(media_type),
            PortDirection::Sink => element.sinks_of_type(media_type),
        })
    }

    /// Get the source ports of every registered element, ordered by raw element ID
    pub fn all_sources(&self, config: &EnumerationConfig) -> Vec<Arc<MediaPort>> {
        self.all_ports(config, PortDirection::Source)
    }

    /// Get the sink ports of every registered element, ordered by raw element ID
    pub fn all_sinks(&self, config: &EnumerationConfig) -> Vec<Arc<MediaPort>> {
        self.all_ports(config, PortDirection::Sink)
    }

    fn all_ports(&self, config: &EnumerationConfig, direction: PortDirection) -> Vec<Arc<MediaPort>> {
        // Snapshot so no registry lock is held while element locks are taken
        let elements: Vec<Arc<MediaElement>> = self.read().values().cloned().collect();
        let ports_of = |element: &Arc<MediaElement>| match direction {
            PortDirection::Source => element.sources(),
            PortDirection::Sink => element.sinks(),
        };

        match config.mode {
            EnumerationMode::Sequential => elements.iter().flat_map(ports_of).collect(),
            EnumerationMode::Rayon => {
                let enumerate = || -> Vec<Arc<MediaPort>> {
                    elements.par_iter().flat_map_iter(ports_of).collect()
                };

                match config.thread_pool_size.and_then(|size| self.pool(size)) {
                    Some(pool) => pool.install(enumerate),
                    None => enumerate(),
                }
            }
        }
    }

    /// Get the dedicated pool of `size` threads, building it on first use.
    ///
    /// Returns `None` if the pool cannot be built; callers fall back to the
    /// global pool.
    fn pool(&self, size: usize) -> Option<Arc<ThreadPool>> {
        let mut pools = self.pools.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pool) = pools.get(&size) {
            return Some(Arc::clone(pool));
        }

        match ThreadPoolBuilder::new().num_threads(size).build() {
            Ok(pool) => {
                debug!("Built enumeration thread pool with {} threads", size);
                let pool = Arc::new(pool);
                pools.insert(size, Arc::clone(&pool));
                Some(pool)
            }
            Err(err) => {
                warn!("Failed to build {} thread pool, using global pool: {}", size, err);
                None
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn pool_count(&self) -> usize {
        self.pools.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Panic on another thread while holding the element map for writing
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let result = scope
                .spawn(|| {
                    let _elements = self.write();
                    panic!("poisoning element registry");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(self.elements.is_poisoned());
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}
