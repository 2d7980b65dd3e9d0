pub mod core;

// Re-export commonly used types
pub use crate::core::config::{ElementConfig, EnumerationConfig, EnumerationMode};
pub use crate::core::element::MediaElement;
pub use crate::core::port::MediaPort;
pub use crate::core::port_cache::PortCacheStats;
pub use crate::core::registry::{ElementRegistry, RegistryError};
pub use crate::core::types::{ElementId, MediaType, MediaTypeError, PortDescriptor, PortDirection, PortId};
