use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Element identifier carrying the element type name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId {
    pub(crate) id: String,
    pub(crate) element_type: String,
}

impl ElementId {
    /// Create an element ID from an externally assigned id
    pub fn new(id: String, element_type: String) -> Self {
        Self { id, element_type }
    }

    /// Generate a fresh, unique element ID for the given type
    pub fn generate(element_type: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            element_type: element_type.to_string(),
        }
    }

    /// Get the raw ID string
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the element type name
    pub fn element_type(&self) -> &str {
        &self.element_type
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// Identity of a single port instance.
///
/// A recreated port never reuses the id of the port it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PortId(Uuid);

impl PortId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for PortId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Media carried by a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MediaType {
    Audio,
    Video,
    /// Known on the wire, but elements expose no ports for it
    Data,
}

impl MediaType {
    /// Media types that elements expose ports for, in enumeration order
    pub const SUPPORTED: [MediaType; 2] = [MediaType::Audio, MediaType::Video];

    /// Check if elements expose ports for this media type
    pub fn is_supported(&self) -> bool {
        matches!(self, MediaType::Audio | MediaType::Video)
    }

    /// Wire representation of this media type
    pub fn to_wire(&self) -> i32 {
        match self {
            MediaType::Audio => 0,
            MediaType::Video => 1,
            MediaType::Data => 2,
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaType::Audio => write!(f, "audio"),
            MediaType::Video => write!(f, "video"),
            MediaType::Data => write!(f, "data"),
        }
    }
}

impl TryFrom<i32> for MediaType {
    type Error = MediaTypeError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MediaType::Audio),
            1 => Ok(MediaType::Video),
            2 => Ok(MediaType::Data),
            other => Err(MediaTypeError(other)),
        }
    }
}

/// Wire value that does not name any media type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MediaTypeError(pub i32);

impl std::fmt::Display for MediaTypeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown media type value: {}", self.0)
    }
}

impl std::error::Error for MediaTypeError {}

/// Direction of a port relative to its element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortDirection {
    /// Produces media out of the element
    Source,
    /// Consumes media into the element
    Sink,
}

impl PortDirection {
    pub fn opposite(&self) -> PortDirection {
        match self {
            PortDirection::Source => PortDirection::Sink,
            PortDirection::Sink => PortDirection::Source,
        }
    }

    /// Check if a port of this direction can feed a port of the other direction
    pub fn can_connect_to(&self, other: &PortDirection) -> bool {
        matches!((self, other), (PortDirection::Source, PortDirection::Sink))
    }
}

impl std::fmt::Display for PortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortDirection::Source => write!(f, "source"),
            PortDirection::Sink => write!(f, "sink"),
        }
    }
}

/// Serializable snapshot of a port handed to the service layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortDescriptor {
    pub port_id: PortId,
    pub element_id: ElementId,
    pub direction: PortDirection,
    pub media_type: MediaType,
}
