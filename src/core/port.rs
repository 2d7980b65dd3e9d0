use crate::core::element::MediaElement;
use crate::core::types::{ElementId, MediaType, PortDescriptor, PortDirection, PortId};
use log::trace;
use std::sync::Arc;

/// A typed, directional endpoint of a media element.
///
/// Ports are only built by the element's port cache. A port holds its element
/// strongly, so the element outlives every reachable port; the element only
/// keeps a weak reference back.
pub struct MediaPort {
    id: PortId,
    owner: Arc<MediaElement>,
    direction: PortDirection,
    media_type: MediaType,
}

impl MediaPort {
    pub(crate) fn new(owner: Arc<MediaElement>, direction: PortDirection, media_type: MediaType) -> Self {
        Self {
            id: PortId::generate(),
            owner,
            direction,
            media_type,
        }
    }

    pub fn id(&self) -> PortId {
        self.id
    }

    /// Get the element that created this port
    pub fn element(&self) -> &Arc<MediaElement> {
        &self.owner
    }

    pub fn element_id(&self) -> &ElementId {
        self.owner.id()
    }

    pub fn direction(&self) -> PortDirection {
        self.direction
    }

    pub fn media_type(&self) -> MediaType {
        self.media_type
    }

    pub fn is_source(&self) -> bool {
        self.direction == PortDirection::Source
    }

    pub fn is_sink(&self) -> bool {
        self.direction == PortDirection::Sink
    }

    /// Check if this port could feed `other` in a media graph.
    ///
    /// Only a source can feed a sink of the same media type on a different
    /// element. Nothing is connected here.
    pub fn can_connect_to(&self, other: &MediaPort) -> bool {
        self.direction.can_connect_to(&other.direction)
            && self.media_type == other.media_type
            && !Arc::ptr_eq(&self.owner, &other.owner)
    }

    /// Snapshot of this port for the service layer
    pub fn descriptor(&self) -> PortDescriptor {
        PortDescriptor {
            port_id: self.id,
            element_id: self.owner.id().clone(),
            direction: self.direction,
            media_type: self.media_type,
        }
    }
}

impl std::fmt::Debug for MediaPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaPort")
            .field("id", &self.id)
            .field("element", self.owner.id())
            .field("direction", &self.direction)
            .field("media_type", &self.media_type)
            .finish()
    }
}

impl std::fmt::Display for MediaPort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} port of {}", self.media_type, self.direction, self.owner.id())
    }
}

impl Drop for MediaPort {
    fn drop(&mut self) {
        trace!("Releasing {} {} port {} of element {}", self.media_type, self.direction, self.id, self.owner.id());
    }
}
