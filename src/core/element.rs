use crate::core::config::ElementConfig;
use crate::core::port::MediaPort;
use crate::core::port_cache::{PortCache, PortCacheStats, PortSlot};
use crate::core::types::{ElementId, MediaType, PortDirection};
use log::debug;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A pipeline node exposing at most one source and one sink port per
/// supported media type.
///
/// Elements only exist behind an `Arc`: every port operation takes
/// `self: &Arc<Self>` so a new port can always take a strong reference to its
/// element. Ports are created lazily and reclaimed once nobody outside the
/// element holds them.
pub struct MediaElement {
    id: ElementId,
    parent: Option<Arc<MediaElement>>,
    params: BTreeMap<String, String>,
    ports: PortCache,
}

impl MediaElement {
    /// Create a new element with a freshly generated ID
    pub fn new(config: ElementConfig) -> Arc<Self> {
        let id = ElementId::generate(&config.element_type);
        Self::with_id(id, config)
    }

    /// Create a new element with an externally assigned ID.
    ///
    /// The type name stored in `id` takes precedence over the configured one.
    pub fn with_id(id: ElementId, config: ElementConfig) -> Arc<Self> {
        debug!("Creating {} element {}", id.element_type(), id);
        Arc::new(Self {
            id,
            parent: config.parent,
            params: config.params,
            ports: PortCache::new(),
        })
    }

    pub fn id(&self) -> &ElementId {
        &self.id
    }

    pub fn element_type(&self) -> &str {
        self.id.element_type()
    }

    pub fn parent(&self) -> Option<&Arc<MediaElement>> {
        self.parent.as_ref()
    }

    /// Get a construction parameter by name
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    pub fn get_or_create_audio_source(self: &Arc<Self>) -> Arc<MediaPort> {
        self.ports.get_or_create(self, PortSlot::AUDIO_SOURCE)
    }

    pub fn get_or_create_video_source(self: &Arc<Self>) -> Arc<MediaPort> {
        self.ports.get_or_create(self, PortSlot::VIDEO_SOURCE)
    }

    pub fn get_or_create_audio_sink(self: &Arc<Self>) -> Arc<MediaPort> {
        self.ports.get_or_create(self, PortSlot::AUDIO_SINK)
    }

    pub fn get_or_create_video_sink(self: &Arc<Self>) -> Arc<MediaPort> {
        self.ports.get_or_create(self, PortSlot::VIDEO_SINK)
    }

    /// Get the live port for a direction and media type, creating it if needed.
    ///
    /// Returns `None` only when `media_type` is not supported by elements.
    pub fn get_or_create(self: &Arc<Self>, direction: PortDirection, media_type: MediaType) -> Option<Arc<MediaPort>> {
        PortSlot::of(direction, media_type).map(|slot| self.ports.get_or_create(self, slot))
    }

    /// Get the audio and video source ports, in that order.
    ///
    /// Missing ports are created as a side effect.
    pub fn sources(self: &Arc<Self>) -> Vec<Arc<MediaPort>> {
        self.ports_of(PortDirection::Source)
    }

    /// Get the audio and video sink ports, in that order.
    ///
    /// Missing ports are created as a side effect.
    pub fn sinks(self: &Arc<Self>) -> Vec<Arc<MediaPort>> {
        self.ports_of(PortDirection::Sink)
    }

    /// Get the source port for `media_type`; empty for unsupported media types
    pub fn sources_of_type(self: &Arc<Self>, media_type: MediaType) -> Vec<Arc<MediaPort>> {
        self.get_or_create(PortDirection::Source, media_type).into_iter().collect()
    }

    /// Get the sink port for `media_type`; empty for unsupported media types
    pub fn sinks_of_type(self: &Arc<Self>, media_type: MediaType) -> Vec<Arc<MediaPort>> {
        self.get_or_create(PortDirection::Sink, media_type).into_iter().collect()
    }

    fn ports_of(self: &Arc<Self>, direction: PortDirection) -> Vec<Arc<MediaPort>> {
        PortSlot::all(direction)
            .into_iter()
            .map(|slot| self.ports.get_or_create(self, slot))
            .collect()
    }

    /// Get the cached port if it is still alive, without creating one
    pub fn cached_port(&self, direction: PortDirection, media_type: MediaType) -> Option<Arc<MediaPort>> {
        PortSlot::of(direction, media_type).and_then(|slot| self.ports.peek(slot))
    }

    pub fn port_stats(&self) -> PortCacheStats {
        self.ports.stats()
    }

    #[cfg(test)]
    pub(crate) fn poison_port_cache(&self) {
        self.ports.poison()
    }
}

impl std::fmt::Debug for MediaElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaElement")
            .field("id", &self.id)
            .field("parent", &self.parent.as_ref().map(|parent| parent.id()))
            .field("params", &self.params)
            .finish()
    }
}

impl std::fmt::Display for MediaElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id.element_type(), self.id)
    }
}
