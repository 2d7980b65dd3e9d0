use crate::core::element::MediaElement;
use crate::core::port::MediaPort;
use crate::core::types::{MediaType, PortDirection};
use log::{debug, trace};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

const SLOT_COUNT: usize = 4;

/// One (direction, media type) cell of the cache.
///
/// Only supported media types have a slot, so holding a `PortSlot` proves the
/// combination is valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PortSlot {
    direction: PortDirection,
    media_type: MediaType,
}

impl PortSlot {
    pub(crate) const AUDIO_SOURCE: PortSlot = PortSlot::new(PortDirection::Source, MediaType::Audio);
    pub(crate) const VIDEO_SOURCE: PortSlot = PortSlot::new(PortDirection::Source, MediaType::Video);
    pub(crate) const AUDIO_SINK: PortSlot = PortSlot::new(PortDirection::Sink, MediaType::Audio);
    pub(crate) const VIDEO_SINK: PortSlot = PortSlot::new(PortDirection::Sink, MediaType::Video);

    const fn new(direction: PortDirection, media_type: MediaType) -> Self {
        Self { direction, media_type }
    }

    /// Look up the slot for a combination, `None` for unsupported media types
    pub(crate) fn of(direction: PortDirection, media_type: MediaType) -> Option<PortSlot> {
        media_type
            .is_supported()
            .then(|| PortSlot::new(direction, media_type))
    }

    /// Slots of one direction in enumeration order (audio, then video)
    pub(crate) fn all(direction: PortDirection) -> [PortSlot; 2] {
        MediaType::SUPPORTED.map(|media_type| PortSlot::new(direction, media_type))
    }

    fn index(&self) -> usize {
        let direction = match self.direction {
            PortDirection::Source => 0,
            PortDirection::Sink => 2,
        };
        let media_type = match self.media_type {
            MediaType::Audio => 0,
            // Data never reaches a slot, see `PortSlot::of`
            MediaType::Video | MediaType::Data => 1,
        };
        direction + media_type
    }
}

/// Port cache statistics for monitoring and debugging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortCacheStats {
    /// Number of ports ever constructed by this cache
    pub created: u64,
    /// Number of slots currently referring to a live port
    pub live: usize,
}

/// Lazily populated per-element port storage.
///
/// Each slot holds a weak reference, so the cache never keeps a port alive.
/// A single lock serializes the check-and-create sequence for all slots.
pub(crate) struct PortCache {
    slots: Mutex<[Weak<MediaPort>; SLOT_COUNT]>,
    created: AtomicU64,
}

impl PortCache {
    pub(crate) fn new() -> Self {
        Self {
            slots: Mutex::new(std::array::from_fn(|_| Weak::new())),
            created: AtomicU64::new(0),
        }
    }

    // Slots only hold weak references, so a panic while locked leaves nothing
    // half-updated and the poison flag can be ignored.
    fn lock_slots(&self) -> MutexGuard<'_, [Weak<MediaPort>; SLOT_COUNT]> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the live port for `slot`, creating and caching one if the slot
    /// is empty or stale. `owner` must be the element holding this cache.
    pub(crate) fn get_or_create(&self, owner: &Arc<MediaElement>, slot: PortSlot) -> Arc<MediaPort> {
        let mut slots = self.lock_slots();
        let cached = &mut slots[slot.index()];

        if let Some(port) = cached.upgrade() {
            trace!("Port cache hit for {} {} on element {}", slot.media_type, slot.direction, owner.id());
            return port;
        }

        trace!("Port cache miss for {} {} on element {}", slot.media_type, slot.direction, owner.id());
        let port = Arc::new(MediaPort::new(Arc::clone(owner), slot.direction, slot.media_type));
        *cached = Arc::downgrade(&port);
        self.created.fetch_add(1, Ordering::Relaxed);

        debug!("Created {} {} port {} for element {}", slot.media_type, slot.direction, port.id(), owner.id());
        port
    }

    /// Return the cached port for `slot` if it is still alive, never creating one
    pub(crate) fn peek(&self, slot: PortSlot) -> Option<Arc<MediaPort>> {
        self.lock_slots()[slot.index()].upgrade()
    }

    pub(crate) fn stats(&self) -> PortCacheStats {
        let live = self
            .lock_slots()
            .iter()
            .filter(|cached| cached.strong_count() > 0)
            .count();

        PortCacheStats {
            created: self.created.load(Ordering::Relaxed),
            live,
        }
    }

    /// Panic on another thread while holding the slot lock
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|scope| {
            let result = scope
                .spawn(|| {
                    let _slots = self.lock_slots();
                    panic!("poisoning port cache");
                })
                .join();
            assert!(result.is_err());
        });
        assert!(self.slots.is_poisoned());
    }
}
