// Tests for MediaElement port caching and enumeration
#[cfg(test)]
mod tests {
    use crate::core::config::ElementConfig;
    use crate::core::element::MediaElement;
    use crate::core::tests::init_logger;
    use crate::core::types::{ElementId, MediaType, PortDirection};
    use std::sync::Arc;

    fn element() -> Arc<MediaElement> {
        init_logger();
        MediaElement::new(ElementConfig::new().with_element_type("PassThrough"))
    }

    #[test]
    fn test_repeated_requests_share_one_port() {
        let element = element();

        let h1 = element.get_or_create_audio_source();
        let h2 = element.get_or_create_audio_source();

        assert!(Arc::ptr_eq(&h1, &h2), "Held port should be returned again");
        assert_eq!(h1.id(), h2.id());
        assert_eq!(element.port_stats().created, 1);
    }

    #[test]
    fn test_released_port_is_recreated() {
        let element = element();

        let h1 = element.get_or_create_audio_source();
        let h2 = element.get_or_create_audio_source();
        assert!(Arc::ptr_eq(&h1, &h2));
        let first_id = h1.id();
        drop(h1);
        drop(h2);

        assert!(element.cached_port(PortDirection::Source, MediaType::Audio).is_none(), "Slot should be stale");

        let h3 = element.get_or_create_audio_source();
        assert_ne!(h3.id(), first_id, "Recreated port must be a new instance");
        assert_eq!(element.port_stats().created, 2);
    }

    #[test]
    fn test_each_slot_has_its_own_port() {
        let element = element();

        let audio_source = element.get_or_create_audio_source();
        let video_source = element.get_or_create_video_source();
        let audio_sink = element.get_or_create_audio_sink();
        let video_sink = element.get_or_create_video_sink();

        let ports = [&audio_source, &video_source, &audio_sink, &video_sink];
        for (i, a) in ports.iter().enumerate() {
            for b in ports.iter().skip(i + 1) {
                assert!(!Arc::ptr_eq(a, b));
            }
        }

        assert_eq!((audio_source.direction(), audio_source.media_type()), (PortDirection::Source, MediaType::Audio));
        assert_eq!((video_source.direction(), video_source.media_type()), (PortDirection::Source, MediaType::Video));
        assert_eq!((audio_sink.direction(), audio_sink.media_type()), (PortDirection::Sink, MediaType::Audio));
        assert_eq!((video_sink.direction(), video_sink.media_type()), (PortDirection::Sink, MediaType::Video));
        assert_eq!(element.port_stats().live, 4);
    }

    #[test]
    fn test_get_or_create_matches_named_accessors() {
        let element = element();

        let by_name = element.get_or_create_video_sink();
        let by_slot = element.get_or_create(PortDirection::Sink, MediaType::Video).unwrap();
        assert!(Arc::ptr_eq(&by_name, &by_slot));

        assert!(element.get_or_create(PortDirection::Source, MediaType::Data).is_none());
        assert!(element.get_or_create(PortDirection::Sink, MediaType::Data).is_none());
        assert_eq!(element.port_stats().created, 1);
    }

    #[test]
    fn test_sources_in_audio_video_order() {
        let element = element();

        let sources = element.sources();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].media_type(), MediaType::Audio);
        assert_eq!(sources[1].media_type(), MediaType::Video);
        assert!(sources.iter().all(|port| port.is_source()));

        let sinks = element.sinks();
        assert_eq!(sinks.len(), 2);
        assert_eq!(sinks[0].media_type(), MediaType::Audio);
        assert_eq!(sinks[1].media_type(), MediaType::Video);
        assert!(sinks.iter().all(|port| port.is_sink()));
    }

    #[test]
    fn test_enumeration_reuses_held_ports() {
        let element = element();

        let video = element.get_or_create_video_source();
        let sources = element.sources();

        assert!(Arc::ptr_eq(&sources[1], &video));
        assert_eq!(element.port_stats().created, 2, "Only the audio source should be created");
    }

    #[test]
    fn test_type_filtered_enumeration() {
        let element = element();

        let video = element.sources_of_type(MediaType::Video);
        assert_eq!(video.len(), 1);
        assert_eq!(video[0].direction(), PortDirection::Source);
        assert_eq!(video[0].media_type(), MediaType::Video);

        let audio = element.sinks_of_type(MediaType::Audio);
        assert_eq!(audio.len(), 1);
        assert_eq!(audio[0].direction(), PortDirection::Sink);
        assert_eq!(audio[0].media_type(), MediaType::Audio);

        assert!(element.sources_of_type(MediaType::Data).is_empty());
        assert!(element.sinks_of_type(MediaType::Data).is_empty());
    }

    #[test]
    fn test_peek_never_creates() {
        let element = element();

        assert!(element.cached_port(PortDirection::Sink, MediaType::Audio).is_none());
        assert!(element.cached_port(PortDirection::Sink, MediaType::Data).is_none());
        assert_eq!(element.port_stats().created, 0);

        let sink = element.get_or_create_audio_sink();
        let peeked = element.cached_port(PortDirection::Sink, MediaType::Audio).unwrap();
        assert!(Arc::ptr_eq(&sink, &peeked));
    }

    #[test]
    fn test_port_keeps_element_alive() {
        let element = element();
        let weak_element = Arc::downgrade(&element);

        let port = element.get_or_create_video_source();
        drop(element);

        assert!(weak_element.upgrade().is_some(), "Port must keep its element alive");
        assert_eq!(port.element().element_type(), "PassThrough");

        drop(port);
        assert!(weak_element.upgrade().is_none(), "Element and port must not form a cycle");
    }

    #[test]
    fn test_element_does_not_keep_ports_alive() {
        let element = element();

        let port = element.get_or_create_audio_sink();
        let weak_port = Arc::downgrade(&port);
        drop(port);

        assert!(weak_port.upgrade().is_none());
        assert_eq!(element.port_stats().live, 0);
    }

    #[test]
    fn test_element_construction() {
        init_logger();
        let pipeline = MediaElement::new(ElementConfig::new().with_element_type("MediaPipeline"));
        let id = ElementId::new("player-1".to_string(), "PlayerEndpoint".to_string());
        let player = MediaElement::with_id(
            id.clone(),
            ElementConfig::new()
                .with_parent(Arc::clone(&pipeline))
                .with_param("uri", "http://example.com/video.webm"),
        );

        assert_eq!(player.id(), &id);
        assert_eq!(player.element_type(), "PlayerEndpoint");
        assert!(Arc::ptr_eq(player.parent().unwrap(), &pipeline));
        assert_eq!(player.param("uri"), Some("http://example.com/video.webm"));
        assert_eq!(player.param("missing"), None);
        assert!(pipeline.parent().is_none());
        assert_ne!(pipeline.id(), player.id());
    }

    #[test]
    fn test_port_identity_and_compatibility() {
        let upstream = element();
        let downstream = element();

        let source = upstream.get_or_create_video_source();
        let sink = downstream.get_or_create_video_sink();
        let audio_sink = downstream.get_or_create_audio_sink();
        let own_sink = upstream.get_or_create_video_sink();

        assert_eq!(source.element_id(), upstream.id());
        assert!(source.can_connect_to(&sink));
        assert!(!sink.can_connect_to(&source));
        assert!(!source.can_connect_to(&audio_sink));
        assert!(!source.can_connect_to(&own_sink));

        let descriptor = source.descriptor();
        assert_eq!(descriptor.port_id, source.id());
        assert_eq!(&descriptor.element_id, upstream.id());
        assert_eq!(descriptor.direction, PortDirection::Source);
        assert_eq!(descriptor.media_type, MediaType::Video);
    }
}
