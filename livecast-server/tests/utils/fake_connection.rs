use livecast_core::{HubEvent, HubRequest, PeerId};
use livecast_server::SignalingService;
use tokio::sync::mpsc;

/// A connection registered with the service, without a socket in between.
pub struct FakeConnection {
    pub id: PeerId,
    pub rx: mpsc::UnboundedReceiver<HubEvent>,
}

impl FakeConnection {
    /// Connects and consumes the `Welcome`.
    pub fn connect(service: &SignalingService) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = service.connect(tx);

        match rx.try_recv() {
            Ok(HubEvent::Welcome { connection_id, .. }) => assert_eq!(connection_id, id),
            other => panic!("expected Welcome, got {other:?}"),
        }

        Self { id, rx }
    }

    pub fn send(&self, service: &SignalingService, request: HubRequest) {
        service.handle_request(&self.id, request);
    }

    pub fn join(&self, service: &SignalingService, room: &str, is_host: bool) {
        self.send(
            service,
            HubRequest::JoinRoom {
                room_id: room.to_string(),
                is_host,
            },
        );
    }

    /// Everything delivered so far.
    pub fn drain(&mut self) -> Vec<HubEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
