use livecast_core::{HubEvent, RoomId};

use crate::integration::{create_service, init_tracing};
use crate::utils::FakeConnection;

#[tokio::test]
async fn test_disconnect_notifies_every_room() {
    init_tracing();

    let service = create_service();
    let host = FakeConnection::connect(&service);
    let mut viewer_a = FakeConnection::connect(&service);
    let mut viewer_b = FakeConnection::connect(&service);

    host.join(&service, "R1", true);
    host.join(&service, "R2", true);
    viewer_a.join(&service, "R1", false);
    viewer_b.join(&service, "R2", false);
    viewer_a.drain();
    viewer_b.drain();

    service.disconnect(&host.id);

    let left = HubEvent::UserLeft {
        connection_id: host.id.clone(),
    };
    assert_eq!(viewer_a.drain(), vec![left.clone()]);
    assert_eq!(viewer_b.drain(), vec![left]);
    assert_eq!(service.peer_count(), 2);
    assert_eq!(
        service.room_members(&RoomId::parse("R1").unwrap()),
        vec![viewer_a.id.clone()]
    );
}

#[tokio::test]
async fn test_last_disconnect_removes_room() {
    init_tracing();

    let service = create_service();
    let host = FakeConnection::connect(&service);
    host.join(&service, "R1", true);
    assert_eq!(service.room_count(), 1);

    service.disconnect(&host.id);

    assert_eq!(service.room_count(), 0);
    assert_eq!(service.peer_count(), 0);
}
