use livecast_core::{PeerId, Role, SessionDescription, SignalingMessage};
use livecast_peer::NegotiationStage;

use crate::integration::{create_test_manager, init_tracing};
use crate::utils::ResourceCall;

#[tokio::test]
async fn test_answer_without_offer_is_rejected() {
    init_tracing();

    let mut t = create_test_manager("host1", Role::Host);
    let viewer = PeerId::from("viewer1");

    t.manager
        .on_signal(SignalingMessage::Answer {
            remote_id: viewer.clone(),
            description: SessionDescription::answer("stray"),
        })
        .await;

    // The session is created lazily but the answer is not applied.
    let session = t.manager.session(&viewer).expect("lazily created session");
    assert_eq!(session.stage(), NegotiationStage::New);
    assert!(session.remote_description().is_none());
    assert!(t.factory.calls_for(&viewer).await.is_empty());
}

#[tokio::test]
async fn test_second_answer_is_not_applied() {
    init_tracing();

    let mut t = create_test_manager("host1", Role::Host);
    let viewer = PeerId::from("viewer1");
    t.manager.on_peer_joined(viewer.clone()).await;

    let first = SessionDescription::answer("first");
    for description in [first.clone(), SessionDescription::answer("second")] {
        t.manager
            .on_signal(SignalingMessage::Answer {
                remote_id: viewer.clone(),
                description,
            })
            .await;
    }

    let session = t.manager.session(&viewer).unwrap();
    assert_eq!(session.stage(), NegotiationStage::Stable);
    assert_eq!(session.remote_description(), Some(&first));
    assert_eq!(
        t.factory.calls_for(&viewer).await,
        vec![
            ResourceCall::CreateOffer(viewer.clone()),
            ResourceCall::SetRemote(viewer.clone(), first),
        ]
    );
}

#[tokio::test]
async fn test_rejoin_after_stable_renegotiates() {
    init_tracing();

    let mut t = create_test_manager("host1", Role::Host);
    let viewer = PeerId::from("viewer1");
    t.manager.on_peer_joined(viewer.clone()).await;
    t.manager
        .on_signal(SignalingMessage::Answer {
            remote_id: viewer.clone(),
            description: SessionDescription::answer("D2"),
        })
        .await;

    t.manager.on_peer_joined(viewer.clone()).await;

    assert_eq!(
        t.manager.session(&viewer).unwrap().stage(),
        NegotiationStage::OfferSent
    );
    assert_eq!(t.signaling.offers_for(&viewer).await.len(), 2);
}
