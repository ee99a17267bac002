use assert_matches::assert_matches;
use tokio::time::{timeout, Duration};
use uuid::Uuid;

use call_board_cell::*;

async fn recv_event(rx: &mut EventReceiver) -> ServerEvent {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("should receive an event within the timeout")
        .expect("broadcast channel should stay open")
}

#[tokio::test]
async fn test_every_subscriber_sees_accepted_changes_in_order() {
    let board = CallBoard::new(64);
    let conn = Uuid::new_v4();
    board
        .login(conn, "Helena".to_string(), "doctor".to_string())
        .await
        .unwrap();

    let mut rx_a = board.subscribe();
    let mut rx_b = board.subscribe();

    let patient = board
        .add_patient(conn, "Carla".to_string(), PatientPriority::Normal)
        .await
        .unwrap();
    board.call_patient(conn, &patient.id).await.unwrap();
    board
        .confirm_or_stop_call(conn, &patient.id, true)
        .await
        .unwrap();

    for rx in [&mut rx_a, &mut rx_b] {
        assert_matches!(recv_event(rx).await, ServerEvent::QueueUpdated(q) if q.len() == 1);
        assert_matches!(recv_event(rx).await, ServerEvent::QueueUpdated(q) if q.is_empty());
        assert_matches!(
            recv_event(rx).await,
            ServerEvent::PatientCalled(call) if call.patient.name == "Carla"
        );
        assert_matches!(recv_event(rx).await, ServerEvent::CallStopped);
        assert_matches!(recv_event(rx).await, ServerEvent::QueueUpdated(q) if q.is_empty());
    }
}

#[tokio::test]
async fn test_late_subscriber_only_sees_later_events() {
    let board = CallBoard::new(64);
    let conn = Uuid::new_v4();
    board
        .login(conn, "Helena".to_string(), "doctor".to_string())
        .await
        .unwrap();
    board
        .add_patient(conn, "Ana".to_string(), PatientPriority::Normal)
        .await
        .unwrap();

    // This receiver missed everything above; the snapshot covers the gap
    let mut rx = board.subscribe();
    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.patients.len(), 1);

    board
        .add_patient(conn, "Beto".to_string(), PatientPriority::Normal)
        .await
        .unwrap();
    assert_matches!(recv_event(&mut rx).await, ServerEvent::QueueUpdated(q) if q.len() == 2);
}

#[tokio::test]
async fn test_broadcast_without_subscribers_does_not_fail_actions() {
    let board = CallBoard::new(64);
    let conn = Uuid::new_v4();

    // No subscriber anywhere; mutations still succeed
    board
        .login(conn, "Helena".to_string(), "doctor".to_string())
        .await
        .unwrap();
    let patient = board
        .add_patient(conn, "Ana".to_string(), PatientPriority::High)
        .await
        .unwrap();
    board.call_patient(conn, &patient.id).await.unwrap();

    let snapshot = board.snapshot().await;
    assert!(snapshot.calling.is_some());
}

#[tokio::test]
async fn test_event_broadcaster_fanout() {
    let broadcaster = EventBroadcaster::new(16);
    assert_eq!(broadcaster.receiver_count(), 0);

    let mut rx_a = broadcaster.subscribe();
    let mut rx_b = broadcaster.subscribe();
    assert_eq!(broadcaster.receiver_count(), 2);

    broadcaster.send(ServerEvent::CallStopped);
    assert_matches!(recv_event(&mut rx_a).await, ServerEvent::CallStopped);
    assert_matches!(recv_event(&mut rx_b).await, ServerEvent::CallStopped);
}

#[tokio::test]
async fn test_snapshot_reflects_full_board_state() {
    let board = CallBoard::new(64);
    let conn = Uuid::new_v4();
    board
        .login(conn, "Helena".to_string(), "doctor".to_string())
        .await
        .unwrap();
    board
        .add_patient(conn, "Ana".to_string(), PatientPriority::Normal)
        .await
        .unwrap();
    let beto = board
        .add_patient(conn, "Beto".to_string(), PatientPriority::High)
        .await
        .unwrap();
    board.call_patient(conn, &beto.id).await.unwrap();
    board
        .update_video(
            conn,
            Some("https://www.youtube.com/playlist?list=PLsnapshot".to_string()),
        )
        .await
        .unwrap();

    let snapshot = board.snapshot().await;
    assert_eq!(snapshot.patients.len(), 1);
    assert_eq!(snapshot.patients[0].name, "Ana");
    assert_eq!(
        snapshot.calling.as_ref().map(|c| c.patient.name.as_str()),
        Some("Beto")
    );
    assert_eq!(
        snapshot.playlist_url.as_deref(),
        Some("https://www.youtube.com/embed/videoseries?list=PLsnapshot&autoplay=1&mute=1&loop=1")
    );
    assert_eq!(snapshot.professionals.len(), 1);
}
