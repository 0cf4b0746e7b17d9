mod support;

use crate::support::start_backend;
use calmverse::api::ChatApi;
use calmverse::flows::{ChatSession, Sender};

#[tokio::test]
async fn test_session_id_is_reused_across_messages() {
    let client = start_backend().await;
    let mut session = ChatSession::new("user-chat");

    assert!(session.send(&client, "I've been feeling anxious lately").await);
    let first = session.session_id().map(str::to_string).unwrap();
    assert!(first.starts_with("session-"));
    assert!(session
        .resources()
        .iter()
        .any(|r| r.name == "Anxiety Coping Tools"));

    // A reply without resources keeps the previous list
    assert!(session.send(&client, "Thanks").await);
    assert_eq!(session.session_id(), Some(first.as_str()));
    assert_eq!(session.resources().len(), 2);

    let senders: Vec<Sender> = session.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![Sender::System, Sender::User, Sender::Bot, Sender::User, Sender::Bot]
    );
}

#[tokio::test]
async fn test_crisis_message_marks_reply_as_emergency() {
    let client = start_backend().await;
    let mut session = ChatSession::new("user-crisis");

    assert!(session.send(&client, "Some days I want to die").await);
    let reply = session.messages().last().unwrap();
    assert_eq!(reply.sender, Sender::Bot);
    assert!(reply.emergency);
    assert!(!session.resources().is_empty());
}

#[tokio::test]
async fn test_restart_ends_server_session() {
    let client = start_backend().await;
    let mut session = ChatSession::new("user-restart");

    session.send(&client, "hello").await;
    let old = session.session_id().map(str::to_string).unwrap();

    session.restart(&client).await;
    assert_eq!(session.session_id(), None);
    assert_eq!(session.messages().len(), 1);

    let err = client.end_session(&old).await.unwrap_err();
    assert_eq!(err.detail(), Some(format!("Session with ID {} not found", old).as_str()));
}
