//! Chat flow integration tests
//!
//! Drive the chat service the way a long-poll transport would: connect
//! participants, submit messages, and poll their mailboxes.
//!
//! Run with: cargo test -p integration-tests --test chat_flow_tests

use std::sync::Arc;
use std::time::{Duration, Instant};

use chat_core::{ChatError, ChatEvent, ChatEventKind, Participant, RejectReason};
use chat_gateway::RegistryError;
use chat_service::ChatSubmission;
use integration_tests::{admin, test_config, user, TestChat};

// ============================================================================
// Submission Scenarios
// ============================================================================

#[tokio::test]
async fn test_hello_repeat_then_admin_wall() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();
    let b = chat.join(admin("b")).unwrap();
    let c = chat.join(user("c")).unwrap();

    chat.service
        .submit(&a.participant, ChatSubmission::new("hello"), chat.at(0))
        .unwrap();

    for client in [&a, &b, &c] {
        let batch = client.poll(Duration::from_millis(10)).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].event.kind(), ChatEventKind::Chat);
        assert_eq!(batch[0].event.sender_name(), a.participant.nickname());
        assert_eq!(batch[0].event.message(), "hello");
    }

    let history_before = chat.service.moderation().state_of(a.participant.id());
    let result = chat
        .service
        .submit(&a.participant, ChatSubmission::new("hello"), chat.at(1));
    assert_eq!(result, Err(ChatError::Rejected(RejectReason::Repeat).into()));
    assert_eq!(
        chat.service.moderation().state_of(a.participant.id()),
        history_before
    );
    for client in [&a, &b, &c] {
        assert!(client.mailbox.is_empty());
    }

    chat.service
        .submit(&b.participant, ChatSubmission::new("hello").as_wall(), chat.at(1))
        .unwrap();
    let batch = c.poll(Duration::from_millis(10)).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert!(batch[0].event.wall());
    assert!(batch[0].event.from_admin());
    assert_eq!(batch[0].event.message(), "hello");
}

#[tokio::test]
async fn test_second_message_too_fast_regardless_of_content() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();
    let now = Instant::now();

    chat.service
        .submit(&a.participant, ChatSubmission::new("first thing"), now)
        .unwrap();

    for text in ["something else entirely", "first thing", "ok"] {
        let result = chat.service.submit(
            &a.participant,
            ChatSubmission::new(text),
            now + Duration::from_millis(100),
        );
        assert_eq!(result, Err(ChatError::Rejected(RejectReason::TooFast).into()));
    }
}

#[tokio::test]
async fn test_all_caps_message_rejected() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();

    let result = chat.service.submit(
        &a.participant,
        ChatSubmission::new("WHY IS NOBODY ANSWERING"),
        chat.at(0),
    );
    assert_eq!(result, Err(ChatError::Rejected(RejectReason::Capslock).into()));
    assert!(a.mailbox.is_empty());
}

#[tokio::test]
async fn test_wall_from_non_admin_always_refused() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();
    let watcher = chat.join(user("w")).unwrap();

    let texts = ["hello", "SHOUTING VERY LOUDLY", "cheapgold for sale", "!!!!!!!!!!!!"];
    for (i, text) in texts.into_iter().enumerate() {
        let result = chat.service.submit(
            &a.participant,
            ChatSubmission::new(text).as_wall(),
            chat.at(i as u64),
        );
        assert_eq!(result, Err(ChatError::NotAdmin.into()), "text: {text}");
    }
    assert!(watcher.mailbox.is_empty());
}

#[tokio::test]
async fn test_global_chat_toggle() {
    let mut config = test_config();
    config.chat.global_chat_enabled = false;
    let chat = TestChat::new(&config);
    let a = chat.join(user("a")).unwrap();
    let b = chat.join(admin("b")).unwrap();

    assert_eq!(
        chat.service
            .submit(&a.participant, ChatSubmission::new("can anyone hear me"), chat.at(0)),
        Err(ChatError::NotAdmin.into())
    );
    chat.service
        .submit(&b.participant, ChatSubmission::new("only we can talk"), chat.at(0))
        .unwrap();

    chat.service.set_global_chat_enabled(true);
    chat.service
        .submit(&a.participant, ChatSubmission::new("can anyone hear me"), chat.at(1))
        .unwrap();

    assert_eq!(
        b.messages().await.unwrap(),
        vec!["only we can talk", "can anyone hear me"]
    );
}

// ============================================================================
// Dropped Messages
// ============================================================================

#[tokio::test]
async fn test_dropped_messages_only_reach_admins() {
    let chat = TestChat::new(&test_config());
    let spammer = chat.join(user("spammer")).unwrap();
    let users: Vec<_> = (0..3).map(|_| chat.join(user("u")).unwrap()).collect();
    let mods: Vec<_> = (0..2).map(|_| chat.join(admin("mod")).unwrap()).collect();

    let outcome = chat
        .service
        .submit(
            &spammer.participant,
            ChatSubmission::new("visit cheapgold dot example"),
            chat.at(0),
        )
        .unwrap();
    assert_eq!(outcome.recipients, mods.len());

    assert!(spammer.mailbox.is_empty());
    for client in &users {
        assert!(client.mailbox.is_empty());
    }
    for client in &mods {
        let batch = client.poll(Duration::from_millis(10)).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert!(batch[0].event.is_filtered());
    }
}

#[tokio::test]
async fn test_flooding_is_dropped_silently() {
    let chat = TestChat::new(&test_config());
    let flooder = chat.join(user("flooder")).unwrap();
    let bystander = chat.join(user("bystander")).unwrap();
    let moderator = chat.join(admin("mod")).unwrap();

    // Default flood limit is ten messages per thirty seconds.
    for n in 0..12u64 {
        let result = chat.service.submit(
            &flooder.participant,
            ChatSubmission::new(format!("note {n}")),
            chat.at(n),
        );
        assert!(result.is_ok(), "message {n}: {result:?}");
    }

    let seen = bystander.poll(Duration::from_millis(10)).await.unwrap();
    assert_eq!(seen.len(), 9);
    assert!(seen.iter().all(|d| d.event.kind() == ChatEventKind::Chat));

    let kinds: Vec<ChatEventKind> = moderator
        .poll(Duration::from_millis(10))
        .await
        .unwrap()
        .iter()
        .map(|d| d.event.kind())
        .collect();
    assert_eq!(kinds.len(), 12);
    assert_eq!(
        kinds.iter().filter(|k| **k == ChatEventKind::FilteredChat).count(),
        3
    );
}

#[tokio::test]
async fn test_promoted_participant_sees_filtered_chat() {
    let chat = TestChat::new(&test_config());
    let spammer = chat.join(user("spammer")).unwrap();
    let helper = chat.join(user("helper")).unwrap();

    chat.service
        .submit(&spammer.participant, ChatSubmission::new("cheapgold here"), chat.at(0))
        .unwrap();
    assert!(helper.mailbox.is_empty());

    helper.participant.set_admin(true);
    chat.service
        .submit(&spammer.participant, ChatSubmission::new("more cheapgold"), chat.at(1))
        .unwrap();

    let batch = helper.poll(Duration::from_millis(10)).await.unwrap();
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].event.message(), "more cheapgold");
}

// ============================================================================
// Long Polling
// ============================================================================

#[tokio::test]
async fn test_empty_poll_returns_after_timeout() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();

    let started = Instant::now();
    let batch = chat.service.poll(a.participant.id()).await.unwrap();
    let elapsed = started.elapsed();

    assert!(batch.is_empty());
    assert!(elapsed >= Duration::from_millis(50));
    assert!(elapsed < Duration::from_secs(2));
}

#[tokio::test]
async fn test_poll_returns_when_message_arrives() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();
    let b = chat.join(user("b")).unwrap();

    let service = Arc::clone(&chat.service);
    let sender = Arc::clone(&b.participant);
    let now = chat.at(0);
    let submitter = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        service.submit(&sender, ChatSubmission::new("ping"), now)
    });

    let started = Instant::now();
    let batch = chat
        .service
        .poll_for(a.participant.id(), Duration::from_secs(10))
        .await
        .unwrap();
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(batch.len(), 1);
    assert_eq!(batch[0].event.message(), "ping");
    submitter.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_disconnect_ends_pending_poll() {
    let chat = TestChat::new(&test_config());
    let a = chat.join(user("a")).unwrap();
    let id = a.participant.id();

    let service = Arc::clone(&chat.service);
    let poller = tokio::spawn(async move { service.poll_for(id, Duration::from_secs(10)).await });

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(chat.service.disconnect(id));

    let result = tokio::time::timeout(Duration::from_secs(5), poller)
        .await
        .unwrap()
        .unwrap();
    assert!(result.unwrap_err().is_disconnected());
    assert_eq!(
        a.mailbox.poll(Duration::from_millis(10)).await,
        Err(RegistryError::Disconnected)
    );
}

// ============================================================================
// Concurrency
// ============================================================================

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_late_joiners_see_a_contiguous_suffix() {
    let mut config = test_config();
    config.mailbox.capacity = 1024;
    let chat = TestChat::new(&config);
    let registry = Arc::clone(chat.service.registry());
    let sender = Participant::new("sender");

    let broadcaster = {
        let registry = Arc::clone(&registry);
        tokio::spawn(async move {
            for n in 0..200 {
                registry.broadcast_to_all(ChatEvent::chat(&sender, format!("tick {n}"), false, false));
                tokio::task::yield_now().await;
            }
        })
    };

    let joiners: Vec<_> = (0..8)
        .map(|i| {
            let service = Arc::clone(&chat.service);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(i)).await;
                service.connect(Arc::new(user("joiner"))).unwrap()
            })
        })
        .collect();

    let mailboxes: Vec<_> = futures::future::join_all(joiners)
        .await
        .into_iter()
        .map(Result::unwrap)
        .collect();
    broadcaster.await.unwrap();

    let last = registry.last_sequence();
    assert_eq!(last, 200);
    for mailbox in mailboxes {
        let seqs: Vec<u64> = mailbox
            .poll(Duration::from_millis(10))
            .await
            .unwrap()
            .iter()
            .map(|d| d.seq)
            .collect();
        // Whatever a joiner received must be every broadcast after it joined.
        if let Some(first) = seqs.first() {
            let expected: Vec<u64> = (*first..=last).collect();
            assert_eq!(seqs, expected);
        }
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_senders_each_keep_their_history() {
    let chat = TestChat::new(&test_config());
    let watcher = chat.join(admin("watcher")).unwrap();
    let senders: Vec<_> = (0..4).map(|_| chat.join(user("s")).unwrap()).collect();
    let base = chat.at(0);

    let tasks: Vec<_> = senders
        .iter()
        .map(|client| {
            let service = Arc::clone(&chat.service);
            let participant = Arc::clone(&client.participant);
            tokio::spawn(async move {
                for n in 0..5u64 {
                    let text = format!("update {n} from {}", participant.nickname());
                    service
                        .submit(&participant, ChatSubmission::new(text), base + Duration::from_secs(n))
                        .unwrap();
                }
            })
        })
        .collect();
    for result in futures::future::join_all(tasks).await {
        result.unwrap();
    }

    assert_eq!(watcher.messages().await.unwrap().len(), 20);
    assert_eq!(chat.service.moderation().tracked_count(), 4);
    for client in &senders {
        let state = chat
            .service
            .moderation()
            .state_of(client.participant.id())
            .unwrap();
        assert_eq!(state.history().count(), 5);
    }
}

// ============================================================================
// Wire Format
// ============================================================================

#[tokio::test]
async fn test_delivery_json_shape() {
    let chat = TestChat::new(&test_config());
    let boss = chat.join(admin("boss").id_code("ops")).unwrap();
    let a = chat.join(user("a")).unwrap();

    chat.service
        .submit(&boss.participant, ChatSubmission::new("maintenance at noon").as_wall(), chat.at(0))
        .unwrap();
    chat.service
        .submit(&a.participant, ChatSubmission::new("sounds good"), chat.at(0))
        .unwrap();

    let batch = a.poll(Duration::from_millis(10)).await.unwrap();
    let wall = serde_json::to_value(&batch[0]).unwrap();
    assert_eq!(wall["event"], "CHAT");
    assert_eq!(wall["seq"], 1);
    assert_eq!(wall["from"], boss.participant.nickname());
    assert_eq!(wall["id_code"], "ops");
    assert_eq!(wall["sigil"], "@");
    assert_eq!(wall["from_admin"], true);
    assert_eq!(wall["wall"], true);
    assert!(wall.get("emote").is_none());

    let plain = serde_json::to_value(&batch[1]).unwrap();
    assert_eq!(plain["seq"], 2);
    assert_eq!(plain["sigil"], "");
    assert!(plain.get("from_admin").is_none());
    assert!(plain.get("wall").is_none());
}
