use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use kagami_config::Config;
use kagami_config::network::NetworkConfig;
use kagami_config::ui::UiConfig;
use kagami_types::{AppEvent, ConnectionStatus, ContainerKind, ViewCommand};
use kanal::AsyncReceiver;
use tokio::time::timeout;

use crate::events::event_loop;
use crate::state::AppState;

fn test_state(transcript_dir: Option<PathBuf>) -> Arc<AppState> {
    let config = Config {
        network: NetworkConfig {
            page_url: "http://localhost:8095/".to_string(),
        },
        ui: UiConfig::new(),
        transcript_dir,
    };
    Arc::new(AppState::new(config))
}

async fn next_command(rx: &AsyncReceiver<ViewCommand>) -> ViewCommand {
    match timeout(Duration::from_secs(2), rx.recv()).await {
        Ok(Ok(command)) => command,
        Ok(Err(e)) => panic!("view channel error: {}", e),
        Err(_) => panic!("timed out waiting for a view command"),
    }
}

#[tokio::test]
async fn test_frame_flows_through_to_the_presenter() {
    let (io_tx, io_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let loop_task = tokio::spawn(event_loop(test_state(None), io_rx, ui_tx));

    let frame = r#"{"type":"raw_text","section":"P1","timestamp":1000,"text":"hi","confidence":0.9}"#;
    io_tx
        .send(AppEvent::Frame(frame.to_string()))
        .await
        .expect("send frame");

    match next_command(&ui_rx).await {
        ViewCommand::Apply(update) => {
            assert_eq!(update.container, ContainerKind::RawTexts);
            assert!(update.created);
            assert!(update.body.contains("hi"));
        }
        other => panic!("expected Apply, got {:?}", other),
    }

    loop_task.abort();
}

#[tokio::test]
async fn test_status_change_reaches_the_presenter_as_text() {
    let (io_tx, io_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let loop_task = tokio::spawn(event_loop(test_state(None), io_rx, ui_tx));

    io_tx
        .send(AppEvent::Status(ConnectionStatus::Connected))
        .await
        .expect("send status");

    match next_command(&ui_rx).await {
        ViewCommand::SetStatus(text) => assert_eq!(text, "Connected"),
        other => panic!("expected SetStatus, got {:?}", other),
    }

    loop_task.abort();
}

#[tokio::test]
async fn test_bad_frames_do_not_stall_the_loop() {
    let (io_tx, io_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let loop_task = tokio::spawn(event_loop(test_state(None), io_rx, ui_tx));

    for bad in [
        "not json at all",
        r#"{"type":"raw_text","timestamp":1000}"#,
        r#"{"type":"someday_maybe","timestamp":1000}"#,
    ] {
        io_tx
            .send(AppEvent::Frame(bad.to_string()))
            .await
            .expect("send frame");
    }

    let good = r#"{"type":"output_text","section":"P1","timestamp":1000,"text":"still here"}"#;
    io_tx
        .send(AppEvent::Frame(good.to_string()))
        .await
        .expect("send frame");

    // The dropped frames produce nothing; the first command out
    // belongs to the good frame.
    match next_command(&ui_rx).await {
        ViewCommand::Apply(update) => {
            assert_eq!(update.container, ContainerKind::OutputTexts);
            assert!(update.body.contains("still here"));
        }
        other => panic!("expected Apply, got {:?}", other),
    }

    loop_task.abort();
}

#[tokio::test]
async fn test_output_log_eviction_is_reported_downstream() {
    let (io_tx, io_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let loop_task = tokio::spawn(event_loop(test_state(None), io_rx, ui_tx));

    let mut first_node = None;

    for i in 1..=201u64 {
        let frame = format!(
            r#"{{"type":"output_text","section":"P1","timestamp":{},"text":"msg{}"}}"#,
            1000 + i,
            i
        );
        io_tx
            .send(AppEvent::Frame(frame))
            .await
            .expect("send frame");

        match next_command(&ui_rx).await {
            ViewCommand::Apply(update) => {
                if i == 1 {
                    first_node = Some(update.node);
                }
                if i <= 200 {
                    assert_eq!(update.evicted, None, "no eviction expected at {}", i);
                } else {
                    assert_eq!(update.evicted, first_node, "oldest entry should fall off");
                }
            }
            other => panic!("expected Apply, got {:?}", other),
        }
    }

    loop_task.abort();
}

#[tokio::test]
async fn test_snapshot_style_replay_lands_in_order() {
    let (io_tx, io_rx) = kanal::bounded_async(16);
    let (ui_tx, ui_rx) = kanal::bounded_async(16);
    let loop_task = tokio::spawn(event_loop(test_state(None), io_rx, ui_tx));

    // The snapshot loader feeds plain frames, oldest first, exactly
    // like the live socket does. Interleave a live-looking frame after
    // the replay and check arrival order end to end.
    for text in ["old1", "old2", "live"] {
        let frame = format!(
            r#"{{"type":"output_text","section":"P1","timestamp":1000,"text":"{}"}}"#,
            text
        );
        io_tx
            .send(AppEvent::Frame(frame))
            .await
            .expect("send frame");
    }

    for expected in ["old1", "old2", "live"] {
        match next_command(&ui_rx).await {
            ViewCommand::Apply(update) => assert!(update.body.contains(expected)),
            other => panic!("expected Apply, got {:?}", other),
        }
    }

    loop_task.abort();
}
