use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use bounty_aggregator::application::app::{App, Application};
use bounty_aggregator::domain::models::{ChannelBounties, ALL_COUNTRIES_CODE};
use bounty_aggregator::infrastructure::memory::InMemoryStore;
use tokio::sync::broadcast;
use tokio::time::{sleep, Instant};

const SNAPSHOT: &str = r#"{
    "actions": [
        {
            "public_id": "a1",
            "channel_id": 10,
            "country_alpha2": "KE",
            "transaction_type": "p2p",
            "bounty_is_open": true,
            "bounty_amount": 100
        },
        {
            "public_id": "a2",
            "channel_id": 20,
            "country_alpha2": "NG",
            "transaction_type": "airtime",
            "bounty_is_open": false,
            "bounty_amount": 50
        },
        {
            "public_id": "a3",
            "channel_id": 30,
            "country_alpha2": "ET",
            "transaction_type": "bill",
            "bounty_is_open": false,
            "bounty_amount": 75
        }
    ],
    "transactions": [
        {
            "uuid": "t1",
            "action_id": "a2",
            "status": "succeeded",
            "initiated_at": "2022-09-01T10:00:00Z"
        }
    ],
    "channels": [
        {"id": 10, "name": "M-PESA", "country_alpha2": "KE"},
        {"id": 20, "name": "Airtel", "country_alpha2": "NG"},
        {"id": 30, "name": "CBE Birr", "country_alpha2": "ET"}
    ]
}"#;

// Listener tasks drain the notifier channels independently, so poll until
// the expected number of channels shows up on the board.
async fn wait_for_board(app: &App<InMemoryStore>, want: usize) -> Vec<ChannelBounties> {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        let board = app.get_channel_bounties(None).await.unwrap();
        if board.len() == want && board.iter().all(|cb| !cb.bounties.is_empty()) {
            return board;
        }
        assert!(Instant::now() < deadline, "sync never populated the store");
        sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn syncs_a_snapshot_and_serves_the_bounty_board() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{SNAPSHOT}").unwrap();

    let app = Arc::new(App::new());
    let (shutdown, _) = broadcast::channel(1);

    let path = file.path().to_str().unwrap().to_string();
    let app_clone = app.clone();
    let shutdown_clone = shutdown.clone();
    let sync_handle = tokio::spawn(async move {
        app_clone
            .run_sync(
                &path,
                Duration::from_millis(100),
                1,
                shutdown_clone,
            )
            .await
    });

    let board = wait_for_board(&app, 2).await;

    // a1 is open by flag, a2 is open by execution count, a3 is closed with
    // no attempts so channel 30 is absent from the board.
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].channel.id, 10);
    assert_eq!(board[0].bounties[0].action.public_id, "a1");
    assert_eq!(board[0].bounties[0].transaction_count(), 0);
    assert_eq!(board[1].channel.id, 20);
    assert_eq!(board[1].bounties[0].transaction_count(), 1);

    let filtered = app
        .get_channel_bounties(Some("NG".to_string()))
        .await
        .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].channel.id, 20);

    let everything = app
        .get_channel_bounties(Some(ALL_COUNTRIES_CODE.to_string()))
        .await
        .unwrap();
    assert_eq!(everything.len(), 2);

    let mut rx = app.get_country_list();
    assert_eq!(rx.recv().await.unwrap(), vec!["00", "ET", "KE", "NG"]);
    assert!(rx.recv().await.is_none());

    shutdown.send(()).unwrap();
    sync_handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn repeated_sync_rounds_do_not_double_count() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{SNAPSHOT}").unwrap();

    let app = Arc::new(App::new());
    let (shutdown, _) = broadcast::channel(1);

    let path = file.path().to_str().unwrap().to_string();
    let app_clone = app.clone();
    let shutdown_clone = shutdown.clone();
    let sync_handle = tokio::spawn(async move {
        app_clone
            .run_sync(&path, Duration::from_millis(20), 1, shutdown_clone)
            .await
    });

    wait_for_board(&app, 2).await;

    // Let several rounds re-deliver the same snapshot.
    sleep(Duration::from_millis(200)).await;

    let board = app.get_channel_bounties(None).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].bounties.len(), 1);
    assert_eq!(board[1].bounties.len(), 1);
    assert_eq!(board[1].bounties[0].transaction_count(), 1);

    shutdown.send(()).unwrap();
    sync_handle.await.unwrap().unwrap();
}
