//! End-to-end tests of the request/response contract over a real WebSocket.

use std::time::Duration;

use pokestat_relay::config::HandlerMode;
use pokestat_relay::stats::KeyStyle;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

mod common;

const NO_DELAY: Duration = Duration::from_millis(0);

#[tokio::test]
async fn test_base_stats_scenario() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 1, "name": "Pikachu"}),
    )
    .await;

    assert_eq!(
        reply,
        json!({
            "requestId": 1,
            "type": "baseStatsResponse",
            "name": "Pikachu",
            "data": {
                "hp": 35,
                "attack": 55,
                "defense": 40,
                "special_attack": 50,
                "special_defense": 50,
                "speed": 90
            }
        })
    );

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_camel_case_deployment() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let mut config = common::relay_config(provider);
    config.handlers.key_style = KeyStyle::Camel;
    let relay = common::start_relay(config).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 7, "name": "  PIKACHU  "}),
    )
    .await;

    let data = reply["data"].as_object().unwrap();
    assert_eq!(data["specialAttack"], 50);
    assert!(!data.contains_key("special_attack"));
    assert_eq!(reply["name"], "  PIKACHU  ");

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_not_found_scenario() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 2, "name": "NotARealMon"}),
    )
    .await;

    assert_eq!(
        reply,
        json!({
            "requestId": 2,
            "type": "error",
            "message": "Pokemon \"NotARealMon\" not found"
        })
    );

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_hold_items_ignores_battle_type() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let singles = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 3, "name": "Snorlax", "battleType": "singles"}),
    )
    .await;
    let doubles = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 4, "name": "Snorlax", "battleType": "doubles"}),
    )
    .await;

    let expected = json!([
        { "item": "Leftovers", "justification": "Provides passive healing each turn" },
        { "item": "Choice Scarf", "justification": "Increases speed but locks into one move" }
    ]);
    assert_eq!(singles["requestId"], 3);
    assert_eq!(singles["type"], "holdItemsResponse");
    assert_eq!(singles["name"], "Snorlax");
    assert_eq!(singles["data"], expected);
    assert_eq!(doubles["data"], expected);

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_ev_profile_live_and_stubbed() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;

    let live = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(live.local_addr()).await;
    let reply = common::request(
        &mut ws,
        json!({"type": "evProfile", "requestId": 5, "name": "snorlax", "trainer": "Red"}),
    )
    .await;
    assert_eq!(reply["type"], "evProfileResponse");
    assert_eq!(reply["data"], json!({"hp": 2, "special_defense": 0}));
    live.stop().await.unwrap();

    let mut config = common::relay_config(provider);
    config.handlers.ev_profile = HandlerMode::Stubbed;
    let stubbed = common::start_relay(config).await;
    let mut ws = common::connect(stubbed.local_addr()).await;
    let reply = common::request(
        &mut ws,
        json!({"type": "evProfile", "requestId": 6, "name": "NotARealMon", "trainer": "Red"}),
    )
    .await;
    assert_eq!(reply["type"], "evProfileResponse");
    assert_eq!(
        reply["data"],
        json!({"HP": 252, "Attack": 0, "Defense": 0, "SpecialAttack": 252, "SpecialDefense": 4, "Speed": 0})
    );
    stubbed.stop().await.unwrap();
}

#[tokio::test]
async fn test_unknown_type_echoes_request_id() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "basestats", "requestId": "abc-123", "name": "Pikachu"}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"requestId": "abc-123", "type": "error", "message": "Invalid request type"})
    );

    let reply = common::request(&mut ws, json!({"requestId": 8.5})).await;
    assert_eq!(
        reply,
        json!({"requestId": 8.5, "type": "error", "message": "Invalid request type"})
    );

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_malformed_frame_and_connection_survives() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    common::send_text(&mut ws, "this is not json").await;
    let reply = common::next_reply(&mut ws).await;
    assert_eq!(reply, json!({"type": "error", "message": "Invalid JSON Payload"}));

    let reply = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 10, "name": "Snorlax"}),
    )
    .await;
    assert_eq!(reply["type"], "holdItemsResponse");
    assert_eq!(reply["requestId"], 10);

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_binary_frames_are_decoded() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    use futures_util::SinkExt;
    let payload = json!({"type": "holdItems", "requestId": 11, "name": "Snorlax"}).to_string();
    ws.send(Message::Binary(payload.into_bytes().into())).await.unwrap();

    let reply = common::next_reply(&mut ws).await;
    assert_eq!(reply["requestId"], 11);
    assert_eq!(reply["type"], "holdItemsResponse");

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_invalid_utf8_binary_frame_is_malformed() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    use futures_util::SinkExt;
    ws.send(Message::Binary(vec![0x7b, 0xff, 0xfe, 0x7d].into()))
        .await
        .unwrap();

    let reply = common::next_reply(&mut ws).await;
    assert_eq!(reply, json!({"type": "error", "message": "Invalid JSON Payload"}));

    let reply = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 15, "name": "Snorlax"}),
    )
    .await;
    assert_eq!(reply["requestId"], 15);

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_name_echoed_as_received() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 1, "name": 25}),
    )
    .await;
    assert_eq!(reply["type"], "holdItemsResponse");
    assert_eq!(reply["name"], json!(25));

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 2, "name": 25}),
    )
    .await;
    assert_eq!(
        reply,
        json!({"requestId": 2, "type": "error", "message": "Pokemon \"\" not found"})
    );

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_provider_failures_become_error_replies() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 12, "name": "broken"}),
    )
    .await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["requestId"], 12);
    assert!(reply["message"]
        .as_str()
        .unwrap()
        .starts_with("invalid provider response"));
    assert!(reply.get("data").is_none());

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_provider() {
    // Bind and drop to get a port nothing listens on.
    let closed = {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let relay = common::start_relay(common::relay_config(closed)).await;
    let mut ws = common::connect(relay.local_addr()).await;

    let reply = common::request(
        &mut ws,
        json!({"type": "baseStats", "requestId": 13, "name": "Pikachu"}),
    )
    .await;
    assert_eq!(reply["type"], "error");
    assert_eq!(reply["requestId"], 13);
    assert!(!reply["message"].as_str().unwrap().is_empty());

    let reply = common::request(
        &mut ws,
        json!({"type": "holdItems", "requestId": 14, "name": "Pikachu"}),
    )
    .await;
    assert_eq!(reply["type"], "holdItemsResponse");

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_health_endpoints() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let base = format!("http://{}", relay.local_addr());
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let banner = client.get(&base).send().await.unwrap();
    assert_eq!(banner.status(), 200);
    assert_eq!(banner.text().await.unwrap(), "Pokemon stat relay is running.");

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");
    assert_eq!(
        health["request_types"],
        json!(["baseStats", "evProfile", "holdItems"])
    );

    relay.stop().await.unwrap();
}

#[tokio::test]
async fn test_stop_closes_open_connections() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let relay = common::start_relay(common::relay_config(provider)).await;
    let addr = relay.local_addr();
    let mut ws = common::connect(addr).await;

    relay.stop().await.unwrap();

    use futures_util::StreamExt;
    let next = tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("connection should be closed promptly");
    assert!(matches!(next, None | Some(Ok(Message::Close(_))) | Some(Err(_))));
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

async fn health(client: &reqwest::Client, addr: std::net::SocketAddr) -> serde_json::Value {
    client
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_connection_counts_are_per_server() {
    let provider = common::start_mock_pokeapi(NO_DELAY).await;
    let busy = common::start_relay(common::relay_config(provider)).await;
    let idle = common::start_relay(common::relay_config(provider)).await;
    let client = reqwest::Client::builder().no_proxy().build().unwrap();

    let mut first = common::connect(busy.local_addr()).await;
    let mut second = common::connect(busy.local_addr()).await;
    // A reply on each proves both connections are being served.
    for ws in [&mut first, &mut second] {
        let reply = common::request(ws, json!({"type": "holdItems", "requestId": 1})).await;
        assert_eq!(reply["type"], "holdItemsResponse");
    }

    assert_eq!(health(&client, busy.local_addr()).await["active_connections"], 2);
    assert_eq!(health(&client, idle.local_addr()).await["active_connections"], 0);

    busy.stop().await.unwrap();
    idle.stop().await.unwrap();
}
