use std::time::{Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use pokestat_relay::handlers::{EV_PROFILE, HOLD_ITEMS};
use pokestat_relay::RequestEnvelope;

#[derive(Parser)]
#[command(name = "relay-cli")]
#[command(about = "Send one request to the Pokémon stat relay and print the reply", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "ws://localhost:5050")]
    url: String,

    /// Request type (baseStats, holdItems, evProfile)
    request_type: String,

    /// Pokémon name
    name: String,

    /// battleType for holdItems, trainer for evProfile
    param: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (mut ws, _) = connect_async(cli.url.as_str()).await?;
    let start = Instant::now();

    let request_id = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis() as u64;
    let mut request = RequestEnvelope {
        request_type: Some(cli.request_type.clone()),
        request_id: Some(request_id.into()),
        name: Some(cli.name.into()),
        ..Default::default()
    };
    match cli.request_type.as_str() {
        HOLD_ITEMS => request.battle_type = cli.param,
        EV_PROFILE => request.trainer = cli.param,
        _ => {}
    }

    let payload = serde_json::to_string(&request)?;
    println!("OUT {}", payload);
    ws.send(Message::Text(payload.into())).await?;

    while let Some(message) = ws.next().await {
        match message? {
            Message::Text(text) => {
                println!("IN {}", text.as_str());
                break;
            }
            Message::Close(_) => {
                eprintln!("Connection closed before a reply arrived");
                break;
            }
            _ => continue,
        }
    }

    println!("RTT: {:.2}s", start.elapsed().as_secs_f64());
    // The server may already have closed its side.
    let _ = ws.close(None).await;
    Ok(())
}
