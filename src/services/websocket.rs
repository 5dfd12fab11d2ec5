use axum::{
    extract::{Extension, ws::{Message, WebSocket, WebSocketUpgrade}},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::broadcast;
use tracing::{error, info};

use crate::dto::{
    auction_dto::{AuctionUpdate, AuctionView},
    details_dto::{DetailsUpdate, FrontendDetails},
    owner_dto::{Owner, OwnersUpdate},
};

pub fn send_auction_update(tx: &broadcast::Sender<String>, view: &AuctionView) {
    let update = AuctionUpdate {
        r#type: "auction_update".to_string(),
        auction: view.clone(),
    };

    match serde_json::to_string(&update) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => {
            error!("Failed to serialize auction update: {}", e);
        }
    }
}

pub fn send_owners_update(tx: &broadcast::Sender<String>, owners: Vec<Owner>) {
    let update = OwnersUpdate {
        r#type: "owners_update".to_string(),
        owners,
    };

    match serde_json::to_string(&update) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => {
            error!("Failed to serialize owners update: {}", e);
        }
    }
}

pub fn send_details_update(tx: &broadcast::Sender<String>, details: FrontendDetails) {
    let update = DetailsUpdate {
        r#type: "details_update".to_string(),
        details,
    };

    match serde_json::to_string(&update) {
        Ok(json) => {
            let _ = tx.send(json);
        }
        Err(e) => {
            error!("Failed to serialize details update: {}", e);
        }
    }
}

/* Web Socket stuff */
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    Extension(tx): Extension<broadcast::Sender<String>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, tx))
}

async fn handle_socket(socket: WebSocket, tx: broadcast::Sender<String>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = tx.subscribe();
    info!("Auction screen subscribed.");

    // Forward every desk update to this client
    let send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(msg) => {
                    if sender.send(Message::Text(msg.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    info!("Subscriber lagged; skipped {} updates", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    // Clients only listen; drain until they hang up
    while let Some(Ok(msg)) = receiver.next().await {
        if let Message::Close(_) = msg {
            break;
        }
    }

    // Clean up
    send_task.abort();
    info!("Auction screen unsubscribed.");
}
