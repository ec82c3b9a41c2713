use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc::UnboundedReceiver;

use crate::collab::ImageRequest;
use crate::{
    AssetTables, ChannelSink, ChatMessage, Collaborators, MessageParser, ParserConfig,
    QueuedImageStore, Sender,
};

mod render;

struct Fixture {
    parser: MessageParser,
    collab: Collaborators,
    images: Arc<QueuedImageStore>,
    image_rx: UnboundedReceiver<ImageRequest>,
    sink_rx: UnboundedReceiver<ChatMessage>,
}

impl Fixture {
    fn requests(&mut self) -> Vec<ImageRequest> {
        let mut out = Vec::new();
        while let Ok(request) = self.image_rx.try_recv() {
            out.push(request);
        }
        out
    }
}

fn tables() -> AssetTables {
    serde_json::from_value(json!({
        "emoji": [
            {"sequence": "👍🏽", "index": "1f44d-1f3fd"},
            {"sequence": "👍", "index": "1f44d"},
            {"sequence": "😀", "index": "1f600"},
            {"sequence": "🫠", "index": ""}
        ],
        "bttv": {"catJAM": "5f1b0186cf6d2144653d2970"},
        "bttv_animated": {"pepeD": "5b1740221c5a6065a7bad4b5"},
        "ffz": {"OMEGALUL": "128054", "catJAM": "777"},
        "cheermotes": {
            "cheer": [
                {"min_bits": 1, "id": "1", "color": "#979797"},
                {"min_bits": 100, "id": "100", "color": "#9c3ee8"}
            ]
        },
        "badges": {
            "subscriber/12": "sub-12",
            "vip/1": "vip-1",
            "moderator/1": "mod-1"
        }
    }))
    .expect("Failed to build test asset tables")
}

fn fixture() -> Fixture {
    fixture_with(ParserConfig::default())
}

fn fixture_with(config: ParserConfig) -> Fixture {
    let (images, image_rx) = QueuedImageStore::new();
    let images = Arc::new(images);
    let collab = tables().into_collaborators(&config, images.clone());
    let (sink, sink_rx) = ChannelSink::new();
    let parser = MessageParser::new(collab.clone(), Arc::new(sink));
    Fixture {
        parser,
        collab,
        images,
        image_rx,
        sink_rx,
    }
}

fn ann() -> Sender {
    Sender::new("1001", "Ann")
}

/// Expected output for a message without badges.
fn plain_output(name: &str, color: &str, body: &str) -> String {
    format!("\u{FEFF}<color={color}><b>{name}</b></color>: {body}")
}
