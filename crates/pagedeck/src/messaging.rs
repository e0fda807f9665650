//! Runtime messages from the toolbar action and other extension contexts.

use serde::{Deserialize, Serialize};

use crate::host::{HostDocument, PresentationSurface};
use crate::presenter::Presenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "ns-toggle-presentation")]
    TogglePresentation,
    #[serde(rename = "ns-ping")]
    Ping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_presenting: Option<bool>,
}

pub fn handle_message<H>(presenter: &mut Presenter<H>, message: Message) -> Reply
where
    H: HostDocument + PresentationSurface,
{
    match message {
        Message::TogglePresentation => {
            presenter.toggle();
            Reply {
                ok: true,
                is_presenting: Some(presenter.is_presenting()),
            }
        }
        Message::Ping => Reply {
            ok: true,
            is_presenting: None,
        },
    }
}

/// Decode and handle a JSON message. Anything unrecognized gets no reply.
pub fn handle_raw<H>(presenter: &mut Presenter<H>, raw: &str) -> Option<Reply>
where
    H: HostDocument + PresentationSurface,
{
    match serde_json::from_str::<Message>(raw) {
        Ok(message) => Some(handle_message(presenter, message)),
        Err(e) => {
            tracing::trace!("ignoring message: {e}");
            None
        }
    }
}
