//! Decoding of stream status bodies into [`StreamSnapshot`] values.
//!
//! An offline channel is the normal `Ok(None)` outcome, not an error.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::api::ApiFlavor;
use crate::api::models::{HelixResponse, HelixStream, KrakenStreamResponse};
use crate::{ChannelId, ParseError, StreamSnapshot};

/// Something that can turn a raw body into a liveness result.
pub trait ResponseParser: Send + Sync {
    fn parse(&self, channel: &ChannelId, body: &str)
    -> Result<Option<StreamSnapshot>, ParseError>;
}

impl ResponseParser for ApiFlavor {
    fn parse(
        &self,
        channel: &ChannelId,
        body: &str,
    ) -> Result<Option<StreamSnapshot>, ParseError> {
        match self {
            Self::Kraken => parse_stream_response(channel, body),
            Self::Helix => parse_helix_response(channel, body),
        }
    }
}

/// Parse a Kraken `/streams/{channel}` body.
pub fn parse_stream_response(
    channel: &ChannelId,
    body: &str,
) -> Result<Option<StreamSnapshot>, ParseError> {
    let resp: KrakenStreamResponse = decode(body)?;

    Ok(resp.stream.map(|stream| StreamSnapshot {
        channel: channel.clone(),
        is_live: true,
        display_name: stream.channel.display_name,
        game: stream.channel.game.or(stream.game),
        title: stream.channel.status,
        viewer_count: stream.viewers,
    }))
}

/// Parse a Helix `/streams?user_login=` body.
pub fn parse_helix_response(
    channel: &ChannelId,
    body: &str,
) -> Result<Option<StreamSnapshot>, ParseError> {
    let resp: HelixResponse<HelixStream> = decode(body)?;

    let Some(stream) = resp.data.into_iter().next() else {
        return Ok(None);
    };
    if stream
        .stream_type
        .as_deref()
        .is_some_and(|t| !t.is_empty() && t != "live")
    {
        return Ok(None);
    }

    Ok(Some(StreamSnapshot {
        channel: channel.clone(),
        is_live: true,
        display_name: stream.user_name.or(Some(stream.user_login)),
        game: stream.game_name,
        title: stream.title,
        viewer_count: stream.viewer_count,
    }))
}

/// Two-step decode so syntax errors and shape errors stay distinguishable.
fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ParseError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ParseError::Malformed(e.to_string()))?;
    if !value.is_object() {
        return Err(ParseError::UnexpectedShape(
            "top-level value is not an object".into(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ParseError::UnexpectedShape(e.to_string()))
}
