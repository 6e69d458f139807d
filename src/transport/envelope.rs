//! Named-event framing for the push channel.
//!
//! Every text frame is a JSON object `{"event": <name>, "data": <payload>}`.
//! `data` is omitted for zero-payload events such as `reset`.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::FeedResult;
use crate::input::Outbound;

pub const INPUT_EVENT: &str = "input";
pub const RESET_EVENT: &str = "reset";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub event: String,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub data: Value,
}

impl Envelope {
    pub fn new(event: impl Into<String>, data: Value) -> Self {
        Self {
            event: event.into(),
            data,
        }
    }

    pub fn parse(text: &str) -> FeedResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_text(&self) -> FeedResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl From<Outbound> for Envelope {
    fn from(message: Outbound) -> Self {
        match message {
            Outbound::Input(state) => Envelope::new(INPUT_EVENT, json!({ "left": state.left, "right": state.right })),
            Outbound::Shoot => Envelope::new(INPUT_EVENT, json!({ "shoot": true })),
            Outbound::Reset => Envelope::new(RESET_EVENT, Value::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputState;

    #[test]
    fn test_input_flags_frame() {
        let env = Envelope::from(Outbound::Input(InputState { left: true, right: false }));
        assert_eq!(env.event, "input");
        assert_eq!(env.data, json!({ "left": true, "right": false }));
    }

    #[test]
    fn test_shoot_frame() {
        let env = Envelope::from(Outbound::Shoot);
        assert_eq!(env.to_text().unwrap(), r#"{"event":"input","data":{"shoot":true}}"#);
    }

    #[test]
    fn test_reset_has_no_payload() {
        let env = Envelope::from(Outbound::Reset);
        assert_eq!(env.to_text().unwrap(), r#"{"event":"reset"}"#);
    }

    #[test]
    fn test_parse_inbound_snapshot() {
        let env = Envelope::parse(r#"{"event":"game_state","data":{"score":5}}"#).unwrap();
        assert_eq!(env.event, "game_state");
        assert_eq!(env.data["score"], 5);

        let bare = Envelope::parse(r#"{"event":"connected"}"#).unwrap();
        assert!(bare.data.is_null());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(Envelope::parse("not json").is_err());
    }
}
