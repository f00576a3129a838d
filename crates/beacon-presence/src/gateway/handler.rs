//! Incoming frame classification.

use std::time::Duration;

use tracing::debug;

use crate::protocol::{self, events, opcode, PresenceSnapshot};
use crate::PresenceError;

/// What the session loop should do with one received frame.
#[derive(Debug)]
pub(crate) enum FrameAction {
    /// Hello: start heartbeating at the announced interval.
    StartHeartbeat(Duration),
    /// A full presence document to store.
    Snapshot(Box<PresenceSnapshot>),
    /// Unknown or irrelevant frame; forward-compatible no-op.
    Ignore,
}

/// Decode one received message and classify it.
///
/// `MalformedFrame` means drop this frame and keep the connection;
/// `InvalidHandshake` means abort the session.
pub(crate) fn handle_frame(text: &str) -> Result<FrameAction, PresenceError> {
    let frame = protocol::decode_frame(text)?;

    if frame.op == Some(opcode::HELLO) {
        let interval = frame
            .d
            .as_ref()
            .and_then(|d| d.get("heartbeat_interval"))
            .and_then(|v| v.as_i64())
            .ok_or_else(|| {
                PresenceError::InvalidHandshake("hello without heartbeat_interval".into())
            })?;
        if interval <= 0 {
            return Err(PresenceError::InvalidHandshake(format!(
                "non-positive heartbeat_interval: {interval}"
            )));
        }
        return Ok(FrameAction::StartHeartbeat(Duration::from_millis(
            interval as u64,
        )));
    }

    match frame.t.as_deref() {
        Some(events::INIT_STATE) | Some(events::PRESENCE_UPDATE) => {
            let data = frame.d.ok_or_else(|| {
                PresenceError::MalformedFrame("presence event without payload".into())
            })?;
            let snapshot = serde_json::from_value(data)
                .map_err(|e| PresenceError::MalformedFrame(e.to_string()))?;
            Ok(FrameAction::Snapshot(Box::new(snapshot)))
        }
        Some(other) => {
            debug!(event = %other, "ignoring unhandled gateway event");
            Ok(FrameAction::Ignore)
        }
        None => Ok(FrameAction::Ignore),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_yields_heartbeat_interval() {
        let action = handle_frame(r#"{"op":1,"d":{"heartbeat_interval":30000}}"#).unwrap();
        match action {
            FrameAction::StartHeartbeat(interval) => {
                assert_eq!(interval, Duration::from_millis(30000));
            }
            other => panic!("expected StartHeartbeat, got {other:?}"),
        }
    }

    #[test]
    fn hello_without_interval_is_invalid_handshake() {
        let err = handle_frame(r#"{"op":1,"d":{}}"#).unwrap_err();
        assert!(matches!(err, PresenceError::InvalidHandshake(_)));

        let err = handle_frame(r#"{"op":1}"#).unwrap_err();
        assert!(matches!(err, PresenceError::InvalidHandshake(_)));
    }

    #[test]
    fn hello_with_non_positive_interval_is_invalid_handshake() {
        for payload in [
            r#"{"op":1,"d":{"heartbeat_interval":0}}"#,
            r#"{"op":1,"d":{"heartbeat_interval":-5}}"#,
        ] {
            let err = handle_frame(payload).unwrap_err();
            assert!(matches!(err, PresenceError::InvalidHandshake(_)));
        }
    }

    #[test]
    fn presence_events_yield_snapshots() {
        for event in ["INIT_STATE", "PRESENCE_UPDATE"] {
            let text = format!(r#"{{"t":"{event}","d":{{"discord_status":"idle","activities":[]}}}}"#);
            let action = handle_frame(&text).unwrap();
            match action {
                FrameAction::Snapshot(snapshot) => {
                    assert_eq!(
                        snapshot.discord_status,
                        crate::protocol::PresenceStatus::Idle
                    );
                }
                other => panic!("expected Snapshot, got {other:?}"),
            }
        }
    }

    #[test]
    fn unknown_event_types_are_ignored() {
        let action = handle_frame(r#"{"t":"SOMETHING_NEW","d":{"whatever":true}}"#).unwrap();
        assert!(matches!(action, FrameAction::Ignore));
    }

    #[test]
    fn presence_event_without_payload_is_malformed() {
        let err = handle_frame(r#"{"t":"INIT_STATE"}"#).unwrap_err();
        assert!(matches!(err, PresenceError::MalformedFrame(_)));
    }

    #[test]
    fn garbage_is_malformed() {
        let err = handle_frame("{{{").unwrap_err();
        assert!(matches!(err, PresenceError::MalformedFrame(_)));
    }
}
