//! Display formatting for the client.

use maku_shared::protocol::RoomState;
use maku_shared::time::millis_to_rfc3339;

/// Formatter for everything the client prints below the prompt.
pub struct StateFormatter;

impl StateFormatter {
    /// Format a received room-state snapshot.
    pub fn format_state(state: &RoomState, received_at_millis: i64) -> String {
        let mut output = String::new();
        output.push_str("\n\n------------------------------------------------------------\n");
        output.push_str(&format!("Slide: {}\n", state.slide));
        output.push_str(&format!(
            "Sound: {}\n",
            state.sound.as_deref().unwrap_or("None")
        ));
        for (field, value) in &state.extra {
            output.push_str(&format!("{}: {}\n", field, value));
        }
        output.push_str(&format!(
            "received at {}\n",
            millis_to_rfc3339(received_at_millis)
        ));
        output.push_str("------------------------------------------------------------\n");
        output
    }

    /// Format an unparseable server frame for display.
    pub fn format_raw_message(text: &str) -> String {
        format!("\n(unrecognized message) {}\n", text)
    }

    /// Command help text.
    pub fn format_help() -> String {
        "\nCommands:\n\
         \x20 next | n           advance to the next slide\n\
         \x20 prev | p           go back one slide\n\
         \x20 goto <index>       jump to a slide\n\
         \x20 sound <cue>        set the active sound cue\n\
         \x20 silence            clear the sound cue\n\
         \x20 set <field> <val>  set an arbitrary state field\n\
         \x20 show               print the last received state\n\
         \x20 help               this text\n"
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, json};

    #[test]
    fn test_format_state_with_sound() {
        // テスト項目: サウンドキューありの状態が表示される
        // given (前提条件):
        let state = RoomState {
            slide: 3,
            sound: Some("sound1.mp3".to_string()),
            extra: Map::new(),
        };

        // when (操作):
        let output = StateFormatter::format_state(&state, 1_700_000_000_000);

        // then (期待する結果):
        assert!(output.contains("Slide: 3"));
        assert!(output.contains("Sound: sound1.mp3"));
        assert!(output.contains("received at 2023-11-14T22:13:20+00:00"));
    }

    #[test]
    fn test_format_state_without_sound() {
        // テスト項目: サウンドキューなしは "None" と表示される
        let output = StateFormatter::format_state(&RoomState::default(), 0);
        assert!(output.contains("Sound: None"));
    }

    #[test]
    fn test_format_state_includes_extra_fields() {
        // テスト項目: 拡張フィールドも表示に含まれる
        // given (前提条件):
        let state = RoomState {
            slide: 0,
            sound: None,
            extra: Map::from_iter([("laser".to_string(), json!("on"))]),
        };

        // when (操作):
        let output = StateFormatter::format_state(&state, 0);

        // then (期待する結果):
        assert!(output.contains("laser: \"on\""));
    }
}
