//! Commands sent by the presentation layer

use crate::catalog::Position;
use serde::{Deserialize, Serialize};

/// One discrete user action.
///
/// Serialized with a `type` tag so a browser can send plain objects:
/// `{"type": "toggleSelection", "stringIndex": 0, "fretIndex": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Command {
    Start { time_budget: u32 },
    Stop,
    ToggleSelection(Position),
    Confirm,
    PlayTarget,
    SubmitName { name: String },
    RenameEntry { index: usize, name: String },
    ShowRanking,
    CloseRanking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commands_from_browser_objects() {
        let toggle: Command =
            serde_json::from_str(r#"{"type":"toggleSelection","stringIndex":0,"fretIndex":3}"#)
                .unwrap();
        assert_eq!(toggle, Command::ToggleSelection(Position::new(0, 3)));

        let start: Command = serde_json::from_str(r#"{"type":"start","timeBudget":30}"#).unwrap();
        assert_eq!(start, Command::Start { time_budget: 30 });

        let confirm: Command = serde_json::from_str(r#"{"type":"confirm"}"#).unwrap();
        assert_eq!(confirm, Command::Confirm);

        let name: Command =
            serde_json::from_str(r#"{"type":"submitName","name":"Ana"}"#).unwrap();
        assert_eq!(name, Command::SubmitName { name: "Ana".to_string() });
    }
}
