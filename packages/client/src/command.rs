//! Controller commands typed at the prompt.
//!
//! Each command maps to a partial state update; the hub applies the patch
//! and broadcasts the merged state, so the local view changes only when the
//! resulting snapshot comes back.

use maku_shared::protocol::UpdatePatch;
use serde_json::Value;
use thiserror::Error;

/// A parsed controller command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Advance to the next slide.
    Next,
    /// Go back one slide (stops at 0).
    Prev,
    /// Jump to a specific slide index.
    Goto(u64),
    /// Set the active sound cue.
    Sound(String),
    /// Clear the active sound cue.
    Silence,
    /// Set an arbitrary state field (forward-compatibility escape hatch).
    Set { field: String, value: Value },
    /// Print the last received state locally.
    Show,
    /// Print command help locally.
    Help,
}

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,

    #[error("unknown command '{0}' (try 'help')")]
    UnknownCommand(String),

    #[error("'{0}' needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not a valid slide index")]
    InvalidSlide(String),
}

impl Command {
    /// Parse one line of prompt input.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };

        match head {
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" | "back" => Ok(Self::Prev),
            "goto" | "g" => {
                let arg = words.next().ok_or(ParseError::MissingArgument("goto"))?;
                let index = arg
                    .parse::<u64>()
                    .map_err(|_| ParseError::InvalidSlide(arg.to_string()))?;
                Ok(Self::Goto(index))
            }
            "sound" | "s" => match words.next() {
                Some(cue) => Ok(Self::Sound(cue.to_string())),
                None => Err(ParseError::MissingArgument("sound")),
            },
            "silence" | "mute" => Ok(Self::Silence),
            "set" => {
                let field = words
                    .next()
                    .ok_or(ParseError::MissingArgument("set"))?
                    .to_string();
                let rest = words.collect::<Vec<_>>().join(" ");
                if rest.is_empty() {
                    return Err(ParseError::MissingArgument("set"));
                }
                // JSON if it parses, bare string otherwise
                let value = serde_json::from_str(&rest)
                    .unwrap_or_else(|_| Value::String(rest));
                Ok(Self::Set { field, value })
            }
            "show" | "state" => Ok(Self::Show),
            "help" | "h" | "?" => Ok(Self::Help),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }

    /// Build the update patch for this command, given the last observed
    /// slide index. Local commands (`show`, `help`) produce no patch.
    pub fn to_patch(&self, current_slide: u64) -> Option<UpdatePatch> {
        match self {
            Self::Next => Some(UpdatePatch::slide(current_slide + 1)),
            Self::Prev => Some(UpdatePatch::slide(current_slide.saturating_sub(1))),
            Self::Goto(index) => Some(UpdatePatch::slide(*index)),
            Self::Sound(cue) => Some(UpdatePatch::sound(Some(cue.clone()))),
            Self::Silence => Some(UpdatePatch::sound(None)),
            Self::Set { field, value } => {
                Some(UpdatePatch::new().with(field.clone(), value.clone()))
            }
            Self::Show | Self::Help => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_navigation_commands() {
        // テスト項目: スライド操作コマンドが解析できる
        assert_eq!(Command::parse("next"), Ok(Command::Next));
        assert_eq!(Command::parse("  n  "), Ok(Command::Next));
        assert_eq!(Command::parse("prev"), Ok(Command::Prev));
        assert_eq!(Command::parse("goto 12"), Ok(Command::Goto(12)));
    }

    #[test]
    fn test_parse_sound_commands() {
        // テスト項目: サウンドキュー操作コマンドが解析できる
        assert_eq!(
            Command::parse("sound sound1.mp3"),
            Ok(Command::Sound("sound1.mp3".to_string()))
        );
        assert_eq!(Command::parse("silence"), Ok(Command::Silence));
    }

    #[test]
    fn test_parse_set_with_json_value() {
        // テスト項目: set コマンドの値は JSON として解析される
        assert_eq!(
            Command::parse("set laser true"),
            Ok(Command::Set {
                field: "laser".to_string(),
                value: json!(true)
            })
        );
    }

    #[test]
    fn test_parse_set_with_bare_string() {
        // テスト項目: JSON として解析できない値は文字列として扱われる
        assert_eq!(
            Command::parse("set notes intro section"),
            Ok(Command::Set {
                field: "notes".to_string(),
                value: json!("intro section")
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        // テスト項目: 不正な入力が適切な ParseError になる
        assert_eq!(Command::parse(""), Err(ParseError::Empty));
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::UnknownCommand("dance".to_string()))
        );
        assert_eq!(
            Command::parse("goto"),
            Err(ParseError::MissingArgument("goto"))
        );
        assert_eq!(
            Command::parse("goto abc"),
            Err(ParseError::InvalidSlide("abc".to_string()))
        );
        assert_eq!(
            Command::parse("goto -1"),
            Err(ParseError::InvalidSlide("-1".to_string()))
        );
        assert_eq!(
            Command::parse("sound"),
            Err(ParseError::MissingArgument("sound"))
        );
    }

    #[test]
    fn test_to_patch_navigation() {
        // テスト項目: スライド操作コマンドが現在位置に基づくパッチになる
        assert_eq!(Command::Next.to_patch(3), Some(UpdatePatch::slide(4)));
        assert_eq!(Command::Prev.to_patch(3), Some(UpdatePatch::slide(2)));
        // スライド 0 からは戻れない
        assert_eq!(Command::Prev.to_patch(0), Some(UpdatePatch::slide(0)));
        assert_eq!(Command::Goto(9).to_patch(3), Some(UpdatePatch::slide(9)));
    }

    #[test]
    fn test_to_patch_sound() {
        // テスト項目: サウンドコマンドが sound フィールドのパッチになる
        assert_eq!(
            Command::Sound("cue1".to_string()).to_patch(0),
            Some(UpdatePatch::sound(Some("cue1".to_string())))
        );
        assert_eq!(Command::Silence.to_patch(0), Some(UpdatePatch::sound(None)));
    }

    #[test]
    fn test_local_commands_produce_no_patch() {
        // テスト項目: ローカルコマンドはパッチを生成しない
        assert_eq!(Command::Show.to_patch(0), None);
        assert_eq!(Command::Help.to_patch(0), None);
    }
}
