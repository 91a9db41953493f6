//! Gesture scripts
//!
//! A script is a list of steps separated by commas or whitespace:
//!
//! ```text
//! down, wait:120, up, wait:300
//! down move wait:50 move-out cancel
//! ```
//!
//! | Step          | Meaning                                       |
//! |---------------|-----------------------------------------------|
//! | `down`        | pointer down on the primary                   |
//! | `move`        | pointer move while still pressed              |
//! | `move-out`    | pointer move after leaving the target         |
//! | `up`          | pointer up                                    |
//! | `cancel`      | gesture cancelled                             |
//! | `wait:<ms>`   | advance the animation clock                   |
//! | `invalidate`  | layout changed; drop the animation plan       |

use anyhow::{bail, Context, Result};
use pressfx_core::GestureKind;

/// One step of a gesture script
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Step {
    Gesture(GestureKind),
    Wait(f32),
    Invalidate,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Gesture(GestureKind::Down) => write!(f, "down"),
            Step::Gesture(GestureKind::Move { pressed: true }) => write!(f, "move"),
            Step::Gesture(GestureKind::Move { pressed: false }) => write!(f, "move-out"),
            Step::Gesture(GestureKind::Up) => write!(f, "up"),
            Step::Gesture(GestureKind::Cancel) => write!(f, "cancel"),
            Step::Wait(ms) => write!(f, "wait:{ms}"),
            Step::Invalidate => write!(f, "invalidate"),
        }
    }
}

/// Parse a script into steps
pub fn parse(script: &str) -> Result<Vec<Step>> {
    let mut steps = Vec::new();
    for token in script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
    {
        let step = match token.to_ascii_lowercase().as_str() {
            "down" => Step::Gesture(GestureKind::Down),
            "move" => Step::Gesture(GestureKind::Move { pressed: true }),
            "move-out" => Step::Gesture(GestureKind::Move { pressed: false }),
            "up" => Step::Gesture(GestureKind::Up),
            "cancel" => Step::Gesture(GestureKind::Cancel),
            "invalidate" => Step::Invalidate,
            other => match other.strip_prefix("wait:") {
                Some(ms) => {
                    let ms: f32 = ms
                        .parse()
                        .with_context(|| format!("Invalid wait duration in '{token}'"))?;
                    if !ms.is_finite() || ms < 0.0 {
                        bail!("Wait duration must be a non-negative number, got '{token}'");
                    }
                    Step::Wait(ms)
                }
                None => bail!(
                    "Unknown step '{}'. Valid steps: down, move, move-out, up, cancel, wait:<ms>, invalidate",
                    token
                ),
            },
        };
        steps.push(step);
    }

    if steps.is_empty() {
        bail!("Gesture script is empty");
    }
    Ok(steps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_separators() {
        let steps = parse("down, wait:120 up,wait:300").unwrap();
        assert_eq!(
            steps,
            vec![
                Step::Gesture(GestureKind::Down),
                Step::Wait(120.0),
                Step::Gesture(GestureKind::Up),
                Step::Wait(300.0),
            ]
        );
    }

    #[test]
    fn test_parse_all_steps() {
        let steps = parse("DOWN move move-out cancel invalidate wait:0.5").unwrap();
        assert_eq!(steps.len(), 6);
        assert_eq!(steps[1], Step::Gesture(GestureKind::Move { pressed: true }));
        assert_eq!(steps[2], Step::Gesture(GestureKind::Move { pressed: false }));
        assert_eq!(steps[4], Step::Invalidate);
        assert_eq!(steps[5], Step::Wait(0.5));
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse("").is_err());
        assert!(parse(" , ").is_err());
        assert!(parse("down, tap").is_err());
        assert!(parse("wait:soon").is_err());
        assert!(parse("wait:-5").is_err());
    }

    #[test]
    fn test_step_display_round_trips() {
        let script = "down move move-out up cancel wait:16 invalidate";
        let steps = parse(script).unwrap();
        let printed: Vec<String> = steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(printed.join(" "), script);
    }
}
