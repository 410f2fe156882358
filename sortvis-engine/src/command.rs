//! Interactive command parsing
//!
//! One command per line, case-insensitive:
//!
//! ```text
//! sort [algorithm]      start a run (default: the configured algorithm)
//! shuffle               new random values
//! resize N              change bar count (clamped to [10, 200])
//! speed MS              change step delay (clamped to [1, 50])
//! pause | resume        hold or release the run
//! cancel                stop the run at its next step
//! orient [v|h]          set or toggle orientation
//! labels                print arr[i] = v
//! status                print a one-line summary
//! help                  list commands
//! quit                  cancel any run and exit
//! ```

use sortvis_common::params::{parse_bar_count, parse_delay_ms};
use sortvis_common::{Algorithm, Error, Orientation, Result};
use std::str::FromStr;

/// A parsed command-loop line
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Sort(Option<Algorithm>),
    Shuffle,
    Resize(usize),
    Speed(f64),
    Pause,
    Resume,
    Cancel,
    /// `None` toggles
    Orient(Option<Orientation>),
    Labels,
    Status,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  sort [bubble|insertion|selection|merge|quick]
  shuffle
  resize N        (10-200)
  speed MS        (1-50, lower is faster)
  pause | resume
  cancel
  orient [v|h]
  labels
  status
  quit";

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| Error::InvalidInput("empty command".to_string()))?
            .to_ascii_lowercase();
        let rest: Vec<&str> = words.collect();
        let arg = rest.join(" ");

        let command = match verb.as_str() {
            "sort" | "start" | "run" if arg.is_empty() => Command::Sort(None),
            "sort" | "start" | "run" => Command::Sort(Some(arg.parse()?)),
            "shuffle" => Command::Shuffle,
            "resize" | "bars" => Command::Resize(parse_bar_count(&required(&verb, &arg)?)?),
            "speed" | "delay" => Command::Speed(parse_delay_ms(&required(&verb, &arg)?)?),
            "pause" => Command::Pause,
            "resume" | "continue" => Command::Resume,
            "cancel" | "stop" => Command::Cancel,
            "orient" | "orientation" if arg.is_empty() => Command::Orient(None),
            "orient" | "orientation" => Command::Orient(Some(arg.parse()?)),
            "labels" => Command::Labels,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => {
                return Err(Error::InvalidInput(format!("unknown command '{}'", other)));
            }
        };
        Ok(command)
    }
}

fn required(verb: &str, arg: &str) -> Result<String> {
    if arg.is_empty() {
        Err(Error::InvalidInput(format!("'{}' needs a value", verb)))
    } else {
        Ok(arg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert_eq!("sort".parse::<Command>().unwrap(), Command::Sort(None));
        assert_eq!(
            "SORT merge".parse::<Command>().unwrap(),
            Command::Sort(Some(Algorithm::Merge))
        );
        assert_eq!(
            "sort Quick Sort".parse::<Command>().unwrap(),
            Command::Sort(Some(Algorithm::Quick))
        );
        assert!("sort bogo".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_resize_clamps() {
        assert_eq!("resize 80".parse::<Command>().unwrap(), Command::Resize(80));
        assert_eq!("resize 5".parse::<Command>().unwrap(), Command::Resize(10));
        assert!("resize".parse::<Command>().is_err());
        assert!("resize lots".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_speed() {
        assert_eq!("speed 12".parse::<Command>().unwrap(), Command::Speed(12.0));
        assert!("speed".parse::<Command>().is_err());
    }

    #[test]
    fn test_parse_orient() {
        assert_eq!("orient".parse::<Command>().unwrap(), Command::Orient(None));
        assert_eq!(
            "orient h".parse::<Command>().unwrap(),
            Command::Orient(Some(Orientation::Horizontal))
        );
    }

    #[test]
    fn test_parse_simple_verbs() {
        for (line, expected) in [
            ("shuffle", Command::Shuffle),
            ("pause", Command::Pause),
            ("resume", Command::Resume),
            ("cancel", Command::Cancel),
            ("labels", Command::Labels),
            ("status", Command::Status),
            ("help", Command::Help),
            ("quit", Command::Quit),
            ("  Quit  ", Command::Quit),
        ] {
            assert_eq!(line.parse::<Command>().unwrap(), expected, "{}", line);
        }
    }

    #[test]
    fn test_unknown_and_empty() {
        assert!(matches!("dance".parse::<Command>(), Err(Error::InvalidInput(_))));
        assert!(matches!("   ".parse::<Command>(), Err(Error::InvalidInput(_))));
    }
}
