//! Keyboard mapping for interactive play

use rr_slot::Command;

pub const HELP: &str = "keys: [s] spin  [k] skip  [a] auto on/off  [+] bet up  [-] bet down  [q] quit";

/// Map a single key to a command
pub fn command_for_key(key: char) -> Option<Command> {
    match key.to_ascii_lowercase() {
        's' | ' ' => Some(Command::Spin),
        'k' => Some(Command::Skip),
        'a' => Some(Command::ToggleAutoSpin),
        '+' | '=' => Some(Command::IncreaseBet),
        '-' | '_' => Some(Command::DecreaseBet),
        'q' => Some(Command::Shutdown),
        _ => None,
    }
}

/// Commands typed on one line, in order
///
/// An empty line spins, like pressing the spin button.
pub fn parse_line(line: &str) -> Vec<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.is_empty() {
        return vec![Command::Spin];
    }
    line.chars().filter_map(command_for_key).collect()
}
