pub mod roster;

pub use roster::{parse_roster, render_roster, ParsedRoster, RosterError, RosterStore, SkippedLine};
