const SECS_PER_DAY: i64 = 24 * 60 * 60;
const SECS_PER_HOUR: i64 = 60 * 60;
const SECS_PER_MINUTE: i64 = 60;

/// Format a remaining-seconds value as `"DD : HH : MM : SS"`.
///
/// Every group is zero-padded to two digits. Days are not capped here; the
/// sequencer keeps them below 100 so the string stays fixed-width.
pub fn format_remaining(secs: i64) -> String {
    let days = secs / SECS_PER_DAY;
    let rem = secs % SECS_PER_DAY;
    let hours = rem / SECS_PER_HOUR;
    let rem = rem % SECS_PER_HOUR;
    let minutes = rem / SECS_PER_MINUTE;
    let seconds = rem % SECS_PER_MINUTE;

    format!("{days:02} : {hours:02} : {minutes:02} : {seconds:02}")
}

#[cfg(test)]
#[path = "../../tests/unit/countdown/format.rs"]
mod tests;
