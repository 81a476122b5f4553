use freee_hr::domain::ClockType;

/// Japanese label for a clock event, or the raw tag for unknown kinds.
pub fn clock_label(clock_type: &ClockType) -> &str {
    match clock_type {
        ClockType::ClockIn => "出勤",
        ClockType::ClockOut => "退勤",
        ClockType::BreakBegin => "休憩開始",
        ClockType::BreakEnd => "休憩終了",
        ClockType::Other(tag) => tag,
    }
}

/// The subcommand that submits this kind of event.
pub fn command_name(clock_type: &ClockType) -> Option<&'static str> {
    match clock_type {
        ClockType::ClockIn => Some("in"),
        ClockType::ClockOut => Some("out"),
        ClockType::BreakBegin => Some("break-begin"),
        ClockType::BreakEnd => Some("break-end"),
        ClockType::Other(_) => None,
    }
}

/// Label used when listing available types, e.g. `出勤 (in)`.
pub fn available_label(clock_type: &ClockType) -> String {
    match command_name(clock_type) {
        Some(command) => format!("{} ({})", clock_label(clock_type), command),
        None => clock_label(clock_type).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_types_are_localized() {
        assert_eq!(clock_label(&ClockType::ClockIn), "出勤");
        assert_eq!(clock_label(&ClockType::BreakEnd), "休憩終了");
        assert_eq!(available_label(&ClockType::BreakBegin), "休憩開始 (break-begin)");
    }

    #[test]
    fn test_unknown_types_fall_back_to_raw_tag() {
        let other = ClockType::Other("night_shift".to_string());
        assert_eq!(clock_label(&other), "night_shift");
        assert_eq!(available_label(&other), "night_shift");
        assert_eq!(command_name(&other), None);
    }
}
