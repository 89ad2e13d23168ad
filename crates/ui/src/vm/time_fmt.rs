/// Countdown label shown above the question.
#[must_use]
pub fn format_time_remaining(seconds: u32) -> String {
    format!("Tempo restante: {seconds}s")
}

/// Inline style for the progress bar fill.
#[must_use]
pub fn progress_style(percent: f32) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    format!("width: {clamped:.0}%")
}
