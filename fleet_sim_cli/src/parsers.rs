use jiff::SpanRelativeTo;

/// Accepts `SignedDuration` strings ("4s", "PT10S"), calendar-free spans
/// ("1h 30m") and bare integer seconds.
pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Ok(seconds) = input.trim().parse::<i64>() {
        return Ok(jiff::SignedDuration::from_secs(seconds));
    }

    Err(format!("Invalid duration: {input}"))
}
