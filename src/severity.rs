/// Severity to attachment color mapping.
///
/// The table mirrors the severity names used by the alerting engine,
/// including the capitalized "Disaster" entry. Unknown severities fall
/// back to the "ok" color so a lookup can never fail.
const SEVERITY_COLORS: [(&str, &str); 10] = [
    ("security", "#000000"),      // black
    ("Disaster", "#FF0000"),      // red
    ("critical", "#FF0000"),      // red
    ("major", "#FFA500"),         // orange
    ("minor", "#FFFF00"),         // yellow
    ("warning", "#1E90FF"),       // blue
    ("informational", "#808080"), // gray
    ("debug", "#808080"),         // gray
    ("trace", "#808080"),         // gray
    ("ok", "#00CC00"),            // green
];

const FALLBACK_COLOR: &str = "#00CC00";

/// Resolve the attachment color for a severity name.
pub fn color_for(severity: &str) -> &'static str {
    SEVERITY_COLORS
        .iter()
        .find(|(name, _)| *name == severity)
        .map(|(_, color)| *color)
        .unwrap_or(FALLBACK_COLOR)
}
