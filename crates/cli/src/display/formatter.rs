use wrapline_core::{ResolutionHistory, Value, codec};

pub fn print_header(label: &str, subject: &str) {
    println!("{label}: {subject}");
    println!("{}", "=".repeat(80));
}

pub fn print_history(history: &ResolutionHistory) {
    println!("\n📜 Resolution Stack:");
    for line in history.to_string().lines() {
        println!("   {line}");
    }
}

/// Render a value as pretty JSON, or in msgpack notation when it has no JSON
/// form (binary blobs, non-string keys)
pub fn format_value(value: &Value) -> String {
    codec::from_value::<serde_json::Value>(value.clone())
        .ok()
        .and_then(|json| serde_json::to_string_pretty(&json).ok())
        .unwrap_or_else(|| value.to_string())
}
