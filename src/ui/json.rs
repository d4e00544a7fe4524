use std::io::{self, Write};

/// Write a single NDJSON event (one JSON object per line).
pub fn write_event(out: &mut impl Write, event: &serde_json::Value) -> io::Result<()> {
    let line = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
    out.write_all(line.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Tag `event` with the command that produced it and write it to stdout.
pub fn emit(command: &str, mut event: serde_json::Value) -> io::Result<()> {
    if let Some(obj) = event.as_object_mut() {
        obj.insert("command".to_string(), serde_json::json!(command));
    }
    let mut out = io::stdout().lock();
    write_event(&mut out, &event)
}
