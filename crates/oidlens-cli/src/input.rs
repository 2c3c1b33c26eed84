//! Reading scanned text from a file or stdin.

use std::io::{self, Read};

pub fn read_text(path: Option<&str>) -> Result<String, Box<dyn std::error::Error>> {
    let text = if let Some(path) = path {
        std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read file {}: {}", path, e))?
    } else {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    };
    tracing::debug!(bytes = text.len(), "read input");
    Ok(text)
}
