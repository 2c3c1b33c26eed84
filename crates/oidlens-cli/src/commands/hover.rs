//! Hover command implementation.

use oidlens_codec::{hover, DisplayZone};

use crate::input::read_text;

pub fn run(
    file: String,
    offset: usize,
    zone: DisplayZone,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_text(Some(file.as_str()))?;

    if offset > text.len() || !text.is_char_boundary(offset) {
        return Err(format!("Offset {} is not a character boundary in {}", offset, file).into());
    }

    match hover(&text, offset, &zone) {
        Some(content) => {
            println!("{}", content);
            Ok(())
        }
        None => Err(format!("no match at offset {}", offset).into()),
    }
}
