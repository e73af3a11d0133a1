use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Trims whitespace and one pair of surrounding quotes, as left behind when
/// a path is pasted from a file manager.
pub fn clean_path_input(input: &str) -> String {
    let trimmed = input.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim().to_string();
        }
    }
    trimmed.to_string()
}

pub fn prompt_path<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> io::Result<PathBuf> {
    write!(writer, "{message}")?;
    writer.flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(PathBuf::from(clean_path_input(&input)))
}

pub fn wait_for_enter<R: BufRead, W: Write>(reader: &mut R, writer: &mut W) -> io::Result<()> {
    write!(writer, "Press Enter to exit...")?;
    writer.flush()?;

    let mut input = String::new();
    reader.read_line(&mut input)?;
    Ok(())
}
