use crate::utils::Result;
use std::io::{BufRead, Write};

pub const ORGANIZE_QUESTION: &str =
    "Do you want to organize the files into folders based on their names? (yes/no): ";

/// Only "yes", ignoring case and surrounding whitespace, counts as consent.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

/// Writes `question`, reads one line. End of input counts as "no".
pub fn confirm<R: BufRead, W: Write>(question: &str, mut reader: R, mut writer: W) -> Result<bool> {
    write!(writer, "{}", question)?;
    writer.flush()?;

    let mut answer = String::new();
    if reader.read_line(&mut answer)? == 0 {
        writeln!(writer)?;
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}

/// Asks on the terminal whether to organize the output folder.
pub fn confirm_organize() -> Result<bool> {
    let stdin = std::io::stdin();
    confirm(ORGANIZE_QUESTION, stdin.lock(), std::io::stdout())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative("  YES \n"));
        assert!(is_affirmative("Yes"));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("yes please"));
    }

    #[test]
    fn test_confirm_reads_one_line() {
        let mut out = Vec::new();
        let confirmed = confirm("Organize? ", Cursor::new("yes\nno\n"), &mut out).unwrap();

        assert!(confirmed);
        assert_eq!(String::from_utf8(out).unwrap(), "Organize? ");
    }

    #[test]
    fn test_confirm_eof_declines() {
        let mut out = Vec::new();
        assert!(!confirm("Organize? ", Cursor::new(""), &mut out).unwrap());
    }
}
