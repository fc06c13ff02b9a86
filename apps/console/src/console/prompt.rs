use std::cell::RefCell;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::candidates::Confirm;

/// Line-oriented terminal I/O. Generic so tests can script the input.
pub struct Prompter<R, W> {
    input: RefCell<R>,
    output: RefCell<W>,
}

impl Prompter<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input: RefCell::new(input),
            output: RefCell::new(output),
        }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output.into_inner()
    }

    pub fn say(&self, text: &str) -> io::Result<()> {
        let mut out = self.output.borrow_mut();
        out.write_all(text.as_bytes())?;
        if !text.ends_with('\n') {
            out.write_all(b"\n")?;
        }
        out.flush()
    }

    /// Prints `label` and reads one trimmed line. `None` at end of input.
    pub fn read_line(&self, label: &str) -> io::Result<Option<String>> {
        {
            let mut out = self.output.borrow_mut();
            write!(out, "{label}")?;
            out.flush()?;
        }
        let mut line = String::new();
        if self.input.borrow_mut().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for a value showing the current one. Blank input keeps it.
    pub fn ask(&self, label: &str, current: &str) -> io::Result<Option<String>> {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        Ok(self.read_line(&prompt)?.filter(|answer| !answer.is_empty()))
    }

    /// `y`/`n` question. End of input counts as "no".
    pub fn yes_no(&self, question: &str, default: bool) -> io::Result<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        match self.read_line(&format!("{question} {hint} "))? {
            None => Ok(false),
            Some(answer) if answer.is_empty() => Ok(default),
            Some(answer) => Ok(matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")),
        }
    }
}

impl<R: BufRead, W: Write> Confirm for Prompter<R, W> {
    fn confirm(&self, message: &str) -> bool {
        self.yes_no(message, false).unwrap_or(false)
    }
}

#[cfg(test)]
pub(crate) fn scripted(lines: &[&str]) -> Prompter<io::Cursor<Vec<u8>>, Vec<u8>> {
    let mut input = lines.join("\n");
    input.push('\n');
    Prompter::new(io::Cursor::new(input.into_bytes()), Vec::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ask_keeps_current_on_blank() {
        let p = scripted(&["", "Grace"]);
        assert_eq!(p.ask("Name", "Ada").unwrap(), None);
        assert_eq!(p.ask("Name", "Ada").unwrap(), Some("Grace".to_string()));
        assert_eq!(p.ask("Name", "Ada").unwrap(), None);

        let out = String::from_utf8(p.into_output()).unwrap();
        assert!(out.starts_with("Name [Ada]: "));
    }

    #[test]
    fn test_yes_no_defaults_and_eof() {
        let p = scripted(&["", "YES", "n"]);
        assert!(p.yes_no("Keep?", true).unwrap());
        assert!(p.yes_no("Keep?", false).unwrap());
        assert!(!p.yes_no("Keep?", true).unwrap());
        assert!(!p.yes_no("Keep?", true).unwrap());
    }

    #[test]
    fn test_confirm_prints_message() {
        let p = scripted(&["y"]);
        assert!(p.confirm("Are you sure you want to delete Ada?"));
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out, "Are you sure you want to delete Ada? [y/N] ");
    }
}
