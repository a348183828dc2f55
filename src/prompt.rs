use anyhow::{bail, Result};
use github::{CredentialPrompt, RepoRef};
use std::io::{self, BufRead, Write};

/// Line-oriented questions on a terminal (or anything that looks like one)
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Give back the output sink
    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    pub fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{message}")?;
        Ok(())
    }

    /// Print `question` and read one trimmed line
    pub fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            bail!("input closed while waiting for an answer");
        }
        Ok(line.trim().to_string())
    }

    /// Ask until the answer is not blank
    pub fn ask_required(&mut self, question: &str) -> Result<String> {
        loop {
            let answer = self.ask(question)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
        }
    }

    /// Yes only for an answer starting with `y`
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        let answer = self.ask(&format!("{question} (y/n) "))?;
        Ok(answer.to_ascii_lowercase().starts_with('y'))
    }
}

impl<R: BufRead, W: Write> CredentialPrompt for Console<R, W> {
    fn replacement_token(&mut self, repo: &RepoRef, _attempt: usize) -> Option<String> {
        let answer = self
            .say(&format!("The access token was rejected for {repo}."))
            .and_then(|()| self.confirm("Do you want to retry with another token?"))
            .and_then(|retry| {
                if retry {
                    self.ask_required("Please re-enter your GitHub Personal Access Token: ")
                        .map(Some)
                } else {
                    Ok(None)
                }
            });

        match answer {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "could not read a replacement token");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn console(input: &str) -> Console<Cursor<Vec<u8>>, Vec<u8>> {
        Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_ask_trims_and_echoes_question() -> Result<()> {
        let mut console = console("  octo  \n");
        assert_eq!(console.ask("Owner: ")?, "octo");
        assert_eq!(String::from_utf8(console.into_output())?, "Owner: ");
        Ok(())
    }

    #[test]
    fn test_ask_required_skips_blank_lines() -> Result<()> {
        let mut console = console("\n\ndemo\n");
        assert_eq!(console.ask_required("Repo: ")?, "demo");
        Ok(())
    }

    #[test]
    fn test_closed_input_is_an_error() {
        assert!(console("").ask("Anything? ").is_err());
    }

    #[test]
    fn test_confirm() -> Result<()> {
        assert!(console("y\n").confirm("Retry?")?);
        assert!(console("Yes\n").confirm("Retry?")?);
        assert!(!console("n\n").confirm("Retry?")?);
        Ok(())
    }

    #[test]
    fn test_replacement_token() {
        let repo = RepoRef::new("octo", "demo");

        assert_eq!(
            console("y\nnew-token\n").replacement_token(&repo, 1),
            Some("new-token".to_string())
        );
        assert_eq!(console("n\n").replacement_token(&repo, 1), None);
        assert_eq!(console("").replacement_token(&repo, 1), None);
    }
}
