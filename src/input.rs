use anyhow::{Result, bail};
use std::io::{self, BufRead, IsTerminal};
use zeroize::Zeroizing;

/// A flag or `CIPHERDESK_KEY` value counts only when non-empty.
fn explicit_secret(explicit: Option<String>) -> Option<Zeroizing<String>> {
    explicit.filter(|v| !v.is_empty()).map(Zeroizing::new)
}

/// One line from `input` with its line ending stripped.
fn read_line_from(input: &mut impl BufRead) -> Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    input.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    Ok(line)
}

fn check_confirmed(first: Zeroizing<String>, second: &str) -> Result<Zeroizing<String>> {
    if first.is_empty() {
        bail!("key cannot be empty");
    }
    if first.as_str() != second {
        bail!("keys do not match");
    }
    Ok(first)
}

/// Resolves a secret: explicit value (flag or `CIPHERDESK_KEY`), then a
/// line from piped stdin, then an interactive prompt.
pub fn read_secret(explicit: Option<String>, prompt: &str) -> Result<Zeroizing<String>> {
    if let Some(secret) = explicit_secret(explicit) {
        return Ok(secret);
    }

    let stdin = io::stdin();
    let secret = if stdin.is_terminal() {
        Zeroizing::new(rpassword::prompt_password(prompt)?)
    } else {
        //  echo "supersecret" | cipherdesk encrypt "text"
        read_line_from(&mut stdin.lock())?
    };

    if secret.is_empty() {
        bail!("no key provided");
    }
    Ok(secret)
}

/// Like [`read_secret`], but a new key has to be entered twice. Piped input
/// supplies both lines.
pub fn read_new_secret_with_confirmation(explicit: Option<String>) -> Result<Zeroizing<String>> {
    if let Some(secret) = explicit_secret(explicit) {
        return Ok(secret);
    }

    let stdin = io::stdin();
    if stdin.is_terminal() {
        let first = Zeroizing::new(rpassword::prompt_password("New key: ")?);
        let second = Zeroizing::new(rpassword::prompt_password("Confirm key: ")?);
        return check_confirmed(first, &second);
    }

    let mut handle = stdin.lock();
    let first = read_line_from(&mut handle)?;
    let second = read_line_from(&mut handle)?;
    check_confirmed(first, &second)
}
