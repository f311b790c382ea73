use anyhow::{Context, Result};
use colored::Colorize;
use hms_client::{Session, SessionState};

use crate::output::{print_error, print_success};

pub fn login(session: &Session, server: &str, token: &str) -> Result<()> {
    let token = token.trim();
    if token.is_empty() {
        anyhow::bail!("--token must not be empty");
    }
    session.login(token).context("Failed to store session token")?;
    print_success(&format!("Session token stored for {}", server.cyan()));
    Ok(())
}

pub fn logout(session: &Session, profile: &str) -> Result<()> {
    if session.clear().context("Failed to remove session token")? {
        print_success("Logged out (session token removed)");
    } else {
        println!("No session token found for profile \"{profile}\"");
    }
    Ok(())
}

pub fn whoami(session: &Session, profile: &str, server: &str) -> Result<()> {
    println!("{}: {}", "Profile".cyan(), profile);
    println!("{}: {}", "Server".cyan(), server.cyan());
    match session.token().context("Failed to read session token")? {
        Some(token) => {
            let state = match session.state() {
                SessionState::Expired => "expired",
                _ => "authenticated",
            };
            println!("{}: {} (token: {})", "Session".cyan(), state, mask(&token));
        }
        None => print_error(&format!("Not logged in (profile: \"{profile}\")")),
    }
    Ok(())
}

/// First and last eight characters of long tokens.
fn mask(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 20 {
        return token.to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 8..].iter().collect();
    format!("{head}...{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use hms_client::FileSessionStore;

    #[test]
    fn masks_long_tokens_only() {
        assert_eq!(mask("short"), "short");
        assert_eq!(
            mask("eyJhbGciOiJIUzI1NiJ9.payload.signature"),
            "eyJhbGci...ignature"
        );
    }

    #[test]
    fn login_then_logout_uses_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.default.json"));
        let path = store.path().to_path_buf();
        let session = Session::new(store);

        login(&session, "http://127.0.0.1:5000", " tok-1 ").unwrap();
        assert!(path.exists());
        assert_eq!(session.token().unwrap().as_deref(), Some("tok-1"));

        logout(&session, "default").unwrap();
        assert!(!path.exists());
        assert!(login(&session, "http://127.0.0.1:5000", "  ").is_err());
    }
}
