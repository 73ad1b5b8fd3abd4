use crate::config::GitHubConfig;

/// Try to run a CLI command and capture stdout as a token
fn try_cli_token(command: &str) -> Option<String> {
    let output = std::process::Command::new("sh")
        .args(["-c", command])
        .output()
        .ok()?;

    if output.status.success() {
        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !token.is_empty() {
            return Some(token);
        }
    }
    None
}

/// Stored token path: ~/.config/reposcope/token
fn token_path() -> Option<std::path::PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("reposcope").join("token"))
}

/// Load token from disk
fn load_stored_token() -> Option<String> {
    let path = token_path()?;
    let token = std::fs::read_to_string(path).ok()?;
    let token = token.trim().to_string();
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Save token to disk
fn save_token(token: &str) -> std::io::Result<()> {
    if let Some(path) = token_path() {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, token)?;
    }
    Ok(())
}

/// Resolve a GitHub token, trying multiple sources:
/// 1. Environment variable (from config)
/// 2. Stored token from ~/.config/reposcope/token
/// 3. CLI command (from config), cached to storage on success
///
/// Returns None when no source yields a token; requests then run
/// unauthenticated against the lower anonymous rate limit.
pub fn resolve_token(config: &GitHubConfig) -> Option<String> {
    if let Some(env_var) = &config.token_env {
        if let Ok(token) = std::env::var(env_var) {
            if !token.is_empty() {
                return Some(token);
            }
        }
    }

    if let Some(token) = load_stored_token() {
        return Some(token);
    }

    if let Some(cmd) = &config.token_command {
        if let Some(token) = try_cli_token(cmd) {
            if let Err(e) = save_token(&token) {
                tracing::warn!("could not store token: {}", e);
            }
            return Some(token);
        }
    }

    None
}
