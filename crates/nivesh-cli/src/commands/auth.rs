//! Sign in/out commands

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use nivesh_core::auth::default_session_path;
use nivesh_core::{AuthClient, Config, Session};

pub async fn cmd_login(email: &str, password: Option<&str>) -> Result<()> {
    let config = Config::load()?;
    let password = match password {
        Some(p) => p.to_string(),
        None => prompt_password()?,
    };

    let auth = AuthClient::new(&config.backend_url, &config.api_key);
    let session = auth.login(email, &password).await?;

    let path = default_session_path()?;
    session.save(&path)?;

    println!(
        "✅ Signed in as {}",
        session.email.as_deref().unwrap_or(email)
    );
    Ok(())
}

pub async fn cmd_logout() -> Result<()> {
    let path = default_session_path()?;
    match Session::load(&path)? {
        Some(session) => {
            if let Ok(config) = Config::load() {
                let auth = AuthClient::new(&config.backend_url, &config.api_key);
                auth.logout(&session).await;
            }
            Session::delete(&path)?;
            println!("👋 Signed out");
        }
        None => println!("Not signed in"),
    }
    Ok(())
}

fn prompt_password() -> Result<String> {
    eprint!("Password: ");
    std::io::stderr().flush()?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
