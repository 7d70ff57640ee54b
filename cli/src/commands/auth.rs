use anyhow::{bail, Context, Result};
use serde::Serialize;
use youth_council_client::ApiClient;

use crate::utils::{self, print_json};

#[derive(Serialize)]
struct LoginResult<'a> {
    username: &'a str,
    token_type: String,
    token_file: String,
}

pub async fn login(client: &ApiClient, username: &str, password: Option<String>) -> Result<()> {
    let password = match password {
        Some(password) => password,
        None => utils::read_password()?,
    };
    if password.is_empty() {
        bail!("password must not be empty")
    }

    let response = client
        .login(username, &password)
        .await
        .context("login failed")?;
    print_json(&LoginResult {
        username,
        token_type: response.token_type,
        token_file: client.config().token_file().display().to_string(),
    })
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.logout().context("failed to clear session token")?;
    tracing::info!("Removed {}.", client.config().token_file().display());
    Ok(())
}
