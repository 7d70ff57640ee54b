use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use youth_council_client::{
    ApiClient, ClientConfig, FileTokenStore, Mount, ScreenCore, Session,
};
use youth_council_shared::{validation, Category, FilePart, Resource};

use crate::cli::GlobalArgs;

/// Environment config with command-line overrides applied on top.
pub fn load_config(args: &GlobalArgs) -> Result<ClientConfig> {
    let env_config = ClientConfig::from_env().context("failed to read client config")?;
    let mut config = match args.api_base.as_deref() {
        Some(api_base) => ClientConfig::new(api_base)
            .context("invalid --api-base")?
            .with_token_file(env_config.token_file().clone()),
        None => env_config,
    };
    if let Some(asset_base) = args.asset_base.as_deref() {
        config = config
            .with_asset_base(asset_base)
            .context("invalid --asset-base")?;
    }
    if let Some(token_file) = &args.token_file {
        config = config.with_token_file(token_file.clone());
    }
    Ok(config)
}

/// API client whose session lives in the configured token file.
pub fn connect(args: &GlobalArgs) -> Result<ApiClient> {
    let config = load_config(args)?;
    let session = Session::new(FileTokenStore::new(config.token_file().clone()));
    tracing::debug!(
        api_base = config.api_base(),
        token_file = %config.token_file().display(),
        "client configured"
    );
    ApiClient::new(config, session).context("failed to build HTTP client")
}

/// Mount an admin screen, failing when there is no usable session.
pub async fn require_session<R: Resource>(screen: &ScreenCore<R>) -> Result<()> {
    if screen.mount().await == Mount::RedirectToLogin {
        bail!("not signed in (or the session expired); run `yc-cli login` first")
    }
    if let Some(notice) = screen.notice() {
        bail!("{}", notice.message())
    }
    Ok(())
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read a local file into an upload part named after the file.
pub fn load_file_part(path: &Path) -> Result<FilePart> {
    let file_name = file_name_of(path)?;
    let bytes = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(FilePart::new(file_name, bytes))
}

/// Report upload part; size and type are checked from metadata so an
/// oversized file is never read into memory.
pub fn load_report_part(path: &Path) -> Result<FilePart> {
    let size = fs::metadata(path)
        .with_context(|| format!("failed to read {}", path.display()))?
        .len();
    validation::validate_report_file(file_name_of(path)?, size)
        .with_context(|| format!("cannot upload {}", path.display()))?;
    load_file_part(path)
}

fn file_name_of(path: &Path) -> Result<&str> {
    path.file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("not a file path: {}", path.display()))
}

/// `""` clears the committee; anything else must name a category.
pub fn parse_committee(raw: &str) -> Result<Option<Category>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    Ok(Some(raw.parse()?))
}

/// `true` only for an explicit yes answer.
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Ask a `[y/N]` question on stderr and read the answer from `input`.
pub fn confirm_with(prompt: &str, input: &mut impl BufRead) -> bool {
    eprint!("{prompt} [y/N] ");
    io::stderr().flush().ok();
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(err) => {
            tracing::warn!("failed to read confirmation: {err}");
            false
        },
    }
}

/// Confirmation source for destructive commands.
pub fn confirmer(yes: bool) -> impl FnMut(&str) -> bool {
    move |prompt: &str| yes || confirm_with(prompt, &mut io::stdin().lock())
}

pub fn read_password() -> Result<String> {
    eprint!("Password: ");
    io::stderr().flush()?;
    let mut password = String::new();
    io::stdin()
        .lock()
        .read_line(&mut password)
        .context("failed to read password from stdin")?;
    Ok(password.trim_end_matches(['\r', '\n']).to_string())
}
