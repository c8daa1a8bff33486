use anyhow::Context;
use serde_json::json;
use uuid::Uuid;

use crate::auth::{generate_jwt, Claims, Role};
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn issue(
    config: &AppConfig,
    role: &str,
    user_id: Option<Uuid>,
    hours: Option<u64>,
    output_format: OutputFormat,
) -> anyhow::Result<()> {
    let role: Role = role.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let user_id = user_id.unwrap_or_else(Uuid::new_v4);
    let hours = hours.unwrap_or(config.security.jwt_expiry_hours);

    let claims = Claims::new(user_id, role, hours)?;
    let expires_at = claims.exp;
    let token = generate_jwt(&claims, &config.security.jwt_secret).context("set JWT_SECRET first")?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "token": token,
                "user_id": user_id,
                "role": role,
                "expires_at": expires_at,
            })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
