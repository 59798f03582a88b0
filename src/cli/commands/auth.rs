use clap::Subcommand;
use serde_json::json;

use crate::auth::{generate_jwt, Claims};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config;

#[derive(Subcommand)]
pub enum AuthCommands {
    #[command(about = "Issue a signed token with the configured secret")]
    Token {
        #[arg(long, help = "Token subject")]
        subject: String,
        #[arg(long, help = "Lifetime in minutes (defaults to ACCESS_TOKEN_EXPIRE_MINUTES)")]
        minutes: Option<i64>,
    },
}

pub async fn handle(cmd: AuthCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        AuthCommands::Token { subject, minutes } => {
            let security = &config::config().security;
            let claims = Claims::new(subject, minutes.unwrap_or(security.jwt_expiry_minutes));
            let token = generate_jwt(&claims, security)?;

            match output_format {
                OutputFormat::Json => output_success(
                    output_format,
                    "Token issued",
                    Some(json!({ "token": token, "expires_at": claims.exp })),
                ),
                OutputFormat::Text => {
                    println!("{}", token);
                    Ok(())
                }
            }
        }
    }
}
