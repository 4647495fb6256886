use clap::Args;
use serde_json::json;

use crate::auth::{self, Claims};
use crate::cli::OutputFormat;

#[derive(Args, Debug)]
pub struct TokenArgs {
    #[arg(long, help = "Username placed in the token")]
    pub username: String,

    #[arg(long, help = "Grant administrator capability")]
    pub admin: bool,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let claims = Claims::new(args.username, args.admin);
    let token = auth::generate_jwt(&claims)?;

    match output_format {
        OutputFormat::Json => println!(
            "{}",
            json!({
                "token": token,
                "username": claims.username,
                "isAdmin": claims.is_admin,
                "exp": claims.exp,
            })
        ),
        OutputFormat::Text => println!("{}", token),
    }
    Ok(())
}
