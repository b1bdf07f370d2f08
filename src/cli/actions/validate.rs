use crate::{
    api::{
        types::{BatchValidationResult, EmailValidationResult, HealthResponse, QuickCheckResult},
        ValidationClient,
    },
    cli::{actions::Action, globals::GlobalArgs},
};
use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::{fs, path::Path};
use tracing::{debug, info};

/// Handle the API actions
pub async fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let client = ValidationClient::new(&globals.api)?;
    debug!("validation API: {}", client.base_url());

    match action {
        Action::Validate {
            email,
            options,
            post,
        } => {
            let result = if post {
                client.validate_email_post(&email, options).await?
            } else {
                client.validate_email(&email, options).await?
            };

            if let Ok(summary) = serde_json::from_value::<EmailValidationResult>(result.clone()) {
                info!(
                    valid = summary.valid,
                    score = summary.score,
                    risk = %summary.risk_level,
                    elapsed_ms = summary.validation_time_ms,
                    "validation finished"
                );
            }
            print_json(&result)?;
        }
        Action::Batch {
            mut emails,
            file,
            options,
        } => {
            if let Some(path) = file {
                emails.extend(read_email_file(&path)?);
            }
            if emails.is_empty() {
                bail!("no email addresses to validate");
            }

            let result = client.validate_batch(&emails, options).await?;

            if let Ok(summary) = serde_json::from_value::<BatchValidationResult>(result.clone()) {
                info!(
                    total = summary.total,
                    valid = summary.valid_count,
                    invalid = summary.invalid_count,
                    "batch validation finished"
                );
            }
            print_json(&result)?;
        }
        Action::Check { email } => {
            let result = client.quick_check(&email).await?;

            match serde_json::from_value::<QuickCheckResult>(result.clone()) {
                Ok(check) => println!("{}", quick_check_line(&check)),
                Err(_) => print_json(&result)?,
            }
        }
        Action::Health => {
            let result = client.health_check().await?;

            match serde_json::from_value::<HealthResponse>(result.clone()) {
                Ok(health) => println!(
                    "{} (version {}): {}",
                    health.status, health.version, health.message
                ),
                Err(_) => print_json(&result)?,
            }
        }
        Action::Login { .. } | Action::Logout | Action::Whoami => {
            bail!("not an API action")
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn quick_check_line(check: &QuickCheckResult) -> String {
    format!(
        "{}: {} (score {}, risk {})",
        check.email,
        if check.valid { "valid" } else { "invalid" },
        check.score,
        check.risk
    )
}

fn read_email_file(path: &Path) -> Result<Vec<String>> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read email list {}", path.display()))?;
    Ok(parse_email_list(&contents))
}

/// One address per line; blank lines and `#` comments are skipped.
fn parse_email_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RiskLevel;

    #[test]
    fn parse_email_list_skips_blanks_and_comments() {
        let contents = "# customers\nx@a.com\n\n  y@b.com  \n#z@c.com\n";
        assert_eq!(parse_email_list(contents), ["x@a.com", "y@b.com"]);
    }

    #[test]
    fn read_email_file_reports_missing_file() {
        let err = read_email_file(Path::new("/nonexistent/emails.txt")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/emails.txt"));
    }

    #[test]
    fn quick_check_line_formats_result() {
        let check = QuickCheckResult {
            email: "user@example.com".to_string(),
            valid: true,
            score: 85,
            risk: RiskLevel::Low,
        };
        assert_eq!(
            quick_check_line(&check),
            "user@example.com: valid (score 85, risk low)"
        );
    }
}
