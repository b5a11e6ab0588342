use crate::config::IdentityOptions;
use crate::prelude::{eprintln, println, *};
use bfhl_core::classify::{categorize, classify};
use bfhl_core::envelope::{extract_tokens, success, SuccessEnvelope};
use colored::Colorize;
use tokio::io::AsyncReadExt;

#[derive(Debug, clap::Args, Clone)]
pub struct ClassifyOptions {
    /// Tokens to classify (e.g., `bfhl classify -- a 1 334 -4 R '$'`)
    #[arg(value_name = "TOKEN", allow_hyphen_values = true)]
    pub tokens: Vec<String>,

    /// Read a `{"data": [...]}` payload from a file, or "-" for stdin
    #[arg(short, long, value_name = "FILE", conflicts_with = "tokens")]
    pub input: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub identity: IdentityOptions,
}

pub async fn run(options: ClassifyOptions, global: crate::Global) -> Result<()> {
    let tokens = read_tokens(&options).await?;

    if global.verbose {
        for token in &tokens {
            eprintln!("{token:?} -> {:?}", categorize(token));
        }
        eprintln!();
    }

    let envelope = success(&options.identity.into(), classify(&tokens));

    if options.json {
        println!("{}", format_json(&envelope)?);
    } else {
        println!("{}", format_text(&envelope));
    }

    Ok(())
}

async fn read_tokens(options: &ClassifyOptions) -> Result<Vec<String>> {
    match options.input.as_deref() {
        Some("-") => {
            let mut raw = String::new();
            tokio::io::stdin()
                .read_to_string(&mut raw)
                .await
                .context("Failed to read payload from stdin")?;
            tokens_from_payload(&raw)
        }
        Some(path) => {
            let raw = tokio::fs::read_to_string(path)
                .await
                .with_context(|| f!("Failed to read payload from {path}"))?;
            tokens_from_payload(&raw)
        }
        None if options.tokens.is_empty() => Err(eyre!(
            "No tokens given. Pass tokens as arguments or a payload with --input"
        )),
        None => Ok(options.tokens.clone()),
    }
}

/// Parse a raw `{"data": [...]}` payload into tokens
fn tokens_from_payload(raw: &str) -> Result<Vec<String>> {
    let payload: serde_json::Value =
        serde_json::from_str(raw).context("Payload is not valid JSON")?;

    extract_tokens(&payload).map_err(|e| eyre!("{e}"))
}

fn format_json(envelope: &SuccessEnvelope) -> Result<String> {
    serde_json::to_string_pretty(envelope).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_bucket(items: &[String]) -> String {
    if items.is_empty() {
        "(none)".to_string()
    } else {
        items
            .iter()
            .map(|item| f!("{item:?}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn format_text(envelope: &SuccessEnvelope) -> String {
    let mut output = String::new();
    let result = &envelope.result;

    output.push_str(&f!("\n{}\n", "=".repeat(60).bright_cyan()));
    output.push_str(&f!("{}\n", "CLASSIFICATION RESULT".bright_cyan().bold()));
    output.push_str(&f!("{}\n\n", "=".repeat(60).bright_cyan()));

    let mut table = new_table();
    table.add_row(prettytable::row!["User ID", envelope.identity.user_id]);
    table.add_row(prettytable::row!["Email", envelope.identity.email]);
    table.add_row(prettytable::row!["Roll Number", envelope.identity.roll_number]);
    table.add_row(prettytable::row!["Odd Numbers", format_bucket(&result.odd_numbers)]);
    table.add_row(prettytable::row!["Even Numbers", format_bucket(&result.even_numbers)]);
    table.add_row(prettytable::row!["Alphabets", format_bucket(&result.alphabets)]);
    table.add_row(prettytable::row![
        "Special Characters",
        format_bucket(&result.special_characters)
    ]);
    table.add_row(prettytable::row!["Sum", result.sum]);
    table.add_row(prettytable::row!["Concat String", result.concat_string]);

    output.push_str(&table.to_string());

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use bfhl_core::envelope::Identity;

    fn identity() -> Identity {
        Identity {
            user_id: "jane_doe_17091999".to_string(),
            email: "jane@example.com".to_string(),
            roll_number: "XYZ789".to_string(),
        }
    }

    #[test]
    fn test_tokens_from_payload() {
        let tokens = tokens_from_payload(r#"{"data": ["a", 1, "$"]}"#).unwrap();
        assert_eq!(tokens, vec!["a", "1", "$"]);
    }

    #[test]
    fn test_tokens_from_payload_invalid_shape() {
        let err = tokens_from_payload(r#"{"data": "a"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Invalid input. 'data' should be an array.");
    }

    #[test]
    fn test_tokens_from_payload_malformed_json() {
        assert!(tokens_from_payload("{").is_err());
    }

    #[test]
    fn test_format_bucket() {
        assert_eq!(format_bucket(&[]), "(none)");
        assert_eq!(
            format_bucket(&["334".to_string(), "4".to_string()]),
            "\"334\", \"4\""
        );
    }

    #[test]
    fn test_format_text_contains_result() {
        let envelope = success(&identity(), classify(&["a", "1", "334", "4", "R", "$"]));
        let text = format_text(&envelope);

        assert!(text.contains("CLASSIFICATION RESULT"));
        assert!(text.contains("jane_doe_17091999"));
        assert!(text.contains("\"334\", \"4\""));
        assert!(text.contains("339"));
        assert!(text.contains("Ra"));
    }

    #[test]
    fn test_format_json_round_trips() {
        let envelope = success(&identity(), classify(&["-4"]));
        let json = format_json(&envelope).unwrap();

        let parsed: SuccessEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, envelope);
    }

    #[tokio::test]
    async fn test_read_tokens_requires_input() {
        let options = ClassifyOptions {
            tokens: vec![],
            input: None,
            json: false,
            identity: IdentityOptions {
                user_id: "u".to_string(),
                email: "e".to_string(),
                roll_number: "r".to_string(),
            },
        };

        assert!(read_tokens(&options).await.is_err());
    }
}
