//! Command-line interface for Matter conformance expressions
//!
//! Parses conformance text and evaluates it against features, attributes and
//! entities given on the command line.

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use matter_conformance::ast::JsonCodec;
use matter_conformance::evaluator::REVISION;
use matter_conformance::{
    Context, MemoryStore, Value, is_zigbee_only, parse_conformance, parse_conformance_strict,
};
use rust_decimal::Decimal;

#[derive(Parser)]
#[command(name = "matter-conformance")]
#[command(about = "Parse and evaluate Matter specification conformance expressions")]
#[command(version)]
#[command(author = "OctoFHIR Team <funyloony@gmail.com>")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse conformance text and describe it
    Parse {
        /// Conformance text, e.g. "[LT | DF].a+"
        text: String,
        /// Print the members as JSON
        #[arg(short, long)]
        json: bool,
    },
    /// Evaluate conformance text against a context
    Eval {
        /// Conformance text, e.g. "AB, [CD]"
        text: String,
        /// Bind a value: NAME (true) or NAME=VALUE
        #[arg(short = 's', long = "set", value_name = "NAME[=VALUE]")]
        values: Vec<String>,
        /// Specification revision
        #[arg(short, long)]
        revision: Option<u64>,
        /// Entity with its own conformance: NAME=CONFORMANCE
        #[arg(short = 'e', long = "entity", value_name = "NAME=CONFORMANCE")]
        entities: Vec<String>,
        /// Cross-reference with its own conformance: ID=CONFORMANCE
        #[arg(long = "reference", value_name = "ID=CONFORMANCE")]
        references: Vec<String>,
    },
}

fn main() -> Result<()> {
    human_panic::setup_panic!();
    env_logger::init();

    let cli = Cli::parse();
    let lines = match cli.command {
        Commands::Parse { text, json } => parse_report(&text, json)?,
        Commands::Eval {
            text,
            values,
            revision,
            entities,
            references,
        } => eval_report(&text, &values, revision, &entities, &references)?,
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn parse_report(text: &str, json: bool) -> Result<Vec<String>> {
    let set = parse_conformance_strict(text)?;

    let mut lines = vec![
        format!("Conformance: {set}"),
        format!("Description: {}", set.description()),
    ];
    let names = set.names();
    if !names.is_empty() {
        lines.push(format!("Identifiers: {}", names.join(", ")));
    }

    if json {
        let members = set
            .iter()
            .map(|member| member.to_json_value())
            .collect::<Result<Vec<_>, _>>()?;
        lines.push(serde_json::to_string_pretty(&members)?);
    }
    Ok(lines)
}

fn eval_report(
    text: &str,
    values: &[String],
    revision: Option<u64>,
    entities: &[String],
    references: &[String],
) -> Result<Vec<String>> {
    let set = parse_conformance_strict(text)?;

    let mut store = MemoryStore::new();
    for entry in entities {
        let (name, conformance) = split_pair(entry, "--entity")?;
        store = store.with_identifier(name, parse_conformance(conformance));
    }
    for entry in references {
        let (id, conformance) = split_pair(entry, "--reference")?;
        store = store.with_reference(id, parse_conformance(conformance));
    }

    let mut ctx = Context::new().with_store(&store);
    for entry in values {
        let (name, value) = match entry.split_once('=') {
            Some((name, value)) => (name.trim(), parse_value(value.trim())?),
            None => (entry.trim(), Value::Boolean(true)),
        };
        if name == REVISION {
            bail!("use --revision to bind {REVISION}");
        }
        ctx.set_value(name, value);
    }
    if let Some(revision) = revision {
        ctx.set_value(REVISION, revision);
    }

    let result = set
        .eval(&mut ctx)
        .with_context(|| format!("Failed to evaluate \"{text}\""))?;
    // Classification runs without the bound values, so comparisons may fail here
    let zigbee_only = match is_zigbee_only(Some(&store), &set) {
        Ok(flag) => flag.to_string(),
        Err(err) => {
            log::debug!("Zigbee classification of \"{text}\" failed: {err}");
            format!("unknown ({err})")
        }
    };

    Ok(vec![
        format!("Conformance: {set}"),
        format!("State: {}", result.state),
        format!("Confidence: {}", result.confidence),
        format!("Zigbee only: {zigbee_only}"),
    ])
}

fn split_pair<'a>(entry: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    match entry.split_once('=') {
        Some((name, conformance)) if !name.trim().is_empty() => {
            Ok((name.trim(), conformance.trim()))
        }
        _ => bail!("{flag} expects NAME=CONFORMANCE, got \"{entry}\""),
    }
}

fn parse_value(raw: &str) -> Result<Value> {
    let value = match raw {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "null" => Value::Null,
        _ => {
            if let Some(hex) = raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
                let parsed = u64::from_str_radix(hex, 16)
                    .with_context(|| format!("invalid hex value \"{raw}\""))?;
                Value::Unsigned(parsed)
            } else if let Ok(int) = raw.parse::<i64>() {
                Value::Integer(int)
            } else if let Ok(decimal) = raw.parse::<Decimal>() {
                Value::Decimal(decimal)
            } else {
                Value::StatusCode(raw.to_string())
            }
        }
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|item| item.to_string()).collect()
    }

    #[test]
    fn test_eval_report_keeps_result_when_classification_fails() {
        let lines = eval_report("MaxLevel > 10", &strings(&["MaxLevel=11"]), None, &[], &[])
            .unwrap();
        assert_eq!(
            &lines[..3],
            &strings(&[
                "Conformance: MaxLevel > 10",
                "State: mandatory",
                "Confidence: definite",
            ])[..]
        );
        assert!(lines[3].starts_with("Zigbee only: unknown ("), "{}", lines[3]);
    }

    #[test]
    fn test_eval_report() {
        let lines = eval_report("Zigbee", &[], None, &[], &[]).unwrap();
        assert_eq!(
            lines,
            strings(&[
                "Conformance: Zigbee",
                "State: disallowed",
                "Confidence: definite",
                "Zigbee only: true",
            ])
        );

        let lines = eval_report(
            "[Scenes], O",
            &strings(&["LT"]),
            Some(4),
            &strings(&["Scenes=LT"]),
            &[],
        )
        .unwrap();
        assert_eq!(lines[1], "State: optional");
        assert_eq!(lines[3], "Zigbee only: false");
    }

    #[test]
    fn test_eval_report_rejects_bad_input() {
        assert!(eval_report("AB", &strings(&["Rev=3"]), None, &[], &[]).is_err());
        assert!(eval_report("AB", &[], None, &strings(&["=M"]), &[]).is_err());
        assert!(eval_report("[AB |", &[], None, &[], &[]).is_err());
    }

    #[test]
    fn test_parse_report() {
        let lines = parse_report("AB, [CD]", false).unwrap();
        assert_eq!(
            lines,
            strings(&[
                "Conformance: AB, [CD]",
                "Description: mandatory if AB, otherwise optional if CD",
                "Identifiers: AB, CD",
            ])
        );
        let lines = parse_report("M", true).unwrap();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with('['));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("0x10").unwrap(), Value::Unsigned(16));
        assert_eq!(parse_value("-3").unwrap(), Value::Integer(-3));
        assert_eq!(parse_value("null").unwrap(), Value::Null);
        assert_eq!(
            parse_value("Busy").unwrap(),
            Value::StatusCode("Busy".to_string())
        );
        assert!(parse_value("0xZZ").is_err());
    }
}
