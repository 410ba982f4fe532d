mod prompt;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pwd_policy::{
    Policy, PolicyConfig, PolicyReport, Verdict, config_path_from_env, denylist_path_from_env,
};
use secrecy::SecretString;

#[derive(Parser, Debug)]
#[command(
    name = "pwd-policy",
    version,
    about = "Check a password against a composable policy"
)]
struct Cli {
    /// Password to check; omit to be prompted
    password: Option<String>,

    /// Force visible prompt (useful on Git Bash)
    #[arg(long)]
    visible: bool,

    /// Policy file (TOML) [env: PWD_POLICY_CONFIG]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Replacement deny-list, one password per line [env: PWD_DENYLIST_PATH]
    #[arg(long, value_name = "PATH")]
    deny_list: Option<PathBuf>,

    /// Require every rule to pass
    #[arg(long)]
    strict: bool,
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Policy file first, then `--deny-list`/env overrides, then `--strict`.
fn load_policy(cli: &Cli) -> Result<Policy> {
    let mut config = match cli.config.clone().or_else(config_path_from_env) {
        Some(path) => PolicyConfig::load(&path)
            .with_context(|| format!("loading policy file {}", path.display()))?,
        None => PolicyConfig::default(),
    };

    if let Some(path) = &cli.deny_list {
        config.deny_list = Some(path.clone());
    } else if config.deny_list.is_none() {
        config.deny_list = denylist_path_from_env();
    }

    if cli.strict {
        let rule_count = config
            .rules
            .as_ref()
            .map_or_else(|| Policy::standard_rules().len(), Vec::len);
        config.required_score = Some(rule_count);
    }

    config.build().context("building password policy")
}

fn render(report: &PolicyReport, required: usize) -> String {
    let clamped = report.score.min(required);
    let verdict = Verdict::from_score(report.score, required);

    let mut out = format!("Score: {clamped}/{required} - {verdict}\n");
    if !report.messages.is_empty() {
        out.push_str("Suggestions:\n");
        for message in &report.messages {
            out.push_str("- ");
            out.push_str(message);
            out.push('\n');
        }
    }
    out
}

fn run(cli: Cli) -> Result<()> {
    let policy = load_policy(&cli)?;
    tracing::debug!(
        rules = policy.len(),
        required = policy.required_score(),
        "policy ready"
    );

    let password = match cli.password {
        Some(password) => SecretString::new(password.into()),
        None => prompt::prompt_password(cli.visible).context("reading password")?,
    };

    let report = policy.evaluate_secret(&password);
    print!("{}", render(&report, policy.required_score()));
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}
