use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    ControllerOptions, FormValues, HttpScorer, SubmissionController, Transition, ViewState,
};
use shared::domain::{Gender, Source};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod ui;

use config::{load_settings, normalize_scorer_url};

const NOISY_MODULES: &[&str] = &["hyper", "hyper_util", "reqwest", "h2", "rustls"];

#[derive(Parser, Debug)]
#[command(name = "seimei", about = "Submit a name to the seimei handan scorer and print the reading")]
struct Args {
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    scorer_url: Option<String>,
    /// Give up on the scorer after this many seconds (0 waits forever).
    #[arg(long)]
    timeout_secs: Option<u64>,
    #[arg(long)]
    source: Option<Source>,
    /// Only probe the scorer's health endpoint.
    #[arg(long)]
    check: bool,
    #[arg(long, default_value = "")]
    last_name: String,
    #[arg(long, default_value = "")]
    first_name: String,
    #[arg(long, default_value = "m")]
    gender: Gender,
}

fn init_tracing(log_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let mut directives = log_filter.to_string();
        for module in NOISY_MODULES {
            directives.push_str(&format!(",{module}=warn"));
        }
        EnvFilter::new(directives)
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(url) = &args.scorer_url {
        settings.scorer_url = normalize_scorer_url(url);
    }
    if let Some(secs) = args.timeout_secs {
        settings.request_timeout_secs = Some(secs);
    }
    if let Some(source) = args.source {
        settings.source = source;
    }
    init_tracing(&settings.log_filter);

    let scorer = Arc::new(
        HttpScorer::new(&settings.scorer_url)
            .with_context(|| format!("cannot use scorer url '{}'", settings.scorer_url))?,
    );

    if args.check {
        let healthy = scorer
            .health_check()
            .await
            .with_context(|| format!("health check against {} failed", settings.scorer_url))?;
        println!("{}", if healthy { "ok" } else { "unhealthy" });
        return Ok(if healthy {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let controller = SubmissionController::new(
        scorer,
        ControllerOptions {
            request_timeout: settings.request_timeout(),
            preferred_source: settings.source,
        },
    );
    let form = FormValues::new(args.last_name, args.first_name, args.gender);

    let Transition { view, outcome } = controller.begin(ViewState::default(), &form);
    let Transition { view, outcome } = match outcome {
        Ok(pending) => {
            eprintln!("{}", view.submit.label);
            let answer = controller.dispatch(&pending).await;
            controller.finish(view, pending, answer)
        }
        Err(err) => Transition {
            view,
            outcome: Err(err),
        },
    };

    print!("{}", ui::render_text(&view));
    if let Some(notice) = &view.notice {
        eprintln!("{}", notice.alert_text());
    }

    match outcome {
        Ok(rendered) => {
            info!(source = ?rendered.source, "analysis rendered");
            Ok(ExitCode::SUCCESS)
        }
        Err(_) => Ok(ExitCode::FAILURE),
    }
}
