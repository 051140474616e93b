//! StarCast terminal front end.

mod render;

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use scast_client::{ApiClient, ClientConfig};
use scast_models::{JobId, PersonaId};
use scast_session::{JobPoller, JobSession, PollStep, SessionConfig};

use crate::render::{print_new_updates, render_view};

const USAGE: &str = "Usage:
  scast-cli personas                 List available personas
  scast-cli create <persona> <topic> Submit a job and watch it
  scast-cli watch <job-id>           Watch an existing job
  scast-cli status <job-id>          One-shot status check";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Keep stdout for the rendered view; logs go through the filter
    let env_filter = EnvFilter::from_default_env().add_directive("scast=warn".parse().unwrap());
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(env_filter)
        .init();

    let client = Arc::new(ApiClient::new(ClientConfig::from_env())?);
    let config = SessionConfig::from_env();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.split_first().map(|(cmd, rest)| (cmd.as_str(), rest)) {
        Some(("personas", _)) => personas(&client).await,
        Some(("create", rest)) if rest.len() >= 2 => {
            let persona = PersonaId::from_string(rest[0].as_str());
            let topic = rest[1..].join(" ");
            create_and_watch(client, &config, &persona, &topic).await
        }
        Some(("watch", [job_id])) => {
            let session = Arc::new(JobSession::new(client, &config));
            watch(&session, JobId::from_string(job_id.as_str()), &config).await
        }
        Some(("status", [job_id])) => status(&client, JobId::from_string(job_id.as_str())).await,
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

async fn personas(client: &ApiClient) -> Result<()> {
    let personas = client.list_personas().await?;
    for persona in personas {
        println!("{:<16} {}", persona.id, persona.name);
    }
    Ok(())
}

async fn create_and_watch(
    client: Arc<ApiClient>,
    config: &SessionConfig,
    persona: &PersonaId,
    topic: &str,
) -> Result<()> {
    let session = Arc::new(JobSession::new(client, config));

    println!("Submitting \"{topic}\" for {persona}...");
    let job = match session.create_job(topic, persona).await {
        Ok(job) => job,
        Err(e) => {
            println!("{}", render_view(&session.view().await));
            bail!(e);
        }
    };

    watch(&session, job.job_id, config).await
}

async fn watch(session: &Arc<JobSession>, job_id: JobId, config: &SessionConfig) -> Result<()> {
    println!("Watching job {job_id}");

    let id = job_id.to_string();
    let poller = JobPoller::new(Arc::clone(session), job_id, config);
    let mut printed = 0;

    loop {
        let step = poller.poll_once().await;
        let view = session.view().await;
        printed = print_new_updates(view.job.as_ref(), printed);

        match step {
            PollStep::Continue => tokio::time::sleep(config.poll_interval).await,
            PollStep::Done(status) => {
                println!("{}", render_view(&view));
                if !matches!(status, scast_models::JobStatus::Completed) {
                    // Reset the session so a fresh request starts clean.
                    session.clear_job().await;
                    println!("Session cleared. Try again with `scast-cli create`.");
                }
                return Ok(());
            }
            PollStep::Abandoned => {
                println!("{}", render_view(&view));
                bail!("job {id} no longer tracked");
            }
        }
    }
}

async fn status(client: &ApiClient, job_id: JobId) -> Result<()> {
    let snapshot = client.job_status(&job_id).await?;
    println!("{} {}", snapshot.job_id, snapshot.status);
    if let Some(result_url) = &snapshot.result_url {
        println!("result: {result_url}");
    }
    if let Some(error) = &snapshot.error {
        println!("error: {error}");
    }
    Ok(())
}
