use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    config::{load_settings_from, normalize_service_url, ClientSettings, DEFAULT_CONFIG_FILE},
    ActionFailure, RepositoryContainer, TestManagementService,
};
use serde::Serialize;
use serde_json::Value;
use shared::{
    domain::{GroupId, ProjectId, TestMatrixId, TestResultId, TestStepId},
    protocol::{AddNewTestTargetPayload, DeleteGroupPayload, NoteDestination, NoteLocation},
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Test management client")]
struct Cli {
    /// Overrides the service URL from config and environment.
    #[arg(long, global = true)]
    service_url: Option<String>,
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    ShowProject {
        #[arg(long)]
        project_id: Option<String>,
    },
    AddTestTarget {
        test_matrix_id: String,
        group_id: String,
        name: String,
    },
    DeleteGroup {
        test_matrix_id: String,
        group_id: String,
    },
    MoveBug(MoveNoteArgs),
    MoveNotice(MoveNoteArgs),
    ExportScreenshots {
        test_result_id: String,
    },
}

#[derive(Args, Debug)]
struct MoveNoteArgs {
    test_result_id: String,
    from_test_step_id: String,
    index: usize,
    to_test_step_id: String,
}

impl MoveNoteArgs {
    fn location(&self) -> NoteLocation {
        NoteLocation {
            test_step_id: TestStepId::from(self.from_test_step_id.as_str()),
            index: self.index,
        }
    }

    fn destination(&self) -> NoteDestination {
        NoteDestination {
            test_step_id: TestStepId::from(self.to_test_step_id.as_str()),
        }
    }
}

fn load_settings(cli: &Cli) -> Result<ClientSettings> {
    let mut settings = load_settings_from(&cli.config)?;
    if let Some(service_url) = &cli.service_url {
        settings.service_url = normalize_service_url(service_url)?;
    }
    Ok(settings)
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).context("failed to encode output")
}

async fn run(
    service: &mut TestManagementService<RepositoryContainer>,
    settings: &ClientSettings,
    command: Command,
) -> Result<Value> {
    match command {
        Command::ShowProject { project_id } => {
            let project_id = project_id
                .or_else(|| settings.project_id.clone())
                .context("no project id given and none configured")?;
            let project = service.load_project(&ProjectId::new(project_id)).await?;
            to_json(&project)
        }
        Command::AddTestTarget {
            test_matrix_id,
            group_id,
            name,
        } => {
            let test_target = service
                .add_new_test_target(&AddNewTestTargetPayload {
                    test_matrix_id: TestMatrixId::new(test_matrix_id),
                    group_id: GroupId::new(group_id),
                    test_target_name: name,
                })
                .await?;
            to_json(&test_target)
        }
        Command::DeleteGroup {
            test_matrix_id,
            group_id,
        } => {
            let test_matrix = service
                .delete_group(&DeleteGroupPayload {
                    test_matrix_id: TestMatrixId::new(test_matrix_id),
                    group_id: GroupId::new(group_id),
                })
                .await?;
            to_json(&test_matrix)
        }
        Command::MoveBug(args) => {
            let moved = service
                .move_bug(
                    &TestResultId::from(args.test_result_id.as_str()),
                    &args.location(),
                    &args.destination(),
                )
                .await?;
            to_json(&moved)
        }
        Command::MoveNotice(args) => {
            let moved = service
                .move_notice(
                    &TestResultId::from(args.test_result_id.as_str()),
                    &args.location(),
                    &args.destination(),
                )
                .await?;
            to_json(&moved)
        }
        Command::ExportScreenshots { test_result_id } => {
            let url = service
                .export_screenshots(&TestResultId::new(test_result_id))
                .await?;
            Ok(Value::String(url))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;
    debug!(service_url = %settings.service_url, "tool: settings loaded");

    let mut service = client_core::connect(&settings)?;
    match run(&mut service, &settings, cli.command).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        }
        Err(err) => match err.downcast_ref::<ActionFailure>() {
            Some(failure) => {
                eprintln!("{}", failure.message_key);
                std::process::exit(1);
            }
            None => Err(err),
        },
    }
}
