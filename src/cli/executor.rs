//! Command executor for dispatching CLI commands
//!
//! Loads the snapshot, runs one command through the services and writes the
//! snapshot back when the command changed something.

use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::error::{AppError, AppResult};
use crate::models::NewUser;
use crate::services::CreateJobInput;
use crate::state::AppState;

/// Execute a CLI command with the given settings and print its result.
///
/// # Errors
/// Returns errors from the store or the services unchanged. The snapshot is
/// left untouched when the command fails.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    let state = AppState::load(&settings).await?;
    let output = run_command(&state, &cli.command).await?;

    if cli.command.mutates_store() {
        state.persist(&settings).await?;
        tracing::debug!(
            path = %settings.store.snapshot_path.display(),
            "Snapshot written"
        );
    }

    println!("{}", output);
    Ok(())
}

/// Runs a single command against `state`, returning the text to print.
pub async fn run_command(state: &AppState, command: &Commands) -> AppResult<String> {
    match command {
        Commands::CreateUser { username } => {
            let user = state.store.create_user(NewUser {
                username: username.clone(),
            });
            tracing::info!(user_id = %user.id, "User {} created", user.username);
            Ok(user.id)
        }
        Commands::PostJob {
            user_id,
            title,
            description,
            skills,
            no_skills,
            deadline,
            max_applicants,
            job_type,
        } => {
            let input = CreateJobInput {
                title: title.clone(),
                description: description.clone(),
                skills_required: match (*no_skills, skills.is_empty()) {
                    (true, _) => Some(Vec::new()),
                    (false, true) => None,
                    (false, false) => Some(skills.clone()),
                },
                deadline: deadline.clone(),
                max_applicants: *max_applicants,
                job_type: job_type.clone(),
                user_id: user_id.clone(),
            };
            state.services.jobs.create_job(input).await?;
            Ok("Job posted".to_string())
        }
        Commands::Follow { user_id, target_id } => {
            state
                .services
                .relationships
                .follow_user(Some(user_id), Some(target_id))
                .await?;
            Ok(format!("{} now follows {}", user_id, target_id))
        }
        Commands::Unfollow { user_id, target_id } => {
            state
                .services
                .relationships
                .unfollow_user(Some(user_id), Some(target_id))
                .await?;
            Ok(format!("{} no longer follows {}", user_id, target_id))
        }
        Commands::ShowUser { user_id } => {
            let user = state
                .store
                .user(user_id)
                .ok_or_else(|| AppError::not_found("user", "id", user_id.as_str()))?;
            to_pretty_json(&user)
        }
        Commands::ListJobs { user_id } => {
            if state.store.user(user_id).is_none() {
                return Err(AppError::not_found("user", "id", user_id.as_str()));
            }
            let jobs = state.services.jobs.jobs_posted_by(user_id).await?;
            to_pretty_json(&jobs)
        }
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::from(anyhow::Error::from(e)))
}
