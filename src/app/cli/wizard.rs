//! Interactive engagement builder backing `clusterforge new`.
//!
//! Every text answer is checked with the same validators the engagement
//! loader uses; dialoguer re-asks until the validator accepts. `Ok(None)`
//! means the user aborted.

use std::io::ErrorKind;

use dialoguer::{Confirm, Error as DialoguerError, Input, Select};

use crate::domain::validation::{self, ValidationError};
use crate::domain::{AppError, ClusterEntry, EngagementFile, Scheduler, SubmissionType, Team};

pub(super) fn collect(team: Option<Team>) -> Result<Option<EngagementFile>, AppError> {
    let Some(organization) = ask("Organization name", None, validation::validate_organization)?
    else {
        return Ok(None);
    };
    let Some(abbreviation) =
        ask("Abbreviation (letters, optional)", Some(""), validation::validate_abbreviation)?
    else {
        return Ok(None);
    };
    let Some(contact) =
        ask("Contact name", Some(validation::DEFAULT_CONTACT), validation::validate_contact)?
    else {
        return Ok(None);
    };
    let case_number = if team == Some(Team::Install) {
        let Some(raw) = ask("Case number (optional)", Some(""), validation::parse_case_number)? else {
            return Ok(None);
        };
        validation::parse_case_number(&raw)?
    } else {
        None
    };

    let mut clusters = Vec::new();
    loop {
        let Some(cluster) = collect_cluster()? else {
            return Ok(None);
        };
        clusters.push(cluster);
        match confirm("Add another cluster?", false)? {
            Some(true) => continue,
            Some(false) => break,
            None => return Ok(None),
        }
    }

    Ok(Some(EngagementFile {
        organization,
        abbreviation: non_empty(abbreviation),
        contact: non_empty(contact),
        case_number,
        clusters,
    }))
}

fn collect_cluster() -> Result<Option<ClusterEntry>, AppError> {
    let Some(name) =
        ask("Cluster name", Some(validation::DEFAULT_CLUSTER_NAME), validation::validate_cluster_name)?
    else {
        return Ok(None);
    };
    let Some(scheduler) = select("Scheduler", &Scheduler::ALL, 0, Scheduler::display_name)? else {
        return Ok(None);
    };
    let Some(submission) =
        select("Submission type", &SubmissionType::ALL, 2, SubmissionType::name)?
    else {
        return Ok(None);
    };
    let default_workers = validation::DEFAULT_WORKERS.to_string();
    let Some(workers) =
        ask("Number of workers", Some(&default_workers), validation::parse_worker_count)?
    else {
        return Ok(None);
    };
    let workers = u64::from(validation::parse_worker_count(&workers)?);
    if workers < u64::from(validation::RECOMMENDED_MIN_WORKERS) {
        tracing::warn!(workers, "Worker count is unusually small for a cluster license");
    }

    let Some(shared_filesystem) = confirm("Do clients share a filesystem with the cluster?", true)?
    else {
        return Ok(None);
    };

    let (matlab_root, hostname) = if submission.includes_desktop() {
        let Some(root) = ask("MATLAB root on the cluster", None, validation::validate_matlab_root)?
        else {
            return Ok(None);
        };
        let Some(host) = ask("Cluster login hostname", None, validation::validate_hostname)? else {
            return Ok(None);
        };
        (Some(root), Some(host))
    } else {
        (None, None)
    };

    let Some(custom_mpi) = confirm("Ship a custom MPI configuration?", false)? else {
        return Ok(None);
    };
    let Some(include_remote_config) = confirm("Include remote profile configs?", false)? else {
        return Ok(None);
    };

    Ok(Some(ClusterEntry {
        name: Some(name),
        scheduler,
        submission,
        workers: Some(workers),
        shared_filesystem,
        matlab_root,
        hostname,
        custom_mpi,
        include_remote_config,
    }))
}

/// Ask for text until `validate` accepts it; returns the trimmed answer.
fn ask<T>(
    prompt: &str,
    default: Option<&str>,
    validate: fn(&str) -> Result<T, ValidationError>,
) -> Result<Option<String>, AppError> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(default.is_some());
    if let Some(value) = default.filter(|v| !v.is_empty()) {
        input = input.default(value.to_string());
    }
    let answer = input
        .validate_with(|value: &String| -> Result<(), String> {
            validate(value).map(|_| ()).map_err(|err| err.to_string())
        })
        .interact_text();

    match answer {
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(err) => interrupted(err),
    }
}

fn select<T: Copy>(
    prompt: &str,
    items: &[T],
    default: usize,
    label: fn(&T) -> &'static str,
) -> Result<Option<T>, AppError> {
    let labels: Vec<&str> = items.iter().map(label).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact_opt();
    match selection {
        Ok(index) => Ok(index.map(|i| items[i])),
        Err(err) => interrupted(err),
    }
}

fn confirm(prompt: &str, default: bool) -> Result<Option<bool>, AppError> {
    match Confirm::new().with_prompt(prompt).default(default).interact_opt() {
        Ok(answer) => Ok(answer),
        Err(err) => interrupted(err),
    }
}

fn interrupted<T>(err: DialoguerError) -> Result<Option<T>, AppError> {
    match err {
        DialoguerError::IO(err) if err.kind() == ErrorKind::Interrupted => Ok(None),
        DialoguerError::IO(err) => Err(AppError::Io(err)),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}
