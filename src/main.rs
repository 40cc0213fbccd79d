use deploy_guard::audit::{Outcome, VerificationLog};
use deploy_guard::{AppError, Config, DeployGuard, Repository};
use std::path::PathBuf;
use std::process;
use std::time::Duration;

const ACCEPTED_MESSAGE: &str = "Git status is acceptable.";

fn main() {
    let config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    // Optional project directory; defaults to the current one
    let discovered = match std::env::args().nth(1).map(PathBuf::from) {
        Some(start) => Repository::discover_from(start),
        None => Repository::discover(),
    };

    let repo = match discovered {
        Ok(repo) => repo.with_timeout(Duration::from_secs(config.git.timeout_seconds)),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    };

    let guard = DeployGuard::new(config.expectations.clone());
    let result = guard.check_repository(&repo);

    // Written after the check so the log directory can't affect this run
    if config.logging.enabled {
        let (outcome, reason) = match &result {
            Ok(()) => (Outcome::Accepted, ACCEPTED_MESSAGE.to_string()),
            Err(e) => (Outcome::Rejected, e.to_string()),
        };
        let logged = VerificationLog::for_project(repo.path(), &config)
            .and_then(|log| log.record(outcome, repo.path(), &reason));
        if let Err(e) = logged {
            eprintln!("Warning: could not write verification log: {}", e);
        }
    }

    match result {
        Ok(()) => println!("{}", ACCEPTED_MESSAGE),
        Err(AppError::Verify(e)) => {
            eprintln!("{}", e);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(2);
        }
    }
}
