use std::io::{BufRead, Write};

use colored::Colorize;

use crate::{
    domain::{
        policy::{authorize, AccessDenied, Operation},
        Artist, AuthenticatedUser, Cd, Id, Name, Password, Username, ValidationError
    },
    services::{ApiError, AuthenticationService, CdService},
    utils::config::Config
};
use super::{CdArgs, CdChanges, Command, Credentials};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    AccessDenied(#[from] AccessDenied),

    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{source} Logging out failed as well: {logout}")]
    LogoutAfterFailure { source: Box<AppError>, logout: ApiError }
}

pub fn run<R, W>(command: Command, config: &Config, input: &mut R, out: &mut W) -> Result<(), AppError>
where R: BufRead, W: Write
{
    let cds = CdService::new(&config.api)?;

    match command {
        Command::List => print_cds(out, &cds.fetch_cd_list()?),
        Command::Show { id } => print_cd(out, &cds.fetch_cd_detail(&id)?),
        Command::ByArtist { artist } => print_cds(out, &cds.fetch_cds_by_artist(&Artist::new(artist.trim())?)?),
        Command::ByName { name } => print_cds(out, &cds.fetch_cds_by_name(&Name::new(name.trim())?)?),
        Command::ByPublisher { username } => print_cds(out, &cds.fetch_cds_by_published_by(&Username::new(username.trim())?)?),
        Command::Add { credentials, cd, yes } => add(&cds, config, &credentials, &cd, yes, input, out),
        Command::Update { credentials, id, changes, yes } => update(&cds, config, &credentials, &id, &changes, yes, input, out),
        Command::Remove { credentials, id, yes } => remove(&cds, config, &credentials, &id, yes, input, out)
    }
}

fn add<R: BufRead, W: Write>(cds: &CdService, config: &Config, credentials: &Credentials, args: &CdArgs, yes: bool, input: &mut R, out: &mut W) -> Result<(), AppError> {
    let cd = Cd::parse(
        args.name.trim(),
        args.artist.trim(),
        args.record_company.trim(),
        args.genre.trim(),
        args.ean_code.trim(),
        args.price.trim()
    )?;

    with_session(config, credentials, out, |user, out| {
        authorize::<Cd>(Some(user), Operation::Create, None)?;

        writeln!(out, "{}", cd)?;
        if !confirm(yes, "Add this CD?", input, out)? {
            return Ok(());
        }

        let stored = cds.add_cd(&cd, user)?;
        writeln!(out, "{}", format!("CD {} added.", stored.id()).green())?;
        Ok(())
    })
}

#[allow(clippy::too_many_arguments)]
fn update<R: BufRead, W: Write>(cds: &CdService, config: &Config, credentials: &Credentials, id: &Id, changes: &CdChanges, yes: bool, input: &mut R, out: &mut W) -> Result<(), AppError> {
    let existing = cds.fetch_cd_detail(id)?;
    let cd = merge(&existing, changes)?;

    with_session(config, credentials, out, |user, out| {
        authorize(Some(user), Operation::Update, Some(&existing))?;

        writeln!(out, "{}", cd)?;
        if !confirm(yes, "Save these changes?", input, out)? {
            return Ok(());
        }

        let stored = cds.update_cd(&cd, user)?;
        writeln!(out, "{}", format!("CD {} updated.", stored.id()).green())?;
        Ok(())
    })
}

fn remove<R: BufRead, W: Write>(cds: &CdService, config: &Config, credentials: &Credentials, id: &Id, yes: bool, input: &mut R, out: &mut W) -> Result<(), AppError> {
    let existing = cds.fetch_cd_detail(id)?;

    with_session(config, credentials, out, |user, out| {
        authorize(Some(user), Operation::Delete, Some(&existing))?;

        writeln!(out, "{}", existing)?;
        if !confirm(yes, "Remove this CD?", input, out)? {
            return Ok(());
        }

        cds.remove_cd(id, user)?;
        writeln!(out, "{}", format!("CD {} removed.", id).green())?;
        Ok(())
    })
}

/// Applies the given changes over `existing`, keeping its id.
fn merge(existing: &Cd, changes: &CdChanges) -> Result<Cd, ValidationError> {
    let pick = |change: &Option<String>, current: &str| -> String {
        change.as_deref().map(str::trim).unwrap_or(current).to_string()
    };

    let price = existing.price().to_string();
    let cd = Cd::parse(
        &pick(&changes.name, existing.name().as_str()),
        &pick(&changes.artist, existing.artist().as_str()),
        &pick(&changes.record_company, existing.record_company().as_str()),
        &pick(&changes.genre, existing.genre().as_str()),
        &pick(&changes.ean_code, existing.ean_code().as_str()),
        &pick(&changes.price, &price)
    )?;

    Ok(cd.with_id(*existing.id()))
}

/// Logs in, runs `action` with the session and always logs out afterwards.
fn with_session<W, T, F>(config: &Config, credentials: &Credentials, out: &mut W, action: F) -> Result<T, AppError>
where
    W: Write,
    F: FnOnce(&AuthenticatedUser, &mut W) -> Result<T, AppError>
{
    let auth = AuthenticationService::new(&config.api)?;
    let username = Username::new(credentials.username.trim())?;
    let password = Password::new(credentials.password.as_str())?;

    let user = match auth.login(&username, &password) {
        Ok(user) => user,
        Err(err) => {
            if let (ApiError::OperationFailed { .. }, Some(website)) = (&err, &config.api.website) {
                writeln!(out, "{}", format!("No account yet? Register at {}", website).yellow())?;
            }
            return Err(err.into());
        }
    };

    let outcome = action(&user, out);
    let logout = auth.logout(&user);

    match (outcome, logout) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(logout)) => Err(logout.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(logout)) => Err(AppError::LogoutAfterFailure { source: Box::new(err), logout })
    }
}

fn confirm<R: BufRead, W: Write>(yes: bool, question: &str, input: &mut R, out: &mut W) -> Result<bool, AppError> {
    if yes {
        return Ok(true);
    }

    write!(out, "{} [y/N] ", question)?;
    out.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    let accepted = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if !accepted {
        writeln!(out, "{}", "Cancelled.".yellow())?;
    }

    Ok(accepted)
}

fn print_cds<W: Write>(out: &mut W, cds: &[Cd]) -> Result<(), AppError> {
    if cds.is_empty() {
        writeln!(out, "{}", "No CDs found.".yellow())?;
        return Ok(());
    }

    for cd in cds {
        print_cd(out, cd)?;
    }

    Ok(())
}

fn print_cd<W: Write>(out: &mut W, cd: &Cd) -> Result<(), AppError> {
    writeln!(out, "{} {}", format!("#{}", cd.id()).bold(), cd)?;
    writeln!(
        out,
        "    published by {} on {}, last updated {}",
        cd.published_by(),
        cd.created_at_display(),
        cd.updated_at_display()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::services::test_helpers::{cd_json, config_for, init_logger, AUTH_PATH, MUSIC_PATH};

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn config(server: &MockServer) -> Result<Config, Box<dyn std::error::Error>> {
        init_logger()?;
        Ok(Config { api: config_for(server)? })
    }

    fn credentials(username: &str) -> Credentials {
        Credentials { username: username.to_string(), password: "secret-pw!".to_string() }
    }

    fn mock_login(server: &MockServer, username: &str, groups: serde_json::Value) {
        let body = json!({
            "key": format!("token-{}", username),
            "user": { "id": 4, "username": username, "is_superuser": false, "groups": groups }
        });
        server.mock(|when, then| {
            when.method(POST).path(format!("{}login/", AUTH_PATH)).json_body_partial(format!(r#"{{ "username": "{}" }}"#, username));
            then.status(200).json_body(body);
        });
    }

    fn run_with_input(command: Command, config: &Config, input: &str) -> Result<String, AppError> {
        let mut input = input.as_bytes();
        let mut out = Vec::new();

        run(command, config, &mut input, &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn list_prints_every_cd() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(MUSIC_PATH);
            then.status(200).json_body(json!([cd_json(1, "Jazz", "alice"), cd_json(2, "Innuendo", "bob")]));
        });

        let output = run_with_input(Command::List, &config(&server)?, "")?;

        assert!(output.contains("Jazz"));
        assert!(output.contains("Innuendo"));
        assert!(output.contains("published by bob"));

        Ok(())
    }

    #[test]
    fn empty_filter_result() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}byartist", MUSIC_PATH)).query_param("artist", "Queen");
            then.status(200).json_body(json!([]));
        });

        let output = run_with_input(Command::ByArtist { artist: "  Queen ".to_string() }, &config(&server)?, "")?;
        assert!(output.contains("No CDs found."));

        Ok(())
    }

    #[test]
    fn add_logs_in_posts_and_logs_out() -> TestResult {
        let server = MockServer::start();
        mock_login(&server, "alice", json!([{ "name": "publishers" }]));
        let created = server.mock(|when, then| {
            when.method(POST).path(MUSIC_PATH).header("Authorization", "Token token-alice");
            then.status(201).json_body(cd_json(21, "Jazz", "alice"));
        });
        let logout = server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Add {
            credentials: credentials("alice"),
            cd: CdArgs {
                name: "Jazz".to_string(),
                artist: "Queen".to_string(),
                record_company: "EMI".to_string(),
                genre: "Rock".to_string(),
                ean_code: "978-0201-37962".to_string(),
                price: "12.50".to_string()
            },
            yes: true
        };
        let output = run_with_input(command, &config(&server)?, "")?;

        created.assert();
        logout.assert();
        assert!(output.contains("CD 21 added."));

        Ok(())
    }

    #[test]
    fn add_by_non_publisher_is_refused_locally() -> TestResult {
        let server = MockServer::start();
        mock_login(&server, "listener", json!([]));
        let created = server.mock(|when, then| {
            when.method(POST).path(MUSIC_PATH);
            then.status(201);
        });
        let logout = server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Add {
            credentials: credentials("listener"),
            cd: CdArgs {
                name: "Jazz".to_string(),
                artist: "Queen".to_string(),
                record_company: "EMI".to_string(),
                genre: "Rock".to_string(),
                ean_code: "978020137962".to_string(),
                price: "12.50".to_string()
            },
            yes: true
        };
        let result = run_with_input(command, &config(&server)?, "");

        assert!(matches!(result, Err(AppError::AccessDenied(AccessDenied::NotPublisher))));
        created.assert_hits(0);
        logout.assert();

        Ok(())
    }

    #[test]
    fn update_keeps_omitted_fields() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}7/", MUSIC_PATH));
            then.status(200).json_body(cd_json(7, "Jazz", "alice"));
        });
        mock_login(&server, "alice", json!([{ "name": "publishers" }]));
        let updated = server.mock(|when, then| {
            when.method(PUT)
                .path(format!("{}7/", MUSIC_PATH))
                .json_body_partial(r#"{ "id": 7, "name": "Jazz", "artist": "Queen", "price": "9.99" }"#);
            then.status(200).json_body(cd_json(7, "Jazz", "alice"));
        });
        server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Update {
            credentials: credentials("alice"),
            id: Id::from(7),
            changes: CdChanges { price: Some("9.99".to_string()), ..CdChanges::default() },
            yes: false
        };
        let output = run_with_input(command, &config(&server)?, "y\n")?;

        updated.assert();
        assert!(output.contains("CD 7 updated."));

        Ok(())
    }

    #[test]
    fn remove_of_foreign_cd_is_refused() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}7/", MUSIC_PATH));
            then.status(200).json_body(cd_json(7, "Jazz", "alice"));
        });
        mock_login(&server, "bob", json!([{ "name": "publishers" }]));
        let deleted = server.mock(|when, then| {
            when.method(DELETE).path(format!("{}7/", MUSIC_PATH));
            then.status(204);
        });
        server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Remove { credentials: credentials("bob"), id: Id::from(7), yes: true };
        let result = run_with_input(command, &config(&server)?, "");

        assert!(matches!(result, Err(AppError::AccessDenied(AccessDenied::NotOwner))));
        deleted.assert_hits(0);

        Ok(())
    }

    #[test]
    fn declined_confirmation_sends_nothing() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}7/", MUSIC_PATH));
            then.status(200).json_body(cd_json(7, "Jazz", "alice"));
        });
        mock_login(&server, "alice", json!([{ "name": "publishers" }]));
        let deleted = server.mock(|when, then| {
            when.method(DELETE).path(format!("{}7/", MUSIC_PATH));
            then.status(204);
        });
        let logout = server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Remove { credentials: credentials("alice"), id: Id::from(7), yes: false };
        let output = run_with_input(command, &config(&server)?, "n\n")?;

        assert!(output.contains("Cancelled."));
        deleted.assert_hits(0);
        logout.assert();

        Ok(())
    }

    #[test]
    fn failed_operation_and_logout_are_both_reported() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path(format!("{}7/", MUSIC_PATH));
            then.status(200).json_body(cd_json(7, "Jazz", "alice"));
        });
        mock_login(&server, "alice", json!([{ "name": "publishers" }]));
        server.mock(|when, then| {
            when.method(DELETE).path(format!("{}7/", MUSIC_PATH));
            then.status(500);
        });
        server.mock(|when, then| {
            when.method(POST).path(format!("{}logout/", AUTH_PATH));
            then.status(500);
        });

        let command = Command::Remove { credentials: credentials("alice"), id: Id::from(7), yes: true };
        let result = run_with_input(command, &config(&server)?, "");

        match result {
            Err(AppError::LogoutAfterFailure { source, logout }) => {
                assert!(matches!(*source, AppError::Api(ApiError::OperationFailed { status: 500, .. })));
                assert!(matches!(logout, ApiError::OperationFailed { status: 500, .. }));
            },
            other => panic!("expected both failures, got {:?}", other)
        }

        Ok(())
    }

    #[test]
    fn failed_login_points_to_registration() -> TestResult {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(format!("{}login/", AUTH_PATH));
            then.status(400);
        });

        let mut config = config(&server)?;
        config.api.website = Some("http://localhost:8000/".to_string());

        let command = Command::Add {
            credentials: credentials("alice"),
            cd: CdArgs {
                name: "Jazz".to_string(),
                artist: "Queen".to_string(),
                record_company: "EMI".to_string(),
                genre: "Rock".to_string(),
                ean_code: "978020137962".to_string(),
                price: "12.50".to_string()
            },
            yes: true
        };

        let mut out = Vec::new();
        let result = run(command, &config, &mut "".as_bytes(), &mut out);

        assert!(matches!(result, Err(AppError::Api(ApiError::OperationFailed { .. }))));
        assert!(String::from_utf8_lossy(&out).contains("Register at http://localhost:8000/"));

        Ok(())
    }

    #[test]
    fn invalid_input_fails_before_any_request() -> TestResult {
        let server = MockServer::start();
        let login = server.mock(|when, then| {
            when.method(POST).path(format!("{}login/", AUTH_PATH));
            then.status(200);
        });

        let command = Command::Add {
            credentials: credentials("alice"),
            cd: CdArgs {
                name: "Jazz".to_string(),
                artist: "Queen".to_string(),
                record_company: "EMI".to_string(),
                genre: "rock".to_string(),
                ean_code: "978020137962".to_string(),
                price: "12.50".to_string()
            },
            yes: true
        };
        let result = run_with_input(command, &config(&server)?, "");

        assert!(matches!(result, Err(AppError::Validation(ValidationError::NotCapitalized))));
        login.assert_hits(0);

        Ok(())
    }
}
