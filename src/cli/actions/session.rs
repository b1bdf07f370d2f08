use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    session::{FileStorage, IdentityAssertion, SessionStore, StoredUser},
};
use anyhow::{bail, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::io::{self, Read};
use tracing::debug;

/// Handle the session actions
pub fn handle(action: Action, globals: &GlobalArgs) -> Result<()> {
    let store = SessionStore::new(FileStorage::new(&globals.state_dir));
    debug!("session state: {}", globals.state_dir.display());

    store.restore_session();

    match action {
        Action::Login { credential } => {
            let credential = resolve_credential(&credential)?;
            let mut assertion = IdentityAssertion::new(credential);
            assertion.select_by = Some("cli".to_string());

            let user = store
                .handle_identity_login(&assertion)
                .context("login failed")?;

            println!("signed in as {}", display_name(&user.name, &user.email));
        }
        Action::Logout => {
            store.logout();
            println!("signed out");
        }
        Action::Whoami => match store.current_user() {
            Some(user) => {
                println!("{}", serde_json::to_string_pretty(&StoredUser::from(&user))?);
            }
            None => println!("not signed in"),
        },
        Action::Validate { .. } | Action::Batch { .. } | Action::Check { .. } | Action::Health => {
            bail!("not a session action")
        }
    }

    Ok(())
}

/// `-` reads the credential from stdin.
fn resolve_credential(credential: &SecretString) -> Result<String> {
    let value = credential.expose_secret().trim();
    if value != "-" {
        return Ok(value.to_string());
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read credential from stdin")?;
    Ok(buffer.trim().to_string())
}

fn display_name(name: &str, email: &str) -> String {
    if name.is_empty() {
        email.to_string()
    } else {
        format!("{name} <{email}>")
    }
}
