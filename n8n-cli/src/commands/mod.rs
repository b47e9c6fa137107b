//! CLI command implementations.

pub mod config;
pub mod credentials;
pub mod executions;
pub mod health;
pub mod input;
pub mod trigger;
pub mod version;
pub mod workflows;

use crate::cli::{Cli, Commands, ConfigAction, CredentialsAction};
use crate::config::Config;
use crate::output::Output;
use anyhow::Result;
use input::InputSource;
use trigger::TriggerInput;

/// Run a parsed command line and return what it produced.
///
/// The configuration is loaded only by commands that contact the server.
pub async fn dispatch(cli: Cli) -> Result<Output> {
    let config_path = cli.config;
    let path = config_path.as_deref();
    let load_config = || Config::load(path);

    match cli.command {
        Commands::Version => version::run(),
        Commands::Config { action } => match action {
            ConfigAction::Show => config::show(path),
            ConfigAction::Set {
                url,
                api_key,
                timeout,
            } => config::set(path, url, api_key, timeout),
        },
        Commands::Workflows {
            active,
            inactive,
            tags,
        } => {
            let active = match (active, inactive) {
                (true, _) => Some(true),
                (false, true) => Some(false),
                (false, false) => None,
            };
            workflows::list(&load_config()?, active, tags).await
        }
        Commands::Workflow { id } => workflows::show(&load_config()?, &id).await,
        Commands::Create {
            file,
            stdin,
            name,
            activate,
        } => {
            let source = InputSource::from_flags(file, stdin)
                .ok_or_else(|| anyhow::anyhow!("Provide --file or --stdin"))?;
            workflows::create(&load_config()?, source, name.as_deref(), activate).await
        }
        Commands::Update {
            id,
            file,
            stdin,
            name,
            activate,
            deactivate,
        } => {
            let source = InputSource::from_flags(file, stdin);
            workflows::update(&load_config()?, &id, source, name, activate, deactivate).await
        }
        Commands::Delete { id, confirm, force } => {
            workflows::delete(&load_config()?, &id, confirm, force).await
        }
        Commands::Enable { id } => workflows::set_active(&load_config()?, &id, true).await,
        Commands::Disable { id } => workflows::set_active(&load_config()?, &id, false).await,
        Commands::Trigger {
            id,
            data,
            file,
            wait,
            timeout,
        } => {
            let input = match (data, file) {
                (Some(data), _) => TriggerInput::Inline(data),
                (None, Some(file)) => TriggerInput::Source(InputSource::File(file)),
                (None, None) => TriggerInput::None,
            };
            trigger::run(&load_config()?, &id, input, wait, timeout).await
        }
        Commands::Executions {
            workflow,
            status,
            limit,
        } => executions::list(&load_config()?, workflow, status.as_deref(), limit).await,
        Commands::Execution { id } => executions::show(&load_config()?, &id).await,
        Commands::Credentials { action } => match action {
            CredentialsAction::List { credential_type } => {
                credentials::list(&load_config()?, credential_type.as_deref()).await
            }
            CredentialsAction::Show { id } => credentials::show(&load_config()?, &id).await,
            CredentialsAction::Create {
                credential_type,
                name,
                file,
                stdin,
            } => {
                let source = InputSource::from_flags(file, stdin)
                    .ok_or_else(|| anyhow::anyhow!("Provide --file or --stdin"))?;
                credentials::create(&load_config()?, &credential_type, &name, source).await
            }
            CredentialsAction::Delete { id, confirm, force } => {
                credentials::delete(&load_config()?, &id, confirm, force).await
            }
            CredentialsAction::Schema { credential_type } => {
                credentials::schema(&load_config()?, &credential_type).await
            }
        },
        Commands::Health => health::run(&load_config()?).await,
    }
}
