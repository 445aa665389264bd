use std::env;
use std::fs::File;
use std::io::Write;

use clap::Parser;
use config::Config;
use dotenvy::dotenv;

use adrata_ops::cli::{Cli, Command, ConvertDirection, Entity, FormatArg, WorkspaceCommand};
use adrata_ops::db::establish_connection_pool;
use adrata_ops::domain::workspace::NewWorkspace;
use adrata_ops::models::config::OpsConfig;
use adrata_ops::repository::{DieselRepository, WorkspaceReader, WorkspaceWriter};
use adrata_ops::services::export::ExportFormat;
use adrata_ops::services::import::ImportOptions;
use adrata_ops::services::invite::InvitationSender;
use adrata_ops::services::{
    ServiceResult, classify, convert, dedupe, enrich, export, import, invite, require_workspace,
};
use adrata_ops::vendors::{Pacer, VendorClients};

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("ADRATA"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let ops_config = match settings.try_deserialize::<OpsConfig>() {
        Ok(ops_config) => ops_config,
        Err(err) => {
            log::error!("Error loading toolkit config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&ops_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);

    if let Err(err) = run(cli.command, &repo, &ops_config) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(command: Command, repo: &DieselRepository, config: &OpsConfig) -> ServiceResult<()> {
    match command {
        Command::Workspace { command } => match command {
            WorkspaceCommand::Create { slug, name } => {
                let workspace = repo.create_workspace(&NewWorkspace::new(&name, &slug)?)?;
                println!("Created workspace '{}' (#{})", workspace.slug, workspace.id);
            }
            WorkspaceCommand::List => {
                for workspace in repo.list_workspaces()? {
                    println!("{}\t{}", workspace.slug, workspace.name);
                }
            }
        },

        Command::Import {
            entity,
            workspace,
            file,
            merge,
            as_leads,
            as_prospects,
            dry_run,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let options = ImportOptions {
                merge,
                dry_run,
                as_leads,
                as_prospects,
                source: file
                    .file_name()
                    .and_then(|name| name.to_str())
                    .map(ToString::to_string),
            };
            let summary = match entity {
                Entity::Companies => {
                    let rows = import::read_rows(&file)?;
                    import::import_companies(repo, &workspace, rows, &options)?
                }
                Entity::People => {
                    let rows = import::read_rows(&file)?;
                    import::import_people(repo, &workspace, rows, &options)?
                }
            };
            println!("Import finished: {summary}");
        }

        Command::Export {
            entity,
            workspace,
            format,
            output,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let format = match format {
                FormatArg::Csv => ExportFormat::Csv,
                FormatArg::Json => ExportFormat::Json,
            };
            let writer: Box<dyn Write> = match &output {
                Some(path) => Box::new(File::create(path)?),
                None => Box::new(std::io::stdout()),
            };
            let count = match entity {
                Entity::Companies => export::export_companies(repo, &workspace, format, writer)?,
                Entity::People => export::export_people(repo, &workspace, format, writer)?,
            };
            log::info!("Exported {count} records");
        }

        Command::Convert {
            direction,
            input,
            output,
        } => {
            let count = match direction {
                ConvertDirection::JsonToCsv => convert::json_to_csv(&input, &output)?,
                ConvertDirection::CsvToJson => convert::csv_to_json(&input, &output)?,
            };
            println!(
                "Converted {count} records from {} to {}",
                input.display(),
                output.display()
            );
        }

        Command::Dedupe {
            entity,
            workspace,
            dry_run,
            force,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let options = dedupe::DedupeOptions { dry_run, force };
            let summary = match entity {
                Entity::Companies => dedupe::dedupe_companies(repo, &workspace, &options)?,
                Entity::People => dedupe::dedupe_people(repo, &workspace, &options)?,
            };
            println!("Dedupe finished: {summary}");
        }

        Command::Classify {
            workspace,
            company,
            ai,
            dry_run,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let vendors = VendorClients::from_config(config);
            let options = classify::ClassifyOptions {
                company,
                use_ai: ai,
                dry_run,
            };
            let summary =
                classify::classify_workspace(repo, vendors.ai.as_ref(), &workspace, &options)?;
            println!("Classification finished: {summary}");
        }

        Command::Enrich {
            entity,
            workspace,
            limit,
            delay_ms,
            dry_run,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let vendors = VendorClients::from_config(config);
            let pacer = Pacer::new(delay_ms.unwrap_or(config.request_delay_ms));
            let options = enrich::EnrichOptions { limit, dry_run };
            let summary = match entity {
                Entity::Companies => {
                    enrich::enrich_companies(repo, &vendors, pacer, &workspace, &options)?
                }
                Entity::People => {
                    enrich::enrich_people(repo, &vendors, pacer, &workspace, &options)?
                }
            };
            println!("Enrichment finished: {summary}");
        }

        Command::Invite {
            workspace,
            file,
            dry_run,
        } => {
            let workspace = require_workspace(repo, &workspace)?;
            let sender = config
                .api_base_url
                .clone()
                .zip(config.api_token.clone())
                .map(|(base_url, token)| InvitationSender::new(base_url, token));
            let options = invite::InviteOptions { file, dry_run };
            let summary = invite::invite_users(repo, sender.as_ref(), &workspace, &options)?;
            println!("Invitations finished: {summary}");
        }
    }

    Ok(())
}
