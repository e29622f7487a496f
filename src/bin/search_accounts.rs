//! Runs one savings account search and prints the resulting page as JSON.
//!
//! Usage: `search_accounts "clientBirthMonth=10&clientBirthDay=20&limit=5"`

use std::env;
use std::process::ExitCode;

use config::Config;
use dotenvy::dotenv;
use validator::Validate;

use savings_search::db::establish_connection_pool_with;
use savings_search::domain::auth::{AuthenticatedUser, RequestContext};
use savings_search::dto::search::SearchParams;
use savings_search::models::config::AppConfig;
use savings_search::repository::DieselRepository;
use savings_search::services::ServiceError;
use savings_search::services::criteria::DefaultCriteriaValidator;
use savings_search::services::search::retrieve_all;

fn load_config() -> Result<AppConfig, String> {
    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        // Add `./config/default.yaml`
        .add_source(config::File::with_name("config/default"))
        // Add environment-specific overrides
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        // Add settings from the environment (e.g. `APP_DATABASE__URL`)
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .map_err(|err| format!("Error loading settings: {err}"))?;

    let app_config = settings
        .try_deserialize::<AppConfig>()
        .map_err(|err| format!("Error loading app config: {err}"))?;

    app_config
        .validate()
        .map_err(|err| format!("Invalid app config: {err}"))?;

    Ok(app_config)
}

fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let raw_query = env::args().nth(1).unwrap_or_default();
    let params = match serde_html_form::from_str::<SearchParams>(&raw_query) {
        Ok(params) => params,
        Err(err) => {
            log::error!("Malformed query string `{raw_query}`: {err}");
            return ExitCode::from(2);
        }
    };

    let app_config = match load_config() {
        Ok(app_config) => app_config,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match establish_connection_pool_with(
        &app_config.database.url,
        (&app_config.database).into(),
    ) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = DieselRepository::new(pool);
    let validator = DefaultCriteriaValidator::new(app_config.pagination.into());
    let ctx = RequestContext::new(
        app_config.operator.tenant.clone(),
        AuthenticatedUser::from(&app_config.operator),
    );

    match retrieve_all(&repo, &validator, &ctx, params) {
        Ok(page) => match serde_json::to_string_pretty(&page) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Failed to serialize page: {err}");
                ExitCode::FAILURE
            }
        },
        Err(ServiceError::InvalidQuery(err)) => {
            eprintln!("{err}");
            ExitCode::from(2)
        }
        Err(err) => {
            log::error!("Search failed: {err}");
            ExitCode::FAILURE
        }
    }
}
