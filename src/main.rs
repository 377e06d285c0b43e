use blocklist_audit::adapters::file::save_filename;
use blocklist_audit::utils::error::ErrorSeverity;
use blocklist_audit::utils::{logger, validation::Validate};
use blocklist_audit::{AuditEngine, CliArgs, FileConfig, FileLogSource, NextDnsClient};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting blocklist-audit");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    if let Err(e) = args.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let engine = match build_engine(&args) {
        Ok(engine) => engine,
        Err(e) => {
            tracing::error!("❌ Setup failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    match engine.run().await {
        Ok(report) => {
            println!("{}", report);
        }
        Err(e) => {
            tracing::error!("❌ Audit failed: {} (Severity: {:?})", e, e.severity());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn build_engine(args: &CliArgs) -> blocklist_audit::Result<AuditEngine> {
    if let Some(profile) = &args.profile {
        let config = FileConfig::load(&args.config)?;
        let api_key = config.resolve_api_key()?;
        let profile_id = config.profile_id(profile)?.to_string();

        let client = NextDnsClient::new(
            args.api_base.clone(),
            api_key,
            profile_id.clone(),
            args.limit,
        );
        let mut engine =
            AuditEngine::new(Box::new(client.clone())).with_directory(Box::new(client));
        if args.save {
            engine = engine.with_save_path(save_filename(&profile_id).into());
        }
        Ok(engine)
    } else if let Some(file) = &args.file {
        Ok(AuditEngine::new(Box::new(FileLogSource::new(file))))
    } else {
        // clap's source group guarantees one of the two is set
        Err(blocklist_audit::AuditError::ConfigError {
            message: "either --profile or --file is required".to_string(),
        })
    }
}
