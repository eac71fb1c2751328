use clap::Parser;
use drone_relay_config::{Configuration, SinkConfiguration};
use miette::{Context, Result};
use tracing::info;

use crate::{cli::CLIArgs, logging::initialize_tracing};

mod cli;
mod logging;


fn log_configuration_summary(configuration: &Configuration) {
    info!(
        buffer_size = configuration.relay.buffer_size.get(),
        dialect = %configuration.mavlink.dialect,
        dialect_name = %configuration.mavlink.dialect_name,
        "Relay settings."
    );

    for endpoint in &configuration.mavlink.endpoints {
        info!(
            name = %endpoint.name,
            drone_id = %endpoint.drone_id,
            protocol = %endpoint.protocol,
            mode = %endpoint.mode,
            port = endpoint.port,
            baud_rate = endpoint.baud_rate,
            "MAVLink endpoint."
        );
    }

    if configuration.sinks.is_empty() {
        info!("No sinks configured, telemetry will not be forwarded anywhere.");
    }

    for sink in &configuration.sinks {
        let queue_size = sink.queue_size();
        let backpressure_policy = sink.backpressure_policy();

        match sink {
            SinkConfiguration::File(file_sink) => info!(
                kind = %sink.kind(),
                path = %file_sink.path,
                format = %file_sink.format,
                queue_size,
                backpressure_policy,
                "Sink."
            ),
            _ => info!(kind = %sink.kind(), queue_size, backpressure_policy, "Sink."),
        }
    }
}


fn main() -> Result<()> {
    let cli_args = CLIArgs::parse();

    // Load configuration.
    let configuration = match cli_args.configuration_file_path.as_ref() {
        Some(path) => {
            println!("Loading configuration: {}", path.display());
            Configuration::load_from_path(path)
        }
        None => {
            println!("Loading configuration at default path.");
            Configuration::load_from_default_path()
        }
    }
    .wrap_err("Failed to load configuration file.")?;

    println!(
        "Configuration loaded: {}.",
        configuration.file_path.display()
    );


    let logging_raii_guard =
        initialize_tracing(&configuration.logging).wrap_err("Failed to initialize tracing.")?;

    info!("Tracing initialized.");


    log_configuration_summary(&configuration);
    info!(
        endpoints = configuration.mavlink.endpoints.len(),
        sinks = configuration.sinks.len(),
        "Configuration is valid."
    );


    drop(logging_raii_guard);
    Ok(())
}
