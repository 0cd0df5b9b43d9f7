//! Reads one request description and runs the requested operations against the
//! configured service.
//!
//! See [`purchase_requisition_reads::config`] for the environment variables.

use clap::Parser;
use odata_framework::tracing::setup_tracing;
use odata_framework::{HttpRequestClient, TracingLogger};
use purchase_requisition_reads::caller::PurchaseRequisitionCaller;
use purchase_requisition_reads::config::{Config, INPUT_PATH_VAR};
use purchase_requisition_reads::input::read_request;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(
    name = "purchase-requisition-reads",
    version,
    about = "Read purchase requisition data from the SAP purchase requisition OData service"
)]
struct Cli {
    /// Request description file
    /// [default: ./Inputs/SDC_Purchase_Requisition_Header_sample.json]
    #[arg(value_name = "INPUT", env = INPUT_PATH_VAR)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let cli = Cli::parse();
    setup_tracing();

    let mut config = Config::from_env().map_err(|e| e.to_string())?;
    if let Some(path) = cli.input {
        config = config.with_input_path(path);
    }
    info!(base_url = %config.base_url, input = %config.input_path.display(), "Starting");

    let description = read_request(&config.input_path).map_err(|e| e.to_string())?;
    let ids = description.identifiers();
    let operations = description.operations();

    let client = HttpRequestClient::new(config.timeout).map_err(|e| e.to_string())?;
    let caller =
        PurchaseRequisitionCaller::new(&config.base_url, Arc::new(client), Arc::new(TracingLogger))
            .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("run", requisition = %ids.document_id);
    async {
        info!(?operations, "Running operations");
        caller.run(&ids, &operations).await;
    }
    .instrument(span)
    .await;

    // Fetch failures are logged per step and do not change the exit status.
    info!("Run finished");
    Ok(())
}
