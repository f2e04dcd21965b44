//! Fragment command - fetches an HTML fragment by id.

use std::sync::Arc;

use formshape::{
    client::{Fragments, HttpTransport},
    config::ClientConfig,
};

use crate::cli::FragmentArgs;

/// Run the fragment command
pub async fn run(args: &FragmentArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.config {
        Some(path) => ClientConfig::from_json_file(path)?,
        None => ClientConfig::default(),
    };
    let transport = Arc::new(HttpTransport::new(&args.base)?);
    let fragments = Fragments::new(transport, &config);

    let html = fragments.get(&args.id).await?;
    tracing::info!(id = %args.id, bytes = html.len(), "fetched fragment");
    println!("{html}");
    Ok(())
}
