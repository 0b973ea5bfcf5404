use tracing::{error, info, span, Level};

mod adapters;
mod config;
mod demo;
mod model;
mod util;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().json().init();

    let span = span!(Level::INFO, "main", context = "main");
    let _e = span.enter();
    info!("called");

    let matches = clap::Command::new("blobtrip")
        .about("Round trip against Azure Blob Storage: create a container, upload a local file, list and download it")
        .arg(
            clap::Arg::new("data-dir")
                .long("data-dir")
                .default_value("./azdata"),
        )
        .arg(
            clap::Arg::new("container-prefix")
                .long("container-prefix")
                .default_value("demoblob"),
        )
        .arg(
            clap::Arg::new("file-prefix")
                .long("file-prefix")
                .default_value("demofile"),
        )
        .arg(
            clap::Arg::new("non-interactive")
                .long("non-interactive")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let data_dir = matches.get_one::<String>("data-dir").unwrap();
    let container_prefix = matches.get_one::<String>("container-prefix").unwrap();
    let file_prefix = matches.get_one::<String>("file-prefix").unwrap();
    let interactive = !matches.get_flag("non-interactive");
    info!(data_dir = data_dir, interactive = interactive, "args");

    let credentials = match config::Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(err) => {
            error!(step = err.step(), error = %err, "round trip failed");
            std::process::exit(1);
        }
    };

    let client = adapters::azure::service_client(&credentials);
    let trip = demo::RoundTrip::new(
        Box::new(client),
        config::Config {
            data_dir: data_dir.into(),
            container_prefix: container_prefix.clone(),
            file_prefix: file_prefix.clone(),
            interactive,
        },
    );

    match trip.run().await {
        Ok(summary) => {
            info!(
                container = %summary.container,
                blob = %summary.blob_name,
                download = %summary.download_path.display(),
                "round trip finished"
            );
        }
        Err(err) => {
            error!(step = err.step(), error = %err, "round trip failed");
            std::process::exit(1);
        }
    }
}
