use std::io;

use smsc::{CheckStatus, ClientSettings, MessageId, RawPhoneNumber, SmscClient, StatusReport};

fn required(key: &str) -> Result<String, io::Error> {
    std::env::var(key).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{key} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smsc=info")),
        )
        .with_target(false)
        .init();

    let client = SmscClient::from_settings(&ClientSettings::from_env()?)?;

    let id = MessageId::parse(&required("SMSC_MESSAGE_ID")?)?;
    let phone = RawPhoneNumber::new(required("SMSC_PHONE")?)?;

    match client.status(CheckStatus::new(id, phone).extended()).await? {
        StatusReport::Message(status) => {
            println!(
                "status: {:?}, changed_at: {:?}, error: {}",
                status.status.known_kind(),
                status.changed_at.and_then(|at| at.to_local()),
                status.error_code
            );
            if let Some(details) = status.details {
                println!(
                    "sender: {}, cost: {}, status_name: {}, message: {}",
                    details.sender, details.cost, details.status_name, details.message
                );
            }
        }
        StatusReport::Hlr(hlr) => {
            println!("hlr reply: {}", hlr.fields.to_line());
        }
    }

    Ok(())
}
