use std::io;

use smsc::{ClientSettings, MessageText, RawPhoneNumber, SendOptions, SendSms, SenderName, SmscClient};

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

    let phone_raw = std::env::var("SMSC_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "SMSC_PHONE environment variable is required",
        )
    })?;
    let text = std::env::var("SMSC_MESSAGE").unwrap_or_else(|_| "hello from smsc".to_owned());

    let options = SendOptions {
        sender: std::env::var("SMSC_SENDER")
            .ok()
            .map(SenderName::new)
            .transpose()?,
        ..Default::default()
    };
    let request = SendSms::new(
        vec![RawPhoneNumber::new(phone_raw)?],
        MessageText::new(text)?,
        options,
    )?;

    let receipt = client.send(request).await?;
    println!(
        "id: {}, sms_count: {}, cost: {}, balance: {}",
        receipt.id, receipt.sms_count, receipt.cost, receipt.balance
    );

    Ok(())
}
