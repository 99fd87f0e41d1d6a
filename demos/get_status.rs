//! Query a device's status using a `config.toml` in the working directory.
//!
//! ```toml
//! token = "00112233445566778899aabbccddeeff"
//! ip = "192.168.1.42"
//! device_id = 123456789
//! debug_enabled = true
//! ```

use robovac_protocol::config::DeviceConfig;
use robovac_protocol::protocol::commands;
use robovac_protocol::protocol::ProtocolClient;
use robovac_protocol::utils::logging;
use robovac_protocol::utils::TracingObserver;

#[tokio::main]
async fn main() -> robovac_protocol::Result<()> {
    let config = DeviceConfig::from_file("config.toml")?;
    config.validate_strict()?;
    logging::init(config.debug_enabled);

    let mut client =
        ProtocolClient::from_config(&config)?.with_observer(Box::new(TracingObserver));

    let status = commands::get_status(&mut client).await?;
    println!("{status:#}");
    Ok(())
}
