//! Example: sending a text message
//!
//! Configuration comes from `WORKWX_*` environment variables or a
//! `workwx.toml` / `workwx.json` file (see `workwx_infra::config`).
//!
//! ```bash
//! export WORKWX_CORP_ID=ww0123456789
//! export WORKWX_CORP_SECRET=...
//! export WORKWX_AGENT_ID=1000002
//! cargo run --example send_text -- zhangsan "deploy finished"
//! ```

use workwx_common::logging::{init_tracing, LogFormat};
use workwx_domain::MessageRecipients;
use workwx_infra::{config, WorkwxClient};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing("info,workwx_infra=debug", LogFormat::Pretty);

    let mut args = std::env::args().skip(1);
    let user = args.next().unwrap_or_else(|| "@all".to_string());
    let text = args.next().unwrap_or_else(|| "hello from workwx".to_string());

    let config = config::load()?;
    let client = WorkwxClient::new(config.client)?;
    let app = client.app(config.app);

    let refresher = app.spawn_credential_refresher();

    let result = app.send_text_message(&MessageRecipients::users([user]), &text, false).await?;
    if result.is_fully_delivered() {
        println!("Message delivered");
    } else {
        println!("Undeliverable recipients: {result:?}");
    }

    refresher.abort();
    Ok(())
}
