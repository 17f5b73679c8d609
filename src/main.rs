use anyhow::Result;
use dfkit::app::handler;

#[tokio::main]
async fn main() -> Result<()> {
    handler::init().await
}
