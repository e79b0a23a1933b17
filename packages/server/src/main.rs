#[tokio::main]
async fn main() -> anyhow::Result<()> {
    escopo_server::run_server().await
}
