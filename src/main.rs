#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shop_review_lib::run().await
}
