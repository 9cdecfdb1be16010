#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    loan_docs_server::run().await
}
