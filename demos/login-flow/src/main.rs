use authgate::prelude::*;
use authgate::telemetry;

// ---------------------------------------------------------------------------
// Setup
// ---------------------------------------------------------------------------

/// Reads `AUTHGATE_CONFIG` (a JSON file) if set, else uses defaults.
fn load_config() -> Result<AuthgateConfig, Box<dyn std::error::Error>> {
    match std::env::var("AUTHGATE_CONFIG") {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)?;
            tracing::info!(%path, "loaded config");
            Ok(serde_json::from_str(&text)?)
        }
        Err(_) => Ok(AuthgateConfig::default()),
    }
}

async fn seed(builder: &AuthgateBuilder) -> Result<MemoryUserDirectory, AuthgateError> {
    let hasher = builder.hasher()?;
    let directory = MemoryUserDirectory::new();
    directory
        .insert(CredentialRecord::new(UserId(42), "alice", hasher.hash("correct")?))
        .await?;
    Ok(directory)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init();

    let builder = AuthgateBuilder::from_config(load_config()?);
    let directory = seed(&builder).await?;
    let cache = MemoryCacheStore::new();
    let service = builder.build(directory, MemorySessionStore::fresh(), cache.clone())?;
    let cache_key = service.config().cache_key(UserId(42));

    let rejected = service.login("alice", "wrong").await?;
    println!("login(alice, wrong)   -> {}", rejected.is_authenticated());

    let outcome = service.login("alice", "correct").await?;
    println!("login(alice, correct) -> {}", outcome.is_authenticated());
    println!("is_logged_in          -> {}", service.is_logged_in().await?);
    println!("cache {cache_key:<16}-> {:?}", cache.get(&cache_key).await?);

    println!("logout                -> {}", service.logout().await?);
    println!("is_logged_in          -> {}", service.is_logged_in().await?);
    println!("cache {cache_key:<16}-> {:?}", cache.get(&cache_key).await?);
    Ok(())
}
