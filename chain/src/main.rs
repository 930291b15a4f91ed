// src/main.rs
//
// Minimal demo that wires up the chain library:
//
// - in-memory chain with a genesis block
// - Ed25519 ownership challenge, signed locally
// - one star submission
// - owner lookup and a validation report (direct linkage check)

use ed25519_dalek::SigningKey;

use star_chain::{
    ChainConfig, DefaultBlockchain, Ed25519Verifier, InMemoryBlockStore, LinkageCheck, Star,
    address_of, sign_message,
};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "star_chain=debug,star_chain_demo=info".to_string()),
        )
        .init();

    if let Err(err) = run_demo() {
        tracing::error!("fatal error: {err}");
        std::process::exit(1);
    }
}

fn run_demo() -> Result<(), String> {
    let cfg = ChainConfig {
        linkage: LinkageCheck::Direct,
        ..ChainConfig::default()
    };

    let mut chain: DefaultBlockchain =
        DefaultBlockchain::new(cfg, InMemoryBlockStore::new(), Ed25519Verifier)
            .map_err(|e| format!("failed to initialise chain: {e}"))?;

    // A real client keeps its key to itself; the demo derives one from a
    // fixed seed so runs are reproducible.
    let owner_key = SigningKey::from_bytes(&[42u8; 32]);
    let address = address_of(&owner_key.verifying_key());

    let challenge = chain.request_message_ownership_verification(&address);
    tracing::info!(message = %challenge, "challenge issued");

    let signature = sign_message(&owner_key, &challenge.message());
    let star = Star {
        ra: "16h 29m 1.0s".to_string(),
        dec: "-26° 29' 24.9".to_string(),
        mag: None,
        cen: Some("Scorpius".to_string()),
        story: "Antares, seen from the porch".to_string(),
    };

    let block = chain
        .submit_star(&address, &challenge.message(), &signature, star)
        .map_err(|e| format!("submission rejected: {e}"))?;

    tracing::info!(
        height = block.height,
        hash = %block.hash.map(|h| h.to_string()).unwrap_or_default(),
        previous = %block.previous_block_hash.map(|h| h.to_string()).unwrap_or_default(),
        "star registered"
    );

    for owned in chain.get_stars_by_wallet_address(&address) {
        tracing::info!(owner = %owned.owner, story = %owned.star.story, "owned star");
    }

    match chain.validate_chain() {
        Ok(()) => tracing::info!(height = ?chain.height(), "chain is valid"),
        Err(e) => tracing::warn!("{e}"),
    }

    Ok(())
}
