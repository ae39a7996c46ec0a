/*
[INPUT]:  Local EVM private key and a running session backend
[OUTPUT]: Authenticated session and its status
[POS]:    Examples - sign-in flow demonstration
[UPDATE]: When auth flow changes
*/

use std::time::Duration;

use siwe_session_adapter::*;

/// Example: Sign-In with Ethereum against a local backend
///
/// 1. Build the provider stack from default configuration
/// 2. Mount it (first `/me` poll)
/// 3. Sign in with a local wallet
/// 4. Sign out and unmount
#[tokio::main]
async fn main() {
    println!("=== SIWE Sign-In Example ===\n");

    let config = SessionConfig::default();
    let mut providers = match Providers::new(&config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Failed to build providers: {}", e);
            return;
        }
    };
    println!("✓ Providers created for {}", config.backend.base_url);

    let mut status_rx = providers.subscribe();
    providers.mount();
    // A failed /me poll publishes nothing, so don't wait on it forever
    match tokio::time::timeout(Duration::from_secs(5), status_rx.changed()).await {
        Ok(Ok(())) => println!("✓ Initial status: {}", *status_rx.borrow()),
        _ => println!("! No status from {}; still {}", config.backend.base_url, providers.status()),
    }

    // Hardhat account #0, never use with real funds
    let wallet = match EvmWalletSigner::new(
        "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80",
    ) {
        Ok(w) => w,
        Err(e) => {
            eprintln!("Invalid key: {}", e);
            return;
        }
    };

    match providers.sign_in(&wallet, Chain::Mainnet.id()).await {
        Ok(outcome) => {
            println!("\nSigned message:\n{}\n", outcome.message);
            println!("✓ Verified: {}", outcome.verified);
            println!("✓ Status: {}", providers.status());
        }
        Err(e) => eprintln!("Sign-in failed: {}", e),
    }

    providers.sign_out().await;
    providers.unmount().await;
    println!("\n✓ Sign-in example complete");
}
