// ============================================================================
// API Client : CoinGecko
// ============================================================================
// Récupère le snapshot de marché depuis l'API publique CoinGecko.
// La réponse est traitée comme un snapshot complet : pas de pagination,
// pas de mise à jour incrémentale.
// ============================================================================

use anyhow::{Context, Result};
use tracing::{debug, error, info, instrument};

use crate::models::Coin;

const MARKETS_URL: &str = "https://api.coingecko.com/api/v3/coins/markets";

/// Récupère la liste des cryptos avec leur prix courant.
///
/// Chaque enregistrement porte `{id, name, image, current_price}` ; les
/// autres champs de la réponse sont ignorés.
#[instrument]
pub async fn fetch_markets() -> Result<Vec<Coin>> {
    let url = build_markets_url("usd");
    debug!(url = %url, "Built CoinGecko markets URL");

    // CoinGecko rejette le User-Agent par défaut de reqwest
    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()
        .context("Échec de la création du client HTTP")?;

    debug!("Sending HTTP request to CoinGecko");
    let response = client
        .get(&url)
        .send()
        .await
        .context("Échec de la requête HTTP vers CoinGecko")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "CoinGecko returned error status");
        anyhow::bail!("CoinGecko a retourné une erreur : HTTP {}", status);
    }

    let coins: Vec<Coin> = response
        .json()
        .await
        .context("Échec du parsing JSON de la réponse CoinGecko")?;

    info!(coins = coins.len(), "Successfully fetched market snapshot");
    Ok(coins)
}

/// Construit l'URL du endpoint markets pour une devise donnée.
fn build_markets_url(vs_currency: &str) -> String {
    format!("{}?vs_currency={}", MARKETS_URL, vs_currency)
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_markets_url() {
        let url = build_markets_url("usd");
        assert!(url.contains("coingecko.com"));
        assert!(url.contains("/coins/markets"));
        assert!(url.contains("vs_currency=usd"));
    }

    #[test]
    fn test_parse_markets_payload() {
        // Extrait représentatif d'une réponse CoinGecko
        let json = r#"[
            {
                "id": "bitcoin",
                "symbol": "btc",
                "name": "Bitcoin",
                "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
                "current_price": 50000.0,
                "market_cap": 980000000000,
                "price_change_percentage_24h": 1.2
            },
            {
                "id": "ethereum",
                "symbol": "eth",
                "name": "Ethereum",
                "image": "https://assets.coingecko.com/coins/images/279/large/ethereum.png",
                "current_price": 3000.0
            }
        ]"#;

        let coins: Vec<Coin> = serde_json::from_str(json).unwrap();
        assert_eq!(coins.len(), 2);
        assert_eq!(coins[0].id, "bitcoin");
        assert_eq!(coins[1].current_price, 3000.0);
    }

    // Test avec un vrai appel API (peut échouer sans connexion)
    #[tokio::test]
    async fn test_fetch_markets_live() {
        match fetch_markets().await {
            Ok(coins) => {
                assert!(!coins.is_empty());
                assert!(coins.iter().all(|c| !c.id.is_empty()));
            }
            Err(e) => {
                println!("⚠ Test skippé (pas de connexion ?) : {}", e);
            }
        }
    }
}
