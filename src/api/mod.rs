// ============================================================================
// Module : api
// ============================================================================
// Clients des APIs distantes (collaborateurs externes, boîtes noires)
// ============================================================================

pub mod coingecko; // Snapshot de marché CoinGecko
pub mod quotes;    // Citation du jour
