// ============================================================================
// Structure : CoinListEngine
// ============================================================================
// Calcule la liste de cryptos actuellement affichée à partir du dataset
// complet, d'un filtre texte et d'un tri par prix.
//
// Contrat : la liste visible est toujours
//     sort(filter(liste_complète, texte), direction)
// recalculée intégralement à chaque changement d'entrée. Ordre et
// appartenance sont donc déterministes et re-dérivables.
// ============================================================================

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::models::Coin;

/// Direction du tri par prix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Direction opposée.
    pub fn flipped(&self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Label court pour l'affichage.
    pub fn label(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "prix ↑",
            SortDirection::Descending => "prix ↓",
        }
    }
}

/// Moteur de liste : dataset complet + état de session (filtre, tri).
///
/// L'état de session n'est jamais persisté ; il revient aux valeurs par
/// défaut à chaque remplacement du dataset.
pub struct CoinListEngine {
    /// Dataset complet, dans l'ordre retourné par l'API
    coins: Vec<Coin>,

    /// Liste visible dérivée (filtre puis tri)
    visible: Vec<Coin>,

    /// Filtre texte courant ("" = tout passe)
    filter_text: String,

    /// Tri courant. None = ordre du dataset, tant qu'aucun tri n'a été demandé.
    sort: Option<SortDirection>,

    /// Horodatage du snapshot (les prix ne sont pas live)
    fetched_at: DateTime<Utc>,
}

impl CoinListEngine {
    pub fn new() -> Self {
        Self {
            coins: Vec::new(),
            visible: Vec::new(),
            filter_text: String::new(),
            sort: None,
            fetched_at: Utc::now(),
        }
    }

    /// Remplace le dataset complet.
    ///
    /// Remet le filtre et le tri aux valeurs par défaut : la liste visible
    /// redevient le dataset entier, dans son ordre d'origine.
    pub fn set_full_list(&mut self, coins: Vec<Coin>) {
        self.coins = coins;
        self.filter_text.clear();
        self.sort = None;
        self.fetched_at = Utc::now();
        self.recompute();
    }

    /// Applique un filtre texte et retourne la liste visible.
    ///
    /// Correspondance par sous-chaîne insensible à la casse sur `name` ;
    /// un texte vide ou blanc laisse tout passer. Le tri courant reste
    /// appliqué au résultat.
    pub fn set_filter(&mut self, text: &str) -> &[Coin] {
        self.filter_text = text.to_string();
        self.recompute();
        &self.visible
    }

    /// Bascule le tri par prix et retourne (liste visible, nouvelle direction).
    ///
    /// Premier appel : tri croissant. Chaque appel suivant inverse la
    /// direction. Tri stable : les cryptos à prix égal gardent leur ordre
    /// relatif.
    pub fn toggle_sort(&mut self) -> (&[Coin], SortDirection) {
        let direction = match self.sort {
            None => SortDirection::Ascending,
            Some(current) => current.flipped(),
        };
        self.sort = Some(direction);
        self.recompute();
        (&self.visible, direction)
    }

    /// Tire une crypto uniformément au hasard dans la liste visible.
    ///
    /// None si la liste visible est vide. La source aléatoire est injectée
    /// pour permettre des tests déterministes.
    pub fn pick_random(&self, rng: &mut impl Rng) -> Option<&Coin> {
        if self.visible.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.visible.len());
        self.visible.get(index)
    }

    /// Liste actuellement visible (filtrée puis triée).
    pub fn visible(&self) -> &[Coin] {
        &self.visible
    }

    /// Filtre texte courant.
    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// Tri courant (None tant qu'aucun tri n'a été demandé).
    pub fn sort_direction(&self) -> Option<SortDirection> {
        self.sort
    }

    /// Horodatage du snapshot de prix.
    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Nombre de cryptos dans le dataset complet.
    pub fn full_len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Recalcule la liste visible depuis le dataset complet.
    fn recompute(&mut self) {
        let needle = self.filter_text.trim().to_lowercase();

        let mut visible: Vec<Coin> = self
            .coins
            .iter()
            .filter(|coin| needle.is_empty() || coin.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        if let Some(direction) = self.sort {
            // sort_by est stable : l'ordre relatif des prix égaux est conservé
            visible.sort_by(|a, b| match direction {
                SortDirection::Ascending => a.current_price.total_cmp(&b.current_price),
                SortDirection::Descending => b.current_price.total_cmp(&a.current_price),
            });
        }

        self.visible = visible;
    }
}

impl Default for CoinListEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample_coins() -> Vec<Coin> {
        vec![
            Coin::new("btc", "Bitcoin", 50000.0),
            Coin::new("eth", "Ethereum", 3000.0),
            Coin::new("doge", "Dogecoin", 0.08),
            Coin::new("sol", "Solana", 150.0),
        ]
    }

    fn engine_with(coins: Vec<Coin>) -> CoinListEngine {
        let mut engine = CoinListEngine::new();
        engine.set_full_list(coins);
        engine
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let coins = sample_coins();
        let mut engine = engine_with(coins.clone());

        let visible = engine.set_filter("");
        assert_eq!(visible, coins.as_slice());
    }

    #[test]
    fn test_blank_filter_matches_everything() {
        let mut engine = engine_with(sample_coins());
        assert_eq!(engine.set_filter("   ").len(), 4);
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut engine = engine_with(sample_coins());

        let visible = engine.set_filter("ETH");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "eth");

        // "coin" matche Bitcoin et Dogecoin
        let visible = engine.set_filter("coin");
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "doge"]);
    }

    #[test]
    fn test_filter_preserves_dataset_order() {
        // Sans tri actif, le résultat est une sous-séquence de l'ordre
        // d'origine : Bitcoin, Dogecoin, Solana contiennent "o", pas Ethereum
        let mut engine = engine_with(sample_coins());
        let visible = engine.set_filter("o");
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "doge", "sol"]);
    }

    #[test]
    fn test_filter_no_match_yields_empty() {
        let mut engine = engine_with(sample_coins());
        assert!(engine.set_filter("zzz").is_empty());
    }

    #[test]
    fn test_toggle_sort_ascending_then_descending() {
        let mut engine = engine_with(sample_coins());

        let (visible, direction) = engine.toggle_sort();
        assert_eq!(direction, SortDirection::Ascending);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["doge", "sol", "eth", "btc"]);

        let (visible, direction) = engine.toggle_sort();
        assert_eq!(direction, SortDirection::Descending);
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["btc", "eth", "sol", "doge"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let coins = vec![
            Coin::new("a", "Alpha", 10.0),
            Coin::new("b", "Beta", 10.0),
            Coin::new("c", "Gamma", 5.0),
            Coin::new("d", "Delta", 10.0),
        ];
        let mut engine = engine_with(coins);

        let (visible, _) = engine.toggle_sort();
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        // Les prix égaux gardent leur ordre relatif a, b, d
        assert_eq!(ids, vec!["c", "a", "b", "d"]);

        let (visible, _) = engine.toggle_sort();
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_sort_applies_to_filtered_list() {
        let mut engine = engine_with(sample_coins());
        engine.set_filter("coin"); // Bitcoin, Dogecoin

        let (visible, _) = engine.toggle_sort();
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["doge", "btc"]);
    }

    #[test]
    fn test_filter_keeps_active_sort() {
        // Le contrat dérive toujours sort(filter(...)) : filtrer après un tri
        // conserve l'ordre trié
        let mut engine = engine_with(sample_coins());
        engine.toggle_sort(); // croissant

        let visible = engine.set_filter("coin");
        let ids: Vec<&str> = visible.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["doge", "btc"]);
    }

    #[test]
    fn test_set_full_list_resets_session_state() {
        let mut engine = engine_with(sample_coins());
        engine.set_filter("bit");
        engine.toggle_sort();

        engine.set_full_list(sample_coins());
        assert_eq!(engine.filter_text(), "");
        assert_eq!(engine.sort_direction(), None);
        assert_eq!(engine.visible().len(), 4);
    }

    #[test]
    fn test_scenario_two_coins() {
        // Scénario de référence : filtre puis double bascule du tri
        let coins = vec![
            Coin::new("btc", "Bitcoin", 50000.0),
            Coin::new("eth", "Ethereum", 3000.0),
        ];
        let mut engine = engine_with(coins.clone());

        let visible = engine.set_filter("eth");
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, "eth");

        engine.set_full_list(coins);
        let (visible, direction) = engine.toggle_sort();
        assert_eq!(direction, SortDirection::Ascending);
        assert_eq!(visible[0].id, "eth");
        assert_eq!(visible[1].id, "btc");

        let (visible, direction) = engine.toggle_sort();
        assert_eq!(direction, SortDirection::Descending);
        assert_eq!(visible[0].id, "btc");
        assert_eq!(visible[1].id, "eth");
    }

    #[test]
    fn test_pick_random_empty_returns_none() {
        let engine = CoinListEngine::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert!(engine.pick_random(&mut rng).is_none());

        // Liste vidée par le filtre : None aussi, jamais de panic
        let mut engine = engine_with(sample_coins());
        engine.set_filter("zzz");
        assert!(engine.pick_random(&mut rng).is_none());
    }

    #[test]
    fn test_pick_random_returns_visible_element() {
        let mut engine = engine_with(sample_coins());
        engine.set_filter("coin");
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let picked = engine.pick_random(&mut rng).unwrap();
            assert!(picked.id == "btc" || picked.id == "doge");
        }
    }

    #[test]
    fn test_pick_random_covers_all_indices() {
        let engine = engine_with(sample_coins());
        let mut rng = StdRng::seed_from_u64(1);

        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(engine.pick_random(&mut rng).unwrap().id.clone());
        }
        assert_eq!(seen.len(), 4);
    }
}
