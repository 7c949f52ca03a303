//! Historique des évaluations
//!
//! Journal en ajout seul, borné à `HISTORIQUE_MAX` entrées (les plus anciennes
//! sont évincées), sérialisé en JSON sous la clé `calc_history`.
//! Dernier écrivain gagnant : pas de verrou entre onglets.

pub mod stockage;

use chrono::{SecondsFormat, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::config::{CLE_HISTORIQUE, HISTORIQUE_MAX, PREFIXE_STOCKAGE};
pub use stockage::{ErreurStockage, Stockage, StockageMemoire};

#[cfg(not(target_arch = "wasm32"))]
pub use stockage::StockageFichier;

/// Une évaluation réussie, telle que persistée.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntreeHistorique {
    /// Texte saisi, avant normalisation.
    pub expr: String,
    /// Résultat formaté.
    pub result: String,
    /// Horodatage ISO-8601 (UTC, millisecondes).
    pub at: String,
}

impl EntreeHistorique {
    pub fn maintenant(expr: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            expr: expr.into(),
            result: result.into(),
            at: horodatage_iso(),
        }
    }
}

/// Ex: `2026-10-18T09:41:07.120Z`
pub fn horodatage_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn cle_stockage() -> String {
    format!("{PREFIXE_STOCKAGE}{CLE_HISTORIQUE}")
}

pub struct Historique {
    entrees: Vec<EntreeHistorique>,
    stockage: Box<dyn Stockage>,
}

impl std::fmt::Debug for Historique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Historique")
            .field("entrees", &self.entrees.len())
            .finish_non_exhaustive()
    }
}

impl Historique {
    /// Lit le journal persistant.
    /// Clé absente => vide ; contenu illisible => vide (avec avertissement).
    pub fn charger(stockage: Box<dyn Stockage>) -> Self {
        let entrees = match stockage.lire(&cle_stockage()) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                warn!("historique illisible, ignoré: {e}");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("lecture de l’historique impossible: {e}");
                Vec::new()
            }
        };

        Self { entrees, stockage }
    }

    /// Plus récent en dernier.
    pub fn entrees(&self) -> &[EntreeHistorique] {
        &self.entrees
    }

    pub fn len(&self) -> usize {
        self.entrees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entrees.is_empty()
    }

    /// Ajoute, borne à `HISTORIQUE_MAX`, puis persiste.
    ///
    /// En cas d’échec de persistance, l’entrée reste en mémoire.
    pub fn ajouter(&mut self, entree: EntreeHistorique) -> Result<(), ErreurStockage> {
        self.entrees.push(entree);
        if self.entrees.len() > HISTORIQUE_MAX {
            let surplus = self.entrees.len() - HISTORIQUE_MAX;
            self.entrees.drain(..surplus);
        }
        self.persister()
    }

    /// Vide le journal et retire la clé du stockage.
    pub fn effacer(&mut self) -> Result<(), ErreurStockage> {
        self.entrees.clear();
        self.stockage.retirer(&cle_stockage())
    }

    fn persister(&mut self) -> Result<(), ErreurStockage> {
        let json = serde_json::to_string(&self.entrees)?;
        self.stockage.ecrire(&cle_stockage(), &json)
    }
}
