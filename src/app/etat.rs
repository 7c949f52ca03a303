//! src/app/etat.rs
//!
//! État UI (sans vue).
//!
//! Rôle : envelopper le `Moteur` (tampon, aperçu, historique) et tenir ce qui
//! n’appartient qu’à l’écran : l’avis affiché et son échéance, la fenêtre
//! d’historique ouverte ou non.
//!
//! Le temps est celui d’egui (`InputState::time`, secondes) : les échéances
//! sont testables sans horloge réelle.

use calculatrice_hors_ligne::historique::Stockage;
use calculatrice_hors_ligne::moteur::{Commande, Moteur};

/// Avis en cours d’affichage.
#[derive(Clone, Debug, PartialEq)]
pub struct AvisAffiche {
    pub message: String,
    /// Instant (secondes egui) où l’avis disparaît.
    pub jusqu_a: f64,
}

#[derive(Debug)]
pub struct AppCalc {
    pub moteur: Moteur,
    pub avis: Option<AvisAffiche>,
    pub historique_ouvert: bool,
}

impl AppCalc {
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        Self {
            moteur: Moteur::new(stockage),
            avis: None,
            historique_ouvert: false,
        }
    }

    /* ------------------------ Actions ------------------------ */

    /// Touche ou bouton : une commande, puis relève d’un éventuel avis.
    pub fn executer(&mut self, cmd: Commande, maintenant: f64) {
        self.moteur.executer(cmd);
        self.relever_avis(maintenant);
    }

    pub fn effacer_historique(&mut self, maintenant: f64) {
        self.moteur.effacer_historique();
        self.relever_avis(maintenant);
    }

    pub fn basculer_historique(&mut self) {
        self.historique_ouvert = !self.historique_ouvert;
    }

    /// Un nouvel avis remplace le précédent (et relance son délai).
    fn relever_avis(&mut self, maintenant: f64) {
        if let Some(a) = self.moteur.prendre_avis() {
            self.avis = Some(AvisAffiche {
                message: a.message,
                jusqu_a: maintenant + a.duree.as_secs_f64(),
            });
        }
    }

    /* ------------------------ Lecture ------------------------ */

    /// Message visible à `maintenant` ; l’avis échu est retiré.
    pub fn avis_visible(&mut self, maintenant: f64) -> Option<&str> {
        if self.avis.as_ref().is_some_and(|a| maintenant >= a.jusqu_a) {
            self.avis = None;
        }
        self.avis.as_ref().map(|a| a.message.as_str())
    }

    /// Secondes restantes avant de masquer l’avis (pour `request_repaint_after`).
    pub fn avis_restant(&self, maintenant: f64) -> Option<f64> {
        self.avis
            .as_ref()
            .map(|a| (a.jusqu_a - maintenant).max(0.0))
    }
}
