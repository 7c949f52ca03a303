//! Moteur d’édition : tampon d’expression + drapeau “juste évalué” + historique.
//!
//! Contrats :
//! - Le tampon n’est jamais vide (minimum "0").
//! - Aucune validation à la saisie : tout est vérifié à l’évaluation.
//! - Une évaluation ratée ne touche ni au tampon, ni au drapeau, ni à l’historique.

use std::time::Duration;

use log::{debug, warn};

use crate::config::{
    APERCU_INDISPONIBLE, AVIS_EXPRESSION_INVALIDE, AVIS_HISTORIQUE_EFFACE, DUREE_AVIS_MS,
};
use crate::historique::{EntreeHistorique, Historique, Stockage};
use crate::noyau::{evaluer_securise, formater_nombre, ErreurEval};

const TAMPON_INITIAL: &str = "0";

/// Message transitoire, masqué après `duree`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avis {
    pub message: String,
    pub duree: Duration,
}

impl Avis {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duree: Duration::from_millis(DUREE_AVIS_MS),
        }
    }
}

/// Une touche = une opération du moteur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Commande {
    Ajouter(char),
    Evaluer,
    RetourArriere,
    Effacer,
    Pourcent,
}

impl Commande {
    /// Nom de touche clavier (convention `KeyboardEvent.key`) -> commande.
    pub fn depuis_touche(touche: &str) -> Option<Self> {
        match touche {
            "Enter" | "=" => Some(Self::Evaluer),
            "Backspace" => Some(Self::RetourArriere),
            "Escape" => Some(Self::Effacer),
            "%" => Some(Self::Pourcent),
            _ => {
                let mut it = touche.chars();
                match (it.next(), it.next()) {
                    (Some(c), None) if c.is_ascii_digit() || ".+-*/()".contains(c) => {
                        Some(Self::Ajouter(c))
                    }
                    _ => None,
                }
            }
        }
    }
}

#[derive(Debug)]
pub struct Moteur {
    tampon: String,
    juste_evalue: bool,
    historique: Historique,
    avis: Option<Avis>,
}

impl Moteur {
    pub fn new(stockage: Box<dyn Stockage>) -> Self {
        Self {
            tampon: TAMPON_INITIAL.to_string(),
            juste_evalue: false,
            historique: Historique::charger(stockage),
            avis: None,
        }
    }

    /* ------------------------ Lecture ------------------------ */

    pub fn tampon(&self) -> &str {
        &self.tampon
    }

    pub fn juste_evalue(&self) -> bool {
        self.juste_evalue
    }

    pub fn historique(&self) -> &Historique {
        &self.historique
    }

    /// Avis en attente (consommé par la vue).
    pub fn prendre_avis(&mut self) -> Option<Avis> {
        self.avis.take()
    }

    /// Aperçu non destructif ; `None` si le tampon n’est pas évaluable.
    pub fn apercu(&self) -> Option<String> {
        evaluer_securise(&self.tampon).ok().map(formater_nombre)
    }

    /// Texte affiché sous le tampon.
    pub fn apercu_affiche(&self) -> String {
        self.apercu()
            .unwrap_or_else(|| APERCU_INDISPONIBLE.to_string())
    }

    /* ------------------------ Opérations ------------------------ */

    pub fn executer(&mut self, cmd: Commande) {
        match cmd {
            Commande::Ajouter(c) => self.ajouter(c),
            Commande::Evaluer => {
                // l’échec est déjà signalé par un avis
                let _ = self.evaluer();
            }
            Commande::RetourArriere => self.retour_arriere(),
            Commande::Effacer => self.effacer(),
            Commande::Pourcent => self.appliquer_pourcent(),
        }
    }

    /// Chiffre ou point après un résultat : nouvelle expression.
    /// Opérateur après un résultat : on enchaîne sur ce résultat.
    pub fn ajouter(&mut self, jeton: char) {
        let numerique = jeton.is_ascii_digit() || jeton == '.';

        if self.juste_evalue {
            self.juste_evalue = false;
            if numerique {
                self.tampon = if jeton == '.' {
                    "0.".to_string()
                } else {
                    jeton.to_string()
                };
                return;
            }
        }

        if self.tampon == TAMPON_INITIAL && jeton.is_ascii_digit() {
            self.tampon = jeton.to_string();
        } else {
            self.tampon.push(jeton);
        }
    }

    pub fn effacer(&mut self) {
        self.tampon = TAMPON_INITIAL.to_string();
        self.juste_evalue = false;
    }

    /// Après un résultat : équivaut à `effacer` (on ne retouche pas un résultat).
    pub fn retour_arriere(&mut self) {
        if self.juste_evalue {
            self.effacer();
            return;
        }
        self.tampon.pop();
        if self.tampon.is_empty() {
            self.tampon = TAMPON_INITIAL.to_string();
        }
    }

    /// Suffixe `%` une seule fois (idempotent).
    pub fn appliquer_pourcent(&mut self) {
        if self.juste_evalue {
            self.tampon = self.apercu_affiche();
            self.juste_evalue = false;
        }
        if !self.tampon.ends_with('%') {
            self.tampon.push('%');
        }
    }

    /// Évalue le tampon.
    ///
    /// Succès : historique + persistance, tampon = résultat formaté, drapeau levé.
    /// Échec : état inchangé, avis “expression invalide”.
    pub fn evaluer(&mut self) -> Result<String, ErreurEval> {
        let valeur = match evaluer_securise(&self.tampon) {
            Ok(v) => v,
            Err(e) => {
                debug!("évaluation refusée ({:?}): {e}", self.tampon);
                self.avis = Some(Avis::new(AVIS_EXPRESSION_INVALIDE));
                return Err(e);
            }
        };

        let resultat = formater_nombre(valeur);
        let entree = EntreeHistorique::maintenant(self.tampon.clone(), resultat.clone());
        if let Err(e) = self.historique.ajouter(entree) {
            // le calcul reste valable ; seule la persistance a échoué
            warn!("historique non persisté: {e}");
        }

        self.tampon = resultat.clone();
        self.juste_evalue = true;
        Ok(resultat)
    }

    /// Vide l’historique (action explicite de l’utilisateur).
    pub fn effacer_historique(&mut self) {
        if let Err(e) = self.historique.effacer() {
            warn!("effacement de l’historique non persisté: {e}");
        }
        self.avis = Some(Avis::new(AVIS_HISTORIQUE_EFFACE));
    }
}
