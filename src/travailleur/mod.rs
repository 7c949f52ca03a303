//! Travailleur de cache hors ligne
//!
//! Machine à états pilotée par les événements de l’hôte :
//! - installer : seau versionné + coquille complète (tout ou rien)
//! - activer   : purge des seaux périmés, puis prise de contrôle des pages ouvertes
//! - intercepter (fetch) : cache d’abord, puis réseau (+ copie détachée),
//!   puis page de repli pour les documents HTML
//!
//! Chaque transition enchaîne ses appels à l’hôte séquentiellement.
//! Un fetch qui croise une purge d’activation peut lire un seau en cours de
//! suppression : fenêtre de péremption acceptée.

pub mod hote;
pub mod url;

#[cfg(test)]
mod tests_travailleur;

use std::cell::Cell;

use log::{debug, info, warn};
use thiserror::Error;

use crate::config::{NOM_CACHE, PAGE_HORS_LIGNE, RESSOURCES_COQUILLE};
pub use hote::{ErreurHote, Hote, ReponseHote, RequeteHote, TypeReponse};
use self::url::{meme_origine, resoudre, sans_fragment};

#[derive(Debug, Error)]
pub enum ErreurTravailleur {
    #[error("ressource {url} : {source}")]
    Ressource { url: String, source: ErreurHote },

    #[error("ressource {url} : statut {statut}")]
    StatutRessource { url: String, statut: u16 },

    #[error("réseau indisponible pour {url} : {source}")]
    Reseau { url: String, source: ErreurHote },

    #[error("hors ligne, pas de page de repli pour {url}")]
    SansRepli { url: String },

    #[error(transparent)]
    Hote(#[from] ErreurHote),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Nouveau,
    Installation,
    Installe,
    Active,
    EnErreur,
}

/// Nom du seau courant, page de repli et coquille (chemins relatifs à la portée).
#[derive(Clone, Debug)]
pub struct ConfigCache {
    pub nom_cache: String,
    pub page_hors_ligne: String,
    pub ressources: Vec<String>,
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self {
            nom_cache: NOM_CACHE.to_string(),
            page_hors_ligne: PAGE_HORS_LIGNE.to_string(),
            ressources: RESSOURCES_COQUILLE.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Résultat d’un fetch vu par le worker.
#[derive(Debug)]
pub enum Interception<R> {
    /// Autre origine : la requête suit son cours sans le worker.
    Ignoree,
    Reponse(R),
}

pub struct Travailleur<H: Hote> {
    hote: H,
    portee: String,
    config: ConfigCache,
    phase: Cell<Phase>,
}

impl<H: Hote> Travailleur<H> {
    pub fn new(hote: H, portee: impl Into<String>) -> Self {
        Self::avec_config(hote, portee, ConfigCache::default())
    }

    pub fn avec_config(hote: H, portee: impl Into<String>, config: ConfigCache) -> Self {
        Self {
            hote,
            portee: portee.into(),
            config,
            phase: Cell::new(Phase::Nouveau),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase.get()
    }

    pub fn config(&self) -> &ConfigCache {
        &self.config
    }

    fn url_page_hors_ligne(&self) -> String {
        resoudre(&self.portee, &self.config.page_hors_ligne)
    }

    /* ------------------------ install ------------------------ */

    /// Peuple le seau courant avec toute la coquille, puis saute l’attente.
    ///
    /// Tout ou rien : un échec réseau ou un statut non 2xx n’écrit rien.
    pub async fn installer(&self) -> Result<(), ErreurTravailleur> {
        self.phase.set(Phase::Installation);

        if let Err(e) = self.peupler_coquille().await {
            warn!("installation échouée: {e}");
            self.phase.set(Phase::EnErreur);
            return Err(e);
        }

        if let Err(e) = self.hote.passer_attente().await {
            warn!("skipWaiting refusé: {e}");
            self.phase.set(Phase::EnErreur);
            return Err(e.into());
        }

        self.phase.set(Phase::Installe);
        info!(
            "coquille en cache ({} ressources) dans {}",
            self.config.ressources.len(),
            self.config.nom_cache
        );
        Ok(())
    }

    async fn peupler_coquille(&self) -> Result<(), ErreurTravailleur> {
        let nom = &self.config.nom_cache;
        self.hote.ouvrir_cache(nom).await?;

        // 1) tout récupérer
        let mut recues = Vec::with_capacity(self.config.ressources.len());
        for chemin in &self.config.ressources {
            let url = resoudre(&self.portee, chemin);
            let rep = match self.hote.recuperer_url(&url).await {
                Ok(r) => r,
                Err(source) => return Err(ErreurTravailleur::Ressource { url, source }),
            };
            if !rep.est_ok() {
                let statut = rep.statut();
                return Err(ErreurTravailleur::StatutRessource { url, statut });
            }
            recues.push((url, rep));
        }

        // 2) puis tout écrire
        for (url, rep) in recues {
            self.hote.stocker(nom, &url, rep).await?;
        }
        Ok(())
    }

    /* ------------------------ activate ------------------------ */

    /// Supprime tout seau dont le nom n’est pas le seau courant, puis prend
    /// le contrôle des pages déjà ouvertes. Renvoie les noms supprimés.
    pub async fn activer(&self) -> Result<Vec<String>, ErreurTravailleur> {
        let mut supprimes = Vec::new();

        for nom in self.hote.noms_caches().await? {
            if nom == self.config.nom_cache {
                continue;
            }
            if self.hote.supprimer_cache(&nom).await? {
                info!("seau périmé supprimé: {nom}");
                supprimes.push(nom);
            }
        }

        self.hote.revendiquer_clients().await?;
        self.phase.set(Phase::Active);
        Ok(supprimes)
    }

    /* ------------------------ fetch ------------------------ */

    /// Décision synchrone : seules les requêtes de même origine sont prises.
    pub fn doit_intercepter(&self, requete: &H::Requete) -> bool {
        meme_origine(&requete.url(), &self.portee)
    }

    pub async fn intercepter(
        &self,
        requete: &H::Requete,
    ) -> Result<Interception<H::Reponse>, ErreurTravailleur> {
        if !self.doit_intercepter(requete) {
            return Ok(Interception::Ignoree);
        }
        self.repondre(requete).await.map(Interception::Reponse)
    }

    /// Cache d’abord, sans revalidation ; sinon réseau ; sinon repli HTML.
    pub async fn repondre(&self, requete: &H::Requete) -> Result<H::Reponse, ErreurTravailleur> {
        let url_complete = requete.url();
        let url = sans_fragment(&url_complete);
        let est_get = requete.methode().eq_ignore_ascii_case("GET");

        // seul un GET peut correspondre à une entrée du cache
        if est_get {
            match self.hote.chercher(url).await {
                Ok(Some(rep)) => {
                    debug!("cache: {url}");
                    return Ok(rep);
                }
                Ok(None) => {}
                Err(e) => warn!("lecture du cache impossible pour {url}: {e}"),
            }
        }

        match self.hote.recuperer(requete).await {
            Ok(rep) => {
                if est_get && rep.type_reponse() == TypeReponse::Basic {
                    self.copier_en_cache(url, &rep);
                }
                debug!("réseau: {url}");
                Ok(rep)
            }
            Err(source) => {
                let accepte_html = requete
                    .accept()
                    .is_some_and(|a| a.contains("text/html"));
                if !accepte_html {
                    return Err(ErreurTravailleur::Reseau {
                        url: url.to_string(),
                        source,
                    });
                }

                warn!("hors ligne, repli sur la coquille pour {url}");
                match self.hote.chercher(&self.url_page_hors_ligne()).await {
                    Ok(Some(page)) => Ok(page),
                    _ => Err(ErreurTravailleur::SansRepli {
                        url: url.to_string(),
                    }),
                }
            }
        }
    }

    /// Écriture détachée : la réponse part sans attendre le cache.
    fn copier_en_cache(&self, url: &str, rep: &H::Reponse) {
        let copie = match rep.dupliquer() {
            Ok(c) => c,
            Err(e) => {
                warn!("copie de réponse impossible pour {url}: {e}");
                return;
            }
        };

        let hote = self.hote.clone();
        let nom = self.config.nom_cache.clone();
        let url = url.to_string();
        self.hote.lancer(Box::pin(async move {
            if let Err(e) = hote.stocker(&nom, &url, copie).await {
                warn!("mise en cache de {url} échouée: {e}");
            }
        }));
    }
}
