// src/travailleur/hote.rs
//
// Primitives fournies par l’hôte (navigateur ou double de test) :
// - CacheStorage : seaux nommés url -> réponse
// - réseau (fetch)
// - cycle de vie du worker (skipWaiting, clients.claim, tâches détachées)
//
// Futures !Send : l’hôte est mono-fil (boucle d’événements du worker).

use futures::future::LocalBoxFuture;
use thiserror::Error;

/// Échec d’une primitive de l’hôte (promesse rejetée, réseau coupé...).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ErreurHote(pub String);

impl ErreurHote {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

/// `Response.type` côté navigateur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeReponse {
    Basic,
    Cors,
    Opaque,
    OpaqueRedirect,
    Error,
    Default,
}

pub trait RequeteHote {
    /// URL absolue.
    fn url(&self) -> String;
    fn methode(&self) -> String;
    /// En-tête `Accept`, s’il existe.
    fn accept(&self) -> Option<String>;
}

pub trait ReponseHote: Sized {
    fn statut(&self) -> u16;
    fn type_reponse(&self) -> TypeReponse;
    /// Copie indépendante (le corps d’une réponse ne se lit qu’une fois).
    fn dupliquer(&self) -> Result<Self, ErreurHote>;

    fn est_ok(&self) -> bool {
        (200..300).contains(&self.statut())
    }
}

#[allow(async_fn_in_trait)]
pub trait Hote: Clone + 'static {
    type Requete: RequeteHote;
    type Reponse: ReponseHote + 'static;

    /// Ouvre le seau, le crée s’il n’existe pas.
    async fn ouvrir_cache(&self, nom: &str) -> Result<(), ErreurHote>;

    async fn noms_caches(&self) -> Result<Vec<String>, ErreurHote>;

    /// `true` si le seau existait.
    async fn supprimer_cache(&self, nom: &str) -> Result<bool, ErreurHote>;

    /// Recherche dans tous les seaux (équivalent de `caches.match`).
    async fn chercher(&self, url: &str) -> Result<Option<Self::Reponse>, ErreurHote>;

    async fn stocker(
        &self,
        nom: &str,
        url: &str,
        reponse: Self::Reponse,
    ) -> Result<(), ErreurHote>;

    /// GET simple, pour la coquille.
    async fn recuperer_url(&self, url: &str) -> Result<Self::Reponse, ErreurHote>;

    /// Requête d’origine, transmise telle quelle.
    async fn recuperer(&self, requete: &Self::Requete) -> Result<Self::Reponse, ErreurHote>;

    async fn passer_attente(&self) -> Result<(), ErreurHote>;

    async fn revendiquer_clients(&self) -> Result<(), ErreurHote>;

    /// Tâche détachée : n’est pas attendue par l’appelant.
    fn lancer(&self, tache: LocalBoxFuture<'static, ()>);
}
