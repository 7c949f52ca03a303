//! Tests du travailleur de cache, sur un hôte en mémoire.
//!
//! - réseau simulé : table url -> réponse, interrupteur en ligne / hors ligne
//! - tâches détachées : file d’attente vidée explicitement (pour observer
//!   qu’une réponse part AVANT la mise en cache)

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use futures::executor::block_on;
use futures::future::LocalBoxFuture;

use super::*;

/* ------------------------ Doubles ------------------------ */

#[derive(Clone, Debug, PartialEq)]
struct Rep {
    statut: u16,
    type_reponse: TypeReponse,
    corps: String,
}

impl Rep {
    fn basic(corps: &str) -> Self {
        Self {
            statut: 200,
            type_reponse: TypeReponse::Basic,
            corps: corps.to_string(),
        }
    }
}

impl ReponseHote for Rep {
    fn statut(&self) -> u16 {
        self.statut
    }
    fn type_reponse(&self) -> TypeReponse {
        self.type_reponse
    }
    fn dupliquer(&self) -> Result<Self, ErreurHote> {
        Ok(self.clone())
    }
}

struct Req {
    url: String,
    methode: String,
    accept: Option<String>,
}

impl Req {
    fn get(url: &str) -> Self {
        Self {
            url: url.to_string(),
            methode: "GET".to_string(),
            accept: None,
        }
    }

    fn document(url: &str) -> Self {
        Self {
            accept: Some("text/html,application/xhtml+xml;q=0.9".to_string()),
            ..Self::get(url)
        }
    }
}

impl RequeteHote for Req {
    fn url(&self) -> String {
        self.url.clone()
    }
    fn methode(&self) -> String {
        self.methode.clone()
    }
    fn accept(&self) -> Option<String> {
        self.accept.clone()
    }
}

#[derive(Default)]
struct Etat {
    seaux: BTreeMap<String, BTreeMap<String, Rep>>,
    reseau: HashMap<String, Rep>,
    hors_ligne: bool,
    appels_reseau: usize,
    taches: Vec<LocalBoxFuture<'static, ()>>,
    attente_passee: bool,
    attente_refusee: bool,
    clients_revendiques: bool,
}

#[derive(Clone, Default)]
struct HoteMemoire {
    etat: Rc<RefCell<Etat>>,
}

impl HoteMemoire {
    fn servir(&self, url: &str, rep: Rep) {
        self.etat.borrow_mut().reseau.insert(url.to_string(), rep);
    }

    fn couper_reseau(&self) {
        self.etat.borrow_mut().hors_ligne = true;
    }

    fn seau(&self, nom: &str) -> Option<BTreeMap<String, Rep>> {
        self.etat.borrow().seaux.get(nom).cloned()
    }

    fn creer_seau(&self, nom: &str) {
        self.etat
            .borrow_mut()
            .seaux
            .entry(nom.to_string())
            .or_default();
    }

    fn taches_en_attente(&self) -> usize {
        self.etat.borrow().taches.len()
    }

    fn executer_taches(&self) {
        let taches = std::mem::take(&mut self.etat.borrow_mut().taches);
        for t in taches {
            block_on(t);
        }
    }

    fn obtenir(&self, url: &str) -> Result<Rep, ErreurHote> {
        let mut e = self.etat.borrow_mut();
        e.appels_reseau += 1;
        if e.hors_ligne {
            return Err(ErreurHote::new("Failed to fetch"));
        }
        match e.reseau.get(url) {
            Some(r) => Ok(r.clone()),
            None => Ok(Rep {
                statut: 404,
                type_reponse: TypeReponse::Basic,
                corps: String::new(),
            }),
        }
    }
}

impl Hote for HoteMemoire {
    type Requete = Req;
    type Reponse = Rep;

    async fn ouvrir_cache(&self, nom: &str) -> Result<(), ErreurHote> {
        self.creer_seau(nom);
        Ok(())
    }

    async fn noms_caches(&self) -> Result<Vec<String>, ErreurHote> {
        Ok(self.etat.borrow().seaux.keys().cloned().collect())
    }

    async fn supprimer_cache(&self, nom: &str) -> Result<bool, ErreurHote> {
        Ok(self.etat.borrow_mut().seaux.remove(nom).is_some())
    }

    async fn chercher(&self, url: &str) -> Result<Option<Rep>, ErreurHote> {
        let e = self.etat.borrow();
        Ok(e.seaux.values().find_map(|s| s.get(url).cloned()))
    }

    async fn stocker(&self, nom: &str, url: &str, reponse: Rep) -> Result<(), ErreurHote> {
        self.etat
            .borrow_mut()
            .seaux
            .entry(nom.to_string())
            .or_default()
            .insert(url.to_string(), reponse);
        Ok(())
    }

    async fn recuperer_url(&self, url: &str) -> Result<Rep, ErreurHote> {
        self.obtenir(url)
    }

    async fn recuperer(&self, requete: &Req) -> Result<Rep, ErreurHote> {
        self.obtenir(&requete.url)
    }

    async fn passer_attente(&self) -> Result<(), ErreurHote> {
        let mut e = self.etat.borrow_mut();
        if e.attente_refusee {
            return Err(ErreurHote::new("InvalidStateError"));
        }
        e.attente_passee = true;
        Ok(())
    }

    async fn revendiquer_clients(&self) -> Result<(), ErreurHote> {
        self.etat.borrow_mut().clients_revendiques = true;
        Ok(())
    }

    fn lancer(&self, tache: LocalBoxFuture<'static, ()>) {
        self.etat.borrow_mut().taches.push(tache);
    }
}

/* ------------------------ Helpers ------------------------ */

const PORTEE: &str = "https://calc.exemple.org/app/";

fn url(chemin: &str) -> String {
    format!("{PORTEE}{chemin}")
}

fn hote_avec_coquille() -> HoteMemoire {
    let h = HoteMemoire::default();
    for chemin in RESSOURCES_COQUILLE {
        let c = chemin.trim_start_matches("./");
        h.servir(&url(c), Rep::basic(&format!("contenu de {c}")));
    }
    h
}

fn installe(h: &HoteMemoire) -> Travailleur<HoteMemoire> {
    let t = Travailleur::new(h.clone(), PORTEE);
    block_on(t.installer()).unwrap();
    t
}

/* ------------------------ install ------------------------ */

#[test]
fn installation_met_toute_la_coquille_en_cache() {
    let h = hote_avec_coquille();
    let t = installe(&h);

    assert_eq!(t.phase(), Phase::Installe);
    let seau = h.seau(NOM_CACHE).unwrap();
    assert_eq!(seau.len(), RESSOURCES_COQUILLE.len());
    assert!(seau.contains_key(&url("index.html")));
    assert!(seau.contains_key(&url("icons/icon-512.png")));
    assert!(h.etat.borrow().attente_passee);
}

#[test]
fn installation_tout_ou_rien_sur_echec_reseau() {
    let h = hote_avec_coquille();
    h.couper_reseau();

    let t = Travailleur::new(h.clone(), PORTEE);
    let err = block_on(t.installer()).unwrap_err();

    assert!(matches!(err, ErreurTravailleur::Ressource { .. }), "{err}");
    assert_eq!(t.phase(), Phase::EnErreur);
    // seau ouvert mais vide
    assert_eq!(h.seau(NOM_CACHE).map(|s| s.len()), Some(0));
    assert!(!h.etat.borrow().attente_passee);
}

#[test]
fn installation_tout_ou_rien_sur_statut_404() {
    let h = hote_avec_coquille();
    h.etat.borrow_mut().reseau.remove(&url("icons/icon-128.png"));

    let t = Travailleur::new(h.clone(), PORTEE);
    let err = block_on(t.installer()).unwrap_err();

    match err {
        ErreurTravailleur::StatutRessource { url: u, statut } => {
            assert_eq!(u, url("icons/icon-128.png"));
            assert_eq!(statut, 404);
        }
        autre => panic!("erreur inattendue: {autre}"),
    }
    // aucune ressource écrite, même celles récupérées avant l’échec
    assert_eq!(h.seau(NOM_CACHE).map(|s| s.len()), Some(0));
}

#[test]
fn installation_en_erreur_si_l_attente_echoue() {
    let h = hote_avec_coquille();
    h.etat.borrow_mut().attente_refusee = true;

    let t = Travailleur::new(h.clone(), PORTEE);
    let err = block_on(t.installer()).unwrap_err();

    assert!(matches!(err, ErreurTravailleur::Hote(_)), "{err}");
    assert_eq!(t.phase(), Phase::EnErreur);
    assert!(!h.etat.borrow().attente_passee);
}

/* ------------------------ activate ------------------------ */

#[test]
fn activation_purge_seulement_les_seaux_perimes() {
    let h = HoteMemoire::default();
    h.creer_seau("v1");
    h.creer_seau("v2");

    let config = ConfigCache {
        nom_cache: "v2".to_string(),
        ..ConfigCache::default()
    };
    let t = Travailleur::avec_config(h.clone(), PORTEE, config);
    let supprimes = block_on(t.activer()).unwrap();

    assert_eq!(supprimes, vec!["v1".to_string()]);
    assert!(h.seau("v1").is_none());
    assert!(h.seau("v2").is_some());
    assert_eq!(t.phase(), Phase::Active);
    assert!(h.etat.borrow().clients_revendiques);
}

#[test]
fn activation_sans_seau_perime() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    assert!(block_on(t.activer()).unwrap().is_empty());
    assert!(h.seau(NOM_CACHE).is_some());
}

/* ------------------------ fetch ------------------------ */

#[test]
fn autre_origine_ignoree() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    let avant = h.etat.borrow().appels_reseau;

    let req = Req::get("https://cdn.exemple.net/lib.js");
    assert!(!t.doit_intercepter(&req));
    let r = block_on(t.intercepter(&req)).unwrap();

    assert!(matches!(r, Interception::Ignoree));
    assert_eq!(h.etat.borrow().appels_reseau, avant);
}

#[test]
fn cache_d_abord_sans_revalidation() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    // le réseau a changé, le cache gagne
    h.servir(&url("styles.css"), Rep::basic("nouveau"));
    let avant = h.etat.borrow().appels_reseau;

    let r = block_on(t.intercepter(&Req::get(&url("styles.css")))).unwrap();
    match r {
        Interception::Reponse(rep) => assert_eq!(rep.corps, "contenu de styles.css"),
        Interception::Ignoree => panic!("devrait être intercepté"),
    }
    assert_eq!(h.etat.borrow().appels_reseau, avant);
}

#[test]
fn fragment_ignore_pour_le_cache() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    h.couper_reseau();

    let rep = block_on(t.repondre(&Req::get(&url("index.html#historique")))).unwrap();
    assert_eq!(rep.corps, "contenu de index.html");
}

#[test]
fn absent_du_cache_reseau_puis_copie_detachee() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    h.servir(&url("data.json"), Rep::basic("{}"));

    let rep = block_on(t.repondre(&Req::get(&url("data.json")))).unwrap();
    assert_eq!(rep.corps, "{}");

    // la réponse est partie, la copie n’est pas encore écrite
    assert_eq!(h.taches_en_attente(), 1);
    assert!(!h.seau(NOM_CACHE).unwrap().contains_key(&url("data.json")));

    h.executer_taches();
    assert_eq!(
        h.seau(NOM_CACHE).unwrap().get(&url("data.json")),
        Some(&Rep::basic("{}"))
    );

    // ensuite servi hors ligne
    h.couper_reseau();
    let rep = block_on(t.repondre(&Req::get(&url("data.json")))).unwrap();
    assert_eq!(rep.corps, "{}");
}

#[test]
fn pas_de_copie_hors_get_ou_hors_basic() {
    let h = hote_avec_coquille();
    let t = installe(&h);

    h.servir(&url("api"), Rep::basic("ok"));
    let post = Req {
        methode: "POST".to_string(),
        ..Req::get(&url("api"))
    };
    block_on(t.repondre(&post)).unwrap();

    h.servir(
        &url("cors.js"),
        Rep {
            type_reponse: TypeReponse::Cors,
            ..Rep::basic("x")
        },
    );
    block_on(t.repondre(&Req::get(&url("cors.js")))).unwrap();

    assert_eq!(h.taches_en_attente(), 0);
}

#[test]
fn hors_ligne_document_html_repli_sur_la_coquille() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    h.couper_reseau();

    let rep = block_on(t.repondre(&Req::document(&url("historique")))).unwrap();
    assert_eq!(rep.corps, "contenu de index.html");
}

#[test]
fn hors_ligne_autre_ressource_echoue() {
    let h = hote_avec_coquille();
    let t = installe(&h);
    h.couper_reseau();

    let err = block_on(t.repondre(&Req::get(&url("image.png")))).unwrap_err();
    assert!(matches!(err, ErreurTravailleur::Reseau { .. }), "{err}");
}

#[test]
fn hors_ligne_sans_coquille_echoue() {
    let h = HoteMemoire::default();
    h.couper_reseau();
    let t = Travailleur::new(h.clone(), PORTEE);

    let err = block_on(t.repondre(&Req::document(&url("")))).unwrap_err();
    assert!(matches!(err, ErreurTravailleur::SansRepli { .. }), "{err}");
}
