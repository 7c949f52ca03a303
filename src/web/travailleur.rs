// src/web/travailleur.rs
//
// Hôte réel du travailleur de cache : ServiceWorkerGlobalScope.
//
// Le script du worker (sw.js) ne fait que relayer les événements :
//   self.addEventListener('install',  e => wasm.sur_installation(e));
//   self.addEventListener('activate', e => wasm.sur_activation(e));
//   self.addEventListener('fetch',    e => wasm.sur_requete(e));
//
// `respondWith` doit être appelé pendant l’événement : la décision
// “même origine ?” est donc synchrone, seule la réponse est une promesse.

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::LocalBoxFuture;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, spawn_local, JsFuture};
use web_sys::{
    Cache, CacheStorage, ExtendableEvent, FetchEvent, Request, Response, ResponseType,
    ServiceWorkerGlobalScope,
};

use super::js_texte;
use crate::travailleur::{
    ErreurHote, Hote, ReponseHote, RequeteHote, Travailleur, TypeReponse,
};

fn erreur_js(e: JsValue) -> ErreurHote {
    ErreurHote::new(js_texte(&e))
}

async fn attendre(p: js_sys::Promise) -> Result<JsValue, ErreurHote> {
    JsFuture::from(p).await.map_err(erreur_js)
}

/* ------------------------ Requête / réponse ------------------------ */

impl RequeteHote for Request {
    fn url(&self) -> String {
        Request::url(self)
    }

    fn methode(&self) -> String {
        self.method()
    }

    fn accept(&self) -> Option<String> {
        self.headers().get("accept").ok().flatten()
    }
}

impl ReponseHote for Response {
    fn statut(&self) -> u16 {
        self.status()
    }

    fn type_reponse(&self) -> TypeReponse {
        match self.type_() {
            ResponseType::Basic => TypeReponse::Basic,
            ResponseType::Cors => TypeReponse::Cors,
            ResponseType::Opaque => TypeReponse::Opaque,
            ResponseType::Opaqueredirect => TypeReponse::OpaqueRedirect,
            ResponseType::Error => TypeReponse::Error,
            _ => TypeReponse::Default,
        }
    }

    fn dupliquer(&self) -> Result<Self, ErreurHote> {
        self.clone().map_err(erreur_js)
    }
}

/* ------------------------ Hôte ------------------------ */

#[derive(Clone)]
pub struct HoteWeb {
    portee: ServiceWorkerGlobalScope,
}

impl HoteWeb {
    pub fn new(portee: ServiceWorkerGlobalScope) -> Self {
        Self { portee }
    }

    fn caches(&self) -> Result<CacheStorage, ErreurHote> {
        self.portee.caches().map_err(erreur_js)
    }

    async fn ouvrir(&self, nom: &str) -> Result<Cache, ErreurHote> {
        let v = attendre(self.caches()?.open(nom)).await?;
        v.dyn_into::<Cache>().map_err(erreur_js)
    }
}

impl Hote for HoteWeb {
    type Requete = Request;
    type Reponse = Response;

    async fn ouvrir_cache(&self, nom: &str) -> Result<(), ErreurHote> {
        self.ouvrir(nom).await.map(|_| ())
    }

    async fn noms_caches(&self) -> Result<Vec<String>, ErreurHote> {
        let v = attendre(self.caches()?.keys()).await?;
        let noms: js_sys::Array = v.dyn_into().map_err(erreur_js)?;
        Ok(noms.iter().filter_map(|n| n.as_string()).collect())
    }

    async fn supprimer_cache(&self, nom: &str) -> Result<bool, ErreurHote> {
        let v = attendre(self.caches()?.delete(nom)).await?;
        Ok(v.as_bool().unwrap_or(false))
    }

    async fn chercher(&self, url: &str) -> Result<Option<Response>, ErreurHote> {
        let v = attendre(self.caches()?.match_with_str(url)).await?;
        if v.is_undefined() || v.is_null() {
            return Ok(None);
        }
        v.dyn_into::<Response>().map(Some).map_err(erreur_js)
    }

    async fn stocker(&self, nom: &str, url: &str, reponse: Response) -> Result<(), ErreurHote> {
        let cache = self.ouvrir(nom).await?;
        attendre(cache.put_with_str(url, &reponse)).await.map(|_| ())
    }

    async fn recuperer_url(&self, url: &str) -> Result<Response, ErreurHote> {
        let v = attendre(self.portee.fetch_with_str(url)).await?;
        v.dyn_into::<Response>().map_err(erreur_js)
    }

    async fn recuperer(&self, requete: &Request) -> Result<Response, ErreurHote> {
        let v = attendre(self.portee.fetch_with_request(requete)).await?;
        v.dyn_into::<Response>().map_err(erreur_js)
    }

    async fn passer_attente(&self) -> Result<(), ErreurHote> {
        let p = self.portee.skip_waiting().map_err(erreur_js)?;
        attendre(p).await.map(|_| ())
    }

    async fn revendiquer_clients(&self) -> Result<(), ErreurHote> {
        attendre(self.portee.clients().claim()).await.map(|_| ())
    }

    fn lancer(&self, tache: LocalBoxFuture<'static, ()>) {
        spawn_local(tache);
    }
}

/* ------------------------ Points d’entrée ------------------------ */

thread_local! {
    static TRAVAILLEUR: RefCell<Option<Rc<Travailleur<HoteWeb>>>> = const { RefCell::new(None) };
}

fn travailleur() -> Result<Rc<Travailleur<HoteWeb>>, JsValue> {
    if let Some(t) = TRAVAILLEUR.with(|c| c.borrow().clone()) {
        return Ok(t);
    }

    console_error_panic_hook::set_once();

    let portee: ServiceWorkerGlobalScope = js_sys::global().dyn_into()?;
    let url_portee = portee.registration().scope();
    let t = Rc::new(Travailleur::new(HoteWeb::new(portee), url_portee));

    TRAVAILLEUR.with(|c| *c.borrow_mut() = Some(t.clone()));
    Ok(t)
}

fn vers_js(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[wasm_bindgen]
pub fn sur_installation(evt: ExtendableEvent) -> Result<(), JsValue> {
    let t = travailleur()?;
    let p = future_to_promise(async move {
        t.installer().await.map_err(vers_js)?;
        Ok(JsValue::UNDEFINED)
    });
    evt.wait_until(&p)
}

#[wasm_bindgen]
pub fn sur_activation(evt: ExtendableEvent) -> Result<(), JsValue> {
    let t = travailleur()?;
    let p = future_to_promise(async move {
        t.activer().await.map_err(vers_js)?;
        Ok(JsValue::UNDEFINED)
    });
    evt.wait_until(&p)
}

#[wasm_bindgen]
pub fn sur_requete(evt: FetchEvent) -> Result<(), JsValue> {
    let t = travailleur()?;
    let requete = evt.request();

    // autre origine : pas de respondWith, le navigateur suit son cours
    if !t.doit_intercepter(&requete) {
        return Ok(());
    }

    let p = future_to_promise(async move {
        t.repondre(&requete)
            .await
            .map(JsValue::from)
            .map_err(vers_js)
    });
    evt.respond_with(&p)
}
