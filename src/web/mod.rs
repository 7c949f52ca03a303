//! Adaptateurs navigateur (wasm32 seulement).
//!
//! - stockage.rs    : `Stockage` sur `window.localStorage`
//! - travailleur.rs : `Hote` sur le `ServiceWorkerGlobalScope` + points d’entrée
//!   des événements install / activate / fetch

pub mod stockage;
pub mod travailleur;

pub use stockage::StockageLocal;

fn js_texte(e: &wasm_bindgen::JsValue) -> String {
    e.as_string().unwrap_or_else(|| format!("{e:?}"))
}
