// src/main.rs
//
// Calculatrice — point d’entrée NATIF + WEB (WASM)
// ------------------------------------------------
// - NATIF (Linux/Windows/macOS) : env_logger + eframe::run_native, historique
//   dans des fichiers JSON (dossier CALCULATRICE_DONNEES)
// - WEB  (wasm32)              : eframe::WebRunner sur <canvas>, historique dans
//   localStorage, enregistrement du service worker (./sw.js)
//
// Côté WEB : index.html doit contenir
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;

use app::AppCalc;
use calculatrice_hors_ligne::config::TITRE_APP;

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use calculatrice_hors_ligne::historique::StockageFichier;

    // RUST_LOG=debug pour voir les RPN et les refus d’évaluation
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let stockage = StockageFichier::depuis_env();
    log::info!("historique: {stockage:?}");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([340.0, 520.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(move |_cc| Ok(Box::new(AppCalc::new(Box::new(stockage))))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, TITRE_APP};

    use calculatrice_hors_ligne::config::SCRIPT_TRAVAILLEUR;
    use calculatrice_hors_ligne::historique::{Stockage, StockageMemoire};
    use calculatrice_hors_ligne::web::StockageLocal;
    use log::{info, warn};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{window, HtmlCanvasElement, Window};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Titre de l’onglet, service worker (sans bloquer l’UI)
    /// - Historique : localStorage, sinon mémoire seule
    /// - eframe WebRunner sur <canvas id="the_canvas_id">
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        console_error_panic_hook::set_once();
        eframe::WebLogger::init(log::LevelFilter::Info).ok();

        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        wasm_bindgen_futures::spawn_local(enregistrer_travailleur(w.clone()));

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let stockage: Box<dyn Stockage> = match StockageLocal::depuis_fenetre() {
            Ok(s) => Box::new(s),
            Err(e) => {
                // navigation privée stricte, iframe sandbox...
                warn!("localStorage indisponible, historique non persistant: {e}");
                Box::new(StockageMemoire::new())
            }
        };

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |_cc| Ok(Box::new(AppCalc::new(stockage)))),
            )
            .await
    }

    /// Échec silencieux pour l’utilisateur : l’app fonctionne sans cache.
    async fn enregistrer_travailleur(w: Window) {
        let conteneur = w.navigator().service_worker();
        match JsFuture::from(conteneur.register(SCRIPT_TRAVAILLEUR)).await {
            Ok(_) => info!("service worker enregistré ({SCRIPT_TRAVAILLEUR})"),
            Err(e) => warn!("service worker non enregistré: {e:?}"),
        }
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
