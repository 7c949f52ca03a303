// src/web/stockage.rs

use web_sys::{window, Storage};

use super::js_texte;
use crate::historique::{ErreurStockage, Stockage};

/// `window.localStorage` (persistant, partagé entre onglets, dernier écrivain gagnant).
pub struct StockageLocal {
    stockage: Storage,
}

impl StockageLocal {
    pub fn depuis_fenetre() -> Result<Self, ErreurStockage> {
        let w = window().ok_or_else(|| ErreurStockage::Hote("window() indisponible".into()))?;
        let stockage = w
            .local_storage()
            .map_err(|e| ErreurStockage::Hote(js_texte(&e)))?
            .ok_or_else(|| ErreurStockage::Hote("localStorage indisponible".into()))?;
        Ok(Self { stockage })
    }
}

impl Stockage for StockageLocal {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        self.stockage
            .get_item(cle)
            .map_err(|e| ErreurStockage::Hote(js_texte(&e)))
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        // QuotaExceededError possible
        self.stockage
            .set_item(cle, valeur)
            .map_err(|e| ErreurStockage::Hote(js_texte(&e)))
    }

    fn retirer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
        self.stockage
            .remove_item(cle)
            .map_err(|e| ErreurStockage::Hote(js_texte(&e)))
    }
}
