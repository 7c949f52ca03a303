// src/historique/stockage.rs
//
// Stockage clé -> valeur persistant, fourni par l’hôte.
// - StockageMemoire : tests + repli si le disque est indisponible
// - StockageFichier : natif, un fichier par clé
// - (wasm) localStorage : voir crate::web::stockage

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ErreurStockage {
    #[error("E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("format JSON: {0}")]
    Format(#[from] serde_json::Error),

    #[error("hôte: {0}")]
    Hote(String),
}

pub trait Stockage {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage>;
    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage>;
    fn retirer(&mut self, cle: &str) -> Result<(), ErreurStockage>;
}

/* ------------------------ Mémoire ------------------------ */

/// Les clones partagent les mêmes données (pratique pour inspecter en test).
#[derive(Clone, Default, Debug)]
pub struct StockageMemoire {
    donnees: Rc<RefCell<HashMap<String, String>>>,
}

impl StockageMemoire {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stockage for StockageMemoire {
    fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
        Ok(self.donnees.borrow().get(cle).cloned())
    }

    fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
        self.donnees
            .borrow_mut()
            .insert(cle.to_string(), valeur.to_string());
        Ok(())
    }

    fn retirer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
        self.donnees.borrow_mut().remove(cle);
        Ok(())
    }
}

/* ------------------------ Fichiers (natif) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
pub use fichier::StockageFichier;

#[cfg(not(target_arch = "wasm32"))]
mod fichier {
    use std::io::ErrorKind;
    use std::path::PathBuf;
    use std::{env, fs};

    use super::{ErreurStockage, Stockage};
    use crate::config::{DOSSIER_DONNEES_DEFAUT, VAR_DOSSIER_DONNEES};

    /// Un fichier `<clé>.json` par clé, dans un dossier dédié.
    #[derive(Clone, Debug)]
    pub struct StockageFichier {
        dossier: PathBuf,
    }

    impl StockageFichier {
        pub fn new(dossier: impl Into<PathBuf>) -> Self {
            Self {
                dossier: dossier.into(),
            }
        }

        /// Dossier pris dans `CALCULATRICE_DONNEES`, sinon `.calculatrice`.
        pub fn depuis_env() -> Self {
            let dossier = env::var_os(VAR_DOSSIER_DONNEES)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DOSSIER_DONNEES_DEFAUT));
            Self::new(dossier)
        }

        fn chemin(&self, cle: &str) -> PathBuf {
            self.dossier.join(format!("{cle}.json"))
        }
    }

    impl Stockage for StockageFichier {
        fn lire(&self, cle: &str) -> Result<Option<String>, ErreurStockage> {
            match fs::read_to_string(self.chemin(cle)) {
                Ok(s) => Ok(Some(s)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(e.into()),
            }
        }

        fn ecrire(&mut self, cle: &str, valeur: &str) -> Result<(), ErreurStockage> {
            fs::create_dir_all(&self.dossier)?;
            fs::write(self.chemin(cle), valeur)?;
            Ok(())
        }

        fn retirer(&mut self, cle: &str) -> Result<(), ErreurStockage> {
            match fs::remove_file(self.chemin(cle)) {
                Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
                _ => Ok(()),
            }
        }
    }
}
