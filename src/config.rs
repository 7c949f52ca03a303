//! Constantes de l’application (noyau, historique, avis, travailleur de cache).

/// Titre unique (natif + web).
pub const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Noyau ------------------------ */

/// Longueur maximale d’une expression normalisée.
pub const LONGUEUR_MAX: usize = 200;

/// Décimales conservées avant l’affichage.
pub const DECIMALES: usize = 12;

/// Affiché quand l’aperçu n’est pas calculable.
pub const APERCU_INDISPONIBLE: &str = "—";

/* ------------------------ Historique ------------------------ */

/// Préfixe d’espace de noms pour le stockage persistant.
pub const PREFIXE_STOCKAGE: &str = "calc_";

/// Clé (sans préfixe) de l’historique.
pub const CLE_HISTORIQUE: &str = "history";

/// Nombre d’entrées conservées (les plus anciennes sont évincées).
pub const HISTORIQUE_MAX: usize = 50;

/// Dossier de stockage natif, surchargeable par la variable d’environnement.
pub const VAR_DOSSIER_DONNEES: &str = "CALCULATRICE_DONNEES";
pub const DOSSIER_DONNEES_DEFAUT: &str = ".calculatrice";

/* ------------------------ Avis ------------------------ */

pub const DUREE_AVIS_MS: u64 = 1500;
pub const AVIS_EXPRESSION_INVALIDE: &str = "Expression invalide";
pub const AVIS_HISTORIQUE_EFFACE: &str = "Historique effacé";

/* ------------------------ Travailleur de cache ------------------------ */

/// Seau courant ; tout autre nom est purgé à l’activation.
pub const NOM_CACHE: &str = "calcpwa-shell-v1";

/// Page servie hors ligne pour les requêtes de document.
pub const PAGE_HORS_LIGNE: &str = "./index.html";

/// Coquille de l’application, mise en cache à l’installation.
pub const RESSOURCES_COQUILLE: &[&str] = &[
    "./index.html",
    "./styles.css",
    "./script.js",
    "./manifest.json",
    "./icons/icon-72.png",
    "./icons/icon-96.png",
    "./icons/icon-128.png",
    "./icons/icon-192.png",
    "./icons/icon-512.png",
];

/// Script du service worker, enregistré depuis la page.
pub const SCRIPT_TRAVAILLEUR: &str = "./sw.js";
