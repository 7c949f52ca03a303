//! Noyau arithmétique
//!
//! Organisation interne :
//! - assainir.rs : glyphes -> ASCII, pourcentage textuel, liste blanche, longueur
//! - jetons.rs   : tokenisation (nombres décimaux, opérateurs, parenthèses)
//! - rpn.rs      : shunting-yard + évaluation de la RPN
//! - format.rs   : arrondi 12 décimales + forme courte
//! - eval.rs     : pipeline complet
//! - erreur.rs   : taxonomie des échecs

pub mod assainir;
pub mod erreur;
pub mod eval;
pub mod format;
pub mod jetons;
pub mod rpn;


// API publique minimale
pub use erreur::ErreurEval;
pub use eval::evaluer_securise;
pub use format::formater_nombre;
