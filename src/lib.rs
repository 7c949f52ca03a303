//! Calculatrice hors ligne
//!
//! Deux composants indépendants :
//! - moteur (+ noyau, historique) : saisie, évaluation sûre, historique borné
//! - travailleur : cache hors ligne de la coquille (service worker)
//!
//! L’interface egui vit dans le binaire (src/app).

pub mod config;
pub mod historique;
pub mod moteur;
pub mod noyau;
pub mod travailleur;

// Adaptateurs navigateur : localStorage, CacheStorage, événements du worker.
#[cfg(target_arch = "wasm32")]
pub mod web;
