//! Noyau — évaluation (pipeline réel)
//!
//! assainir -> jetons -> RPN -> valeur -> contrôle “fini”
//!
//! Aucun évaluateur dynamique : la grammaire est fermée
//! (nombres, + - * /, signes unaires, parenthèses).

use log::debug;

use super::assainir::assainir;
use super::erreur::ErreurEval;
use super::jetons::{format_tokens, tokenize};
use super::rpn::{eval_rpn, to_rpn};

/// API publique : évalue une expression saisie.
///
/// - Entrée vide => 0 (pas une erreur)
/// - Résultat non fini => `NonNumerique`
pub fn evaluer_securise(entree: &str) -> Result<f64, ErreurEval> {
    if entree.is_empty() {
        return Ok(0.0);
    }

    // 1) Normalisation + liste blanche + longueur
    let s = assainir(entree)?;

    // 2) Jetons
    let jetons = tokenize(&s)?;

    // 3) RPN
    let rpn = to_rpn(&jetons)?;
    debug!("rpn({s}) = {}", format_tokens(&rpn));

    // 4) Valeur
    let v = eval_rpn(&rpn)?;
    if !v.is_finite() {
        return Err(ErreurEval::NonNumerique);
    }

    Ok(v)
}
