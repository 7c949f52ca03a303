// src/noyau/erreur.rs

use thiserror::Error;

/// Échecs possibles de l’évaluation.
///
/// Tous sont locaux à l’évaluation : l’appelant garde son état et affiche
/// un avis unique “expression invalide”.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ErreurEval {
    /// Un caractère hors de `0-9 + - * / ( ) .` après normalisation.
    #[error("caractères invalides")]
    CaracteresInvalides,

    /// Expression normalisée de plus de `LONGUEUR_MAX` caractères.
    #[error("expression trop longue ({0} caractères)")]
    ExpressionTropLongue(usize),

    /// Résultat infini ou NaN (division par zéro, dépassement).
    #[error("résultat non numérique")]
    NonNumerique,

    /// Parenthèses déséquilibrées, opérande manquant, nombre mal formé...
    #[error("syntaxe: {0}")]
    Syntaxe(String),
}

impl ErreurEval {
    pub(crate) fn syntaxe(msg: impl Into<String>) -> Self {
        Self::Syntaxe(msg.into())
    }
}
