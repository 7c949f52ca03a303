// src/noyau/assainir.rs
//
// Normalisation textuelle avant l’analyse.
// Ordre (important) :
//   1) glyphes localisés -> ASCII (× ÷ −), retrait des espaces
//   2) <nombre>% -> (<nombre>/100)   (pourcentage purement textuel)
//   3) liste blanche de caractères
//   4) longueur maximale

use std::sync::OnceLock;

use regex::Regex;

use super::erreur::ErreurEval;
use crate::config::LONGUEUR_MAX;

fn motif_pourcent() -> &'static Regex {
    static MOTIF: OnceLock<Regex> = OnceLock::new();
    // [0-9] et non \d : \d est Unicode dans `regex`.
    MOTIF.get_or_init(|| Regex::new(r"([0-9]+(\.[0-9]+)?)%").expect("motif pourcent"))
}

fn motif_autorise() -> &'static Regex {
    static MOTIF: OnceLock<Regex> = OnceLock::new();
    MOTIF.get_or_init(|| Regex::new(r"^[0-9+\-*/().]+$").expect("motif liste blanche"))
}

/// Remplace × ÷ − par leurs équivalents ASCII et retire tout blanc.
pub fn normaliser_glyphes(entree: &str) -> String {
    entree
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '×' => '*',
            '÷' => '/',
            '−' => '-',
            autre => autre,
        })
        .collect()
}

/// `50%` -> `(50/100)` ; `2*1.5%` -> `2*(1.5/100)`.
///
/// Un `%` qui ne suit pas directement un nombre reste en place
/// (et sera refusé par la liste blanche).
pub fn reecrire_pourcent(s: &str) -> String {
    motif_pourcent().replace_all(s, "($1/100)").into_owned()
}

/// Pipeline complet de normalisation.
/// Renvoie la chaîne prête pour le découpage en jetons.
pub fn assainir(entree: &str) -> Result<String, ErreurEval> {
    let s = normaliser_glyphes(entree);
    let s = reecrire_pourcent(&s);

    if !motif_autorise().is_match(&s) {
        return Err(ErreurEval::CaracteresInvalides);
    }

    // ASCII garanti ici : len() == nombre de caractères.
    if s.len() > LONGUEUR_MAX {
        return Err(ErreurEval::ExpressionTropLongue(s.len()));
    }

    Ok(s)
}
