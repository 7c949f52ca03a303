// src/noyau/format.rs

use crate::config::DECIMALES;

/// Arrondi à `DECIMALES` décimales, puis forme décimale la plus courte
/// qui relit la même valeur.
///
/// - pas de bruit flottant : 0.1+0.2 -> "0.3"
/// - jamais d’exposant : le résultat reste une expression valide
/// - -0 -> "0"
pub fn formater_nombre(v: f64) -> String {
    if !v.is_finite() {
        // Le noyau ne renvoie que des valeurs finies ; affichage défensif.
        return format!("{v}");
    }

    let arrondi = arrondir(v, DECIMALES);
    if arrondi == 0.0 {
        return "0".to_string();
    }

    // Display de f64 : plus courte représentation aller-retour, sans exposant.
    format!("{arrondi}")
}

/// Arrondi décimal exact (formatage à précision fixe puis relecture).
fn arrondir(v: f64, decimales: usize) -> f64 {
    let txt = format!("{v:.decimales$}");
    txt.parse::<f64>().unwrap_or(v)
}
