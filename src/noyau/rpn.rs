// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis évaluer la RPN sur une pile de f64
//
// Règles:
// - Alternance valeur / opérateur vérifiée à chaque jeton
//   (`prev_was_value` = on vient de lire une valeur)
// - + - * / binaires, associatifs à gauche, * / avant + -
// - Signes unaires:
//    - '-' quand on n’attend PAS une valeur => Tok::Neg (préfixe, prioritaire)
//    - '+' quand on n’attend PAS une valeur => ignoré
//   Donc "2*-3" = 2*(-3) et "-2*3" = (-2)*3.

use super::erreur::ErreurEval;
use super::jetons::Tok;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Neg => 3,
        _ => 0,
    }
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Num(1), Plus, Num(2), Star, Num(3)]
///   rpn:    [Num(1), Num(2), Num(3), Star, Plus]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurEval> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // “valeur” = un nombre ou une expression fermée.
    // Sert à détecter les signes unaires et à refuser les juxtapositions.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) => {
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("nombre inattendu après une valeur"));
                }
                out.push(tok);
                prev_was_value = true;
            }

            Tok::LPar => {
                // pas de multiplication implicite : "2(3)", "(1)(2)"
                if prev_was_value {
                    return Err(ErreurEval::syntaxe("parenthèse ouvrante après une valeur"));
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // "()", "(3*)", "(-)"
                if !prev_was_value {
                    return Err(ErreurEval::syntaxe("parenthèse fermante sans opérande"));
                }
                // dépile jusqu’à '('
                let mut ouverte = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouverte = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouverte {
                    return Err(ErreurEval::syntaxe("parenthèse fermante sans ouvrante"));
                }
                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // préfixe : rien à dépiler, l’opérande n’est pas encore lu
                if matches!(tok, Tok::Minus) {
                    ops.push(Tok::Neg);
                }
            }

            Tok::Star | Tok::Slash if !prev_was_value => {
                return Err(ErreurEval::syntaxe("opérateur sans opérande gauche"));
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                // binaire, associatif à gauche : dépile tant que précédence >=
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) || precedence(top) < precedence(&tok) {
                        break;
                    }
                    if let Some(op) = ops.pop() {
                        out.push(op);
                    }
                }
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Neg => return Err(ErreurEval::syntaxe("jeton unaire inattendu")),
        }
    }

    // "2*", "-" : opérateur en fin d’expression
    if !tokens.is_empty() && !prev_was_value {
        return Err(ErreurEval::syntaxe("opérande manquant en fin d’expression"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurEval::syntaxe("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}

/// Évalue une RPN.
///
/// Ne filtre PAS les infinis : le contrôle “fini” est fait par l’appelant.
pub fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurEval> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),

            Tok::Neg => {
                let x = st.pop().ok_or_else(|| ErreurEval::syntaxe("opérande manquant"))?;
                st.push(-x);
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash => {
                let b = st.pop().ok_or_else(|| ErreurEval::syntaxe("opérande manquant"))?;
                let a = st.pop().ok_or_else(|| ErreurEval::syntaxe("opérande manquant"))?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    _ => a / b,
                };
                st.push(v);
            }

            Tok::LPar | Tok::RPar => {
                return Err(ErreurEval::syntaxe("parenthèse inattendue en RPN"))
            }
        }
    }

    // "2(3)" ou "()" : pile != 1
    match (st.pop(), st.is_empty()) {
        (Some(v), true) => Ok(v),
        _ => Err(ErreurEval::syntaxe("expression invalide")),
    }
}
