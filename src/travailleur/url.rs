// src/travailleur/url.rs
//
// Le strict nécessaire sur les URL : origine, résolution de chemins relatifs
// à la portée du worker, clé de cache (sans fragment).

/// `https://exemple.org:8443/a/b?q` -> `https://exemple.org:8443`
pub fn origine(url: &str) -> Option<&str> {
    let debut = url.find("://")? + 3;
    let fin = url[debut..]
        .find(['/', '?', '#'])
        .map(|i| debut + i)
        .unwrap_or(url.len());
    if fin == debut {
        return None;
    }
    Some(&url[..fin])
}

/// Schéma et hôte insensibles à la casse.
///
/// Comparaison textuelle : `https://a.org:443` et `https://a.org` diffèrent.
/// Les URL de requête du navigateur arrivent déjà sans port par défaut.
pub fn meme_origine(a: &str, b: &str) -> bool {
    match (origine(a), origine(b)) {
        (Some(x), Some(y)) => x.eq_ignore_ascii_case(y),
        _ => false,
    }
}

/// Retire `#fragment` (ignoré par le cache).
pub fn sans_fragment(url: &str) -> &str {
    match url.find('#') {
        Some(i) => &url[..i],
        None => url,
    }
}

/// Résout `./x`, `x`, `/x` ou une URL absolue par rapport à la portée.
pub fn resoudre(portee: &str, chemin: &str) -> String {
    if chemin.contains("://") {
        return chemin.to_string();
    }

    if let Some(abs) = chemin.strip_prefix('/') {
        let o = origine(portee).unwrap_or(portee);
        return format!("{o}/{abs}");
    }

    // répertoire de la portée : tout jusqu’au dernier '/', requête/fragment exclus
    let portee = portee.split(['?', '#']).next().unwrap_or(portee);
    let apres_origine = origine(portee).map(str::len).unwrap_or(0);
    let dossier = match portee[apres_origine..].rfind('/') {
        Some(i) => &portee[..apres_origine + i + 1],
        None => {
            return format!(
                "{portee}/{}",
                chemin.strip_prefix("./").unwrap_or(chemin)
            )
        }
    };

    format!("{dossier}{}", chemin.strip_prefix("./").unwrap_or(chemin))
}
