// src/noyau/entree.rs
//
// Préparation de l’entrée brute AVANT tokenisation (rôle du collaborateur) :
// - trim + refus de l’entrée vide
// - garde-fou de longueur (avant tout découpage, anti-pile)
// - multiplication implicite optionnelle : 2π -> 2*π, 2(3) -> 2*(3), (1)(2) -> (1)*(2)

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{trace, warn};

use super::erreur::EvalError;
use super::options::Options;

// nombre suivi d’un nom, de π/√ ou d’une '('
static APRES_NOMBRE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9.])([a-zA-Zπ√(])").unwrap());

// ')' ou π suivi d’un nombre, d’un nom, de π/√ ou d’une '('
static APRES_FERMANTE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([)π])([0-9.a-zA-Zπ√(])").unwrap());

/// Applique une règle jusqu’à stabilité (les correspondances qui se chevauchent,
/// comme "πππ", demandent plusieurs passes).
fn inserer_fois(re: &Regex, s: String) -> String {
    let mut courant = s;
    loop {
        let suivant = re.replace_all(&courant, "$1*$2");
        if let Cow::Borrowed(_) = suivant {
            return courant;
        }
        courant = suivant.into_owned();
    }
}

/// Développe la multiplication implicite (texte -> texte).
pub fn multiplication_implicite(s: &str) -> String {
    let s = inserer_fois(&APRES_NOMBRE_RE, s.to_string());
    inserer_fois(&APRES_FERMANTE_RE, s)
}

/// Entrée brute -> texte prêt pour `tokenize`.
pub fn preparer<'a>(brut: &'a str, options: &Options) -> Result<Cow<'a, str>, EvalError> {
    let s = brut.trim();
    if s.is_empty() {
        return Err(EvalError::Vide);
    }

    let longueur = s.chars().count();
    if longueur > options.longueur_max {
        warn!(longueur, max = options.longueur_max, "entrée refusée");
        return Err(EvalError::TropLong {
            longueur,
            max: options.longueur_max,
        });
    }

    if !options.multiplication_implicite {
        return Ok(Cow::Borrowed(s));
    }

    let developpe = multiplication_implicite(s);
    if developpe == s {
        return Ok(Cow::Borrowed(s));
    }
    trace!(avant = s, apres = %developpe, "multiplication implicite");
    Ok(Cow::Owned(developpe))
}
