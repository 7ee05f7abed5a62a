// src/noyau/format.rs
//
// Mise en forme du résultat numérique.
// - entier mathématique (fini, x == floor(x)) : entier exact, jamais de point
// - sinon : valeur binaire EXACTE (BigRational) arrondie à 10 décimales,
//   zéros finaux retirés
//
// L’arrondi se fait sur le rationnel exact, pas sur le f64 : pas d’artefact
// du genre 0.30000000000000004 et pas de double arrondi.

use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

use super::erreur::EvalError;

/// Nombre de décimales conservées pour un résultat non entier.
pub const CHIFFRES_DECIMAUX: usize = 10;

fn pow10(n: usize) -> BigInt {
    BigInt::from(10).pow(n as u32)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resultat {
    Entier(BigInt),
    /// Valeur × 10^CHIFFRES_DECIMAUX, arrondie (demi loin de zéro).
    Decimal { mantisse: BigInt },
}

impl Resultat {
    pub fn est_entier(&self) -> bool {
        matches!(self, Resultat::Entier(_))
    }

    /// Valeur de transport (JSON, etc.).
    pub fn to_f64(&self) -> f64 {
        match self {
            Resultat::Entier(n) => n.to_f64().unwrap_or(f64::NAN),
            Resultat::Decimal { mantisse } => {
                let r = BigRational::new(mantisse.clone(), pow10(CHIFFRES_DECIMAUX));
                r.to_f64().unwrap_or(f64::NAN)
            }
        }
    }
}

/// f64 -> Resultat. Non fini => dépassement (aucune valeur par défaut).
pub fn formater(valeur: f64) -> Result<Resultat, EvalError> {
    if !valeur.is_finite() {
        return Err(EvalError::depassement("mise en forme"));
    }

    if valeur == valeur.floor() {
        // f64 entier : conversion exacte (couvre aussi -0.0 => 0)
        let n = BigInt::from_f64(valeur).ok_or_else(|| EvalError::depassement("mise en forme"))?;
        return Ok(Resultat::Entier(n));
    }

    let exact = BigRational::from_float(valeur)
        .ok_or_else(|| EvalError::depassement("mise en forme"))?;
    let scale = BigRational::from_integer(pow10(CHIFFRES_DECIMAUX));
    let mantisse = (exact * scale).round().to_integer();

    Ok(Resultat::Decimal { mantisse })
}

/// Entier "scalé" (×10^digits) -> texte décimal, zéros finaux retirés.
fn scaled_to_decimal(scaled: &BigInt, digits: usize) -> String {
    let neg = scaled.is_negative();
    let abs = scaled.abs();

    let scale = pow10(digits);
    let int_part = &abs / &scale;
    let frac_part = &abs % &scale;

    let signe = if neg && !abs.is_zero() { "-" } else { "" };

    if frac_part.is_zero() {
        return format!("{signe}{int_part}");
    }

    let mut frac = frac_part.to_str_radix(10);
    while frac.len() < digits {
        frac.insert(0, '0');
    }
    let frac = frac.trim_end_matches('0');

    format!("{signe}{int_part}.{frac}")
}

impl fmt::Display for Resultat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resultat::Entier(n) => write!(f, "{n}"),
            Resultat::Decimal { mantisse } => {
                f.write_str(&scaled_to_decimal(mantisse, CHIFFRES_DECIMAUX))
            }
        }
    }
}
