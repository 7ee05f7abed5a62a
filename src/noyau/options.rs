// src/noyau/options.rs
//
// Réglages du noyau, passés explicitement à chaque appel (aucun singleton).

use serde::{Deserialize, Serialize};

/// Longueur max d’une entrée (en caractères) avant tout découpage.
/// Borne aussi la profondeur de l’arbre d’une chaîne plate (`1+1+…`).
pub const LONGUEUR_MAX_DEFAUT: usize = 1000;

/// Profondeur max d’imbrication acceptée par le parseur.
pub const PROFONDEUR_MAX_DEFAUT: usize = 256;

/// Sens du symbole `%`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeModulo {
    /// `a % b` : reste flottant, signe du dividende (fmod).
    #[default]
    Reste,
    /// `x%` : pourcentage postfixé (x / 100). `a % b` devient une erreur.
    Pourcent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub modulo: ModeModulo,

    /// Pré-passe `2π → 2*π`, `2(3) → 2*(3)` (voir entree.rs).
    pub multiplication_implicite: bool,

    pub longueur_max: usize,
    pub profondeur_max: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            modulo: ModeModulo::Reste,
            multiplication_implicite: false,
            longueur_max: LONGUEUR_MAX_DEFAUT,
            profondeur_max: PROFONDEUR_MAX_DEFAUT,
        }
    }
}
