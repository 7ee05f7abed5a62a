//! Noyau : erreurs classées.
//!
//! Chaque échec porte un genre (`ErrorKind`) stable : l’appelant décide du texte
//! affiché sans jamais comparer des messages.

use thiserror::Error;

/// Genre d’erreur, distinguable sans lire le message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caractère hors de l’alphabet accepté.
    Lex,
    /// Grammaire violée (parenthèses, jeton inattendu, arité, entrée vide…).
    Syntaxe,
    /// Identifiant absent des registres.
    Nom,
    /// Argument hors du domaine d’une fonction.
    Domaine,
    DivisionParZero,
    /// Résultat infini ou NaN après une opération valide.
    Depassement,
    /// Garde-fou : entrée trop longue ou trop imbriquée.
    Limite,
}

impl ErrorKind {
    /// Libellé court pour l’UI.
    pub fn libelle(self) -> &'static str {
        match self {
            ErrorKind::Lex => "caractère invalide",
            ErrorKind::Syntaxe => "erreur de syntaxe",
            ErrorKind::Nom => "nom inconnu",
            ErrorKind::Domaine => "hors domaine",
            ErrorKind::DivisionParZero => "division par zéro",
            ErrorKind::Depassement => "dépassement",
            ErrorKind::Limite => "limite atteinte",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    /* ------------------------ Lex ------------------------ */
    #[error("caractère inattendu: '{caractere}' (position {position})")]
    CaractereInattendu { caractere: char, position: usize },

    #[error("nombre invalide: \"{texte}\" (position {position})")]
    NombreInvalide { texte: String, position: usize },

    /* ------------------------ Syntaxe ------------------------ */
    #[error("expression vide")]
    Vide,

    #[error("jeton inattendu: '{jeton}' (position {position})")]
    JetonInattendu { jeton: String, position: usize },

    #[error("fin d’expression inattendue: {attendu} attendu")]
    FinInattendue { attendu: &'static str },

    #[error("parenthèse non fermée (ouverte en position {position})")]
    ParentheseNonFermee { position: usize },

    #[error("parenthèse fermante sans ouvrante (position {position})")]
    ParentheseFermante { position: usize },

    #[error("{fonction} attend {attendu} argument(s), reçu {recu}")]
    Arite {
        fonction: String,
        attendu: usize,
        recu: usize,
    },

    #[error("{nom} est une constante, pas une fonction")]
    PasUneFonction { nom: String },

    #[error("{nom} est une fonction : '(' attendu")]
    AppelSansParenthese { nom: String },

    /* ------------------------ Nom ------------------------ */
    #[error("nom inconnu: {nom}")]
    NomInconnu { nom: String },

    /* ------------------------ Évaluation ------------------------ */
    #[error("{fonction}({valeur}) : argument hors domaine ({domaine})")]
    Domaine {
        fonction: String,
        valeur: f64,
        domaine: &'static str,
    },

    #[error("division par zéro")]
    DivisionParZero,

    #[error("dépassement numérique dans {operation}")]
    Depassement { operation: String },

    /* ------------------------ Garde-fous ------------------------ */
    #[error("expression trop longue ({longueur} caractères, max {max})")]
    TropLong { longueur: usize, max: usize },

    #[error("expression trop imbriquée (profondeur max {max})")]
    TropProfond { max: usize },
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        use EvalError::*;

        match self {
            CaractereInattendu { .. } | NombreInvalide { .. } => ErrorKind::Lex,

            Vide
            | JetonInattendu { .. }
            | FinInattendue { .. }
            | ParentheseNonFermee { .. }
            | ParentheseFermante { .. }
            | Arite { .. }
            | PasUneFonction { .. }
            | AppelSansParenthese { .. } => ErrorKind::Syntaxe,

            NomInconnu { .. } => ErrorKind::Nom,
            Domaine { .. } => ErrorKind::Domaine,
            DivisionParZero => ErrorKind::DivisionParZero,
            Depassement { .. } => ErrorKind::Depassement,
            TropLong { .. } | TropProfond { .. } => ErrorKind::Limite,
        }
    }

    pub(crate) fn depassement(operation: impl Into<String>) -> Self {
        EvalError::Depassement {
            operation: operation.into(),
        }
    }
}
