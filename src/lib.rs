//! Calculatrice scientifique sûre.
//!
//! Le noyau évalue une grammaire fermée (nombres, `+ - * / % ^ ( )`, constantes,
//! fonctions du registre) sans jamais passer par un évaluateur généraliste.
//!
//! ```
//! use calculatrice_sci::{evaluate, ErrorKind};
//!
//! assert_eq!(evaluate("2^3^2").unwrap(), 512.0);
//! assert_eq!(evaluate("1/0").unwrap_err().kind(), ErrorKind::DivisionParZero);
//! ```

pub mod noyau;

pub use noyau::{
    eval_expression, evaluate, evaluate_with, DemarcheNoyau, ErrorKind, EvalError, ModeModulo,
    Options, Resultat,
};
