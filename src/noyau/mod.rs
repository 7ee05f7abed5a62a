//! Noyau : évaluateur sûr
//!
//! Organisation interne :
//! - entree.rs   : préparation de l’entrée (vide, longueur, multiplication implicite)
//! - jetons.rs   : tokenisation
//! - syntaxe.rs  : montée de précédence -> Expr
//! - expr.rs     : AST (arbre possédé, sans cycle)
//! - registre.rs : fonctions + constantes figées (phf)
//! - eval.rs     : parcours post-ordre + pipeline complet
//! - format.rs   : entier exact ou 10 décimales
//! - erreur.rs   : erreurs classées (ErrorKind)
//! - options.rs  : réglages passés explicitement

pub mod entree;
pub mod erreur;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod options;
pub mod registre;
pub mod syntaxe;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreur::{ErrorKind, EvalError};
pub use eval::{eval_expression, evaluate, evaluate_with, DemarcheNoyau};
pub use format::Resultat;
pub use options::{ModeModulo, Options};
