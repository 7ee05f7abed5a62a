// src/noyau/expr.rs
//
// AST du noyau.
// - Nombre     : littéral
// - Constante  : nom déjà validé contre le registre (pi, e)
// - Unaire     : -x, +x, x% (mode pourcent)
// - Binaire    : + - * / % ^
// - Appel      : fonction du registre, arité déjà vérifiée
//
// Arbre possédé, sans partage ni cycle : chaque noeud appartient à son parent.

use std::fmt;

use super::jetons::Op;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpUnaire {
    Neg,
    Plus,
    Pourcent,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Nombre(f64),
    Constante(String),

    Unaire(OpUnaire, Box<Expr>),
    Binaire(Op, Box<Expr>, Box<Expr>),

    Appel(String, Vec<Expr>),
}

impl Expr {
    pub fn unaire(op: OpUnaire, x: Expr) -> Expr {
        Expr::Unaire(op, Box::new(x))
    }

    pub fn binaire(op: Op, a: Expr, b: Expr) -> Expr {
        Expr::Binaire(op, Box::new(a), Box::new(b))
    }

    /// Profondeur de l’arbre (feuille = 1).
    pub fn profondeur(&self) -> usize {
        match self {
            Expr::Nombre(_) | Expr::Constante(_) => 1,
            Expr::Unaire(_, x) => 1 + x.profondeur(),
            Expr::Binaire(_, a, b) => 1 + a.profondeur().max(b.profondeur()),
            Expr::Appel(_, args) => 1 + args.iter().map(Expr::profondeur).max().unwrap_or(0),
        }
    }
}

/// Affichage entièrement parenthésé (démarche) : la structure se lit sans ambiguïté.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nombre(x) => write!(f, "{x}"),
            Expr::Constante(nom) if nom == "pi" => f.write_str("π"),
            Expr::Constante(nom) => f.write_str(nom),

            Expr::Unaire(OpUnaire::Neg, x) => write!(f, "(-{x})"),
            Expr::Unaire(OpUnaire::Plus, x) => write!(f, "(+{x})"),
            Expr::Unaire(OpUnaire::Pourcent, x) => write!(f, "({x}%)"),

            Expr::Binaire(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),

            Expr::Appel(nom, args) => {
                write!(f, "{nom}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
