// src/noyau/jetons.rs

use std::fmt;

use super::erreur::EvalError;

/// Opérateurs binaires de la table fixe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Plus,
    Moins,
    Fois,
    Div,
    Mod,
    Puiss, // ^
}

impl Op {
    pub fn symbole(self) -> char {
        match self {
            Op::Plus => '+',
            Op::Moins => '-',
            Op::Fois => '*',
            Op::Div => '/',
            Op::Mod => '%',
            Op::Puiss => '^',
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Fonctions + constantes : résolues au parse, jamais ici.
    Ident(String),

    Op(Op),

    LPar,
    RPar,
    Virgule,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(x) => write!(f, "{x}"),
            Tok::Ident(name) => f.write_str(name),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
            Tok::Virgule => f.write_str(","),
        }
    }
}

/// Jeton + position (en caractères) dans la source.
#[derive(Clone, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

/// Tokenize une chaîne en jetons.
/// Supporte:
/// - nombres décimaux (ex: 12, 3.5, .5, 5.) ; jamais de signe ici
/// - opérateurs + - * / % ^ et alias ÷ ×
/// - parenthèses ( ) et virgule
/// - identifiants [a-zA-Z]+ (casse conservée, résolus au parse)
/// - π (équivaut à ident("pi")), √ (équivaut à ident("sqrt"))
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];
        let pos = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            ',' => Some(Tok::Virgule),
            '+' => Some(Tok::Op(Op::Plus)),
            '-' => Some(Tok::Op(Op::Moins)),
            '*' | '×' => Some(Tok::Op(Op::Fois)),
            '/' | '÷' => Some(Tok::Op(Op::Div)),
            '%' => Some(Tok::Op(Op::Mod)),
            '^' => Some(Tok::Op(Op::Puiss)),
            'π' => Some(Tok::Ident("pi".to_string())),
            '√' => Some(Tok::Ident("sqrt".to_string())),
            _ => None,
        };
        if let Some(tok) = simple {
            out.push(Jeton { tok, pos });
            i += 1;
            continue;
        }

        // Identifiants ASCII : plus long préfixe de lettres ("exp" n’est pas "e" + "xp")
        if c.is_ascii_alphabetic() {
            while i < chars.len() && chars[i].is_ascii_alphabetic() {
                i += 1;
            }
            let word: String = chars[pos..i].iter().collect();
            out.push(Jeton {
                tok: Tok::Ident(word),
                pos,
            });
            continue;
        }

        // Nombre : chiffres avec au plus un point
        if c.is_ascii_digit() || c == '.' {
            let mut point_vu = false;
            while i < chars.len() {
                let d = chars[i];
                if d.is_ascii_digit() {
                    i += 1;
                } else if d == '.' && !point_vu {
                    point_vu = true;
                    i += 1;
                } else {
                    break;
                }
            }
            let texte: String = chars[pos..i].iter().collect();
            let valeur = texte
                .parse::<f64>()
                .map_err(|_| EvalError::NombreInvalide {
                    texte: texte.clone(),
                    position: pos,
                })?;
            out.push(Jeton {
                tok: Tok::Num(valeur),
                pos,
            });
            continue;
        }

        return Err(EvalError::CaractereInattendu {
            caractere: c,
            position: pos,
        });
    }

    Ok(out)
}

/// Format utilitaire (démarche) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.tok.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
