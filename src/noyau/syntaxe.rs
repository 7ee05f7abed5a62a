// src/noyau/syntaxe.rs
//
// Jetons -> AST par montée de précédence (precedence climbing).
//
// Grammaire:
//   expression := terme (('+' | '-') terme)*
//   terme      := unaire (('*' | '/' | '%') unaire)*
//   unaire     := ('-' | '+') unaire | puissance
//   puissance  := postfixe ('^' unaire)?        // associatif à droite
//   postfixe   := primaire ('%')?               // mode pourcent seulement
//   primaire   := nombre | constante | appel | '(' expression ')'
//   appel      := ident '(' (expression (',' expression)*)? ')'
//
// Règles:
// - Le moins unaire lie moins fort que '^' : -2^2 = -(2^2).
// - Les identifiants sont résolus ici contre le registre (pas au tokenize).
// - L’arité d’un appel est vérifiée ici : l’évaluation ne voit que des appels valides.
// - La profondeur d’imbrication est bornée (Options::profondeur_max).

use tracing::warn;

use super::erreur::EvalError;
use super::expr::{Expr, OpUnaire};
use super::jetons::{Jeton, Op, Tok};
use super::options::{ModeModulo, Options};
use super::registre;

fn precedence(op: Op) -> u8 {
    match op {
        Op::Plus | Op::Moins => 1,
        Op::Fois | Op::Div | Op::Mod => 2,
        Op::Puiss => 4,
    }
}

/// Entre terme (2) et puissance (4) : l’opérande d’un signe absorbe '^' mais pas '*'.
const PRECEDENCE_UNAIRE: u8 = 3;

fn is_right_associative(op: Op) -> bool {
    matches!(op, Op::Puiss)
}

/// Construit l’AST d’une suite de jetons.
pub fn parse(jetons: &[Jeton], options: &Options) -> Result<Expr, EvalError> {
    if jetons.is_empty() {
        return Err(EvalError::Vide);
    }

    let mut p = Parseur {
        jetons,
        i: 0,
        profondeur: 0,
        options,
    };

    let expr = p.expression(0)?;

    // jetons restants après une expression complète
    if let Some(j) = p.jetons.get(p.i) {
        return Err(match j.tok {
            Tok::RPar => EvalError::ParentheseFermante { position: j.pos },
            _ => inattendu(j),
        });
    }

    Ok(expr)
}

fn inattendu(j: &Jeton) -> EvalError {
    EvalError::JetonInattendu {
        jeton: j.tok.to_string(),
        position: j.pos,
    }
}

struct Parseur<'a> {
    jetons: &'a [Jeton],
    i: usize,
    profondeur: usize,
    options: &'a Options,
}

impl<'a> Parseur<'a> {
    fn peek(&self) -> Option<&'a Tok> {
        self.jetons.get(self.i).map(|j| &j.tok)
    }

    fn suivant(&mut self) -> Option<&'a Jeton> {
        let j = self.jetons.get(self.i);
        if j.is_some() {
            self.i += 1;
        }
        j
    }

    fn entrer(&mut self) -> Result<(), EvalError> {
        self.profondeur += 1;
        if self.profondeur > self.options.profondeur_max {
            warn!(max = self.options.profondeur_max, "imbrication refusée");
            return Err(EvalError::TropProfond {
                max: self.options.profondeur_max,
            });
        }
        Ok(())
    }

    fn sortir(&mut self) {
        self.profondeur -= 1;
    }

    /// Opérateur binaire en tête, s’il compte comme binaire dans le mode courant.
    fn op_binaire(&self) -> Option<Op> {
        match self.peek() {
            Some(Tok::Op(Op::Mod)) if self.options.modulo == ModeModulo::Pourcent => None,
            Some(Tok::Op(op)) => Some(*op),
            _ => None,
        }
    }

    fn expression(&mut self, prec_min: u8) -> Result<Expr, EvalError> {
        self.entrer()?;

        let mut gauche = self.operande()?;

        while let Some(op) = self.op_binaire() {
            let p = precedence(op);
            if p < prec_min {
                break;
            }
            self.i += 1;

            let prec_droite = if is_right_associative(op) { p } else { p + 1 };
            let droite = self.expression(prec_droite)?;
            gauche = Expr::binaire(op, gauche, droite);
        }

        self.sortir();
        Ok(gauche)
    }

    /// Signe unaire, ou primaire suivi de son éventuel '%' postfixé.
    fn operande(&mut self) -> Result<Expr, EvalError> {
        let Some(j) = self.suivant() else {
            return Err(EvalError::FinInattendue {
                attendu: "une valeur",
            });
        };
        let pos = j.pos;

        let primaire = match &j.tok {
            Tok::Op(Op::Moins) => {
                let x = self.expression(PRECEDENCE_UNAIRE)?;
                return Ok(Expr::unaire(OpUnaire::Neg, x));
            }
            Tok::Op(Op::Plus) => {
                let x = self.expression(PRECEDENCE_UNAIRE)?;
                return Ok(Expr::unaire(OpUnaire::Plus, x));
            }

            Tok::Num(x) => Expr::Nombre(*x),

            Tok::LPar => {
                let e = self.expression(0)?;
                self.fermer(pos)?;
                e
            }

            Tok::Ident(nom) => self.identifiant(nom.clone())?,

            Tok::RPar | Tok::Virgule | Tok::Op(_) => return Err(inattendu(j)),
        };

        Ok(self.postfixe(primaire))
    }

    fn postfixe(&mut self, mut e: Expr) -> Expr {
        if self.options.modulo == ModeModulo::Pourcent {
            while matches!(self.peek(), Some(Tok::Op(Op::Mod))) {
                self.i += 1;
                e = Expr::unaire(OpUnaire::Pourcent, e);
            }
        }
        e
    }

    /// Consomme la ')' qui ferme la '(' ouverte en `ouverte`.
    fn fermer(&mut self, ouverte: usize) -> Result<(), EvalError> {
        match self.suivant() {
            Some(Jeton { tok: Tok::RPar, .. }) => Ok(()),
            Some(j) => Err(inattendu(j)),
            None => Err(EvalError::ParentheseNonFermee { position: ouverte }),
        }
    }

    fn identifiant(&mut self, nom: String) -> Result<Expr, EvalError> {
        let suivi_de_par = matches!(self.peek(), Some(Tok::LPar));

        if let Some(f) = registre::fonction(&nom) {
            if !suivi_de_par {
                return Err(EvalError::AppelSansParenthese { nom });
            }
            let args = self.arguments()?;
            if args.len() != f.arite {
                return Err(EvalError::Arite {
                    fonction: nom,
                    attendu: f.arite,
                    recu: args.len(),
                });
            }
            return Ok(Expr::Appel(nom, args));
        }

        if registre::constante(&nom).is_some() {
            if suivi_de_par {
                return Err(EvalError::PasUneFonction { nom });
            }
            return Ok(Expr::Constante(nom));
        }

        Err(EvalError::NomInconnu { nom })
    }

    /// '(' (expression (',' expression)*)? ')'
    fn arguments(&mut self) -> Result<Vec<Expr>, EvalError> {
        let ouverte = match self.suivant() {
            Some(j) => j.pos,
            None => {
                return Err(EvalError::FinInattendue { attendu: "'('" });
            }
        };

        let mut args = Vec::new();
        if matches!(self.peek(), Some(Tok::RPar)) {
            self.i += 1;
            return Ok(args);
        }

        loop {
            args.push(self.expression(0)?);
            match self.suivant() {
                Some(Jeton {
                    tok: Tok::Virgule, ..
                }) => continue,
                Some(Jeton { tok: Tok::RPar, .. }) => return Ok(args),
                Some(j) => return Err(inattendu(j)),
                None => return Err(EvalError::ParentheseNonFermee { position: ouverte }),
            }
        }
    }
}
