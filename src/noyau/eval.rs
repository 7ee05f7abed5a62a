//! Noyau : évaluation (pipeline réel)
//!
//! préparation -> jetons -> AST (syntaxe) -> évaluation f64 -> mise en forme
//!
//! L’évaluation est un parcours post-ordre : enfants d’abord, puis opérateur ou
//! fonction. La première erreur arrête tout ; aucun résultat partiel.

use tracing::{debug, trace};

use super::entree::preparer;
use super::erreur::EvalError;
use super::expr::{Expr, OpUnaire};
use super::format::{formater, Resultat};
use super::jetons::{format_tokens, tokenize, Op};
use super::options::Options;
use super::registre::{self, puissance_definie};
use super::syntaxe::parse;

#[derive(Default, Clone, Debug, PartialEq)]
pub struct DemarcheNoyau {
    pub entree: String,
    pub jetons: String,
    pub arbre: String,
    pub valeur: String,
    pub note: String,
}

/// API cœur : évalue une expression avec les options par défaut.
///
/// Pure : aucun état caché ; même entrée => même sortie.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    evaluate_with(expression, &Options::default())
}

/// Comme `evaluate`, options explicites. Toutes sont honorées : longueur max
/// (qui borne aussi une chaîne plate `1+1+…`, donc la profondeur de l’arbre),
/// multiplication implicite, mode `%`, profondeur d’imbrication.
pub fn evaluate_with(expression: &str, options: &Options) -> Result<f64, EvalError> {
    let s = preparer(expression, options)?;
    let jetons = tokenize(&s)?;
    let arbre = parse(&jetons, options)?;
    evaluer_arbre(&arbre)
}

/// API publique (collaborateur) : évalue une entrée utilisateur et retourne:
/// - le résultat mis en forme (entier exact ou 10 décimales max)
/// - la démarche (entrée préparée, jetons, arbre, valeur brute)
pub fn eval_expression(
    expr_str: &str,
    options: &Options,
) -> Result<(Resultat, DemarcheNoyau), EvalError> {
    // 1) Préparation (vide, longueur, multiplication implicite)
    let s = preparer(expr_str, options)?;

    // 2) Jetons
    let jetons = tokenize(&s)?;
    let jetons_txt = format_tokens(&jetons);
    trace!(jetons = %jetons_txt, "jetons");

    // 3) AST
    let arbre = parse(&jetons, options)?;
    debug!(
        jetons = jetons.len(),
        profondeur = arbre.profondeur(),
        "arbre construit"
    );

    // 4) Évaluation
    let valeur = evaluer_arbre(&arbre)?;

    // 5) Mise en forme
    let resultat = formater(valeur)?;
    debug!(resultat = %resultat, "évaluation terminée");

    let d = DemarcheNoyau {
        entree: s.into_owned(),
        jetons: jetons_txt,
        arbre: arbre.to_string(),
        valeur: format!("{valeur:e}"),
        note: "Pipeline: préparation → jetons → arbre → évaluation → mise en forme.".into(),
    };

    Ok((resultat, d))
}

/// Valeur finie exigée après chaque opération valide.
fn fini(x: f64, operation: impl FnOnce() -> String) -> Result<f64, EvalError> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(EvalError::depassement(operation()))
    }
}

/// Parcours post-ordre d’un AST validé.
pub fn evaluer_arbre(expr: &Expr) -> Result<f64, EvalError> {
    match expr {
        Expr::Nombre(x) => fini(*x, || "littéral".into()),

        Expr::Constante(nom) => {
            registre::constante(nom).ok_or_else(|| EvalError::NomInconnu { nom: nom.clone() })
        }

        Expr::Unaire(op, x) => {
            let v = evaluer_arbre(x)?;
            Ok(match op {
                OpUnaire::Neg => -v,
                OpUnaire::Plus => v,
                OpUnaire::Pourcent => v / 100.0,
            })
        }

        Expr::Binaire(op, a, b) => {
            let va = evaluer_arbre(a)?;
            let vb = evaluer_arbre(b)?;
            binaire(*op, va, vb)
        }

        Expr::Appel(nom, args) => {
            let f = registre::fonction(nom)
                .ok_or_else(|| EvalError::NomInconnu { nom: nom.clone() })?;

            // défense en profondeur : le parseur a déjà vérifié l’arité
            if args.len() != f.arite {
                return Err(EvalError::Arite {
                    fonction: nom.clone(),
                    attendu: f.arite,
                    recu: args.len(),
                });
            }

            let valeurs = args
                .iter()
                .map(evaluer_arbre)
                .collect::<Result<Vec<f64>, _>>()?;

            if !(f.domaine)(&valeurs) {
                return Err(EvalError::Domaine {
                    fonction: nom.clone(),
                    valeur: valeurs[0],
                    domaine: f.domaine_txt,
                });
            }

            fini((f.calcul)(&valeurs), || nom.clone())
        }
    }
}

fn binaire(op: Op, a: f64, b: f64) -> Result<f64, EvalError> {
    let r = match op {
        Op::Plus => a + b,
        Op::Moins => a - b,
        Op::Fois => a * b,
        Op::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionParZero);
            }
            a / b
        }
        // reste flottant, signe du dividende (fmod)
        Op::Mod => {
            if b == 0.0 {
                return Err(EvalError::DivisionParZero);
            }
            a % b
        }
        Op::Puiss => {
            if !puissance_definie(&[a, b]) {
                return Err(EvalError::Domaine {
                    fonction: "^".into(),
                    valeur: a,
                    domaine: "base ≥ 0 ou exposant entier",
                });
            }
            a.powf(b)
        }
    };
    fini(r, || format!("'{}'", op.symbole()))
}
