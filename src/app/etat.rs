//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, résultat, erreur, historique,
//! options, démarche) et offrir des opérations simples (C/CLR/AC, rappel) sans
//! logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing) : la vue appelle le noyau et dépose.
//! - Actions déterministes, sans effet de bord caché.
//! - Persisté : entrée, historique, options. Le reste est recalculé.

use std::collections::VecDeque;

use calculatrice_sci::{DemarcheNoyau, ErrorKind, EvalError, Options};
use serde::{Deserialize, Serialize};

/// Nombre d’évaluations réussies conservées.
pub const HISTORIQUE_MAX: usize = 50;

/// Options par défaut côté UI : on tape "2π" comme sur une calculatrice.
fn options_ui() -> Options {
    Options {
        multiplication_implicite: true,
        ..Options::default()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LigneHistorique {
    pub expression: String,
    pub resultat: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    #[serde(skip)]
    pub resultat: String,
    #[serde(skip)]
    pub erreur: String,
    #[serde(skip)]
    pub genre_erreur: Option<ErrorKind>,

    // --- démarche (panneau d’explication) ---
    #[serde(skip)]
    pub demarche: DemarcheNoyau,

    // --- plus récent en tête ---
    pub historique: VecDeque<LigneHistorique>,

    // --- paramètres ---
    pub options: Options,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    #[serde(skip)]
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            genre_erreur: None,
            demarche: DemarcheNoyau::default(),
            historique: VecDeque::new(),
            options: options_ui(),
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats + historique + options par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.historique.clear();
        self.options = options_ui();
        self.focus_entree = true;
    }

    /// C : effacer seulement l’entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher à l’entrée).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.clear_erreur();
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    fn clear_erreur(&mut self) {
        self.erreur.clear();
        self.genre_erreur = None;
    }

    /// Placer une erreur.
    ///
    /// On CONSERVE le dernier résultat pour ne pas “effacer l’écran” sur une faute ;
    /// la démarche, elle, n’est plus fiable.
    pub fn set_erreur(&mut self, e: &EvalError) {
        self.erreur = e.to_string();
        self.genre_erreur = Some(e.kind());
        self.demarche = DemarcheNoyau::default();
        self.focus_entree = true;
    }

    /// Déposer un résultat + démarche, et l’inscrire dans l’historique.
    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: DemarcheNoyau) {
        self.clear_erreur();
        self.resultat = resultat.into();

        // texte tel que tapé : le rappel ne doit pas montrer la pré-passe
        self.historique.push_front(LigneHistorique {
            expression: self.entree.trim().to_string(),
            resultat: self.resultat.clone(),
        });
        self.historique.truncate(HISTORIQUE_MAX);

        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// ± : change le signe de toute l’entrée. Un nombre seul bascule directement
    /// (`5` <-> `-5`), sinon l’expression est enveloppée (`1+2` <-> `-(1+2)`).
    pub fn changer_signe(&mut self) {
        let t = self.entree.trim();
        if t.is_empty() {
            return;
        }

        self.entree = if t.parse::<f64>().is_ok() {
            match t.strip_prefix('-') {
                Some(reste) => reste.to_string(),
                None => format!("-{t}"),
            }
        } else if let Some(dedans) = enveloppe_negative(t) {
            dedans.to_string()
        } else {
            format!("-({t})")
        };
        self.focus_entree = true;
    }

    /// Rappel : remet l’expression `i` de l’historique dans l’entrée.
    pub fn rappeler(&mut self, i: usize) {
        if let Some(ligne) = self.historique.get(i) {
            self.entree = ligne.expression.clone();
            self.focus_entree = true;
        }
    }
}

/// `-(X)` où la '(' d’indice 1 ferme exactement en fin de texte => `X`.
fn enveloppe_negative(t: &str) -> Option<&str> {
    let corps = t.strip_prefix("-(")?.strip_suffix(')')?;
    let mut profondeur = 0usize;
    for c in corps.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => profondeur = profondeur.checked_sub(1)?,
            _ => {}
        }
    }
    (profondeur == 0).then_some(corps)
}
